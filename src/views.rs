//! Server-rendered HTML pages.

use maud::{DOCTYPE, Markup, html};

use crate::db::{Player, TeamSummary};
use crate::middleware::session::Flash;
use crate::service::pagination::Page;

fn layout(title: &str, flash: &Flash, username: Option<&str>, body: Markup) -> Markup {
    html! {
        (DOCTYPE)
        html lang="en" {
            head {
                meta charset="utf-8";
                title { (title) " | Bowling League" }
            }
            body {
                header {
                    h1 { a href="/teams/page/1" { "Bowling League" } }
                    @if let Some(name) = username {
                        form.signout action="/users/signout" method="post" {
                            p { "Signed in as " (name) "." }
                            button type="submit" { "Sign Out" }
                        }
                    }
                }
                main {
                    @if let Some(error) = &flash.error {
                        div.flash.error { p { (error) } }
                    }
                    @if let Some(success) = &flash.success {
                        div.flash.success { p { (success) } }
                    }
                    @if let Some(message) = &flash.message {
                        div.flash.message { p { (message) } }
                    }
                    (body)
                }
            }
        }
    }
}

fn pager<T>(page: &Page<'_, T>, base: &str) -> Markup {
    html! {
        nav.pager {
            @if page.has_prev {
                a href={ (base) "/page/" (page.page_num - 1) } { "Previous" }
                " "
            }
            span { "Page " (page.page_num) }
            @if page.has_next {
                " "
                a href={ (base) "/page/" (page.page_num + 1) } { "Next" }
            }
        }
    }
}

/// League page: teams ranked by points plus the new-team form.
pub fn teams_page(
    flash: &Flash,
    username: Option<&str>,
    page: &Page<'_, TeamSummary>,
    team_name: &str,
) -> Markup {
    let body = html! {
        h2 { "League Standings" }
        ul.teams {
            @for team in page.items {
                li {
                    a href={ "/teams/" (team.id) "/page/1" } { (team.name) }
                    " "
                    span.points { (team.points) " points" }
                }
            }
            @if page.items.is_empty() {
                li { "No teams have joined the league yet." }
            }
        }
        (pager(page, "/teams"))
        form action="/teams" method="post" {
            label for="team_name" { "New team name:" }
            input #team_name name="team_name" type="text" value=(team_name);
            button type="submit" { "Add Team" }
        }
    };
    layout("Teams", flash, username, body)
}

/// Team page: header with the summed points, roster and the new-player form.
pub fn team_page(
    flash: &Flash,
    username: Option<&str>,
    team: &TeamSummary,
    page: &Page<'_, Player>,
    player_name: &str,
    points: &str,
) -> Markup {
    let base = format!("/teams/{}", team.id);
    let body = html! {
        h2 { (team.name) " " span.points { (team.points) " points" } }
        p { a href={ (base) "/edit" } { "Edit team" } }
        form.inline action={ (base) "/delete" } method="post" {
            button type="submit" { "Delete team" }
        }
        ul.players {
            @for player in page.items {
                li {
                    (player.name) " "
                    span.points { (player.points) " points" }
                    " "
                    a href={ (base) "/players/" (player.id) "/edit" } { "Edit" }
                    form.inline action={ (base) "/players/" (player.id) "/delete" } method="post" {
                        button type="submit" { "Delete" }
                    }
                }
            }
            @if page.items.is_empty() {
                li { "This team has no players yet." }
            }
        }
        (pager(page, &base))
        form action={ (base) "/players" } method="post" {
            label for="player_name" { "Player name:" }
            input #player_name name="player_name" type="text" value=(player_name);
            label for="points" { "Season points:" }
            input #points name="points" type="text" value=(points);
            button type="submit" { "Add Player" }
        }
        p { a href="/teams/page/1" { "Back to the league" } }
    };
    layout(&team.name, flash, username, body)
}

pub fn edit_team(flash: &Flash, username: Option<&str>, team: &TeamSummary, team_name: &str) -> Markup {
    let body = html! {
        h2 { "Rename " (team.name) }
        form action={ "/teams/" (team.id) } method="post" {
            label for="team_name" { "Team name:" }
            input #team_name name="team_name" type="text" value=(team_name);
            button type="submit" { "Save" }
        }
        p { a href={ "/teams/" (team.id) "/page/1" } { "Cancel" } }
    };
    layout("Edit team", flash, username, body)
}

pub fn edit_player(
    flash: &Flash,
    username: Option<&str>,
    player: &Player,
    player_name: &str,
    points: &str,
) -> Markup {
    let body = html! {
        h2 { "Edit " (player.name) }
        form action={ "/teams/" (player.team_id) "/players/" (player.id) } method="post" {
            label for="player_name" { "Player name:" }
            input #player_name name="player_name" type="text" value=(player_name);
            label for="points" { "Season points:" }
            input #points name="points" type="text" value=(points);
            button type="submit" { "Save" }
        }
        p { a href={ "/teams/" (player.team_id) "/page/1" } { "Cancel" } }
    };
    layout("Edit player", flash, username, body)
}

pub fn signin(flash: &Flash, username: &str) -> Markup {
    let body = html! {
        h2 { "Sign In" }
        form action="/users/signin" method="post" {
            label for="username" { "Username:" }
            input #username name="username" type="text" value=(username);
            label for="password" { "Password:" }
            input #password name="password" type="password";
            button type="submit" { "Sign In" }
        }
    };
    layout("Sign In", flash, None, body)
}
