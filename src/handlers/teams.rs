use axum::{
    Form,
    extract::State,
    response::{IntoResponse, Redirect},
};
use tracing::info;

use super::{HandlerResult, find_team, load_page};
use crate::config::LEAGUE_PATH;
use crate::middleware::params::{RouteParams, TeamForm};
use crate::middleware::session::Session;
use crate::router::LeagueState;
use crate::service::validation::{error_for_name, error_not_unique};
use crate::views;

/// `GET /teams/page/{page_num}`
pub async fn list_teams(
    State(state): State<LeagueState>,
    mut session: Session,
    params: RouteParams,
) -> HandlerResult {
    let teams = state.storage.league_teams().await?;
    let page = load_page(&session, &teams, params.page_num)?;
    let flash = session.take_flash();
    let html = views::teams_page(&flash, session.username(), &page, "");
    Ok((session, html).into_response())
}

/// `POST /teams`
pub async fn create_team(
    State(state): State<LeagueState>,
    mut session: Session,
    Form(form): Form<TeamForm>,
) -> HandlerResult {
    let team_name = form.team_name();

    let error = match error_for_name(team_name) {
        Some(e) => Some(e),
        None => error_not_unique(&state.storage, team_name, 0).await?,
    };

    if let Some(error) = error {
        let teams = state.storage.league_teams().await?;
        let page = load_page(&session, &teams, Some(1))?;
        let flash = session.take_flash().with_error(error);
        let html = views::teams_page(&flash, session.username(), &page, team_name);
        return Ok((session, html).into_response());
    }

    let id = state.storage.create_team(team_name).await?;
    info!(team_id = id, team_name, "team created");
    session.set_success(format!("The team {team_name} has joined the league!"));
    Ok((session, Redirect::to(LEAGUE_PATH)).into_response())
}

/// `GET /teams/{team_id}/edit`
pub async fn edit_team_form(
    State(state): State<LeagueState>,
    mut session: Session,
    params: RouteParams,
) -> HandlerResult {
    let team = find_team(&state.storage, &session, params.team_id).await?;
    let flash = session.take_flash();
    let html = views::edit_team(&flash, session.username(), &team, &team.name);
    Ok((session, html).into_response())
}

/// `POST /teams/{team_id}`
pub async fn update_team(
    State(state): State<LeagueState>,
    mut session: Session,
    params: RouteParams,
    Form(form): Form<TeamForm>,
) -> HandlerResult {
    let team = find_team(&state.storage, &session, params.team_id).await?;
    let team_name = form.team_name();

    let error = match error_for_name(team_name) {
        Some(e) => Some(e),
        None => error_not_unique(&state.storage, team_name, team.id).await?,
    };

    if let Some(error) = error {
        let flash = session.take_flash().with_error(error);
        let html = views::edit_team(&flash, session.username(), &team, team_name);
        return Ok((session, html).into_response());
    }

    state.storage.update_team(team_name, team.id).await?;
    info!(team_id = team.id, team_name, "team renamed");
    session.set_success(format!("The team name has been updated to {team_name}."));
    Ok((session, Redirect::to(LEAGUE_PATH)).into_response())
}

/// `POST /teams/{team_id}/delete`
pub async fn delete_team(
    State(state): State<LeagueState>,
    mut session: Session,
    params: RouteParams,
) -> HandlerResult {
    if let Some(team_id) = params.team_id {
        state.storage.delete_team(team_id).await?;
        info!(team_id, "team deleted");
    }
    session.set_success("The team has been deleted.");
    Ok((session, Redirect::to(LEAGUE_PATH)).into_response())
}
