use axum::{
    Form,
    extract::State,
    response::{IntoResponse, Redirect},
};
use tracing::info;

use super::{HandlerResult, find_player, find_team, load_page, team_path};
use crate::config::LEAGUE_PATH;
use crate::middleware::params::{PlayerForm, RouteParams};
use crate::middleware::session::Session;
use crate::router::LeagueState;
use crate::service::validation::{error_for_name, parse_score};
use crate::views;

/// Name first, then points; the first failing rule wins.
fn validate_player(form: &PlayerForm) -> Result<(&str, i64), &'static str> {
    let player_name = form.player_name();
    if let Some(e) = error_for_name(player_name) {
        return Err(e);
    }
    let points = parse_score(&form.points)?;
    Ok((player_name, points))
}

/// `GET /teams/{team_id}/page/{page_num}`
pub async fn team_page(
    State(state): State<LeagueState>,
    mut session: Session,
    params: RouteParams,
) -> HandlerResult {
    let team = find_team(&state.storage, &session, params.team_id).await?;
    let players = state.storage.team_players(team.id).await?;
    let page = load_page(&session, &players, params.page_num)?;
    let flash = session.take_flash();
    let html = views::team_page(&flash, session.username(), &team, &page, "", "");
    Ok((session, html).into_response())
}

/// `POST /teams/{team_id}/players`
pub async fn create_player(
    State(state): State<LeagueState>,
    mut session: Session,
    params: RouteParams,
    Form(form): Form<PlayerForm>,
) -> HandlerResult {
    let team = find_team(&state.storage, &session, params.team_id).await?;

    let (player_name, points) = match validate_player(&form) {
        Ok(valid) => valid,
        Err(error) => {
            let players = state.storage.team_players(team.id).await?;
            let page = load_page(&session, &players, Some(1))?;
            let flash = session.take_flash().with_error(error);
            let html = views::team_page(
                &flash,
                session.username(),
                &team,
                &page,
                form.player_name(),
                &form.points,
            );
            return Ok((session, html).into_response());
        }
    };

    let id = state
        .storage
        .create_player(team.id, player_name, points)
        .await?;
    info!(team_id = team.id, player_id = id, player_name, points, "player created");
    session.set_success(format!("The player {player_name} has joined the team!"));
    Ok((session, Redirect::to(&team_path(team.id))).into_response())
}

/// `GET /teams/{team_id}/players/{player_id}/edit`
pub async fn edit_player_form(
    State(state): State<LeagueState>,
    mut session: Session,
    params: RouteParams,
) -> HandlerResult {
    let player = find_player(&state.storage, &session, params.team_id, params.player_id).await?;
    let flash = session.take_flash();
    let html = views::edit_player(
        &flash,
        session.username(),
        &player,
        &player.name,
        &player.points.to_string(),
    );
    Ok((session, html).into_response())
}

/// `POST /teams/{team_id}/players/{player_id}`
pub async fn update_player(
    State(state): State<LeagueState>,
    mut session: Session,
    params: RouteParams,
    Form(form): Form<PlayerForm>,
) -> HandlerResult {
    let player = find_player(&state.storage, &session, params.team_id, params.player_id).await?;

    let (player_name, points) = match validate_player(&form) {
        Ok(valid) => valid,
        Err(error) => {
            let flash = session.take_flash().with_error(error);
            let html = views::edit_player(
                &flash,
                session.username(),
                &player,
                form.player_name(),
                &form.points,
            );
            return Ok((session, html).into_response());
        }
    };

    state
        .storage
        .update_player(player.id, player_name, points)
        .await?;
    info!(player_id = player.id, player_name, points, "player updated");
    session.set_success(format!(
        "Player is now named {player_name} with {points} points."
    ));
    Ok((session, Redirect::to(&team_path(player.team_id))).into_response())
}

/// `POST /teams/{team_id}/players/{player_id}/delete`
pub async fn delete_player(
    State(state): State<LeagueState>,
    mut session: Session,
    params: RouteParams,
) -> HandlerResult {
    // A player id from another team's URL matches no row.
    if let (Some(team_id), Some(player_id)) = (params.team_id, params.player_id) {
        let deleted = state.storage.delete_player(team_id, player_id).await?;
        info!(team_id, player_id, deleted, "player delete");
    }
    session.set_success("The player has been deleted.");
    let target = params
        .team_id
        .map(team_path)
        .unwrap_or_else(|| LEAGUE_PATH.to_string());
    Ok((session, Redirect::to(&target)).into_response())
}
