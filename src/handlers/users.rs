use axum::{
    Form,
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Redirect},
};
use tracing::{info, warn};

use super::HandlerResult;
use crate::config::{LEAGUE_PATH, SIGNIN_PATH};
use crate::error::LeagueError;
use crate::middleware::params::SigninForm;
use crate::middleware::session::Session;
use crate::router::LeagueState;
use crate::service::password::valid_credentials;
use crate::views;

pub const INVALID_CREDENTIALS: &str = "Invalid credentials";
pub const SIGNED_OUT: &str = "You have been signed out.";

/// `GET /users/signin`
pub async fn signin_form(mut session: Session) -> HandlerResult {
    let flash = session.take_flash();
    let html = views::signin(&flash, "");
    Ok((session, html).into_response())
}

/// `POST /users/signin`
pub async fn signin(
    State(state): State<LeagueState>,
    mut session: Session,
    Form(form): Form<SigninForm>,
) -> HandlerResult {
    let credentials = state.storage.users().await?;
    let SigninForm { username, password } = form;

    // argon2 verification is CPU bound
    let (username, valid) = tokio::task::spawn_blocking(move || {
        let valid = valid_credentials(&credentials, &username, &password);
        (username, valid)
    })
    .await
    .map_err(LeagueError::from)?;

    if !valid {
        warn!(username = %username, "sign in rejected");
        let flash = session.take_flash().with_error(INVALID_CREDENTIALS);
        let html = views::signin(&flash, &username);
        return Ok((StatusCode::UNPROCESSABLE_ENTITY, session, html).into_response());
    }

    info!(username = %username, "signed in");
    session.set_success(format!("Welcome to the app, {username}!"));
    session.data.username = Some(username);
    let target = session
        .data
        .target_path
        .take()
        .unwrap_or_else(|| LEAGUE_PATH.to_string());
    Ok((session, Redirect::to(&target)).into_response())
}

/// `POST /users/signout`
pub async fn signout(mut session: Session) -> HandlerResult {
    if let Some(username) = session.data.username.take() {
        info!(username = %username, "signed out");
    }
    session.set_message(SIGNED_OUT);
    Ok((session, Redirect::to(SIGNIN_PATH)).into_response())
}
