use axum::{
    Router,
    middleware::from_fn_with_state,
    routing::{get, post},
};
use axum_extra::extract::cookie::Key;
use time::Duration;
use tracing::warn;

use crate::config::{Config, SIGNIN_PATH};
use crate::db::LeagueStorage;
use crate::handlers::{self, players, teams, users};
use crate::middleware::auth::require_signed_in_user;

#[derive(Clone)]
pub struct LeagueState {
    pub storage: LeagueStorage,
    pub key: Key,
    pub secure_cookie: bool,
    pub session_ttl: Duration,
}

impl LeagueState {
    pub fn new(storage: LeagueStorage, cfg: &Config) -> Self {
        Self {
            storage,
            key: session_key(&cfg.session_secret),
            secure_cookie: !cfg.insecure_cookie,
            session_ttl: Duration::hours(cfg.session_ttl_hours),
        }
    }
}

/// Cookie key from the configured secret; a random one when it is too short.
fn session_key(secret: &str) -> Key {
    match Key::try_from(secret.as_bytes()) {
        Ok(key) => key,
        Err(_) => {
            warn!("session_secret shorter than 64 bytes; sessions will not survive a restart");
            Key::generate()
        }
    }
}

pub fn league_router(state: LeagueState) -> Router {
    Router::new()
        .route("/", get(handlers::home))
        .route("/teams", post(teams::create_team))
        .route("/teams/page/{page_num}", get(teams::list_teams))
        .route("/teams/{team_id}", post(teams::update_team))
        .route("/teams/{team_id}/edit", get(teams::edit_team_form))
        .route("/teams/{team_id}/delete", post(teams::delete_team))
        .route("/teams/{team_id}/page/{page_num}", get(players::team_page))
        .route("/teams/{team_id}/players", post(players::create_player))
        .route(
            "/teams/{team_id}/players/{player_id}",
            post(players::update_player),
        )
        .route(
            "/teams/{team_id}/players/{player_id}/edit",
            get(players::edit_player_form),
        )
        .route(
            "/teams/{team_id}/players/{player_id}/delete",
            post(players::delete_player),
        )
        .route(SIGNIN_PATH, get(users::signin_form).post(users::signin))
        .route("/users/signout", post(users::signout))
        .fallback(handlers::not_found)
        .method_not_allowed_fallback(handlers::not_found)
        .layer(from_fn_with_state(state.clone(), require_signed_in_user))
        .with_state(state)
}
