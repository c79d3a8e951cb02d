pub mod players;
pub mod teams;
pub mod users;

use axum::response::{IntoResponse, Redirect, Response};
use tracing::debug;

use crate::config::{ITEMS_PER_PAGE, LEAGUE_PATH};
use crate::db::{LeagueStorage, Player, TeamSummary};
use crate::error::LeagueError;
use crate::middleware::session::Session;
use crate::service::pagination::Page;

pub const TEAM_NOT_FOUND: &str = "The specified team was not found.";
pub const PLAYER_NOT_FOUND: &str = "The specified player was not found.";
pub const PAGE_OUT_OF_BOUNDS: &str = "Uh oh! That was an out of bounds page number";
pub const PAGE_NOT_FOUND: &str = "The page you were looking for couldn't be found!";

/// Early exit from a handler: either a finished redirect or a fatal error.
#[derive(Debug)]
pub enum Halt {
    Redirect(Response),
    Failure(LeagueError),
}

impl Halt {
    /// Flash `error` and send the client back to the league page.
    pub fn to_league(session: &Session, error: &str) -> Self {
        debug!(error, "halting to league page");
        let mut session = session.clone();
        session.set_error(error);
        Halt::Redirect((session, Redirect::to(LEAGUE_PATH)).into_response())
    }
}

impl From<LeagueError> for Halt {
    fn from(e: LeagueError) -> Self {
        Halt::Failure(e)
    }
}

impl IntoResponse for Halt {
    fn into_response(self) -> Response {
        match self {
            Halt::Redirect(resp) => resp,
            Halt::Failure(e) => e.into_response(),
        }
    }
}

pub type HandlerResult = Result<Response, Halt>;

pub fn team_path(team_id: i64) -> String {
    format!("/teams/{team_id}/page/1")
}

/// Team header info, or halt when the id is missing or unknown.
pub async fn find_team(
    storage: &LeagueStorage,
    session: &Session,
    team_id: Option<i64>,
) -> Result<TeamSummary, Halt> {
    let team = match team_id {
        Some(id) => storage.team_info(id).await?,
        None => None,
    };
    team.ok_or_else(|| Halt::to_league(session, TEAM_NOT_FOUND))
}

/// A player of the given team, or halt when the pair does not match a row.
pub async fn find_player(
    storage: &LeagueStorage,
    session: &Session,
    team_id: Option<i64>,
    player_id: Option<i64>,
) -> Result<Player, Halt> {
    let player = match (team_id, player_id) {
        (Some(team_id), Some(player_id)) => storage.player_info(team_id, player_id).await?,
        _ => None,
    };
    player.ok_or_else(|| Halt::to_league(session, PLAYER_NOT_FOUND))
}

/// Slice out the requested page, or halt when it is out of bounds.
pub fn load_page<'a, T>(
    session: &Session,
    items: &'a [T],
    page_num: Option<i64>,
) -> Result<Page<'a, T>, Halt> {
    Page::load(items, page_num, ITEMS_PER_PAGE)
        .ok_or_else(|| Halt::to_league(session, PAGE_OUT_OF_BOUNDS))
}

/// `GET /`
pub async fn home() -> Redirect {
    Redirect::to(LEAGUE_PATH)
}

/// Fallback for unmatched routes and methods.
pub async fn not_found(mut session: Session) -> Response {
    session.set_error(PAGE_NOT_FOUND);
    (session, Redirect::to("/")).into_response()
}
