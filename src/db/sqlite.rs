use crate::db::models::{DbUser, Player, TeamSummary};
use crate::db::schema::SQLITE_INIT;
use crate::error::LeagueError;
use sqlx::sqlite::{SqliteConnectOptions, SqlitePoolOptions};
use sqlx::{Pool, Sqlite};
use std::collections::HashMap;
use std::str::FromStr;
use tracing::debug;

pub type SqlitePool = Pool<Sqlite>;

/// Open a pool for `database_url`, creating the file if needed, and apply the schema.
///
/// In-memory databases are private to a connection, so they get a single
/// long-lived connection.
pub async fn connect(database_url: &str) -> Result<LeagueStorage, LeagueError> {
    let options = SqliteConnectOptions::from_str(database_url)?
        .create_if_missing(true)
        .foreign_keys(true);

    let pool = if database_url.contains(":memory:") {
        SqlitePoolOptions::new()
            .max_connections(1)
            .idle_timeout(None)
            .max_lifetime(None)
            .connect_with(options)
            .await?
    } else {
        SqlitePoolOptions::new()
            .max_connections(5)
            .connect_with(options)
            .await?
    };

    let storage = LeagueStorage::new(pool);
    storage.init_schema().await?;
    Ok(storage)
}

const SELECT_USERS: &str = "SELECT username, hashed_password FROM users";

const UPSERT_USER: &str = "INSERT INTO users (username, hashed_password) VALUES (?, ?) \
ON CONFLICT(username) DO UPDATE SET hashed_password = excluded.hashed_password";

const SELECT_PLAYER: &str =
    "SELECT id, team_id, name, points FROM players WHERE team_id = ? AND id = ?";

const SELECT_TEAM_PLAYERS: &str = "SELECT id, team_id, name, points FROM players \
WHERE team_id = ? ORDER BY points DESC, id";

const SELECT_TEAM_INFO: &str = "SELECT teams.id, teams.name, COALESCE(SUM(players.points), 0) AS points \
FROM teams LEFT JOIN players ON teams.id = players.team_id \
WHERE teams.id = ? GROUP BY teams.id";

const SELECT_LEAGUE_TEAMS: &str = "SELECT teams.id, teams.name, COALESCE(SUM(players.points), 0) AS points \
FROM teams LEFT JOIN players ON teams.id = players.team_id \
GROUP BY teams.id ORDER BY points DESC, teams.id";

const INSERT_PLAYER: &str = "INSERT INTO players (team_id, name, points) VALUES (?, ?, ?)";
const INSERT_TEAM: &str = "INSERT INTO teams (name) VALUES (?)";
const UPDATE_PLAYER: &str = "UPDATE players SET name = ?, points = ? WHERE id = ?";
const UPDATE_TEAM: &str = "UPDATE teams SET name = ? WHERE id = ?";
const DELETE_PLAYER: &str = "DELETE FROM players WHERE id = ? AND team_id = ?";
const DELETE_TEAM: &str = "DELETE FROM teams WHERE id = ?";
const SELECT_NAME_TAKEN: &str = "SELECT id FROM teams WHERE id != ? AND name = ?";

#[derive(Clone)]
pub struct LeagueStorage {
    pool: SqlitePool,
}

// Each statement is logged with its text and bound parameters before it runs.
impl LeagueStorage {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    /// Initialize the schema by executing the bundled DDL.
    pub async fn init_schema(&self) -> Result<(), LeagueError> {
        // sqlx::query runs a single statement at a time
        for stmt in SQLITE_INIT.split(';') {
            let s = stmt.trim();
            if s.is_empty() {
                continue;
            }
            debug!(sql = s);
            sqlx::query(s).execute(&self.pool).await?;
        }
        Ok(())
    }

    /// Username to PHC password hash for every registered user.
    pub async fn users(&self) -> Result<HashMap<String, String>, LeagueError> {
        debug!(sql = SELECT_USERS);
        let rows: Vec<DbUser> = sqlx::query_as(SELECT_USERS).fetch_all(&self.pool).await?;
        Ok(rows
            .into_iter()
            .map(|u| (u.username, u.hashed_password))
            .collect())
    }

    /// Insert a user, replacing the stored hash if the username already exists.
    ///
    /// The hash is left out of the log line.
    pub async fn upsert_user(
        &self,
        username: &str,
        hashed_password: &str,
    ) -> Result<(), LeagueError> {
        debug!(sql = UPSERT_USER, username);
        sqlx::query(UPSERT_USER)
            .bind(username)
            .bind(hashed_password)
            .execute(&self.pool)
            .await?;
        Ok(())
    }

    /// One player, only if it belongs to `team_id`.
    pub async fn player_info(
        &self,
        team_id: i64,
        player_id: i64,
    ) -> Result<Option<Player>, LeagueError> {
        debug!(sql = SELECT_PLAYER, team_id, player_id);
        let player = sqlx::query_as::<_, Player>(SELECT_PLAYER)
            .bind(team_id)
            .bind(player_id)
            .fetch_optional(&self.pool)
            .await?;
        Ok(player)
    }

    /// Roster of a team, highest season total first.
    pub async fn team_players(&self, team_id: i64) -> Result<Vec<Player>, LeagueError> {
        debug!(sql = SELECT_TEAM_PLAYERS, team_id);
        let players = sqlx::query_as::<_, Player>(SELECT_TEAM_PLAYERS)
            .bind(team_id)
            .fetch_all(&self.pool)
            .await?;
        Ok(players)
    }

    /// Header info for a team page: id, name and summed points (0 without players).
    pub async fn team_info(&self, team_id: i64) -> Result<Option<TeamSummary>, LeagueError> {
        debug!(sql = SELECT_TEAM_INFO, team_id);
        let team = sqlx::query_as::<_, TeamSummary>(SELECT_TEAM_INFO)
            .bind(team_id)
            .fetch_optional(&self.pool)
            .await?;
        Ok(team)
    }

    /// Every team in the league with its summed points, highest first.
    pub async fn league_teams(&self) -> Result<Vec<TeamSummary>, LeagueError> {
        debug!(sql = SELECT_LEAGUE_TEAMS);
        let teams = sqlx::query_as::<_, TeamSummary>(SELECT_LEAGUE_TEAMS)
            .fetch_all(&self.pool)
            .await?;
        Ok(teams)
    }

    pub async fn create_player(
        &self,
        team_id: i64,
        player_name: &str,
        points: i64,
    ) -> Result<i64, LeagueError> {
        debug!(sql = INSERT_PLAYER, team_id, player_name, points);
        let res = sqlx::query(INSERT_PLAYER)
            .bind(team_id)
            .bind(player_name)
            .bind(points)
            .execute(&self.pool)
            .await?;
        Ok(res.last_insert_rowid())
    }

    pub async fn create_team(&self, team_name: &str) -> Result<i64, LeagueError> {
        debug!(sql = INSERT_TEAM, team_name);
        let res = sqlx::query(INSERT_TEAM)
            .bind(team_name)
            .execute(&self.pool)
            .await?;
        Ok(res.last_insert_rowid())
    }

    pub async fn update_player(
        &self,
        player_id: i64,
        player_name: &str,
        points: i64,
    ) -> Result<(), LeagueError> {
        debug!(sql = UPDATE_PLAYER, player_name, points, player_id);
        sqlx::query(UPDATE_PLAYER)
            .bind(player_name)
            .bind(points)
            .bind(player_id)
            .execute(&self.pool)
            .await?;
        Ok(())
    }

    pub async fn update_team(&self, team_name: &str, team_id: i64) -> Result<(), LeagueError> {
        debug!(sql = UPDATE_TEAM, team_name, team_id);
        sqlx::query(UPDATE_TEAM)
            .bind(team_name)
            .bind(team_id)
            .execute(&self.pool)
            .await?;
        Ok(())
    }

    /// Removes the player only when it belongs to `team_id`; returns whether a row went.
    pub async fn delete_player(&self, team_id: i64, player_id: i64) -> Result<bool, LeagueError> {
        debug!(sql = DELETE_PLAYER, player_id, team_id);
        let res = sqlx::query(DELETE_PLAYER)
            .bind(player_id)
            .bind(team_id)
            .execute(&self.pool)
            .await?;
        Ok(res.rows_affected() > 0)
    }

    /// Players of the team go with it through the `ON DELETE CASCADE` key.
    pub async fn delete_team(&self, team_id: i64) -> Result<(), LeagueError> {
        debug!(sql = DELETE_TEAM, team_id);
        sqlx::query(DELETE_TEAM)
            .bind(team_id)
            .execute(&self.pool)
            .await?;
        Ok(())
    }

    /// `true` when a team other than `excluded_id` already uses `team_name`.
    pub async fn check_unique_team_name(
        &self,
        team_name: &str,
        excluded_id: i64,
    ) -> Result<bool, LeagueError> {
        debug!(sql = SELECT_NAME_TAKEN, excluded_id, team_name);
        let rec: Option<(i64,)> = sqlx::query_as(SELECT_NAME_TAKEN)
            .bind(excluded_id)
            .bind(team_name)
            .fetch_optional(&self.pool)
            .await?;
        Ok(rec.is_some())
    }
}
