//! SQL DDL for initializing the league database.

/// SQLite schema with:
/// - `users` keyed by `username`, holding a PHC-format password hash
/// - `teams` with an autoincrement `id`; name uniqueness is checked by the handlers
/// - `players` referencing `teams(id)`; removing a team removes its roster
/// - `points` constrained to a season total of 0..=3000
pub const SQLITE_INIT: &str = r#"
CREATE TABLE IF NOT EXISTS users (
    username TEXT PRIMARY KEY NOT NULL,
    hashed_password TEXT NOT NULL
);

CREATE TABLE IF NOT EXISTS teams (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    name TEXT NOT NULL
);

CREATE TABLE IF NOT EXISTS players (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    team_id INTEGER NOT NULL REFERENCES teams(id) ON DELETE CASCADE,
    name TEXT NOT NULL,
    points INTEGER NOT NULL CHECK (points BETWEEN 0 AND 3000)
);

CREATE INDEX IF NOT EXISTS idx_players_team_id ON players(team_id);
"#;
