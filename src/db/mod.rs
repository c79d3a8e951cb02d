//! Database module: models, schema and queries for the league store.
//!
//! Layout:
//! - `models.rs`: Rust structs mirroring DB rows
//! - `schema.rs`: SQL DDL for initializing the database (SQLite)
//! - `sqlite.rs`: `LeagueStorage`, one method per statement

pub mod models;
pub mod schema;
pub mod sqlite;

pub use models::{DbUser, Player, TeamSummary};
pub use schema::SQLITE_INIT;
pub use sqlite::{LeagueStorage, SqlitePool, connect};
