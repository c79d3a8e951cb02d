use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// A team row joined with the sum of its players' points.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, FromRow)]
pub struct TeamSummary {
    pub id: i64,
    pub name: String,
    pub points: i64,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, FromRow)]
pub struct Player {
    pub id: i64,
    pub team_id: i64,
    pub name: String,
    pub points: i64,
}

#[derive(Debug, Clone, PartialEq, Eq, FromRow)]
pub struct DbUser {
    pub username: String,
    pub hashed_password: String,
}
