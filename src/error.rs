use axum::{
    http::StatusCode,
    response::{Html, IntoResponse, Response},
};
use sqlx::Error as SqlxError;
use thiserror::Error as ThisError;
use tracing::error;

#[derive(Debug, ThisError)]
pub enum LeagueError {
    #[error("Database error: {0}")]
    DatabaseError(#[from] SqlxError),

    #[error("Config error: {0}")]
    ConfigError(#[from] Box<figment::Error>),

    #[error("Password hash error: {0}")]
    PasswordError(String),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Blocking task failed: {0}")]
    TaskError(#[from] tokio::task::JoinError),
}

impl From<figment::Error> for LeagueError {
    fn from(e: figment::Error) -> Self {
        LeagueError::ConfigError(Box::new(e))
    }
}

impl From<argon2::password_hash::Error> for LeagueError {
    fn from(e: argon2::password_hash::Error) -> Self {
        LeagueError::PasswordError(e.to_string())
    }
}

impl IntoResponse for LeagueError {
    fn into_response(self) -> Response {
        error!(error = %self, "request failed");
        (
            StatusCode::INTERNAL_SERVER_ERROR,
            Html("<h1>Internal Server Error</h1><p>An internal server error occurred.</p>"),
        )
            .into_response()
    }
}
