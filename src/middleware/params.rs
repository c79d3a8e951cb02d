use std::collections::HashMap;
use std::convert::Infallible;

use axum::extract::{FromRequestParts, Path};
use axum::http::request::Parts;
use serde::Deserialize;

use crate::service::validation::to_i;

/// Typed view of the path segments a league route may carry.
///
/// Segments that are absent or not integers come through as `None`, so the
/// handlers can answer with a "not found" flash instead of a 400.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RouteParams {
    pub team_id: Option<i64>,
    pub player_id: Option<i64>,
    pub page_num: Option<i64>,
}

impl RouteParams {
    fn from_segments(segments: &HashMap<String, String>) -> Self {
        let get = |key: &str| segments.get(key).and_then(|v| to_i(v));
        Self {
            team_id: get("team_id"),
            player_id: get("player_id"),
            page_num: get("page_num"),
        }
    }
}

impl<S> FromRequestParts<S> for RouteParams
where
    S: Send + Sync,
{
    type Rejection = Infallible;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let segments = Path::<HashMap<String, String>>::from_request_parts(parts, state)
            .await
            .map(|Path(m)| m)
            .unwrap_or_default();
        Ok(Self::from_segments(&segments))
    }
}

/// Body of the create/update team forms.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct TeamForm {
    #[serde(default)]
    pub team_name: String,
}

impl TeamForm {
    pub fn team_name(&self) -> &str {
        self.team_name.trim()
    }
}

/// Body of the create/update player forms. `points` stays raw for validation.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct PlayerForm {
    #[serde(default)]
    pub player_name: String,
    #[serde(default)]
    pub points: String,
}

impl PlayerForm {
    pub fn player_name(&self) -> &str {
        self.player_name.trim()
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct SigninForm {
    #[serde(default)]
    pub username: String,
    #[serde(default)]
    pub password: String,
}
