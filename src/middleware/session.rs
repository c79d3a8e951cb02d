//! Cookie-backed session state.
//!
//! The whole session is one JSON document stored in a private (encrypted and
//! authenticated) cookie. `Session` loads it when extracted and writes it back
//! when returned as part of a response.

use std::convert::Infallible;

use axum::extract::{FromRef, FromRequestParts};
use axum::http::request::Parts;
use axum::response::{IntoResponseParts, ResponseParts};
use axum_extra::extract::cookie::{Cookie, PrivateCookieJar, SameSite};
use serde::{Deserialize, Serialize};
use time::Duration;
use tracing::debug;

use crate::router::LeagueState;

pub const SESSION_COOKIE: &str = "bowling_session";

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionData {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub username: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub success: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    /// Path to resume after signing in.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub target_path: Option<String>,
}

impl SessionData {
    pub fn is_signed_in(&self) -> bool {
        self.username.is_some()
    }

    /// Remove the one-shot messages so they are shown exactly once.
    pub fn take_flash(&mut self) -> Flash {
        Flash {
            error: self.error.take(),
            success: self.success.take(),
            message: self.message.take(),
        }
    }
}

/// Messages displayed on the next rendered page.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Flash {
    pub error: Option<String>,
    pub success: Option<String>,
    pub message: Option<String>,
}

impl Flash {
    /// Replace the error slot with an inline validation message.
    pub fn with_error(mut self, error: impl Into<String>) -> Self {
        self.error = Some(error.into());
        self
    }
}

/// Request-scoped session. Must be included in the response to persist changes.
#[derive(Clone)]
pub struct Session {
    jar: PrivateCookieJar,
    secure: bool,
    ttl: Duration,
    pub data: SessionData,
}

impl Session {
    pub fn from_jar(jar: PrivateCookieJar, secure: bool, ttl: Duration) -> Self {
        let data = jar
            .get(SESSION_COOKIE)
            .and_then(|c| serde_json::from_str::<SessionData>(c.value()).ok())
            .unwrap_or_default();
        Self {
            jar,
            secure,
            ttl,
            data,
        }
    }

    pub fn username(&self) -> Option<&str> {
        self.data.username.as_deref()
    }

    pub fn set_error(&mut self, msg: impl Into<String>) {
        self.data.error = Some(msg.into());
    }

    pub fn set_success(&mut self, msg: impl Into<String>) {
        self.data.success = Some(msg.into());
    }

    pub fn set_message(&mut self, msg: impl Into<String>) {
        self.data.message = Some(msg.into());
    }

    pub fn take_flash(&mut self) -> Flash {
        self.data.take_flash()
    }

    /// Serialize the session back into the cookie jar.
    pub fn into_jar(self) -> PrivateCookieJar {
        let value = match serde_json::to_string(&self.data) {
            Ok(v) => v,
            Err(e) => {
                debug!(error = %e, "session serialization failed; dropping session");
                return self.jar.remove(Cookie::build(SESSION_COOKIE).path("/"));
            }
        };
        let cookie = Cookie::build(Cookie::new(SESSION_COOKIE, value))
            .path("/")
            .http_only(true)
            .secure(self.secure)
            .same_site(SameSite::Lax)
            .max_age(self.ttl)
            .build();
        self.jar.add(cookie)
    }
}

impl<S> FromRequestParts<S> for Session
where
    S: Send + Sync,
    LeagueState: FromRef<S>,
{
    type Rejection = Infallible;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let state = LeagueState::from_ref(state);
        let jar = PrivateCookieJar::from_headers(&parts.headers, state.key.clone());
        Ok(Session::from_jar(
            jar,
            state.secure_cookie,
            state.session_ttl,
        ))
    }
}

impl IntoResponseParts for Session {
    type Error = Infallible;

    fn into_response_parts(self, res: ResponseParts) -> Result<ResponseParts, Self::Error> {
        self.into_jar().into_response_parts(res)
    }
}
