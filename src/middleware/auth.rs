use axum::extract::Request;
use axum::middleware::Next;
use axum::response::{IntoResponse, Redirect, Response};
use tracing::debug;

use crate::config::SIGNIN_PATH;
use crate::middleware::session::Session;

pub const SIGNIN_REQUIRED: &str = "You must be signed in to do that.";

/// Gate every route except the sign-in page behind a signed-in session.
///
/// Anonymous requests are sent to the sign-in page; the requested path is kept
/// in the session so sign-in can resume there.
pub async fn require_signed_in_user(mut session: Session, request: Request, next: Next) -> Response {
    let path = request.uri().path();
    if session.data.is_signed_in() || path == SIGNIN_PATH {
        return next.run(request).await;
    }

    debug!(path, "anonymous request; redirecting to sign in");
    session.data.target_path = Some(path.to_string());
    session.set_message(SIGNIN_REQUIRED);
    (session, Redirect::to(SIGNIN_PATH)).into_response()
}
