//! Authentication middleware: bearer token -> `AuthenticatedUser` in request extensions.
//!
//! The decision logic lives in `AuthService::authenticate`; this layer only adapts it to axum.
//! On failure the error response is returned and `next` is never called.

use axum::{
    Router,
    body::Body,
    extract::State,
    http::{HeaderMap, Request, Uri, header},
    middleware::{self, Next},
    response::Response,
};

use crate::error::AppError;
use crate::state::AppState;

/// Require authentication on every route of `router`.
///
/// ```ignore
/// let protected = middleware::auth::access::apply(protected, state.clone());
/// ```
pub fn apply(router: Router<AppState>, state: AppState) -> Router<AppState> {
    router.layer(middleware::from_fn_with_state(state, access_middleware))
}

async fn access_middleware(
    State(state): State<AppState>,
    req: Request<Body>,
    next: Next,
) -> Result<Response, AppError> {
    // Split so nothing borrowed from the body is held across the store lookup
    let (mut parts, body) = req.into_parts();

    let user = {
        let host = request_host(&parts.headers, &parts.uri);
        state.auth.authenticate(&parts.headers, host).await?
    };

    // Inserted fully built, right before the downstream handler runs
    parts.extensions.insert(user);

    Ok(next.run(Request::from_parts(parts, body)).await)
}

fn request_host<'a>(headers: &'a HeaderMap, uri: &'a Uri) -> Option<&'a str> {
    headers
        .get(header::HOST)
        .and_then(|v| v.to_str().ok())
        .or_else(|| uri.authority().map(|a| a.as_str()))
}
