//! Role-based authorization for routes behind the access middleware.

use std::sync::Arc;

use axum::{
    Router,
    body::Body,
    extract::State,
    http::Request,
    middleware::{self, Next},
    response::Response,
};

use crate::error::AppError;
use crate::services::auth::AuthenticatedUser;

/// Role names allowed on a route. Membership test only; order is kept for logs.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RoleSet(Arc<[String]>);

impl RoleSet {
    pub fn new<I, S>(roles: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self(roles.into_iter().map(Into::<String>::into).collect())
    }

    pub fn contains(&self, role: &str) -> bool {
        self.0.iter().any(|r| r == role)
    }

    pub fn as_slice(&self) -> &[String] {
        &self.0
    }
}

/// Pure role check against whatever the access middleware attached.
pub fn authorize(user: Option<&AuthenticatedUser>, roles: &RoleSet) -> Result<(), AppError> {
    let Some(user) = user else {
        return Err(AppError::Unauthenticated);
    };

    if !roles.contains(&user.role) {
        tracing::debug!(
            user_id = user.id,
            role = %user.role,
            required = ?roles.as_slice(),
            "role not permitted"
        );
        return Err(AppError::InsufficientRole);
    }

    Ok(())
}

/// Restrict every route of `router` to `roles`.
///
/// Uses `route_layer`, so unmatched paths still 404 instead of 401/403.
pub fn apply<S>(router: Router<S>, roles: RoleSet) -> Router<S>
where
    S: Clone + Send + Sync + 'static,
{
    router.route_layer(middleware::from_fn_with_state(roles, role_middleware))
}

async fn role_middleware(
    State(roles): State<RoleSet>,
    req: Request<Body>,
    next: Next,
) -> Result<Response, AppError> {
    authorize(req.extensions().get::<AuthenticatedUser>(), &roles)?;
    Ok(next.run(req).await)
}
