//! Permission-code authorization.
//!
//! Admins pass without a lookup; everyone else needs the code granted through one of their
//! roles in the user store.

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
use crate::repos::user_repo::UserStore;
use crate::services::auth::AuthenticatedUser;

#[derive(Clone)]
struct PermissionGuard {
    users: Arc<dyn UserStore>,
    permission: Arc<str>,
}

pub async fn check(
    users: &dyn UserStore,
    user: Option<&AuthenticatedUser>,
    permission: &str,
) -> Result<(), AppError> {
    let Some(user) = user else {
        return Err(AppError::Unauthenticated);
    };

    if user.is_admin {
        return Ok(());
    }

    let granted = users
        .has_permission(user.id, permission)
        .await
        .map_err(|err| {
            tracing::error!(error = ?err, user_id = user.id, permission, "permission lookup failed");
            AppError::Internal
        })?;

    if !granted {
        tracing::debug!(user_id = user.id, role = %user.role, permission, "permission denied");
        return Err(AppError::PermissionDenied {
            permission: permission.to_string(),
        });
    }

    Ok(())
}

/// Require `permission` on every route of `router`.
pub fn apply<S>(router: Router<S>, users: Arc<dyn UserStore>, permission: &str) -> Router<S>
where
    S: Clone + Send + Sync + 'static,
{
    let guard = PermissionGuard {
        users,
        permission: Arc::from(permission),
    };
    router.route_layer(middleware::from_fn_with_state(guard, permission_middleware))
}

async fn permission_middleware(
    State(guard): State<PermissionGuard>,
    req: Request<Body>,
    next: Next,
) -> Result<Response, AppError> {
    let user = req.extensions().get::<AuthenticatedUser>().cloned();
    check(guard.users.as_ref(), user.as_ref(), &guard.permission).await?;
    Ok(next.run(req).await)
}
