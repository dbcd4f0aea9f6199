/*
 * Responsibility
 * - v1 URL layout
 * - which routes are public, which need authentication, and which need a role / permission
 */
use axum::{Router, routing::get};

use crate::api::v1::handlers::{admin::admin_ping, health::health, me::me, system::system_config};
use crate::middleware::auth::{RoleSet, access, permission, role};
use crate::state::AppState;

pub const SYSTEM_CONFIG_VIEW: &str = "SYSTEM_CONFIG_VIEW";

pub fn routes(state: AppState) -> Router<AppState> {
    let admin = role::apply(
        Router::new().route("/admin/ping", get(admin_ping)),
        RoleSet::new(["admin", "super_admin"]),
    );

    let system = permission::apply(
        Router::new().route("/system/config", get(system_config)),
        state.users.clone(),
        SYSTEM_CONFIG_VIEW,
    );

    // access runs first (outer layer), then the per-route role / permission checks
    let protected = access::apply(
        Router::new()
            .route("/me", get(me))
            .merge(admin)
            .merge(system),
        state,
    );

    Router::new().route("/health", get(health)).merge(protected)
}
