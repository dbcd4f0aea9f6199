use axum::Json;
use serde_json::{Value, json};

use crate::api::v1::extractors::CurrentUser;

// Reachable only through the admin role gate.
pub async fn admin_ping(CurrentUser(user): CurrentUser) -> Json<Value> {
    tracing::info!(user_id = user.id, "admin ping");
    Json(json!({"success": true, "data": {"pong": true, "role": user.role}}))
}
