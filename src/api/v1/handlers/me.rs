/*
 * Responsibility
 * - GET /me: the identity the access middleware attached
 */
use axum::Json;
use serde_json::{Value, json};

use crate::api::v1::extractors::CurrentUser;

pub async fn me(CurrentUser(user): CurrentUser) -> Json<Value> {
    Json(json!({"success": true, "data": user}))
}
