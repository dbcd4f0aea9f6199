/*
 * Responsibility
 * - GET /system/config: non-secret runtime settings, behind SYSTEM_CONFIG_VIEW
 */
use axum::{Json, extract::State};
use serde_json::{Value, json};

use crate::state::AppState;

pub async fn system_config(State(state): State<AppState>) -> Json<Value> {
    Json(json!({
        "success": true,
        "data": {
            "environment": state.app_env.as_str(),
        }
    }))
}
