/*
 * Responsibility
 * - Shared context attached to the Router (AppState)
 * - Clone-cheap: everything inside is Arc / Copy
 */
use std::sync::Arc;

use crate::config::AppEnv;
use crate::repos::user_repo::UserStore;
use crate::services::auth::AuthService;

#[derive(Clone)]
pub struct AppState {
    pub auth: Arc<AuthService>,
    pub users: Arc<dyn UserStore>,
    pub app_env: AppEnv,
}

impl AppState {
    pub fn new(auth: Arc<AuthService>, users: Arc<dyn UserStore>, app_env: AppEnv) -> Self {
        Self {
            auth,
            users,
            app_env,
        }
    }
}
