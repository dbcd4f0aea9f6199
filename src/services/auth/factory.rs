/// Factory: build `AuthService` from application `Config` and a user store.
use std::sync::Arc;

use crate::config::Config;
use crate::repos::user_repo::UserStore;
use crate::services::auth::{AuthService, BypassPolicy, TokenCodec, UserResolver};

pub fn build_auth_service(config: &Config, users: Arc<dyn UserStore>) -> Arc<AuthService> {
    let codec = TokenCodec::new(&config.jwt_secret, config.jwt_leeway_seconds);
    let bypass = BypassPolicy::new(config.app_env, config.dev_bypass_hosts.clone());

    if config.app_env.is_development() {
        tracing::warn!(
            hosts = ?config.dev_bypass_hosts,
            "development auth bypass is active for invalid tokens"
        );
    }

    Arc::new(AuthService::new(codec, UserResolver::new(users), bypass))
}
