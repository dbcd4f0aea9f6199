#![allow(dead_code)]

use std::collections::{HashMap, HashSet};
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

use access_gate::api::v1::extractors::CurrentUser;
use access_gate::config::AppEnv;
use access_gate::middleware::auth::access;
use access_gate::repos::error::{RepoError, RepoResult};
use access_gate::repos::user_repo::{UserRow, UserStore};
use access_gate::services::auth::{AuthService, BypassPolicy, TokenCodec, UserResolver};
use access_gate::state::AppState;
use async_trait::async_trait;
use axum::body::Body;
use axum::http::{Request, Response, StatusCode, header};
use axum::routing::get;
use axum::{Extension, Json, Router};
use serde_json::Value;
use tower::ServiceExt;

pub const SECRET: &str = "integration-secret";

#[derive(Default)]
pub struct MemoryUserStore {
    users: HashMap<i64, UserRow>,
    roles: HashMap<i64, String>,
    grants: HashSet<(i64, String)>,
    down: bool,
    roles_down: bool,
    pub permission_lookups: AtomicUsize,
}

impl MemoryUserStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn unavailable() -> Self {
        Self {
            down: true,
            ..Self::default()
        }
    }

    pub fn with_user(mut self, id: i64, username: &str, base_role: &str) -> Self {
        self.users.insert(
            id,
            UserRow {
                id,
                username: username.to_string(),
                email: Some(format!("{username}@example.com")),
                real_name: None,
                phone: None,
                status: "active".to_string(),
                role: base_role.to_string(),
            },
        );
        self
    }

    pub fn with_status(mut self, id: i64, status: &str) -> Self {
        if let Some(user) = self.users.get_mut(&id) {
            user.status = status.to_string();
        }
        self
    }

    /// Role table unreachable; base records still readable.
    pub fn roles_unavailable(mut self) -> Self {
        self.roles_down = true;
        self
    }

    pub fn with_role(mut self, id: i64, role: &str) -> Self {
        self.roles.insert(id, role.to_string());
        self
    }

    pub fn with_grant(mut self, id: i64, code: &str) -> Self {
        self.grants.insert((id, code.to_string()));
        self
    }

    fn check(&self) -> RepoResult<()> {
        if self.down {
            return Err(RepoError::Db(sqlx::Error::PoolTimedOut));
        }
        Ok(())
    }
}

#[async_trait]
impl UserStore for MemoryUserStore {
    async fn find_by_id(&self, id: i64) -> RepoResult<Option<UserRow>> {
        self.check()?;
        Ok(self.users.get(&id).cloned())
    }

    async fn find_role(&self, id: i64) -> RepoResult<Option<String>> {
        self.check()?;
        if self.roles_down {
            return Err(RepoError::Db(sqlx::Error::PoolTimedOut));
        }
        Ok(self.roles.get(&id).cloned())
    }

    async fn has_permission(&self, id: i64, code: &str) -> RepoResult<bool> {
        self.permission_lookups.fetch_add(1, Ordering::SeqCst);
        self.check()?;
        Ok(self.grants.contains(&(id, code.to_string())))
    }
}

pub fn state(store: Arc<MemoryUserStore>, env: AppEnv, bypass_hosts: Vec<String>) -> AppState {
    let users: Arc<dyn UserStore> = store;
    let auth = AuthService::new(
        TokenCodec::new(SECRET, 0),
        UserResolver::new(users.clone()),
        BypassPolicy::new(env, bypass_hosts),
    );
    AppState::new(Arc::new(auth), users, env)
}

/// The real v1 router over an in-memory store.
pub fn v1_app(store: Arc<MemoryUserStore>, env: AppEnv) -> Router {
    let state = state(store, env, Vec::new());
    access_gate::api::v1::routes(state.clone()).with_state(state)
}

/// A single authenticated route that counts how often the handler runs.
pub fn probe_app(state: AppState, hits: Arc<AtomicUsize>) -> Router {
    async fn probe(
        Extension(hits): Extension<Arc<AtomicUsize>>,
        CurrentUser(user): CurrentUser,
    ) -> Json<Value> {
        hits.fetch_add(1, Ordering::SeqCst);
        Json(serde_json::to_value(user).unwrap())
    }

    let router = Router::new().route("/probe", get(probe));
    access::apply(router, state.clone())
        .layer(Extension(hits))
        .with_state(state)
}

pub fn token(user_id: i64, username: &str) -> String {
    TokenCodec::new(SECRET, 0)
        .issue(user_id, username, 600)
        .unwrap()
}

pub fn get_request(uri: &str, authorization: Option<&str>) -> Request<Body> {
    let mut builder = Request::get(uri).header(header::HOST, "localhost:3000");
    if let Some(value) = authorization {
        builder = builder.header(header::AUTHORIZATION, value);
    }
    builder.body(Body::empty()).unwrap()
}

pub async fn send(app: Router, req: Request<Body>) -> (StatusCode, Value) {
    let res: Response<Body> = app.oneshot(req).await.unwrap();
    let status = res.status();
    let bytes = axum::body::to_bytes(res.into_body(), usize::MAX)
        .await
        .unwrap();
    let body = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap()
    };
    (status, body)
}
