use std::{fmt, sync::Arc};

use crate::repos::{error::RepoResult, user_repo::UserStore};
use crate::services::auth::user::AuthenticatedUser;

const ACTIVE_STATUS: &str = "active";

/// Resolves a token subject into the authoritative user + effective role.
///
/// Two store reads (base record, then role) combined into a single result:
/// - `Ok(None)`: no user with that id, or the user is not `active`
/// - `Err(_)`: base record read failed, must not be reported as an authentication failure
///
/// A failed role read degrades to the base-record role.
#[derive(Clone)]
pub struct UserResolver {
    store: Arc<dyn UserStore>,
}

impl fmt::Debug for UserResolver {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("UserResolver").finish_non_exhaustive()
    }
}

impl UserResolver {
    pub fn new(store: Arc<dyn UserStore>) -> Self {
        Self { store }
    }

    pub async fn resolve(&self, subject_id: i64) -> RepoResult<Option<AuthenticatedUser>> {
        let Some(record) = self.store.find_by_id(subject_id).await? else {
            return Ok(None);
        };

        if record.status != ACTIVE_STATUS {
            tracing::debug!(user_id = record.id, status = %record.status, "user not active");
            return Ok(None);
        }

        let role = match self.store.find_role(record.id).await {
            Ok(role) => role,
            Err(err) => {
                tracing::warn!(
                    error = ?err,
                    user_id = record.id,
                    base_role = %record.role,
                    "role lookup failed, using base role"
                );
                None
            }
        };

        Ok(Some(AuthenticatedUser::from_record(record, role)))
    }
}
