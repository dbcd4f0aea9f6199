/*
 * Responsibility
 * - The identity attached to a request once authentication succeeds
 * - Built in one step from the store record (+ secondary role), so it is never partially populated
 */
use serde::Serialize;

use crate::repos::user_repo::UserRow;

const ADMIN_ROLES: [&str; 2] = ["admin", "super_admin"];

/// Authenticated user, stored in request extensions by the access middleware.
///
/// Lives for a single request; handlers read it through `CurrentUser`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AuthenticatedUser {
    pub id: i64,
    pub username: String,
    pub email: String,
    pub real_name: String,
    pub phone: String,
    pub role: String,
    pub status: String,
    pub is_admin: bool,
}

impl AuthenticatedUser {
    /// Combine the base record with the secondary role lookup.
    ///
    /// The secondary role wins when present; otherwise the record's own `role` column is used.
    pub fn from_record(record: UserRow, secondary_role: Option<String>) -> Self {
        let role = secondary_role
            .filter(|r| !r.trim().is_empty())
            .unwrap_or(record.role);
        let real_name = record
            .real_name
            .filter(|n| !n.is_empty())
            .unwrap_or_else(|| record.username.clone());

        Self {
            id: record.id,
            is_admin: is_admin_role(&role),
            username: record.username,
            email: record.email.unwrap_or_default(),
            real_name,
            phone: record.phone.unwrap_or_default(),
            role,
            status: record.status,
        }
    }
}

pub fn is_admin_role(role: &str) -> bool {
    ADMIN_ROLES.contains(&role)
}
