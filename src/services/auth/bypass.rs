//! Development-only authentication bypass.
//!
//! When a bearer token fails to decode, a development deployment may stand in a fixed
//! admin identity so local tooling keeps working. The environment mode is the only
//! authoritative switch; the host list is an optional refinement and not a security boundary.

use crate::config::AppEnv;
use crate::services::auth::user::AuthenticatedUser;

pub const DEV_USER_ID: i64 = 121;

#[derive(Clone, Debug)]
pub struct BypassPolicy {
    env: AppEnv,
    hosts: Vec<String>,
}

impl BypassPolicy {
    /// `hosts` empty means the mode alone decides.
    pub fn new(env: AppEnv, hosts: Vec<String>) -> Self {
        let hosts = hosts
            .into_iter()
            .map(|h| h.trim().to_ascii_lowercase())
            .filter(|h| !h.is_empty())
            .collect();

        Self { env, hosts }
    }

    pub fn disabled() -> Self {
        Self::new(AppEnv::Production, Vec::new())
    }

    pub fn should_bypass(&self, host: Option<&str>) -> bool {
        if !self.env.is_development() {
            return false;
        }

        if self.hosts.is_empty() {
            return true;
        }

        match host {
            Some(host) => {
                let name = host_name(host).to_ascii_lowercase();
                self.hosts.iter().any(|h| *h == name)
            }
            None => false,
        }
    }
}

/// The synthetic identity granted by the bypass.
pub fn development_user() -> AuthenticatedUser {
    AuthenticatedUser {
        id: DEV_USER_ID,
        username: "admin".to_string(),
        email: "admin@example.com".to_string(),
        real_name: "管理员".to_string(),
        phone: String::new(),
        role: "admin".to_string(),
        status: "active".to_string(),
        is_admin: true,
    }
}

// Strip the port; bracketed IPv6 keeps only the address.
fn host_name(host: &str) -> &str {
    let host = host.trim();
    if let Some(rest) = host.strip_prefix('[') {
        return rest.split(']').next().unwrap_or(rest);
    }
    host.split(':').next().unwrap_or(host)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn never_bypasses_outside_development() {
        for env in [AppEnv::Production, AppEnv::Test, AppEnv::parse(None)] {
            let policy = BypassPolicy::new(env, Vec::new());
            assert!(!policy.should_bypass(Some("localhost")));
            assert!(!policy.should_bypass(None));
        }
        assert!(!BypassPolicy::disabled().should_bypass(Some("localhost")));
    }

    #[test]
    fn development_mode_alone_is_enough_without_host_list() {
        let policy = BypassPolicy::new(AppEnv::Development, Vec::new());
        assert!(policy.should_bypass(None));
        assert!(policy.should_bypass(Some("api.example.com")));
    }

    #[test]
    fn host_list_narrows_the_bypass() {
        let policy = BypassPolicy::new(
            AppEnv::Development,
            vec!["localhost".into(), " 127.0.0.1 ".into(), "::1".into()],
        );

        assert!(policy.should_bypass(Some("localhost:3000")));
        assert!(policy.should_bypass(Some("LOCALHOST")));
        assert!(policy.should_bypass(Some("127.0.0.1")));
        assert!(policy.should_bypass(Some("[::1]:8080")));

        assert!(!policy.should_bypass(Some("k001.example.com")));
        assert!(!policy.should_bypass(None));
    }

    #[test]
    fn development_user_is_fixed_admin() {
        let user = development_user();
        assert_eq!(user.id, 121);
        assert_eq!(user.username, "admin");
        assert_eq!(user.role, "admin");
        assert!(user.is_admin);
    }
}
