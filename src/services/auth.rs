//! Login collaborator - credential verification and the active roster
//!
//! Credential checks sit behind the `Authenticator` trait so the user
//! table is injected rather than hardcoded. The roster caps how many
//! users are logged in at once.

use crate::domain::types::Role;
use crate::infra::config::{Config, UserConfig};
use std::collections::HashMap;
use tracing::{info, warn};

/// Capability to verify a user's credentials
pub trait Authenticator {
    fn verify(&self, name: &str, secret: &str) -> bool;

    fn role(&self, name: &str) -> Option<Role>;
}

/// Authenticator backed by the configured user table
pub struct ConfigAuthenticator {
    users: HashMap<String, UserConfig>,
}

impl ConfigAuthenticator {
    pub fn new(config: &Config) -> Self {
        Self { users: config.users().clone() }
    }
}

impl Authenticator for ConfigAuthenticator {
    fn verify(&self, name: &str, secret: &str) -> bool {
        self.users.get(name).is_some_and(|user| user.secret == secret)
    }

    fn role(&self, name: &str) -> Option<Role> {
        self.users.get(name).map(|user| user.role)
    }
}

/// Verify the operator of a privileged operation against the configured
/// user table. An empty table leaves operations open; otherwise the
/// named user's secret must check out.
pub fn verify_operator(
    config: &Config,
    user: Option<&str>,
    secret: Option<&str>,
) -> Result<Option<Role>, LoginError> {
    if config.users().is_empty() {
        return Ok(None);
    }

    let (Some(name), Some(secret)) = (user, secret) else {
        return Err(LoginError::BadCredentials);
    };

    let auth = ConfigAuthenticator::new(config);
    if !auth.verify(name, secret) {
        warn!(user = %name, "operator_rejected");
        return Err(LoginError::BadCredentials);
    }
    Ok(auth.role(name))
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoginError {
    BadCredentials,
    RosterFull,
    AlreadyLoggedIn,
}

impl std::fmt::Display for LoginError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let msg = match self {
            LoginError::BadCredentials => "incorrect name or password",
            LoginError::RosterFull => "maximum number of users already logged in",
            LoginError::AlreadyLoggedIn => "user is already logged in",
        };
        f.write_str(msg)
    }
}

impl std::error::Error for LoginError {}

/// Names of currently logged-in users, capped at a configured maximum
#[derive(Debug, Clone)]
pub struct LoginRoster {
    active: Vec<String>,
    max_logins: usize,
}

impl LoginRoster {
    pub fn new(max_logins: usize) -> Self {
        Self { active: Vec::new(), max_logins }
    }

    pub fn login(
        &mut self,
        auth: &dyn Authenticator,
        name: &str,
        secret: &str,
    ) -> Result<(), LoginError> {
        if !auth.verify(name, secret) {
            warn!(user = %name, "login_rejected");
            return Err(LoginError::BadCredentials);
        }
        if self.is_logged_in(name) {
            return Err(LoginError::AlreadyLoggedIn);
        }
        if self.active.len() >= self.max_logins {
            warn!(user = %name, active = self.active.len(), "login_roster_full");
            return Err(LoginError::RosterFull);
        }

        self.active.push(name.to_string());
        info!(user = %name, active = self.active.len(), "user_logged_in");
        Ok(())
    }

    /// Remove a user from the roster. Returns false if they were not
    /// logged in.
    pub fn logout(&mut self, name: &str) -> bool {
        let before = self.active.len();
        self.active.retain(|user| user != name);
        let removed = self.active.len() < before;
        if removed {
            info!(user = %name, "user_logged_out");
        }
        removed
    }

    pub fn is_logged_in(&self, name: &str) -> bool {
        self.active.iter().any(|user| user == name)
    }

    pub fn active(&self) -> &[String] {
        &self.active
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct FixedAuth;

    impl Authenticator for FixedAuth {
        fn verify(&self, name: &str, secret: &str) -> bool {
            name == "Naveen Kumar" && secret == "482915"
        }

        fn role(&self, name: &str) -> Option<Role> {
            (name == "Naveen Kumar").then_some(Role::Guard)
        }
    }

    #[test]
    fn test_login_with_valid_credentials() {
        let mut roster = LoginRoster::new(5);
        assert!(roster.login(&FixedAuth, "Naveen Kumar", "482915").is_ok());
        assert!(roster.is_logged_in("Naveen Kumar"));
    }

    #[test]
    fn test_login_with_bad_secret() {
        let mut roster = LoginRoster::new(5);
        let err = roster.login(&FixedAuth, "Naveen Kumar", "000000").unwrap_err();
        assert_eq!(err, LoginError::BadCredentials);
        assert!(roster.active().is_empty());
    }

    #[test]
    fn test_duplicate_login_rejected() {
        let mut roster = LoginRoster::new(5);
        roster.login(&FixedAuth, "Naveen Kumar", "482915").unwrap();
        let err = roster.login(&FixedAuth, "Naveen Kumar", "482915").unwrap_err();
        assert_eq!(err, LoginError::AlreadyLoggedIn);
    }

    #[test]
    fn test_roster_capacity() {
        struct AcceptAll;
        impl Authenticator for AcceptAll {
            fn verify(&self, _: &str, _: &str) -> bool {
                true
            }
            fn role(&self, _: &str) -> Option<Role> {
                Some(Role::Guard)
            }
        }

        let mut roster = LoginRoster::new(2);
        roster.login(&AcceptAll, "a", "x").unwrap();
        roster.login(&AcceptAll, "b", "x").unwrap();
        let err = roster.login(&AcceptAll, "c", "x").unwrap_err();
        assert_eq!(err, LoginError::RosterFull);
    }

    #[test]
    fn test_logout_frees_a_slot() {
        let mut roster = LoginRoster::new(1);
        roster.login(&FixedAuth, "Naveen Kumar", "482915").unwrap();
        assert!(roster.logout("Naveen Kumar"));
        assert!(!roster.logout("Naveen Kumar"));
        assert!(roster.login(&FixedAuth, "Naveen Kumar", "482915").is_ok());
    }

    fn config_with_naveen() -> Config {
        use crate::infra::config::UserConfig;

        let mut users = HashMap::new();
        users.insert(
            "Naveen Kumar".to_string(),
            UserConfig { secret: "482915".to_string(), role: Role::Guard },
        );
        Config::default().with_users(users)
    }

    #[test]
    fn test_verify_operator_open_without_user_table() {
        let config = Config::default();
        assert_eq!(verify_operator(&config, None, None), Ok(None));
        assert_eq!(verify_operator(&config, Some("anyone"), Some("x")), Ok(None));
    }

    #[test]
    fn test_verify_operator_accepts_configured_user() {
        let config = config_with_naveen();
        let role = verify_operator(&config, Some("Naveen Kumar"), Some("482915")).unwrap();
        assert_eq!(role, Some(Role::Guard));
    }

    #[test]
    fn test_verify_operator_rejects_bad_secret() {
        let config = config_with_naveen();
        let err = verify_operator(&config, Some("Naveen Kumar"), Some("000000")).unwrap_err();
        assert_eq!(err, LoginError::BadCredentials);
    }

    #[test]
    fn test_verify_operator_requires_credentials_when_table_set() {
        let config = config_with_naveen();
        assert_eq!(verify_operator(&config, None, None), Err(LoginError::BadCredentials));
        assert_eq!(
            verify_operator(&config, Some("Naveen Kumar"), None),
            Err(LoginError::BadCredentials)
        );
    }

    #[test]
    fn test_config_authenticator() {
        use crate::infra::config::UserConfig;

        let mut users = HashMap::new();
        users.insert(
            "Satyam Kumar".to_string(),
            UserConfig { secret: "927364".to_string(), role: Role::Supervisor },
        );
        let auth = ConfigAuthenticator { users };

        assert!(auth.verify("Satyam Kumar", "927364"));
        assert!(!auth.verify("Satyam Kumar", "111111"));
        assert!(!auth.verify("Unknown", "927364"));
        assert_eq!(auth.role("Satyam Kumar"), Some(Role::Supervisor));
        assert_eq!(auth.role("Unknown"), None);
    }
}
