//! Credential verification for the admin login endpoint.
//!
//! The legacy system hardwired one username/password pair into its route
//! handler. The check is kept behind a trait so a real verifier (database
//! users, an identity provider) can replace the static pair without
//! touching the login handler.

use crate::config::ServerConfig;

/// Verifies an admin credential pair.
pub trait CredentialVerifier: Send + Sync {
    fn verify(&self, username: &str, password: &str) -> bool;
}

/// Default verifier: one static username/password pair from configuration.
///
/// This is a placeholder, not an authentication system: no hashing, no
/// token issuance, no lockout. Deployments that need more plug in a
/// different [`CredentialVerifier`].
pub struct StaticCredentials {
    username: String,
    password: String,
}

impl StaticCredentials {
    pub fn new(username: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            username: username.into(),
            password: password.into(),
        }
    }

    pub fn from_config(config: &ServerConfig) -> Self {
        Self::new(config.admin_username.clone(), config.admin_password.clone())
    }
}

impl CredentialVerifier for StaticCredentials {
    fn verify(&self, username: &str, password: &str) -> bool {
        username == self.username && password == self.password
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn accepts_the_configured_pair() {
        let verifier = StaticCredentials::new("admin", "admin123");
        assert!(verifier.verify("admin", "admin123"));
    }

    #[test]
    fn rejects_wrong_username_or_password() {
        let verifier = StaticCredentials::new("admin", "admin123");
        assert!(!verifier.verify("admin", "wrong"));
        assert!(!verifier.verify("root", "admin123"));
        assert!(!verifier.verify("", ""));
    }
}
