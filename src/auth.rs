use anyhow::{Context, Result};
use argon2::{
    Argon2,
    password_hash::{PasswordHash, PasswordHasher, PasswordVerifier, SaltString, rand_core::OsRng},
};
use std::collections::HashMap;
use tokio::task;

use crate::config::AuthConfig;

/// In-process credential set, built once at startup from configuration.
///
/// Plaintext passwords are hashed with Argon2id and never retained; there is
/// no users table and no way to mutate the set at runtime.
pub struct CredentialSet {
    users: HashMap<String, String>,
}

impl CredentialSet {
    pub fn from_config(auth: &AuthConfig) -> Result<Self> {
        let mut users = HashMap::with_capacity(auth.users.len());

        for credential in &auth.users {
            let hash = hash_password(&credential.password)?;
            users.insert(credential.username.clone(), hash);
        }

        Ok(Self { users })
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.users.is_empty()
    }

    /// Verify a username/password pair. Unknown usernames report `false`
    /// rather than an error so callers cannot distinguish them from a wrong
    /// password.
    ///
    /// Note: This uses `spawn_blocking` because Argon2 verification is
    /// CPU-intensive and would block the async runtime if run directly.
    pub async fn verify(&self, username: &str, password: &str) -> Result<bool> {
        let Some(password_hash) = self.users.get(username) else {
            return Ok(false);
        };

        let password_hash = password_hash.clone();
        let password = password.to_string();

        let is_valid = task::spawn_blocking(move || {
            let parsed_hash = PasswordHash::new(&password_hash)
                .map_err(|e| anyhow::anyhow!("Invalid password hash format: {e}"))?;

            let argon2 = Argon2::default();
            Ok::<bool, anyhow::Error>(
                argon2
                    .verify_password(password.as_bytes(), &parsed_hash)
                    .is_ok(),
            )
        })
        .await
        .context("Password verification task panicked")??;

        Ok(is_valid)
    }
}

/// Hash a password using Argon2id with default params.
pub fn hash_password(password: &str) -> Result<String> {
    let salt = SaltString::generate(&mut OsRng);
    let argon2 = Argon2::default();

    let hash = argon2
        .hash_password(password.as_bytes(), &salt)
        .map_err(|e| anyhow::anyhow!("Failed to hash password: {e}"))?;

    Ok(hash.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::CredentialConfig;

    fn sample_config() -> AuthConfig {
        AuthConfig {
            users: vec![CredentialConfig {
                username: "dan".to_string(),
                password: "correct horse".to_string(),
            }],
        }
    }

    #[tokio::test]
    async fn test_verify_accepts_configured_credentials() {
        let set = CredentialSet::from_config(&sample_config()).unwrap();
        assert!(set.verify("dan", "correct horse").await.unwrap());
    }

    #[tokio::test]
    async fn test_verify_rejects_wrong_password() {
        let set = CredentialSet::from_config(&sample_config()).unwrap();
        assert!(!set.verify("dan", "battery staple").await.unwrap());
    }

    #[tokio::test]
    async fn test_verify_rejects_unknown_username() {
        let set = CredentialSet::from_config(&sample_config()).unwrap();
        assert!(!set.verify("mallory", "correct horse").await.unwrap());
    }

    #[test]
    fn test_empty_config_yields_empty_set() {
        let set = CredentialSet::from_config(&AuthConfig::default()).unwrap();
        assert!(set.is_empty());
    }
}
