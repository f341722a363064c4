//! Staff sign-in against accounts listed in the configuration file.
//!
//! Passwords are never stored in clear: each account carries an Argon2 PHC
//! string, produced with `sales-tracker hash-password`.

use argon2::{
    password_hash::{PasswordHash, PasswordHasher, PasswordVerifier, SaltString},
    Argon2,
};
use async_trait::async_trait;
use rand_core::OsRng;
use tracing::{info, warn};

use super::traits::{AuthError, AuthProvider, StaffIdentity};
use crate::backend::config::StaffAccount;

pub struct StaffAccountProvider {
    accounts: Vec<StaffAccount>,
}

impl StaffAccountProvider {
    pub fn new(accounts: Vec<StaffAccount>) -> Self {
        Self { accounts }
    }

    pub fn account_count(&self) -> usize {
        self.accounts.len()
    }
}

#[async_trait]
impl AuthProvider for StaffAccountProvider {
    async fn sign_in(&self, email: &str, password: &str) -> Result<StaffIdentity, AuthError> {
        let email = email.trim();
        let Some(account) = self
            .accounts
            .iter()
            .find(|account| account.email.eq_ignore_ascii_case(email))
        else {
            warn!("Sign-in attempt for unknown account {}", email);
            return Err(AuthError::InvalidCredentials);
        };

        if !verify_password(password, &account.password_hash)? {
            warn!("Wrong password for {}", account.email);
            return Err(AuthError::InvalidCredentials);
        }

        info!("Staff member {} signed in", account.email);
        Ok(StaffIdentity {
            email: account.email.clone(),
            display_name: account.display_name.clone(),
        })
    }
}

/// Hash a password into an Argon2id PHC string with a random salt
pub fn hash_password(password: &str) -> anyhow::Result<String> {
    let salt = SaltString::generate(&mut OsRng);
    Argon2::default()
        .hash_password(password.as_bytes(), &salt)
        .map(|hash| hash.to_string())
        .map_err(|e| anyhow::anyhow!("password hashing failed: {}", e))
}

/// Check a password against a stored PHC string
///
/// A malformed stored hash is a configuration problem, not a wrong password.
pub fn verify_password(password: &str, stored_hash: &str) -> Result<bool, AuthError> {
    let parsed = PasswordHash::new(stored_hash)
        .map_err(|e| AuthError::Unavailable(format!("malformed password hash: {}", e)))?;
    Ok(Argon2::default()
        .verify_password(password.as_bytes(), &parsed)
        .is_ok())
}
