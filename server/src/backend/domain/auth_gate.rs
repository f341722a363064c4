//! Remembers which staff member, if any, is signed in.
//!
//! The gate only decides what the page shows. Sales routes stay open
//! whatever its state.

use std::sync::Arc;

use tokio::sync::RwLock;
use tracing::info;

use crate::backend::storage::{AuthError, AuthProvider, StaffIdentity};

#[derive(Clone)]
pub struct AuthGate {
    provider: Arc<dyn AuthProvider>,
    session: Arc<RwLock<Option<StaffIdentity>>>,
}

impl AuthGate {
    pub fn new(provider: Arc<dyn AuthProvider>) -> Self {
        Self {
            provider,
            session: Arc::new(RwLock::new(None)),
        }
    }

    /// Sign in, replacing any current session. A failed attempt keeps the
    /// current session as it was.
    pub async fn sign_in(&self, email: &str, password: &str) -> Result<StaffIdentity, AuthError> {
        let identity = self.provider.sign_in(email, password).await?;
        *self.session.write().await = Some(identity.clone());
        Ok(identity)
    }

    pub async fn sign_out(&self) {
        if let Some(identity) = self.session.write().await.take() {
            info!("Staff member {} signed out", identity.email);
        }
    }

    pub async fn current(&self) -> Option<StaffIdentity> {
        self.session.read().await.clone()
    }

    pub async fn is_signed_in(&self) -> bool {
        self.session.read().await.is_some()
    }
}
