//! # Auth Store
//!
//! The logged-in session, persisted under `despensa-auth`.
//!
//! ## Concurrency
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  login(a) ──► login_gate.lock() ──► authenticate (sleeps) ──► sign_in  │
//! │  login(b) ──► login_gate.lock() ... waits until login(a) returns ...   │
//! │                                                                         │
//! │  While a login is suspended the session is untouched: readers see the  │
//! │  previous state until the authenticator answers.                       │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use std::sync::Arc;

use despensa_core::{AuthSession, ProfileUpdate, UserProfile};
use despensa_storage::SnapshotStore;
use tokio::sync::Mutex;
use tracing::{debug, info};

use super::persisted::{load_or_default, Persisted};
use super::AUTH_KEY;
use crate::auth::Authenticator;

/// Session container shared by all commands.
pub struct AuthStore {
    session: Persisted<AuthSession>,
    authenticator: Arc<dyn Authenticator>,
    login_gate: Mutex<()>,
}

impl AuthStore {
    /// Restores the session from storage, or starts logged out.
    pub async fn restore(
        storage: Arc<dyn SnapshotStore>,
        authenticator: Arc<dyn Authenticator>,
    ) -> Self {
        let session: AuthSession = load_or_default(storage.as_ref(), AUTH_KEY).await;
        debug!(is_authenticated = session.is_authenticated(), "Session restored");

        AuthStore {
            session: Persisted::new(storage, AUTH_KEY, session),
            authenticator,
            login_gate: Mutex::new(()),
        }
    }

    /// Checks credentials and signs in on success.
    ///
    /// ## Returns
    /// - `true`: the profile returned by the authenticator is now the session
    /// - `false`: credentials rejected, the session is left as it was
    pub async fn login(&self, email: &str, password: &str) -> bool {
        let _gate = self.login_gate.lock().await;
        debug!(email, "Login attempt");

        match self.authenticator.authenticate(email, password).await {
            Some(profile) => {
                info!(user_id = %profile.id, "Login succeeded");
                self.session.mutate(|s| s.sign_in(profile)).await;
                true
            }
            None => {
                info!("Login rejected");
                false
            }
        }
    }

    /// Clears the session unconditionally.
    pub async fn logout(&self) {
        self.session.mutate(AuthSession::sign_out).await;
        info!("Logged out");
    }

    /// Merges `update` into the current profile.
    ///
    /// ## Returns
    /// `false` (and no change) when nobody is logged in.
    pub async fn update_profile(&self, update: ProfileUpdate) -> bool {
        let updated = self.session.mutate(|s| s.update_profile(update)).await;
        debug!(updated, "update_profile");
        updated
    }

    pub async fn current_user(&self) -> Option<UserProfile> {
        self.session.read(|s| s.user().cloned()).await
    }

    pub async fn is_authenticated(&self) -> bool {
        self.session.read(AuthSession::is_authenticated).await
    }

    /// A copy of the whole session.
    pub async fn session(&self) -> AuthSession {
        self.session.read(AuthSession::clone).await
    }

    pub(crate) async fn reset(&self) {
        self.session.reset().await;
    }
}
