//! # Authenticator
//!
//! Credential checks for the Auth store.
//!
//! ## Login Round-Trip
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Login Sequence                                       │
//! │                                                                         │
//! │  AuthStore::login(email, password)                                     │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  Authenticator::authenticate ──► StubAuthenticator                     │
//! │       │                            sleep(delay)                        │
//! │       │                            demo credentials? ──► demo profile  │
//! │       │                                        else ──► None           │
//! │       ▼                                                                 │
//! │  Some(profile) ──► session.sign_in(profile), persist                   │
//! │  None          ──► session untouched, login returns false              │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! A network-backed authenticator can replace the stub without any change
//! to the store or the commands.

use std::time::Duration;

use async_trait::async_trait;
use despensa_core::UserProfile;
use tracing::debug;

/// The only e-mail the stub accepts.
pub const DEMO_EMAIL: &str = "cliente@example.com";

/// The only password the stub accepts.
pub const DEMO_PASSWORD: &str = "password123";

/// Default simulated round-trip.
pub const DEFAULT_LOGIN_DELAY: Duration = Duration::from_millis(1000);

/// The profile returned by a successful stub login.
pub fn demo_profile() -> UserProfile {
    UserProfile {
        id: "1".to_string(),
        name: "Cliente Demo".to_string(),
        email: DEMO_EMAIL.to_string(),
        company: "Restaurante Demo".to_string(),
        phone: "+34 600 000 000".to_string(),
    }
}

/// Checks credentials and returns the matching profile.
#[async_trait]
pub trait Authenticator: Send + Sync {
    /// `None` means the credentials were rejected.
    async fn authenticate(&self, email: &str, password: &str) -> Option<UserProfile>;
}

/// Fixed-response authenticator with a simulated network delay.
#[derive(Debug, Clone)]
pub struct StubAuthenticator {
    delay: Duration,
}

impl StubAuthenticator {
    pub fn new(delay: Duration) -> Self {
        StubAuthenticator { delay }
    }

    pub fn delay(&self) -> Duration {
        self.delay
    }
}

impl Default for StubAuthenticator {
    fn default() -> Self {
        StubAuthenticator::new(DEFAULT_LOGIN_DELAY)
    }
}

#[async_trait]
impl Authenticator for StubAuthenticator {
    async fn authenticate(&self, email: &str, password: &str) -> Option<UserProfile> {
        if !self.delay.is_zero() {
            tokio::time::sleep(self.delay).await;
        }

        if email == DEMO_EMAIL && password == DEMO_PASSWORD {
            Some(demo_profile())
        } else {
            debug!(email = %email, "Stub rejected credentials");
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tokio::time::Instant;

    #[tokio::test(start_paused = true)]
    async fn test_accepts_demo_credentials_after_delay() {
        let auth = StubAuthenticator::default();
        let start = Instant::now();

        let profile = auth.authenticate(DEMO_EMAIL, DEMO_PASSWORD).await;

        assert_eq!(profile, Some(demo_profile()));
        assert!(start.elapsed() >= DEFAULT_LOGIN_DELAY);
    }

    #[tokio::test]
    async fn test_padded_email_is_rejected() {
        let auth = StubAuthenticator::new(Duration::ZERO);

        assert!(auth
            .authenticate("  cliente@example.com ", DEMO_PASSWORD)
            .await
            .is_none());
        assert!(auth
            .authenticate("cliente@example.com\n", DEMO_PASSWORD)
            .await
            .is_none());
        assert!(auth.authenticate(DEMO_EMAIL, " password123").await.is_none());
    }

    #[tokio::test]
    async fn test_rejects_other_credentials() {
        let auth = StubAuthenticator::new(Duration::ZERO);

        assert!(auth.authenticate(DEMO_EMAIL, "password").await.is_none());
        assert!(auth.authenticate("otro@example.com", DEMO_PASSWORD).await.is_none());
        assert!(auth.authenticate("CLIENTE@example.com", DEMO_PASSWORD).await.is_none());
        assert!(auth.authenticate("", "").await.is_none());
    }
}
