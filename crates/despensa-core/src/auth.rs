//! # Auth Session
//!
//! The logged-in state of the storefront.
//!
//! ## State Machine
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                                                                         │
//! │   ┌───────────┐   sign_in(profile)   ┌───────────┐                     │
//! │   │ LoggedOut │ ───────────────────► │ LoggedIn  │ ◄─┐ update_profile  │
//! │   │           │ ◄─────────────────── │           │ ──┘                 │
//! │   └───────────┘      sign_out()      └───────────┘                     │
//! │                                                                         │
//! │   A rejected login never reaches this type: the session stays as is.  │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Checking credentials is not done here; see the app's `Authenticator`.

use serde::{Deserialize, Serialize};

use crate::types::{ProfileUpdate, UserProfile};

/// The current session.
///
/// ## Invariant
/// `is_authenticated()` is true iff a profile is present. The flag is
/// written to snapshots for the front end, but on restore it is derived
/// from the profile again.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", from = "StoredSession")]
pub struct AuthSession {
    user: Option<UserProfile>,
    is_authenticated: bool,
}

/// Wire shape of a stored session, before the invariant is re-applied.
#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct StoredSession {
    #[serde(default)]
    user: Option<UserProfile>,
}

impl From<StoredSession> for AuthSession {
    fn from(stored: StoredSession) -> Self {
        let is_authenticated = stored.user.is_some();
        AuthSession {
            user: stored.user,
            is_authenticated,
        }
    }
}

impl AuthSession {
    /// A logged-out session.
    pub fn new() -> Self {
        AuthSession::default()
    }

    /// Enters the logged-in state with `profile`, replacing any previous one.
    pub fn sign_in(&mut self, profile: UserProfile) {
        self.user = Some(profile);
        self.is_authenticated = true;
    }

    /// Returns to the logged-out state.
    pub fn sign_out(&mut self) {
        self.user = None;
        self.is_authenticated = false;
    }

    /// Merges `update` into the current profile.
    ///
    /// ## Returns
    /// `false` (and no change) when nobody is logged in.
    pub fn update_profile(&mut self, update: ProfileUpdate) -> bool {
        match self.user.as_mut() {
            Some(user) => {
                user.apply(update);
                true
            }
            None => false,
        }
    }

    pub fn user(&self) -> Option<&UserProfile> {
        self.user.as_ref()
    }

    pub fn is_authenticated(&self) -> bool {
        self.is_authenticated
    }
}
