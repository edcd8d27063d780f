//! # Account Commands
//!
//! Login, logout and the customer profile.

use despensa_core::{AuthSession, ProfileUpdate, UserProfile};
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::ApiError;
use crate::state::AppState;

/// The current session.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SessionResponse {
    pub is_authenticated: bool,
    pub user: Option<UserProfile>,
}

impl From<&AuthSession> for SessionResponse {
    fn from(session: &AuthSession) -> Self {
        SessionResponse {
            is_authenticated: session.is_authenticated(),
            user: session.user().cloned(),
        }
    }
}

async fn respond(state: &AppState) -> SessionResponse {
    SessionResponse::from(&state.auth().session().await)
}

/// Logs in.
///
/// ## Errors
/// `UNAUTHENTICATED` when the credentials are rejected. The previous session
/// (if any) is kept.
pub async fn login(state: &AppState, email: &str, password: &str) -> Result<SessionResponse, ApiError> {
    debug!(email, "login command");

    if !state.auth().login(email, password).await {
        return Err(ApiError::unauthenticated("Invalid email or password"));
    }

    Ok(respond(state).await)
}

/// Logs out. Always succeeds.
pub async fn logout(state: &AppState) -> SessionResponse {
    debug!("logout command");
    state.auth().logout().await;
    respond(state).await
}

/// Gets the current session.
pub async fn get_session(state: &AppState) -> SessionResponse {
    debug!("get_session command");
    respond(state).await
}

/// Merges `update` into the logged-in profile.
///
/// ## Errors
/// - `VALIDATION_ERROR` when `update` carries no field
/// - `UNAUTHENTICATED` when nobody is logged in
pub async fn update_profile(state: &AppState, update: ProfileUpdate) -> Result<SessionResponse, ApiError> {
    debug!(?update, "update_profile command");

    if update.is_empty() {
        return Err(ApiError::validation("Nothing to update"));
    }

    if !state.auth().update_profile(update).await {
        return Err(ApiError::unauthenticated("Log in to edit the profile"));
    }

    Ok(respond(state).await)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;
    use std::time::Duration;

    use crate::auth::{demo_profile, StubAuthenticator, DEMO_EMAIL, DEMO_PASSWORD};
    use crate::error::ErrorCode;
    use despensa_storage::MemoryStore;

    async fn state() -> AppState {
        AppState::init(
            Arc::new(MemoryStore::new()),
            Arc::new(StubAuthenticator::new(Duration::ZERO)),
        )
        .await
        .unwrap()
    }

    #[tokio::test]
    async fn test_login_logout() {
        let state = state().await;

        let session = login(&state, DEMO_EMAIL, DEMO_PASSWORD).await.unwrap();
        assert!(session.is_authenticated);
        assert_eq!(session.user, Some(demo_profile()));

        let session = logout(&state).await;
        assert!(!session.is_authenticated);
        assert!(session.user.is_none());
    }

    #[tokio::test]
    async fn test_bad_credentials() {
        let state = state().await;

        let err = login(&state, DEMO_EMAIL, "1234").await.unwrap_err();
        assert_eq!(err.code, ErrorCode::Unauthenticated);
        assert!(!get_session(&state).await.is_authenticated);
    }

    #[tokio::test]
    async fn test_update_profile() {
        let state = state().await;
        let update = ProfileUpdate {
            company: Some("Bar Central".to_string()),
            ..Default::default()
        };

        let err = update_profile(&state, update.clone()).await.unwrap_err();
        assert_eq!(err.code, ErrorCode::Unauthenticated);

        login(&state, DEMO_EMAIL, DEMO_PASSWORD).await.unwrap();
        let session = update_profile(&state, update).await.unwrap();
        let user = session.user.unwrap();
        assert_eq!(user.company, "Bar Central");
        assert_eq!(user.name, "Cliente Demo");

        let err = update_profile(&state, ProfileUpdate::default()).await.unwrap_err();
        assert_eq!(err.code, ErrorCode::ValidationError);
    }
}
