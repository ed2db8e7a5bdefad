//! Sign-in state: who is logged in, and the transitions between
//! unauthenticated and authenticated.
//!
//! ```text
//! Unauthenticated --bootstrap ok / login ok--> Authenticated
//! Authenticated   --logout / refresh failure--> Unauthenticated
//! ```
//!
//! The session is an explicit object handed to whatever needs it; the
//! refresh interceptor in [`ApiClient`] can drop it to unauthenticated on
//! its own, which is why status is read from the client.

use tracing::{info, warn};

use crate::error::TaskdeskError;
use crate::http::{ApiClient, AuthStatus};
use crate::model::{Credentials, RegisterForm, User};
use crate::token_store::StoredTokens;

/// Result of a login or registration attempt. Never an error: failures
/// carry a message ready to show.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AuthOutcome {
    Success,
    Failure(String),
}

impl AuthOutcome {
    pub fn is_success(&self) -> bool {
        matches!(self, AuthOutcome::Success)
    }

    pub fn error(&self) -> Option<&str> {
        match self {
            AuthOutcome::Success => None,
            AuthOutcome::Failure(msg) => Some(msg),
        }
    }
}

pub struct Session {
    client: ApiClient,
    user: Option<User>,
    bootstrapped: bool,
}

impl Session {
    pub fn new(client: ApiClient) -> Self {
        Session {
            client,
            user: None,
            bootstrapped: false,
        }
    }

    pub fn client(&self) -> &ApiClient {
        &self.client
    }

    pub fn is_authenticated(&self) -> bool {
        self.client.auth_status() == AuthStatus::Authenticated
    }

    pub fn user(&self) -> Option<&User> {
        self.user.as_ref().filter(|_| self.is_authenticated())
    }

    /// Restore a session from stored tokens.
    ///
    /// Only the first call talks to the server; later calls report the
    /// current status. Any failure clears both tokens.
    pub async fn bootstrap(&mut self) -> AuthStatus {
        if self.bootstrapped {
            return self.client.auth_status();
        }
        self.bootstrapped = true;

        let has_token = match self.client.tokens().load() {
            Ok(tokens) => tokens.access_token.is_some(),
            Err(err) => {
                warn!(error = %err, "could not read stored tokens");
                false
            }
        };

        if !has_token {
            return AuthStatus::Unauthenticated;
        }

        match self.client.account().profile().await {
            Ok(user) => {
                info!(user_id = user.id, "restored session");
                self.user = Some(user);
                self.client.set_status(AuthStatus::Authenticated);
            }
            Err(err) => {
                warn!(error = %err, "stored session is not usable");
                self.reset();
            }
        }

        self.client.auth_status()
    }

    /// Log in and persist both tokens.
    ///
    /// The user from the login response is used right away; a follow-up
    /// profile fetch replaces it if it succeeds.
    pub async fn login(&mut self, credentials: &Credentials) -> AuthOutcome {
        let response = match self.client.account().login(credentials).await {
            Ok(response) => response,
            Err(err) => return AuthOutcome::Failure(err.user_message("Login failed")),
        };

        let tokens = StoredTokens::new(response.access, response.refresh);
        if let Err(err) = self.client.store_tokens(&tokens) {
            return AuthOutcome::Failure(err.user_message("Login failed"));
        }

        self.user = response.user;
        self.bootstrapped = true;
        self.client.set_status(AuthStatus::Authenticated);

        match self.client.account().profile().await {
            Ok(profile) => self.user = Some(profile),
            Err(err) => warn!(error = %err, "failed to fetch profile after login"),
        }

        AuthOutcome::Success
    }

    /// Create an account. Does not sign in.
    pub async fn register(&mut self, form: &RegisterForm) -> AuthOutcome {
        let request = match form.validate() {
            Ok(request) => request,
            Err(err) => return AuthOutcome::Failure(err.to_string()),
        };

        match self.client.account().register(&request).await {
            Ok(user) => {
                info!(user_id = user.id, "registered account");
                AuthOutcome::Success
            }
            Err(err) => AuthOutcome::Failure(registration_message(&err)),
        }
    }

    /// Forget the session locally. No network call.
    pub fn logout(&mut self) {
        self.reset();
    }

    /// Re-read the profile, e.g. after editing it.
    pub async fn refresh_profile(&mut self) -> Result<&User, TaskdeskError> {
        let user = self.client.account().profile().await?;
        Ok(self.user.insert(user))
    }

    fn reset(&mut self) {
        self.user = None;
        if let Err(err) = self.client.sign_out() {
            warn!(error = %err, "failed to clear stored tokens");
        }
    }
}

fn registration_message(err: &TaskdeskError) -> String {
    err.field_errors_message()
        .unwrap_or_else(|| err.user_message("Registration failed"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn registration_message_prefers_field_errors() {
        let err = TaskdeskError::Validation {
            status: 400,
            body: json!({
                "email": ["user with this email already exists."],
                "password": ["This password is too common.", "Too short."],
            }),
        };
        assert_eq!(
            registration_message(&err),
            "email: user with this email already exists.; \
             password: This password is too common., Too short."
        );
    }

    #[test]
    fn registration_message_for_plain_bodies() {
        let err = TaskdeskError::Server {
            status: 500,
            body: json!("Internal Server Error"),
        };
        assert_eq!(registration_message(&err), "Internal Server Error");

        assert_eq!(
            registration_message(&TaskdeskError::SignedOut),
            "Registration failed"
        );
    }

    #[test]
    fn outcome_accessors() {
        assert!(AuthOutcome::Success.is_success());
        assert_eq!(AuthOutcome::Success.error(), None);

        let failed = AuthOutcome::Failure("nope".into());
        assert!(!failed.is_success());
        assert_eq!(failed.error(), Some("nope"));
    }
}
