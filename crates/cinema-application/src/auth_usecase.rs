//! Account use cases: login, sign-up, id recovery, password reset, profile.

use crate::data_manager::DataManager;
use cinema_core::api::AuthApi;
use cinema_core::user::{
    ProfileUpdate, Registration, Session, validate_credentials, validate_email,
    validate_new_password, validate_registration,
};
use cinema_core::{CinemaError, Result, ValidationError};
use std::sync::Arc;

pub struct AuthUseCase {
    auth: Arc<dyn AuthApi>,
    data: Arc<DataManager>,
}

impl AuthUseCase {
    pub fn new(auth: Arc<dyn AuthApi>, data: Arc<DataManager>) -> Self {
        Self { auth, data }
    }

    /// Authenticates, persists the session and token, and seeds the local
    /// search history from the server.
    pub async fn login(&self, login_id: &str, password: &str) -> Result<Session> {
        let login_id = login_id.trim();
        validate_credentials(login_id, password)?;

        let response = self.auth.login(login_id, password).await?;
        let session = Session::from(response.user);
        self.data.login(&session, Some(&response.access_token))?;
        self.data.sync_search_history().await;
        Ok(session)
    }

    pub fn logout(&self) -> Result<()> {
        self.data.logout()
    }

    pub fn current_user(&self) -> Option<Session> {
        self.data.current_user()
    }

    pub async fn register(&self, form: &Registration) -> Result<()> {
        validate_registration(form)?;
        self.auth.register(form).await?;
        tracing::info!("[AuthUseCase] Registered {}", form.login_id.trim());
        Ok(())
    }

    /// Looks up a login id by email and phone.
    ///
    /// Returns the id quoted in the server message, or the whole message if
    /// it quotes nothing.
    pub async fn find_id(&self, email: &str, phone: &str) -> Result<String> {
        let (email, phone) = (email.trim(), phone.trim());
        if email.is_empty() {
            return Err(ValidationError::missing("email").into());
        }
        if phone.is_empty() {
            return Err(ValidationError::missing("phone").into());
        }
        let message = self.auth.find_id(email, phone).await?;
        Ok(extract_quoted_id(&message).unwrap_or(message))
    }

    /// First reset step: proves the account exists.
    pub async fn verify_identity(&self, login_id: &str, email: &str) -> Result<String> {
        let (login_id, email) = (login_id.trim(), email.trim());
        if login_id.is_empty() {
            return Err(ValidationError::missing("user_id").into());
        }
        validate_email(email)?;
        Ok(self.auth.request_password_reset(login_id, email).await?)
    }

    /// Second reset step: stores the new password.
    pub async fn reset_password(
        &self,
        login_id: &str,
        email: &str,
        new_password: &str,
        confirmation: &str,
    ) -> Result<()> {
        validate_new_password(new_password, confirmation)?;
        self.auth
            .reset_password(login_id.trim(), email.trim(), new_password)
            .await?;
        Ok(())
    }

    /// Overwrites the stored session with edited profile fields.
    pub fn update_profile(&self, update: ProfileUpdate) -> Result<Session> {
        let mut session = self
            .data
            .current_user()
            .ok_or(CinemaError::NotAuthenticated)?;
        let update = ProfileUpdate {
            display_name: update.display_name.trim().to_string(),
            email: update.email.trim().to_string(),
            phone: update
                .phone
                .map(|p| p.trim().to_string())
                .filter(|p| !p.is_empty()),
        };
        if update.display_name.is_empty() {
            return Err(ValidationError::missing("username").into());
        }
        validate_email(&update.email)?;

        session.apply_profile(update);
        self.data.update_session(&session)?;
        Ok(session)
    }
}

/// Pulls `alice` out of a message like `"... 'alice' ..."`.
pub fn extract_quoted_id(message: &str) -> Option<String> {
    let start = message.find('\'')? + 1;
    let len = message[start..].find('\'')?;
    let id = &message[start..start + len];
    (!id.is_empty()).then(|| id.to_string())
}
