use super::client::{HttpApiClient, RequestBody, message_field};
use async_trait::async_trait;
use cinema_core::api::{ApiResult, AuthApi};
use cinema_core::user::{LoginResponse, Registration};
use reqwest::Method;

#[async_trait]
impl AuthApi for HttpApiClient {
    async fn login(&self, login_id: &str, password: &str) -> ApiResult<LoginResponse> {
        self.fetch(
            &["api", "auth", "login"],
            Method::POST,
            &[],
            RequestBody::form([("user_id", login_id), ("password", password)]),
        )
        .await
    }

    async fn register(&self, form: &Registration) -> ApiResult<()> {
        self.request(
            &["api", "auth", "register"],
            Method::POST,
            RequestBody::form([
                ("user_id", form.login_id.trim()),
                ("email", form.email.trim()),
                ("username", form.username.trim()),
                ("phone", form.phone.trim()),
                ("password", form.password.as_str()),
            ]),
        )
        .await
        .map(drop)
    }

    async fn find_id(&self, email: &str, phone: &str) -> ApiResult<String> {
        let value = self
            .request(
                &["api", "auth", "find-id"],
                Method::POST,
                RequestBody::form([("email", email), ("phone", phone)]),
            )
            .await?;
        Ok(message_field(&value).unwrap_or_default())
    }

    async fn request_password_reset(&self, login_id: &str, email: &str) -> ApiResult<String> {
        let value = self
            .request(
                &["api", "auth", "request-password-reset"],
                Method::POST,
                RequestBody::form([("user_id", login_id), ("email", email)]),
            )
            .await?;
        Ok(message_field(&value).unwrap_or_default())
    }

    async fn reset_password(
        &self,
        login_id: &str,
        email: &str,
        new_password: &str,
    ) -> ApiResult<()> {
        self.request(
            &["api", "auth", "reset-password"],
            Method::POST,
            RequestBody::form([
                ("user_id", login_id),
                ("email", email),
                ("new_password", new_password),
            ]),
        )
        .await
        .map(drop)
    }
}
