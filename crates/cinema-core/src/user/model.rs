//! Session domain model.
//!
//! The session is persisted with the same keys the web client has always
//! written, so an existing stored record keeps loading.

use crate::wire::id_string;
use serde::{Deserialize, Serialize};

/// The locally persisted record identifying the logged-in user.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Session {
    /// Server-side numeric user id, as a string
    #[serde(rename = "id", deserialize_with = "id_string")]
    pub user_id: String,
    /// Login name typed into the login form
    #[serde(rename = "user_id")]
    pub login_id: String,
    #[serde(rename = "nickname", alias = "username")]
    pub display_name: String,
    #[serde(default)]
    pub email: String,
    #[serde(rename = "created_at", default)]
    pub created_at: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
}

impl Session {
    /// Applies a profile edit; the caller persists the result.
    pub fn apply_profile(&mut self, update: ProfileUpdate) {
        self.display_name = update.display_name;
        self.email = update.email;
        self.phone = update.phone;
    }
}

/// User record returned by the login endpoint.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuthUser {
    #[serde(deserialize_with = "id_string")]
    pub id: String,
    pub user_id: String,
    pub username: String,
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub created_at: Option<String>,
}

impl From<AuthUser> for Session {
    fn from(user: AuthUser) -> Self {
        Self {
            user_id: user.id,
            login_id: user.user_id,
            display_name: user.username,
            email: user.email,
            created_at: user.created_at,
            phone: None,
        }
    }
}

/// Body of a successful `POST /api/auth/login`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoginResponse {
    pub access_token: String,
    #[serde(default)]
    pub token_type: Option<String>,
    pub user: AuthUser,
}

/// Editable profile fields on the my-page view.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProfileUpdate {
    pub display_name: String,
    pub email: String,
    pub phone: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_session_uses_web_client_keys() {
        let session = Session {
            user_id: "7".to_string(),
            login_id: "moviefan".to_string(),
            display_name: "Fan".to_string(),
            email: "fan@example.com".to_string(),
            created_at: Some("2025. 01. 02.".to_string()),
            phone: None,
        };
        let value = serde_json::to_value(&session).unwrap();
        assert_eq!(value["id"], "7");
        assert_eq!(value["user_id"], "moviefan");
        assert_eq!(value["nickname"], "Fan");
        assert!(value.get("phone").is_none());
    }

    #[test]
    fn test_login_response_into_session() {
        let response: LoginResponse = serde_json::from_value(json!({
            "access_token": "tok",
            "token_type": "bearer",
            "user": {
                "id": 3,
                "user_id": "alice",
                "username": "Alice",
                "email": "alice@example.com",
                "created_at": null
            }
        }))
        .unwrap();
        let session = Session::from(response.user);
        assert_eq!(session.user_id, "3");
        assert_eq!(session.login_id, "alice");
        assert_eq!(session.display_name, "Alice");
    }

    #[test]
    fn test_apply_profile() {
        let mut session: Session = serde_json::from_value(json!({
            "id": "1", "user_id": "bob", "username": "Bob", "email": "b@x.io"
        }))
        .unwrap();
        session.apply_profile(ProfileUpdate {
            display_name: "Bobby".to_string(),
            email: "bobby@x.io".to_string(),
            phone: Some("010-0000-0000".to_string()),
        });
        assert_eq!(session.display_name, "Bobby");
        assert_eq!(session.phone.as_deref(), Some("010-0000-0000"));
    }
}
