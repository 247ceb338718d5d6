//! Client-side checks run before any auth request is issued.

use crate::error::ValidationError;
use once_cell::sync::Lazy;
use regex::Regex;

pub const MIN_PASSWORD_LEN: usize = 6;

static EMAIL_PATTERN: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").expect("email pattern is valid")
});

/// Sign-up form fields.
#[derive(Debug, Clone, Default)]
pub struct Registration {
    pub login_id: String,
    pub username: String,
    pub email: String,
    pub phone: String,
    pub password: String,
    pub password_confirmation: String,
}

pub fn validate_credentials(login_id: &str, password: &str) -> Result<(), ValidationError> {
    if login_id.trim().is_empty() {
        return Err(ValidationError::missing("user_id"));
    }
    if password.is_empty() {
        return Err(ValidationError::missing("password"));
    }
    Ok(())
}

pub fn validate_registration(form: &Registration) -> Result<(), ValidationError> {
    let required = [
        ("user_id", form.login_id.trim()),
        ("username", form.username.trim()),
        ("email", form.email.trim()),
        ("phone", form.phone.trim()),
        ("password", form.password.as_str()),
        ("password_confirmation", form.password_confirmation.as_str()),
    ];
    if let Some((field, _)) = required.iter().find(|(_, value)| value.is_empty()) {
        return Err(ValidationError::missing(field));
    }
    validate_email(&form.email)?;
    validate_new_password(&form.password, &form.password_confirmation)
}

pub fn validate_email(email: &str) -> Result<(), ValidationError> {
    let email = email.trim();
    if email.is_empty() {
        return Err(ValidationError::missing("email"));
    }
    if !EMAIL_PATTERN.is_match(email) {
        return Err(ValidationError::InvalidEmail(email.to_string()));
    }
    Ok(())
}

pub fn validate_new_password(password: &str, confirmation: &str) -> Result<(), ValidationError> {
    if password.chars().count() < MIN_PASSWORD_LEN {
        return Err(ValidationError::PasswordTooShort {
            min: MIN_PASSWORD_LEN,
        });
    }
    if password != confirmation {
        return Err(ValidationError::PasswordMismatch);
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn form() -> Registration {
        Registration {
            login_id: "alice".to_string(),
            username: "Alice".to_string(),
            email: "alice@example.com".to_string(),
            phone: "010-1234-5678".to_string(),
            password: "secret1".to_string(),
            password_confirmation: "secret1".to_string(),
        }
    }

    #[test]
    fn test_valid_registration() {
        assert!(validate_registration(&form()).is_ok());
    }

    #[test]
    fn test_missing_field() {
        let mut f = form();
        f.phone = "   ".to_string();
        assert_eq!(
            validate_registration(&f),
            Err(ValidationError::missing("phone"))
        );
    }

    #[test]
    fn test_invalid_email() {
        let mut f = form();
        f.email = "alice@localhost".to_string();
        assert!(matches!(
            validate_registration(&f),
            Err(ValidationError::InvalidEmail(_))
        ));
    }

    #[test]
    fn test_validate_email() {
        assert!(validate_email(" a@b.co ").is_ok());
        assert_eq!(validate_email(""), Err(ValidationError::missing("email")));
        assert!(validate_email("a b@c.io").is_err());
    }

    #[test]
    fn test_password_rules() {
        assert_eq!(
            validate_new_password("abc", "abc"),
            Err(ValidationError::PasswordTooShort { min: 6 })
        );
        assert_eq!(
            validate_new_password("abcdef", "abcdeg"),
            Err(ValidationError::PasswordMismatch)
        );
        assert!(validate_new_password("abcdef", "abcdef").is_ok());
    }

    #[test]
    fn test_credentials() {
        assert!(validate_credentials(" ", "pw").is_err());
        assert!(validate_credentials("bob", "").is_err());
        assert!(validate_credentials("bob", "pw").is_ok());
    }
}
