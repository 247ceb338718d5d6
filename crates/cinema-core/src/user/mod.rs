//! User domain module.
//!
//! # Module Structure
//!
//! - `model`: Session and authentication payloads
//! - `validation`: Sign-up and password-reset input checks

mod model;
mod validation;

pub use model::{AuthUser, LoginResponse, ProfileUpdate, Session};
pub use validation::{
    validate_credentials, validate_email, validate_new_password, validate_registration, Registration,
    MIN_PASSWORD_LEN,
};
