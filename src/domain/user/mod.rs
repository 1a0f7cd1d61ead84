//! User module - identity, credentials and profile.

mod aggregate;
mod email;

pub use aggregate::{
    validate_password, ProfileUpdate, User, MAX_BIO_LENGTH, MAX_NAME_LENGTH,
    MIN_PASSWORD_LENGTH,
};
pub use email::Email;
