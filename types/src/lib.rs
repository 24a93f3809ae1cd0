//! Core domain types for Herbwise.
//!
//! This crate contains pure domain types with no IO, no async, and minimal
//! dependencies. Everything here can be used from any layer of the
//! application.

mod answers;
mod claims;
mod report;
mod validate;

pub use answers::AnswerRecord;
pub use claims::{TokenClaims, UserClaims};
pub use report::Report;
pub use validate::{
    FieldError, MAX_BIO_LEN, MIN_NAME_LEN, MIN_PASSWORD_LEN, PASSWORD_SPECIAL_CHARS, validate_bio,
    validate_display_name, validate_email, validate_password, validate_phone,
};
