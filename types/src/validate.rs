//! Field validation for profile and credential input.
//!
//! These are the client-side rules the account forms enforce before anything
//! is sent to the auth backend. They are deliberately shallow; the backend
//! remains the authority on what it accepts.

use thiserror::Error;

/// Minimum password length.
pub const MIN_PASSWORD_LEN: usize = 8;
/// Characters that satisfy the password special-character rule.
pub const PASSWORD_SPECIAL_CHARS: &str = "@$!%*?&";
/// Minimum display-name length after trimming.
pub const MIN_NAME_LEN: usize = 2;
/// Maximum bio length.
pub const MAX_BIO_LEN: usize = 300;

#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum FieldError {
    #[error("invalid email address")]
    InvalidEmail,
    #[error("password must be at least {MIN_PASSWORD_LEN} characters")]
    PasswordTooShort,
    #[error("password must contain a lowercase letter")]
    PasswordNeedsLowercase,
    #[error("password must contain an uppercase letter")]
    PasswordNeedsUppercase,
    #[error("password must contain a number")]
    PasswordNeedsDigit,
    #[error("password must contain a special character ({PASSWORD_SPECIAL_CHARS})")]
    PasswordNeedsSpecial,
    #[error("name must be at least {MIN_NAME_LEN} characters")]
    NameTooShort,
    #[error("bio must be at most {MAX_BIO_LEN} characters")]
    BioTooLong,
    #[error("invalid phone number")]
    InvalidPhone,
}

/// Structural email check: one `@`, non-empty local part, dotted domain.
pub fn validate_email(email: &str) -> Result<(), FieldError> {
    let email = email.trim();
    if email.chars().any(char::is_whitespace) {
        return Err(FieldError::InvalidEmail);
    }
    let Some((local, domain)) = email.split_once('@') else {
        return Err(FieldError::InvalidEmail);
    };
    if local.is_empty() || domain.contains('@') {
        return Err(FieldError::InvalidEmail);
    }
    let dotted = domain.split('.').collect::<Vec<_>>();
    if dotted.len() < 2 || dotted.iter().any(|part| part.is_empty()) {
        return Err(FieldError::InvalidEmail);
    }
    Ok(())
}

/// The registration form's password rules: length, one lowercase, one
/// uppercase, one digit, one special character. The first unmet rule is
/// reported.
pub fn validate_password(password: &str) -> Result<(), FieldError> {
    if password.chars().count() < MIN_PASSWORD_LEN {
        return Err(FieldError::PasswordTooShort);
    }
    if !password.chars().any(|c| c.is_ascii_lowercase()) {
        return Err(FieldError::PasswordNeedsLowercase);
    }
    if !password.chars().any(|c| c.is_ascii_uppercase()) {
        return Err(FieldError::PasswordNeedsUppercase);
    }
    if !password.chars().any(|c| c.is_ascii_digit()) {
        return Err(FieldError::PasswordNeedsDigit);
    }
    if !password.chars().any(|c| PASSWORD_SPECIAL_CHARS.contains(c)) {
        return Err(FieldError::PasswordNeedsSpecial);
    }
    Ok(())
}

pub fn validate_display_name(name: &str) -> Result<(), FieldError> {
    if name.trim().chars().count() < MIN_NAME_LEN {
        return Err(FieldError::NameTooShort);
    }
    Ok(())
}

pub fn validate_bio(bio: &str) -> Result<(), FieldError> {
    if bio.chars().count() > MAX_BIO_LEN {
        return Err(FieldError::BioTooLong);
    }
    Ok(())
}

/// International-format phone check, as the account settings form requires.
pub fn validate_phone(phone: &str) -> Result<(), FieldError> {
    let parsed =
        phonenumber::parse(None, phone.trim()).map_err(|_| FieldError::InvalidPhone)?;
    if !phonenumber::is_valid(&parsed) {
        return Err(FieldError::InvalidPhone);
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn email_accepts_plain_addresses() {
        assert_eq!(validate_email("user@example.com"), Ok(()));
        assert_eq!(validate_email("a.b+tag@mail.example.co"), Ok(()));
    }

    #[test]
    fn email_rejects_malformed_addresses() {
        for bad in ["", "plain", "@example.com", "user@", "user@nodot", "a b@x.co", "u@x..co"] {
            assert_eq!(validate_email(bad), Err(FieldError::InvalidEmail), "{bad}");
        }
    }

    #[test]
    fn password_reports_first_unmet_rule() {
        assert_eq!(validate_password("Sh0rt!"), Err(FieldError::PasswordTooShort));
        assert_eq!(
            validate_password("LETTERS42!"),
            Err(FieldError::PasswordNeedsLowercase)
        );
        assert_eq!(
            validate_password("letters42!"),
            Err(FieldError::PasswordNeedsUppercase)
        );
        assert_eq!(
            validate_password("Lettersss!"),
            Err(FieldError::PasswordNeedsDigit)
        );
        assert_eq!(
            validate_password("Letters42"),
            Err(FieldError::PasswordNeedsSpecial)
        );
        assert_eq!(validate_password("Letters42!"), Ok(()));
    }

    #[test]
    fn password_needs_every_character_class() {
        // One missing class is enough to reject, whichever it is.
        for bad in ["letters42", "LETTERS42", "Letters42", "Lettersss", "12345678!"] {
            assert!(validate_password(bad).is_err(), "{bad}");
        }
        assert_eq!(validate_password("s3cure&Pass"), Ok(()));
    }

    #[test]
    fn name_and_bio_bounds() {
        assert_eq!(validate_display_name(" a "), Err(FieldError::NameTooShort));
        assert_eq!(validate_display_name("Al"), Ok(()));
        assert_eq!(validate_bio(&"x".repeat(MAX_BIO_LEN)), Ok(()));
        assert_eq!(validate_bio(&"x".repeat(MAX_BIO_LEN + 1)), Err(FieldError::BioTooLong));
    }

    #[test]
    fn phone_requires_a_real_international_number() {
        assert_eq!(validate_phone("+14155552671"), Ok(()));
        assert_eq!(validate_phone("+442071838750"), Ok(()));
        for bad in ["", "banana", "12345", "+1234"] {
            assert_eq!(validate_phone(bad), Err(FieldError::InvalidPhone), "{bad}");
        }
    }
}
