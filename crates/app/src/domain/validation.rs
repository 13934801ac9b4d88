//! Field validation shared by the domain services.

use rust_decimal::Decimal;
use thiserror::Error;

/// Minimum length for usernames and passwords.
pub const MIN_CREDENTIAL_LENGTH: usize = 8;

/// A request field failed validation before reaching storage.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("{field} cannot be empty")]
    Empty { field: &'static str },

    #[error("{field} must be at least {min} characters")]
    TooShort { field: &'static str, min: usize },

    #[error("must provide a valid email")]
    InvalidEmail,

    #[error("{field} cannot be negative")]
    Negative { field: &'static str },

    #[error("{field} must be greater than zero")]
    NotPositive { field: &'static str },
}

pub(crate) fn require_non_empty(field: &'static str, value: &str) -> Result<(), ValidationError> {
    if value.trim().is_empty() {
        return Err(ValidationError::Empty { field });
    }

    Ok(())
}

pub(crate) fn require_min_length(
    field: &'static str,
    value: &str,
    min: usize,
) -> Result<(), ValidationError> {
    require_non_empty(field, value)?;

    if value.chars().count() < min {
        return Err(ValidationError::TooShort { field, min });
    }

    Ok(())
}

pub(crate) fn require_email(value: &str) -> Result<(), ValidationError> {
    let Some((local, domain)) = value.split_once('@') else {
        return Err(ValidationError::InvalidEmail);
    };

    let valid = !local.is_empty()
        && !domain.contains('@')
        && !value.chars().any(char::is_whitespace)
        && domain
            .split_once('.')
            .is_some_and(|(host, tld)| !host.is_empty() && !tld.is_empty() && !tld.ends_with('.'));

    if valid {
        Ok(())
    } else {
        Err(ValidationError::InvalidEmail)
    }
}

pub(crate) fn require_non_negative(
    field: &'static str,
    value: Decimal,
) -> Result<(), ValidationError> {
    if value.is_sign_negative() && !value.is_zero() {
        return Err(ValidationError::Negative { field });
    }

    Ok(())
}

pub(crate) fn require_positive(field: &'static str, value: u32) -> Result<(), ValidationError> {
    if value == 0 {
        return Err(ValidationError::NotPositive { field });
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use rust_decimal::Decimal;

    use super::*;

    #[test]
    fn blank_values_are_empty() {
        assert_eq!(
            require_non_empty("title", "   "),
            Err(ValidationError::Empty { field: "title" })
        );
    }

    #[test]
    fn short_usernames_are_rejected() {
        assert_eq!(
            require_min_length("username", "shorty", MIN_CREDENTIAL_LENGTH),
            Err(ValidationError::TooShort {
                field: "username",
                min: MIN_CREDENTIAL_LENGTH
            })
        );
        assert!(require_min_length("username", "longenough", MIN_CREDENTIAL_LENGTH).is_ok());
    }

    #[test]
    fn emails_need_a_local_part_and_a_dotted_domain() {
        assert!(require_email("buyer@example.com").is_ok());
        assert!(require_email("buyer@example").is_err());
        assert!(require_email("@example.com").is_err());
        assert!(require_email("buyer@@example.com").is_err());
        assert!(require_email("buyer @example.com").is_err());
        assert!(require_email("buyer.example.com").is_err());
    }

    #[test]
    fn negative_prices_are_rejected() {
        assert!(require_non_negative("price", Decimal::new(-1, 2)).is_err());
        assert!(require_non_negative("price", Decimal::ZERO).is_ok());
        assert!(require_non_negative("price", Decimal::new(1999, 2)).is_ok());
    }

    #[test]
    fn zero_quantities_are_not_positive() {
        assert_eq!(
            require_positive("quantity", 0),
            Err(ValidationError::NotPositive { field: "quantity" })
        );
        assert!(require_positive("quantity", 1).is_ok());
    }
}
