//! Field validation helpers
//!
//! Hand-written validators used by the request DTOs on top of the derive
//! macro: the Swedish organisation-number checksum and the email pattern.

use lazy_static::lazy_static;
use regex::Regex;
use validator::ValidationError;

lazy_static! {
    /// Basic `local@domain.tld` pattern, case-insensitive.
    pub static ref EMAIL_REGEX: Regex =
        Regex::new(r"(?i)^[^@\s]+@(?:[-a-z0-9]+\.)+[a-z]{2,}$").expect("email regex must compile");
}

/// Validate a Swedish organisationsnummer: exactly ten digits with a
/// trailing Luhn check digit.
pub fn validate_org_number(value: &str) -> Result<(), ValidationError> {
    if value.chars().count() != 10 {
        let mut error = ValidationError::new("length");
        error.add_param("expected".into(), &10);
        error.add_param("actual".into(), &value.chars().count());
        return Err(error);
    }

    let digits: Vec<u32> = value.chars().filter_map(|c| c.to_digit(10)).collect();
    if digits.len() != 10 {
        let mut error = ValidationError::new("org_number_format");
        error.add_param("value".into(), &value.to_string());
        return Err(error);
    }

    if luhn_check_digit(&digits[..9]) != digits[9] {
        let mut error = ValidationError::new("org_number_checksum");
        error.add_param("value".into(), &value.to_string());
        return Err(error);
    }

    Ok(())
}

/// Luhn check digit over the first nine digits, weights 2,1,2,1,...
fn luhn_check_digit(digits: &[u32]) -> u32 {
    let sum: u32 = digits
        .iter()
        .enumerate()
        .map(|(i, d)| {
            let product = if i % 2 == 0 { d * 2 } else { *d };
            product / 10 + product % 10
        })
        .sum();
    (10 - sum % 10) % 10
}

/// Validate email format against the basic pattern
pub fn validate_email(value: &str) -> Result<(), ValidationError> {
    if !EMAIL_REGEX.is_match(value) {
        let mut error = ValidationError::new("email");
        error.add_param("value".into(), &value.to_string());
        return Err(error);
    }
    Ok(())
}

/// Validate that a string is not blank
pub fn validate_not_blank(value: &str) -> Result<(), ValidationError> {
    if value.trim().is_empty() {
        let error = ValidationError::new("not_blank");
        return Err(error);
    }
    Ok(())
}

/// Validate that a fee amount is strictly positive
pub fn validate_positive_amount<T: PartialOrd + num_traits::Zero>(
    value: T,
) -> Result<(), ValidationError> {
    if value <= T::zero() {
        return Err(ValidationError::new("positive"));
    }
    Ok(())
}
