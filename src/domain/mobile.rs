//! Canonicalisation of free-form phone numbers.

use validator::ValidationError;

/// Number of digits in a canonical mobile number.
pub const MOBILE_DIGITS: usize = 10;

/// Keep only the ASCII digits of `input`, in their original order.
///
/// Spaces, dashes, parentheses, a leading `+` and any other characters are
/// dropped. No length check happens here; listing uses the result as-is.
pub fn digits_only(input: &str) -> String {
    input.chars().filter(char::is_ascii_digit).collect()
}

/// Canonical form used when an order is accepted: exactly ten digits.
pub fn canonical_mobile(input: &str) -> Result<String, ValidationError> {
    let digits = digits_only(input);
    if digits.len() != MOBILE_DIGITS {
        let mut err = ValidationError::new("mobile_digits");
        err.message = Some("Mobile must be 10 digits".into());
        return Err(err);
    }
    Ok(digits)
}

/// `validator` hook for the `customer_mobile` field.
pub(crate) fn validate_mobile(value: &str) -> Result<(), ValidationError> {
    canonical_mobile(value).map(|_| ())
}
