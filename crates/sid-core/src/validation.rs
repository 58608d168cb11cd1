//! Input validation and normalization for identity fields.
//!
//! Email addresses are normalized (trim + ASCII lowercase) so lookups and
//! the store's unique index agree on one canonical form. National ID
//! numbers are reduced to their digits; common formatting separators
//! (spaces and hyphens) are tolerated on input.

use crate::error::{CoreError, Result as CoreErrorResult};

/// Minimum number of digits in a normalized national ID number
pub const MIN_ID_NUMBER_DIGITS: usize = 12;

/// Upper bound on stored email length
pub const MAX_EMAIL_LENGTH: usize = 254;

/// Reject empty or whitespace-only input for a required field
#[track_caller]
pub fn require_non_empty(field: &str, value: &str) -> CoreErrorResult<()> {
    if value.trim().is_empty() {
        return Err(CoreError::validation(field, format!("{field} cannot be empty")));
    }
    Ok(())
}

/// Normalize an email address to its canonical stored form.
///
/// Trims surrounding whitespace and lowercases. The structural check is
/// deliberately shallow (one `@`, non-empty local part and domain); real
/// deliverability is the mail system's problem, not ours.
#[track_caller]
pub fn normalize_email(raw: &str) -> CoreErrorResult<String> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Err(CoreError::validation("email", "email cannot be empty"));
    }
    if trimmed.len() > MAX_EMAIL_LENGTH {
        return Err(CoreError::validation(
            "email",
            format!("email exceeds maximum length of {MAX_EMAIL_LENGTH}"),
        ));
    }

    let (local, domain) = trimmed
        .split_once('@')
        .ok_or_else(|| CoreError::validation("email", "email must contain '@'"))?;
    if local.is_empty() || domain.is_empty() || domain.contains('@') {
        return Err(CoreError::validation("email", "email is not a valid address"));
    }

    Ok(trimmed.to_ascii_lowercase())
}

/// Normalize a national ID number to bare digits.
///
/// Spaces and hyphens are stripped; any other non-digit character rejects
/// the input. At least [`MIN_ID_NUMBER_DIGITS`] digits are required.
#[track_caller]
pub fn normalize_id_number(raw: &str) -> CoreErrorResult<String> {
    let mut digits = String::with_capacity(raw.len());
    for c in raw.trim().chars() {
        match c {
            '0'..='9' => digits.push(c),
            ' ' | '-' => {}
            _ => {
                return Err(CoreError::validation(
                    "id_number",
                    "id_number may contain only digits, spaces, and hyphens",
                ));
            }
        }
    }

    if digits.len() < MIN_ID_NUMBER_DIGITS {
        return Err(CoreError::validation(
            "id_number",
            format!("id_number must contain at least {MIN_ID_NUMBER_DIGITS} digits"),
        ));
    }

    Ok(digits)
}
