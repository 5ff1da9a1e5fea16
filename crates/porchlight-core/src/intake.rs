//! Prospect intake validation, one validator per collected field.
//!
//! Validators return the normalized value or a reason phrased for the
//! prospect, which the dialogue wraps into a re-ask reply.

use chrono::NaiveDate;
use regex::Regex;
use thiserror::Error;

const EMAIL_PATTERN: &str = r"^[a-zA-Z0-9_.+-]+@[a-zA-Z0-9-]+\.[a-zA-Z0-9-.]+$";

// US numbers, optional +1, optional area code, common separators.
const PHONE_PATTERN: &str = r"^(?:\+1\s?)?(?:\(?\d{3}\)?[\s.-]?)?\d{3}[\s.-]?\d{4}$";

/// Formats accepted for a move-in date.
const DATE_FORMATS: &[&str] = &["%Y-%m-%d", "%m/%d/%Y", "%m/%d/%y", "%B %d, %Y", "%b %d, %Y"];

/// Reasons an intake answer is rejected.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum IntakeError {
    #[error("that doesn't look like a valid email address")]
    InvalidEmail,
    #[error("that doesn't look like a valid US phone number")]
    InvalidPhone,
    #[error("I couldn't read that as a date")]
    UnreadableDate,
    #[error("that date has already passed")]
    PastDate,
    #[error("bedrooms should be a whole number, 1 or more")]
    InvalidBeds,
}

/// Validate an email address, returning the trimmed form.
pub fn validate_email(raw: &str) -> Result<String, IntakeError> {
    let candidate = raw.trim();
    let Ok(regex) = Regex::new(EMAIL_PATTERN) else {
        return Err(IntakeError::InvalidEmail);
    };
    if regex.is_match(candidate) {
        Ok(candidate.to_string())
    } else {
        Err(IntakeError::InvalidEmail)
    }
}

/// Validate a phone number, returning the trimmed form.
pub fn validate_phone(raw: &str) -> Result<String, IntakeError> {
    let candidate = raw.trim();
    let Ok(regex) = Regex::new(PHONE_PATTERN) else {
        return Err(IntakeError::InvalidPhone);
    };
    if regex.is_match(candidate) {
        Ok(candidate.to_string())
    } else {
        Err(IntakeError::InvalidPhone)
    }
}

/// Validate a move-in date: any accepted format, today or later.
pub fn validate_move_in(raw: &str, today: NaiveDate) -> Result<NaiveDate, IntakeError> {
    let candidate = raw.trim();
    let parsed = DATE_FORMATS
        .iter()
        .find_map(|format| NaiveDate::parse_from_str(candidate, format).ok())
        .ok_or(IntakeError::UnreadableDate)?;
    if parsed < today {
        return Err(IntakeError::PastDate);
    }
    Ok(parsed)
}

/// Validate a bedroom count: a whole number of at least one.
pub fn validate_beds(raw: &str) -> Result<u32, IntakeError> {
    let beds = raw
        .trim()
        .parse::<u32>()
        .map_err(|_| IntakeError::InvalidBeds)?;
    if beds == 0 {
        return Err(IntakeError::InvalidBeds);
    }
    Ok(beds)
}
