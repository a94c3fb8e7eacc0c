use chrono::NaiveDate;
use thiserror::Error;

pub const MIN_PASSWORD_LEN: usize = 6;

/// First problem found in the staff login form.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum LoginError {
    #[error("Staff ID is required.")]
    MissingStaffId,
    #[error("Birthdate is required.")]
    MissingBirthdate,
    #[error("Birthdate must be YYYY-MM-DD.")]
    MalformedBirthdate,
    #[error("Password must be at least 6 characters.")]
    ShortPassword,
}

/// Validates the login form fields in display order and returns the first error.
/// Credentials are not checked against anything.
pub fn validate_login(staff_id: &str, birthdate: &str, password: &str) -> Result<NaiveDate, LoginError> {
    if staff_id.trim().is_empty() {
        return Err(LoginError::MissingStaffId);
    }
    let birthdate = birthdate.trim();
    if birthdate.is_empty() {
        return Err(LoginError::MissingBirthdate);
    }
    let shape_ok = birthdate.len() == 10
        && birthdate.bytes().enumerate().all(|(i, b)| match i {
            4 | 7 => b == b'-',
            _ => b.is_ascii_digit(),
        });
    let date = shape_ok
        .then(|| NaiveDate::parse_from_str(birthdate, "%Y-%m-%d").ok())
        .flatten()
        .ok_or(LoginError::MalformedBirthdate)?;
    if password.chars().count() < MIN_PASSWORD_LEN {
        return Err(LoginError::ShortPassword);
    }
    Ok(date)
}
