//! Input validation utilities

use std::fmt;
use std::str::FromStr;
use std::sync::OnceLock;

use regex::Regex;
use serde::Serialize;

use crate::models::Settings;

/// How the hourly rate is validated.
///
/// Two revisions of the configuration screen disagree: one accepts any
/// non-negative amount, the other only positive even integers. Which one
/// applies is a deployment decision, so it is configurable rather than
/// hard-coded.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum RatePolicy {
    /// Any finite amount >= 0
    #[default]
    Any,
    /// A positive, even, whole amount
    EvenInteger,
}

impl FromStr for RatePolicy {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "any" => Ok(Self::Any),
            "even-integer" | "even_integer" => Ok(Self::EvenInteger),
            other => Err(format!(
                "Unknown rate policy {other:?}, expected \"any\" or \"even-integer\""
            )),
        }
    }
}

impl fmt::Display for RatePolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Any => f.write_str("any"),
            Self::EvenInteger => f.write_str("even-integer"),
        }
    }
}

/// Validate email
pub fn validate_email(email: &str) -> Result<(), String> {
    if email.is_empty() {
        return Err("Email is required".to_string());
    }

    if email.len() > 254 {
        return Err("Email must be at most 254 characters long".to_string());
    }

    static EMAIL_REGEX: OnceLock<Regex> = OnceLock::new();
    let regex = EMAIL_REGEX.get_or_init(|| {
        Regex::new(r"^[\w.-]+@[\w.-]+\.\w+$").expect("Failed to compile email regex")
    });

    if !regex.is_match(email) {
        return Err("Invalid email format".to_string());
    }

    Ok(())
}

/// Validate password
pub fn validate_password(password: &str) -> Result<(), String> {
    if password.is_empty() {
        return Err("Password is required".to_string());
    }

    if password.chars().count() < 8 {
        return Err("Password must be at least 8 characters long".to_string());
    }

    if password.len() > 128 {
        return Err("Password must be at most 128 characters long".to_string());
    }

    if !password.chars().any(|c| c.is_uppercase()) {
        return Err("Password must contain at least one uppercase letter".to_string());
    }

    if !password.chars().any(|c| c.is_ascii_digit()) {
        return Err("Password must contain at least one digit".to_string());
    }

    Ok(())
}

/// Validate phone number: exactly eight digits
pub fn validate_phone(phone: &str) -> Result<(), String> {
    if phone.len() != 8 || !phone.chars().all(|c| c.is_ascii_digit()) {
        return Err("Phone number must have exactly 8 digits".to_string());
    }

    Ok(())
}

/// Validate a space id: letters and digits only
pub fn validate_space_id(id: &str) -> Result<(), String> {
    let id = id.trim();
    if id.is_empty() {
        return Err("Space id is required".to_string());
    }

    if !id.chars().all(|c| c.is_ascii_alphanumeric()) {
        return Err(format!("Invalid space id {id:?}"));
    }

    Ok(())
}

/// Validate a licence plate
pub fn validate_plate(plate: &str) -> Result<(), String> {
    let plate = plate.trim();
    if plate.is_empty() {
        return Err("Plate is required".to_string());
    }

    if plate.len() > 12 || !plate.chars().all(|c| c.is_ascii_alphanumeric() || c == '-') {
        return Err(format!("Invalid plate {plate:?}"));
    }

    Ok(())
}

/// Validate a time of day written as `HH:MM`
pub fn validate_clock_time(value: &str) -> Result<(), String> {
    static CLOCK_REGEX: OnceLock<Regex> = OnceLock::new();
    let regex = CLOCK_REGEX.get_or_init(|| {
        Regex::new(r"^(\d{1,2}):(\d{1,2})$").expect("Failed to compile time regex")
    });

    let invalid = || format!("Invalid time {value:?}, expected HH:MM");
    let captures = regex.captures(value.trim()).ok_or_else(invalid)?;
    let hour: u32 = captures[1].parse().map_err(|_| invalid())?;
    let minute: u32 = captures[2].parse().map_err(|_| invalid())?;

    if hour > 23 || minute > 59 {
        return Err(invalid());
    }

    Ok(())
}

/// Validate settings before they are saved
pub fn validate_settings(settings: &Settings, policy: RatePolicy) -> Result<(), String> {
    let rate = settings.hourly_rate;
    if !rate.is_finite() || rate < 0.0 {
        return Err("Hourly rate must be a non-negative amount".to_string());
    }

    if policy == RatePolicy::EvenInteger
        && (rate <= 0.0 || rate.fract() != 0.0 || rate % 2.0 != 0.0)
    {
        return Err("Hourly rate must be a positive even integer".to_string());
    }

    if !settings.fine_amount.is_finite() || settings.fine_amount < 0.0 {
        return Err("Fine amount must be a non-negative amount".to_string());
    }

    if settings.minimum_minutes < 1 {
        return Err("Minimum rental time must be at least 1 minute".to_string());
    }

    validate_clock_time(&settings.opening)?;
    validate_clock_time(&settings.closing)?;

    Ok(())
}
