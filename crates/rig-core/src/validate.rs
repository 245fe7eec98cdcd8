//! Field validation for user-supplied input.
//!
//! Every helper returns `CoreError::Validation` naming the offending field.
//! Text helpers trim their input and return the trimmed value.

use std::net::IpAddr;

use crate::errors::CoreError;

/// Width of most short text columns.
pub const SHORT_TEXT: usize = 45;
/// Width of equipment description and note columns.
pub const LONG_TEXT: usize = 64;
/// Width of the location rack column.
pub const RACK_TEXT: usize = 5;

fn invalid(field: &str, reason: impl std::fmt::Display) -> CoreError {
    CoreError::Validation(format!("{field}: {reason}"))
}

/// Required, non-blank text of at most `max` characters.
pub fn required_text(field: &str, value: &str, max: usize) -> Result<String, CoreError> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err(invalid(field, "must not be blank"));
    }
    if trimmed.chars().count() > max {
        return Err(invalid(field, format!("must be at most {max} characters")));
    }
    Ok(trimmed.to_string())
}

/// Optional text. Blank input normalizes to `None`.
pub fn optional_text(
    field: &str,
    value: Option<&str>,
    max: usize,
) -> Result<Option<String>, CoreError> {
    match value.map(str::trim) {
        None | Some("") => Ok(None),
        Some(text) => required_text(field, text, max).map(Some),
    }
}

/// An IPv4 or IPv6 address in textual form.
pub fn ip_address(field: &str, value: &str) -> Result<String, CoreError> {
    let trimmed = value.trim();
    trimmed
        .parse::<IpAddr>()
        .map(|ip| ip.to_string())
        .map_err(|_| invalid(field, format!("'{trimmed}' is not a valid IP address")))
}

pub fn optional_ip_address(field: &str, value: Option<&str>) -> Result<Option<String>, CoreError> {
    match value.map(str::trim) {
        None | Some("") => Ok(None),
        Some(text) => ip_address(field, text).map(Some),
    }
}

/// A TCP/UDP port number.
pub fn port(field: &str, value: i64) -> Result<i64, CoreError> {
    if (1..=65_535).contains(&value) {
        Ok(value)
    } else {
        Err(invalid(field, format!("{value} is not a valid port")))
    }
}

pub fn non_negative(field: &str, value: i64) -> Result<i64, CoreError> {
    if value < 0 {
        Err(invalid(field, "must not be negative"))
    } else {
        Ok(value)
    }
}

/// Minimal shape check: one `@` with text on both sides.
pub fn email(field: &str, value: &str) -> Result<String, CoreError> {
    let trimmed = required_text(field, value, 254)?;
    match trimmed.split_once('@') {
        Some((local, domain)) if !local.is_empty() && !domain.is_empty() && !domain.contains('@') => {
            Ok(trimmed)
        }
        _ => Err(invalid(field, "is not a valid email address")),
    }
}

/// A name used verbatim as a single path segment (repository names, suite names).
///
/// Rejects empty names, separators, NUL, `.`/`..`, and hidden (dot-prefixed) names.
pub fn path_segment(field: &str, value: &str) -> Result<String, CoreError> {
    if value.is_empty() {
        return Err(invalid(field, "must not be empty"));
    }
    if value.contains(['/', '\\', '\0']) {
        return Err(invalid(field, "must not contain path separators"));
    }
    if value.starts_with('.') {
        return Err(invalid(field, "must not start with '.'"));
    }
    if value.trim() != value {
        return Err(invalid(field, "must not have surrounding whitespace"));
    }
    Ok(value.to_string())
}
