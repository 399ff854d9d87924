//! Input validation helpers
//!
//! Rules shared by the create and update handlers of both services. The
//! messages are the ones returned to API clients.

use std::str::FromStr;
use std::sync::LazyLock;

use regex::Regex;

use crate::error::AppError;

/// Inclusive age bounds
pub const MIN_AGE: i32 = 0;
pub const MAX_AGE: i32 = 150;

pub const MSG_NAME_EMAIL_REQUIRED: &str = "Nome e email são obrigatórios";
pub const MSG_INVALID_EMAIL: &str = "Email inválido";
pub const MSG_AGE_OUT_OF_RANGE: &str = "Idade deve estar entre 0 e 150";
pub const MSG_EMAIL_TAKEN: &str = "Email já cadastrado";
pub const MSG_EMAIL_TAKEN_BY_OTHER: &str = "Email já cadastrado para outro usuário";
pub const MSG_INVALID_ID: &str = "ID inválido";

static EMAIL_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").expect("email pattern compiles"));

/// Check the `local@domain.tld` shape, no whitespace, exactly one `@`
pub fn is_valid_email(email: &str) -> bool {
    EMAIL_RE.is_match(email)
}

/// Require name and email, then check the email shape.
///
/// Returns the borrowed values so callers can build their write model.
pub fn validate_contact<'a>(
    name: Option<&'a str>,
    email: Option<&'a str>,
) -> Result<(&'a str, &'a str), AppError> {
    let (name, email) = match (name, email) {
        (Some(n), Some(e)) if !n.is_empty() && !e.is_empty() => (n, e),
        _ => return Err(AppError::validation(MSG_NAME_EMAIL_REQUIRED)),
    };
    validate_email_format(email)?;
    Ok((name, email))
}

pub fn validate_email_format(email: &str) -> Result<(), AppError> {
    if !is_valid_email(email) {
        return Err(AppError::validation(MSG_INVALID_EMAIL));
    }
    Ok(())
}

/// An absent age is accepted; a present one is range-checked and narrowed to
/// the stored `i32`
pub fn validate_age(age: Option<i64>) -> Result<Option<i32>, AppError> {
    let Some(age) = age else {
        return Ok(None);
    };
    i32::try_from(age)
        .ok()
        .filter(|a| (MIN_AGE..=MAX_AGE).contains(a))
        .map(Some)
        .ok_or_else(|| AppError::out_of_range(MSG_AGE_OUT_OF_RANGE))
}

/// Parse a path identifier
pub fn parse_id<T: FromStr>(raw: &str) -> Result<T, AppError> {
    raw.parse::<T>()
        .map_err(|_| AppError::invalid_request(MSG_INVALID_ID).with_detail("id", raw))
}
