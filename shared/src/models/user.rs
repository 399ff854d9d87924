//! Persisted user model (row of the `users` table)

use chrono::NaiveDateTime;
use serde::{Deserialize, Deserializer, Serialize};

/// User row
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "db", derive(sqlx::FromRow))]
pub struct UserRecord {
    pub id: i32,
    pub name: String,
    pub email: String,
    pub age: Option<i32>,
    pub created_at: Option<NaiveDateTime>,
    pub updated_at: Option<NaiveDateTime>,
}

/// Create / update request body
///
/// Every field is optional at the wire level so a missing field is reported
/// as a validation error instead of a JSON rejection.
///
/// `age` keeps three states: absent (`None`), explicit `null`
/// (`Some(None)`) and a number (`Some(Some(n))`). It is read as `i64` so an
/// oversized value reaches the range check instead of failing to parse.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct UserPayload {
    #[serde(default, alias = "nome")]
    pub name: Option<String>,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(
        default,
        alias = "idade",
        deserialize_with = "present",
        skip_serializing_if = "Option::is_none"
    )]
    pub age: Option<Option<i64>>,
}

/// A field that is present (even as `null`) becomes `Some`
fn present<'de, D, T>(deserializer: D) -> Result<Option<T>, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de>,
{
    T::deserialize(deserializer).map(Some)
}

/// Validated values written by create / update
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewUser {
    pub name: String,
    pub email: String,
    pub age: Option<i32>,
}
