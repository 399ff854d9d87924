//! Person → User → Administrator hierarchy
//!
//! Each level owns the previous level as a named field. Behaviour always runs
//! the contained level first and then extends it.

use chrono::{DateTime, Utc};
use enum_dispatch::enum_dispatch;
use serde::Serialize;

/// Role assigned to plain users when none is given
pub const DEFAULT_ROLE: &str = "common";

/// Role carried by every administrator
pub const ADMIN_ROLE: &str = "admin";

/// Capability set granted to administrators
pub const ADMIN_PERMISSIONS: &[&str] = &["create", "read", "update", "delete"];

/// Behaviour shared by every level of the hierarchy
#[enum_dispatch]
pub trait Profile {
    /// Human-readable summary, extended by each level
    fn describe(&self) -> String;

    /// Structural validity; derived levels only add constraints
    fn validate(&self) -> bool;
}

/// Base level: identity fields
#[derive(Debug, Clone, PartialEq)]
pub struct Person {
    pub id: i64,
    pub name: String,
    pub email: String,
    pub created_at: DateTime<Utc>,
}

impl Person {
    pub fn new(id: i64, name: impl Into<String>, email: impl Into<String>) -> Self {
        Self {
            id,
            name: name.into(),
            email: email.into(),
            created_at: Utc::now(),
        }
    }
}

impl Profile for Person {
    fn describe(&self) -> String {
        format!("ID: {}, Name: {}, Email: {}", self.id, self.name, self.email)
    }

    fn validate(&self) -> bool {
        !self.name.is_empty() && !self.email.is_empty()
    }
}

/// A person with credentials and a role
#[derive(Debug, Clone, PartialEq)]
pub struct User {
    pub person: Person,
    pub password: String,
    pub role: String,
    pub active: bool,
}

impl User {
    /// Build a user; an absent or empty role falls back to [`DEFAULT_ROLE`].
    pub fn new(person: Person, password: impl Into<String>, role: Option<String>) -> Self {
        Self {
            person,
            password: password.into(),
            role: role
                .filter(|r| !r.is_empty())
                .unwrap_or_else(|| DEFAULT_ROLE.to_string()),
            active: true,
        }
    }

    /// Plain, case-sensitive password comparison
    pub fn authenticate(&self, candidate: &str) -> bool {
        self.password == candidate
    }
}

impl Profile for User {
    fn describe(&self) -> String {
        format!(
            "{}, Role: {}, Active: {}",
            self.person.describe(),
            self.role,
            self.active
        )
    }

    fn validate(&self) -> bool {
        self.person.validate() && !self.password.is_empty()
    }
}

/// A user with the admin role, a level and a fixed permission set
#[derive(Debug, Clone, PartialEq)]
pub struct Administrator {
    pub user: User,
    pub level: i32,
    pub permissions: &'static [&'static str],
}

impl Administrator {
    /// Build an administrator; a missing or zero level becomes 1.
    pub fn new(person: Person, password: impl Into<String>, level: Option<i32>) -> Self {
        Self {
            user: User::new(person, password, Some(ADMIN_ROLE.to_string())),
            level: level.filter(|l| *l != 0).unwrap_or(1),
            permissions: ADMIN_PERMISSIONS,
        }
    }

    pub fn has_permission(&self, permission: &str) -> bool {
        self.permissions.contains(&permission)
    }
}

impl Profile for Administrator {
    fn describe(&self) -> String {
        format!(
            "{}, Level: {}, Permissions: {}",
            self.user.describe(),
            self.level,
            self.permissions.len()
        )
    }

    fn validate(&self) -> bool {
        self.user.validate()
    }
}

/// Which level of the hierarchy an account was created as
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum AccountKind {
    User,
    Administrator,
}

impl AccountKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::User => "User",
            Self::Administrator => "Administrator",
        }
    }
}

/// Stored account: one of the concrete levels
#[enum_dispatch(Profile)]
#[derive(Debug, Clone, PartialEq)]
pub enum Account {
    User(User),
    Administrator(Administrator),
}

impl Account {
    pub fn kind(&self) -> AccountKind {
        match self {
            Self::User(_) => AccountKind::User,
            Self::Administrator(_) => AccountKind::Administrator,
        }
    }

    pub fn user(&self) -> &User {
        match self {
            Self::User(user) => user,
            Self::Administrator(admin) => &admin.user,
        }
    }

    pub fn user_mut(&mut self) -> &mut User {
        match self {
            Self::User(user) => user,
            Self::Administrator(admin) => &mut admin.user,
        }
    }

    pub fn person(&self) -> &Person {
        &self.user().person
    }

    pub fn id(&self) -> i64 {
        self.person().id
    }

    pub fn role(&self) -> &str {
        &self.user().role
    }

    pub fn authenticate(&self, candidate: &str) -> bool {
        self.user().authenticate(candidate)
    }

    /// Permission set, present only for administrators
    pub fn permissions(&self) -> Option<&'static [&'static str]> {
        match self {
            Self::User(_) => None,
            Self::Administrator(admin) => Some(admin.permissions),
        }
    }

    /// Administrator level, absent for plain users
    pub fn level(&self) -> Option<i32> {
        match self {
            Self::User(_) => None,
            Self::Administrator(admin) => Some(admin.level),
        }
    }

    pub fn has_permission(&self, permission: &str) -> bool {
        match self {
            Self::User(_) => false,
            Self::Administrator(admin) => admin.has_permission(permission),
        }
    }
}

/// Serializable view of an account (never includes the password)
#[derive(Debug, Clone, Serialize)]
pub struct AccountView {
    pub id: i64,
    pub name: String,
    pub email: String,
    pub role: String,
    pub active: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub level: Option<i32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub permissions: Option<&'static [&'static str]>,
    pub created_at: DateTime<Utc>,
    pub kind: AccountKind,
    pub info: String,
}

impl From<&Account> for AccountView {
    fn from(account: &Account) -> Self {
        let user = account.user();
        Self {
            id: user.person.id,
            name: user.person.name.clone(),
            email: user.person.email.clone(),
            role: user.role.clone(),
            active: user.active,
            level: account.level(),
            permissions: account.permissions(),
            created_at: user.person.created_at,
            kind: account.kind(),
            info: account.describe(),
        }
    }
}
