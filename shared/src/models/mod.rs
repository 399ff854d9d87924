//! Data models shared by both services

pub mod person;
pub mod user;

pub use person::{
    ADMIN_PERMISSIONS, ADMIN_ROLE, Account, AccountKind, AccountView, Administrator,
    DEFAULT_ROLE, Person, Profile, User,
};
pub use user::{NewUser, UserPayload, UserRecord};
