//! Database access layer

pub mod users;

use async_trait::async_trait;
use shared::models::{NewUser, UserRecord};

use crate::error::ServiceResult;

pub use users::PgUserRepository;

/// Persistent user store
///
/// Every operation is a single SQL statement. `update` overwrites name, email
/// and age unconditionally; merging with the stored row is up to the caller.
#[async_trait]
pub trait UserRepository: Send + Sync {
    /// All users ordered by id
    async fn find_all(&self) -> ServiceResult<Vec<UserRecord>>;

    async fn find_by_id(&self, id: i32) -> ServiceResult<Option<UserRecord>>;

    /// Exact, case-sensitive match
    async fn find_by_email(&self, email: &str) -> ServiceResult<Option<UserRecord>>;

    async fn create(&self, user: &NewUser) -> ServiceResult<UserRecord>;

    /// `None` when no row has this id
    async fn update(&self, id: i32, user: &NewUser) -> ServiceResult<Option<UserRecord>>;

    /// Removed row, `None` when no row has this id
    async fn delete(&self, id: i32) -> ServiceResult<Option<UserRecord>>;

    /// Cheap connectivity probe for the health endpoint
    async fn ping(&self) -> ServiceResult<()>;
}
