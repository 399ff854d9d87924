//! User database operations (PostgreSQL)

use async_trait::async_trait;
use shared::models::{NewUser, UserRecord};
use sqlx::PgPool;

use super::UserRepository;
use crate::error::ServiceResult;

#[derive(Debug, Clone)]
pub struct PgUserRepository {
    pool: PgPool,
}

impl PgUserRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl UserRepository for PgUserRepository {
    async fn find_all(&self) -> ServiceResult<Vec<UserRecord>> {
        let rows: Vec<UserRecord> = sqlx::query_as("SELECT * FROM users ORDER BY id ASC")
            .fetch_all(&self.pool)
            .await?;
        Ok(rows)
    }

    async fn find_by_id(&self, id: i32) -> ServiceResult<Option<UserRecord>> {
        let row: Option<UserRecord> = sqlx::query_as("SELECT * FROM users WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;
        Ok(row)
    }

    async fn find_by_email(&self, email: &str) -> ServiceResult<Option<UserRecord>> {
        let row: Option<UserRecord> = sqlx::query_as("SELECT * FROM users WHERE email = $1")
            .bind(email)
            .fetch_optional(&self.pool)
            .await?;
        Ok(row)
    }

    async fn create(&self, user: &NewUser) -> ServiceResult<UserRecord> {
        let row: UserRecord = sqlx::query_as(
            r#"
            INSERT INTO users (name, email, age, created_at, updated_at)
            VALUES ($1, $2, $3, NOW(), NOW())
            RETURNING *
            "#,
        )
        .bind(&user.name)
        .bind(&user.email)
        .bind(user.age)
        .fetch_one(&self.pool)
        .await?;
        Ok(row)
    }

    async fn update(&self, id: i32, user: &NewUser) -> ServiceResult<Option<UserRecord>> {
        let row: Option<UserRecord> = sqlx::query_as(
            r#"
            UPDATE users
            SET name = $1, email = $2, age = $3, updated_at = NOW()
            WHERE id = $4
            RETURNING *
            "#,
        )
        .bind(&user.name)
        .bind(&user.email)
        .bind(user.age)
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;
        Ok(row)
    }

    async fn delete(&self, id: i32) -> ServiceResult<Option<UserRecord>> {
        let row: Option<UserRecord> =
            sqlx::query_as("DELETE FROM users WHERE id = $1 RETURNING *")
                .bind(id)
                .fetch_optional(&self.pool)
                .await?;
        Ok(row)
    }

    async fn ping(&self) -> ServiceResult<()> {
        sqlx::query("SELECT 1").execute(&self.pool).await?;
        Ok(())
    }
}
