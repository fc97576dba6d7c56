use async_trait::async_trait;
use uuid::Uuid;

use super::model::{NewUser, User};
use crate::error::AppError;
use crate::store::PostgresStore;

#[async_trait]
pub trait UserRepository: Send + Sync {
    /// `Conflict` when the email is already registered.
    async fn create_user(&self, user: &NewUser) -> Result<User, AppError>;
    async fn get_user_by_email(&self, email: &str) -> Result<Option<User>, AppError>;
}

#[async_trait]
impl UserRepository for PostgresStore {
    async fn create_user(&self, user: &NewUser) -> Result<User, AppError> {
        let res = sqlx::query_as::<_, User>(
            r#"
            INSERT INTO users (id, fullname, email, password_hash)
            VALUES ($1, $2, $3, $4)
            RETURNING id, fullname, email, password_hash, created_at
            "#,
        )
        .bind(Uuid::new_v4())
        .bind(&user.fullname)
        .bind(&user.email)
        .bind(&user.password_hash)
        .fetch_one(&self.pool)
        .await;

        match res {
            Ok(user) => Ok(user),
            Err(e) => {
                if let Some(db_error) = e.as_database_error() {
                    if db_error.is_unique_violation() {
                        return Err(AppError::Conflict(format!("user {} already exists", user.email)));
                    }
                }
                Err(e.into())
            }
        }
    }

    async fn get_user_by_email(&self, email: &str) -> Result<Option<User>, AppError> {
        let user = sqlx::query_as::<_, User>(
            r#"
            SELECT id, fullname, email, password_hash, created_at
            FROM users
            WHERE email = $1
            "#,
        )
        .bind(email)
        .fetch_optional(&self.pool)
        .await?;

        Ok(user)
    }
}
