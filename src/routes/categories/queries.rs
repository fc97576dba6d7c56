use async_trait::async_trait;
use uuid::Uuid;

use super::dto::CategoryRequest;
use super::model::Category;
use crate::error::AppError;
use crate::store::PostgresStore;

#[async_trait]
pub trait CategoryRepository: Send + Sync {
    async fn store_category(&self, request: &CategoryRequest) -> Result<Category, AppError>;
    /// Overwrites every field of an existing row; `NotFound` when the id is absent.
    async fn update_category(&self, id: Uuid, request: &CategoryRequest) -> Result<Category, AppError>;
    /// Deleting an absent id is not an error.
    async fn delete_category(&self, id: Uuid) -> Result<(), AppError>;
    async fn get_category_by_id(&self, id: Uuid) -> Result<Category, AppError>;
    async fn list_categories(&self) -> Result<Vec<Category>, AppError>;
}

#[async_trait]
impl CategoryRepository for PostgresStore {
    async fn store_category(&self, request: &CategoryRequest) -> Result<Category, AppError> {
        let category = sqlx::query_as::<_, Category>(
            r#"
            INSERT INTO categories (id, name)
            VALUES ($1, $2)
            RETURNING id, name, created_at, updated_at
            "#,
        )
        .bind(Uuid::new_v4())
        .bind(&request.name)
        .fetch_one(&self.pool)
        .await?;

        Ok(category)
    }

    async fn update_category(&self, id: Uuid, request: &CategoryRequest) -> Result<Category, AppError> {
        let category = sqlx::query_as::<_, Category>(
            r#"
            UPDATE categories
            SET name = $2, updated_at = NOW()
            WHERE id = $1
            RETURNING id, name, created_at, updated_at
            "#,
        )
        .bind(id)
        .bind(&request.name)
        .fetch_one(&self.pool)
        .await?;

        Ok(category)
    }

    async fn delete_category(&self, id: Uuid) -> Result<(), AppError> {
        sqlx::query(
            r#"
            DELETE FROM categories
            WHERE id = $1
            "#,
        )
        .bind(id)
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    async fn get_category_by_id(&self, id: Uuid) -> Result<Category, AppError> {
        let category = sqlx::query_as::<_, Category>(
            r#"
            SELECT id, name, created_at, updated_at
            FROM categories
            WHERE id = $1
            "#,
        )
        .bind(id)
        .fetch_one(&self.pool)
        .await?;

        Ok(category)
    }

    async fn list_categories(&self) -> Result<Vec<Category>, AppError> {
        let categories = sqlx::query_as::<_, Category>(
            r#"
            SELECT id, name, created_at, updated_at
            FROM categories
            ORDER BY created_at
            "#,
        )
        .fetch_all(&self.pool)
        .await?;

        Ok(categories)
    }
}
