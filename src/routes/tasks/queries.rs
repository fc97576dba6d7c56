use async_trait::async_trait;
use uuid::Uuid;

use super::dto::CreateTask;
use super::model::{Task, TaskCategory, TaskCategoryDetail};
use crate::error::AppError;
use crate::store::PostgresStore;

#[async_trait]
pub trait TaskRepository: Send + Sync {
    /// Fails when `category_id` does not reference an existing category.
    async fn store_task(&self, task: &CreateTask) -> Result<Task, AppError>;
    /// Writes every mutable column of `task` back to its row.
    async fn update_task(&self, task: &Task) -> Result<Task, AppError>;
    async fn delete_task(&self, id: Uuid) -> Result<(), AppError>;
    async fn get_task_by_id(&self, id: Uuid) -> Result<Task, AppError>;
    async fn list_tasks(&self) -> Result<Vec<Task>, AppError>;
    /// Inner join of one task with its category. Empty when the task has no category.
    async fn get_task_category(&self, id: Uuid) -> Result<Vec<TaskCategory>, AppError>;
    async fn list_task_categories(&self) -> Result<Vec<TaskCategoryDetail>, AppError>;
}

#[async_trait]
impl TaskRepository for PostgresStore {
    async fn store_task(&self, task: &CreateTask) -> Result<Task, AppError> {
        let rec = sqlx::query_as::<_, Task>(
            r#"
            INSERT INTO tasks (id, title, deadline, priority, status, category_id)
            VALUES ($1, $2, $3, $4, $5, $6)
            RETURNING id, title, deadline, priority, status, category_id, created_at, updated_at
            "#,
        )
        .bind(Uuid::new_v4())
        .bind(&task.title)
        .bind(task.deadline)
        .bind(task.priority)
        .bind(&task.status)
        .bind(task.category_id)
        .fetch_one(&self.pool)
        .await?;

        Ok(rec)
    }

    async fn update_task(&self, task: &Task) -> Result<Task, AppError> {
        let rec = sqlx::query_as::<_, Task>(
            r#"
            UPDATE tasks
            SET
                title = $2,
                deadline = $3,
                priority = $4,
                status = $5,
                category_id = $6,
                updated_at = NOW()
            WHERE id = $1
            RETURNING id, title, deadline, priority, status, category_id, created_at, updated_at
            "#,
        )
        .bind(task.id)
        .bind(&task.title)
        .bind(task.deadline)
        .bind(task.priority)
        .bind(&task.status)
        .bind(task.category_id)
        .fetch_one(&self.pool)
        .await?;

        Ok(rec)
    }

    async fn delete_task(&self, id: Uuid) -> Result<(), AppError> {
        sqlx::query(
            r#"
            DELETE FROM tasks
            WHERE id = $1
            "#,
        )
        .bind(id)
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    async fn get_task_by_id(&self, id: Uuid) -> Result<Task, AppError> {
        let rec = sqlx::query_as::<_, Task>(
            r#"
            SELECT id, title, deadline, priority, status, category_id, created_at, updated_at
            FROM tasks
            WHERE id = $1
            "#,
        )
        .bind(id)
        .fetch_one(&self.pool)
        .await?;

        Ok(rec)
    }

    async fn list_tasks(&self) -> Result<Vec<Task>, AppError> {
        let rec = sqlx::query_as::<_, Task>(
            r#"
            SELECT id, title, deadline, priority, status, category_id, created_at, updated_at
            FROM tasks
            ORDER BY created_at
            "#,
        )
        .fetch_all(&self.pool)
        .await?;

        Ok(rec)
    }

    async fn get_task_category(&self, id: Uuid) -> Result<Vec<TaskCategory>, AppError> {
        let rec = sqlx::query_as::<_, TaskCategory>(
            r#"
            SELECT t.id, t.title, c.name AS category
            FROM tasks t
            JOIN categories c ON t.category_id = c.id
            WHERE t.id = $1
            "#,
        )
        .bind(id)
        .fetch_all(&self.pool)
        .await?;

        Ok(rec)
    }

    async fn list_task_categories(&self) -> Result<Vec<TaskCategoryDetail>, AppError> {
        let rec = sqlx::query_as::<_, TaskCategoryDetail>(
            r#"
            SELECT t.id, t.title, t.deadline, t.priority, t.status, c.name AS category
            FROM tasks t
            JOIN categories c ON t.category_id = c.id
            ORDER BY t.created_at
            "#,
        )
        .fetch_all(&self.pool)
        .await?;

        Ok(rec)
    }
}
