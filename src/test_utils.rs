use std::sync::{Mutex, MutexGuard};

use async_trait::async_trait;
use chrono::Utc;
use uuid::Uuid;

use crate::error::AppError;
use crate::routes::categories::dto::CategoryRequest;
use crate::routes::categories::model::Category;
use crate::routes::categories::queries::CategoryRepository;
use crate::routes::tasks::dto::CreateTask;
use crate::routes::tasks::model::{Task, TaskCategory, TaskCategoryDetail};
use crate::routes::tasks::queries::TaskRepository;
use crate::routes::users::model::{NewUser, User};
use crate::routes::users::queries::UserRepository;

pub const TEST_SECRET: &str = "test-secret-test-secret-test-secret";

#[derive(Default)]
struct Tables {
    users: Vec<User>,
    categories: Vec<Category>,
    tasks: Vec<Task>,
}

/// In-memory stand-in for Postgres with the same constraint behavior:
/// unique emails, task category foreign key, `ON DELETE SET NULL`.
#[derive(Default)]
pub struct MemoryStore {
    tables: Mutex<Tables>,
    failing: bool,
}

impl MemoryStore {
    /// A store whose every call fails like a dropped connection.
    pub fn failing() -> Self {
        Self {
            failing: true,
            ..Self::default()
        }
    }

    pub fn task_count(&self) -> usize {
        self.tables.lock().unwrap().tasks.len()
    }

    pub fn category_count(&self) -> usize {
        self.tables.lock().unwrap().categories.len()
    }

    pub fn user_count(&self) -> usize {
        self.tables.lock().unwrap().users.len()
    }

    fn tables(&self) -> Result<MutexGuard<'_, Tables>, AppError> {
        if self.failing {
            return Err(AppError::Db(sqlx::Error::PoolTimedOut));
        }
        Ok(self.tables.lock().unwrap())
    }
}

#[async_trait]
impl CategoryRepository for MemoryStore {
    async fn store_category(&self, request: &CategoryRequest) -> Result<Category, AppError> {
        let now = Utc::now();
        let category = Category {
            id: Uuid::new_v4(),
            name: request.name.clone(),
            created_at: now,
            updated_at: now,
        };
        self.tables()?.categories.push(category.clone());
        Ok(category)
    }

    async fn update_category(&self, id: Uuid, request: &CategoryRequest) -> Result<Category, AppError> {
        let mut tables = self.tables()?;
        let category = tables
            .categories
            .iter_mut()
            .find(|c| c.id == id)
            .ok_or(AppError::NotFound)?;
        category.name = request.name.clone();
        category.updated_at = Utc::now();
        Ok(category.clone())
    }

    async fn delete_category(&self, id: Uuid) -> Result<(), AppError> {
        let mut tables = self.tables()?;
        tables.categories.retain(|c| c.id != id);
        for task in tables.tasks.iter_mut().filter(|t| t.category_id == Some(id)) {
            task.category_id = None;
        }
        Ok(())
    }

    async fn get_category_by_id(&self, id: Uuid) -> Result<Category, AppError> {
        self.tables()?
            .categories
            .iter()
            .find(|c| c.id == id)
            .cloned()
            .ok_or(AppError::NotFound)
    }

    async fn list_categories(&self) -> Result<Vec<Category>, AppError> {
        Ok(self.tables()?.categories.clone())
    }
}

#[async_trait]
impl TaskRepository for MemoryStore {
    async fn store_task(&self, task: &CreateTask) -> Result<Task, AppError> {
        let mut tables = self.tables()?;
        if !tables.categories.iter().any(|c| c.id == task.category_id) {
            return Err(AppError::Conflict(
                "insert or update on table \"tasks\" violates foreign key constraint".to_string(),
            ));
        }

        let now = Utc::now();
        let rec = Task {
            id: Uuid::new_v4(),
            title: task.title.clone(),
            deadline: task.deadline,
            priority: task.priority,
            status: task.status.clone(),
            category_id: Some(task.category_id),
            created_at: now,
            updated_at: now,
        };
        tables.tasks.push(rec.clone());
        Ok(rec)
    }

    async fn update_task(&self, task: &Task) -> Result<Task, AppError> {
        let mut tables = self.tables()?;
        if let Some(category_id) = task.category_id {
            if !tables.categories.iter().any(|c| c.id == category_id) {
                return Err(AppError::Conflict(
                    "insert or update on table \"tasks\" violates foreign key constraint".to_string(),
                ));
            }
        }

        let stored = tables
            .tasks
            .iter_mut()
            .find(|t| t.id == task.id)
            .ok_or(AppError::NotFound)?;
        *stored = Task {
            created_at: stored.created_at,
            updated_at: Utc::now(),
            ..task.clone()
        };
        Ok(stored.clone())
    }

    async fn delete_task(&self, id: Uuid) -> Result<(), AppError> {
        self.tables()?.tasks.retain(|t| t.id != id);
        Ok(())
    }

    async fn get_task_by_id(&self, id: Uuid) -> Result<Task, AppError> {
        self.tables()?
            .tasks
            .iter()
            .find(|t| t.id == id)
            .cloned()
            .ok_or(AppError::NotFound)
    }

    async fn list_tasks(&self) -> Result<Vec<Task>, AppError> {
        Ok(self.tables()?.tasks.clone())
    }

    async fn get_task_category(&self, id: Uuid) -> Result<Vec<TaskCategory>, AppError> {
        let tables = self.tables()?;
        let rows = tables
            .tasks
            .iter()
            .filter(|t| t.id == id)
            .filter_map(|t| {
                let category = tables.categories.iter().find(|c| Some(c.id) == t.category_id)?;
                Some(TaskCategory {
                    id: t.id,
                    title: t.title.clone(),
                    category: category.name.clone(),
                })
            })
            .collect();
        Ok(rows)
    }

    async fn list_task_categories(&self) -> Result<Vec<TaskCategoryDetail>, AppError> {
        let tables = self.tables()?;
        let rows = tables
            .tasks
            .iter()
            .filter_map(|t| {
                let category = tables.categories.iter().find(|c| Some(c.id) == t.category_id)?;
                Some(TaskCategoryDetail {
                    id: t.id,
                    title: t.title.clone(),
                    deadline: t.deadline,
                    priority: t.priority,
                    status: t.status.clone(),
                    category: category.name.clone(),
                })
            })
            .collect();
        Ok(rows)
    }
}

#[async_trait]
impl UserRepository for MemoryStore {
    async fn create_user(&self, user: &NewUser) -> Result<User, AppError> {
        let mut tables = self.tables()?;
        if tables.users.iter().any(|u| u.email == user.email) {
            return Err(AppError::Conflict(format!("user {} already exists", user.email)));
        }

        let rec = User {
            id: Uuid::new_v4(),
            fullname: user.fullname.clone(),
            email: user.email.clone(),
            password_hash: user.password_hash.clone(),
            created_at: Utc::now(),
        };
        tables.users.push(rec.clone());
        Ok(rec)
    }

    async fn get_user_by_email(&self, email: &str) -> Result<Option<User>, AppError> {
        Ok(self.tables()?.users.iter().find(|u| u.email == email).cloned())
    }
}
