use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, sqlx::FromRow)]
pub struct Task {
    pub id: Uuid,
    pub title: String,
    pub deadline: NaiveDate,
    pub priority: i32,
    pub status: String,
    /// `None` once the owning category has been deleted.
    pub category_id: Option<Uuid>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Flattened row of the task/category inner join.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, sqlx::FromRow)]
pub struct TaskCategory {
    pub id: Uuid,
    pub title: String,
    pub category: String,
}

/// Task fields alongside the name of the category they belong to.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, sqlx::FromRow)]
pub struct TaskCategoryDetail {
    pub id: Uuid,
    pub title: String,
    pub deadline: NaiveDate,
    pub priority: i32,
    pub status: String,
    pub category: String,
}
