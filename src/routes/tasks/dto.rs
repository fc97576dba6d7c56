use chrono::NaiveDate;
use serde::Deserialize;
use uuid::Uuid;

use super::model::Task;

#[derive(Debug, Clone, Deserialize)]
pub struct CreateTask {
    pub title: String,
    pub deadline: NaiveDate,
    pub priority: i32,
    pub status: String,
    pub category_id: Uuid,
}

/// Fields an update overwrites. The title is left as stored.
#[derive(Debug, Clone, Deserialize)]
pub struct UpdateTask {
    pub deadline: NaiveDate,
    pub priority: i32,
    pub status: String,
    pub category_id: Uuid,
}

impl UpdateTask {
    pub fn apply_to(self, task: &mut Task) {
        task.deadline = self.deadline;
        task.priority = self.priority;
        task.status = self.status;
        task.category_id = Some(self.category_id);
    }
}
