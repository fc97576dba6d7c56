use serde::Deserialize;

/// Body for both create and full-overwrite update.
#[derive(Debug, Clone, Deserialize)]
pub struct CategoryRequest {
    pub name: String,
}
