use std::sync::Arc;

use crate::routes::middleware_auth::SessionKeys;
use crate::store::Store;

#[derive(Clone)]
pub struct AppState {
    pub store: Arc<dyn Store>,
    pub keys: SessionKeys,
}

impl AppState {
    pub fn new(store: Arc<dyn Store>, jwt_secret: &str) -> Self {
        Self {
            store,
            keys: SessionKeys::new(jwt_secret),
        }
    }
}
