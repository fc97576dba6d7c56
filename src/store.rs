use sqlx::postgres::PgPoolOptions;
use sqlx::PgPool;

use crate::routes::categories::queries::CategoryRepository;
use crate::routes::tasks::queries::TaskRepository;
use crate::routes::users::queries::UserRepository;

/// Everything the handlers need from persistence.
pub trait Store: CategoryRepository + TaskRepository + UserRepository {}

impl<T> Store for T where T: CategoryRepository + TaskRepository + UserRepository {}

#[derive(Clone)]
pub struct PostgresStore {
    pub pool: PgPool,
}

impl PostgresStore {
    pub async fn connect(database_url: &str, max_connections: u32) -> Result<Self, sqlx::Error> {
        let pool = PgPoolOptions::new()
            .max_connections(max_connections)
            .connect(database_url)
            .await?;

        Ok(Self { pool })
    }

    pub async fn migrate(&self) -> Result<(), sqlx::migrate::MigrateError> {
        sqlx::migrate!("./migrations").run(&self.pool).await
    }
}
