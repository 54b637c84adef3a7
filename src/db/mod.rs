use anyhow::Result;
use sea_orm::{ConnectOptions, ConnectionTrait, Database, DatabaseConnection, Statement};
use std::path::Path;
use std::time::Duration;
use tracing::info;

use crate::models::{Film, FilmInput};

pub mod migrator;
pub mod repositories;

/// Thin data-access shim over the store connection. One route handler maps
/// to one query; every operation here is a single read or a single write.
#[derive(Clone)]
pub struct Store {
    pub conn: DatabaseConnection,
}

impl Store {
    pub async fn with_pool_options(
        db_url: &str,
        max_connections: u32,
        min_connections: u32,
    ) -> Result<Self> {
        use sea_orm_migration::MigratorTrait;

        if !db_url.contains(":memory:") {
            let path_str = db_url.trim_start_matches("sqlite:");
            if let Some(parent) = Path::new(path_str).parent() {
                tokio::fs::create_dir_all(parent).await.ok();
            }
            if !Path::new(path_str).exists() {
                std::fs::File::create(path_str)?;
            }
        }

        let mut opt = ConnectOptions::new(db_url.to_string());
        opt.max_connections(max_connections)
            .min_connections(min_connections)
            .connect_timeout(Duration::from_secs(10))
            .acquire_timeout(Duration::from_secs(10))
            .idle_timeout(Duration::from_secs(300))
            .max_lifetime(Duration::from_secs(600))
            .sqlx_logging(false);

        let conn = Database::connect(opt).await?;

        migrator::Migrator::up(&conn, None).await?;

        info!(
            "Database connected & migrations applied (pool: {}-{})",
            min_connections, max_connections
        );

        Ok(Self { conn })
    }

    pub async fn ping(&self) -> Result<()> {
        let backend = self.conn.get_database_backend();
        self.conn
            .query_one(Statement::from_string(backend, "SELECT 1".to_string()))
            .await?;
        Ok(())
    }

    fn film_repo(&self) -> repositories::film::FilmRepository {
        repositories::film::FilmRepository::new(self.conn.clone())
    }

    pub async fn list_films(&self) -> Result<Vec<Film>> {
        self.film_repo().list().await
    }

    pub async fn get_film_by_title(&self, title: &str) -> Result<Option<Film>> {
        self.film_repo().get_by_title(title).await
    }

    /// Flip the `seen` flag of the film with the given id. `None` when the
    /// id does not exist.
    pub async fn toggle_seen(&self, id: i32) -> Result<Option<Film>> {
        self.film_repo().toggle_seen(id).await
    }

    pub async fn add_film(&self, input: &FilmInput) -> Result<i32> {
        self.film_repo().add(input).await
    }

    pub async fn count_films(&self) -> Result<u64> {
        self.film_repo().count().await
    }
}
