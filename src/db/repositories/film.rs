use crate::entities::{films, prelude::*};
use crate::models::{Film, FilmInput};
use anyhow::Result;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, PaginatorTrait, QueryFilter,
    QueryOrder, Set,
};
use tracing::info;

/// Repository for film record operations
pub struct FilmRepository {
    conn: DatabaseConnection,
}

impl FilmRepository {
    #[must_use]
    pub const fn new(conn: DatabaseConnection) -> Self {
        Self { conn }
    }

    /// Every record, ranked rows in ascending rank order. SQLite sorts NULL
    /// first on ASC, so rankless rows lead; insertion order (id) breaks ties.
    pub async fn list(&self) -> Result<Vec<Film>> {
        let rows = Films::find()
            .order_by_asc(films::Column::Rank)
            .order_by_asc(films::Column::Id)
            .all(&self.conn)
            .await?;

        Ok(rows.into_iter().map(Film::from).collect())
    }

    /// Exact-match title lookup. Titles are not unique; with multiple
    /// matches an arbitrary single row comes back.
    pub async fn get_by_title(&self, title: &str) -> Result<Option<Film>> {
        let row = Films::find()
            .filter(films::Column::Title.eq(title))
            .one(&self.conn)
            .await?;

        Ok(row.map(Film::from))
    }

    /// Read-then-write negation of `seen`. Concurrent toggles of the same
    /// row are last-write-wins; the store's per-row atomicity is the only
    /// guarantee.
    pub async fn toggle_seen(&self, id: i32) -> Result<Option<Film>> {
        let Some(row) = Films::find_by_id(id).one(&self.conn).await? else {
            return Ok(None);
        };

        let seen = !row.seen;
        let now = chrono::Utc::now().to_rfc3339();

        let mut active: films::ActiveModel = row.into();
        active.seen = Set(seen);
        active.updated_at = Set(now);
        let updated = active.update(&self.conn).await?;

        Ok(Some(Film::from(updated)))
    }

    pub async fn add(&self, input: &FilmInput) -> Result<i32> {
        let now = chrono::Utc::now().to_rfc3339();

        let active_model = films::ActiveModel {
            title: Set(input.title.clone()),
            year: Set(input.year),
            description: Set(input.description.clone()),
            metascore: Set(input.metascore),
            rank: Set(input.rank),
            seen: Set(input.seen),
            created_at: Set(now.clone()),
            updated_at: Set(now),
            ..Default::default()
        };

        let res = Films::insert(active_model).exec(&self.conn).await?;
        info!("Seeded film {}: {}", res.last_insert_id, input.title);
        Ok(res.last_insert_id)
    }

    pub async fn count(&self) -> Result<u64> {
        let count = Films::find().count(&self.conn).await?;
        Ok(count)
    }
}
