use crate::entities::prelude::*;
use sea_orm_migration::prelude::*;
use sea_orm_migration::sea_orm::Schema;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        let backend = manager.get_database_backend();
        let schema = Schema::new(backend);

        manager
            .create_table(
                schema
                    .create_table_from_entity(Films)
                    .if_not_exists()
                    .to_owned(),
            )
            .await?;

        // Listing sorts by rank; keep it indexed
        manager
            .create_index(
                Index::create()
                    .name("idx_films_rank")
                    .table(Films)
                    .col(crate::entities::films::Column::Rank)
                    .if_not_exists()
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Films).to_owned())
            .await?;

        Ok(())
    }
}
