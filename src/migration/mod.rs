use sea_orm_migration::prelude::*;

mod m20250101_000001_create_posts_table;
mod m20250101_000002_add_pinned_column;
mod m20250101_000003_add_resolved_column;

pub struct Migrator;

#[async_trait::async_trait]
impl MigratorTrait for Migrator {
    fn migrations() -> Vec<Box<dyn MigrationTrait>> {
        vec![
            Box::new(m20250101_000001_create_posts_table::Migration),
            Box::new(m20250101_000002_add_pinned_column::Migration),
            Box::new(m20250101_000003_add_resolved_column::Migration),
        ]
    }
}

const POSTS_TABLE: &str = "posts";

/// Add a `BOOLEAN NOT NULL DEFAULT FALSE` flag to `posts`. Existing rows get
/// `false`; if the column is already there (e.g. a database upgraded by hand)
/// this is a no-op.
async fn add_flag_column(manager: &SchemaManager<'_>, column: &str) -> Result<(), DbErr> {
    if manager.has_column(POSTS_TABLE, column).await? {
        tracing::info!("Column '{}' already exists, skipping", column);
        return Ok(());
    }

    manager
        .alter_table(
            Table::alter()
                .table(Alias::new(POSTS_TABLE))
                .add_column(
                    ColumnDef::new(Alias::new(column))
                        .boolean()
                        .not_null()
                        .default(false),
                )
                .to_owned(),
        )
        .await?;

    tracing::info!("Column '{}' added to {}", column, POSTS_TABLE);
    Ok(())
}

async fn drop_flag_column(manager: &SchemaManager<'_>, column: &str) -> Result<(), DbErr> {
    if !manager.has_column(POSTS_TABLE, column).await? {
        return Ok(());
    }

    manager
        .get_connection()
        .execute_unprepared(&format!("ALTER TABLE {POSTS_TABLE} DROP COLUMN {column}"))
        .await?;

    Ok(())
}
