use sea_orm_migration::prelude::*;

use super::{add_flag_column, drop_flag_column};

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        add_flag_column(manager, "is_resolved").await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        drop_flag_column(manager, "is_resolved").await
    }
}
