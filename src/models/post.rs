use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize, ToSchema)]
#[sea_orm(table_name = "posts")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    #[sea_orm(column_type = "Text")]
    pub title: String,
    #[sea_orm(column_type = "Text")]
    pub question_body: String,
    #[sea_orm(column_type = "Text", nullable)]
    pub ai_response: Option<String>,
    pub upvotes: i32,
    pub downvotes: i32,
    pub created_at: DateTime,
    #[sea_orm(column_type = "Text")]
    pub topic: String,
    pub is_pinned: bool,
    pub is_resolved: bool,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}
