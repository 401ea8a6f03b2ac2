use crate::error::AppResult;
use crate::response::{ApiResponse, MessageBody};
use crate::services::post::PostService;
use axum::{extract::Path, response::IntoResponse, Extension};
use sea_orm::DatabaseConnection;
use serde::Serialize;
use utoipa::ToSchema;

#[derive(Debug, Serialize, ToSchema)]
pub struct PinResponse {
    /// Pin state after the toggle
    pub is_pinned: bool,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct ResolveResponse {
    /// Resolved state after the toggle
    pub is_resolved: bool,
}

#[utoipa::path(
    post,
    path = "/pin/{id}",
    params(("id" = i32, Path, description = "Post ID")),
    responses(
        (status = 200, description = "Pin toggled", body = PinResponse),
        (status = 404, description = "Post not found", body = crate::error::AppError),
    ),
    tag = "posts"
)]
pub async fn toggle_pin(
    Extension(db): Extension<DatabaseConnection>,
    Path(id): Path<i32>,
) -> AppResult<impl IntoResponse> {
    let is_pinned = PostService::new(db).toggle_pin(id).await?;
    tracing::info!(post_id = id, is_pinned, "Pin toggled");
    Ok(ApiResponse::ok(PinResponse { is_pinned }))
}

#[utoipa::path(
    post,
    path = "/resolve/{id}",
    params(("id" = i32, Path, description = "Post ID")),
    responses(
        (status = 200, description = "Resolved flag toggled", body = ResolveResponse),
        (status = 404, description = "Post not found", body = crate::error::AppError),
    ),
    tag = "posts"
)]
pub async fn toggle_resolved(
    Extension(db): Extension<DatabaseConnection>,
    Path(id): Path<i32>,
) -> AppResult<impl IntoResponse> {
    let is_resolved = PostService::new(db).toggle_resolved(id).await?;
    tracing::info!(post_id = id, is_resolved, "Resolved toggled");
    Ok(ApiResponse::ok(ResolveResponse { is_resolved }))
}

#[utoipa::path(
    post,
    path = "/delete/{id}",
    params(("id" = i32, Path, description = "Post ID")),
    responses(
        (status = 200, description = "Post deleted", body = MessageBody),
        (status = 404, description = "Post not found", body = crate::error::AppError),
    ),
    tag = "posts"
)]
pub async fn delete_post(
    Extension(db): Extension<DatabaseConnection>,
    Path(id): Path<i32>,
) -> AppResult<impl IntoResponse> {
    PostService::new(db).delete(id).await?;
    tracing::info!(post_id = id, "Post deleted");
    Ok(ApiResponse::ok(MessageBody {
        message: "Post deleted".to_string(),
    }))
}
