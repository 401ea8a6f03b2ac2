use crate::error::AppResult;
use crate::response::ApiResponse;
use crate::services::post::{PostService, VoteCounts};
use axum::{extract::Path, response::IntoResponse, Extension};
use sea_orm::DatabaseConnection;

#[utoipa::path(
    post,
    path = "/vote/up/{id}",
    params(("id" = i32, Path, description = "Post ID")),
    responses(
        (status = 200, description = "Upvote recorded, current counters", body = VoteCounts),
        (status = 404, description = "Post not found", body = crate::error::AppError),
    ),
    tag = "votes"
)]
pub async fn upvote(
    Extension(db): Extension<DatabaseConnection>,
    Path(id): Path<i32>,
) -> AppResult<impl IntoResponse> {
    let counts = PostService::new(db).upvote(id).await?;
    Ok(ApiResponse::ok(counts))
}

#[utoipa::path(
    post,
    path = "/vote/down/{id}",
    params(("id" = i32, Path, description = "Post ID")),
    responses(
        (status = 200, description = "Downvote recorded, current counters", body = VoteCounts),
        (status = 404, description = "Post not found", body = crate::error::AppError),
    ),
    tag = "votes"
)]
pub async fn downvote(
    Extension(db): Extension<DatabaseConnection>,
    Path(id): Path<i32>,
) -> AppResult<impl IntoResponse> {
    let counts = PostService::new(db).downvote(id).await?;
    Ok(ApiResponse::ok(counts))
}
