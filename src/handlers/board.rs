use crate::error::{AppError, AppResult};
use crate::services::answer::{AnswerGenerator, FALLBACK_RESPONSE};
use crate::services::post::PostService;
use crate::utils::render_board;
use axum::{
    extract::{Form, Query},
    response::{Html, IntoResponse, Redirect, Response},
    Extension,
};
use sea_orm::DatabaseConnection;
use serde::Deserialize;
use validator::Validate;

#[derive(Debug, Deserialize, Validate)]
pub struct CreatePostForm {
    #[serde(default)]
    #[validate(length(min = 1, message = "title is required"))]
    pub title: String,
    #[serde(default)]
    #[validate(length(min = 1, message = "topic is required"))]
    pub topic: String,
    #[serde(default)]
    #[validate(length(min = 1, message = "question_body is required"))]
    pub question_body: String,
}

#[derive(Debug, Deserialize)]
pub struct SearchQuery {
    pub query: Option<String>,
}

pub async fn index(Extension(db): Extension<DatabaseConnection>) -> AppResult<Html<String>> {
    let posts = PostService::new(db).list_all().await?;
    Ok(Html(render_board(&posts, None)))
}

pub async fn search(
    Extension(db): Extension<DatabaseConnection>,
    Query(params): Query<SearchQuery>,
) -> AppResult<Response> {
    let query = match params.query.as_deref() {
        Some(q) if !q.trim().is_empty() => q,
        _ => return Ok(Redirect::to("/").into_response()),
    };

    let posts = PostService::new(db).search(query).await?;
    tracing::debug!(query, results = posts.len(), "Search served");
    Ok(Html(render_board(&posts, Some(query))).into_response())
}

/// Ask a question: draft an AI answer, store the post, back to the board.
/// A failed generation stores the fallback text instead.
pub async fn add_post(
    Extension(db): Extension<DatabaseConnection>,
    Extension(generator): Extension<AnswerGenerator>,
    Form(form): Form<CreatePostForm>,
) -> AppResult<Redirect> {
    form.validate()
        .map_err(|e| AppError::Validation(e.to_string()))?;
    PostService::validate_fields(&form.title, &form.question_body, &form.topic)?;

    let ai_response = match generator.generate(&form.title, &form.question_body).await {
        Ok(text) => text,
        Err(e) => {
            tracing::warn!("AI answer generation failed, storing fallback: {}", e);
            FALLBACK_RESPONSE.to_string()
        }
    };

    let post = PostService::new(db)
        .create(
            &form.title,
            &form.question_body,
            Some(&ai_response),
            &form.topic,
        )
        .await?;
    tracing::info!(post_id = post.id, topic = %post.topic, "Question posted");

    Ok(Redirect::to("/"))
}
