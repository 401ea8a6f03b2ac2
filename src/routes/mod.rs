use crate::handlers;
use axum::{routing, Router};

pub fn create_routes() -> Router {
    Router::new()
        .merge(page_routes())
        .merge(post_action_routes())
        .route("/health", routing::get(handlers::health::health_check))
}

/// HTML pages and the ask form.
fn page_routes() -> Router {
    Router::new()
        .route("/", routing::get(handlers::board::index))
        .route("/search", routing::get(handlers::board::search))
        .route("/add_post", routing::post(handlers::board::add_post))
}

/// JSON mutation endpoints used by the board's buttons.
fn post_action_routes() -> Router {
    Router::new()
        .route("/vote/up/{id}", routing::post(handlers::vote::upvote))
        .route("/vote/down/{id}", routing::post(handlers::vote::downvote))
        .route("/pin/{id}", routing::post(handlers::post::toggle_pin))
        .route("/resolve/{id}", routing::post(handlers::post::toggle_resolved))
        .route("/delete/{id}", routing::post(handlers::post::delete_post))
}
