#![allow(dead_code)]

use axum::{http::HeaderMap, http::StatusCode, routing, Json, Router};
use classboard::config::{DatabaseConfig, GeminiConfig};
use classboard::migration::Migrator;
use classboard::models::PostModel;
use classboard::services::answer::AnswerGenerator;
use classboard::services::post::PostService;
use reqwest::Client;
use sea_orm::DatabaseConnection;
use sea_orm_migration::MigratorTrait;
use serde_json::Value;
use std::sync::{
    atomic::{AtomicUsize, Ordering},
    Arc, Mutex,
};
use std::time::Duration;

static DB_COUNTER: AtomicUsize = AtomicUsize::new(0);

pub struct TestApp {
    pub addr: String,
    pub db: DatabaseConnection,
    pub client: Client,
}

impl TestApp {
    pub fn url(&self, path: &str) -> String {
        format!("{}{}", self.addr, path)
    }

    pub fn posts(&self) -> PostService {
        PostService::new(self.db.clone())
    }

    /// Insert a post directly through the store.
    pub async fn create_post(&self, title: &str, topic: &str, body: &str) -> PostModel {
        self.posts()
            .create(title, body, Some("Seeded answer"), topic)
            .await
            .expect("Failed to create post")
    }
}

/// A brand-new, empty SQLite database file (no migrations applied).
pub async fn empty_database() -> DatabaseConnection {
    let n = DB_COUNTER.fetch_add(1, Ordering::SeqCst);
    let path = std::env::temp_dir().join(format!(
        "classboard-test-{}-{}.db",
        std::process::id(),
        n
    ));
    let _ = std::fs::remove_file(&path);

    let config = DatabaseConfig {
        url: format!("sqlite://{}?mode=rwc", path.display()),
        max_connections: 5,
        min_connections: 1,
    };

    classboard::config::database::connect(&config)
        .await
        .expect("Failed to open test database")
}

/// A fresh database with the schema migrated.
pub async fn fresh_database() -> DatabaseConnection {
    let db = empty_database().await;
    Migrator::up(&db, None)
        .await
        .expect("Failed to run migrations");
    db
}

/// App whose answer generator has no API key, so every answer falls back.
pub async fn spawn_app() -> TestApp {
    spawn_app_with_gemini(GeminiConfig::default()).await
}

pub async fn spawn_app_with_gemini(gemini: GeminiConfig) -> TestApp {
    let db = fresh_database().await;
    let generator = AnswerGenerator::new(&gemini).expect("Failed to build answer generator");

    let app = Router::new()
        .merge(classboard::routes::create_routes())
        .layer(axum::middleware::from_fn(
            classboard::middleware::security::security_headers_middleware,
        ))
        .layer(axum::extract::Extension(db.clone()))
        .layer(axum::extract::Extension(generator));

    let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
        .await
        .expect("Failed to bind random port");
    let addr = listener.local_addr().unwrap();

    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });

    let client = Client::builder()
        .redirect(reqwest::redirect::Policy::none())
        .build()
        .unwrap();

    TestApp {
        addr: format!("http://{}", addr),
        db,
        client,
    }
}

/// What the fake Gemini endpoint saw: (api key header, request body).
pub type CapturedRequests = Arc<Mutex<Vec<(Option<String>, Value)>>>;

/// Serve `reply` with `status` for every generateContent call. Returns the
/// base URL to put in `GeminiConfig` and the captured requests.
pub async fn spawn_gemini_stub(status: StatusCode, reply: Value) -> (String, CapturedRequests) {
    spawn_slow_gemini_stub(status, reply, Duration::ZERO).await
}

/// Like [`spawn_gemini_stub`], but each reply is held back for `delay`.
pub async fn spawn_slow_gemini_stub(
    status: StatusCode,
    reply: Value,
    delay: Duration,
) -> (String, CapturedRequests) {
    let captured: CapturedRequests = Arc::new(Mutex::new(Vec::new()));
    let seen = captured.clone();

    let app = Router::new().route(
        "/v1beta/models/{call}",
        routing::post(move |headers: HeaderMap, Json(body): Json<Value>| {
            let seen = seen.clone();
            let reply = reply.clone();
            async move {
                let key = headers
                    .get("x-goog-api-key")
                    .and_then(|v| v.to_str().ok())
                    .map(str::to_string);
                seen.lock().unwrap().push((key, body));
                tokio::time::sleep(delay).await;
                (status, Json(reply))
            }
        }),
    );

    let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
        .await
        .expect("Failed to bind stub port");
    let addr = listener.local_addr().unwrap();

    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });

    (format!("http://{}", addr), captured)
}

pub fn gemini_config(base_url: &str) -> GeminiConfig {
    GeminiConfig {
        api_key: Some("test-key".to_string()),
        base_url: base_url.to_string(),
        timeout: Duration::from_secs(5),
        ..Default::default()
    }
}

pub fn gemini_reply(text: &str) -> Value {
    serde_json::json!({
        "candidates": [
            {"content": {"role": "model", "parts": [{"text": text}]}}
        ]
    })
}
