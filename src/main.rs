use axum::{extract::Extension, middleware, Router};
use classboard::config::{self, AppConfig};
use classboard::migration::Migrator;
use classboard::services::answer::AnswerGenerator;
use classboard::services::post::PostService;
use classboard::services::seed::seed_sample_posts;
use sea_orm_migration::MigratorTrait;
use tower_http::trace::TraceLayer;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

#[derive(OpenApi)]
#[openapi(
    paths(
        classboard::handlers::health::health_check,
        // Vote routes
        classboard::handlers::vote::upvote,
        classboard::handlers::vote::downvote,
        // Post routes
        classboard::handlers::post::toggle_pin,
        classboard::handlers::post::toggle_resolved,
        classboard::handlers::post::delete_post,
    ),
    components(
        schemas(
            classboard::error::AppError,
            classboard::response::MessageBody,
            classboard::services::post::VoteCounts,
            classboard::handlers::post::PinResponse,
            classboard::handlers::post::ResolveResponse,
        )
    ),
    tags(
        (name = "health", description = "Service status"),
        (name = "votes", description = "Voting operations"),
        (name = "posts", description = "Pin, resolve and delete operations"),
    )
)]
struct ApiDoc;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenv::dotenv().ok();

    let config = AppConfig::from_env();
    init_tracing(config.json_logs);

    let migrate_only = std::env::args().nth(1).as_deref() == Some("migrate");

    tracing::info!(
        "Starting Class Discussion Board v{}...",
        env!("CARGO_PKG_VERSION")
    );

    let db = config::database::connect(&config.database).await?;
    tracing::info!("Database connected successfully");

    Migrator::up(&db, None).await?;
    tracing::info!("Database migrations applied successfully");

    if migrate_only {
        return Ok(());
    }

    if config.seed_sample_data {
        seed_sample_posts(&PostService::new(db.clone())).await?;
    }

    let generator = AnswerGenerator::new(&config.gemini)?;
    if generator.is_configured() {
        tracing::info!(model = %config.gemini.model, "Gemini API configured");
    } else {
        tracing::error!("GEMINI_API_KEY not set, AI answers will use the fallback text");
    }

    let app = create_app()
        .layer(Extension(db))
        .layer(Extension(generator));

    let addr = config.server.addr();
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    tracing::info!("Listening on http://{}", addr);
    tracing::info!("Swagger UI available at http://{}/swagger-ui/", addr);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    tracing::info!("Server shut down gracefully");
    Ok(())
}

fn init_tracing(json: bool) {
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| "classboard=debug,tower_http=debug".into());

    let registry = tracing_subscriber::registry().with(filter);
    if json {
        registry.with(tracing_subscriber::fmt::layer().json()).init();
    } else {
        registry.with(tracing_subscriber::fmt::layer()).init();
    }
}

fn create_app() -> Router {
    Router::new()
        .merge(classboard::routes::create_routes())
        .merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", ApiDoc::openapi()))
        .layer(middleware::from_fn(
            classboard::middleware::security::security_headers_middleware,
        ))
        .layer(TraceLayer::new_for_http())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!("Failed to install CTRL+C signal handler: {}", e);
        std::future::pending::<()>().await;
    }
    tracing::info!("Shutdown signal received, gracefully shutting down...");
}
