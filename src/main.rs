use std::net::SocketAddr;

use axum::middleware::from_fn_with_state;
use distill::{
    api::{self, dtos, handlers},
    app_state::AppState,
    config::Config,
    health,
    middleware::rate_limit::{RateLimit, rate_limit_middleware},
};
use tower_http::{
    cors::CorsLayer,
    request_id::{MakeRequestUuid, SetRequestIdLayer},
    trace::TraceLayer,
};
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

const RATE_LIMIT_MAX_REQUESTS: u32 = 60;
const RATE_LIMIT_WINDOW_SECONDS: i64 = 60;

#[derive(OpenApi)]
#[openapi(
    paths(handlers::extract_content, health::health_check),
    components(schemas(
        dtos::ExtractRequest,
        dtos::SummaryResponse,
        dtos::ErrorResponse,
        health::HealthResponse
    )),
    tags(
        (name = "extract", description = "Content extraction and summarization"),
        (name = "health", description = "Liveness")
    )
)]
struct ApiDoc;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::registry()
        .with(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "distill=info,tower_http=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = Config::from_env()?;
    let state = AppState::new(&config);
    let rate_limit = RateLimit::new(RATE_LIMIT_MAX_REQUESTS, RATE_LIMIT_WINDOW_SECONDS);

    let app = api::router(state)
        .merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", ApiDoc::openapi()))
        .layer(from_fn_with_state(rate_limit, rate_limit_middleware))
        // Unrestricted cross-origin access; tightening this is a deployment
        // concern, not core behavior.
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http())
        .layer(SetRequestIdLayer::x_request_id(MakeRequestUuid));

    let listener = tokio::net::TcpListener::bind(config.bind_addr()).await?;
    tracing::info!(addr = %config.bind_addr(), "listening");
    axum::serve(
        listener,
        app.into_make_service_with_connect_info::<SocketAddr>(),
    )
    .with_graceful_shutdown(shutdown_signal())
    .await?;

    Ok(())
}

async fn shutdown_signal() {
    tokio::signal::ctrl_c()
        .await
        .expect("Failed to install ctrl-c handler");
    tracing::info!("shutdown signal received");
}
