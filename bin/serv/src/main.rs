use axum::{Router, middleware, routing::get};
use lq_api::{config::ApiConfig, metrics, state::ApiState, tracing as api_tracing};
use tower_http::{cors::CorsLayer, trace::TraceLayer};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load configuration from environment variables
    dotenvy::dotenv().ok();
    let config = ApiConfig::from_env()?;

    api_tracing::init_tracing(&config.env);
    let metrics_handle = metrics::init_metrics()?;

    let bind_addr = config.bind_addr.clone();

    // Initialize the application state (pool + migrations)
    let state = ApiState::new(config).await?;

    let metrics_routes = Router::new()
        .route("/metrics", get(metrics::metrics_handler))
        .with_state(metrics_handle);

    let app = lq_api::router::router()
        .with_state(state)
        .merge(metrics_routes)
        .layer(middleware::from_fn(metrics::track_metrics))
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::very_permissive());

    let listener = tokio::net::TcpListener::bind(&bind_addr).await?;
    tracing::info!("Server running on http://{bind_addr}");
    axum::serve(listener, app).await?;

    Ok(())
}
