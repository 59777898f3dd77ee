use std::net::SocketAddr;
use std::sync::Arc;

use anyhow::Result;
use axum::{response::Json, routing::get, Router};
use dotenvy::dotenv;
use serde_json::json;
use tokio::signal;
use tower_http::trace::TraceLayer;
use tracing::{error, info};

use membership_registry::clients::calendar_client::CalendarClient;
use membership_registry::clients::url_shortener_client::UrlShortenerClient;
use membership_registry::config::environment::EnvironmentConfig;
use membership_registry::database;
use membership_registry::middleware::cors::{cors_middleware, cors_middleware_with_origins};
use membership_registry::routes;
use membership_registry::state::AppState;

#[tokio::main]
async fn main() -> Result<()> {
    dotenv().ok();

    tracing_subscriber::fmt()
        .with_max_level(tracing::Level::DEBUG)
        .init();

    info!("🐕 Membership Registry - company rules service");
    info!("==============================================");

    let config = EnvironmentConfig::from_env();

    let pool = match database::create_pool(None).await {
        Ok(pool) => pool,
        Err(e) => {
            error!("❌ Database connection failed: {}", e);
            return Err(anyhow::anyhow!("Database error: {}", e));
        }
    };

    let event_importer = Arc::new(CalendarClient::new(config.calendar_api_url.clone()));
    let url_shortener = Arc::new(UrlShortenerClient::new(config.url_shortener_api_url.clone()));

    let app_state = AppState::new(pool, config.clone(), event_importer, url_shortener);

    let cors = if config.cors_origins.is_empty() {
        cors_middleware()
    } else {
        cors_middleware_with_origins(config.cors_origins.clone())
    };

    let app = Router::new()
        .route("/health", get(health_endpoint))
        .nest("/api/company", routes::company_routes::create_company_router())
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .with_state(app_state);

    let addr: SocketAddr = format!("{}:{}", config.host, config.port).parse()?;

    info!("🌐 Server starting on http://{}", addr);
    info!("Available endpoints:");
    info!("   GET    /health - Health check");
    info!("   POST   /api/company/register - Register company");
    info!("   GET    /api/company - Publicly searchable companies");
    info!("   GET    /api/company/:id - Company with derived rule state");
    info!("   PUT    /api/company/:id - Update company");
    info!("   DELETE /api/company/:id - Destroy company (guarded)");
    info!("   GET    /api/company/:id/main-address - Resolved mailing address");
    info!("   POST   /api/company/:id/short-brand-url - Memoized short URL");
    info!("   POST   /api/company/:id/sync-events - Re-import calendar events");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .map_err(|e| {
            error!("❌ Server error: {}", e);
            anyhow::anyhow!(e)
        })?;

    info!("👋 Server stopped");
    Ok(())
}

/// Liveness endpoint
async fn health_endpoint() -> Json<serde_json::Value> {
    Json(json!({
        "service": "membership-registry",
        "status": "healthy",
        "timestamp": chrono::Utc::now().to_rfc3339(),
    }))
}

/// Graceful shutdown signal
async fn shutdown_signal() {
    let ctrl_c = async {
        signal::ctrl_c()
            .await
            .expect("failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        signal::unix::signal(signal::unix::SignalKind::terminate())
            .expect("failed to install signal handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {
            info!("🛑 Ctrl+C received, shutting down...");
        },
        _ = terminate => {
            info!("🛑 Termination signal received, shutting down...");
        },
    }
}
