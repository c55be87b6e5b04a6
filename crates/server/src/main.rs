use case_service::{config::ServiceConfig, db, health, openapi, telemetry};
use tower_http::request_id::{MakeRequestUuid, PropagateRequestIdLayer, SetRequestIdLayer};
use tower_http::trace::TraceLayer;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("info,sqlx=warn,tower_http=info")),
        )
        .init();

    let config = ServiceConfig::from_env()?;
    tracing::info!(
        bind = %config.bind_addr,
        max_connections = config.max_connections,
        features = ?config.features,
        "configuration loaded"
    );

    let tracer_provider = if config.features.telemetry {
        telemetry::init_telemetry()
    } else {
        None
    };

    health::mark_started();

    let pool = db::create_pool(&config)?;
    db::run_migrations(&pool).await?;

    let mut router = openapi::api_router(db::AppState { pool: pool.clone() }, &config.features);
    if tracer_provider.is_some() {
        router = router.layer(telemetry::OtelTraceLayer);
    }
    let router = router
        .layer(TraceLayer::new_for_http())
        .layer(PropagateRequestIdLayer::x_request_id())
        .layer(SetRequestIdLayer::x_request_id(MakeRequestUuid));

    let listener = tokio::net::TcpListener::bind(config.bind_addr).await?;
    tracing::info!(addr = %config.bind_addr, "case service listening");

    axum::serve(listener, router)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    pool.close().await;
    if let Some(provider) = tracer_provider {
        if let Err(e) = provider.shutdown() {
            tracing::warn!(error = %e, "tracer provider shutdown failed");
        }
    }
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!(error = %e, "failed to listen for shutdown signal");
        std::future::pending::<()>().await;
    }
    tracing::info!("shutdown signal received");
}
