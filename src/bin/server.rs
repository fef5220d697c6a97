use anyhow::Context;
use axum::{http::HeaderValue, routing::get};
use bantay_alert_server::{
    app::{self, AppContext},
    auth::TokenKeys,
    config::AppConfig,
    events::EventHub,
    migrator,
    seed::{SeedOptions, Seeder},
};
use sea_orm::Database;
use sea_orm_migration::MigratorTrait;
use std::{net::SocketAddr, sync::Arc};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = AppConfig::load()?;

    bantay_alert_server::telemetry::init_telemetry("bantay-alert-server")?;

    let (prometheus_layer, metric_handle): (_, metrics_exporter_prometheus::PrometheusHandle) =
        axum_prometheus::PrometheusMetricLayer::pair();

    let db = Database::connect(&config.database_url)
        .await
        .context("Failed to connect to database")?;

    migrator::Migrator::up(&db, None)
        .await
        .context("Failed to run migrations")?;

    let seeder = Arc::new(Seeder::new(SeedOptions {
        department_password: config.department_seed_password.clone(),
        demo_data: config.seed_demo_data,
    }));
    // A failed seed is retried on the next start; the API still serves.
    if let Err(e) = seeder.ensure_seeded(&db).await {
        tracing::error!("Seeding failed: {}", e);
    }

    bantay_alert_server::metrics::init_metrics(&db).await;

    let cors_origin = config
        .cors_origin
        .parse::<HeaderValue>()
        .with_context(|| format!("Invalid CORS_ORIGIN '{}'", config.cors_origin))?;

    let ctx = AppContext {
        db: Arc::new(db),
        keys: Arc::new(TokenKeys::new(
            config.jwt_secret.as_bytes(),
            config.token_ttl_hours,
        )),
        hub: EventHub::default(),
        seeder,
        cors_origin,
    };

    let app = app::router(ctx)
        .layer(prometheus_layer)
        .route("/metrics", get(|| async move { metric_handle.render() }));

    let addr = SocketAddr::from(([0, 0, 0, 0], config.port));
    tracing::info!("listening on {}", addr);
    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .with_context(|| format!("Failed to bind {addr}"))?;
    axum::serve(listener, app).await?;
    Ok(())
}
