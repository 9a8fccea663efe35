//! Recepción server entry point.

use std::sync::Arc;

use tokio::net::TcpListener;
use tracing_subscriber::EnvFilter;

use recepcion::adapters::http::{app_router, AppPorts};
use recepcion::adapters::notifications;
use recepcion::adapters::postgres::{
    PostgresAccessLogRepository, PostgresBookingRepository, PostgresMembershipRepository,
};
use recepcion::adapters::receipts::LocalReceiptGenerator;
use recepcion::config::AppConfig;

#[tokio::main]
async fn main() {
    if let Err(err) = run().await {
        eprintln!("Startup error: {err}");
        std::process::exit(1);
    }
}

async fn run() -> Result<(), Box<dyn std::error::Error>> {
    let config = AppConfig::load()?;
    config.validate()?;
    init_tracing(&config);

    let pool = config.database.connect().await?;
    if config.database.run_migrations {
        sqlx::migrate!("./migrations").run(&pool).await?;
        tracing::info!("migrations applied");
    }

    let ports = AppPorts {
        memberships: Arc::new(PostgresMembershipRepository::new(pool.clone())),
        bookings: Arc::new(PostgresBookingRepository::new(pool.clone())),
        access_log: Arc::new(PostgresAccessLogRepository::new(pool)),
        receipts: Arc::new(LocalReceiptGenerator::new(
            config.receipts.output_dir.clone(),
            config.receipts.public_prefix.clone(),
        )),
        notifier: notifications::from_config(&config.notifications),
    };
    let app = app_router(ports, &config.server);

    let address = config.server.socket_addr()?;
    let listener = TcpListener::bind(address).await?;
    tracing::info!(%address, environment = ?config.server.environment, "server listening");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    tracing::info!("server stopped");
    Ok(())
}

fn init_tracing(config: &AppConfig) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(&config.server.log_level));
    let builder = tracing_subscriber::fmt().with_env_filter(filter);
    if config.is_production() {
        builder.json().init();
    } else {
        builder.init();
    }
}

async fn shutdown_signal() {
    if let Err(err) = tokio::signal::ctrl_c().await {
        tracing::error!(error = %err, "failed to listen for shutdown signal");
        std::future::pending::<()>().await;
    }
    tracing::info!("shutdown requested");
}
