use salvo::conn::TcpListener;
use salvo::logging::Logger;
use salvo::{Listener, Router, Service};
use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, reload, util::SubscriberInitExt};

use calendar_app::app::api::routes;
use calendar_app::services_handler::ServicesHandler;
use calendar_core::config::load_config;
use calendar_db::db::connection::create_pool;
use calendar_db::db::setup::run_migrations;
use calendar_service::Services;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let (filter_layer, filter_handle) = reload::Layer::new(EnvFilter::new("debug"));

    tracing_subscriber::registry()
        .with(filter_layer)
        .with(
            fmt::layer()
                .with_target(true)
                .with_thread_ids(true)
                .with_file(true)
                .with_line_number(true),
        )
        .init();

    tracing::info!("Starting calendar API server");

    let config = load_config()?;

    tracing::info!(config = ?config, "Configuration loaded");

    if let Ok(filter) = EnvFilter::try_new(config.logging.level.as_str()) {
        if let Err(e) = filter_handle.modify(|current| *current = filter) {
            tracing::warn!(error = %e, "Failed to update log filter from config");
        }
    } else {
        tracing::warn!(level = %config.logging.level, "Invalid log level in config, keeping debug");
    }

    let pool = create_pool(&config.database).await?;

    tracing::info!("Database connection pool created.");

    run_migrations(&config.database.url()?).await?;

    let bind_addr = config.server.bind_addr();
    let acceptor = TcpListener::new(bind_addr.clone()).bind().await;

    let router = Router::new()
        .hoop(ServicesHandler {
            services: Services::postgres(pool),
        })
        .push(routes());

    tracing::info!(
        service = %config.service.name,
        env = %config.service.env,
        "Server listening on {bind_addr}"
    );

    salvo::Server::new(acceptor)
        .serve(Service::new(router).hoop(Logger::new()))
        .await;

    Ok(())
}
