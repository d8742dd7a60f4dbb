use std::sync::Arc;

use collegium_app::app::api::routes;
use collegium_app::config::ConfigHandler;
use collegium_app::store_handler::CalendarStoreHandler;
use collegium_core::config::load_config;
use collegium_db::db::connection::create_pool;
use collegium_db::db::migrate::run_pending_migrations;
use collegium_service::calendar::PgCalendarStore;
use salvo::conn::TcpListener;
use salvo::logging::Logger;
use salvo::{Listener, Router};
use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, reload, util::SubscriberInitExt};

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

    tracing::info!("Starting Collegium calendar server");

    let config = load_config()?;

    tracing::info!(calendar = ?config.calendar, server = ?config.server, "Configuration loaded");

    if let Ok(filter) = EnvFilter::try_new(config.logging.level.as_str()) {
        if let Err(e) = filter_handle.modify(|current| *current = filter) {
            tracing::warn!(error = %e, "Failed to update log filter from config");
        }
    } else {
        tracing::warn!(level = %config.logging.level, "Invalid log level in config, keeping debug");
    }

    // Fail fast on a bad zone instead of on every request
    config.calendar.zone()?;

    if config.database.run_migrations {
        run_pending_migrations(&config.database.url).await?;
    }

    let pool = create_pool(
        &config.database.url,
        u32::from(config.database.max_connections),
    )
    .await?;

    tracing::info!("Database connection pool created.");

    let store = Arc::new(PgCalendarStore::new(Arc::new(pool)));

    let bind_addr = config.server.bind_address();
    let acceptor = TcpListener::new(bind_addr.clone()).bind().await;

    let router = Router::new()
        .hoop(Logger::new())
        .hoop(ConfigHandler {
            settings: config.clone(),
        })
        .hoop(CalendarStoreHandler { store })
        .push(routes());

    tracing::info!("Server listening on {bind_addr}");

    salvo::Server::new(acceptor).serve(router).await;

    Ok(())
}
