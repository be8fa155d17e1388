use anyhow::Context;
use std::sync::Arc;
use tokio_util::sync::CancellationToken;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::EnvFilter;

// ri-utilizziamo le funzioni e strutture definite in lib.rs
use bacheca_server::directory::SqliteDirectory;
use bacheca_server::fetcher::HttpFetcher;
use bacheca_server::store::MessageStore;
use bacheca_server::{build_sqlite_url, connect_pool, routes, run_migrations, AppState, Config, MessageService};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = Config::from_env().context("load configuration")?;
    // Costruisci l'URL del database SQLite
    let db_url = build_sqlite_url(&config.database_url).context("build sqlite DATABASE_URL")?;
    tracing::info!(%db_url, "using database");
    // Connetti al database
    let pool = connect_pool(&db_url).await.context("connect to sqlite")?;
    // Esegui le migrazioni del database
    run_migrations(&pool).await.context("run migrations")?;

    let fetcher = HttpFetcher::new(config.fetch_timeout, config.fetch_max_bytes).context("build http client")?;
    let service = MessageService::new(
        MessageStore::new(pool.clone()),
        Arc::new(SqliteDirectory::new(pool.clone())),
        Arc::new(fetcher),
    );
    let shutdown = CancellationToken::new();
    // Crea lo stato dell'applicazione condiviso
    let state = Arc::new(AppState { pool, service: Arc::new(service), shutdown: shutdown.clone() });
    let app = routes::router(state);

    tracing::info!(addr = %config.bind_addr, "listening");
    let listener = tokio::net::TcpListener::bind(config.bind_addr)
        .await
        .context("bind tcp listener")?;
    // Ctrl-C: annulla le operazioni in corso e chiude il server
    axum::serve(listener, app.into_make_service())
        .with_graceful_shutdown(async move {
            if let Err(e) = tokio::signal::ctrl_c().await {
                // senza handler del segnale il server resta su finché non viene terminato
                tracing::error!("install ctrl-c handler: {}", e);
                std::future::pending::<()>().await;
            }
            tracing::info!("shutting down");
            shutdown.cancel();
        })
        .await
        .context("server shutdown")?;

    Ok(())
}
