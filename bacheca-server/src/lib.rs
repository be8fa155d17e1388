use anyhow::Context;
use axum::http::StatusCode;
use sqlx::sqlite::{SqliteConnectOptions, SqlitePoolOptions};
use sqlx::SqlitePool;
use std::path::{Path, PathBuf};
use std::str::FromStr;
use std::sync::Arc;
use tokio_util::sync::CancellationToken;

pub mod config;
pub mod controllers;
pub mod directory;
pub mod error;
pub mod fetcher;
pub mod routes;
pub mod service;
pub mod store;

pub use config::Config;
// ResultExt resta in `error`: qui dentro `.context` è quello di anyhow
pub use error::{AppError, ErrorKind};
pub use service::MessageService;

#[derive(Clone)]
pub struct AppState {
    pub pool: SqlitePool,
    pub service: Arc<MessageService>,
    /// Token radice: ogni richiesta ne riceve un figlio, annullato allo shutdown.
    pub shutdown: CancellationToken,
}

// Dato un percorso di file, restituisce un URL SQLite valido. Crea le directory genitrici se non esistono.
pub fn sqlite_url_for_path(p: &Path) -> anyhow::Result<String> {
    let abs = if p.is_absolute() {
        p.to_path_buf()
    } else {
        std::env::current_dir()?.join(p)
    };
    if let Some(parent) = abs.parent() {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("create parent dirs for {:?}", parent))?;
    }
    std::fs::OpenOptions::new()
        .create(true)
        .append(true)
        .open(&abs)
        .with_context(|| format!("create/open sqlite file {:?}", abs))?;
    let s = abs.to_string_lossy().replace('\\', "/");
    Ok(format!("sqlite://{}", s))
}

/// Crea un DB URL SQLite a partire dal valore di DATABASE_URL (vedi `Config`).
pub fn build_sqlite_url(raw: &str) -> anyhow::Result<String> {
    if raw == "sqlite::memory:" {
        return Ok(raw.to_string());
    }
    // Rimuovi il prefisso "sqlite://" se presente, per ottenere il percorso del file.
    let path_part = if raw.starts_with("sqlite:") {
        raw.trim_start_matches("sqlite://").trim_start_matches("sqlite:").to_string()
    } else {
        raw.to_string()
    };
    sqlite_url_for_path(&PathBuf::from(path_part))
}

// Connect to the database and return a connection pool.
pub async fn connect_pool(db_url: &str) -> anyhow::Result<SqlitePool> {
    let options = SqliteConnectOptions::from_str(db_url)
        .with_context(|| format!("parse sqlite url {}", db_url))?
        .create_if_missing(true)
        .foreign_keys(true);
    // un DB in memoria esiste solo dentro la sua connessione
    let mut pool_options = SqlitePoolOptions::new().max_connections(5);
    if db_url.contains(":memory:") {
        pool_options = pool_options.max_connections(1).idle_timeout(None).max_lifetime(None);
    }
    let pool = pool_options
        .connect_with(options)
        .await
        .with_context(|| format!("connect to sqlite via {}", db_url))?;
    Ok(pool)
}

// Esegue le migrazioni del database. Crea le tabelle se non esistono.
pub async fn run_migrations(pool: &SqlitePool) -> anyhow::Result<()> {
    let stmts = [
        r#"
        CREATE TABLE IF NOT EXISTS groups (
            group_id   INTEGER PRIMARY KEY,
            name       TEXT NOT NULL
        );"#,
        r#"
        CREATE TABLE IF NOT EXISTS members (
            member_id  INTEGER PRIMARY KEY,
            name       TEXT NOT NULL,
            group_id   INTEGER,
            FOREIGN KEY(group_id) REFERENCES groups(group_id)
        );"#,
        r#"
        CREATE TABLE IF NOT EXISTS member_roles (
            member_id  INTEGER NOT NULL,
            role       TEXT NOT NULL,
            granted    INTEGER NOT NULL,
            PRIMARY KEY(member_id, role),
            FOREIGN KEY(member_id) REFERENCES members(member_id)
        );"#,
        // updated_by è un riferimento debole: nessuna foreign key, risolto con LEFT JOIN
        r#"
        CREATE TABLE IF NOT EXISTS group_messages (
            group_id   INTEGER PRIMARY KEY,
            message    TEXT NOT NULL,
            source_url TEXT,
            updated_at TEXT NOT NULL,
            updated_by INTEGER,
            FOREIGN KEY(group_id) REFERENCES groups(group_id)
        );"#,
    ];
    // applica ogni statement di migrazione
    for s in &stmts {
        sqlx::query(s)
            .execute(pool)
            .await
            .with_context(|| format!("apply migration: {}", &s[..s.len().min(40)].replace('\n', " ")))?;
    }
    Ok(())
}

/// Controlla lo stato di salute del database tentando di acquisire una connessione dal pool.
pub async fn health_with_pool(pool: &SqlitePool) -> StatusCode {
    match pool.acquire().await {
        Ok(_) => StatusCode::OK,
        Err(_) => StatusCode::SERVICE_UNAVAILABLE,
    }
}
