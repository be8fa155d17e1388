use anyhow::{bail, Context};
use std::net::SocketAddr;
use std::time::Duration;

pub const DEFAULT_DATABASE_URL: &str = "bacheca.db";
pub const DEFAULT_BIND_ADDR: &str = "127.0.0.1:3000";
pub const DEFAULT_FETCH_TIMEOUT_SECS: u64 = 30;
/// 1 MiB.
pub const DEFAULT_FETCH_MAX_BYTES: usize = 1024 * 1024;

/// Configurazione del server, letta dalle variabili d'ambiente all'avvio.
#[derive(Debug, Clone)]
pub struct Config {
    /// Valore grezzo di DATABASE_URL (percorso file, "sqlite://..." o "sqlite::memory:").
    pub database_url: String,
    pub bind_addr: SocketAddr,
    /// Timeout complessivo della GET usata per importare il messaggio da URL.
    pub fetch_timeout: Duration,
    /// Limite al corpo della risposta durante l'import da URL.
    pub fetch_max_bytes: usize,
}

impl Config {
    pub fn from_env() -> anyhow::Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Come `from_env`, ma con una sorgente arbitraria (usata nei test).
    pub fn from_lookup<F>(lookup: F) -> anyhow::Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let database_url = lookup("DATABASE_URL").unwrap_or_else(|| DEFAULT_DATABASE_URL.to_string());
        let bind = lookup("BIND_ADDR").unwrap_or_else(|| DEFAULT_BIND_ADDR.to_string());
        let bind_addr: SocketAddr = bind.parse().with_context(|| format!("parse BIND_ADDR {:?}", bind))?;
        let fetch_timeout_secs = match lookup("FETCH_TIMEOUT_SECS") {
            Some(raw) => raw
                .trim()
                .parse::<u64>()
                .with_context(|| format!("parse FETCH_TIMEOUT_SECS {:?}", raw))?,
            None => DEFAULT_FETCH_TIMEOUT_SECS,
        };
        if fetch_timeout_secs == 0 {
            bail!("FETCH_TIMEOUT_SECS must be greater than zero");
        }
        let fetch_max_bytes = match lookup("FETCH_MAX_BYTES") {
            Some(raw) => raw
                .trim()
                .parse::<usize>()
                .with_context(|| format!("parse FETCH_MAX_BYTES {:?}", raw))?,
            None => DEFAULT_FETCH_MAX_BYTES,
        };
        if fetch_max_bytes == 0 {
            bail!("FETCH_MAX_BYTES must be greater than zero");
        }
        Ok(Self {
            database_url,
            bind_addr,
            fetch_timeout: Duration::from_secs(fetch_timeout_secs),
            fetch_max_bytes,
        })
    }
}
