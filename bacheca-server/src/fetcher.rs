use async_trait::async_trait;
use std::time::Duration;

use crate::error::AppError;

/// Risposta grezza di una GET: lo status viene valutato dal chiamante.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FetchResponse {
    pub status: u16,
    pub body: Vec<u8>,
}

/// Client HTTP minimale: una sola GET per chiamata, nessun retry né cache.
#[async_trait]
pub trait RemoteFetcher: Send + Sync {
    async fn get(&self, url: &str) -> Result<FetchResponse, AppError>;
}

/// Implementazione su reqwest. Nessun header custom, redirect secondo la policy del client.
#[derive(Clone)]
pub struct HttpFetcher {
    client: reqwest::Client,
    /// Dimensione massima del corpo letto; oltre si interrompe la lettura.
    max_body_bytes: usize,
}

impl HttpFetcher {
    pub fn new(timeout: Duration, max_body_bytes: usize) -> Result<Self, AppError> {
        let client = reqwest::Client::builder().timeout(timeout).build()?;
        Ok(Self { client, max_body_bytes })
    }
}

#[async_trait]
impl RemoteFetcher for HttpFetcher {
    async fn get(&self, url: &str) -> Result<FetchResponse, AppError> {
        let limit = self.max_body_bytes;
        let mut resp = self.client.get(url).send().await?;
        let status = resp.status().as_u16();
        // Content-Length dichiarato troppo grande: inutile scaricare
        if resp.content_length().is_some_and(|len| len > limit as u64) {
            return Err(AppError::BodyTooLarge { limit });
        }
        // il server può mentire o non dichiararlo: si conta a blocchi
        let mut body = Vec::new();
        while let Some(chunk) = resp.chunk().await? {
            if body.len() + chunk.len() > limit {
                return Err(AppError::BodyTooLarge { limit });
            }
            body.extend_from_slice(&chunk);
        }
        Ok(FetchResponse { status, body })
    }
}
