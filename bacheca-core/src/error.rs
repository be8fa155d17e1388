use serde::{Deserialize, Serialize};

/// Input non valido oppure azione non autorizzata (volutamente indistinguibili).
pub const CODE_INVALID: &str = "invalid";
pub const CODE_NOT_FOUND: &str = "not_found";
pub const CODE_CANCELLED: &str = "cancelled";
/// Errore del server remoto durante l'import da URL.
pub const CODE_UPSTREAM: &str = "upstream_error";
pub const CODE_INTERNAL: &str = "internal_error";

/// Errore condiviso per le risposte HTTP.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Error {
    /// Codice messaggio
    pub code: String,
    
    pub message: String,
    
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<serde_json::Value>,
}

impl Error {
    pub fn new(code: impl Into<String>, message: impl Into<String>) -> Self {
        Self { code: code.into(), message: message.into(), details: None }
    }

    pub fn with_details(mut self, details: serde_json::Value) -> Self {
        self.details = Some(details);
        self
    }

    pub fn is_not_found(&self) -> bool {
        self.code == CODE_NOT_FOUND
    }
}

impl std::fmt::Display for Error {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}: {}", self.code, self.message)
    }
}

impl std::error::Error for Error {}
