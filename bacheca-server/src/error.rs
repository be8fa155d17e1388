use axum::http::StatusCode;
use bacheca_core::error::{
    Error as WireError, CODE_CANCELLED, CODE_INTERNAL, CODE_INVALID, CODE_NOT_FOUND, CODE_UPSTREAM,
};
use thiserror::Error;

/// Errore del server. Le varianti `Context` avvolgono la causa con il nome
/// dell'operazione e gli argomenti principali, senza riclassificarla.
#[derive(Debug, Error)]
pub enum AppError {
    /// Input non valido oppure membro non autorizzato.
    #[error("invalid")]
    Invalid,
    #[error("not found")]
    NotFound,
    #[error("operation cancelled")]
    Cancelled,
    #[error("unexpected status code {0}")]
    UnexpectedStatus(u16),
    #[error("response body exceeds {limit} bytes")]
    BodyTooLarge { limit: usize },
    #[error("db error: {0}")]
    Database(#[from] sqlx::Error),
    #[error("http error: {0}")]
    Http(#[from] reqwest::Error),
    #[error("timestamp error: {0}")]
    Timestamp(String),
    #[error("{context}: {cause}")]
    Context { context: String, cause: Box<AppError> },
}

/// Classificazione grossolana, vista attraverso i wrapper di contesto.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    Invalid,
    NotFound,
    Cancelled,
    Upstream,
    Internal,
}

impl AppError {
    pub fn context(self, context: impl Into<String>) -> Self {
        AppError::Context { context: context.into(), cause: Box::new(self) }
    }

    pub fn kind(&self) -> ErrorKind {
        match self {
            AppError::Invalid => ErrorKind::Invalid,
            AppError::NotFound => ErrorKind::NotFound,
            AppError::Cancelled => ErrorKind::Cancelled,
            AppError::UnexpectedStatus(_) | AppError::BodyTooLarge { .. } | AppError::Http(_) => {
                ErrorKind::Upstream
            }
            AppError::Database(sqlx::Error::RowNotFound) => ErrorKind::NotFound,
            AppError::Database(_) | AppError::Timestamp(_) => ErrorKind::Internal,
            AppError::Context { cause, .. } => cause.kind(),
        }
    }

    pub fn is_invalid(&self) -> bool {
        self.kind() == ErrorKind::Invalid
    }

    pub fn is_not_found(&self) -> bool {
        self.kind() == ErrorKind::NotFound
    }

    pub fn is_cancelled(&self) -> bool {
        self.kind() == ErrorKind::Cancelled
    }

    pub fn status_code(&self) -> StatusCode {
        match self.kind() {
            ErrorKind::Invalid => StatusCode::BAD_REQUEST,
            ErrorKind::NotFound => StatusCode::NOT_FOUND,
            ErrorKind::Cancelled => StatusCode::SERVICE_UNAVAILABLE,
            ErrorKind::Upstream => StatusCode::BAD_GATEWAY,
            ErrorKind::Internal => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Converte nell'envelope di errore condiviso con i client.
    pub fn to_wire(&self) -> WireError {
        let code = match self.kind() {
            ErrorKind::Invalid => CODE_INVALID,
            ErrorKind::NotFound => CODE_NOT_FOUND,
            ErrorKind::Cancelled => CODE_CANCELLED,
            ErrorKind::Upstream => CODE_UPSTREAM,
            ErrorKind::Internal => CODE_INTERNAL,
        };
        // i dettagli interni (SQL, vincoli) restano nei log del server
        let message = match self.kind() {
            ErrorKind::Internal => "internal server error".to_string(),
            _ => self.to_string(),
        };
        WireError::new(code, message)
    }
}

impl From<time::error::Format> for AppError {
    fn from(e: time::error::Format) -> Self {
        AppError::Timestamp(e.to_string())
    }
}

impl From<time::error::Parse> for AppError {
    fn from(e: time::error::Parse) -> Self {
        AppError::Timestamp(e.to_string())
    }
}

/// Aggiunge contesto agli errori, in stile `anyhow::Context`.
pub trait ResultExt<T> {
    fn context(self, context: impl Into<String>) -> Result<T, AppError>;

    fn with_context<C, F>(self, f: F) -> Result<T, AppError>
    where
        C: Into<String>,
        F: FnOnce() -> C;
}

impl<T, E> ResultExt<T> for Result<T, E>
where
    E: Into<AppError>,
{
    fn context(self, context: impl Into<String>) -> Result<T, AppError> {
        self.map_err(|e| e.into().context(context))
    }

    fn with_context<C, F>(self, f: F) -> Result<T, AppError>
    where
        C: Into<String>,
        F: FnOnce() -> C,
    {
        self.map_err(|e| e.into().context(f()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn kind_sees_through_context() {
        let err = AppError::Invalid.context("update message").context("PUT /api/groups/1/message");
        assert!(err.is_invalid());
        assert_eq!(err.status_code(), StatusCode::BAD_REQUEST);
        assert_eq!(err.to_string(), "PUT /api/groups/1/message: update message: invalid");
    }

    #[test]
    fn row_not_found_is_not_found() {
        let res: Result<(), sqlx::Error> = Err(sqlx::Error::RowNotFound);
        let err = res.context("get message 3").unwrap_err();
        assert!(err.is_not_found());
        assert_eq!(err.to_wire().code, CODE_NOT_FOUND);
    }

    #[test]
    fn bad_status_is_upstream() {
        let err = AppError::UnexpectedStatus(500).context("fetch message");
        assert_eq!(err.kind(), ErrorKind::Upstream);
        assert_eq!(err.status_code(), StatusCode::BAD_GATEWAY);
    }

    #[test]
    fn internal_errors_hide_details_from_clients() {
        let err = AppError::Database(sqlx::Error::Protocol("FOREIGN KEY constraint failed".into()))
            .context("upsert group message");
        let wire = err.to_wire();
        assert_eq!(wire.code, CODE_INTERNAL);
        assert_eq!(wire.message, "internal server error");
        assert!(err.to_string().contains("FOREIGN KEY"));

        // gli altri errori restano descrittivi
        let wire = AppError::Invalid.context("fetch message").to_wire();
        assert_eq!(wire.message, "fetch message: invalid");
    }
}
