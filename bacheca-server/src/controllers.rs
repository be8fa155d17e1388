use axum::{
    extract::{rejection::{JsonRejection, PathRejection}, Extension, Path},
    http::StatusCode,
    Json,
};
use bacheca_core::{
    error::Error, BoardResponse, EditorResponse, FetchMessageRequest, FetchMessageResponse, GroupId,
    MessageResponse, UpdateMessageRequest,
};
use std::sync::Arc;

use crate::error::{AppError, ErrorKind};
use crate::service::UpdateMessageParams;
use crate::AppState;

/* in caso di errore ogni handler risponde con (status, envelope Error in JSON),
   così il client legge sempre { code, message, details } */
type ApiFailure = (StatusCode, Json<Error>);
type ApiResult<T> = Result<Json<T>, ApiFailure>;

/// Mappa un AppError in (status, envelope). NotFound è uno stato normale, non si logga come errore.
fn api_error(op: &str, err: AppError) -> ApiFailure {
    match err.kind() {
        ErrorKind::NotFound => tracing::debug!("{}: {}", op, err),
        ErrorKind::Invalid | ErrorKind::Cancelled => tracing::warn!("{}: {}", op, err),
        // il dettaglio completo (es. errore SQL) finisce solo nel log
        ErrorKind::Upstream | ErrorKind::Internal => tracing::error!("{}: {}", op, err),
    }
    let body = err.to_wire().with_details(serde_json::json!({ "operation": op }));
    (err.status_code(), Json(body))
}

/// Estrae il group_id dal path; un valore non numerico diventa Invalid (400) con envelope.
fn group_id(op: &str, path: Result<Path<GroupId>, PathRejection>) -> Result<GroupId, ApiFailure> {
    path.map(|Path(id)| id)
        .map_err(|rejection| api_error(op, AppError::Invalid.context(rejection.body_text())))
}

/// Come `group_id`, per il body JSON: campi mancanti o JSON malformato sono Invalid (400).
fn json_body<T>(op: &str, body: Result<Json<T>, JsonRejection>) -> Result<T, ApiFailure> {
    body.map(|Json(v)| v)
        .map_err(|rejection| api_error(op, AppError::Invalid.context(rejection.body_text())))
}

/// Handler per GET /api/groups/:group_id/message
pub async fn get_message(
    Extension(state): Extension<Arc<AppState>>,
    path: Result<Path<GroupId>, PathRejection>,
) -> ApiResult<MessageResponse> {
    let group_id = group_id("get message", path)?;
    // lettura pura: nessuna autorizzazione, NotFound = "nessun messaggio ancora"
    let message = state
        .service
        .get_message(group_id)
        .await
        .map_err(|e| api_error("get message", e))?;
    Ok(Json(MessageResponse { message }))
}

/// Handler per PUT /api/groups/:group_id/message
pub async fn update_message(
    Extension(state): Extension<Arc<AppState>>,
    path: Result<Path<GroupId>, PathRejection>,
    body: Result<Json<UpdateMessageRequest>, JsonRejection>,
) -> ApiResult<MessageResponse> {
    let group_id = group_id("update message", path)?;
    let req = json_body("update message", body)?;
    // token figlio: lo shutdown del server interrompe anche le scritture in corso
    let cancel = state.shutdown.child_token();
    /* il membro che agisce arriva nel body; il service controlla
       appartenenza al gruppo e ruolo director prima di scrivere */
    let params = UpdateMessageParams {
        group_id,
        member_id: req.member_id,
        text: req.text,
        source_url: req.source_url,
    };
    // il service restituisce il record riletto dallo store, mai quello costruito qui
    let message = state
        .service
        .update_message(&cancel, params)
        .await
        .map_err(|e| api_error("update message", e))?;
    Ok(Json(MessageResponse { message }))
}

/// Handler per GET /api/groups/:group_id/editor
pub async fn find_editor(
    Extension(state): Extension<Arc<AppState>>,
    path: Result<Path<GroupId>, PathRejection>,
) -> ApiResult<EditorResponse> {
    let group_id = group_id("find editor", path)?;
    // primo director del gruppo nell'ordine del roster; 404 se non ce n'è nessuno
    let editor = state
        .service
        .find_authorized_editor(group_id)
        .await
        .map_err(|e| api_error("find editor", e))?;
    Ok(Json(EditorResponse { editor }))
}

/// Handler per GET /api/groups/:group_id/board
pub async fn get_board(
    Extension(state): Extension<Arc<AppState>>,
    path: Result<Path<GroupId>, PathRejection>,
) -> ApiResult<BoardResponse> {
    let group_id = group_id("get board", path)?;
    // qui NotFound non è un errore: messaggio ed editor risultano semplicemente assenti
    let board = state
        .service
        .message_board(group_id)
        .await
        .map_err(|e| api_error("get board", e))?;
    Ok(Json(BoardResponse { board }))
}

/// Handler per POST /api/message/fetch
pub async fn fetch_message(
    Extension(state): Extension<Arc<AppState>>,
    body: Result<Json<FetchMessageRequest>, JsonRejection>,
) -> ApiResult<FetchMessageResponse> {
    let req = json_body("fetch message", body)?;
    let cancel = state.shutdown.child_token();
    // il testo scaricato è solo un candidato: il client decide se salvarlo con PUT
    let text = state
        .service
        .fetch_message_from_url(&cancel, &req.url)
        .await
        .map_err(|e| api_error("fetch message", e))?;
    Ok(Json(FetchMessageResponse { text }))
}
