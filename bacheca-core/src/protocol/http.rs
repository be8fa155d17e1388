use serde::{Deserialize, Serialize};

use crate::models::{GroupMessage, Member, MemberId, MessageBoard};
/*
    http dto for http requests
*/
// Update message (PUT /api/groups/:group_id/message)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateMessageRequest {
    /// Membro che esegue la modifica; deve essere director del gruppo.
    pub member_id: MemberId,
    pub text: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub source_url: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MessageResponse {
    pub message: GroupMessage,
}

// Import da URL (POST /api/message/fetch)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FetchMessageRequest {
    pub url: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FetchMessageResponse {
    pub text: String,
}

// Editor autorizzato (GET /api/groups/:group_id/editor)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EditorResponse {
    pub editor: Member,
}

// Bacheca completa (GET /api/groups/:group_id/board)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BoardResponse {
    pub board: MessageBoard,
}
