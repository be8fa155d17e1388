use serde::{Deserialize, Serialize};
use time::OffsetDateTime;

use super::{GroupId, MemberRef};

/// Messaggio del giorno di un gruppo, come persistito dal server.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GroupMessage {
    pub group_id: GroupId,
    pub text: String,
    /// URL da cui il testo è stato importato (solo informativo).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub source_url: Option<String>,
    #[serde(with = "time::serde::rfc3339")]
    pub updated_at: OffsetDateTime, // RFC3339 UTC
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub updated_by: Option<MemberRef>,
}
