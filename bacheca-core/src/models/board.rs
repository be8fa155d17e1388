use serde::{Deserialize, Serialize};

use super::{GroupId, GroupMessage, Member};

/// Vista della bacheca di un gruppo: messaggio corrente e chi può modificarlo.
/// Entrambi i campi sono assenti nello stato "nessun messaggio" / "nessun director".
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MessageBoard {
    pub group_id: GroupId,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<GroupMessage>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub editor: Option<Member>,
}

impl MessageBoard {
    pub fn can_edit(&self) -> bool {
        self.editor.is_some()
    }
}
