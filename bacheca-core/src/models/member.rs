use serde::{Deserialize, Serialize};

use super::{GroupId, MemberId};

/// Membro come lo restituisce la directory dei membri.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Member {
    pub member_id: MemberId,
    pub name: String,
    /// Gruppo di appartenenza registrato; assente se sconosciuto.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub group_id: Option<GroupId>,
}

impl Member {
    pub fn belongs_to(&self, group_id: GroupId) -> bool {
        self.group_id == Some(group_id)
    }
}

/// Riferimento debole all'autore dell'ultima modifica.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MemberRef {
    pub member_id: MemberId,
    /// Nome risolto in lettura; assente se il membro non è noto allo store.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
}
