use serde::{Deserialize, Serialize};

use super::GroupId;

/// Gruppo (organizzazione) esposto sul wire.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Group {
    pub group_id: GroupId,
    pub name: String,
}
