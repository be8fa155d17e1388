use std::collections::BTreeSet;
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use super::MemberId;

/// Ruoli che un membro può avere nel proprio gruppo.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Role {
    Director,
    Accountant,
    Auditor,
    PersonnelManager,
    StationManager,
}

impl Role {
    pub const ALL: [Role; 5] = [
        Role::Director,
        Role::Accountant,
        Role::Auditor,
        Role::PersonnelManager,
        Role::StationManager,
    ];

    /// Tag stabile usato anche nel database.
    pub fn as_str(&self) -> &'static str {
        match self {
            Role::Director => "director",
            Role::Accountant => "accountant",
            Role::Auditor => "auditor",
            Role::PersonnelManager => "personnel_manager",
            Role::StationManager => "station_manager",
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnknownRole(pub String);

impl fmt::Display for UnknownRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "unknown role {:?}", self.0)
    }
}

impl std::error::Error for UnknownRole {}

impl FromStr for Role {
    type Err = UnknownRole;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Role::ALL
            .into_iter()
            .find(|r| r.as_str() == s)
            .ok_or_else(|| UnknownRole(s.to_string()))
    }
}

/// Ruolo assegnato ad un membro; `granted = false` equivale a non averlo.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MemberRole {
    pub member_id: MemberId,
    pub role: Role,
    pub granted: bool,
}

/// Insieme dei ruoli effettivamente concessi ad un membro.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Capabilities(BTreeSet<Role>);

impl Capabilities {
    pub fn from_roles<'a>(roles: impl IntoIterator<Item = &'a MemberRole>) -> Self {
        Self(roles.into_iter().filter(|r| r.granted).map(|r| r.role).collect())
    }

    pub fn contains(&self, role: Role) -> bool {
        self.0.contains(&role)
    }

    pub fn is_director(&self) -> bool {
        self.contains(Role::Director)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn role(role: Role, granted: bool) -> MemberRole {
        MemberRole { member_id: 7, role, granted }
    }

    #[test]
    fn ungranted_director_is_not_a_capability() {
        let caps = Capabilities::from_roles(&[role(Role::Director, false), role(Role::Auditor, true)]);
        assert!(!caps.is_director());
        assert!(caps.contains(Role::Auditor));
    }

    #[test]
    fn granted_director_wins_over_duplicate_ungranted_entry() {
        let caps = Capabilities::from_roles(&[role(Role::Director, false), role(Role::Director, true)]);
        assert!(caps.is_director());
    }

    #[test]
    fn role_tags_parse_back() {
        for r in Role::ALL {
            assert_eq!(r.as_str().parse::<Role>(), Ok(r));
        }
        assert!("ceo".parse::<Role>().is_err());
    }
}
