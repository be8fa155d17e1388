pub mod group;
pub mod member;
pub mod role;
pub mod message;
pub mod board;

/// Identificativo di un gruppo. `0` significa "non impostato".
pub type GroupId = i64;
/// Identificativo di un membro. `0` significa "non impostato".
pub type MemberId = i64;

// Re-export per comodità
pub use board::MessageBoard;
pub use group::Group;
pub use member::{Member, MemberRef};
pub use message::GroupMessage;
pub use role::{Capabilities, MemberRole, Role};
