//! bacheca-core: tipi condivisi tra server e client (modelli, DTO HTTP, errori).
//! Niente I/O o dipendenze non compatibili con WASM.

pub mod models;
pub mod protocol;
pub mod error;
pub mod utils;

// Re-export utili per ridurre i percorsi nei crate client/server
pub use error::Error;
pub use models::{
    board::MessageBoard,
    group::Group,
    member::{Member, MemberRef},
    message::GroupMessage,
    role::{Capabilities, MemberRole, Role},
    GroupId, MemberId,
};
pub use protocol::http::{
    BoardResponse, EditorResponse, FetchMessageRequest, FetchMessageResponse, MessageResponse,
    UpdateMessageRequest,
};
pub use utils::{format_timestamp, now_utc, parse_timestamp};
