pub mod http;

// Re-export comodi
pub use http::{
    BoardResponse, EditorResponse, FetchMessageRequest, FetchMessageResponse, MessageResponse,
    UpdateMessageRequest,
};
