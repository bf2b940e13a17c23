pub mod attachments;
pub mod conversation;
pub mod session;

pub use session::ChatSession;
