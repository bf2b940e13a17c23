pub mod attachment;
pub mod chat;
pub mod document;
pub mod message;

pub use attachment::{AttachmentKind, MessageAttachment};
pub use chat::Chat;
pub use document::UploadedDocument;
pub use message::{Message, Sender};
