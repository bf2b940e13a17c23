use async_trait::async_trait;

use super::types::{ChatReply, UploadReply};
use crate::services::attachments::PendingFile;

/// The chat/document backend as seen by the conversation layer.
///
/// Implementations never fail: every transport or server problem is folded
/// into the `Error` variant of the returned reply.
#[async_trait]
pub trait ChatBackend: Send + Sync {
    async fn send_message(&self, text: &str) -> ChatReply;

    async fn upload_document(&self, file: &PendingFile) -> UploadReply;
}
