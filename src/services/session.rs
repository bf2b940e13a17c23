use std::sync::Arc;

use crate::api::ChatBackend;
use crate::models::MessageAttachment;
use crate::services::attachments::{commit_uploads, AttachmentManager};
use crate::services::conversation::ConversationStore;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SubmitOutcome {
    /// Blank text, or a send is already in flight.
    Ignored,
    /// No chat was active; one was created and the text was not sent.
    Deferred,
    Sent,
}

/// One application session: the conversations, the attachments waiting to be
/// uploaded and the backend they talk to.
pub struct ChatSession {
    pub store: ConversationStore,
    pub attachments: AttachmentManager,
    backend: Arc<dyn ChatBackend>,
}

impl ChatSession {
    pub fn new(backend: Arc<dyn ChatBackend>) -> Self {
        Self {
            store: ConversationStore::new(),
            attachments: AttachmentManager::new(),
            backend,
        }
    }

    pub fn can_submit(&self, text: &str) -> bool {
        !text.trim().is_empty() && !self.store.is_loading()
    }

    /// Upload pending files, then send `text` with whatever uploaded.
    pub async fn submit(&mut self, text: &str) -> SubmitOutcome {
        if !self.can_submit(text) {
            return SubmitOutcome::Ignored;
        }

        let Some(chat_id) = self.store.active_chat().map(|c| c.id.clone()) else {
            self.store.create_chat();
            return SubmitOutcome::Deferred;
        };

        let files = self.attachments.take_pending();
        let documents = commit_uploads(self.backend.as_ref(), &files).await;
        if documents.len() < files.len() {
            tracing::warn!(
                "{} of {} attachments failed to upload",
                files.len() - documents.len(),
                files.len()
            );
        }

        let attachments: Vec<MessageAttachment> = documents.iter().map(Into::into).collect();
        self.store.add_documents(&chat_id, &documents);

        if self
            .store
            .send_message(self.backend.as_ref(), text, attachments)
            .await
        {
            SubmitOutcome::Sent
        } else {
            SubmitOutcome::Deferred
        }
    }
}
