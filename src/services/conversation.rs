use crate::api::{ChatBackend, ChatReply};
use crate::config::TITLE_MAX_CHARS;
use crate::models::{Chat, Message, MessageAttachment, UploadedDocument};

/// A send that has recorded its user message and is waiting on the backend.
/// Holds the chat id captured at send time so the reply lands in that chat.
#[derive(Debug, Clone)]
pub struct PendingSend {
    pub chat_id: String,
    pub text: String,
}

/// In-memory conversations for one session.
#[derive(Debug, Default)]
pub struct ConversationStore {
    chats: Vec<Chat>,
    active_chat: Option<String>,
    loading: bool,
}

impl ConversationStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn chats(&self) -> &[Chat] {
        &self.chats
    }

    pub fn active_chat_id(&self) -> Option<&str> {
        self.active_chat.as_deref()
    }

    pub fn is_loading(&self) -> bool {
        self.loading
    }

    pub fn chat(&self, id: &str) -> Option<&Chat> {
        self.chats.iter().find(|c| c.id == id)
    }

    fn chat_mut(&mut self, id: &str) -> Option<&mut Chat> {
        self.chats.iter_mut().find(|c| c.id == id)
    }

    /// The active chat, or `None` when nothing is selected or the selection is unknown.
    pub fn active_chat(&self) -> Option<&Chat> {
        self.active_chat.as_deref().and_then(|id| self.chat(id))
    }

    /// Chats for the sidebar, newest first.
    pub fn sidebar(&self) -> Vec<&Chat> {
        let mut chats: Vec<&Chat> = self.chats.iter().collect();
        chats.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        chats
    }

    pub fn create_chat(&mut self) -> String {
        let chat = Chat::new();
        let id = chat.id.clone();
        tracing::debug!(chat_id = %id, "Created chat");
        self.chats.push(chat);
        self.active_chat = Some(id.clone());
        id
    }

    /// Point the active chat at `id`. Unknown ids are accepted as-is.
    pub fn select_chat(&mut self, id: &str) {
        self.active_chat = Some(id.to_string());
    }

    pub fn derive_title(&mut self, chat_id: &str, text: &str) {
        if let Some(chat) = self.chat_mut(chat_id) {
            chat.title = truncate_title(text);
        }
    }

    pub fn add_documents(&mut self, chat_id: &str, documents: &[UploadedDocument]) {
        if let Some(chat) = self.chat_mut(chat_id) {
            chat.documents.extend_from_slice(documents);
        }
    }

    /// Record the user's message and raise the loading flag.
    ///
    /// With no usable active chat a fresh one is created and activated and
    /// `None` is returned: nothing is recorded and the caller must submit
    /// again.
    pub fn begin_send(
        &mut self,
        text: &str,
        attachments: Vec<MessageAttachment>,
    ) -> Option<PendingSend> {
        let Some(chat_id) = self.active_chat().map(|c| c.id.clone()) else {
            self.create_chat();
            return None;
        };

        let first_message = {
            let chat = self.chat_mut(&chat_id)?;
            chat.messages.push(Message::user(text, attachments));
            chat.messages.len() == 1
        };
        if first_message {
            self.derive_title(&chat_id, text);
        }

        self.loading = true;
        Some(PendingSend {
            chat_id,
            text: text.to_string(),
        })
    }

    /// Append the bot's reply to the chat the send started in and clear the loading flag.
    pub fn complete_send(&mut self, pending: PendingSend, reply: ChatReply) {
        if !reply.is_success() {
            tracing::error!(chat_id = %pending.chat_id, "Error in chat: {}", reply.text());
        }

        match self.chat_mut(&pending.chat_id) {
            Some(chat) => chat.messages.push(Message::bot(reply.text())),
            None => tracing::warn!(chat_id = %pending.chat_id, "Reply for unknown chat dropped"),
        }
        self.loading = false;
    }

    /// Full send: record the user message, ask the backend, record the reply.
    /// Returns `false` when the call was deferred because no chat was active.
    pub async fn send_message(
        &mut self,
        backend: &dyn ChatBackend,
        text: &str,
        attachments: Vec<MessageAttachment>,
    ) -> bool {
        let Some(pending) = self.begin_send(text, attachments) else {
            return false;
        };
        let reply = backend.send_message(&pending.text).await;
        self.complete_send(pending, reply);
        true
    }
}

/// Truncate text to a chat title: the first 30 characters plus "..." when longer.
pub fn truncate_title(text: &str) -> String {
    if text.chars().count() > TITLE_MAX_CHARS {
        let head: String = text.chars().take(TITLE_MAX_CHARS).collect();
        format!("{}...", head)
    } else {
        text.to_string()
    }
}
