use chrono::Local;

use super::markdown::render_markdown;
use crate::config::{MESSAGE_NAME_WIDTH, PENDING_NAME_WIDTH};
use crate::models::{Message, Sender, UploadedDocument};
use crate::services::attachments::{truncate_filename, AttachmentManager};
use crate::services::conversation::ConversationStore;

pub fn render_sidebar(store: &ConversationStore) -> String {
    let chats = store.sidebar();
    if chats.is_empty() {
        return "No previous chats".to_string();
    }

    let active = store.active_chat_id();
    chats
        .iter()
        .enumerate()
        .map(|(i, chat)| {
            let marker = if Some(chat.id.as_str()) == active { '*' } else { ' ' };
            format!(
                "{} {:>2}. {}  ({})",
                marker,
                i + 1,
                chat.title,
                chat.created_at.with_timezone(&Local).format("%Y-%m-%d")
            )
        })
        .collect::<Vec<_>>()
        .join("\n")
}

pub fn render_message(message: &Message) -> String {
    let time = message.timestamp.with_timezone(&Local).format("%H:%M");
    let label = match message.sender {
        Sender::User => "You",
        Sender::Bot => "Bot",
    };
    let mut out = format!("[{}] {}:", time, label);

    if message.sender == Sender::User {
        for attachment in &message.attachments {
            out.push_str("\n  📄 ");
            out.push_str(&truncate_filename(&attachment.name, MESSAGE_NAME_WIDTH));
        }
    }

    if !message.text.is_empty() {
        let body = match message.sender {
            Sender::Bot => render_markdown(&message.text),
            Sender::User => message.text.clone(),
        };
        for line in body.lines() {
            out.push_str("\n  ");
            out.push_str(line);
        }
    }
    out
}

pub fn render_documents(documents: &[UploadedDocument]) -> Option<String> {
    if documents.is_empty() {
        return None;
    }
    let mut out = "Uploaded Documents".to_string();
    for doc in documents {
        out.push_str("\n  📄 ");
        out.push_str(&doc.name);
    }
    Some(out)
}

pub fn render_pending(attachments: &AttachmentManager) -> String {
    if !attachments.has_pending() {
        return "No pending attachments".to_string();
    }
    attachments
        .pending()
        .iter()
        .map(|f| format!("  {}  {}", f.temp_id, truncate_filename(&f.name, PENDING_NAME_WIDTH)))
        .collect::<Vec<_>>()
        .join("\n")
}

/// The main panel: welcome text, or the active chat's thread.
pub fn render_chat(store: &ConversationStore) -> String {
    let Some(chat) = store.active_chat() else {
        return "Welcome to AI Chatbot\nStart a new conversation with /new.".to_string();
    };

    let mut sections = vec![format!("== {} ==", chat.title)];
    if chat.messages.is_empty() {
        sections.push("No messages yet. Start a conversation!".to_string());
    } else {
        sections.extend(chat.messages.iter().map(render_message));
    }
    if store.is_loading() {
        sections.push("Bot is typing...".to_string());
    }
    sections.join("\n\n")
}
