use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::attachment::MessageAttachment;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Sender {
    User,
    Bot,
}

/// One turn in a chat. Never edited after it is appended.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Message {
    pub id: String,
    pub text: String,
    pub sender: Sender,
    pub timestamp: DateTime<Utc>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub attachments: Vec<MessageAttachment>,
}

impl Message {
    pub fn user(text: impl Into<String>, attachments: Vec<MessageAttachment>) -> Self {
        Self::new(Sender::User, text.into(), attachments)
    }

    pub fn bot(text: impl Into<String>) -> Self {
        Self::new(Sender::Bot, text.into(), Vec::new())
    }

    fn new(sender: Sender, text: String, attachments: Vec<MessageAttachment>) -> Self {
        Self {
            id: uuid::Uuid::new_v4().to_string(),
            text,
            sender,
            timestamp: Utc::now(),
            attachments,
        }
    }
}
