use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::document::UploadedDocument;
use super::message::Message;
use crate::config::DEFAULT_TITLE;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Chat {
    pub id: String,
    pub title: String,
    pub messages: Vec<Message>,
    pub created_at: DateTime<Utc>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub documents: Vec<UploadedDocument>,
}

impl Chat {
    pub fn new() -> Self {
        Self {
            id: uuid::Uuid::new_v4().to_string(),
            title: DEFAULT_TITLE.to_string(),
            messages: Vec::new(),
            created_at: Utc::now(),
            documents: Vec::new(),
        }
    }
}
