use std::collections::HashMap;

use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ApiError {
    #[error("Network error: {0}")]
    Network(String),

    #[error("HTTP {status}: {message}")]
    Http { status: u16, message: String },

    #[error("Invalid response: {0}")]
    InvalidResponse(String),
}

impl ApiError {
    /// The text surfaced to the user for this failure.
    pub fn user_message(&self) -> String {
        match self {
            ApiError::Network(msg) => msg.clone(),
            ApiError::Http { message, .. } => message.clone(),
            ApiError::InvalidResponse(msg) => msg.clone(),
        }
    }
}

// --- Wire types ---

#[derive(Debug, Serialize)]
pub struct MessageRequest<'a> {
    pub message: &'a str,
}

#[derive(Debug, Deserialize)]
pub struct MessageResponse {
    pub response: String,
    pub status: String,
    #[serde(default)]
    pub context: Option<HashMap<String, serde_json::Value>>,
}

#[derive(Debug, Deserialize)]
pub struct DocumentUploadResponse {
    pub status: String,
    #[serde(default)]
    pub message: Option<String>,
    #[serde(default)]
    pub document_id: Option<String>,
    #[serde(default)]
    pub document_name: Option<String>,
}

/// Body of a non-2xx reply. Chat errors use `detail`, upload errors use `message`.
#[derive(Debug, Deserialize)]
pub struct ErrorBody {
    #[serde(default)]
    pub detail: Option<String>,
    #[serde(default)]
    pub message: Option<String>,
}

pub const STATUS_SUCCESS: &str = "success";

// --- Normalized results ---

#[derive(Debug, Clone, PartialEq)]
pub enum ChatReply {
    Success {
        response: String,
        context: Option<HashMap<String, serde_json::Value>>,
    },
    Error {
        response: String,
    },
}

impl ChatReply {
    pub fn text(&self) -> &str {
        match self {
            ChatReply::Success { response, .. } | ChatReply::Error { response } => response,
        }
    }

    pub fn is_success(&self) -> bool {
        matches!(self, ChatReply::Success { .. })
    }
}

impl From<MessageResponse> for ChatReply {
    fn from(body: MessageResponse) -> Self {
        if body.status == STATUS_SUCCESS {
            ChatReply::Success {
                response: body.response,
                context: body.context,
            }
        } else {
            ChatReply::Error {
                response: body.response,
            }
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UploadReply {
    Success {
        message: String,
        document_id: String,
        document_name: String,
    },
    Error {
        message: String,
    },
}

impl From<DocumentUploadResponse> for UploadReply {
    fn from(body: DocumentUploadResponse) -> Self {
        match (body.status.as_str(), body.document_id, body.document_name) {
            (STATUS_SUCCESS, Some(document_id), Some(document_name)) => UploadReply::Success {
                message: body.message.unwrap_or_default(),
                document_id,
                document_name,
            },
            _ => UploadReply::Error {
                message: body
                    .message
                    .filter(|m| !m.is_empty())
                    .unwrap_or_else(|| "Upload failed".to_string()),
            },
        }
    }
}
