use serde::{Deserialize, Serialize};

use super::document::UploadedDocument;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AttachmentKind {
    Document,
}

/// Reference to an uploaded document, carried by the user message that introduced it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MessageAttachment {
    pub id: String,
    pub name: String,
    #[serde(rename = "type")]
    pub kind: AttachmentKind,
}

impl From<&UploadedDocument> for MessageAttachment {
    fn from(doc: &UploadedDocument) -> Self {
        Self {
            id: doc.id.clone(),
            name: doc.name.clone(),
            kind: AttachmentKind::Document,
        }
    }
}
