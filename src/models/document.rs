use serde::{Deserialize, Serialize};

/// A document the backend accepted; `id` is server-assigned.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UploadedDocument {
    pub id: String,
    pub name: String,
}
