use std::path::Path;

use bytes::Bytes;
use thiserror::Error;

use crate::api::{ChatBackend, UploadReply};
use crate::config::{ALLOWED_EXTENSIONS, MAX_UPLOAD_BYTES};
use crate::models::UploadedDocument;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum AttachmentError {
    #[error("Only .txt and .pdf files are supported")]
    UnsupportedType,

    #[error("File size exceeds 10MB limit")]
    TooLarge,

    #[error("Could not read {path}: {reason}")]
    Unreadable { path: String, reason: String },
}

/// A file selected locally but not yet uploaded.
#[derive(Debug, Clone)]
pub struct PendingFile {
    pub temp_id: String,
    pub name: String,
    pub data: Bytes,
}

impl PendingFile {
    pub fn new(name: impl Into<String>, data: impl Into<Bytes>) -> Self {
        Self {
            temp_id: uuid::Uuid::new_v4().to_string(),
            name: name.into(),
            data: data.into(),
        }
    }

    pub fn size(&self) -> u64 {
        self.data.len() as u64
    }

    pub fn mime_type(&self) -> &'static str {
        match extension(&self.name).as_deref() {
            Some("pdf") => "application/pdf",
            Some("txt") => "text/plain",
            _ => "application/octet-stream",
        }
    }
}

fn extension(name: &str) -> Option<String> {
    name.rsplit_once('.').map(|(_, ext)| ext.to_lowercase())
}

/// Check a candidate file's name and size against the upload rules.
pub fn validate(name: &str, size: u64) -> Result<(), AttachmentError> {
    let allowed = extension(name)
        .map(|ext| ALLOWED_EXTENSIONS.contains(&ext.as_str()))
        .unwrap_or(false);
    if !allowed {
        return Err(AttachmentError::UnsupportedType);
    }
    if size > MAX_UPLOAD_BYTES {
        return Err(AttachmentError::TooLarge);
    }
    Ok(())
}

#[derive(Debug, Default)]
pub struct AttachmentManager {
    pending: Vec<PendingFile>,
}

impl AttachmentManager {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn pending(&self) -> &[PendingFile] {
        &self.pending
    }

    pub fn has_pending(&self) -> bool {
        !self.pending.is_empty()
    }

    /// Validate and queue one file. Returns its temporary id.
    pub fn select_file(&mut self, file: PendingFile) -> Result<String, AttachmentError> {
        if let Err(e) = validate(&file.name, file.size()) {
            tracing::warn!("Rejected {}: {}", file.name, e);
            return Err(e);
        }
        let temp_id = file.temp_id.clone();
        self.pending.push(file);
        Ok(temp_id)
    }

    /// Validate and queue each file independently; one rejection does not block the rest.
    pub fn select_files(
        &mut self,
        files: impl IntoIterator<Item = PendingFile>,
    ) -> Vec<Result<String, AttachmentError>> {
        files.into_iter().map(|f| self.select_file(f)).collect()
    }

    /// Queue a file from disk. Size and type are checked before the contents are read.
    pub async fn select_path(&mut self, path: &Path) -> Result<String, AttachmentError> {
        let unreadable = |e: std::io::Error| AttachmentError::Unreadable {
            path: path.display().to_string(),
            reason: e.to_string(),
        };

        let name = path
            .file_name()
            .and_then(|n| n.to_str())
            .unwrap_or_default()
            .to_string();
        let metadata = tokio::fs::metadata(path).await.map_err(unreadable)?;
        if let Err(e) = validate(&name, metadata.len()) {
            tracing::warn!("Rejected {}: {}", path.display(), e);
            return Err(e);
        }

        let data = tokio::fs::read(path).await.map_err(unreadable)?;
        self.select_file(PendingFile::new(name, data))
    }

    pub fn remove_attachment(&mut self, temp_id: &str) {
        self.pending.retain(|f| f.temp_id != temp_id);
    }

    pub fn take_pending(&mut self) -> Vec<PendingFile> {
        std::mem::take(&mut self.pending)
    }
}

/// Upload files one at a time, in order. Failed uploads are logged and left
/// out of the result; they never abort the remaining uploads.
pub async fn commit_uploads(
    backend: &dyn ChatBackend,
    pending: &[PendingFile],
) -> Vec<UploadedDocument> {
    let mut uploaded = Vec::with_capacity(pending.len());
    for file in pending {
        match backend.upload_document(file).await {
            UploadReply::Success {
                document_id,
                document_name,
                ..
            } => uploaded.push(UploadedDocument {
                id: document_id,
                name: document_name,
            }),
            UploadReply::Error { message } => {
                tracing::error!("Failed to upload {}: {}", file.name, message);
            }
        }
    }
    uploaded
}

/// Shorten a file name for display, keeping its extension: `prefix....ext`.
pub fn truncate_filename(name: &str, max_len: usize) -> String {
    if name.chars().count() <= max_len {
        return name.to_string();
    }

    match name.rsplit_once('.') {
        Some((stem, ext)) => {
            let keep = max_len.saturating_sub(ext.chars().count() + 4);
            let head: String = stem.chars().take(keep).collect();
            format!("{}....{}", head, ext)
        }
        None => {
            let head: String = name.chars().take(max_len.saturating_sub(3)).collect();
            format!("{}...", head)
        }
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Mutex;

    use async_trait::async_trait;

    use super::*;
    use crate::api::ChatReply;

    struct ScriptedUploads {
        fail_names: Vec<&'static str>,
        seen: Mutex<Vec<String>>,
    }

    #[async_trait]
    impl ChatBackend for ScriptedUploads {
        async fn send_message(&self, _text: &str) -> ChatReply {
            unreachable!("uploads only")
        }

        async fn upload_document(&self, file: &PendingFile) -> UploadReply {
            self.seen.lock().unwrap().push(file.name.clone());
            if self.fail_names.contains(&file.name.as_str()) {
                UploadReply::Error {
                    message: "Upload failed".to_string(),
                }
            } else {
                UploadReply::Success {
                    message: "ok".to_string(),
                    document_id: format!("id-{}", file.name),
                    document_name: file.name.clone(),
                }
            }
        }
    }

    #[test]
    fn test_rejects_unsupported_type() {
        let mut manager = AttachmentManager::new();
        let err = manager
            .select_file(PendingFile::new("diagram.png", vec![0u8; 16]))
            .unwrap_err();
        assert_eq!(err.to_string(), "Only .txt and .pdf files are supported");
        assert!(!manager.has_pending());
    }

    #[test]
    fn test_rejects_oversized_file() {
        let mut manager = AttachmentManager::new();
        let data = vec![0u8; MAX_UPLOAD_BYTES as usize + 1];
        let err = manager
            .select_file(PendingFile::new("big.pdf", data))
            .unwrap_err();
        assert_eq!(err.to_string(), "File size exceeds 10MB limit");
        assert!(!manager.has_pending());
    }

    #[test]
    fn test_accepts_limit_and_uppercase_extension() {
        assert!(validate("notes.TXT", MAX_UPLOAD_BYTES).is_ok());
        assert_eq!(validate("README", 10), Err(AttachmentError::UnsupportedType));
    }

    #[test]
    fn test_select_files_keeps_valid_ones() {
        let mut manager = AttachmentManager::new();
        let results = manager.select_files(vec![
            PendingFile::new("a.txt", "alpha"),
            PendingFile::new("b.png", "beta"),
            PendingFile::new("c.pdf", "gamma"),
        ]);
        assert!(results[0].is_ok());
        assert_eq!(results[1], Err(AttachmentError::UnsupportedType));
        assert!(results[2].is_ok());

        let names: Vec<&str> = manager.pending().iter().map(|f| f.name.as_str()).collect();
        assert_eq!(names, vec!["a.txt", "c.pdf"]);
    }

    #[test]
    fn test_remove_attachment_is_idempotent() {
        let mut manager = AttachmentManager::new();
        let id = manager
            .select_file(PendingFile::new("a.txt", "alpha"))
            .unwrap();
        manager.remove_attachment("missing");
        assert_eq!(manager.pending().len(), 1);
        manager.remove_attachment(&id);
        manager.remove_attachment(&id);
        assert!(!manager.has_pending());
    }

    #[tokio::test]
    async fn test_select_path_reads_file() {
        let dir = std::env::temp_dir().join(format!("docchat-{}", uuid::Uuid::new_v4()));
        tokio::fs::create_dir_all(&dir).await.unwrap();
        let path = dir.join("notes.txt");
        tokio::fs::write(&path, "some notes").await.unwrap();

        let mut manager = AttachmentManager::new();
        manager.select_path(&path).await.unwrap();
        assert_eq!(manager.pending()[0].name, "notes.txt");
        assert_eq!(&manager.pending()[0].data[..], b"some notes");

        let missing = manager.select_path(&dir.join("gone.pdf")).await;
        assert!(matches!(missing, Err(AttachmentError::Unreadable { .. })));

        tokio::fs::remove_dir_all(&dir).await.unwrap();
    }

    #[tokio::test]
    async fn test_commit_uploads_skips_failures_in_order() {
        let backend = ScriptedUploads {
            fail_names: vec!["second.pdf"],
            seen: Mutex::new(Vec::new()),
        };
        let pending = vec![
            PendingFile::new("first.txt", "1"),
            PendingFile::new("second.pdf", "2"),
            PendingFile::new("third.txt", "3"),
        ];

        let uploaded = commit_uploads(&backend, &pending).await;
        assert_eq!(
            uploaded,
            vec![
                UploadedDocument {
                    id: "id-first.txt".to_string(),
                    name: "first.txt".to_string()
                },
                UploadedDocument {
                    id: "id-third.txt".to_string(),
                    name: "third.txt".to_string()
                },
            ]
        );
        assert_eq!(
            *backend.seen.lock().unwrap(),
            vec!["first.txt", "second.pdf", "third.txt"]
        );
    }

    #[test]
    fn test_truncate_filename_keeps_extension() {
        let name = "a_very_long_filename_that_exceeds_limit.txt";
        let short = truncate_filename(name, 25);
        assert!(short.ends_with(".txt"));
        assert!(short.chars().count() <= 25);
        assert!(short.starts_with("a_very_long_filena"));
    }

    #[test]
    fn test_truncate_filename_short_names_untouched() {
        assert_eq!(truncate_filename("report.pdf", 40), "report.pdf");
        assert_eq!(truncate_filename("abcdefghij", 5), "ab...");
    }
}
