use async_trait::async_trait;
use reqwest::multipart::{Form, Part};
use reqwest::{Client, Response, StatusCode};

use super::traits::ChatBackend;
use super::types::{
    ApiError, ChatReply, DocumentUploadResponse, ErrorBody, MessageRequest, MessageResponse,
    UploadReply,
};
use crate::config::{ApiConfig, FALLBACK_REPLY};
use crate::services::attachments::PendingFile;

/// HTTP client for the chat and upload endpoints. Single attempt per call,
/// transport defaults for timeouts.
pub struct ApiClient {
    client: Client,
    config: ApiConfig,
}

impl ApiClient {
    pub fn new(config: ApiConfig) -> Self {
        Self {
            client: Client::new(),
            config,
        }
    }

    pub fn config(&self) -> &ApiConfig {
        &self.config
    }

    async fn try_send_message(&self, text: &str) -> Result<MessageResponse, ApiError> {
        let url = self.config.endpoint("chat");
        tracing::debug!(%url, "Sending chat message");

        let response = self
            .client
            .post(&url)
            .header("content-type", "application/json")
            .json(&MessageRequest { message: text })
            .send()
            .await
            .map_err(|e| ApiError::Network(e.to_string()))?;

        if !response.status().is_success() {
            let status = response.status();
            let body = Self::read_error_body(response).await;
            let message = body
                .and_then(|b| b.detail)
                .unwrap_or_else(|| "Failed to send message".to_string());
            return Err(Self::http_error(status, message));
        }

        response
            .json::<MessageResponse>()
            .await
            .map_err(|e| ApiError::InvalidResponse(e.to_string()))
    }

    async fn try_upload_document(
        &self,
        file: &PendingFile,
    ) -> Result<DocumentUploadResponse, ApiError> {
        let url = self.config.endpoint("upload");
        tracing::debug!(%url, name = %file.name, size = file.size(), "Uploading document");

        let part = Part::bytes(file.data.to_vec())
            .file_name(file.name.clone())
            .mime_str(file.mime_type())
            .map_err(|e| ApiError::InvalidResponse(e.to_string()))?;
        let form = Form::new().part("file", part);

        let response = self
            .client
            .post(&url)
            .multipart(form)
            .send()
            .await
            .map_err(|e| ApiError::Network(e.to_string()))?;

        if !response.status().is_success() {
            let status = response.status();
            let body = Self::read_error_body(response).await;
            let message = body
                .and_then(|b| b.message.or(b.detail))
                .unwrap_or_else(|| "Failed to upload document".to_string());
            return Err(Self::http_error(status, message));
        }

        response
            .json::<DocumentUploadResponse>()
            .await
            .map_err(|e| ApiError::InvalidResponse(e.to_string()))
    }

    async fn read_error_body(response: Response) -> Option<ErrorBody> {
        let text = response.text().await.unwrap_or_default();
        serde_json::from_str(&text).ok()
    }

    fn http_error(status: StatusCode, message: String) -> ApiError {
        ApiError::Http {
            status: status.as_u16(),
            message,
        }
    }
}

#[async_trait]
impl ChatBackend for ApiClient {
    async fn send_message(&self, text: &str) -> ChatReply {
        match self.try_send_message(text).await {
            Ok(body) => ChatReply::from(body),
            Err(e) => {
                tracing::error!("Error sending message: {}", e);
                ChatReply::Error {
                    response: FALLBACK_REPLY.to_string(),
                }
            }
        }
    }

    async fn upload_document(&self, file: &PendingFile) -> UploadReply {
        match self.try_upload_document(file).await {
            Ok(body) => {
                let reply = UploadReply::from(body);
                if let UploadReply::Error { message } = &reply {
                    tracing::error!("Upload of {} rejected: {}", file.name, message);
                }
                reply
            }
            Err(e) => {
                tracing::error!("Error uploading {}: {}", file.name, e);
                UploadReply::Error {
                    message: e.user_message(),
                }
            }
        }
    }
}
