pub mod commands;
pub mod markdown;
pub mod render;

use anyhow::{Context, Result};
use tokio::io::{AsyncBufReadExt, AsyncWriteExt, BufReader};

use crate::services::session::{ChatSession, SubmitOutcome};
use commands::{parse_command, Command, HELP};
use render::{render_chat, render_documents, render_pending, render_sidebar};

/// Resolve `/select` input: a 1-based sidebar position, otherwise a raw chat id.
fn resolve_selection(session: &ChatSession, arg: &str) -> String {
    let sidebar = session.store.sidebar();
    match arg.parse::<usize>() {
        Ok(n) if (1..=sidebar.len()).contains(&n) => sidebar[n - 1].id.clone(),
        _ => arg.to_string(),
    }
}

async fn handle_command(session: &mut ChatSession, command: Command) -> Option<String> {
    let output = match command {
        Command::NewChat => {
            session.store.create_chat();
            render_chat(&session.store)
        }
        Command::ListChats => render_sidebar(&session.store),
        Command::Select(arg) => {
            let id = resolve_selection(session, &arg);
            session.store.select_chat(&id);
            render_chat(&session.store)
        }
        Command::Attach(path) => match session.attachments.select_path(&path).await {
            Ok(_) => render_pending(&session.attachments),
            Err(e) => e.to_string(),
        },
        Command::Detach(temp_id) => {
            session.attachments.remove_attachment(&temp_id);
            render_pending(&session.attachments)
        }
        Command::Pending => render_pending(&session.attachments),
        Command::Documents => session
            .store
            .active_chat()
            .and_then(|chat| render_documents(&chat.documents))
            .unwrap_or_else(|| "No documents uploaded in this conversation".to_string()),
        Command::Help => HELP.to_string(),
        Command::Quit => return None,
        Command::Invalid(message) => message,
        Command::Say(text) => match session.submit(&text).await {
            SubmitOutcome::Sent => render_chat(&session.store),
            SubmitOutcome::Deferred => format!(
                "{}\n\nStarted a new conversation. Send your message again.",
                render_chat(&session.store)
            ),
            SubmitOutcome::Ignored => String::new(),
        },
    };
    Some(output)
}

/// Read commands from stdin until EOF or `/quit`, printing the view after each one.
pub async fn run(session: &mut ChatSession) -> Result<()> {
    let mut stdout = tokio::io::stdout();
    let mut lines = BufReader::new(tokio::io::stdin()).lines();

    stdout
        .write_all(format!("{}\n\n{}\n", render_chat(&session.store), HELP).as_bytes())
        .await
        .context("Failed to write to stdout")?;

    loop {
        stdout.write_all(b"> ").await?;
        stdout.flush().await?;

        let Some(line) = lines.next_line().await.context("Failed to read stdin")? else {
            break;
        };

        match handle_command(session, parse_command(&line)).await {
            Some(output) if output.is_empty() => {}
            Some(output) => {
                stdout.write_all(format!("{}\n", output).as_bytes()).await?;
            }
            None => break,
        }
    }

    tracing::debug!("Session ended with {} chats", session.store.chats().len());
    Ok(())
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use async_trait::async_trait;

    use super::*;
    use crate::api::{ChatBackend, ChatReply, UploadReply};
    use crate::services::attachments::PendingFile;

    struct EchoBackend;

    #[async_trait]
    impl ChatBackend for EchoBackend {
        async fn send_message(&self, text: &str) -> ChatReply {
            ChatReply::Success {
                response: text.to_uppercase(),
                context: None,
            }
        }

        async fn upload_document(&self, file: &PendingFile) -> UploadReply {
            UploadReply::Success {
                message: "ok".to_string(),
                document_id: file.temp_id.clone(),
                document_name: file.name.clone(),
            }
        }
    }

    fn session() -> ChatSession {
        ChatSession::new(Arc::new(EchoBackend))
    }

    #[tokio::test]
    async fn test_first_message_prompts_resend() {
        let mut session = session();
        let output = handle_command(&mut session, Command::Say("hi".to_string()))
            .await
            .unwrap();
        assert!(output.ends_with("Send your message again."));

        let output = handle_command(&mut session, Command::Say("hi".to_string()))
            .await
            .unwrap();
        assert!(output.contains("Bot:\n  HI"));
    }

    #[tokio::test]
    async fn test_select_by_position() {
        let mut session = session();
        let first = session.store.create_chat();
        session.store.create_chat();

        let position = session
            .store
            .sidebar()
            .iter()
            .position(|c| c.id == first)
            .unwrap()
            + 1;
        handle_command(&mut session, Command::Select(position.to_string())).await;
        assert_eq!(session.store.active_chat_id(), Some(first.as_str()));

        handle_command(&mut session, Command::Select("unknown".to_string())).await;
        assert!(session.store.active_chat().is_none());
    }

    #[tokio::test]
    async fn test_attach_rejection_is_reported() {
        let mut session = session();
        let output = handle_command(
            &mut session,
            Command::Attach(std::path::PathBuf::from("picture.png")),
        )
        .await
        .unwrap();
        assert!(!output.is_empty());
        assert!(!session.attachments.has_pending());
    }

    #[tokio::test]
    async fn test_quit_ends_loop() {
        let mut session = session();
        assert!(handle_command(&mut session, Command::Quit).await.is_none());
    }
}
