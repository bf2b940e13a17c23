use std::path::PathBuf;

pub const HELP: &str = "\
Commands:
  /new              start a new conversation
  /chats            list conversations, newest first
  /select <n|id>    switch to a conversation by list number or id
  /attach <path>    queue a .txt or .pdf file (max 10MB) for the next message
  /detach <id>      drop a queued file
  /pending          show queued files
  /docs             list documents uploaded in this conversation
  /help             show this help
  /quit             exit
Anything else is sent as a message.";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    NewChat,
    ListChats,
    Select(String),
    Attach(PathBuf),
    Detach(String),
    Pending,
    Documents,
    Help,
    Quit,
    Say(String),
    Invalid(String),
}

pub fn parse_command(line: &str) -> Command {
    let line = line.trim_end_matches(['\r', '\n']);
    let Some(rest) = line.trim_start().strip_prefix('/') else {
        return Command::Say(line.to_string());
    };

    let (name, arg) = match rest.split_once(char::is_whitespace) {
        Some((name, arg)) => (name, arg.trim()),
        None => (rest, ""),
    };

    match (name, arg) {
        ("new", _) => Command::NewChat,
        ("chats", _) => Command::ListChats,
        ("select", "") => Command::Invalid("Usage: /select <n|id>".to_string()),
        ("select", arg) => Command::Select(arg.to_string()),
        ("attach", "") => Command::Invalid("Usage: /attach <path>".to_string()),
        ("attach", arg) => Command::Attach(PathBuf::from(arg)),
        ("detach", "") => Command::Invalid("Usage: /detach <id>".to_string()),
        ("detach", arg) => Command::Detach(arg.to_string()),
        ("pending", _) => Command::Pending,
        ("docs", _) => Command::Documents,
        ("help", _) => Command::Help,
        ("quit" | "exit", _) => Command::Quit,
        (other, _) => Command::Invalid(format!("Unknown command: /{}", other)),
    }
}
