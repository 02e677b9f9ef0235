use std::path::PathBuf;

use docqa_core::OperationId;

pub const HELP: &str = "\
Commands:
  select <file.pdf>...  choose the PDFs for the next batch (replaces the selection)
  process               upload the selected files for ingestion
  ask <question>        ask a question about the ingested documents
  dismiss <id>          close a finished notification
  history               reload the conversation history
  help                  show this help
  quit                  exit";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Select(Vec<PathBuf>),
    Process,
    /// Raw query text, validated by the core.
    Ask(String),
    Dismiss(OperationId),
    History,
    Help,
    Quit,
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum CommandError {
    #[error("unknown command `{0}`; type `help` for a list")]
    Unknown(String),
    #[error("cannot split file list: {0}")]
    BadQuoting(String),
    #[error("`dismiss` needs a notification id, got `{0}`")]
    BadId(String),
}

/// Parses one input line. Blank lines yield `None`.
pub fn parse_command(line: &str) -> Result<Option<Command>, CommandError> {
    let line = line.trim_start();
    if line.trim().is_empty() {
        return Ok(None);
    }
    let (keyword, rest) = line.split_once(char::is_whitespace).unwrap_or((line, ""));

    let command = match keyword.to_ascii_lowercase().as_str() {
        "select" => {
            let paths = shell_words::split(rest)
                .map_err(|err| CommandError::BadQuoting(err.to_string()))?;
            Command::Select(paths.into_iter().map(PathBuf::from).collect())
        }
        "process" => Command::Process,
        "ask" => Command::Ask(rest.trim_end_matches(['\r', '\n']).to_string()),
        "dismiss" => {
            let raw = rest.trim();
            let id = raw
                .parse()
                .map_err(|_| CommandError::BadId(raw.to_string()))?;
            Command::Dismiss(id)
        }
        "history" => Command::History,
        "help" | "?" => Command::Help,
        "quit" | "exit" => Command::Quit,
        other => return Err(CommandError::Unknown(other.to_string())),
    };
    Ok(Some(command))
}
