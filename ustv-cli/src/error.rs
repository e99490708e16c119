use std::process::ExitStatus;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum CliError {
    #[error(transparent)]
    Core(#[from] ustvnow::Error),

    #[error("Configuration error: {0}")]
    Config(#[from] anyhow::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Prompt error: {0}")]
    Prompt(#[from] inquire::InquireError),

    #[error("No channels are available on this account")]
    NoChannels,

    #[error("Player '{program}' exited with {status}")]
    Player { program: String, status: ExitStatus },

    #[error("Invalid input: {0}")]
    InvalidInput(String),
}

impl CliError {
    pub fn invalid_input(msg: impl Into<String>) -> Self {
        Self::InvalidInput(msg.into())
    }

    /// The HTTP exchange behind a core failure, for diagnostics.
    pub fn exchange(&self) -> Option<&ustvnow::HttpExchange> {
        match self {
            Self::Core(e) => e.exchange(),
            _ => None,
        }
    }
}

pub type Result<T> = std::result::Result<T, CliError>;
