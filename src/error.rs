// Error taxonomy shared by every command. None of these are recovered
// locally: the binary prints the message chain and exits non-zero.

use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum GoshortError {
    /// Bad or missing command-line arguments.
    #[error("{0}")]
    Usage(String),

    /// DNS, connect, timeout or body read failure.
    #[error("failed to reach {url}")]
    Transport {
        url: String,
        #[source]
        source: reqwest::Error,
    },

    #[error("{url} responded with status code: {status}")]
    HttpStatus { url: String, status: u16 },

    #[error("failed to decode response from {url}")]
    Decode {
        url: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("no session found at {}", path.display())]
    SessionMissing { path: PathBuf },

    #[error("session file {} is invalid: {reason}", path.display())]
    SessionCorrupt { path: PathBuf, reason: &'static str },

    #[error("session token was rejected: {reason}")]
    InvalidSession { reason: String },

    /// The server answered 200 but with `success: false`.
    #[error("{action} failed: {message}")]
    Application {
        action: &'static str,
        message: String,
    },

    #[error("failed to get user home directory")]
    HomeDirUnavailable,

    #[error("failed to build HTTP client")]
    HttpClient(#[source] reqwest::Error),

    #[error("failed to read input")]
    Prompt(#[source] std::io::Error),

    #[error("failed to write output")]
    Output(#[source] std::io::Error),

    #[error("I/O error on {}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

impl GoshortError {
    /// True for the errors that mean the stored session can't be used.
    pub fn needs_login(&self) -> bool {
        matches!(
            self,
            GoshortError::SessionMissing { .. }
                | GoshortError::SessionCorrupt { .. }
                | GoshortError::InvalidSession { .. }
        )
    }
}

pub type Result<T> = std::result::Result<T, GoshortError>;
