// Runtime configuration. The only knob that differs between deployments
// is the default server; everything else is fixed by the wire contract.

use crate::error::{GoshortError, Result};
use std::path::PathBuf;
use std::time::Duration;

/// Server used by `goshort login` when no server argument is given.
pub const DEFAULT_SERVER_URL: &str = "https://shortdemo.tkbstudios.com";

/// Every request blocks at most this long.
pub const REQUEST_TIMEOUT: Duration = Duration::from_secs(5);

/// Name of the per-user directory holding the session file.
pub const SESSION_DIR_NAME: &str = ".goshort";

/// Log filter used when `RUST_LOG` is not set.
pub const DEFAULT_LOG_FILTER: &str = "warn,goshort=info";
pub const VERBOSE_LOG_FILTER: &str = "warn,goshort=debug";

#[derive(Debug, Clone)]
pub struct Config {
    pub default_server: String,
    pub session_dir: PathBuf,
    pub timeout: Duration,
}

impl Config {
    /// Build the configuration for the current user. Fails when no home
    /// directory can be resolved.
    pub fn for_current_user(default_server: impl Into<String>) -> Result<Self> {
        let home = dirs::home_dir().ok_or(GoshortError::HomeDirUnavailable)?;
        Ok(Self::with_session_dir(
            default_server,
            home.join(SESSION_DIR_NAME),
        ))
    }

    pub fn with_session_dir(default_server: impl Into<String>, session_dir: PathBuf) -> Self {
        Config {
            default_server: default_server.into(),
            session_dir,
            timeout: REQUEST_TIMEOUT,
        }
    }

    pub fn log_filter(verbose: bool) -> &'static str {
        if verbose {
            VERBOSE_LOG_FILTER
        } else {
            DEFAULT_LOG_FILTER
        }
    }
}
