// Session store: a two-line file `<server_url>\n<session_token>` kept in
// the per-user `.goshort` directory. Written on login, read by every
// authenticated command, never deleted by the program.

use crate::error::{GoshortError, Result};
use std::fs::{self, OpenOptions};
use std::io::{ErrorKind, Write};
use std::path::{Path, PathBuf};

pub const SESSION_FILE_NAME: &str = "session.txt";

/// Server URL plus the opaque token it issued. Both fields are non-empty
/// once persisted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionRecord {
    pub server_url: String,
    pub token: String,
}

#[derive(Debug, Clone)]
pub struct SessionStore {
    dir: PathBuf,
}

impl SessionStore {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        SessionStore { dir: dir.into() }
    }

    pub fn path(&self) -> PathBuf {
        self.dir.join(SESSION_FILE_NAME)
    }

    /// Overwrite the session file, creating the directory if needed. The
    /// file is only readable by the owning user.
    pub fn save(&self, server_url: &str, token: &str) -> Result<PathBuf> {
        let path = self.path();
        if server_url.is_empty() || token.is_empty() {
            return Err(GoshortError::SessionCorrupt {
                path,
                reason: "server URL and token must both be non-empty",
            });
        }

        fs::create_dir_all(&self.dir).map_err(|source| GoshortError::Io {
            path: self.dir.clone(),
            source,
        })?;

        let io_err = |source| GoshortError::Io {
            path: path.clone(),
            source,
        };

        {
            let mut file = owner_only(OpenOptions::new().write(true).create(true).truncate(true))
                .open(&path)
                .map_err(io_err)?;
            file.write_all(format!("{}\n{}", server_url, token).as_bytes())
                .map_err(io_err)?;
        }
        restrict_permissions(&path).map_err(io_err)?;

        tracing::debug!(path = %path.display(), "session file written");
        Ok(path)
    }

    /// Read the stored record. A missing file (or directory) is
    /// `SessionMissing`; fewer than two lines is `SessionCorrupt`.
    pub fn load(&self) -> Result<SessionRecord> {
        let path = self.path();
        let data = match fs::read_to_string(&path) {
            Ok(data) => data,
            Err(e) if e.kind() == ErrorKind::NotFound => {
                return Err(GoshortError::SessionMissing { path })
            }
            Err(source) => return Err(GoshortError::Io { path, source }),
        };
        parse_record(&data).map_err(|reason| GoshortError::SessionCorrupt { path, reason })
    }
}

fn parse_record(data: &str) -> std::result::Result<SessionRecord, &'static str> {
    let (server_url, token) = data
        .split_once('\n')
        .ok_or("expected a server URL line and a token line")?;
    let server_url = server_url.trim_end_matches('\r');
    let token = token.trim_end_matches(['\r', '\n']);

    if server_url.is_empty() {
        return Err("server URL is empty");
    }
    if token.is_empty() {
        return Err("session token is empty");
    }
    Ok(SessionRecord {
        server_url: server_url.to_string(),
        token: token.to_string(),
    })
}

#[cfg(unix)]
fn owner_only(options: &mut OpenOptions) -> &mut OpenOptions {
    use std::os::unix::fs::OpenOptionsExt;
    options.mode(0o600)
}

#[cfg(not(unix))]
fn owner_only(options: &mut OpenOptions) -> &mut OpenOptions {
    options
}

/// `mode` only applies on creation; an older file keeps its bits otherwise.
#[cfg(unix)]
fn restrict_permissions(path: &Path) -> std::io::Result<()> {
    use std::os::unix::fs::PermissionsExt;
    fs::set_permissions(path, fs::Permissions::from_mode(0o600))
}

#[cfg(not(unix))]
fn restrict_permissions(_path: &Path) -> std::io::Result<()> {
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn store(dir: &TempDir) -> SessionStore {
        SessionStore::new(dir.path().join(".goshort"))
    }

    #[test]
    fn test_save_then_load() {
        let dir = TempDir::new().unwrap();
        let store = store(&dir);

        store.save("https://short.example", "tok-1").unwrap();
        let record = store.load().unwrap();
        assert_eq!(record.server_url, "https://short.example");
        assert_eq!(record.token, "tok-1");
    }

    #[test]
    fn test_save_overwrites_previous_record() {
        let dir = TempDir::new().unwrap();
        let store = store(&dir);

        store.save("https://one.example", "first").unwrap();
        store.save("https://two.example", "second").unwrap();
        assert_eq!(
            store.load().unwrap(),
            SessionRecord {
                server_url: "https://two.example".into(),
                token: "second".into(),
            }
        );
    }

    #[test]
    fn test_file_format_is_two_lines() {
        let dir = TempDir::new().unwrap();
        let store = store(&dir);

        let path = store.save("http://localhost:8080", "abc").unwrap();
        assert_eq!(fs::read_to_string(path).unwrap(), "http://localhost:8080\nabc");
    }

    #[cfg(unix)]
    #[test]
    fn test_file_is_owner_only() {
        use std::os::unix::fs::PermissionsExt;

        let dir = TempDir::new().unwrap();
        let store = store(&dir);
        fs::create_dir_all(dir.path().join(".goshort")).unwrap();
        fs::write(store.path(), "old").unwrap();
        fs::set_permissions(store.path(), fs::Permissions::from_mode(0o644)).unwrap();

        store.save("http://localhost", "abc").unwrap();
        let mode = fs::metadata(store.path()).unwrap().permissions().mode();
        assert_eq!(mode & 0o777, 0o600);
    }

    #[test]
    fn test_load_missing_directory() {
        let dir = TempDir::new().unwrap();
        let err = store(&dir).load().unwrap_err();
        assert!(matches!(err, GoshortError::SessionMissing { .. }));
    }

    #[test]
    fn test_load_missing_file() {
        let dir = TempDir::new().unwrap();
        fs::create_dir_all(dir.path().join(".goshort")).unwrap();
        let err = store(&dir).load().unwrap_err();
        assert!(matches!(err, GoshortError::SessionMissing { .. }));
    }

    #[test]
    fn test_load_one_line_is_corrupt() {
        let dir = TempDir::new().unwrap();
        let store = store(&dir);
        fs::create_dir_all(dir.path().join(".goshort")).unwrap();
        fs::write(store.path(), "https://short.example").unwrap();

        let err = store.load().unwrap_err();
        assert!(matches!(err, GoshortError::SessionCorrupt { .. }));
    }

    #[test]
    fn test_token_is_remainder_after_first_newline() {
        let record = parse_record("https://a.example\r\ntok\nen\n").unwrap();
        assert_eq!(record.server_url, "https://a.example");
        assert_eq!(record.token, "tok\nen");
    }

    #[test]
    fn test_empty_fields_are_corrupt() {
        assert!(parse_record("\nabc").is_err());
        assert!(parse_record("https://a.example\n").is_err());
    }

    #[test]
    fn test_save_rejects_empty_token() {
        let dir = TempDir::new().unwrap();
        let err = store(&dir).save("https://a.example", "").unwrap_err();
        assert!(matches!(err, GoshortError::SessionCorrupt { .. }));
        assert!(!store(&dir).path().exists());
    }
}
