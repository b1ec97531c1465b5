// On-disk session store
//
// One TOML file per profile under the platform data dir. The token is
// written in clear text, so the file is created owner-only on Unix.

use std::io::Write;
use std::path::{Path, PathBuf};

use secrecy::{ExposeSecret, SecretString};
use serde::{Deserialize, Serialize};
use tracing::debug;

use shopdesk_api::{Error, Role, Session, SessionStore};

use crate::ConfigError;

/// Serialized form of a [`Session`].
#[derive(Debug, Serialize, Deserialize)]
struct SessionRecord {
    token: String,
    role: Role,
    username: String,
    user_id: Option<String>,
    customer_id: Option<String>,
}

impl From<&Session> for SessionRecord {
    fn from(s: &Session) -> Self {
        Self {
            token: s.token.expose_secret().to_owned(),
            role: s.role,
            username: s.username.clone(),
            user_id: s.user_id.clone(),
            customer_id: s.customer_id.clone(),
        }
    }
}

impl From<SessionRecord> for Session {
    fn from(r: SessionRecord) -> Self {
        Self {
            token: SecretString::from(r.token),
            role: r.role,
            username: r.username,
            user_id: r.user_id,
            customer_id: r.customer_id,
        }
    }
}

/// Session persisted to `{sessions_dir}/{profile}.toml`.
#[derive(Debug, Clone)]
pub struct FileSessionStore {
    path: PathBuf,
}

impl FileSessionStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Store for a named profile in the platform data directory.
    ///
    /// The name becomes a file name, so separators and `..` are rejected.
    pub fn for_profile(profile_name: &str) -> Result<Self, ConfigError> {
        validate_profile_name(profile_name)?;
        Ok(Self::new(
            crate::sessions_dir().join(format!("{profile_name}.toml")),
        ))
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

fn validate_profile_name(name: &str) -> Result<(), ConfigError> {
    let reason = if name.is_empty() {
        "must not be empty"
    } else if name.chars().any(|c| matches!(c, '/' | '\\' | '\0')) {
        "must not contain path separators"
    } else if name.starts_with('.') {
        "must not start with '.'"
    } else {
        return Ok(());
    };
    Err(ConfigError::Validation {
        field: "profile".into(),
        reason: format!("{name:?} {reason}"),
    })
}

fn storage_err(action: &str, path: &Path, e: impl std::fmt::Display) -> Error {
    Error::Storage(format!("failed to {action} {}: {e}", path.display()))
}

impl SessionStore for FileSessionStore {
    fn load(&self) -> Result<Option<Session>, Error> {
        let raw = match std::fs::read_to_string(&self.path) {
            Ok(raw) => raw,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(None),
            Err(e) => return Err(storage_err("read", &self.path, e)),
        };
        let record: SessionRecord =
            toml::from_str(&raw).map_err(|e| storage_err("parse", &self.path, e))?;
        Ok(Some(record.into()))
    }

    fn save(&self, session: &Session) -> Result<(), Error> {
        if let Some(parent) = self.path.parent() {
            std::fs::create_dir_all(parent).map_err(|e| storage_err("create", parent, e))?;
        }
        let body = toml::to_string_pretty(&SessionRecord::from(session))
            .map_err(|e| storage_err("serialize", &self.path, e))?;

        let mut options = std::fs::OpenOptions::new();
        options.write(true).create(true).truncate(true);
        #[cfg(unix)]
        {
            use std::os::unix::fs::OpenOptionsExt;
            options.mode(0o600);
        }
        let mut file = options
            .open(&self.path)
            .map_err(|e| storage_err("open", &self.path, e))?;
        file.write_all(body.as_bytes())
            .map_err(|e| storage_err("write", &self.path, e))?;

        debug!(path = %self.path.display(), "session saved");
        Ok(())
    }

    fn clear(&self) -> Result<(), Error> {
        match std::fs::remove_file(&self.path) {
            Ok(()) => {
                debug!(path = %self.path.display(), "session removed");
                Ok(())
            }
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(storage_err("remove", &self.path, e)),
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    fn sample() -> Session {
        Session {
            token: SecretString::from("t0k".to_owned()),
            role: Role::Customer,
            username: "linh".into(),
            user_id: None,
            customer_id: Some("31".into()),
        }
    }

    #[test]
    fn profile_names_cannot_leave_the_sessions_dir() {
        for bad in ["../x", "a/b", "a\\b", "..", ".hidden", ""] {
            assert!(
                matches!(
                    FileSessionStore::for_profile(bad),
                    Err(ConfigError::Validation { .. })
                ),
                "{bad:?} should be rejected"
            );
        }
        let store = FileSessionStore::for_profile("staging-eu").unwrap();
        assert_eq!(store.path().file_name().unwrap(), "staging-eu.toml");
        assert_eq!(store.path().parent().unwrap(), crate::sessions_dir());
    }

    #[test]
    fn missing_file_means_logged_out() {
        let dir = tempfile::tempdir().unwrap();
        let store = FileSessionStore::new(dir.path().join("default.toml"));
        assert!(store.load().unwrap().is_none());
    }

    #[test]
    fn save_load_clear_cycle() {
        let dir = tempfile::tempdir().unwrap();
        let store = FileSessionStore::new(dir.path().join("sessions").join("default.toml"));

        store.save(&sample()).unwrap();
        let loaded = store.load().unwrap().unwrap();
        assert_eq!(loaded.token.expose_secret(), "t0k");
        assert_eq!(loaded.role, Role::Customer);
        assert_eq!(loaded.customer_id.as_deref(), Some("31"));

        store.clear().unwrap();
        assert!(!store.path().exists());
        // Clearing twice is fine.
        store.clear().unwrap();
    }

    #[cfg(unix)]
    #[test]
    fn session_file_is_owner_only() {
        use std::os::unix::fs::PermissionsExt;

        let dir = tempfile::tempdir().unwrap();
        let store = FileSessionStore::new(dir.path().join("default.toml"));
        store.save(&sample()).unwrap();

        let mode = std::fs::metadata(store.path()).unwrap().permissions().mode();
        assert_eq!(mode & 0o777, 0o600);
    }

    #[test]
    fn corrupt_file_is_a_storage_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("default.toml");
        std::fs::write(&path, "token = ").unwrap();

        let err = FileSessionStore::new(&path).load().unwrap_err();
        assert_eq!(err.kind(), shopdesk_api::ErrorKind::Storage);
    }
}
