//! Credential persistence.
//!
//! A store is a single cell: it holds at most one credential, written on
//! login success and cleared on logout or when the credential stops decoding.

use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use std::sync::Mutex;

use log::{debug, warn};
use serde::{Deserialize, Serialize};

use super::SessionError;

/// File name of the persisted session inside the data directory.
pub const SESSION_FILE: &str = "session.json";

/// What the client keeps between runs.
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StoredCredential {
    pub token: String,
    /// Display name returned by the login call.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub username: Option<String>,
}

impl std::fmt::Debug for StoredCredential {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("StoredCredential")
            .field("token", &"<redacted>")
            .field("username", &self.username)
            .finish()
    }
}

/// Single-owner cell holding the current credential.
pub trait CredentialStore {
    /// Current credential, if any. Unreadable state reads as none and is discarded.
    fn load(&self) -> Option<StoredCredential>;

    /// Replace the stored credential.
    fn save(&self, credential: &StoredCredential) -> Result<(), SessionError>;

    /// Forget the stored credential. Clearing an empty store is a no-op.
    fn clear(&self) -> Result<(), SessionError>;
}

/// In-process store.
#[derive(Debug, Default)]
pub struct MemoryStore {
    cell: Mutex<Option<StoredCredential>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_credential(credential: StoredCredential) -> Self {
        Self {
            cell: Mutex::new(Some(credential)),
        }
    }
}

impl CredentialStore for MemoryStore {
    fn load(&self) -> Option<StoredCredential> {
        self.cell.lock().ok().and_then(|cell| cell.clone())
    }

    fn save(&self, credential: &StoredCredential) -> Result<(), SessionError> {
        let mut cell = self.cell.lock().map_err(|_| SessionError::Poisoned)?;
        *cell = Some(credential.clone());
        Ok(())
    }

    fn clear(&self) -> Result<(), SessionError> {
        let mut cell = self.cell.lock().map_err(|_| SessionError::Poisoned)?;
        *cell = None;
        Ok(())
    }
}

/// JSON file store; survives restarts of the client.
#[derive(Debug, Clone)]
pub struct FileStore {
    path: PathBuf,
}

impl FileStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Store `session.json` inside `dir`.
    pub fn in_dir(dir: impl AsRef<Path>) -> Self {
        Self::new(dir.as_ref().join(SESSION_FILE))
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl CredentialStore for FileStore {
    fn load(&self) -> Option<StoredCredential> {
        let raw = match std::fs::read_to_string(&self.path) {
            Ok(raw) => raw,
            Err(e) if e.kind() == ErrorKind::NotFound => return None,
            Err(e) => {
                warn!("cannot read {}: {e}", self.path.display());
                return None;
            }
        };
        match serde_json::from_str(&raw) {
            Ok(credential) => Some(credential),
            Err(e) => {
                warn!("discarding unreadable session file {}: {e}", self.path.display());
                if let Err(e) = std::fs::remove_file(&self.path) {
                    warn!("cannot remove {}: {e}", self.path.display());
                }
                None
            }
        }
    }

    fn save(&self, credential: &StoredCredential) -> Result<(), SessionError> {
        if let Some(parent) = self.path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let body = serde_json::to_vec_pretty(credential)?;
        // Readers never see a half-written file.
        let tmp = self.path.with_extension("json.tmp");
        std::fs::write(&tmp, body)?;
        std::fs::rename(&tmp, &self.path)?;
        debug!("session saved to {}", self.path.display());
        Ok(())
    }

    fn clear(&self) -> Result<(), SessionError> {
        match std::fs::remove_file(&self.path) {
            Ok(()) => {
                debug!("session file {} removed", self.path.display());
                Ok(())
            }
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(()),
            Err(e) => Err(e.into()),
        }
    }
}

/// Default data directory: `<platform data dir>/showcase`.
pub fn default_data_dir() -> PathBuf {
    dirs::data_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("showcase")
}

#[cfg(test)]
mod tests {
    use super::*;

    fn credential() -> StoredCredential {
        StoredCredential {
            token: "header.payload.sig".into(),
            username: Some("amina".into()),
        }
    }

    #[test]
    fn memory_store_lifecycle() {
        let store = MemoryStore::new();
        assert!(store.load().is_none());
        store.save(&credential()).unwrap();
        assert_eq!(store.load(), Some(credential()));
        store.clear().unwrap();
        assert!(store.load().is_none());
    }

    #[test]
    fn file_store_persists_across_instances() {
        let dir = tempfile::tempdir().expect("tempdir");
        FileStore::in_dir(dir.path()).save(&credential()).unwrap();

        let reopened = FileStore::in_dir(dir.path());
        assert_eq!(reopened.load(), Some(credential()));

        reopened.clear().unwrap();
        assert!(!reopened.path().exists());
        assert!(FileStore::in_dir(dir.path()).load().is_none());
    }

    #[test]
    fn file_store_creates_missing_directories() {
        let dir = tempfile::tempdir().expect("tempdir");
        let store = FileStore::in_dir(dir.path().join("nested").join("deeper"));
        store.save(&credential()).unwrap();
        assert!(store.path().exists());
    }

    #[test]
    fn clearing_an_empty_file_store_is_ok() {
        let dir = tempfile::tempdir().expect("tempdir");
        assert!(FileStore::in_dir(dir.path()).clear().is_ok());
    }

    #[test]
    fn corrupt_session_file_reads_as_none() {
        let dir = tempfile::tempdir().expect("tempdir");
        let store = FileStore::in_dir(dir.path());
        std::fs::write(store.path(), "{ not json").unwrap();
        assert!(store.load().is_none());
        assert!(!store.path().exists());
    }

    #[test]
    fn debug_output_hides_token() {
        let rendered = format!("{:?}", credential());
        assert!(!rendered.contains("header.payload.sig"));
    }
}
