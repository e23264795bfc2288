//! Persistence of the logged-in user.
//!
//! The current session is a single `User` record stored under a fixed key.
//! It is written on successful login or registration, updated after a
//! passport confirmation, and removed on logout.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use std::sync::RwLock;

use thiserror::Error;
use tracing::info;

use crate::types::User;

/// Key the current user is stored under.
pub const SESSION_KEY: &str = "currentUser";

#[derive(Debug, Error)]
pub enum SessionError {
    #[error("session storage I/O failed: {0}")]
    Io(#[from] io::Error),

    #[error("stored session is not a valid user record: {0}")]
    Corrupt(#[from] serde_json::Error),

    /// The record claims verification but has no passport.
    #[error("verified user {email} has no passport")]
    Invalid { email: String },

    #[error("session store lock poisoned")]
    Poisoned,
}

/// Storage for the current session. At most one user is stored.
pub trait SessionStore: Send + Sync {
    fn load(&self) -> Result<Option<User>, SessionError>;
    fn save(&self, user: &User) -> Result<(), SessionError>;
    fn clear(&self) -> Result<(), SessionError>;
}

fn check(user: &User) -> Result<(), SessionError> {
    if user.is_verified && user.passport.is_none() {
        return Err(SessionError::Invalid {
            email: user.email.clone(),
        });
    }
    Ok(())
}

/// In-process store, lost when the process exits.
#[derive(Debug, Default)]
pub struct MemorySessionStore {
    current: RwLock<Option<User>>,
}

impl MemorySessionStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl SessionStore for MemorySessionStore {
    fn load(&self) -> Result<Option<User>, SessionError> {
        let current = self.current.read().map_err(|_| SessionError::Poisoned)?;
        Ok(current.clone())
    }

    fn save(&self, user: &User) -> Result<(), SessionError> {
        check(user)?;
        let mut current = self.current.write().map_err(|_| SessionError::Poisoned)?;
        *current = Some(user.clone());
        Ok(())
    }

    fn clear(&self) -> Result<(), SessionError> {
        let mut current = self.current.write().map_err(|_| SessionError::Poisoned)?;
        *current = None;
        Ok(())
    }
}

/// Stores the session as `<dir>/currentUser.json`.
///
/// Writes go to a sibling temporary file first and are renamed into place,
/// so a crash mid-write never leaves a truncated record behind.
#[derive(Debug, Clone)]
pub struct FileSessionStore {
    path: PathBuf,
}

impl FileSessionStore {
    pub fn new(dir: impl AsRef<Path>) -> Self {
        Self {
            path: dir.as_ref().join(format!("{SESSION_KEY}.json")),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl SessionStore for FileSessionStore {
    fn load(&self) -> Result<Option<User>, SessionError> {
        let raw = match fs::read_to_string(&self.path) {
            Ok(raw) => raw,
            Err(e) if e.kind() == io::ErrorKind::NotFound => return Ok(None),
            Err(e) => return Err(e.into()),
        };
        let user: User = serde_json::from_str(&raw)?;
        check(&user)?;
        Ok(Some(user))
    }

    fn save(&self, user: &User) -> Result<(), SessionError> {
        check(user)?;
        if let Some(dir) = self.path.parent() {
            fs::create_dir_all(dir)?;
        }
        let tmp = self.path.with_extension("json.tmp");
        fs::write(&tmp, serde_json::to_vec(user)?)?;
        fs::rename(&tmp, &self.path)?;
        info!(path = %self.path.display(), email = %user.email, "session saved");
        Ok(())
    }

    fn clear(&self) -> Result<(), SessionError> {
        match fs::remove_file(&self.path) {
            Ok(()) => {
                info!(path = %self.path.display(), "session cleared");
                Ok(())
            }
            Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(e.into()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{Document, Role};

    fn user() -> User {
        User {
            name: "Иван".to_string(),
            surname: "Иванов".to_string(),
            lastname: Some("Иванович".to_string()),
            email: "ivan@example.ru".to_string(),
            role: Role::Operator,
            is_verified: false,
            passport: None,
        }
    }

    #[test]
    fn memory_store_round_trip() {
        let store = MemorySessionStore::new();
        assert_eq!(store.load().unwrap(), None);
        store.save(&user()).unwrap();
        assert_eq!(store.load().unwrap(), Some(user()));
        store.clear().unwrap();
        assert_eq!(store.load().unwrap(), None);
    }

    #[test]
    fn verified_user_without_passport_is_refused() {
        let store = MemorySessionStore::new();
        let mut broken = user();
        broken.is_verified = true;
        assert!(matches!(
            store.save(&broken),
            Err(SessionError::Invalid { .. })
        ));
        assert_eq!(store.load().unwrap(), None);
    }

    #[test]
    fn file_store_uses_fixed_key() {
        let dir = tempfile::tempdir().unwrap();
        let store = FileSessionStore::new(dir.path());
        assert_eq!(store.path(), dir.path().join("currentUser.json"));
        assert_eq!(store.load().unwrap(), None);

        let mut verified = user();
        verified.confirm_passport(Document::new("1234", "567890"));
        store.save(&verified).unwrap();
        assert!(!dir.path().join("currentUser.json.tmp").exists());

        // A fresh store over the same directory sees the saved user.
        let reopened = FileSessionStore::new(dir.path());
        assert_eq!(reopened.load().unwrap(), Some(verified));
    }

    #[test]
    fn file_store_clear_is_idempotent() {
        let dir = tempfile::tempdir().unwrap();
        let store = FileSessionStore::new(dir.path());
        store.clear().unwrap();
        store.save(&user()).unwrap();
        store.clear().unwrap();
        assert!(!store.path().exists());
        store.clear().unwrap();
    }

    #[test]
    fn file_store_reports_corrupt_record() {
        let dir = tempfile::tempdir().unwrap();
        let store = FileSessionStore::new(dir.path());
        fs::write(store.path(), "{not json").unwrap();
        assert!(matches!(store.load(), Err(SessionError::Corrupt(_))));
    }
}
