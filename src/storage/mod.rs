//! Persisted session token slot.
//!
//! The browser portal kept its bearer token in origin-local storage so a page
//! reload stayed logged in. The gateway equivalent is a process-wide slot with
//! a best-effort file mirror under the state directory: guards and the session
//! store read it synchronously, and only the session store's login/logout
//! paths write it.

use log::warn;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::PathBuf;
use std::sync::{Arc, RwLock};

const TOKEN_FILE: &str = "session-token.json";

#[derive(Debug, Serialize, Deserialize)]
struct PersistedToken {
    token: String,
}

/// Process-wide token slot with file persistence.
#[derive(Clone)]
pub struct TokenStore {
    slot: Arc<RwLock<Option<String>>>,
    path: PathBuf,
}

impl TokenStore {
    pub fn new(state_dir: &str) -> Self {
        Self {
            slot: Arc::new(RwLock::new(None)),
            path: PathBuf::from(state_dir).join(TOKEN_FILE),
        }
    }

    /// Populate the slot from the persisted file, if one exists.
    ///
    /// Read failures are logged and treated as an empty slot; persistence is
    /// a convenience, not a source of truth.
    pub fn load(&self) {
        let token = match fs::read_to_string(&self.path) {
            Ok(raw) => match serde_json::from_str::<PersistedToken>(&raw) {
                Ok(persisted) => Some(persisted.token),
                Err(err) => {
                    warn!("Discarding unreadable token file: {}", err);
                    None
                }
            },
            Err(_) => None,
        };

        *self.slot.write().unwrap() = token;
    }

    pub fn get(&self) -> Option<String> {
        self.slot.read().unwrap().clone()
    }

    /// Store a token and mirror it to disk (best effort).
    pub fn set(&self, token: &str) {
        *self.slot.write().unwrap() = Some(token.to_string());

        if let Some(dir) = self.path.parent() {
            if let Err(err) = fs::create_dir_all(dir) {
                warn!("Could not create state dir {:?}: {}", dir, err);
                return;
            }
        }

        let persisted = PersistedToken {
            token: token.to_string(),
        };
        match serde_json::to_string(&persisted) {
            Ok(raw) => {
                if let Err(err) = fs::write(&self.path, raw) {
                    warn!("Could not persist session token: {}", err);
                }
            }
            Err(err) => warn!("Could not serialize session token: {}", err),
        }
    }

    /// Empty the slot and delete the persisted file (best effort).
    pub fn clear(&self) {
        *self.slot.write().unwrap() = None;

        if self.path.exists() {
            if let Err(err) = fs::remove_file(&self.path) {
                warn!("Could not remove persisted token: {}", err);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_set_get_clear() {
        let dir = tempdir().unwrap();
        let store = TokenStore::new(dir.path().to_str().unwrap());

        assert_eq!(store.get(), None);
        store.set("a.b.c");
        assert_eq!(store.get().as_deref(), Some("a.b.c"));
        store.clear();
        assert_eq!(store.get(), None);
    }

    #[test]
    fn test_survives_reload() {
        let dir = tempdir().unwrap();
        let store = TokenStore::new(dir.path().to_str().unwrap());
        store.set("x.y.z");

        let reloaded = TokenStore::new(dir.path().to_str().unwrap());
        assert_eq!(reloaded.get(), None);
        reloaded.load();
        assert_eq!(reloaded.get().as_deref(), Some("x.y.z"));
    }

    #[test]
    fn test_clear_removes_file() {
        let dir = tempdir().unwrap();
        let store = TokenStore::new(dir.path().to_str().unwrap());
        store.set("x.y.z");
        store.clear();

        let reloaded = TokenStore::new(dir.path().to_str().unwrap());
        reloaded.load();
        assert_eq!(reloaded.get(), None);
    }

    #[test]
    fn test_load_tolerates_garbage_file() {
        let dir = tempdir().unwrap();
        let path = dir.path().join(TOKEN_FILE);
        fs::write(&path, "not json").unwrap();

        let store = TokenStore::new(dir.path().to_str().unwrap());
        store.load();
        assert_eq!(store.get(), None);
    }
}
