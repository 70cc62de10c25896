// Key persistence: one plaintext file holding the last key set with
// `--key <str>`. Single user, no locking, last writer wins.

use crate::error::{Result, ShortenerError};
use log::{debug, warn};
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

pub const KEY_FILE_NAME: &str = "google-url-shortener-key.txt";

#[derive(Debug, Clone)]
pub struct KeyStore {
    path: PathBuf,
}

impl KeyStore {
    pub fn new(config_dir: &Path) -> Self {
        KeyStore {
            path: config_dir.join(KEY_FILE_NAME),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Read the persisted key. A missing, unreadable or blank file means no
    /// key has been set.
    pub fn load(&self) -> Result<String> {
        match std::fs::read_to_string(&self.path) {
            Ok(data) => {
                let key = data.trim();
                if key.is_empty() {
                    debug!("key file {} is blank", self.path.display());
                    return Err(ShortenerError::KeyNotSet);
                }
                Ok(key.to_string())
            }
            Err(e) if e.kind() == ErrorKind::NotFound => {
                debug!("no key file at {}", self.path.display());
                Err(ShortenerError::KeyNotSet)
            }
            Err(e) => {
                warn!("could not read key file {}: {}", self.path.display(), e);
                Err(ShortenerError::KeyNotSet)
            }
        }
    }

    /// Persist `key`, replacing whatever was stored before. Surrounding
    /// whitespace is dropped so the file holds exactly what `load` returns.
    pub fn save(&self, key: &str) -> Result<()> {
        let key = key.trim();
        let write = || -> std::io::Result<()> {
            if let Some(dir) = self.path.parent() {
                std::fs::create_dir_all(dir)?;
            }
            std::fs::write(&self.path, key)
        };
        write().map_err(|source| ShortenerError::KeyWrite {
            path: self.path.clone(),
            source,
        })?;
        debug!("saved key to {}", self.path.display());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn load_without_file_is_key_not_set() {
        let dir = TempDir::new().unwrap();
        let store = KeyStore::new(dir.path());
        assert!(matches!(store.load(), Err(ShortenerError::KeyNotSet)));
    }

    #[test]
    fn save_then_load() {
        let dir = TempDir::new().unwrap();
        let store = KeyStore::new(dir.path());
        store.save("abc").unwrap();
        assert_eq!(store.load().unwrap(), "abc");
        assert_eq!(std::fs::read_to_string(store.path()).unwrap(), "abc");
    }

    #[test]
    fn save_overwrites_previous_key() {
        let dir = TempDir::new().unwrap();
        let store = KeyStore::new(dir.path());
        store.save("first").unwrap();
        store.save("second").unwrap();
        assert_eq!(store.load().unwrap(), "second");
    }

    #[test]
    fn save_creates_missing_config_dir() {
        let dir = TempDir::new().unwrap();
        let nested = dir.path().join("a").join("b");
        let store = KeyStore::new(&nested);
        store.save("k").unwrap();
        assert!(nested.join(KEY_FILE_NAME).is_file());
    }

    #[test]
    fn hand_edited_file_is_trimmed() {
        let dir = TempDir::new().unwrap();
        std::fs::write(dir.path().join(KEY_FILE_NAME), "  AIzaKey\n").unwrap();
        assert_eq!(KeyStore::new(dir.path()).load().unwrap(), "AIzaKey");
    }

    #[test]
    fn save_trims_like_load() {
        let dir = TempDir::new().unwrap();
        let store = KeyStore::new(dir.path());
        store.save(" abc\n").unwrap();
        assert_eq!(std::fs::read_to_string(store.path()).unwrap(), "abc");
        assert_eq!(store.load().unwrap(), "abc");
    }

    #[test]
    fn blank_file_is_key_not_set() {
        let dir = TempDir::new().unwrap();
        std::fs::write(dir.path().join(KEY_FILE_NAME), "\n").unwrap();
        assert!(matches!(
            KeyStore::new(dir.path()).load(),
            Err(ShortenerError::KeyNotSet)
        ));
    }

    #[test]
    fn save_into_a_file_path_fails_with_write_error() {
        let dir = TempDir::new().unwrap();
        let blocker = dir.path().join("not-a-dir");
        std::fs::write(&blocker, "x").unwrap();
        let store = KeyStore::new(&blocker);
        assert!(matches!(
            store.save("k"),
            Err(ShortenerError::KeyWrite { .. })
        ));
    }
}
