//! Durable storage for the access/refresh token pair.

use std::path::{Path, PathBuf};
use std::sync::RwLock;

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::{TaskdeskError, TaskdeskResult};

/// The two persisted session tokens.
///
/// Serialized under the fixed keys `access_token` and `refresh_token`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct StoredTokens {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub access_token: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub refresh_token: Option<String>,
}

impl StoredTokens {
    pub fn new(access: impl Into<String>, refresh: impl Into<String>) -> Self {
        StoredTokens {
            access_token: Some(access.into()),
            refresh_token: Some(refresh.into()),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.access_token.is_none() && self.refresh_token.is_none()
    }
}

/// Where tokens live between runs.
pub trait TokenStore: Send + Sync {
    fn load(&self) -> TaskdeskResult<StoredTokens>;
    fn save(&self, tokens: &StoredTokens) -> TaskdeskResult<()>;

    fn clear(&self) -> TaskdeskResult<()> {
        self.save(&StoredTokens::default())
    }
}

/// Keeps tokens in process memory only.
#[derive(Debug, Default)]
pub struct MemoryTokenStore {
    tokens: RwLock<StoredTokens>,
}

impl MemoryTokenStore {
    pub fn new(tokens: StoredTokens) -> Self {
        MemoryTokenStore {
            tokens: RwLock::new(tokens),
        }
    }
}

impl TokenStore for MemoryTokenStore {
    fn load(&self) -> TaskdeskResult<StoredTokens> {
        Ok(self
            .tokens
            .read()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .clone())
    }

    fn save(&self, tokens: &StoredTokens) -> TaskdeskResult<()> {
        *self
            .tokens
            .write()
            .unwrap_or_else(|poisoned| poisoned.into_inner()) = tokens.clone();
        Ok(())
    }
}

/// TOML file with owner-only permissions, cached in memory after open.
#[derive(Debug)]
pub struct FileTokenStore {
    path: PathBuf,
    cache: RwLock<StoredTokens>,
}

impl FileTokenStore {
    pub fn open(path: impl Into<PathBuf>) -> TaskdeskResult<Self> {
        let path = path.into();
        let tokens = read_tokens(&path)?;

        Ok(FileTokenStore {
            path,
            cache: RwLock::new(tokens),
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

fn read_tokens(path: &Path) -> TaskdeskResult<StoredTokens> {
    if !path.exists() {
        return Ok(StoredTokens::default());
    }

    let contents = std::fs::read_to_string(path)?;
    toml::from_str(&contents).map_err(|e| {
        TaskdeskError::Serialization(format!(
            "Failed to parse tokens from {}: {}",
            path.display(),
            e
        ))
    })
}

impl TokenStore for FileTokenStore {
    fn load(&self) -> TaskdeskResult<StoredTokens> {
        Ok(self
            .cache
            .read()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .clone())
    }

    fn save(&self, tokens: &StoredTokens) -> TaskdeskResult<()> {
        let mut cache = self
            .cache
            .write()
            .unwrap_or_else(|poisoned| poisoned.into_inner());

        if tokens.is_empty() {
            if self.path.exists() {
                std::fs::remove_file(&self.path)?;
            }
        } else {
            let contents = toml::to_string_pretty(tokens)
                .map_err(|e| TaskdeskError::Serialization(e.to_string()))?;

            if let Some(parent) = self.path.parent() {
                std::fs::create_dir_all(parent)?;
            }

            std::fs::write(&self.path, contents)?;

            // Owner-only (0600) since the file holds bearer tokens:
            #[cfg(unix)]
            {
                use std::os::unix::fs::PermissionsExt;
                std::fs::set_permissions(&self.path, std::fs::Permissions::from_mode(0o600))?;
            }
        }

        debug!(path = %self.path.display(), cleared = tokens.is_empty(), "saved tokens");
        *cache = tokens.clone();
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn file_store_persists_across_opens() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("session").join("tokens.toml");

        let store = FileTokenStore::open(&path).unwrap();
        assert!(store.load().unwrap().is_empty());

        store.save(&StoredTokens::new("A1", "R1")).unwrap();

        let contents = std::fs::read_to_string(&path).unwrap();
        assert!(contents.contains(r#"access_token = "A1""#));
        assert!(contents.contains(r#"refresh_token = "R1""#));

        let reopened = FileTokenStore::open(&path).unwrap();
        assert_eq!(reopened.load().unwrap(), StoredTokens::new("A1", "R1"));
    }

    #[cfg(unix)]
    #[test]
    fn file_store_is_owner_only() {
        use std::os::unix::fs::PermissionsExt;

        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("tokens.toml");
        let store = FileTokenStore::open(&path).unwrap();
        store.save(&StoredTokens::new("A1", "R1")).unwrap();

        let mode = std::fs::metadata(&path).unwrap().permissions().mode();
        assert_eq!(mode & 0o777, 0o600);
    }

    #[test]
    fn clear_removes_the_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("tokens.toml");
        let store = FileTokenStore::open(&path).unwrap();

        store.save(&StoredTokens::new("A1", "R1")).unwrap();
        store.clear().unwrap();

        assert!(!path.exists());
        assert!(store.load().unwrap().is_empty());
        // Clearing twice is fine.
        store.clear().unwrap();
    }

    #[test]
    fn memory_store_round_trips() {
        let store = MemoryTokenStore::default();
        store.save(&StoredTokens::new("A1", "R1")).unwrap();
        assert_eq!(store.load().unwrap().access_token.as_deref(), Some("A1"));
        store.clear().unwrap();
        assert!(store.load().unwrap().is_empty());
    }
}
