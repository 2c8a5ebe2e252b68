use std::collections::BTreeMap;
use std::path::PathBuf;
use std::sync::RwLock;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use tracing::warn;

/// Storage key for the short-lived API access token
pub const ACCESS_TOKEN_KEY: &str = "fitness_token";

/// Storage key for the long-lived refresh token
pub const REFRESH_TOKEN_KEY: &str = "refresh_token";

/// Token file name in the cache directory
const TOKEN_FILE: &str = "tokens.json";

/// An access/refresh credential pair as issued by the token endpoint.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TokenPair {
    pub access: String,
    pub refresh: String,
}

/// Durable key-value storage for the credential pair.
///
/// Tokens live under two fixed keys in a small JSON file. The store is the
/// single owner of that file: the session manager writes through it and the
/// API client reads the current access token from it at request time. Shared
/// via `Arc`; the in-memory view is behind an `RwLock` so each get/set is
/// atomic from the callers' perspective.
pub struct TokenStore {
    path: PathBuf,
    entries: RwLock<BTreeMap<String, String>>,
}

impl TokenStore {
    /// Open the store backed by `TOKEN_FILE` under the given directory,
    /// loading any previously persisted tokens. An unreadable or corrupt
    /// file is treated as empty - the session check re-verifies tokens
    /// anyway, so starting logged-out is always safe.
    pub fn open(cache_dir: PathBuf) -> Self {
        let path = cache_dir.join(TOKEN_FILE);
        let entries = match std::fs::read_to_string(&path) {
            Ok(contents) => match serde_json::from_str(&contents) {
                Ok(map) => map,
                Err(e) => {
                    warn!(error = %e, "Token file is corrupt, starting with empty store");
                    BTreeMap::new()
                }
            },
            Err(_) => BTreeMap::new(),
        };
        Self {
            path,
            entries: RwLock::new(entries),
        }
    }

    pub fn access_token(&self) -> Option<String> {
        self.entries
            .read()
            .ok()
            .and_then(|e| e.get(ACCESS_TOKEN_KEY).cloned())
    }

    pub fn refresh_token(&self) -> Option<String> {
        self.entries
            .read()
            .ok()
            .and_then(|e| e.get(REFRESH_TOKEN_KEY).cloned())
    }

    /// Store a freshly issued credential pair. Both entries are written
    /// together - there is no lifecycle path that creates one without the
    /// other.
    pub fn set_pair(&self, pair: &TokenPair) -> Result<()> {
        {
            let mut entries = self
                .entries
                .write()
                .map_err(|_| anyhow::anyhow!("token store lock poisoned"))?;
            entries.insert(ACCESS_TOKEN_KEY.to_string(), pair.access.clone());
            entries.insert(REFRESH_TOKEN_KEY.to_string(), pair.refresh.clone());
        }
        self.persist()
    }

    /// Overwrite only the access token, as happens on silent refresh.
    pub fn set_access(&self, access: &str) -> Result<()> {
        {
            let mut entries = self
                .entries
                .write()
                .map_err(|_| anyhow::anyhow!("token store lock poisoned"))?;
            entries.insert(ACCESS_TOKEN_KEY.to_string(), access.to_string());
        }
        self.persist()
    }

    /// Delete both tokens and the backing file.
    pub fn clear(&self) -> Result<()> {
        {
            let mut entries = self
                .entries
                .write()
                .map_err(|_| anyhow::anyhow!("token store lock poisoned"))?;
            entries.remove(ACCESS_TOKEN_KEY);
            entries.remove(REFRESH_TOKEN_KEY);
        }
        if self.path.exists() {
            std::fs::remove_file(&self.path).context("Failed to remove token file")?;
        }
        Ok(())
    }

    fn persist(&self) -> Result<()> {
        let entries = self
            .entries
            .read()
            .map_err(|_| anyhow::anyhow!("token store lock poisoned"))?;
        if let Some(parent) = self.path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let contents = serde_json::to_string_pretty(&*entries)?;
        std::fs::write(&self.path, contents).context("Failed to write token file")?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicU32, Ordering};

    static DIR_SEQ: AtomicU32 = AtomicU32::new(0);

    fn temp_dir() -> PathBuf {
        let dir = std::env::temp_dir().join(format!(
            "liftlog-store-test-{}-{}",
            std::process::id(),
            DIR_SEQ.fetch_add(1, Ordering::SeqCst)
        ));
        std::fs::create_dir_all(&dir).unwrap();
        dir
    }

    fn pair() -> TokenPair {
        TokenPair {
            access: "a1".to_string(),
            refresh: "r1".to_string(),
        }
    }

    #[test]
    fn starts_empty_without_file() {
        let store = TokenStore::open(temp_dir());
        assert_eq!(store.access_token(), None);
        assert_eq!(store.refresh_token(), None);
    }

    #[test]
    fn pair_roundtrips_across_reopen() {
        let dir = temp_dir();
        {
            let store = TokenStore::open(dir.clone());
            store.set_pair(&pair()).unwrap();
        }
        let store = TokenStore::open(dir);
        assert_eq!(store.access_token().as_deref(), Some("a1"));
        assert_eq!(store.refresh_token().as_deref(), Some("r1"));
    }

    #[test]
    fn set_access_leaves_refresh_untouched() {
        let store = TokenStore::open(temp_dir());
        store.set_pair(&pair()).unwrap();
        store.set_access("a2").unwrap();
        assert_eq!(store.access_token().as_deref(), Some("a2"));
        assert_eq!(store.refresh_token().as_deref(), Some("r1"));
    }

    #[test]
    fn clear_removes_both_tokens_and_file() {
        let dir = temp_dir();
        let store = TokenStore::open(dir.clone());
        store.set_pair(&pair()).unwrap();
        store.clear().unwrap();
        assert_eq!(store.access_token(), None);
        assert_eq!(store.refresh_token(), None);
        assert!(!dir.join(TOKEN_FILE).exists());

        // Clearing an already-empty store is fine
        store.clear().unwrap();
    }

    #[test]
    fn corrupt_file_is_treated_as_empty() {
        let dir = temp_dir();
        std::fs::write(dir.join(TOKEN_FILE), "not json").unwrap();
        let store = TokenStore::open(dir);
        assert_eq!(store.access_token(), None);
    }
}
