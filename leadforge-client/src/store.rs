//! Session token storage.
//!
//! The client never touches persistence directly; it reads and writes tokens
//! through a [`SessionStore`] handed to it at construction time.

use async_trait::async_trait;
use leadforge_core::SessionCredentials;
use parking_lot::RwLock;
use std::fmt::Debug;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use thiserror::Error;
use tokio::sync::Mutex;
use tracing::debug;

/// Errors from a session store.
#[derive(Debug, Error)]
pub enum StoreError {
    /// Filesystem failure.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// The stored session could not be parsed or written.
    #[error("Malformed session data: {0}")]
    Json(#[from] serde_json::Error),
}

/// Result type for store operations.
pub type StoreResult<T> = Result<T, StoreError>;

/// Persistent holder of the session tokens.
#[async_trait]
pub trait SessionStore: Send + Sync + Debug {
    /// Current tokens. Missing tokens are `None`, not an error.
    async fn tokens(&self) -> StoreResult<SessionCredentials>;

    /// Replace both tokens.
    async fn set_tokens(&self, credentials: SessionCredentials) -> StoreResult<()>;

    /// Replace the access token, keeping the refresh token.
    async fn set_access(&self, access: String) -> StoreResult<()> {
        let current = self.tokens().await?;
        self.set_tokens(current.with_access(access)).await
    }

    /// Remove both tokens.
    async fn clear(&self) -> StoreResult<()>;
}

/// In-process store. Tokens are lost when the process exits.
#[derive(Debug, Default)]
pub struct MemorySessionStore {
    credentials: RwLock<SessionCredentials>,
}

impl MemorySessionStore {
    /// Create an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a store that already holds credentials.
    pub fn with_credentials(credentials: SessionCredentials) -> Self {
        Self {
            credentials: RwLock::new(credentials),
        }
    }

    /// Synchronous snapshot of the stored tokens.
    pub fn snapshot(&self) -> SessionCredentials {
        self.credentials.read().clone()
    }
}

#[async_trait]
impl SessionStore for MemorySessionStore {
    async fn tokens(&self) -> StoreResult<SessionCredentials> {
        Ok(self.snapshot())
    }

    async fn set_tokens(&self, credentials: SessionCredentials) -> StoreResult<()> {
        *self.credentials.write() = credentials;
        Ok(())
    }

    async fn set_access(&self, access: String) -> StoreResult<()> {
        self.credentials.write().access = Some(access);
        Ok(())
    }

    async fn clear(&self) -> StoreResult<()> {
        *self.credentials.write() = SessionCredentials::empty();
        Ok(())
    }
}

/// Store backed by a JSON file holding `access_token` and `refresh_token`.
///
/// A missing file reads as an empty session. On Unix the file is created
/// with mode `0600`.
#[derive(Debug)]
pub struct FileSessionStore {
    path: PathBuf,
    // Serializes read-modify-write cycles within this process.
    write_lock: Mutex<()>,
}

impl FileSessionStore {
    /// Create a store for `path`. Nothing is read until first use.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            write_lock: Mutex::new(()),
        }
    }

    /// The backing file.
    pub fn path(&self) -> &Path {
        &self.path
    }

    async fn read(&self) -> StoreResult<SessionCredentials> {
        match tokio::fs::read(&self.path).await {
            Ok(bytes) if bytes.iter().all(u8::is_ascii_whitespace) => Ok(SessionCredentials::empty()),
            Ok(bytes) => Ok(serde_json::from_slice(&bytes)?),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(SessionCredentials::empty()),
            Err(e) => Err(e.into()),
        }
    }

    async fn write(&self, credentials: &SessionCredentials) -> StoreResult<()> {
        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            tokio::fs::create_dir_all(parent).await?;
        }
        let json = serde_json::to_vec_pretty(credentials)?;
        let tmp = self.path.with_extension("tmp");
        tokio::fs::write(&tmp, json).await?;
        restrict_permissions(&tmp).await?;
        tokio::fs::rename(&tmp, &self.path).await?;
        debug!(path = %self.path.display(), "Session file written");
        Ok(())
    }
}

#[cfg(unix)]
async fn restrict_permissions(path: &Path) -> std::io::Result<()> {
    use std::os::unix::fs::PermissionsExt;
    tokio::fs::set_permissions(path, std::fs::Permissions::from_mode(0o600)).await
}

#[cfg(not(unix))]
async fn restrict_permissions(_path: &Path) -> std::io::Result<()> {
    Ok(())
}

#[async_trait]
impl SessionStore for FileSessionStore {
    async fn tokens(&self) -> StoreResult<SessionCredentials> {
        self.read().await
    }

    async fn set_tokens(&self, credentials: SessionCredentials) -> StoreResult<()> {
        let _guard = self.write_lock.lock().await;
        self.write(&credentials).await
    }

    async fn set_access(&self, access: String) -> StoreResult<()> {
        let _guard = self.write_lock.lock().await;
        let current = self.read().await?;
        self.write(&current.with_access(access)).await
    }

    async fn clear(&self) -> StoreResult<()> {
        let _guard = self.write_lock.lock().await;
        match tokio::fs::remove_file(&self.path).await {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(()),
            Err(e) => Err(e.into()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn temp_session_path() -> PathBuf {
        std::env::temp_dir()
            .join(format!("leadforge-test-{}", uuid::Uuid::new_v4().simple()))
            .join("session.json")
    }

    #[tokio::test]
    async fn test_memory_store_lifecycle() {
        let store = MemorySessionStore::new();
        assert!(store.tokens().await.unwrap().is_empty());

        store.set_tokens(SessionCredentials::new("a1", "r1")).await.unwrap();
        store.set_access("a2".to_string()).await.unwrap();
        assert_eq!(store.snapshot(), SessionCredentials::new("a2", "r1"));

        store.clear().await.unwrap();
        assert!(store.snapshot().is_empty());
    }

    #[tokio::test]
    async fn test_file_store_round_trip() {
        let path = temp_session_path();
        let store = FileSessionStore::new(&path);
        assert!(store.tokens().await.unwrap().is_empty());

        store.set_tokens(SessionCredentials::new("a1", "r1")).await.unwrap();

        // A second store on the same file sees the tokens, like a restarted process.
        let reopened = FileSessionStore::new(&path);
        assert_eq!(reopened.tokens().await.unwrap(), SessionCredentials::new("a1", "r1"));

        reopened.set_access("a2".to_string()).await.unwrap();
        assert_eq!(store.tokens().await.unwrap(), SessionCredentials::new("a2", "r1"));

        let raw: serde_json::Value =
            serde_json::from_slice(&tokio::fs::read(&path).await.unwrap()).unwrap();
        assert_eq!(raw["access_token"], "a2");
        assert_eq!(raw["refresh_token"], "r1");

        store.clear().await.unwrap();
        assert!(!path.exists());
        assert!(store.tokens().await.unwrap().is_empty());
        // Clearing twice is fine.
        store.clear().await.unwrap();

        let _ = tokio::fs::remove_dir_all(path.parent().unwrap()).await;
    }

    #[tokio::test]
    async fn test_file_store_rejects_corrupt_file() {
        let path = temp_session_path();
        tokio::fs::create_dir_all(path.parent().unwrap()).await.unwrap();
        tokio::fs::write(&path, b"{not json").await.unwrap();

        let store = FileSessionStore::new(&path);
        assert!(matches!(store.tokens().await, Err(StoreError::Json(_))));

        let _ = tokio::fs::remove_dir_all(path.parent().unwrap()).await;
    }

    #[cfg(unix)]
    #[tokio::test]
    async fn test_file_store_permissions() {
        use std::os::unix::fs::PermissionsExt;

        let path = temp_session_path();
        let store = FileSessionStore::new(&path);
        store.set_tokens(SessionCredentials::new("a1", "r1")).await.unwrap();

        let mode = tokio::fs::metadata(&path).await.unwrap().permissions().mode();
        assert_eq!(mode & 0o777, 0o600);

        let _ = tokio::fs::remove_dir_all(path.parent().unwrap()).await;
    }
}
