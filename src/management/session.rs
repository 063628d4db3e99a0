use std::path::PathBuf;

use crate::{error::AuthError, types::Session};

/// Persists the current session as JSON on disk.
pub struct SessionStore {
    path: PathBuf,
}

impl SessionStore {
    pub fn new(path: PathBuf) -> Self {
        SessionStore { path }
    }

    pub async fn load(&self) -> Result<Option<Session>, AuthError> {
        let content = match async_fs::read_to_string(&self.path).await {
            Ok(content) => content,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(None),
            Err(e) => return Err(self.store_error(e)),
        };
        let session: Session = serde_json::from_str(&content).map_err(|e| self.store_error(e))?;
        Ok(Some(session))
    }

    pub async fn persist(&self, session: &Session) -> Result<(), AuthError> {
        if let Some(parent) = self.path.parent() {
            async_fs::create_dir_all(parent)
                .await
                .map_err(|e| self.store_error(e))?;
        }

        let json = serde_json::to_string_pretty(session).map_err(|e| self.store_error(e))?;
        async_fs::write(&self.path, json)
            .await
            .map_err(|e| self.store_error(e))
    }

    pub async fn clear(&self) -> Result<(), AuthError> {
        match async_fs::remove_file(&self.path).await {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(self.store_error(e)),
        }
    }

    pub fn path(&self) -> &PathBuf {
        &self.path
    }

    fn store_error(&self, e: impl std::fmt::Display) -> AuthError {
        AuthError::Store {
            path: self.path.clone(),
            message: e.to_string(),
        }
    }
}
