//! On-disk state of the bot account.
//!
//! The data directory holds two entries:
//! - `session`: JSON with the Matrix login and the last sync token
//! - `sqlite`: the Matrix SDK store (crypto keys, room state)

use std::path::{Path, PathBuf};

use log::{debug, trace};
use matrix_sdk::authentication::matrix::MatrixSession;
use serde::{Deserialize, Serialize};
use tokio::fs;

const SESSION_FILE: &str = "session";
const STORE_DIR: &str = "sqlite";

/// Content of the `session` file.
#[derive(Debug, Clone, Serialize, Deserialize)]
struct StoredSession {
    user_session: MatrixSession,
    #[serde(skip_serializing_if = "Option::is_none")]
    sync_token: Option<String>,
}

/// Login and sync position of the bot, persisted between restarts.
#[derive(Clone)]
pub struct SessionStore {
    /// Session read at startup, if any
    stored: Option<StoredSession>,
    /// `{data}/sqlite`
    store_path: PathBuf,
    /// `{data}/session`
    session_path: PathBuf,
}

impl SessionStore {
    /// Opens the session store in `data_dir`, reading the previous login if
    /// there is one. A missing or unreadable session file means a fresh login.
    pub async fn open(data_dir: &Path) -> SessionStore {
        let session_path = data_dir.join(SESSION_FILE);
        let store_path = data_dir.join(STORE_DIR);

        let stored = match read_session(&session_path).await {
            Ok(stored) => stored,
            Err(e) => {
                debug!("ignoring session at {}: {:?}", session_path.display(), e);
                None
            }
        };
        debug!(
            "session store at {} (previous login: {})",
            data_dir.display(),
            stored.is_some()
        );

        SessionStore {
            stored,
            store_path,
            session_path,
        }
    }

    pub fn has_session(&self) -> bool {
        self.stored.is_some()
    }

    /// Directory of the Matrix SDK sqlite store.
    pub fn store_path(&self) -> &Path {
        &self.store_path
    }

    pub fn user_session(&self) -> Option<&MatrixSession> {
        self.stored.as_ref().map(|s| &s.user_session)
    }

    /// Sync token saved by the last run, to resume syncing from there.
    pub fn sync_token(&self) -> Option<String> {
        self.stored.as_ref().and_then(|s| s.sync_token.clone())
    }

    /// Writes a fresh login. Any previous sync token is dropped.
    pub async fn save_user_session(&self, user_session: &MatrixSession) -> anyhow::Result<()> {
        trace!("save user session");
        self.write(&StoredSession {
            user_session: user_session.clone(),
            sync_token: None,
        })
        .await
    }

    /// Updates the sync token of the saved login.
    pub async fn save_sync_token(&self, sync_token: String) -> anyhow::Result<()> {
        trace!("save sync token {}", sync_token);

        let mut stored = read_session(&self.session_path)
            .await?
            .ok_or_else(|| anyhow::anyhow!("no session to attach the sync token to"))?;
        stored.sync_token = Some(sync_token);
        self.write(&stored).await
    }

    async fn write(&self, stored: &StoredSession) -> anyhow::Result<()> {
        fs::write(&self.session_path, serde_json::to_string(stored)?).await?;
        Ok(())
    }
}

async fn read_session(path: &Path) -> anyhow::Result<Option<StoredSession>> {
    if !fs::try_exists(path).await? {
        return Ok(None);
    }

    let data = fs::read_to_string(path).await?;
    Ok(Some(serde_json::from_str(&data)?))
}

#[cfg(test)]
mod tests {
    use matrix_sdk::{SessionMeta, SessionTokens};
    use tempfile::TempDir;

    use super::*;

    fn create_user_session() -> MatrixSession {
        MatrixSession {
            meta: SessionMeta {
                user_id: "@starguide:example.com".try_into().unwrap(),
                device_id: "STARGUIDE".into(),
            },
            tokens: SessionTokens {
                access_token: "access_token".to_string(),
                refresh_token: None,
            },
        }
    }

    #[tokio::test]
    async fn test_open_empty_directory() {
        let temp_dir = TempDir::new().unwrap();
        let store = SessionStore::open(temp_dir.path()).await;

        assert!(!store.has_session());
        assert!(store.user_session().is_none());
        assert!(store.sync_token().is_none());
        assert_eq!(store.store_path(), temp_dir.path().join("sqlite"));
    }

    #[tokio::test]
    async fn test_open_ignores_corrupted_session() {
        let temp_dir = TempDir::new().unwrap();
        fs::write(temp_dir.path().join("session"), "{not json")
            .await
            .unwrap();

        let store = SessionStore::open(temp_dir.path()).await;
        assert!(!store.has_session());
    }

    #[tokio::test]
    async fn test_save_and_reopen() {
        let temp_dir = TempDir::new().unwrap();
        let store = SessionStore::open(temp_dir.path()).await;

        store
            .save_user_session(&create_user_session())
            .await
            .unwrap();
        store.save_sync_token("s42_7".to_string()).await.unwrap();

        let reopened = SessionStore::open(temp_dir.path()).await;
        assert!(reopened.has_session());
        assert_eq!(
            reopened.user_session().unwrap().meta.user_id.to_string(),
            "@starguide:example.com"
        );
        assert_eq!(reopened.sync_token(), Some("s42_7".to_string()));
    }

    #[tokio::test]
    async fn test_save_user_session_resets_sync_token() {
        let temp_dir = TempDir::new().unwrap();
        let store = SessionStore::open(temp_dir.path()).await;

        store
            .save_user_session(&create_user_session())
            .await
            .unwrap();
        store.save_sync_token("s1".to_string()).await.unwrap();
        store
            .save_user_session(&create_user_session())
            .await
            .unwrap();

        let content = fs::read_to_string(temp_dir.path().join("session"))
            .await
            .unwrap();
        assert!(!content.contains("sync_token"));
    }

    #[tokio::test]
    async fn test_save_sync_token_without_session() {
        let temp_dir = TempDir::new().unwrap();
        let store = SessionStore::open(temp_dir.path()).await;

        assert!(store.save_sync_token("s1".to_string()).await.is_err());
    }
}
