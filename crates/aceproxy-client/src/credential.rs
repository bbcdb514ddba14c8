// Session credential storage

use std::fs;
use std::path::PathBuf;
use std::sync::RwLock;

use tracing::{debug, warn};

/// File name the credential is persisted under.
const CREDENTIAL_FILE: &str = "token";

/// Holder of the single session bearer credential.
///
/// At most one token is held at a time; `None` is the meaningful
/// "unauthenticated" state. The store is shared by `Arc` into the HTTP
/// client at construction so the credential never lives in ambient
/// global state.
///
/// With a backing path the value is persisted to a single fixed-name
/// file so it survives a console restart; persistence failures are
/// logged and never fail the in-memory update.
pub struct CredentialStore {
    token: RwLock<Option<String>>,
    path: Option<PathBuf>,
}

impl CredentialStore {
    /// Store without any persistence. Used by tests and embedding hosts.
    pub fn in_memory() -> Self {
        Self {
            token: RwLock::new(None),
            path: None,
        }
    }

    /// Store persisted under the default location, pre-loaded with any
    /// previously saved credential.
    ///
    /// The location is `$ACEPROXY_TOKEN_PATH` when set, else
    /// `$HOME/.aceproxy/token`, else `.aceproxy/token`.
    pub fn persistent() -> Self {
        Self::with_path(Self::default_path())
    }

    /// Store persisted at an explicit path, pre-loaded from it.
    pub fn with_path(path: PathBuf) -> Self {
        let token = match fs::read_to_string(&path) {
            Ok(contents) => {
                let trimmed = contents.trim();
                if trimmed.is_empty() {
                    None
                } else {
                    debug!("Loaded persisted credential from {}", path.display());
                    Some(trimmed.to_string())
                }
            }
            Err(_) => None,
        };

        Self {
            token: RwLock::new(token),
            path: Some(path),
        }
    }

    fn default_path() -> PathBuf {
        if let Ok(path) = std::env::var("ACEPROXY_TOKEN_PATH") {
            return PathBuf::from(path);
        }

        if let Ok(home) = std::env::var("HOME") {
            return PathBuf::from(home).join(".aceproxy").join(CREDENTIAL_FILE);
        }

        PathBuf::from(".aceproxy").join(CREDENTIAL_FILE)
    }

    /// Current credential, if one is held.
    pub fn get(&self) -> Option<String> {
        self.token
            .read()
            .unwrap_or_else(|e| e.into_inner())
            .clone()
    }

    /// True when a credential is held.
    pub fn is_authenticated(&self) -> bool {
        self.token
            .read()
            .unwrap_or_else(|e| e.into_inner())
            .is_some()
    }

    /// Replace the held credential.
    pub fn set(&self, token: &str) {
        {
            let mut guard = self.token.write().unwrap_or_else(|e| e.into_inner());
            *guard = Some(token.to_string());
        }

        if let Some(path) = &self.path {
            if let Some(parent) = path.parent() {
                if let Err(e) = fs::create_dir_all(parent) {
                    warn!("Failed to create credential directory: {}", e);
                    return;
                }
            }
            if let Err(e) = fs::write(path, token) {
                warn!("Failed to persist credential: {}", e);
            }
        }
    }

    /// Drop the held credential, returning to the unauthenticated state.
    pub fn clear(&self) {
        {
            let mut guard = self.token.write().unwrap_or_else(|e| e.into_inner());
            *guard = None;
        }

        if let Some(path) = &self.path {
            if path.exists()
                && let Err(e) = fs::remove_file(path)
            {
                warn!("Failed to remove persisted credential: {}", e);
            }
        }
    }
}
