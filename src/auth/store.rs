use std::fs;
use std::path::{Path, PathBuf};

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::error::AuthError;
use super::token::Token;

/// Token-cache collaborator for persisted credentials.
///
/// Passed into [`crate::auth::DeviceAuthClient`] explicitly rather than held
/// as process-global state; the caller owns its lifetime.
pub trait TokenStore: Send + Sync {
    fn load(&self, profile: &str) -> Result<Option<Token>, AuthError>;
    fn save(&self, profile: &str, token: &Token) -> Result<(), AuthError>;
    fn clear(&self, profile: &str) -> Result<(), AuthError>;
}

/// File-backed token store using a TOML file per profile.
///
/// # Example
/// ```no_run
/// use caddey::auth::{FileTokenStore, TokenStore};
///
/// let store = FileTokenStore::new_default();
/// let token = store.load("default")?;
/// # Ok::<(), caddey::auth::AuthError>(())
/// ```
#[derive(Debug, Clone)]
pub struct FileTokenStore {
    base_dir: PathBuf,
}

impl FileTokenStore {
    pub fn new(base_dir: PathBuf) -> Self {
        Self { base_dir }
    }

    /// Store rooted at `~/.caddey`.
    pub fn new_default() -> Self {
        Self {
            base_dir: default_caddey_dir(),
        }
    }

    fn token_path(&self, profile: &str) -> PathBuf {
        let profile = normalize_profile(profile);
        let name = if profile == "default" {
            "token.toml".to_string()
        } else {
            format!("token.{profile}.toml")
        };
        self.base_dir.join(name)
    }

    fn ensure_parent(path: &Path) -> Result<(), AuthError> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        Ok(())
    }
}

impl TokenStore for FileTokenStore {
    fn load(&self, profile: &str) -> Result<Option<Token>, AuthError> {
        let path = self.token_path(profile);
        let raw = match fs::read_to_string(&path) {
            Ok(data) => data,
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => return Ok(None),
            Err(err) => return Err(AuthError::Io(err.to_string())),
        };
        let file: TokenFile = toml::from_str(&raw)?;
        Ok(Some(file.token))
    }

    fn save(&self, profile: &str, token: &Token) -> Result<(), AuthError> {
        let path = self.token_path(profile);
        Self::ensure_parent(&path)?;
        let file = TokenFile {
            version: 1,
            profile: profile.to_string(),
            token: token.clone(),
            saved_at: Utc::now(),
        };
        let serialized = toml::to_string(&file)?;
        fs::write(&path, serialized)?;
        #[cfg(unix)]
        {
            use std::os::unix::fs::PermissionsExt;
            fs::set_permissions(&path, fs::Permissions::from_mode(0o600))?;
        }
        Ok(())
    }

    fn clear(&self, profile: &str) -> Result<(), AuthError> {
        let path = self.token_path(profile);
        match fs::remove_file(&path) {
            Ok(()) => Ok(()),
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(err) => Err(AuthError::Io(err.to_string())),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
struct TokenFile {
    version: u32,
    profile: String,
    token: Token,
    saved_at: DateTime<Utc>,
}

fn default_caddey_dir() -> PathBuf {
    directories::UserDirs::new()
        .map(|dirs| dirs.home_dir().join(".caddey"))
        .unwrap_or_else(|| PathBuf::from(".caddey"))
}

fn normalize_profile(value: &str) -> String {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return "default".to_string();
    }
    let mut out = String::with_capacity(trimmed.len());
    for ch in trimmed.chars() {
        let lower = ch.to_ascii_lowercase();
        if lower.is_ascii_alphanumeric() || lower == '-' {
            out.push(lower);
        } else {
            out.push('-');
        }
    }
    if out.trim_matches('-').is_empty() {
        "default".to_string()
    } else {
        out
    }
}
