use std::fs;
use std::path::{Path, PathBuf};

use roof_core::AuthError;

const DEFAULT_KEYRING_SERVICE: &str = "rooftop-intel";
const KEYRING_USER: &str = "firebase-refresh-token";
const SESSION_FILE_NAME: &str = "session";

/// Where the refresh token of a signed-in member is kept between runs.
///
/// Keyring first, falling back to `~/.rooftop/session` (mode 0600).
#[derive(Debug, Clone)]
pub struct SessionStore {
    keyring_service: Option<String>,
    file_path: PathBuf,
}

impl SessionStore {
    /// Keyring + home-directory file store.
    ///
    /// The keyring service defaults to `"rooftop-intel"`; override it with
    /// `ROOF_KEYRING_SERVICE` to keep test runs away from real credentials.
    ///
    /// # Errors
    ///
    /// Returns `AuthError::SessionStore` if the home directory cannot be found.
    pub fn default_location() -> Result<Self, AuthError> {
        let service = std::env::var("ROOF_KEYRING_SERVICE")
            .unwrap_or_else(|_| DEFAULT_KEYRING_SERVICE.to_string());
        let file_path = dirs::home_dir()
            .map(|h| h.join(".rooftop").join(SESSION_FILE_NAME))
            .ok_or_else(|| {
                AuthError::SessionStore("home directory not found; cannot persist session".into())
            })?;
        Ok(Self {
            keyring_service: Some(service),
            file_path,
        })
    }

    /// File-only store at `path`; never touches the keyring.
    #[must_use]
    pub fn file_only(path: impl Into<PathBuf>) -> Self {
        Self {
            keyring_service: None,
            file_path: path.into(),
        }
    }

    #[must_use]
    pub fn file_path(&self) -> &Path {
        &self.file_path
    }

    /// Persist a refresh token. Falls back to file if the keyring is unavailable.
    ///
    /// # Errors
    ///
    /// Returns `AuthError::SessionStore` if both keyring and file storage fail.
    pub fn store(&self, refresh_token: &str) -> Result<(), AuthError> {
        let Some(service) = &self.keyring_service else {
            return self.store_file(refresh_token);
        };

        match keyring::Entry::new(service, KEYRING_USER) {
            Ok(entry) => match entry.set_password(refresh_token) {
                Ok(()) => Ok(()),
                Err(error) => {
                    tracing::warn!(%error, "keyring store failed; falling back to file");
                    self.store_file(refresh_token)
                }
            },
            Err(error) => {
                tracing::warn!(%error, "keyring unavailable; falling back to file");
                self.store_file(refresh_token)
            }
        }
    }

    /// Load a persisted refresh token. Priority: keyring → file.
    #[must_use]
    pub fn load(&self) -> Option<String> {
        if let Some(service) = &self.keyring_service
            && let Ok(entry) = keyring::Entry::new(service, KEYRING_USER)
            && let Ok(token) = entry.get_password()
            && !token.is_empty()
        {
            return Some(token);
        }

        self.load_file()
    }

    /// Delete the persisted refresh token from keyring and file.
    ///
    /// # Errors
    ///
    /// Returns `AuthError::SessionStore` if the session file cannot be removed.
    pub fn delete(&self) -> Result<(), AuthError> {
        // May not exist in the keyring; only the file removal is fallible.
        if let Some(service) = &self.keyring_service
            && let Ok(entry) = keyring::Entry::new(service, KEYRING_USER)
        {
            let _ = entry.delete_credential();
        }

        if self.file_path.exists() {
            fs::remove_file(&self.file_path).map_err(|e| {
                AuthError::SessionStore(format!(
                    "failed to delete {}: {e}",
                    self.file_path.display()
                ))
            })?;
        }

        Ok(())
    }

    fn store_file(&self, refresh_token: &str) -> Result<(), AuthError> {
        let path = &self.file_path;
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).map_err(|e| {
                AuthError::SessionStore(format!("mkdir {}: {e}", parent.display()))
            })?;
            #[cfg(unix)]
            {
                use std::os::unix::fs::PermissionsExt;
                if let Err(e) = fs::set_permissions(parent, fs::Permissions::from_mode(0o700)) {
                    tracing::warn!("failed to chmod 0700 {}: {e}", parent.display());
                }
            }
        }
        fs::write(path, refresh_token)
            .map_err(|e| AuthError::SessionStore(format!("write {}: {e}", path.display())))?;

        #[cfg(unix)]
        {
            use std::os::unix::fs::PermissionsExt;
            fs::set_permissions(path, fs::Permissions::from_mode(0o600)).map_err(|e| {
                AuthError::SessionStore(format!("chmod {}: {e}", path.display()))
            })?;
        }

        Ok(())
    }

    fn load_file(&self) -> Option<String> {
        fs::read_to_string(&self.file_path)
            .ok()
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
    }
}
