use crate::error::{AppResult, Error};
use serde::{Deserialize, Serialize};
use std::path::Path;
use tokio::fs;
use tracing::{debug, info};

/// Which dashboard a signed-in account belongs to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    #[default]
    User,
    Expert,
    Admin,
}

/// The signed-in account
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionUser {
    pub id: String,
    pub name: String,
    pub email: String,
    #[serde(default)]
    pub role: Role,
    pub token: String,
}

/// Session state shared with whatever needs to know who is signed in.
///
/// Persisted explicitly through [`load`](Self::load) and [`save`](Self::save).
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionContext {
    pub user: Option<SessionUser>,
}

impl SessionContext {
    /// Read a saved session, or start signed out if none exists
    pub async fn load(path: impl AsRef<Path>) -> AppResult<Self> {
        let path = path.as_ref();
        match fs::read_to_string(path).await {
            Ok(content) => {
                let session: SessionContext = serde_json::from_str(&content)?;
                debug!("Loaded session from {}", path.display());
                Ok(session)
            }
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(Self::default()),
            Err(e) => Err(Error::Io(e)),
        }
    }

    /// Write the session to `path`, creating parent directories.
    ///
    /// The file holds the bearer token, so on unix it is readable by the
    /// owner only (mode 0o600).
    pub async fn save(&self, path: impl AsRef<Path>) -> AppResult<()> {
        let path = path.as_ref();
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent).await?;
        }
        let json = serde_json::to_string_pretty(self)?;
        restrict_to_owner(path).await?;
        fs::write(path, json).await?;
        debug!("Saved session to {}", path.display());
        Ok(())
    }

    pub fn sign_in(&mut self, user: SessionUser) {
        info!("Signed in as {} ({:?})", user.email, user.role);
        self.user = Some(user);
    }

    pub fn sign_out(&mut self) {
        if let Some(user) = self.user.take() {
            info!("Signed out {}", user.email);
        }
    }

    pub fn is_signed_in(&self) -> bool {
        self.user.is_some()
    }

    pub fn role(&self) -> Option<Role> {
        self.user.as_ref().map(|u| u.role)
    }

    /// Token for authenticated calls
    pub fn bearer_token(&self) -> AppResult<&str> {
        self.user
            .as_ref()
            .map(|u| u.token.as_str())
            .ok_or(Error::Unauthenticated)
    }
}

// Create the file owner-only before any token is written into it
#[cfg(unix)]
async fn restrict_to_owner(path: &Path) -> AppResult<()> {
    use std::os::unix::fs::PermissionsExt;

    fs::OpenOptions::new()
        .write(true)
        .create(true)
        .truncate(false)
        .mode(0o600)
        .open(path)
        .await?;
    fs::set_permissions(path, std::fs::Permissions::from_mode(0o600)).await?;
    Ok(())
}

#[cfg(not(unix))]
async fn restrict_to_owner(_path: &Path) -> AppResult<()> {
    Ok(())
}
