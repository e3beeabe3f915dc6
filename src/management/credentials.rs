use std::path::PathBuf;

use crate::{
    error::{Error, Result},
    types::Credential,
};

/// Keeps the current credential between CLI invocations, but never past its
/// expiry: an expired file is removed on load.
pub struct CredentialStore {
    path: PathBuf,
}

impl Default for CredentialStore {
    fn default() -> Self {
        let mut path = dirs::data_local_dir().unwrap_or_else(|| PathBuf::from("."));
        path.push("spotufy/cache/credential.json");
        Self { path }
    }
}

impl CredentialStore {
    pub fn at(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// The stored credential while it is still valid.
    ///
    /// # Errors
    ///
    /// `Unauthorized` when nothing is stored or the stored credential has
    /// expired.
    pub async fn load(&self) -> Result<Credential> {
        let content = async_fs::read_to_string(&self.path)
            .await
            .map_err(|_| Error::unauthorized("not logged in; run `spotufy auth`"))?;
        let credential: Credential = serde_json::from_str(&content)
            .map_err(|e| Error::unauthorized(format!("unreadable credential: {e}")))?;

        if credential.is_expired() {
            self.clear().await?;
            return Err(Error::unauthorized(
                "credential expired; run `spotufy auth` again",
            ));
        }
        Ok(credential)
    }

    pub async fn persist(&self, credential: &Credential) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            async_fs::create_dir_all(parent).await?;
        }

        let json = serde_json::to_string_pretty(credential)?;
        async_fs::write(&self.path, json).await?;
        Ok(())
    }

    /// Forgets the stored credential. Nothing stored is not an error.
    pub async fn clear(&self) -> Result<()> {
        match async_fs::remove_file(&self.path).await {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(Error::Io(e)),
        }
    }
}
