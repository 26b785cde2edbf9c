use std::ffi::OsString;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use async_trait::async_trait;
use tokio::fs;
use tracing::{debug, info};

use super::{AuthMapDocument, AuthMapError, MapRole};

/// Storage of a cluster's role mappings.
///
/// `add_role` only stages the entry; nothing is persisted until `save`.
#[async_trait]
pub trait AuthMapStore: Send {
    async fn roles(&self) -> Result<Vec<MapRole>, AuthMapError>;

    async fn add_role(&mut self, role: MapRole) -> Result<(), AuthMapError>;

    async fn save(&mut self) -> Result<(), AuthMapError>;
}

/// Role mappings kept in a JSON document on disk.
#[derive(Debug, Clone)]
pub struct FileAuthMap {
    path: PathBuf,
    document: AuthMapDocument,
}

impl FileAuthMap {
    /// Load `path`; a missing file is an empty mapping.
    pub async fn open(path: impl AsRef<Path>) -> Result<Self, AuthMapError> {
        let path = path.as_ref().to_path_buf();
        let document = match fs::read(&path).await {
            Ok(bytes) => serde_json::from_slice(&bytes)?,
            Err(err) if err.kind() == ErrorKind::NotFound => {
                debug!(path = %path.display(), "no auth document yet, starting empty");
                AuthMapDocument::default()
            }
            Err(err) => return Err(err.into()),
        };
        Ok(Self { path, document })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

/// Sibling of `path` with `.tmp` appended to the full file name.
fn temp_path(path: &Path) -> PathBuf {
    let mut name = path.file_name().map(OsString::from).unwrap_or_default();
    name.push(".tmp");
    path.with_file_name(name)
}

#[async_trait]
impl AuthMapStore for FileAuthMap {
    async fn roles(&self) -> Result<Vec<MapRole>, AuthMapError> {
        Ok(self.document.map_roles.clone())
    }

    async fn add_role(&mut self, role: MapRole) -> Result<(), AuthMapError> {
        self.document.map_roles.push(role);
        Ok(())
    }

    async fn save(&mut self) -> Result<(), AuthMapError> {
        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent).await?;
        }

        let bytes = serde_json::to_vec_pretty(&self.document)?;

        // Write atomically: write to a tmp file then rename.
        let tmp = temp_path(&self.path);
        fs::write(&tmp, &bytes).await?;
        fs::rename(&tmp, &self.path).await?;

        info!(
            path = %self.path.display(),
            roles = self.document.map_roles.len(),
            "saved auth document"
        );
        Ok(())
    }
}
