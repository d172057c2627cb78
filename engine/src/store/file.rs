use super::{StoreError, StoreResult, TournamentStore, check_user};
use crate::TournamentDocument;
use log::debug;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

/// One pretty-printed JSON file per user: `<dir>/<user>.json`.
#[derive(Debug, Clone)]
pub struct FileStore {
    dir: PathBuf,
}

impl FileStore {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    fn path(&self, user: &str) -> StoreResult<PathBuf> {
        Ok(self.dir.join(format!("{}.json", check_user(user)?)))
    }
}

impl TournamentStore for FileStore {
    async fn load(&self, user: &str) -> StoreResult<Option<TournamentDocument>> {
        let path = self.path(user)?;
        let content = match tokio::fs::read_to_string(&path).await {
            Ok(content) => content,
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(None),
            Err(e) => return Err(StoreError::Io(e, path)),
        };
        let document = serde_json::from_str(&content)
            .map_err(|e| StoreError::Serde(e, path.display().to_string()))?;
        debug!("loaded {}", path.display());
        Ok(Some(document))
    }

    async fn save(&self, user: &str, document: &TournamentDocument) -> StoreResult<()> {
        let path = self.path(user)?;
        let json = serde_json::to_string_pretty(document)
            .map_err(|e| StoreError::Serde(e, path.display().to_string()))?;

        tokio::fs::create_dir_all(&self.dir)
            .await
            .map_err(|e| StoreError::Io(e, self.dir.clone()))?;

        // Write beside the target and rename so readers never see half a file.
        let tmp = path.with_extension("json.tmp");
        tokio::fs::write(&tmp, json)
            .await
            .map_err(|e| StoreError::Io(e, tmp.clone()))?;
        tokio::fs::rename(&tmp, &path)
            .await
            .map_err(|e| StoreError::Io(e, path.clone()))?;
        debug!("saved {}", path.display());
        Ok(())
    }
}
