//! Document persistence keyed by user.

mod file;
mod memory;
mod remote;

pub use file::FileStore;
pub use memory::MemoryStore;
pub use remote::RemoteStore;

use crate::TournamentDocument;
use std::fmt;
use std::future::Future;
use std::path::PathBuf;

pub type StoreResult<T> = Result<T, StoreError>;

#[derive(Debug)]
pub enum StoreError {
    Network(reqwest::Error, String),
    Api(reqwest::Error, String),
    Parsing(reqwest::Error, String),
    Io(std::io::Error, PathBuf),
    Serde(serde_json::Error, String),
    InvalidUser(String),
}

impl fmt::Display for StoreError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StoreError::Network(e, url) => write!(f, "Network error for {url}: {e}"),
            StoreError::Api(e, url) => write!(f, "API error for {url}: {e}"),
            StoreError::Parsing(e, url) => write!(f, "Parse error for {url}: {e}"),
            StoreError::Io(e, path) => write!(f, "I/O error for {}: {e}", path.display()),
            StoreError::Serde(e, at) => write!(f, "Invalid document at {at}: {e}"),
            StoreError::InvalidUser(user) => write!(f, "Invalid user key: {user:?}"),
        }
    }
}

impl std::error::Error for StoreError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            StoreError::Network(e, _) | StoreError::Api(e, _) | StoreError::Parsing(e, _) => Some(e),
            StoreError::Io(e, _) => Some(e),
            StoreError::Serde(e, _) => Some(e),
            StoreError::InvalidUser(_) => None,
        }
    }
}

/// Load and save one tournament document per user. `load` returns `None`
/// when the user has no document yet.
pub trait TournamentStore: Send + Sync {
    fn load(&self, user: &str) -> impl Future<Output = StoreResult<Option<TournamentDocument>>> + Send;

    fn save(&self, user: &str, document: &TournamentDocument) -> impl Future<Output = StoreResult<()>> + Send;
}

/// User keys end up in file names and URL paths.
pub(crate) fn check_user(user: &str) -> StoreResult<&str> {
    let valid = !user.is_empty()
        && user
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || matches!(c, '-' | '_' | '.' | '@'))
        && user != "."
        && user != "..";
    if valid {
        Ok(user)
    } else {
        Err(StoreError::InvalidUser(user.to_owned()))
    }
}

/// The configured backend, picked at startup.
#[derive(Debug, Clone)]
pub enum Backend {
    Memory(MemoryStore),
    File(FileStore),
    Remote(RemoteStore),
}

impl Backend {
    pub fn describe(&self) -> String {
        match self {
            Backend::Memory(_) => "memory".to_string(),
            Backend::File(store) => format!("file:{}", store.dir().display()),
            Backend::Remote(store) => store.base_url().to_string(),
        }
    }
}

impl TournamentStore for Backend {
    async fn load(&self, user: &str) -> StoreResult<Option<TournamentDocument>> {
        match self {
            Backend::Memory(store) => store.load(user).await,
            Backend::File(store) => store.load(user).await,
            Backend::Remote(store) => store.load(user).await,
        }
    }

    async fn save(&self, user: &str, document: &TournamentDocument) -> StoreResult<()> {
        match self {
            Backend::Memory(store) => store.save(user, document).await,
            Backend::File(store) => store.save(user, document).await,
            Backend::Remote(store) => store.save(user, document).await,
        }
    }
}
