use anyhow::Context;
use cuptable_engine::auth::CredentialTable;
use cuptable_engine::setup::SetupConfig;
use cuptable_engine::store::{Backend, FileStore, MemoryStore, RemoteStore};
use log::LevelFilter;
use std::path::PathBuf;

/// Where tournament documents are kept.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StoreKind {
    Memory,
    File(PathBuf),
    Remote(String),
}

impl StoreKind {
    pub fn open(&self) -> Backend {
        match self {
            StoreKind::Memory => Backend::Memory(MemoryStore::new()),
            StoreKind::File(dir) => Backend::File(FileStore::new(dir)),
            StoreKind::Remote(url) => Backend::Remote(RemoteStore::new(url.clone())),
        }
    }
}

#[derive(Debug, Clone)]
pub struct AppSettings {
    pub full_screen: bool,
    pub log_level: Option<LevelFilter>,
    /// Key of the stored document.
    pub user: String,
    pub store: StoreKind,
    pub setup: SetupConfig,
    /// `None` runs the session as a local admin without a login.
    pub credentials: Option<CredentialTable>,
}

impl AppSettings {
    /// Read `CUPTABLE_*` variables from the process environment.
    pub fn load() -> anyhow::Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    pub fn from_lookup(env: impl Fn(&str) -> Option<String>) -> anyhow::Result<Self> {
        let var = |key: &str| env(key).map(|v| v.trim().to_owned()).filter(|v| !v.is_empty());

        let user = var("CUPTABLE_USER")
            .or_else(|| var("USER"))
            .unwrap_or_else(|| "local".to_string());

        let store = match var("CUPTABLE_STORE").as_deref() {
            None | Some("file") => StoreKind::File(
                var("CUPTABLE_DATA_DIR")
                    .map(PathBuf::from)
                    .unwrap_or_else(|| default_data_dir(&var)),
            ),
            Some("memory") => StoreKind::Memory,
            Some(url) if url.starts_with("http://") || url.starts_with("https://") => {
                StoreKind::Remote(url.to_owned())
            }
            Some(other) => anyhow::bail!(
                "CUPTABLE_STORE must be memory, file or an http(s) URL, got {other:?}"
            ),
        };

        let setup = match var("CUPTABLE_SETUP_JSON") {
            Some(path) => {
                let json = std::fs::read_to_string(&path)
                    .with_context(|| format!("could not read setup file {path}"))?;
                SetupConfig::from_json(&json).with_context(|| format!("invalid setup json at {path}"))?
            }
            None => SetupConfig::default(),
        };

        let credentials = match var("CUPTABLE_USERS_JSON") {
            Some(path) => {
                let json = std::fs::read_to_string(&path)
                    .with_context(|| format!("could not read users file {path}"))?;
                Some(
                    CredentialTable::from_json(&json)
                        .with_context(|| format!("invalid users json at {path}"))?,
                )
            }
            None => None,
        };

        Ok(Self {
            full_screen: false,
            log_level: var("CUPTABLE_LOG").and_then(|level| level.parse().ok()),
            user,
            store,
            setup,
            credentials,
        })
    }
}

fn default_data_dir(var: &impl Fn(&str) -> Option<String>) -> PathBuf {
    if let Some(config_dir) = var("XDG_CONFIG_HOME") {
        return PathBuf::from(config_dir).join("cuptable");
    }
    if let Some(home) = var("HOME") {
        return PathBuf::from(home).join(".config").join("cuptable");
    }
    PathBuf::from("cuptable-data")
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn settings(vars: &[(&str, &str)]) -> anyhow::Result<AppSettings> {
        let vars: HashMap<String, String> =
            vars.iter().map(|(k, v)| (k.to_string(), v.to_string())).collect();
        AppSettings::from_lookup(move |key| vars.get(key).cloned())
    }

    #[test]
    fn defaults_to_file_store_under_config_dir() {
        let s = settings(&[("HOME", "/home/marta"), ("USER", "marta")]).unwrap();
        assert_eq!(s.user, "marta");
        assert_eq!(s.store, StoreKind::File(PathBuf::from("/home/marta/.config/cuptable")));
        assert_eq!(s.setup, SetupConfig::default());
        assert!(s.credentials.is_none());
        assert_eq!(s.log_level, None);
    }

    #[test]
    fn explicit_values_win() {
        let s = settings(&[
            ("USER", "marta"),
            ("CUPTABLE_USER", "club"),
            ("CUPTABLE_STORE", "https://cup.example.org/api"),
            ("CUPTABLE_LOG", "debug"),
        ])
        .unwrap();
        assert_eq!(s.user, "club");
        assert_eq!(s.store, StoreKind::Remote("https://cup.example.org/api".into()));
        assert_eq!(s.log_level, Some(LevelFilter::Debug));

        let s = settings(&[("CUPTABLE_STORE", "memory"), ("CUPTABLE_DATA_DIR", "/tmp/x")]).unwrap();
        assert_eq!(s.user, "local");
        assert_eq!(s.store, StoreKind::Memory);
    }

    #[test]
    fn unknown_store_is_an_error() {
        assert!(settings(&[("CUPTABLE_STORE", "redis")]).is_err());
    }

    #[test]
    fn missing_setup_file_is_an_error() {
        let err = settings(&[("CUPTABLE_SETUP_JSON", "/nonexistent/setup.json")]).unwrap_err();
        assert!(err.to_string().contains("/nonexistent/setup.json"));
    }
}
