use super::{StoreResult, TournamentStore, check_user};
use crate::TournamentDocument;
use std::collections::HashMap;
use std::sync::{Arc, Mutex};

/// Process-local store. Clones share the same documents.
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    documents: Arc<Mutex<HashMap<String, TournamentDocument>>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    fn with<T>(&self, f: impl FnOnce(&mut HashMap<String, TournamentDocument>) -> T) -> T {
        let mut guard = self.documents.lock().unwrap_or_else(|poisoned| poisoned.into_inner());
        f(&mut guard)
    }
}

impl TournamentStore for MemoryStore {
    async fn load(&self, user: &str) -> StoreResult<Option<TournamentDocument>> {
        let user = check_user(user)?;
        Ok(self.with(|docs| docs.get(user).cloned()))
    }

    async fn save(&self, user: &str, document: &TournamentDocument) -> StoreResult<()> {
        let user = check_user(user)?;
        self.with(|docs| docs.insert(user.to_owned(), document.clone()));
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::setup::SetupConfig;

    #[tokio::test]
    async fn documents_are_kept_per_user() {
        let store = MemoryStore::new();
        assert_eq!(store.load("marta").await.unwrap(), None);

        let doc = TournamentDocument::from_setup(&SetupConfig::default());
        store.save("marta", &doc).await.unwrap();

        let shared = store.clone();
        assert_eq!(shared.load("marta").await.unwrap(), Some(doc));
        assert_eq!(shared.load("pm").await.unwrap(), None);
    }

    #[tokio::test]
    async fn invalid_user_is_rejected() {
        let store = MemoryStore::new();
        assert!(store.load("../etc").await.is_err());
    }
}
