use crate::state::messages::{StorageRequest, StorageResponse};
use chrono::Utc;
use cuptable_engine::store::{Backend, StoreError, TournamentStore};
use log::{debug, error, info};
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::time::Duration;
use tokio::sync::mpsc;

const SPINNER_CHARS: [char; 10] = ['⠋', '⠙', '⠹', '⠸', '⠼', '⠴', '⠦', '⠧', '⠇', '⠏'];
pub const ERROR_CHAR: char = '!';

#[derive(Debug, Copy, Clone)]
pub struct LoadingState {
    pub is_loading: bool,
    pub spinner_char: char,
}

impl Default for LoadingState {
    fn default() -> Self {
        Self { is_loading: false, spinner_char: ' ' }
    }
}

/// Owns the store backend and serves load/save requests one at a time.
pub struct StoreWorker {
    store: Backend,
    requests: mpsc::Receiver<StorageRequest>,
    responses: mpsc::Sender<StorageResponse>,
    is_loading: Arc<AtomicBool>,
}

impl StoreWorker {
    pub fn new(
        store: Backend,
        requests: mpsc::Receiver<StorageRequest>,
        responses: mpsc::Sender<StorageResponse>,
    ) -> Self {
        Self {
            store,
            requests,
            responses,
            is_loading: Arc::new(AtomicBool::new(false)),
        }
    }

    pub async fn run(mut self) {
        info!("storage backend: {}", self.store.describe());
        while let Some(request) = self.requests.recv().await {
            self.start_loading_animation().await;

            let during_save = matches!(request, StorageRequest::Save { .. });
            let result = match request {
                StorageRequest::Load { user } => self.handle_load(&user).await,
                StorageRequest::Save { user, document } => self.handle_save(&user, &document).await,
            };

            self.stop_loading_animation(result.is_ok()).await;

            let response = result.unwrap_or_else(|err| StorageResponse::Error {
                message: err.to_string(),
                during_save,
            });

            if let Err(e) = self.responses.send(response).await {
                error!("Failed to send storage response: {e}");
                break;
            }
        }
    }

    async fn handle_load(&self, user: &str) -> Result<StorageResponse, StoreError> {
        debug!("loading tournament for {user}");
        let document = self.store.load(user).await?;
        if document.is_none() {
            info!("no stored tournament for {user}");
        }
        Ok(StorageResponse::DocumentLoaded { document: document.map(Box::new) })
    }

    async fn handle_save(
        &self,
        user: &str,
        document: &cuptable_engine::TournamentDocument,
    ) -> Result<StorageResponse, StoreError> {
        debug!("saving tournament for {user}");
        self.store.save(user, document).await?;
        Ok(StorageResponse::DocumentSaved { at: Utc::now() })
    }

    async fn start_loading_animation(&self) {
        self.is_loading.store(true, Ordering::Relaxed);

        let mut loading_state = LoadingState { is_loading: true, spinner_char: SPINNER_CHARS[0] };
        let _ = self
            .responses
            .send(StorageResponse::LoadingStateChanged { loading_state })
            .await;

        let responses = self.responses.clone();
        let is_loading = self.is_loading.clone();

        tokio::spawn(async move {
            let mut spinner_index = 1;
            let mut interval = tokio::time::interval(Duration::from_millis(33));
            loop {
                interval.tick().await;
                if !is_loading.load(Ordering::Relaxed) {
                    break;
                }
                loading_state.spinner_char = SPINNER_CHARS[spinner_index];
                spinner_index = (spinner_index + 1) % SPINNER_CHARS.len();
                let _ = responses
                    .send(StorageResponse::LoadingStateChanged { loading_state })
                    .await;
            }
        });
    }

    async fn stop_loading_animation(&self, is_ok: bool) {
        self.is_loading.store(false, Ordering::Relaxed);
        tokio::time::sleep(Duration::from_millis(15)).await;

        let spinner_char = if is_ok { ' ' } else { ERROR_CHAR };
        let _ = self
            .responses
            .send(StorageResponse::LoadingStateChanged {
                loading_state: LoadingState { is_loading: false, spinner_char },
            })
            .await;
    }
}
