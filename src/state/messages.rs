use crate::state::storage::LoadingState;
use chrono::{DateTime, Utc};
use crossterm::event::KeyEvent;
use cuptable_engine::TournamentDocument;

#[derive(Debug, Clone)]
pub enum StorageRequest {
    Load { user: String },
    Save { user: String, document: Box<TournamentDocument> },
}

#[derive(Debug)]
pub enum StorageResponse {
    LoadingStateChanged { loading_state: LoadingState },
    /// `None` when the user has no stored tournament yet.
    DocumentLoaded { document: Option<Box<TournamentDocument>> },
    DocumentSaved { at: DateTime<Utc> },
    Error { message: String, during_save: bool },
}

#[derive(Debug, Clone)]
pub enum UiEvent {
    KeyPressed(KeyEvent),
    Resize,
    AppStarted,
}
