use crate::state::messages::StorageRequest;
use std::time::Duration;
use tokio::sync::mpsc;
use tokio::time::interval;

pub const RELOAD_EVERY: Duration = Duration::from_secs(60);

/// Reloads the stored tournament once a minute so results entered from
/// another session show up.
pub struct PeriodicRefresher {
    user: String,
    storage_requests: mpsc::Sender<StorageRequest>,
}

impl PeriodicRefresher {
    pub fn new(user: String, storage_requests: mpsc::Sender<StorageRequest>) -> Self {
        Self { user, storage_requests }
    }

    pub async fn run(self) {
        let mut reload_interval = interval(RELOAD_EVERY);
        // The first tick fires immediately; startup already loads.
        reload_interval.tick().await;

        loop {
            reload_interval.tick().await;
            let request = StorageRequest::Load { user: self.user.clone() };
            if self.storage_requests.send(request).await.is_err() {
                break;
            }
        }
    }
}
