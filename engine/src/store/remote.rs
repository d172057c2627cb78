use super::{StoreError, StoreResult, TournamentStore, check_user};
use crate::TournamentDocument;
use log::debug;
use reqwest::{Client, StatusCode};
use std::time::Duration;

/// HTTP document API: `GET` and `PUT` on `{base}/tournaments/{user}`.
#[derive(Debug, Clone)]
pub struct RemoteStore {
    client: Client,
    base_url: String,
    timeout: Duration,
}

impl RemoteStore {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            client: Client::builder()
                .user_agent(concat!("cuptable/", env!("CARGO_PKG_VERSION")))
                .build()
                .unwrap_or_default(),
            base_url: base_url.into().trim_end_matches('/').to_owned(),
            timeout: Duration::from_secs(10),
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn url(&self, user: &str) -> StoreResult<String> {
        Ok(format!("{}/tournaments/{}", self.base_url, check_user(user)?))
    }
}

impl TournamentStore for RemoteStore {
    async fn load(&self, user: &str) -> StoreResult<Option<TournamentDocument>> {
        let url = self.url(user)?;
        let response = self
            .client
            .get(&url)
            .timeout(self.timeout)
            .send()
            .await
            .map_err(|e| StoreError::Network(e, url.clone()))?;

        if response.status() == StatusCode::NOT_FOUND {
            debug!("no document at {url}");
            return Ok(None);
        }

        match response.error_for_status() {
            Ok(res) => res
                .json::<TournamentDocument>()
                .await
                .map(Some)
                .map_err(|e| StoreError::Parsing(e, url)),
            Err(e) => Err(StoreError::Api(e, url)),
        }
    }

    async fn save(&self, user: &str, document: &TournamentDocument) -> StoreResult<()> {
        let url = self.url(user)?;
        let response = self
            .client
            .put(&url)
            .timeout(self.timeout)
            .json(document)
            .send()
            .await
            .map_err(|e| StoreError::Network(e, url.clone()))?;

        response
            .error_for_status()
            .map(|_| ())
            .map_err(|e| StoreError::Api(e, url))
    }
}
