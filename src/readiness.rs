use crate::errors::ClientError;
use crate::models::{ErrorBody, ReadinessDay, ReadinessEnvelope};
use crate::storage::LogStorage;
use crate::tracker::TrainingTracker;
use reqwest::Client;
use std::sync::Arc;
use tokio::{sync::Mutex, task::JoinHandle};
use tracing::debug;

/// Calls the readiness proxy on behalf of the view-model.
#[derive(Debug, Clone)]
pub struct ReadinessClient {
    http: Client,
    url: String,
}

impl ReadinessClient {
    pub fn new(url: impl Into<String>) -> Self {
        Self {
            http: Client::new(),
            url: url.into(),
        }
    }

    pub async fn fetch(&self) -> Result<Vec<ReadinessDay>, ClientError> {
        let response = self.http.get(&self.url).send().await?;
        let status = response.status();
        if !status.is_success() {
            let message = match response.json::<ErrorBody>().await {
                Ok(body) => body.error,
                Err(_) => status
                    .canonical_reason()
                    .unwrap_or("request failed")
                    .to_string(),
            };
            return Err(ClientError::Status {
                status: status.as_u16(),
                message,
            });
        }

        let envelope: ReadinessEnvelope = response.json().await?;
        Ok(envelope.data)
    }
}

/// Handle to the mount-time readiness load. Dropping it aborts the load.
pub struct ReadinessTask {
    handle: JoinHandle<()>,
}

impl ReadinessTask {
    pub async fn wait(&mut self) {
        let _ = (&mut self.handle).await;
    }
}

impl Drop for ReadinessTask {
    fn drop(&mut self) {
        self.handle.abort();
    }
}

/// Marks the tracker as loading and fetches readiness in the background.
/// The tracker lock is not held while the request is in flight.
pub async fn spawn_initial_load<S: LogStorage>(
    tracker: Arc<Mutex<TrainingTracker<S>>>,
    client: ReadinessClient,
) -> ReadinessTask {
    let ticket = tracker.lock().await.begin_readiness_load();
    let handle = tokio::spawn(async move {
        let result = client.fetch().await.map_err(|err| err.to_string());
        let applied = tracker.lock().await.finish_readiness_load(ticket, result);
        debug!(applied, "readiness load finished");
    });
    ReadinessTask { handle }
}
