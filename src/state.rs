use crate::proxy::ReadinessProxy;
use crate::storage::FileStorage;
use crate::tracker::TrainingTracker;
use std::sync::Arc;
use tokio::sync::Mutex;

pub type SharedTracker = Arc<Mutex<TrainingTracker<FileStorage>>>;

#[derive(Clone)]
pub struct AppState {
    pub tracker: SharedTracker,
    pub proxy: ReadinessProxy,
}

impl AppState {
    pub fn new(tracker: TrainingTracker<FileStorage>, proxy: ReadinessProxy) -> Self {
        Self {
            tracker: Arc::new(Mutex::new(tracker)),
            proxy,
        }
    }
}
