pub mod app;
pub mod config;
pub mod errors;
pub mod handlers;
pub mod models;
pub mod plan;
pub mod proxy;
pub mod readiness;
pub mod stats;
pub mod storage;
pub mod tracker;
pub mod ui;
pub mod state;

pub use app::router;
pub use config::AppConfig;
pub use proxy::{Clock, ReadinessProxy};
pub use readiness::{spawn_initial_load, ReadinessClient};
pub use state::AppState;
pub use storage::FileStorage;
pub use tracker::TrainingTracker;
