use mockito::Server;
use std::sync::Arc;
use tokio::sync::Mutex;
use training_plan::{spawn_initial_load, FileStorage, ReadinessClient, TrainingTracker};

fn unused_log_path() -> std::path::PathBuf {
    let nanos = std::time::SystemTime::now()
        .duration_since(std::time::UNIX_EPOCH)
        .unwrap()
        .as_nanos();
    std::env::temp_dir().join(format!(
        "training_plan_readiness_{}_{nanos}.json",
        std::process::id()
    ))
}

async fn tracker() -> Arc<Mutex<TrainingTracker<FileStorage>>> {
    Arc::new(Mutex::new(
        TrainingTracker::mount(FileStorage::new(unused_log_path())).await,
    ))
}

#[tokio::test]
async fn initial_load_fills_readiness_list() {
    let mut server = Server::new_async().await;
    let proxy = server
        .mock("GET", "/api/oura-readiness")
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(
            r#"{"data":[
                {"day":"2024-01-01","readiness":70,"rhr":50,"hrv":null},
                {"day":"2024-01-02","readiness":null,"rhr":null,"hrv":null},
                {"day":"2024-01-03","readiness":80,"rhr":48,"hrv":61}
            ]}"#,
        )
        .expect(1)
        .create_async()
        .await;

    let tracker = tracker().await;
    let client = ReadinessClient::new(format!("{}/api/oura-readiness", server.url()));
    let mut task = spawn_initial_load(tracker.clone(), client).await;
    task.wait().await;
    proxy.assert_async().await;

    let tracker = tracker.lock().await;
    let readiness = tracker.readiness();
    assert!(!readiness.loading);
    assert!(readiness.error.is_none());
    assert_eq!(readiness.days.len(), 3);
    assert_eq!(readiness.days[1].rhr, None);

    let summary = tracker.readiness_summary();
    assert_eq!(summary.average, Some(50));
    assert_eq!(summary.latest.map(|day| day.day).as_deref(), Some("2024-01-03"));
}

#[tokio::test]
async fn proxy_error_is_recorded() {
    let mut server = Server::new_async().await;
    server
        .mock("GET", "/api/oura-readiness")
        .with_status(500)
        .with_header("content-type", "application/json")
        .with_body(r#"{"error":"Missing OURA_TOKEN credential"}"#)
        .create_async()
        .await;

    let tracker = tracker().await;
    let client = ReadinessClient::new(format!("{}/api/oura-readiness", server.url()));
    let mut task = spawn_initial_load(tracker.clone(), client).await;
    task.wait().await;

    let tracker = tracker.lock().await;
    let readiness = tracker.readiness();
    assert!(!readiness.loading);
    assert!(readiness.days.is_empty());
    let error = readiness.error.as_deref().unwrap();
    assert!(error.contains("500"), "{error}");
    assert!(error.contains("Missing OURA_TOKEN credential"), "{error}");
}

#[tokio::test]
async fn unreachable_proxy_is_recorded() {
    let tracker = tracker().await;
    let client = ReadinessClient::new("http://127.0.0.1:1/api/oura-readiness");
    let mut task = spawn_initial_load(tracker.clone(), client).await;
    task.wait().await;

    let tracker = tracker.lock().await;
    assert!(!tracker.readiness().loading);
    assert!(tracker.readiness().error.is_some());
    assert!(tracker.readiness().days.is_empty());
}

#[tokio::test]
async fn result_after_dispose_is_ignored() {
    let mut server = Server::new_async().await;
    server
        .mock("GET", "/api/oura-readiness")
        .with_status(200)
        .with_body(r#"{"data":[{"day":"2024-01-01","readiness":70,"rhr":null,"hrv":null}]}"#)
        .create_async()
        .await;

    let tracker = tracker().await;
    tracker.lock().await.dispose();

    let client = ReadinessClient::new(format!("{}/api/oura-readiness", server.url()));
    let mut task = spawn_initial_load(tracker.clone(), client).await;
    task.wait().await;

    let tracker = tracker.lock().await;
    assert!(tracker.readiness().days.is_empty());
    assert!(tracker.readiness().error.is_none());
}
