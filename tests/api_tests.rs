// tests/api_tests.rs

use std::sync::Arc;

use studytrack::{config::Config, routes, state::AppState, store::JsonFileStore};
use tempfile::TempDir;

/// Helper to spawn the app on a random port with an isolated data
/// directory. Returns the base URL and the temp dir guard (dropping it
/// deletes the store).
async fn spawn_app() -> (String, TempDir) {
    let dir = tempfile::tempdir().expect("Failed to create temp dir");
    let root = dir.path();

    let static_dir = root.join("static");
    let config = Config {
        data_file: root.join("tests.json"),
        graph_file: static_dir.join("graphs").join("progress.svg"),
        static_dir,
        export_file: root.join("report.pdf"),
        bind_addr: "127.0.0.1:0".to_string(),
        rust_log: "error".to_string(),
    };
    config.ensure_dirs().expect("Failed to create dirs");

    let store = Arc::new(JsonFileStore::new(config.data_file.clone()));
    let state = AppState { store, config };

    let app = routes::create_router(state);

    let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
        .await
        .expect("Failed to bind random port");
    let port = listener.local_addr().unwrap().port();
    let address = format!("http://127.0.0.1:{}", port);

    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });

    (address, dir)
}

/// Client that does not follow redirects, so we can assert on them.
fn raw_client() -> reqwest::Client {
    reqwest::Client::builder()
        .redirect(reqwest::redirect::Policy::none())
        .build()
        .unwrap()
}

async fn add_test(
    client: &reqwest::Client,
    address: &str,
    subject: &str,
    chapter: &str,
    scored: &str,
    total: &str,
) -> reqwest::Response {
    client
        .post(format!("{}/add", address))
        .form(&[
            ("subject", subject),
            ("chapter", chapter),
            ("date", "2024-06-01"),
            ("marks_scored", scored),
            ("marks_total", total),
            ("remarks", "did ok"),
        ])
        .send()
        .await
        .expect("Failed to execute request")
}

#[tokio::test]
async fn unknown_path_is_404() {
    let (address, _dir) = spawn_app().await;
    let client = reqwest::Client::new();

    let response = client
        .get(format!("{}/random_path_that_does_not_exist", address))
        .send()
        .await
        .expect("Failed to execute request");

    assert_eq!(response.status().as_u16(), 404);
}

#[tokio::test]
async fn home_page_renders_on_empty_store() {
    let (address, _dir) = spawn_app().await;
    let client = reqwest::Client::new();

    let response = client.get(format!("{}/", address)).send().await.unwrap();

    assert_eq!(response.status().as_u16(), 200);
    let body = response.text().await.unwrap();
    assert!(body.contains("No tests recorded yet"));
}

#[tokio::test]
async fn add_redirects_to_dashboard_and_record_shows_up() {
    let (address, _dir) = spawn_app().await;
    let client = raw_client();

    let response = add_test(&client, &address, "Maths", "Algebra", "40", "50").await;
    assert_eq!(response.status().as_u16(), 303);
    assert_eq!(
        response.headers()["location"].to_str().unwrap(),
        "/dashboard"
    );

    let dashboard = client
        .get(format!("{}/dashboard", address))
        .send()
        .await
        .unwrap()
        .text()
        .await
        .unwrap();

    assert!(dashboard.contains("Maths"));
    assert!(dashboard.contains("Algebra"));
    assert!(dashboard.contains("40 / 50"));
    assert!(dashboard.contains("did ok"));
}

#[tokio::test]
async fn add_rejects_non_integer_marks() {
    let (address, _dir) = spawn_app().await;
    let client = raw_client();

    let response = add_test(&client, &address, "Maths", "Algebra", "forty", "50").await;

    assert_eq!(response.status().as_u16(), 400);
    let body = response.text().await.unwrap();
    assert!(body.contains("non-negative integer"));
}

#[tokio::test]
async fn add_rejects_scored_above_total() {
    let (address, _dir) = spawn_app().await;
    let client = raw_client();

    let response = add_test(&client, &address, "Maths", "Algebra", "60", "50").await;
    assert_eq!(response.status().as_u16(), 400);
}

#[tokio::test]
async fn add_rejects_bad_date() {
    let (address, _dir) = spawn_app().await;
    let client = raw_client();

    let response = client
        .post(format!("{}/add", address))
        .form(&[
            ("subject", "Maths"),
            ("chapter", "Algebra"),
            ("date", "01/06/2024"),
            ("marks_scored", "40"),
            ("marks_total", "50"),
        ])
        .send()
        .await
        .unwrap();

    assert_eq!(response.status().as_u16(), 400);
}

#[tokio::test]
async fn rank_on_empty_store_is_zero_bronze() {
    let (address, _dir) = spawn_app().await;
    let client = reqwest::Client::new();

    let response = client.get(format!("{}/rank", address)).send().await.unwrap();
    assert_eq!(response.status().as_u16(), 200);

    let body = response.text().await.unwrap();
    assert!(body.contains("0.00%"));
    assert!(body.contains("Bronze"));
}

#[tokio::test]
async fn rank_eighty_percent_is_gold() {
    let (address, _dir) = spawn_app().await;
    let client = raw_client();

    add_test(&client, &address, "Maths", "Algebra", "40", "50").await;

    let body = client
        .get(format!("{}/rank", address))
        .send()
        .await
        .unwrap()
        .text()
        .await
        .unwrap();

    assert!(body.contains("80.00%"));
    assert!(body.contains("Gold"));
}

#[tokio::test]
async fn graph_on_empty_store_is_plain_message() {
    let (address, _dir) = spawn_app().await;
    let client = reqwest::Client::new();

    let response = client.get(format!("{}/graph", address)).send().await.unwrap();
    assert_eq!(response.status().as_u16(), 200);

    let body = response.text().await.unwrap();
    assert!(body.contains("No test data"));
}

#[tokio::test]
async fn graph_renders_chart_and_serves_it() {
    let (address, dir) = spawn_app().await;
    let client = raw_client();

    add_test(&client, &address, "Maths", "Algebra", "40", "50").await;

    let body = client
        .get(format!("{}/graph", address))
        .send()
        .await
        .unwrap()
        .text()
        .await
        .unwrap();
    assert!(body.contains("/static/graphs/progress.svg"));

    // The chart file was written and is served back as SVG.
    let chart_path = dir.path().join("static").join("graphs").join("progress.svg");
    assert!(chart_path.exists());

    let chart = client
        .get(format!("{}/static/graphs/progress.svg", address))
        .send()
        .await
        .unwrap();
    assert_eq!(chart.status().as_u16(), 200);
    assert!(chart.text().await.unwrap().contains("<svg"));
}

#[tokio::test]
async fn tips_flags_only_weak_chapters() {
    let (address, _dir) = spawn_app().await;
    let client = raw_client();

    add_test(&client, &address, "Physics", "Optics", "30", "100").await;
    add_test(&client, &address, "Maths", "Algebra", "80", "100").await;

    let body = client
        .get(format!("{}/tips", address))
        .send()
        .await
        .unwrap()
        .text()
        .await
        .unwrap();

    assert!(body.contains("Physics: Optics"));
    assert!(!body.contains("Maths: Algebra"));
}

#[tokio::test]
async fn tips_empty_store_shows_no_weak_chapters() {
    let (address, _dir) = spawn_app().await;
    let client = reqwest::Client::new();

    let body = client
        .get(format!("{}/tips", address))
        .send()
        .await
        .unwrap()
        .text()
        .await
        .unwrap();

    assert!(body.contains("No weak chapters"));
}

#[tokio::test]
async fn export_on_empty_store_is_plain_message() {
    let (address, _dir) = spawn_app().await;
    let client = reqwest::Client::new();

    let response = client
        .get(format!("{}/export", address))
        .send()
        .await
        .unwrap();
    assert_eq!(response.status().as_u16(), 200);
    assert!(response.text().await.unwrap().contains("No data to export"));
}

#[tokio::test]
async fn export_returns_pdf_attachment() {
    let (address, _dir) = spawn_app().await;
    let client = raw_client();

    add_test(&client, &address, "Maths", "Algebra", "40", "50").await;

    let response = client
        .get(format!("{}/export", address))
        .send()
        .await
        .unwrap();

    assert_eq!(response.status().as_u16(), 200);
    assert_eq!(
        response.headers()["content-type"].to_str().unwrap(),
        "application/pdf"
    );
    assert!(
        response.headers()["content-disposition"]
            .to_str()
            .unwrap()
            .contains("attachment")
    );

    let bytes = response.bytes().await.unwrap();
    assert!(bytes.starts_with(b"%PDF"));
}
