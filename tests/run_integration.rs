//! End-to-end runs against mocked storefront and Telegram servers.

use shelfwatch::commands::RunCommand;
use shelfwatch::config::{Config, Source, TelegramConfig};
use shelfwatch::store::SeenStore;
use tempfile::TempDir;
use wiremock::matchers::{body_string_contains, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

const CATALOG_FIXTURE: &str = include_str!("fixtures/catalog_listing.html");
const RESALE_FIXTURE: &str = include_str!("fixtures/resale_collection.html");

const CATALOG_PATH: &str = "/en-ca/c/men-we-made-too-much/n18mhdznrqw";
const RESALE_PATH: &str = "/collections/men-finds-under-50";

async fn mount_listings(server: &MockServer) {
    Mock::given(method("GET"))
        .and(path(CATALOG_PATH))
        .respond_with(ResponseTemplate::new(200).set_body_string(CATALOG_FIXTURE))
        .mount(server)
        .await;

    Mock::given(method("GET"))
        .and(path(RESALE_PATH))
        .respond_with(ResponseTemplate::new(200).set_body_string(RESALE_FIXTURE))
        .mount(server)
        .await;
}

fn make_config(server: &MockServer, dir: &TempDir) -> Config {
    Config {
        delay_ms: 0,
        delay_jitter_ms: 0,
        state_file: dir.path().join("seen.json"),
        telegram: TelegramConfig {
            bot_token: Some("TEST".to_string()),
            chat_id: Some("42".to_string()),
            api_base: server.uri(),
        },
        sources: vec![
            Source::new(format!("{}{}", server.uri(), CATALOG_PATH)),
            Source {
                breadcrumb: Some("Like New • Men".to_string()),
                ..Source::new(format!("{}{}", server.uri(), RESALE_PATH))
            },
        ],
        ..Config::default()
    }
}

#[tokio::test]
async fn test_run_end_to_end() {
    let server = MockServer::start().await;
    mount_listings(&server).await;

    Mock::given(method("POST"))
        .and(path("/botTEST/sendMessage"))
        .and(body_string_contains("4 new items"))
        .and(body_string_contains("License to Train Short-Sleeve Shirt - CAD $39.00"))
        .respond_with(ResponseTemplate::new(200).set_body_string(r#"{"ok":true}"#))
        .expect(1)
        .mount(&server)
        .await;

    let dir = TempDir::new().unwrap();
    let config = make_config(&server, &dir);
    let state_file = config.state_file.clone();

    let cmd = RunCommand::new(config).unwrap();

    let report = cmd.execute().await.unwrap();
    assert_eq!(report.sources_attempted, 2);
    assert!(report.failures.is_empty());
    assert_eq!(report.scraped, 9);
    assert_eq!(report.new_items.len(), 4);
    assert!(report.notified);
    assert!(report.persisted);

    let seen = SeenStore::new(&state_file).load();
    assert_eq!(seen.len(), 4);
    assert!(seen.contains(&format!("{}/products/abc-jogger-30-black", server.uri())));

    // Second run finds nothing new and sends nothing
    let again = cmd.execute().await.unwrap();
    assert!(again.is_idle());
    assert!(!again.notified);
}

#[tokio::test]
async fn test_run_survives_failing_source() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path(CATALOG_PATH))
        .respond_with(ResponseTemplate::new(503))
        .mount(&server)
        .await;

    Mock::given(method("GET"))
        .and(path(RESALE_PATH))
        .respond_with(ResponseTemplate::new(200).set_body_string(RESALE_FIXTURE))
        .mount(&server)
        .await;

    Mock::given(method("POST"))
        .and(path("/botTEST/sendMessage"))
        .and(body_string_contains("2 new items"))
        .respond_with(ResponseTemplate::new(200))
        .expect(1)
        .mount(&server)
        .await;

    let dir = TempDir::new().unwrap();
    let cmd = RunCommand::new(make_config(&server, &dir)).unwrap();

    let report = cmd.execute().await.unwrap();
    assert_eq!(report.failures.len(), 1);
    assert!(report.failures[0].message.contains("Rate limited"));
    assert_eq!(report.new_items.len(), 2);
    assert!(report.persisted);
}

#[tokio::test]
async fn test_run_telegram_rejection_still_saves_state() {
    let server = MockServer::start().await;
    mount_listings(&server).await;

    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(401).set_body_string("Unauthorized"))
        .expect(1)
        .mount(&server)
        .await;

    let dir = TempDir::new().unwrap();
    let config = make_config(&server, &dir);
    let state_file = config.state_file.clone();

    let report = RunCommand::new(config).unwrap().execute().await.unwrap();

    assert!(!report.notified);
    assert!(report.persisted);
    assert_eq!(SeenStore::new(&state_file).load().len(), 4);
}

#[tokio::test]
async fn test_dry_run_touches_nothing() {
    let server = MockServer::start().await;
    mount_listings(&server).await;

    Mock::given(method("POST")).respond_with(ResponseTemplate::new(200)).expect(0).mount(&server).await;

    let dir = TempDir::new().unwrap();
    let config = make_config(&server, &dir);
    let state_file = config.state_file.clone();

    let report = RunCommand::new(config).unwrap().dry_run(true).execute().await.unwrap();

    assert_eq!(report.new_items.len(), 4);
    assert!(!state_file.exists());
}
