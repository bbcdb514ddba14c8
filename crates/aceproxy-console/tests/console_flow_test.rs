// End-to-end console flows against a mock gateway

use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;

use parking_lot::Mutex;
use serde_json::json;
use wiremock::matchers::{method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

use aceproxy_client::notify::Notifier;
use aceproxy_client::{ConsoleClientConfig, CredentialStore, GatewayAdminClient};
use aceproxy_console::configs::{ConfigListRenderer, ConfigRow, ConfigStore};
use aceproxy_console::logs::{LogFilters, LogListRenderer, LogView, PageLink};
use aceproxy_console::pages::ApiConfigPage;
use aceproxy_console::poller::PollScheduler;
use aceproxy_console::router::{Page, Router};
use aceproxy_console::session::Session;
use aceproxy_console::test_status::{TestStatus, TestStatusTracker};
use aceproxy_console::view::{AlwaysConfirm, ContentSink};
use aceproxy_client::model::RequestLogRecord;

#[derive(Default)]
struct RecordingNotifier {
    successes: Mutex<Vec<String>>,
    errors: Mutex<Vec<String>>,
    auth_prompts: AtomicUsize,
}

impl RecordingNotifier {
    fn successes(&self) -> Vec<String> {
        self.successes.lock().clone()
    }

    fn errors(&self) -> Vec<String> {
        self.errors.lock().clone()
    }

    fn auth_prompts(&self) -> usize {
        self.auth_prompts.load(Ordering::SeqCst)
    }
}

impl Notifier for RecordingNotifier {
    fn success(&self, message: &str) {
        self.successes.lock().push(message.to_string());
    }

    fn error(&self, message: &str) {
        self.errors.lock().push(message.to_string());
    }

    fn auth_required(&self) {
        self.auth_prompts.fetch_add(1, Ordering::SeqCst);
    }
}

#[derive(Default)]
struct ConfigFrames {
    frames: Mutex<Vec<Vec<ConfigRow>>>,
}

impl ConfigFrames {
    fn last(&self) -> Vec<ConfigRow> {
        self.frames.lock().last().cloned().unwrap_or_default()
    }

    fn count(&self) -> usize {
        self.frames.lock().len()
    }
}

impl ConfigListRenderer for ConfigFrames {
    fn render(&self, rows: &[ConfigRow]) {
        self.frames.lock().push(rows.to_vec());
    }
}

#[derive(Default)]
struct LogFrames {
    frames: Mutex<Vec<(Vec<RequestLogRecord>, Vec<PageLink>)>>,
}

impl LogListRenderer for LogFrames {
    fn render(&self, records: &[RequestLogRecord], links: &[PageLink]) {
        self.frames.lock().push((records.to_vec(), links.to_vec()));
    }
}

#[derive(Default)]
struct NullSink;

impl ContentSink for NullSink {
    fn show_loading(&self) {}
    fn hide_loading(&self) {}
    fn set_content(&self, _page: Page) {}
    fn set_error(&self, _message: &str) {}
    fn set_active_nav(&self, _page: Page) {}
    fn clear_content(&self) {}
}

fn gateway_client(
    server: &MockServer,
) -> (
    Arc<GatewayAdminClient>,
    Arc<CredentialStore>,
    Arc<RecordingNotifier>,
) {
    let credentials = Arc::new(CredentialStore::in_memory());
    credentials.set("operator-token");
    let notifier = Arc::new(RecordingNotifier::default());
    let client = Arc::new(
        GatewayAdminClient::new(
            ConsoleClientConfig::new(&server.uri()),
            credentials.clone(),
            notifier.clone(),
        )
        .unwrap(),
    );
    (client, credentials, notifier)
}

fn config_store(client: Arc<GatewayAdminClient>) -> (Arc<ConfigStore>, Arc<ConfigFrames>) {
    let store = Arc::new(ConfigStore::new(
        client,
        Arc::new(TestStatusTracker::new()),
        Arc::new(AlwaysConfirm),
    ));
    let frames = Arc::new(ConfigFrames::default());
    store.add_renderer(frames.clone());
    (store, frames)
}

fn openai_config_body() -> serde_json::Value {
    json!({
        "code": 200,
        "data": [{
            "name": "openai",
            "base_url": "https://api.openai.com",
            "timeout": 30,
            "active": true
        }]
    })
}

#[tokio::test]
async fn loaded_config_renders_with_untested_status() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/admin/api-config"))
        .respond_with(ResponseTemplate::new(200).set_body_json(openai_config_body()))
        .mount(&server)
        .await;

    let (client, _, _) = gateway_client(&server);
    let (store, frames) = config_store(client);

    store.reload().await.unwrap();

    let rows = frames.last();
    assert_eq!(rows.len(), 1);
    assert_eq!(rows[0].config.name, "openai");
    assert!(rows[0].config.active);
    assert_eq!(rows[0].config.timeout_seconds, 30);
    assert_eq!(rows[0].status, TestStatus::Untested);
}

#[tokio::test]
async fn reload_is_idempotent() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/admin/api-config"))
        .respond_with(ResponseTemplate::new(200).set_body_json(openai_config_body()))
        .mount(&server)
        .await;

    let (client, _, _) = gateway_client(&server);
    let (store, frames) = config_store(client);

    store.reload().await.unwrap();
    let first = frames.last();
    store.reload().await.unwrap();
    let second = frames.last();

    assert_eq!(first.len(), second.len());
    assert_eq!(first[0].config.name, second[0].config.name);
    assert_eq!(first[0].status, second[0].status);
}

#[tokio::test(flavor = "multi_thread")]
async fn invoke_test_is_pending_before_resolution_and_success_after() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/admin/api-config/test"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_delay(Duration::from_millis(250))
                .set_body_json(json!({
                    "success": true,
                    "data": {
                        "success": true,
                        "status": 200,
                        "response_time": 450,
                        "error": "",
                        "message": "found usable endpoint"
                    }
                })),
        )
        .mount(&server)
        .await;

    let (client, _, notifier) = gateway_client(&server);
    let tracker = Arc::new(TestStatusTracker::new());
    let store = Arc::new(ConfigStore::new(
        client,
        tracker.clone(),
        Arc::new(AlwaysConfirm),
    ));

    let handle = {
        let store = store.clone();
        tokio::spawn(async move { store.invoke_test("openai").await })
    };

    // Pending must be observable while the probe is still in flight.
    tokio::time::sleep(Duration::from_millis(100)).await;
    assert_eq!(tracker.status("openai"), TestStatus::Pending);

    let status = handle.await.unwrap().unwrap();
    assert_eq!(status, TestStatus::Success);
    assert_eq!(tracker.status("openai"), TestStatus::Success);

    // The displayed response time renders as seconds with one decimal.
    let successes = notifier.successes();
    assert!(successes.iter().any(|m| m.contains("0.5s")), "{successes:?}");
}

#[tokio::test]
async fn invoke_test_failure_flag_resolves_to_failure() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/admin/api-config/test"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "success": true,
            "data": {
                "success": false,
                "status": 404,
                "response_time": 90,
                "error": "all probe paths returned 404",
                "message": "test failed"
            }
        })))
        .mount(&server)
        .await;

    let (client, _, notifier) = gateway_client(&server);
    let tracker = Arc::new(TestStatusTracker::new());
    let store = ConfigStore::new(client, tracker.clone(), Arc::new(AlwaysConfirm));

    let status = store.invoke_test("openai").await.unwrap();
    assert_eq!(status, TestStatus::Failure);
    assert_eq!(tracker.status("openai"), TestStatus::Failure);
    assert!(
        notifier
            .errors()
            .iter()
            .any(|m| m.contains("all probe paths returned 404"))
    );
}

#[tokio::test]
async fn invoke_test_request_failure_resolves_to_failure() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/admin/api-config/test"))
        .respond_with(ResponseTemplate::new(500).set_body_json(json!({"error": "proxy down"})))
        .mount(&server)
        .await;

    let (client, _, notifier) = gateway_client(&server);
    let tracker = Arc::new(TestStatusTracker::new());
    let store = ConfigStore::new(client, tracker.clone(), Arc::new(AlwaysConfirm));

    let status = store.invoke_test("openai").await.unwrap();
    assert_eq!(status, TestStatus::Failure);
    // Exactly one notification, from the request client.
    assert_eq!(notifier.errors(), vec!["proxy down".to_string()]);
}

#[tokio::test]
async fn confirmed_delete_issues_delete_then_reload() {
    let server = MockServer::start().await;
    Mock::given(method("DELETE"))
        .and(path("/admin/api-config/grok"))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(json!({"code": 200, "data": "deleted"})),
        )
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/admin/api-config"))
        .respond_with(ResponseTemplate::new(200).set_body_json(openai_config_body()))
        .expect(1)
        .mount(&server)
        .await;

    let (client, _, _) = gateway_client(&server);
    let (store, frames) = config_store(client);

    let deleted = store.delete("grok").await.unwrap();
    assert!(deleted);

    let rows = frames.last();
    assert!(rows.iter().all(|row| row.config.name != "grok"));
    assert_eq!(rows.len(), 1);
}

#[tokio::test]
async fn declined_delete_sends_nothing() {
    let server = MockServer::start().await;
    // No mocks mounted: any request would fail the test via Network
    // classification below.

    let (client, _, notifier) = gateway_client(&server);
    let store = ConfigStore::new(
        client,
        Arc::new(TestStatusTracker::new()),
        Arc::new(aceproxy_console::view::NeverConfirm),
    );

    let deleted = store.delete("grok").await.unwrap();
    assert!(!deleted);
    assert!(notifier.errors().is_empty());
    assert!(server.received_requests().await.unwrap().is_empty());
}

#[tokio::test]
async fn create_with_invalid_headers_is_never_sent() {
    let server = MockServer::start().await;

    let (client, _, notifier) = gateway_client(&server);
    let store = ConfigStore::new(
        client,
        Arc::new(TestStatusTracker::new()),
        Arc::new(AlwaysConfirm),
    );

    let config = aceproxy_client::model::ApiTargetConfig {
        name: "openai".to_string(),
        base_url: "https://api.openai.com".to_string(),
        custom_headers: "{not json".to_string(),
        ..Default::default()
    };
    let err = store.create(config).await.unwrap_err();

    assert!(matches!(err, aceproxy_console::ConsoleError::Validation(_)));
    assert_eq!(notifier.errors().len(), 1);
    assert!(server.received_requests().await.unwrap().is_empty());
}

#[tokio::test]
async fn unauthorized_reload_clears_credential_and_keeps_content() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/admin/api-config"))
        .respond_with(ResponseTemplate::new(200).set_body_json(openai_config_body()))
        .up_to_n_times(1)
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/admin/api-config"))
        .respond_with(ResponseTemplate::new(401).set_body_json(json!({"error": "expired"})))
        .mount(&server)
        .await;

    let (client, credentials, notifier) = gateway_client(&server);
    let (store, frames) = config_store(client);

    store.reload().await.unwrap();
    let frames_before = frames.count();

    assert!(store.reload().await.is_err());
    assert!(!credentials.is_authenticated());
    assert_eq!(notifier.auth_prompts(), 1);
    // The list keeps its previous contents rather than clearing.
    assert_eq!(frames.count(), frames_before);
    assert_eq!(store.rows().len(), 1);
}

#[tokio::test]
async fn failed_page_load_keeps_previous_page() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/admin/logs"))
        .and(query_param("page", "1"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "code": 200,
            "data": {
                "logs": [{"id": 1, "api_name": "openai", "response_time": 120}],
                "total": 45
            }
        })))
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/admin/logs"))
        .and(query_param("page", "2"))
        .respond_with(ResponseTemplate::new(500).set_body_json(json!({"error": "db locked"})))
        .mount(&server)
        .await;

    let (client, _, _) = gateway_client(&server);
    let view = LogView::new(client, Arc::new(AlwaysConfirm));

    view.load_page(1).await.unwrap();
    assert_eq!(view.page_state().current_page, 1);
    assert_eq!(view.records().len(), 1);

    assert!(view.load_page(2).await.is_err());
    // Stale-but-consistent: page number and records are untouched.
    assert_eq!(view.page_state().current_page, 1);
    assert_eq!(view.records().len(), 1);
}

#[tokio::test]
async fn requested_page_is_clamped_before_dispatch() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/admin/logs"))
        .and(query_param("page", "1"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "code": 200,
            "data": {"logs": [], "total": 45}
        })))
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/admin/logs"))
        .and(query_param("page", "3"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "code": 200,
            "data": {"logs": [], "total": 45}
        })))
        .expect(1)
        .mount(&server)
        .await;

    let (client, _, _) = gateway_client(&server);
    let view = LogView::new(client, Arc::new(AlwaysConfirm));

    view.load_page(1).await.unwrap();
    // 45 records at 20 per page = 3 pages; page 99 is clamped to 3.
    view.load_page(99).await.unwrap();
    assert_eq!(view.page_state().current_page, 3);

    let pages_requested: Vec<String> = server
        .received_requests()
        .await
        .unwrap()
        .iter()
        .filter_map(|request| {
            request.url.query_pairs().find_map(|(key, value)| {
                (key == "page").then(|| value.to_string())
            })
        })
        .collect();
    assert_eq!(pages_requested, vec!["1", "3"]);
}

#[tokio::test]
async fn applying_filters_resets_to_page_one() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/admin/logs"))
        .and(query_param("page", "2"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "code": 200,
            "data": {"logs": [], "total": 45}
        })))
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/admin/logs"))
        .and(query_param("page", "1"))
        .and(query_param("api_name", "openai"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "code": 200,
            "data": {"logs": [], "total": 3}
        })))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/admin/logs"))
        .and(query_param("page", "1"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "code": 200,
            "data": {"logs": [], "total": 45}
        })))
        .mount(&server)
        .await;

    let (client, _, _) = gateway_client(&server);
    let view = LogView::new(client, Arc::new(AlwaysConfirm));
    let frames = Arc::new(LogFrames::default());
    view.add_renderer(frames.clone());

    view.load_page(1).await.unwrap();
    view.load_page(2).await.unwrap();
    assert_eq!(view.page_state().current_page, 2);

    view.apply_filters(LogFilters {
        api_name: "openai".to_string(),
        ..Default::default()
    })
    .await
    .unwrap();
    assert_eq!(view.page_state().current_page, 1);
    assert_eq!(view.page_state().total_count, 3);
}

#[tokio::test]
async fn confirmed_log_purge_reports_count_and_reloads() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/admin/logs/clear"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "code": 200,
            "data": {"message": "logs deleted", "count": 17}
        })))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/admin/logs"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "code": 200,
            "data": {"logs": [], "total": 0}
        })))
        .expect(1)
        .mount(&server)
        .await;

    let (client, _, notifier) = gateway_client(&server);
    let view = LogView::new(client, Arc::new(AlwaysConfirm));

    let count = view.clear().await.unwrap();
    assert_eq!(count, Some(17));
    assert!(notifier.successes().iter().any(|m| m.contains("17")));
    assert_eq!(view.page_state().total_count, 0);
}

#[tokio::test]
async fn dashboard_and_stats_views_refresh_from_gateway() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/admin/stats"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "code": 200,
            "data": {
                "total_requests": 1200,
                "success_requests": 1140,
                "error_requests": 60,
                "success_rate": 95.0,
                "avg_response_time": 431.5,
                "active_apis": 4
            }
        })))
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/admin/stats/api-table"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "code": 200,
            "data": [{
                "name": "openai",
                "total_requests": 800,
                "success_requests": 790,
                "error_requests": 10,
                "success_rate": 98.75,
                "avg_response_time": 420.0,
                "active": true
            }]
        })))
        .mount(&server)
        .await;

    let (client, _, _) = gateway_client(&server);

    let dashboard = aceproxy_console::stats::DashboardView::new(client.clone());
    dashboard.refresh().await.unwrap();
    assert_eq!(dashboard.summary().unwrap().total_requests, 1200);

    let stats = aceproxy_console::stats::StatsView::new(client);
    stats.refresh().await.unwrap();
    assert_eq!(stats.summary().unwrap().active_apis, 4);
    assert_eq!(stats.rows().len(), 1);
    assert_eq!(stats.rows()[0].name, "openai");
}

#[tokio::test(flavor = "multi_thread")]
async fn navigation_away_stops_the_log_page_poller() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/admin/logs"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "code": 200,
            "data": {"logs": [], "total": 0}
        })))
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/admin/api-config"))
        .respond_with(ResponseTemplate::new(200).set_body_json(openai_config_body()))
        .mount(&server)
        .await;

    let (client, _credentials, notifier) = gateway_client(&server);

    let sink = Arc::new(NullSink);
    let poller = Arc::new(PollScheduler::new());
    let router = Arc::new(Router::new(
        client.credentials(),
        notifier,
        sink,
        poller.clone(),
    ));

    let view = Arc::new(LogView::new(client.clone(), Arc::new(AlwaysConfirm)));
    router.register(
        Page::RequestLogs,
        Arc::new(
            aceproxy_console::pages::RequestLogsPage::new(view, poller.clone())
                .with_interval(Duration::from_secs(1)),
        ),
    );
    let (store, _) = config_store(client);
    router.register(Page::ApiConfig, Arc::new(ApiConfigPage::new(store)));

    router.navigate(Page::RequestLogs).await.unwrap();
    assert!(poller.is_running());

    // The schedule is stopped unconditionally before entering another page.
    router.navigate(Page::ApiConfig).await.unwrap();
    assert!(!poller.is_running());
}

#[tokio::test]
async fn login_stores_token_and_enters_api_config_page() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/admin/api-config"))
        .respond_with(ResponseTemplate::new(200).set_body_json(openai_config_body()))
        .mount(&server)
        .await;

    let credentials = Arc::new(CredentialStore::in_memory());
    let notifier = Arc::new(RecordingNotifier::default());
    let client = Arc::new(
        GatewayAdminClient::new(
            ConsoleClientConfig::new(&server.uri()),
            credentials.clone(),
            notifier.clone(),
        )
        .unwrap(),
    );

    let sink = Arc::new(NullSink);
    let poller = Arc::new(PollScheduler::new());
    let router = Arc::new(Router::new(
        credentials.clone(),
        notifier.clone(),
        sink.clone(),
        poller,
    ));
    let (store, frames) = config_store(client.clone());
    router.register(Page::ApiConfig, Arc::new(ApiConfigPage::new(store)));

    let session = Session::new(client, router.clone(), sink);
    session.login("operator-token").await.unwrap();

    assert!(credentials.is_authenticated());
    assert!(router.is_active(Page::ApiConfig));
    assert_eq!(frames.last().len(), 1);
}

#[tokio::test]
async fn login_with_rejected_token_stores_nothing() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/admin/api-config"))
        .respond_with(ResponseTemplate::new(401).set_body_json(json!({"error": "bad token"})))
        .mount(&server)
        .await;

    let credentials = Arc::new(CredentialStore::in_memory());
    let notifier = Arc::new(RecordingNotifier::default());
    let client = Arc::new(
        GatewayAdminClient::new(
            ConsoleClientConfig::new(&server.uri()),
            credentials.clone(),
            notifier.clone(),
        )
        .unwrap(),
    );

    let sink = Arc::new(NullSink);
    let router = Arc::new(Router::new(
        credentials.clone(),
        notifier.clone(),
        sink.clone(),
        Arc::new(PollScheduler::new()),
    ));
    let session = Session::new(client, router, sink);

    assert!(session.login("wrong-token").await.is_err());
    assert!(!credentials.is_authenticated());
    assert_eq!(notifier.errors().len(), 1);
}
