//! Relay route tests.
//!
//! Each test starts a wiremock server standing in for the upstream Admin API,
//! runs the relay on an ephemeral port in front of it and talks to the relay
//! over HTTP.

use std::sync::Arc;

use chrono::{Duration, Months, Utc};
use lastaccess_core::{ApiBaseUrl, Credentials, RetentionWindow};
use lastaccess_http::HttpReportApi;
use lastaccess_relay::{RelaySettings, router, serve};
use serde_json::{Value, json};
use tokio::net::TcpListener;
use wiremock::matchers::{body_json, header, method, path, query_param, query_param_is_missing};
use wiremock::{Mock, MockServer, ResponseTemplate};

/// base64("key:secret")
const BASIC_AUTH: &str = "Basic a2V5OnNlY3JldA==";

/// Start a relay in front of `upstream` and return its base URL.
async fn spawn_relay(upstream_uri: &str, settings: RelaySettings) -> String {
    let base = ApiBaseUrl::new(upstream_uri).unwrap();
    let api = HttpReportApi::new(base, Credentials::new("demo", "key", "secret"));
    let app = router(Arc::new(api), settings);

    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(serve(listener, app, std::future::pending()));

    format!("http://{addr}")
}

fn report_json(id: &str, created_at: chrono::DateTime<Utc>) -> Value {
    json!({
        "id": id,
        "status": "done",
        "created_at": created_at.to_rfc3339(),
        "params": {"resource_type": "image"},
        "total_resources": 2
    })
}

fn asset_json(public_id: &str) -> Value {
    json!({
        "public_id": public_id,
        "format": "png",
        "version": 1,
        "resource_type": "image",
        "type": "upload",
        "created_at": "2024-01-01T00:00:00Z",
        "last_access": "2024-02-01T00:00:00Z",
        "bytes": 2048,
        "width": 10,
        "height": 20,
        "folder": "samples",
        "url": format!("http://res.example.com/{public_id}.png"),
        "secure_url": format!("https://res.example.com/{public_id}.png")
    })
}

async fn get_json(url: &str) -> (u16, Value) {
    let response = reqwest::get(url).await.unwrap();
    let status = response.status().as_u16();
    (status, response.json().await.unwrap())
}

// ============================================================================
// Health
// ============================================================================

#[tokio::test]
async fn test_health() {
    let upstream = MockServer::start().await;
    let relay = spawn_relay(&upstream.uri(), RelaySettings::default()).await;

    let (status, body) = get_json(&format!("{relay}/health")).await;
    assert_eq!(status, 200);
    assert_eq!(body, json!({"ok": true}));
}

// ============================================================================
// Report Gateway
// ============================================================================

#[tokio::test]
async fn test_generate_report_relays_upstream_body() {
    let upstream = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/demo/resources_last_access_reports"))
        .and(header("authorization", BASIC_AUTH))
        .and(body_json(json!({
            "from_date": "2024-01-01",
            "to_date": "2024-02-01",
            "exclude_folders": ["docs", "website"],
            "sort_by": "accessed_at",
            "sort_order": "desc"
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "id": "fresh",
            "status": "pending",
            "extra": {"kept": true}
        })))
        .expect(1)
        .mount(&upstream)
        .await;

    let relay = spawn_relay(&upstream.uri(), RelaySettings::default()).await;

    let response = reqwest::Client::new()
        .post(format!("{relay}/generate-report"))
        .json(&json!({
            "from_date": "2024-01-01",
            "to_date": "2024-02-01",
            "exclude_folders": ["docs", "website"],
            "sort_by": "accessed_at",
            "sort_order": "desc"
        }))
        .send()
        .await
        .unwrap();

    assert_eq!(response.status().as_u16(), 200);
    let body: Value = response.json().await.unwrap();
    assert_eq!(body["id"], "fresh");
    assert_eq!(body["extra"]["kept"], true);
}

#[tokio::test]
async fn test_generate_report_upstream_rejection() {
    let upstream = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/demo/resources_last_access_reports"))
        .respond_with(ResponseTemplate::new(400).set_body_json(json!({
            "error": {"message": "from_date is invalid"}
        })))
        .mount(&upstream)
        .await;

    let relay = spawn_relay(&upstream.uri(), RelaySettings::default()).await;

    let response = reqwest::Client::new()
        .post(format!("{relay}/generate-report"))
        .json(&json!({"from_date": "yesterday", "to_date": "2024-02-01"}))
        .send()
        .await
        .unwrap();

    assert_eq!(response.status().as_u16(), 400);
    let body: Value = response.json().await.unwrap();
    assert_eq!(
        body,
        json!({
            "error": "Cloudinary API request failed",
            "details": {"error": {"message": "from_date is invalid"}}
        })
    );
}

#[tokio::test]
async fn test_generate_report_forwards_unknown_fields() {
    let upstream = MockServer::start().await;
    let body = json!({
        "from_date": "2024-01-01",
        "to_date": "2024-02-01",
        "prefix": "docs/",
        "tags": ["a", "b"]
    });

    Mock::given(method("POST"))
        .and(path("/demo/resources_last_access_reports"))
        .and(body_json(body.clone()))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"id": "r9"})))
        .expect(1)
        .mount(&upstream)
        .await;

    let relay = spawn_relay(&upstream.uri(), RelaySettings::default()).await;

    let response = reqwest::Client::new()
        .post(format!("{relay}/generate-report"))
        .json(&body)
        .send()
        .await
        .unwrap();

    assert_eq!(response.status().as_u16(), 200);
    upstream.verify().await;
}

#[tokio::test]
async fn test_generate_report_leaves_validation_to_upstream() {
    let upstream = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/demo/resources_last_access_reports"))
        .and(body_json(json!({"to_date": "2024-02-01"})))
        .respond_with(ResponseTemplate::new(400).set_body_json(json!({
            "error": {"message": "Missing required parameter - from_date"}
        })))
        .expect(1)
        .mount(&upstream)
        .await;

    let relay = spawn_relay(&upstream.uri(), RelaySettings::default()).await;

    let response = reqwest::Client::new()
        .post(format!("{relay}/generate-report"))
        .json(&json!({"to_date": "2024-02-01"}))
        .send()
        .await
        .unwrap();

    assert_eq!(response.status().as_u16(), 400);
    let body: Value = response.json().await.unwrap();
    assert_eq!(body["error"], "Cloudinary API request failed");
    assert_eq!(
        body["details"]["error"]["message"],
        "Missing required parameter - from_date"
    );
}

#[tokio::test]
async fn test_generate_report_malformed_body() {
    let upstream = MockServer::start().await;

    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&upstream)
        .await;

    let relay = spawn_relay(&upstream.uri(), RelaySettings::default()).await;

    let response = reqwest::Client::new()
        .post(format!("{relay}/generate-report"))
        .header("content-type", "application/json")
        .body("{not json")
        .send()
        .await
        .unwrap();

    assert_eq!(response.status().as_u16(), 500);
    let body: Value = response.json().await.unwrap();
    assert_eq!(body["error"], "Internal server error");
    assert!(body["message"].is_string());
}

#[tokio::test]
async fn test_generate_report_upstream_unreachable() {
    let port = std::net::TcpListener::bind("127.0.0.1:0")
        .unwrap()
        .local_addr()
        .unwrap()
        .port();
    let relay = spawn_relay(&format!("http://127.0.0.1:{port}"), RelaySettings::default()).await;

    let response = reqwest::Client::new()
        .post(format!("{relay}/generate-report"))
        .json(&json!({"from_date": "2024-01-01", "to_date": "2024-02-01"}))
        .send()
        .await
        .unwrap();

    assert_eq!(response.status().as_u16(), 500);
    let body: Value = response.json().await.unwrap();
    assert_eq!(body["error"], "Internal server error");
    assert!(!body["message"].as_str().unwrap().is_empty());
}

// ============================================================================
// Report List Fetcher
// ============================================================================

#[tokio::test]
async fn test_list_reports_defaults_page_size() {
    let upstream = MockServer::start().await;
    let now = Utc::now();

    Mock::given(method("GET"))
        .and(path("/demo/resources_last_access_reports"))
        .and(header("authorization", BASIC_AUTH))
        .and(query_param("max_results", "10"))
        .and(query_param_is_missing("next_cursor"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "reports": [report_json("r1", now), report_json("r2", now)],
            "next_cursor": "c1"
        })))
        .expect(1)
        .mount(&upstream)
        .await;

    let relay = spawn_relay(&upstream.uri(), RelaySettings::default()).await;

    let (status, body) = get_json(&format!("{relay}/reports")).await;
    assert_eq!(status, 200);
    assert_eq!(body["reports"].as_array().unwrap().len(), 2);
    assert_eq!(body["next_cursor"], "c1");
}

#[tokio::test]
async fn test_list_reports_passes_parameters_through() {
    let upstream = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/demo/resources_last_access_reports"))
        .and(query_param("max_results", "not-a-number"))
        .and(query_param("next_cursor", "c1"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"reports": []})))
        .expect(1)
        .mount(&upstream)
        .await;

    let relay = spawn_relay(&upstream.uri(), RelaySettings::default()).await;

    let (status, body) = get_json(&format!(
        "{relay}/reports?max_results=not-a-number&next_cursor=c1"
    ))
    .await;
    assert_eq!(status, 200);
    assert_eq!(body, json!({"reports": []}));
}

#[tokio::test]
async fn test_list_reports_without_filter_keeps_old_reports() {
    let upstream = MockServer::start().await;
    let old = Utc::now() - Months::new(7);

    Mock::given(method("GET"))
        .and(path("/demo/resources_last_access_reports"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "reports": [report_json("old", old)]
        })))
        .mount(&upstream)
        .await;

    let relay = spawn_relay(&upstream.uri(), RelaySettings::default()).await;

    let (_, body) = get_json(&format!("{relay}/reports")).await;
    assert_eq!(body["reports"][0]["id"], "old");
}

#[tokio::test]
async fn test_list_reports_recent_only_filters_page() {
    let upstream = MockServer::start().await;
    let now = Utc::now();

    Mock::given(method("GET"))
        .and(path("/demo/resources_last_access_reports"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "reports": [
                report_json("fresh", now - Duration::days(1)),
                report_json("stale", now - Months::new(6) - Duration::days(1)),
                report_json("recent", now - Months::new(2)),
            ],
            "next_cursor": "c1"
        })))
        .mount(&upstream)
        .await;

    let settings = RelaySettings {
        recent_reports_only: true,
        ..RelaySettings::default()
    };
    let relay = spawn_relay(&upstream.uri(), settings).await;

    let (status, body) = get_json(&format!("{relay}/reports")).await;
    assert_eq!(status, 200);

    let ids: Vec<&str> = body["reports"]
        .as_array()
        .unwrap()
        .iter()
        .map(|r| r["id"].as_str().unwrap())
        .collect();
    assert_eq!(ids, vec!["fresh", "recent"]);
    // The cursor is untouched by filtering.
    assert_eq!(body["next_cursor"], "c1");
}

#[tokio::test]
async fn test_list_reports_keeps_unmodelled_fields() {
    let upstream = MockServer::start().await;
    let mut report = report_json("r1", Utc::now());
    report["updated_at"] = json!("2024-05-02T00:00:00Z");
    report["params"]["exclude_folders"] = json!(["docs"]);
    report["params"]["sort_by"] = json!("accessed_at");

    Mock::given(method("GET"))
        .and(path("/demo/resources_last_access_reports"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "reports": [report.clone()]
        })))
        .mount(&upstream)
        .await;

    let relay = spawn_relay(&upstream.uri(), RelaySettings::default()).await;

    let (status, body) = get_json(&format!("{relay}/reports")).await;
    assert_eq!(status, 200);
    assert_eq!(body["reports"][0]["updated_at"], report["updated_at"]);
    assert_eq!(body["reports"][0]["params"], report["params"]);
}

#[tokio::test]
async fn test_list_reports_skips_malformed_record() {
    let upstream = MockServer::start().await;
    let now = Utc::now();

    Mock::given(method("GET"))
        .and(path("/demo/resources_last_access_reports"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "reports": [
                report_json("r1", now),
                {"id": "broken", "status": "done"},
                report_json("r2", now)
            ],
            "next_cursor": "c1"
        })))
        .mount(&upstream)
        .await;

    let relay = spawn_relay(&upstream.uri(), RelaySettings::default()).await;

    let (status, body) = get_json(&format!("{relay}/reports")).await;
    assert_eq!(status, 200);
    let ids: Vec<&str> = body["reports"]
        .as_array()
        .unwrap()
        .iter()
        .map(|r| r["id"].as_str().unwrap())
        .collect();
    assert_eq!(ids, vec!["r1", "r2"]);
    assert_eq!(body["next_cursor"], "c1");
}

#[tokio::test]
async fn test_list_reports_upstream_error() {
    let upstream = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/demo/resources_last_access_reports"))
        .respond_with(ResponseTemplate::new(401).set_body_json(json!({
            "error": {"message": "Invalid Signature"}
        })))
        .mount(&upstream)
        .await;

    let relay = spawn_relay(&upstream.uri(), RelaySettings::default()).await;

    let (status, body) = get_json(&format!("{relay}/reports")).await;
    assert_eq!(status, 401);
    assert_eq!(body["error"], "Cloudinary API request failed");
    assert_eq!(body["details"]["error"]["message"], "Invalid Signature");
}

// ============================================================================
// Report Detail Fetcher
// ============================================================================

#[tokio::test]
async fn test_assets_metadata_not_found() {
    let upstream = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/demo/resources_last_access_reports/missing"))
        .respond_with(ResponseTemplate::new(404).set_body_json(json!({
            "message": "not found"
        })))
        .expect(1)
        .mount(&upstream)
        .await;

    Mock::given(method("GET"))
        .and(path("/demo/resources/last_access_report/missing"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"resources": []})))
        .expect(0)
        .mount(&upstream)
        .await;

    let relay = spawn_relay(&upstream.uri(), RelaySettings::default()).await;

    let (status, body) = get_json(&format!("{relay}/reports/missing/assets")).await;
    assert_eq!(status, 404);
    assert_eq!(
        body,
        json!({
            "error": "Failed to fetch report metadata",
            "details": {"message": "not found"}
        })
    );
}

#[tokio::test]
async fn test_assets_of_old_report_are_not_fetched() {
    let upstream = MockServer::start().await;
    let created = Utc::now() - Months::new(7);

    Mock::given(method("GET"))
        .and(path("/demo/resources_last_access_reports/ancient"))
        .respond_with(ResponseTemplate::new(200).set_body_json(report_json("ancient", created)))
        .expect(1)
        .mount(&upstream)
        .await;

    Mock::given(method("GET"))
        .and(path("/demo/resources/last_access_report/ancient"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"resources": []})))
        .expect(0)
        .mount(&upstream)
        .await;

    let relay = spawn_relay(&upstream.uri(), RelaySettings::default()).await;

    let (status, body) = get_json(&format!("{relay}/reports/ancient/assets")).await;
    assert_eq!(status, 400);
    assert_eq!(body["error"], "Report too old");
    assert_eq!(
        body["message"],
        "This report is older than 6 months and its assets may no longer be available"
    );
    assert_eq!(body["metadata"]["id"], "ancient");

    upstream.verify().await;
}

#[tokio::test]
async fn test_retention_window_is_configurable() {
    let upstream = MockServer::start().await;
    let created = Utc::now() - Months::new(2);

    Mock::given(method("GET"))
        .and(path("/demo/resources_last_access_reports/r1"))
        .respond_with(ResponseTemplate::new(200).set_body_json(report_json("r1", created)))
        .mount(&upstream)
        .await;

    let settings = RelaySettings {
        retention: RetentionWindow::new(1),
        ..RelaySettings::default()
    };
    let relay = spawn_relay(&upstream.uri(), settings).await;

    let (status, body) = get_json(&format!("{relay}/reports/r1/assets")).await;
    assert_eq!(status, 400);
    assert!(body["message"].as_str().unwrap().contains("1 months"));
}

#[tokio::test]
async fn test_assets_merge_metadata() {
    let upstream = MockServer::start().await;
    let created = Utc::now() - Duration::days(3);

    Mock::given(method("GET"))
        .and(path("/demo/resources_last_access_reports/r1"))
        .respond_with(ResponseTemplate::new(200).set_body_json(report_json("r1", created)))
        .mount(&upstream)
        .await;

    // The dashboard's page size is ignored in favour of the relay's own.
    Mock::given(method("GET"))
        .and(path("/demo/resources/last_access_report/r1"))
        .and(header("authorization", BASIC_AUTH))
        .and(query_param("max_results", "100"))
        .and(query_param("next_cursor", "a1"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "resources": [asset_json("one"), asset_json("two")],
            "next_cursor": "a2"
        })))
        .expect(1)
        .mount(&upstream)
        .await;

    let relay = spawn_relay(&upstream.uri(), RelaySettings::default()).await;

    let (status, body) = get_json(&format!(
        "{relay}/reports/r1/assets?max_results=25&next_cursor=a1"
    ))
    .await;
    assert_eq!(status, 200);
    assert_eq!(body["resources"].as_array().unwrap().len(), 2);
    assert_eq!(body["resources"][0]["public_id"], "one");
    assert_eq!(body["resources"][0]["type"], "upload");
    assert_eq!(body["resources"][0]["folder"], "samples");
    assert_eq!(body["next_cursor"], "a2");
    assert_eq!(body["metadata"]["id"], "r1");
}

#[tokio::test]
async fn test_assets_upstream_failure_carries_metadata() {
    let upstream = MockServer::start().await;
    let created = Utc::now() - Duration::days(3);

    Mock::given(method("GET"))
        .and(path("/demo/resources_last_access_reports/r1"))
        .respond_with(ResponseTemplate::new(200).set_body_json(report_json("r1", created)))
        .mount(&upstream)
        .await;

    Mock::given(method("GET"))
        .and(path("/demo/resources/last_access_report/r1"))
        .respond_with(ResponseTemplate::new(503).set_body_string("upstream overloaded"))
        .mount(&upstream)
        .await;

    let relay = spawn_relay(&upstream.uri(), RelaySettings::default()).await;

    let (status, body) = get_json(&format!("{relay}/reports/r1/assets")).await;
    assert_eq!(status, 503);
    assert_eq!(body["error"], "Failed to fetch report assets");
    assert_eq!(body["details"], json!({"error": "upstream overloaded"}));
    assert_eq!(body["metadata"]["id"], "r1");
}
