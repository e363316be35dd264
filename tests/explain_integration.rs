//! Integration tests for the explain REST service.
//!
//! Each test spins up the Axum router on a random port and drives it
//! with reqwest, exercising the real JSON contract.

use std::time::Duration;

use reqwest::StatusCode;
use serde_json::{Value, json};
use tokio::net::TcpListener;
use tokio::time::timeout;

use letter_lens::api::api_routes;
use letter_lens::config::ServerConfig;

/// Maximum time any test is allowed to run before we consider it hung.
const TEST_TIMEOUT: Duration = Duration::from_secs(5);

/// Start an Axum server on a random port, return its base URL.
async fn start_server() -> String {
    let app = api_routes(&ServerConfig::default());

    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let port = listener.local_addr().unwrap().port();

    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });

    format!("http://127.0.0.1:{port}")
}

/// POST /explain and return (status, body).
async fn explain(base: &str, body: Value) -> (StatusCode, Value) {
    let resp = reqwest::Client::new()
        .post(format!("{base}/explain"))
        .json(&body)
        .send()
        .await
        .expect("request failed");
    let status = resp.status();
    let json = resp.json::<Value>().await.expect("invalid JSON from server");
    (status, json)
}

// ── Health ──────────────────────────────────────────────────────────

#[tokio::test]
async fn health_reports_ok() {
    timeout(TEST_TIMEOUT, async {
        let base = start_server().await;
        let resp = reqwest::get(format!("{base}/health")).await.unwrap();
        assert_eq!(resp.status(), StatusCode::OK);
        let json: Value = resp.json().await.unwrap();
        assert_eq!(json, json!({ "ok": true }));
    })
    .await
    .expect("test timed out");
}

// ── Explain scenarios ───────────────────────────────────────────────

#[tokio::test]
async fn nhs_appointment_invite() {
    timeout(TEST_TIMEOUT, async {
        let base = start_server().await;
        let (status, json) = explain(
            &base,
            json!({
                "text": "NHS Scotland immunisation appointment. Date and time: 10 June 2025, 14:30. Location: Springburn Health Centre."
            }),
        )
        .await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(json["type"], "NHS Appointment");
        assert_eq!(json["deadline"], "10 june 2025, 14:30");
        let summary = json["summary"].as_str().unwrap();
        assert!(summary.contains("When: 10 June 2025, 14:30."));
        assert!(summary.contains("Location: Springburn Health Centre."));
        assert_eq!(json["actions"].as_array().unwrap().len(), 4);
    })
    .await
    .expect("test timed out");
}

#[tokio::test]
async fn electoral_register_canvass() {
    timeout(TEST_TIMEOUT, async {
        let base = start_server().await;
        let (status, json) = explain(
            &base,
            json!({
                "text": "Glasgow City Council \u{2014} Annual Canvass. Please enter your unique security code to confirm your household details."
            }),
        )
        .await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(json["type"], "Electoral Register");
        let citations: Vec<&str> = json["citations"]
            .as_array()
            .unwrap()
            .iter()
            .filter_map(Value::as_str)
            .collect();
        assert!(citations.contains(&"https://www.gov.uk/register-to-vote"));
    })
    .await
    .expect("test timed out");
}

#[tokio::test]
async fn hmrc_respond_by_date() {
    timeout(TEST_TIMEOUT, async {
        let base = start_server().await;
        let (status, json) = explain(
            &base,
            json!({
                "text": "HMRC Self Assessment: please file your tax return. Respond by 31/01/2026.",
                "hint": null
            }),
        )
        .await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(json["type"], "HMRC");
        assert_eq!(json["deadline"], "31/01/2026");
    })
    .await
    .expect("test timed out");
}

#[tokio::test]
async fn unrelated_text_is_unknown() {
    timeout(TEST_TIMEOUT, async {
        let base = start_server().await;
        let (status, json) = explain(&base, json!({ "text": "Thank you for your purchase." })).await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(json["type"], "Unknown");
        assert!(json["deadline"].is_null());
        assert_eq!(json["citations"], json!(["https://www.gov.uk/"]));
    })
    .await
    .expect("test timed out");
}

#[tokio::test]
async fn empty_text_is_unknown() {
    timeout(TEST_TIMEOUT, async {
        let base = start_server().await;
        let (status, json) = explain(&base, json!({ "text": "" })).await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(json["type"], "Unknown");
        // deadline is present and null, not omitted
        assert!(json.as_object().unwrap().contains_key("deadline"));
        assert!(json["deadline"].is_null());
    })
    .await
    .expect("test timed out");
}

#[tokio::test]
async fn hint_contributes_to_classification() {
    timeout(TEST_TIMEOUT, async {
        let base = start_server().await;
        let (_, json) = explain(
            &base,
            json!({ "text": "Please attend the clinic.", "hint": "NHS letter" }),
        )
        .await;
        assert_eq!(json["type"], "NHS Appointment");
    })
    .await
    .expect("test timed out");
}

// ── Host behaviour ──────────────────────────────────────────────────

#[tokio::test]
async fn missing_text_is_rejected() {
    timeout(TEST_TIMEOUT, async {
        let base = start_server().await;
        let (status, json) = explain(&base, json!({ "hint": "HMRC" })).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert!(json["error"].is_string());
    })
    .await
    .expect("test timed out");
}

#[tokio::test]
async fn cors_preflight_allows_post() {
    timeout(TEST_TIMEOUT, async {
        let base = start_server().await;
        let resp = reqwest::Client::new()
            .request(reqwest::Method::OPTIONS, format!("{base}/explain"))
            .header("Origin", "http://localhost:3000")
            .header("Access-Control-Request-Method", "POST")
            .header("Access-Control-Request-Headers", "content-type")
            .send()
            .await
            .unwrap();

        assert!(resp.status().is_success());
        assert_eq!(
            resp.headers()["access-control-allow-origin"].to_str().unwrap(),
            "*"
        );
        let methods = resp.headers()["access-control-allow-methods"]
            .to_str()
            .unwrap()
            .to_uppercase();
        assert!(methods.contains("POST"));
    })
    .await
    .expect("test timed out");
}

#[tokio::test]
async fn concurrent_requests_are_independent() {
    timeout(TEST_TIMEOUT, async {
        let base = start_server().await;
        let texts = [
            ("Council tax arrears notice", "Council Tax"),
            ("DVLA: your vehicle tax is due", "DVLA"),
            ("UKVI visa decision", "UKVI"),
            ("Thank you for your purchase.", "Unknown"),
        ];

        let handles: Vec<_> = texts
            .iter()
            .map(|(text, _)| {
                let base = base.clone();
                let text = text.to_string();
                tokio::spawn(async move { explain(&base, json!({ "text": text })).await })
            })
            .collect();

        for (handle, (_, expected)) in handles.into_iter().zip(texts.iter()) {
            let (status, json) = handle.await.unwrap();
            assert_eq!(status, StatusCode::OK);
            assert_eq!(json["type"], *expected);
        }
    })
    .await
    .expect("test timed out");
}
