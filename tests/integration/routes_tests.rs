//! HTTP surface
//!
//! Drives the real handlers through an in-process actix app wired to the
//! scripted chain client. Covers the pre-stream rejection path, the streaming
//! happy path, and the health probe.

use crate::common::{ScriptedChain, WalletScript, keys};
use actix_web::http::header;
use actix_web::{App, test, web};
use mintgate::Config;
use mintgate::core::events::MintEvent;
use mintgate::core::events::codec::{self, DecodedRecord};
use mintgate::server::AppState;
use mintgate::server::routes::health::health_check;
use mintgate::server::routes::mint::configure_routes;
use serde_json::json;

macro_rules! scripted_app {
    ($chain:expr) => {
        test::init_service(
            App::new()
                .app_data(web::Data::new(AppState::new(Config::default(), $chain)))
                .route("/health", web::get().to(health_check))
                .configure(configure_routes::<ScriptedChain>),
        )
        .await
    };
}

#[tokio::test]
async fn test_health_endpoint() {
    let app = scripted_app!(ScriptedChain::all_succeed(0));

    let request = test::TestRequest::get().uri("/health").to_request();
    let response = test::call_service(&app, request).await;
    assert_eq!(response.status(), 200);

    let body: serde_json::Value = test::read_body_json(response).await;
    assert_eq!(body["status"], "healthy");
    assert_eq!(body["service"], "mintgate");
}

#[tokio::test]
async fn test_empty_key_list_is_rejected_before_streaming() {
    let app = scripted_app!(ScriptedChain::all_succeed(0));

    let request = test::TestRequest::post()
        .uri("/api/mint")
        .set_json(json!({ "privateKeys": [] }))
        .to_request();
    let response = test::call_service(&app, request).await;
    assert_eq!(response.status(), 400);

    let body: serde_json::Value = test::read_body_json(response).await;
    assert_eq!(body["success"], false);
    assert_eq!(body["error"], "No private keys provided");
}

#[tokio::test]
async fn test_missing_key_field_reads_as_empty_list() {
    let app = scripted_app!(ScriptedChain::all_succeed(0));

    let request = test::TestRequest::post()
        .uri("/api/mint")
        .set_json(json!({}))
        .to_request();
    let response = test::call_service(&app, request).await;
    assert_eq!(response.status(), 400);

    let body: serde_json::Value = test::read_body_json(response).await;
    assert_eq!(body["error"], "No private keys provided");
}

#[tokio::test]
async fn test_invalid_keys_are_reported_by_position_and_truncated() {
    let app = scripted_app!(ScriptedChain::all_succeed(0));
    let bad_entry = format!("{}zz", &keys::bare_key(1)[..62]);

    let request = test::TestRequest::post()
        .uri("/api/mint")
        .set_json(json!({ "privateKeys": [keys::prefixed_key(1), bad_entry] }))
        .to_request();
    let response = test::call_service(&app, request).await;
    assert_eq!(response.status(), 400);

    let raw = test::read_body(response).await;
    let text = String::from_utf8(raw.to_vec()).unwrap();
    assert!(!text.contains(&bad_entry), "response echoed a rejected entry");

    let body: serde_json::Value = serde_json::from_str(&text).unwrap();
    assert_eq!(body["success"], false);
    assert_eq!(body["error"], "1 private key entries failed validation");

    let invalid = body["meta"]["invalidKeys"].as_array().unwrap();
    assert_eq!(invalid.len(), 1);
    assert_eq!(invalid[0]["position"], 2);
    assert_eq!(
        invalid[0]["display"],
        format!("{}...", &bad_entry[..6]).as_str()
    );
}

#[tokio::test]
async fn test_valid_request_streams_ndjson_to_completion() {
    let app = scripted_app!(ScriptedChain::all_succeed(1));

    let request = test::TestRequest::post()
        .uri("/api/mint")
        .set_json(json!({ "privateKeys": [keys::prefixed_key(1)] }))
        .to_request();
    let response = test::call_service(&app, request).await;
    assert_eq!(response.status(), 200);
    assert_eq!(
        response.headers().get(header::CONTENT_TYPE).unwrap(),
        "application/x-ndjson"
    );

    let body = test::read_body(response).await;
    let records = codec::decode_stream(&String::from_utf8(body.to_vec()).unwrap());

    // Every line decodes as a well-formed event
    assert!(
        records
            .iter()
            .all(|record| matches!(record, DecodedRecord::Event(_)))
    );

    let progress: Vec<(u64, u64, u64)> = records
        .iter()
        .filter_map(|record| match record {
            DecodedRecord::Event(MintEvent::Progress {
                processed_count,
                success_count,
                failed_count,
            }) => Some((*processed_count, *success_count, *failed_count)),
            _ => None,
        })
        .collect();
    assert_eq!(progress.len(), 4);
    assert_eq!(progress.last(), Some(&(4, 4, 0)));
}

#[tokio::test]
async fn test_wallet_failure_still_answers_200_and_narrates() {
    let app = scripted_app!(ScriptedChain::new(vec![WalletScript::FailDerivation(
        "bad key material",
    )]));

    let request = test::TestRequest::post()
        .uri("/api/mint")
        .set_json(json!({ "privateKeys": [keys::prefixed_key(1)] }))
        .to_request();
    let response = test::call_service(&app, request).await;

    // Failures inside the run never change the already-committed status
    assert_eq!(response.status(), 200);

    let body = test::read_body(response).await;
    let text = String::from_utf8(body.to_vec()).unwrap();
    assert!(text.contains("bad key material"));
    assert!(text.contains("\"failedCount\":4"));
}

#[tokio::test]
async fn test_mint_rejects_wrong_method() {
    let app = scripted_app!(ScriptedChain::all_succeed(0));

    let request = test::TestRequest::get().uri("/api/mint").to_request();
    let response = test::call_service(&app, request).await;
    assert_eq!(response.status(), 405);
}
