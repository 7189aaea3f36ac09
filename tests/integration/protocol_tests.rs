//! Event stream protocol
//!
//! Verifies that a real runner's event stream survives the NDJSON wire
//! format: every record encodes as one self-contained line and the decoded
//! stream matches what the runner produced.

use crate::common::{ScriptedChain, drain_events, keys};
use mintgate::core::batch::BatchRunner;
use mintgate::core::events::codec::{self, DecodedRecord};
use mintgate::core::events::{EventSink, MintEvent};
use std::sync::Arc;

async fn streamed_events(wallets: u64) -> Vec<MintEvent> {
    let chain = Arc::new(ScriptedChain::all_succeed(wallets as usize));
    let keys = keys::parsed_keys(wallets);
    let (sink, rx) = EventSink::channel(256);

    BatchRunner::new(chain, 1..=4)
        .run(&keys, &sink)
        .await
        .expect("consumer stays connected");
    drop(sink);

    drain_events(rx).await
}

#[tokio::test]
async fn test_full_run_survives_the_wire() {
    let events = streamed_events(2).await;
    assert!(!events.is_empty());

    let body: String = events
        .iter()
        .map(|event| codec::encode_line(event).unwrap())
        .collect();

    let decoded = codec::decode_stream(&body);
    assert_eq!(decoded.len(), events.len());
    for (record, event) in decoded.iter().zip(&events) {
        assert_eq!(record, &DecodedRecord::Event(event.clone()));
    }
}

#[tokio::test]
async fn test_each_line_is_self_contained_json() {
    let events = streamed_events(1).await;

    for event in &events {
        let line = codec::encode_line(event).unwrap();
        assert!(line.ends_with('\n'));
        assert_eq!(line.matches('\n').count(), 1);

        let value: serde_json::Value = serde_json::from_str(line.trim_end()).unwrap();
        let kind = value["kind"].as_str().unwrap();
        assert!(kind == "log" || kind == "progress");
    }
}

#[tokio::test]
async fn test_progress_records_use_camel_case_counters() {
    let events = streamed_events(1).await;

    let progress_lines: Vec<serde_json::Value> = events
        .iter()
        .filter(|event| matches!(event, MintEvent::Progress { .. }))
        .map(|event| serde_json::from_str(codec::encode_line(event).unwrap().trim_end()).unwrap())
        .collect();
    assert_eq!(progress_lines.len(), 4);

    for value in &progress_lines {
        assert!(value["processedCount"].is_u64());
        assert!(value["successCount"].is_u64());
        assert!(value["failedCount"].is_u64());
    }
    assert_eq!(progress_lines.last().unwrap()["processedCount"], 4);
}

#[tokio::test]
async fn test_malformed_line_does_not_tear_down_the_stream() {
    let events = streamed_events(1).await;

    let mut body = String::new();
    for (i, event) in events.iter().enumerate() {
        if i == 2 {
            body.push_str("garbled{{\n");
        }
        body.push_str(&codec::encode_line(event).unwrap());
    }

    let decoded = codec::decode_stream(&body);
    assert_eq!(decoded.len(), events.len() + 1);
    assert_eq!(decoded[2], DecodedRecord::Raw("garbled{{".to_string()));

    let surviving = decoded
        .iter()
        .filter(|record| matches!(record, DecodedRecord::Event(_)))
        .count();
    assert_eq!(surviving, events.len());
}
