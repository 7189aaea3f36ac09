//! Batch mint endpoint
//!
//! `POST /api/mint` validates the submitted key list, then answers with a
//! streaming NDJSON body. The runner executes on its own task; the response
//! stream is the receiving half of the event channel, so records reach the
//! client as they are produced and a dropped connection cancels the run at
//! the next submission boundary.

use crate::core::batch::BatchRunner;
use crate::core::chain::ChainClient;
use crate::core::events::{EventSink, StreamClosed, codec};
use crate::server::routes::ApiResponse;
use crate::server::state::AppState;
use crate::utils::validation::{KeyValidationError, PrivateKey, validate_keys};
use actix_web::{HttpResponse, web};
use futures::stream::Stream;
use serde::Deserialize;
use serde_json::json;
use std::ops::RangeInclusive;
use std::sync::Arc;
use tokio_stream::{StreamExt, wrappers::ReceiverStream};
use tracing::{debug, error, info};

/// Event channel depth between the runner task and the response body
const EVENT_BUFFER: usize = 64;

/// Request body for a mint run
#[derive(Debug, Deserialize)]
pub struct MintRequest {
    /// Private keys, one wallet per entry, processed in order
    #[serde(rename = "privateKeys", default)]
    pub private_keys: Vec<String>,
}

/// Register the mint routes
pub fn configure_routes<C: ChainClient>(cfg: &mut web::ServiceConfig) {
    cfg.service(web::resource("/api/mint").route(web::post().to(mint::<C>)));
}

/// Handle `POST /api/mint`
pub async fn mint<C: ChainClient>(
    state: web::Data<AppState<C>>,
    request: web::Json<MintRequest>,
) -> HttpResponse {
    let keys = match validate_keys(&request.private_keys) {
        Ok(keys) => keys,
        Err(KeyValidationError::Empty) => {
            return ApiResponse::<()>::error("No private keys provided".to_string())
                .to_http_response();
        }
        Err(KeyValidationError::Invalid(entries)) => {
            let message = format!("{} private key entries failed validation", entries.len());
            return ApiResponse::<()>::error_with_meta(message, json!({ "invalidKeys": entries }))
                .to_http_response();
        }
    };

    info!(wallets = keys.len(), "Starting mint run");

    let stream = stream_mint_run(
        Arc::clone(&state.chain),
        state.config.mint().token_ids(),
        keys,
    );

    HttpResponse::Ok()
        .content_type("application/x-ndjson")
        .streaming(stream)
}

/// Spawn the runner and adapt its event channel into a response body
pub fn stream_mint_run<C: ChainClient>(
    client: Arc<C>,
    token_ids: RangeInclusive<u64>,
    keys: Vec<PrivateKey>,
) -> impl Stream<Item = Result<web::Bytes, actix_web::Error>> {
    let (sink, rx) = EventSink::channel(EVENT_BUFFER);

    tokio::spawn(async move {
        let runner = BatchRunner::new(client, token_ids);
        match runner.run(&keys, &sink).await {
            Ok(summary) => debug!(
                processed = summary.processed,
                success = summary.success,
                failed = summary.failed,
                "Mint run streamed to completion"
            ),
            Err(StreamClosed) => info!("Consumer disconnected, mint run stopped"),
        }
    });

    ReceiverStream::new(rx).map(|event| match codec::encode_line(&event) {
        Ok(line) => Ok(web::Bytes::from(line)),
        Err(e) => {
            error!("Failed to encode event: {}", e);
            Err(actix_web::error::ErrorInternalServerError(e))
        }
    })
}
