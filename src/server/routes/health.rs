//! Health check endpoint

use actix_web::HttpResponse;
use serde_json::json;

/// Liveness probe
///
/// Reports service identity and build metadata. Always 200 while the process
/// is serving requests.
pub async fn health_check() -> HttpResponse {
    let build = crate::build_info();

    HttpResponse::Ok().json(json!({
        "status": "healthy",
        "service": crate::NAME,
        "version": build.version,
        "git_hash": build.git_hash,
        "build_time": build.build_time,
        "timestamp": chrono::Utc::now().to_rfc3339(),
    }))
}
