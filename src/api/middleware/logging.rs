use axum::{extract::Request, middleware::Next, response::Response};
use std::time::Instant;
use tracing::{info, Instrument};
use uuid::Uuid;

/// Logs one line per request. For streamed replies the duration covers the
/// time until headers were sent, not the whole body.
pub async fn request_logger(request: Request, next: Next) -> Response {
    let method = request.method().clone();
    let uri = request.uri().clone();
    let request_id = Uuid::new_v4();
    let start = Instant::now();

    let span = tracing::info_span!("request", %request_id);
    let response = next.run(request).instrument(span).await;

    let duration = start.elapsed();
    let status = response.status();

    info!(
        request_id = %request_id,
        method = %method,
        uri = %uri,
        status = %status.as_u16(),
        duration_ms = %duration.as_millis(),
        "Request completed"
    );

    response
}
