//! # Request ID Middleware
//!
//! Tags every request with a [`RequestId`], runs it inside a span carrying
//! that id, and echoes the id in the `x-request-id` response header.

use std::time::Instant;

use axum::{extract::Request, http::HeaderValue, middleware::Next, response::Response};
use logging::{log_api_request, request_id::REQUEST_ID_HEADER, RequestId};
use tracing::{info_span, Instrument};

pub async fn request_id_middleware(mut request: Request, next: Next) -> Response {
    let request_id = RequestId::from_header_or_new(
        request
            .headers()
            .get(REQUEST_ID_HEADER)
            .and_then(|v| v.to_str().ok()),
    );
    let method = request.method().clone();
    let path = request.uri().path().to_string();
    let span = info_span!("request", request_id = %request_id, method = %method, path = %path);
    request.extensions_mut().insert(request_id.clone());

    let start = Instant::now();
    let mut response = next.run(request).instrument(span).await;
    log_api_request!(
        method,
        path,
        response.status().as_u16(),
        start.elapsed().as_millis(),
        request_id
    );

    if let Ok(value) = HeaderValue::from_str(request_id.as_str()) {
        response.headers_mut().insert(REQUEST_ID_HEADER, value);
    }
    response
}
