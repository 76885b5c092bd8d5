//! Middleware for logging requests and responses.

use axum::{
    body::Body, extract::Request, http::header::CONTENT_TYPE, middleware::Next, response::Response,
};

const LOG_BODY_LENGTH_LIMIT: usize = 64;

/// Log the request and response for each request.
///
/// Both the request and response are logged at the `info` level. Bodies
/// longer than [LOG_BODY_LENGTH_LIMIT] bytes are truncated, with the full
/// body logged at the `debug` level. Multipart upload bodies are never
/// buffered; only the request line is logged for those.
pub async fn logging_middleware(request: Request, next: Next) -> Response {
    if is_multipart(&request) {
        tracing::info!(
            "Received request: {} {} (multipart body not logged)",
            request.method(),
            request.uri()
        );

        let response = next.run(request).await;
        tracing::info!("Sending response: {}", response.status());

        return response;
    }

    let (parts, body_text) = match buffer_request(request).await {
        Ok(parts_and_body) => parts_and_body,
        Err(response) => return response,
    };

    log_text(&format!("Received request: {parts:#?}"), &body_text);

    let request = Request::from_parts(parts, body_text.into());
    let response = next.run(request).await;

    let (parts, body_text) = match buffer_response(response).await {
        Ok(parts_and_body) => parts_and_body,
        Err(response) => return response,
    };

    log_text(&format!("Sending response: {parts:#?}"), &body_text);

    Response::from_parts(parts, body_text.into())
}

fn is_multipart(request: &Request) -> bool {
    request
        .headers()
        .get(CONTENT_TYPE)
        .and_then(|content_type| content_type.to_str().ok())
        .is_some_and(|content_type| content_type.starts_with("multipart/form-data"))
}

async fn buffer_request(
    request: Request,
) -> Result<(axum::http::request::Parts, String), Response> {
    let (parts, body) = request.into_parts();

    match axum::body::to_bytes(body, usize::MAX).await {
        Ok(body_bytes) => Ok((parts, String::from_utf8_lossy(&body_bytes).to_string())),
        Err(error) => {
            tracing::error!("could not buffer request body for logging: {error}");
            Err(Response::builder()
                .status(axum::http::StatusCode::BAD_REQUEST)
                .body(Body::empty())
                .unwrap_or_default())
        }
    }
}

async fn buffer_response(
    response: Response,
) -> Result<(axum::http::response::Parts, String), Response> {
    let (parts, body) = response.into_parts();

    match axum::body::to_bytes(body, usize::MAX).await {
        Ok(body_bytes) => Ok((parts, String::from_utf8_lossy(&body_bytes).to_string())),
        Err(error) => {
            tracing::error!("could not buffer response body for logging: {error}");
            Err(Response::builder()
                .status(axum::http::StatusCode::INTERNAL_SERVER_ERROR)
                .body(Body::empty())
                .unwrap_or_default())
        }
    }
}

fn log_text(prefix: &str, body: &str) {
    if body.len() > LOG_BODY_LENGTH_LIMIT {
        tracing::info!("{prefix}\nbody: {}...", &body[..LOG_BODY_LENGTH_LIMIT]);
        tracing::debug!("Full body: {body:?}");
    } else {
        tracing::info!("{prefix}\nbody: {body:?}");
    }
}
