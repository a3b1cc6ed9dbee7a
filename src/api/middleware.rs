use axum::{extract::Request, middleware::Next, response::Response};

/// Log the method and path of every inbound request before dispatch
pub async fn log_request(req: Request, next: Next) -> Response {
    tracing::info!("Request: {} {}", req.method(), req.uri());
    next.run(req).await
}
