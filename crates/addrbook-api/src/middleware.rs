//! Response-header middleware applied to every route.

use std::time::Instant;

use axum::{
  extract::Request,
  http::{HeaderName, HeaderValue},
  middleware::Next,
  response::Response,
};

pub const CUSTOM: HeaderName = HeaderName::from_static("custom");
pub const X_PROCESS_TIME: HeaderName = HeaderName::from_static("x-process-time");

/// Stamp `Custom: Example` and `X-Process-Time: <seconds>` on the response.
pub async fn response_headers(req: Request, next: Next) -> Response {
  let started = Instant::now();
  let mut res = next.run(req).await;
  let elapsed = started.elapsed().as_secs_f64();

  let headers = res.headers_mut();
  headers.insert(CUSTOM, HeaderValue::from_static("Example"));
  if let Ok(v) = HeaderValue::from_str(&elapsed.to_string()) {
    headers.insert(X_PROCESS_TIME, v);
  }
  res
}
