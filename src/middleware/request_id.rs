use axum::{
    body::Body,
    extract::Request,
    http::{HeaderMap, HeaderValue},
    middleware::Next,
    response::Response,
};
use uuid::Uuid;

pub const REQUEST_ID_HEADER: &str = "x-request-id";

/// Correlates the log lines of one catalog request
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct RequestId(pub Uuid);

impl RequestId {
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }

    /// Id sent by the caller, if it is a well-formed UUID
    pub fn from_header(value: &HeaderValue) -> Option<Self> {
        let raw = value.to_str().ok()?;
        Uuid::parse_str(raw).ok().map(Self)
    }

    /// Caller-supplied id, or a fresh one
    pub fn from_headers(headers: &HeaderMap) -> Self {
        headers
            .get(REQUEST_ID_HEADER)
            .and_then(Self::from_header)
            .unwrap_or_default()
    }

    fn header_value(&self) -> HeaderValue {
        // hyphenated UUIDs are plain ASCII
        HeaderValue::from_str(&self.0.hyphenated().to_string())
            .unwrap_or_else(|_| HeaderValue::from_static("invalid"))
    }
}

impl Default for RequestId {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Display for RequestId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0.hyphenated())
    }
}

/// Tags the request with a [`RequestId`] for the movie handlers and returns
/// the same id in the `x-request-id` response header.
pub async fn request_id_middleware(mut request: Request, next: Next) -> Response {
    let request_id = RequestId::from_headers(request.headers());
    request.extensions_mut().insert(request_id);

    let mut response = next.run(request).await;
    response
        .headers_mut()
        .insert(REQUEST_ID_HEADER, request_id.header_value());
    response
}

/// `TraceLayer` span; requests that bypassed the middleware log `request_id = "-"`
pub fn make_span_with_request_id(request: &Request<Body>) -> tracing::Span {
    let request_id = match request.extensions().get::<RequestId>() {
        Some(id) => id.to_string(),
        None => "-".to_string(),
    };

    tracing::info_span!(
        "catalog_request",
        method = %request.method(),
        path = %request.uri().path(),
        request_id = %request_id,
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_header_accepts_uuid() {
        let id = Uuid::new_v4();
        let header = HeaderValue::from_str(&id.to_string()).unwrap();
        assert_eq!(RequestId::from_header(&header), Some(RequestId(id)));
    }

    #[test]
    fn test_from_header_rejects_garbage() {
        let header = HeaderValue::from_static("not-a-uuid");
        assert_eq!(RequestId::from_header(&header), None);
    }

    #[test]
    fn test_from_headers_generates_when_missing() {
        let a = RequestId::from_headers(&HeaderMap::new());
        let b = RequestId::from_headers(&HeaderMap::new());
        assert_ne!(a, b);
    }

    #[test]
    fn test_header_value_round_trips() {
        let id = RequestId::new();
        assert_eq!(RequestId::from_header(&id.header_value()), Some(id));
    }
}
