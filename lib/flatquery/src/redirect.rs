//! Permanent redirect service.
//!
//! [`Redirect`] answers every request with `301 Moved Permanently`, pointing
//! the client at the same path on another origin. The query string and
//! fragment of the request are dropped.

use std::convert::Infallible;
use std::future::{Ready, ready};
use std::sync::Arc;
use std::task::{Context, Poll};

use bytes::Bytes;
use http::header::LOCATION;
use http::{HeaderValue, Request, Response, StatusCode};
use http_body_util::Full;
use tower_service::Service;
use tracing::{debug, info_span, warn};

/// Service redirecting every request to `origin + path`.
///
/// The origin is joined verbatim with the request path, so it should not end
/// with a `/`.
///
/// # Example
///
/// ```
/// use flatquery::Redirect;
///
/// let redirect = Redirect::to("https://example.com");
/// assert_eq!(redirect.location_for("/docs"), "https://example.com/docs");
/// ```
#[derive(Debug, Clone)]
pub struct Redirect {
    origin: Arc<str>,
}

impl Redirect {
    /// Create a service redirecting to `origin`.
    #[must_use]
    pub fn to(origin: impl Into<String>) -> Self {
        Self {
            origin: Arc::from(origin.into()),
        }
    }

    /// Target origin.
    #[must_use]
    pub fn origin(&self) -> &str {
        &self.origin
    }

    /// Location sent for a request to `path`.
    #[must_use]
    pub fn location_for(&self, path: &str) -> String {
        format!("{}{path}", self.origin)
    }

    fn respond(&self, path: &str) -> Response<Full<Bytes>> {
        let location = self.location_for(path);
        let mut response = Response::new(Full::default());

        match HeaderValue::try_from(location.as_str()) {
            Ok(value) => {
                debug!(%location, "redirecting");
                *response.status_mut() = StatusCode::MOVED_PERMANENTLY;
                response.headers_mut().insert(LOCATION, value);
            }
            Err(err) => {
                warn!(%location, error = %err, "redirect location is not a valid header value");
                *response.status_mut() = StatusCode::INTERNAL_SERVER_ERROR;
            }
        }

        response
    }
}

impl<B> Service<Request<B>> for Redirect {
    type Response = Response<Full<Bytes>>;
    type Error = Infallible;
    type Future = Ready<Result<Self::Response, Self::Error>>;

    fn poll_ready(&mut self, _cx: &mut Context<'_>) -> Poll<Result<(), Self::Error>> {
        Poll::Ready(Ok(()))
    }

    fn call(&mut self, request: Request<B>) -> Self::Future {
        let path = request.uri().path();
        let span = info_span!("redirect", method = %request.method(), path);
        let _entered = span.enter();

        ready(Ok(self.respond(path)))
    }
}

#[cfg(test)]
mod tests {
    use tower::ServiceExt;

    use super::*;

    async fn send(redirect: Redirect, uri: &str) -> Response<Full<Bytes>> {
        let request = Request::builder()
            .uri(uri)
            .body(())
            .expect("valid request");
        match redirect.oneshot(request).await {
            Ok(response) => response,
            Err(never) => match never {},
        }
    }

    #[tokio::test]
    async fn redirects_path_and_drops_query() {
        let response = send(Redirect::to("https://dest.test"), "/abc?q=1").await;

        assert_eq!(response.status(), StatusCode::MOVED_PERMANENTLY);
        assert_eq!(
            response.headers().get(LOCATION),
            Some(&HeaderValue::from_static("https://dest.test/abc"))
        );
    }

    #[tokio::test]
    async fn redirects_root() {
        let response = send(Redirect::to("https://dest.test"), "http://old.test/").await;

        assert_eq!(response.status(), StatusCode::MOVED_PERMANENTLY);
        assert_eq!(
            response.headers().get(LOCATION),
            Some(&HeaderValue::from_static("https://dest.test/"))
        );
    }

    #[tokio::test]
    async fn invalid_origin_is_a_server_error() {
        let response = send(Redirect::to("https://dest.test\n"), "/abc").await;

        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
        assert!(response.headers().get(LOCATION).is_none());
    }

    #[test]
    fn location_is_origin_plus_path() {
        let redirect = Redirect::to("https://dest.test");
        assert_eq!(redirect.origin(), "https://dest.test");
        assert_eq!(redirect.location_for("/a/b"), "https://dest.test/a/b");
    }
}
