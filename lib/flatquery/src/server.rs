//! Connection loop serving a tower service with hyper.

use std::error::Error as StdError;
use std::io;

use http::{Request, Response};
use hyper::body::{Body, Incoming};
use hyper_util::rt::{TokioExecutor, TokioIo};
use hyper_util::server::conn::auto;
use hyper_util::service::TowerToHyperService;
use tokio::net::TcpListener;
use tower_service::Service;
use tracing::{debug, warn};

type BoxError = Box<dyn StdError + Send + Sync>;

/// Serve `service` on every connection accepted by `listener`.
///
/// Each connection runs on its own task and negotiates HTTP/1.1 or HTTP/2.
/// A failing connection is logged and does not stop the loop.
///
/// # Errors
///
/// Returns the I/O error if accepting a connection fails.
///
/// # Example
///
/// ```ignore
/// use flatquery::{Redirect, serve};
/// use tokio::net::TcpListener;
///
/// let listener = TcpListener::bind("0.0.0.0:80").await?;
/// serve(listener, Redirect::to("https://example.com")).await?;
/// ```
pub async fn serve<S, B>(listener: TcpListener, service: S) -> io::Result<()>
where
    S: Service<Request<Incoming>, Response = Response<B>> + Clone + Send + 'static,
    S::Future: Send + 'static,
    S::Error: Into<BoxError>,
    B: Body + Send + 'static,
    B::Data: Send,
    B::Error: Into<BoxError>,
{
    loop {
        let (stream, remote) = listener.accept().await?;
        debug!(%remote, "accepted connection");

        let service = TowerToHyperService::new(service.clone());
        tokio::spawn(async move {
            let builder = auto::Builder::new(TokioExecutor::new());
            if let Err(err) = builder
                .serve_connection(TokioIo::new(stream), service)
                .await
            {
                warn!(%remote, error = %err, "connection failed");
            }
        });
    }
}
