//! HTTP server glue.
//!
//! Adapts the wire to the core types: an accept loop feeding `hyper`'s
//! http1 connection driver, a translation from `hyper` requests into
//! [`Request`] values (headers, cookies, collected body), and a serializer
//! from the buffered [`Response`] back onto the wire. One tokio task per
//! connection; graceful shutdown on ctrl-c.

use crate::app::App;
use bytes::Bytes;
use gantry_core::{Request, Response};
use http_body_util::{BodyExt, Full};
use hyper::body::Incoming;
use hyper::server::conn::http1;
use hyper::service::service_fn;
use hyper_util::rt::TokioIo;
use std::convert::Infallible;
use std::net::SocketAddr;
use std::sync::Arc;
use thiserror::Error;
use tokio::net::TcpListener;

/// A failure starting the server.
#[derive(Debug, Error)]
pub enum ServeError {
    /// The configured bind address does not parse.
    #[error("invalid bind address `{address}`: {source}")]
    Address {
        /// The configured address string.
        address: String,
        /// The parse failure.
        #[source]
        source: std::net::AddrParseError,
    },

    /// The listener could not be bound.
    #[error("failed to bind {address}: {source}")]
    Bind {
        /// The resolved address.
        address: String,
        /// The bind failure.
        #[source]
        source: std::io::Error,
    },
}

/// Initialize a `tracing` subscriber from `RUST_LOG`, defaulting to `info`.
///
/// Safe to call more than once; later calls are no-ops.
pub fn init_tracing() {
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info"));
    let _ = tracing_subscriber::fmt().with_env_filter(filter).try_init();
}

impl App {
    /// Bind the configured address and serve requests until ctrl-c.
    pub async fn serve(self) -> Result<(), ServeError> {
        let address: SocketAddr =
            self.config()
                .address
                .parse()
                .map_err(|source| ServeError::Address {
                    address: self.config().address.clone(),
                    source,
                })?;
        let listener = TcpListener::bind(address)
            .await
            .map_err(|source| ServeError::Bind {
                address: address.to_string(),
                source,
            })?;
        tracing::info!(%address, "server listening");

        let app = Arc::new(self);
        loop {
            tokio::select! {
                _ = tokio::signal::ctrl_c() => {
                    tracing::info!("shutdown signal received");
                    break;
                }
                accepted = listener.accept() => {
                    let (stream, remote) = match accepted {
                        Ok(pair) => pair,
                        Err(err) => {
                            tracing::debug!(error = %err, "accept failed");
                            continue;
                        }
                    };
                    let io = TokioIo::new(stream);
                    let app = Arc::clone(&app);
                    tokio::spawn(async move {
                        let service = service_fn(move |req| {
                            let app = Arc::clone(&app);
                            async move { Ok::<_, Infallible>(app.handle_wire(req).await) }
                        });
                        if let Err(err) = http1::Builder::new().serve_connection(io, service).await
                        {
                            tracing::debug!(error = %err, remote = %remote, "connection error");
                        }
                    });
                }
            }
        }
        Ok(())
    }

    async fn handle_wire(&self, req: hyper::Request<Incoming>) -> hyper::Response<Full<Bytes>> {
        let head_only = req.method() == hyper::Method::HEAD;
        let request = match read_request(req).await {
            Ok(request) => request,
            Err(err) => {
                tracing::debug!(error = %err, "failed to read request");
                let mut response = Response::new();
                response.set_status(400);
                response.set_header("Content-Type", "text/plain; charset=utf-8");
                response.write_str("Bad Request\n");
                return write_response(response, false);
            }
        };
        let response = self.handle(request).await;
        write_response(response, head_only)
    }
}

/// Translate a wire request into the core [`Request`] type, collecting the
/// whole body.
async fn read_request(req: hyper::Request<Incoming>) -> Result<Request, hyper::Error> {
    let (parts, body) = req.into_parts();
    let target = parts
        .uri
        .path_and_query()
        .map(|pq| pq.as_str().to_string())
        .unwrap_or_else(|| parts.uri.path().to_string());

    let mut request = Request::new(parts.method.as_str(), &target);
    for (name, value) in &parts.headers {
        if let Ok(value) = value.to_str() {
            request = request.with_header(name.as_str(), value);
        }
    }

    let bytes = body.collect().await?.to_bytes();
    Ok(request.with_body(bytes.to_vec()))
}

/// Serialize a buffered [`Response`] onto the wire. `HEAD` responses keep
/// their status and headers but drop the body.
fn write_response(response: Response, head_only: bool) -> hyper::Response<Full<Bytes>> {
    let mut builder = hyper::Response::builder().status(response.status_or_default());
    for (name, value) in response.headers() {
        builder = builder.header(name, value);
    }
    let body = if head_only {
        Bytes::new()
    } else {
        Bytes::from(response.into_body())
    };
    builder.body(Full::new(body)).unwrap_or_else(|err| {
        tracing::error!(error = %err, "response serialization failed");
        let mut fallback = hyper::Response::new(Full::new(Bytes::new()));
        *fallback.status_mut() = hyper::StatusCode::INTERNAL_SERVER_ERROR;
        fallback
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_write_response_carries_status_headers_and_body() {
        let mut response = Response::new();
        response.set_status(201);
        response.set_header("Content-Type", "application/json");
        response.write_str("{}");

        let wire = write_response(response, false);
        assert_eq!(wire.status(), hyper::StatusCode::CREATED);
        assert_eq!(
            wire.headers().get("content-type").unwrap(),
            "application/json"
        );
    }

    #[test]
    fn test_head_drops_the_body() {
        let mut response = Response::new();
        response.write_str("payload");

        let wire = write_response(response, true);
        assert_eq!(wire.status(), hyper::StatusCode::OK);
    }

    #[test]
    fn test_bogus_status_falls_back_to_500() {
        let mut response = Response::new();
        response.set_status(9999);

        let wire = write_response(response, false);
        assert_eq!(wire.status(), hyper::StatusCode::INTERNAL_SERVER_ERROR);
    }
}
