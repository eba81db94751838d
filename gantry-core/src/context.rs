//! Per-request context: the request and its response, paired.

use crate::request::Request;
use crate::response::Response;

/// The request/response pair owned by one dispatch.
///
/// Created fresh for every request and discarded when it completes; never
/// shared across requests.
#[derive(Debug)]
pub struct Context {
    /// The parsed inbound request.
    pub request: Request,
    /// The buffered response.
    pub response: Response,
}

impl Context {
    /// Wrap a request with a fresh, empty response.
    pub fn new(request: Request) -> Self {
        Self {
            request,
            response: Response::new(),
        }
    }

    /// The value of the cookie `name`, if the request carried it.
    pub fn cookie(&self, name: &str) -> Option<&str> {
        self.request.cookie(name)
    }

    /// The first query value under `name`, including injected route
    /// parameters.
    pub fn query(&self, name: &str) -> Option<&str> {
        self.request.query(name)
    }
}
