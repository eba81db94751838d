//! The parsed inbound request.
//!
//! A [`Request`] is built once at the server boundary and owned by a single
//! dispatch for its whole lifetime. Matched route parameters are appended to
//! the query pairs during routing, so controllers read them through the same
//! accessor as ordinary query-string values.

/// A parsed HTTP request.
///
/// Headers are matched case-insensitively. Query and form pairs preserve
/// arrival order and duplicates.
#[derive(Debug, Clone)]
pub struct Request {
    method: String,
    path: String,
    query: Vec<(String, String)>,
    headers: Vec<(String, String)>,
    form: Vec<(String, String)>,
    body: Vec<u8>,
}

impl Request {
    /// Build a request from a method and a request target (`/path?query`).
    ///
    /// The method is expected in wire format (uppercase).
    pub fn new(method: impl Into<String>, target: &str) -> Self {
        let (path, raw_query) = match target.split_once('?') {
            Some((path, query)) => (path, query),
            None => (target, ""),
        };
        Self {
            method: method.into(),
            path: path.to_string(),
            query: parse_pairs(raw_query),
            headers: Vec::new(),
            form: Vec::new(),
            body: Vec::new(),
        }
    }

    /// Attach a header. Intended for the server boundary and tests.
    pub fn with_header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.headers.push((name.into(), value.into()));
        self
    }

    /// Attach a body. Intended for the server boundary and tests.
    pub fn with_body(mut self, body: impl Into<Vec<u8>>) -> Self {
        self.body = body.into();
        self
    }

    /// The raw request method, e.g. `GET`.
    pub fn method(&self) -> &str {
        &self.method
    }

    /// The request path, without the query string.
    pub fn path(&self) -> &str {
        &self.path
    }

    /// The first query value under `name`, if any.
    pub fn query(&self, name: &str) -> Option<&str> {
        self.query
            .iter()
            .find(|(k, _)| k == name)
            .map(|(_, v)| v.as_str())
    }

    /// Every query value under `name`, in arrival order.
    pub fn query_all<'a>(&'a self, name: &'a str) -> impl Iterator<Item = &'a str> {
        self.query
            .iter()
            .filter(move |(k, _)| k == name)
            .map(|(_, v)| v.as_str())
    }

    /// Append a query pair. Used by the router to fold matched route
    /// parameters into the query collection.
    pub fn append_query(&mut self, name: impl Into<String>, value: impl Into<String>) {
        self.query.push((name.into(), value.into()));
    }

    /// The first header value under `name` (case-insensitive), if any.
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers
            .iter()
            .find(|(k, _)| k.eq_ignore_ascii_case(name))
            .map(|(_, v)| v.as_str())
    }

    /// The value of the cookie `name` from the `Cookie` header, if present.
    pub fn cookie(&self, name: &str) -> Option<&str> {
        let header = self.header("cookie")?;
        for part in header.split(';') {
            let part = part.trim();
            if let Some((key, value)) = part.split_once('=') {
                if key == name {
                    return Some(value);
                }
            }
        }
        None
    }

    /// The first form value under `name`, if any.
    ///
    /// Populated by [`parse_form_body`](Self::parse_form_body).
    pub fn form(&self, name: &str) -> Option<&str> {
        self.form
            .iter()
            .find(|(k, _)| k == name)
            .map(|(_, v)| v.as_str())
    }

    /// The raw request body.
    pub fn body(&self) -> &[u8] {
        &self.body
    }

    /// Decode an `application/x-www-form-urlencoded` body into form pairs.
    ///
    /// Any other content type leaves the form collection empty. The
    /// dispatcher calls this once before the controller lifecycle starts.
    pub fn parse_form_body(&mut self) {
        let urlencoded = self
            .header("content-type")
            .is_some_and(|ct| ct.starts_with("application/x-www-form-urlencoded"));
        if !urlencoded || self.body.is_empty() {
            return;
        }
        let raw = String::from_utf8_lossy(&self.body).into_owned();
        self.form = parse_pairs(&raw);
    }
}

/// Decode `k=v&k2=v2` pairs, percent-decoding keys and values and treating
/// `+` as a space. A key without `=` becomes a pair with an empty value.
fn parse_pairs(raw: &str) -> Vec<(String, String)> {
    let mut pairs = Vec::new();
    if raw.is_empty() {
        return pairs;
    }
    for pair in raw.split('&') {
        match pair.split_once('=') {
            Some((key, value)) => pairs.push((decode(key), decode(value))),
            None => pairs.push((decode(pair), String::new())),
        }
    }
    pairs
}

fn decode(raw: &str) -> String {
    let spaced = raw.replace('+', " ");
    urlencoding::decode(&spaced)
        .map(|cow| cow.into_owned())
        .unwrap_or(spaced)
}
