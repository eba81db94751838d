//! The buffered response and its output-observed flag.
//!
//! Every write of a body byte and every explicit status code flips
//! `has_output`, and the dispatch pipeline consults that flag after each
//! lifecycle step: the first participant to produce output claims the
//! response and pre-empts everything that would have run after it. Setting a
//! header alone does not count as output.

/// A buffered HTTP response owned by a single request.
#[derive(Debug, Default)]
pub struct Response {
    status: Option<u16>,
    headers: Vec<(String, String)>,
    body: Vec<u8>,
    has_output: bool,
}

impl Response {
    /// Create an empty response with no status and no output recorded.
    pub fn new() -> Self {
        Self::default()
    }

    /// Whether any body byte has been written or any status code set.
    pub const fn has_output(&self) -> bool {
        self.has_output
    }

    /// Set the status code. Counts as output.
    pub fn set_status(&mut self, code: u16) {
        self.has_output = true;
        self.status = Some(code);
    }

    /// Append or replace a header. Does not count as output.
    pub fn set_header(&mut self, name: impl Into<String>, value: impl Into<String>) {
        let name = name.into();
        if let Some(existing) = self
            .headers
            .iter_mut()
            .find(|(k, _)| k.eq_ignore_ascii_case(&name))
        {
            existing.1 = value.into();
        } else {
            self.headers.push((name, value.into()));
        }
    }

    /// Append bytes to the body. Counts as output.
    pub fn write(&mut self, bytes: &[u8]) {
        self.has_output = true;
        self.body.extend_from_slice(bytes);
    }

    /// Append a string to the body. Counts as output.
    pub fn write_str(&mut self, text: &str) {
        self.write(text.as_bytes());
    }

    /// The explicit status code, if one was set.
    pub const fn status(&self) -> Option<u16> {
        self.status
    }

    /// The status code to send on the wire: the explicit one, or `200`.
    pub fn status_or_default(&self) -> u16 {
        self.status.unwrap_or(200)
    }

    /// The first header value under `name` (case-insensitive), if any.
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers
            .iter()
            .find(|(k, _)| k.eq_ignore_ascii_case(name))
            .map(|(_, v)| v.as_str())
    }

    /// All headers, in insertion order.
    pub fn headers(&self) -> &[(String, String)] {
        &self.headers
    }

    /// The accumulated body.
    pub fn body(&self) -> &[u8] {
        &self.body
    }

    /// Consume the response, returning the body buffer.
    pub fn into_body(self) -> Vec<u8> {
        self.body
    }

    /// Write a canned `404 Not Found` response.
    pub fn not_found(&mut self) {
        self.set_status(404);
        self.set_header("Content-Type", "text/plain; charset=utf-8");
        self.write_str("404 page not found\n");
    }

    /// Write a canned `405 Method Not Allowed` response.
    pub fn method_not_allowed(&mut self) {
        self.set_status(405);
        self.set_header("Content-Type", "text/plain; charset=utf-8");
        self.write_str("Method Not Allowed\n");
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_write_marks_output() {
        let mut resp = Response::new();
        assert!(!resp.has_output());
        resp.write_str("hello");
        assert!(resp.has_output());
        assert_eq!(resp.body(), b"hello");
    }

    #[test]
    fn test_status_marks_output() {
        let mut resp = Response::new();
        resp.set_status(204);
        assert!(resp.has_output());
        assert_eq!(resp.status(), Some(204));
    }

    #[test]
    fn test_headers_do_not_mark_output() {
        let mut resp = Response::new();
        resp.set_header("X-Trace", "abc");
        assert!(!resp.has_output());
        assert_eq!(resp.header("x-trace"), Some("abc"));
    }

    #[test]
    fn test_set_header_replaces_existing() {
        let mut resp = Response::new();
        resp.set_header("Content-Type", "text/plain");
        resp.set_header("content-type", "text/html");
        assert_eq!(resp.header("Content-Type"), Some("text/html"));
        assert_eq!(resp.headers().len(), 1);
    }

    #[test]
    fn test_default_status_is_200() {
        let resp = Response::new();
        assert_eq!(resp.status_or_default(), 200);
    }

    #[test]
    fn test_canned_responses() {
        let mut resp = Response::new();
        resp.not_found();
        assert_eq!(resp.status(), Some(404));
        assert!(resp.has_output());

        let mut resp = Response::new();
        resp.method_not_allowed();
        assert_eq!(resp.status(), Some(405));
    }
}
