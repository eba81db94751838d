//! Static file responses for mounted directories.
//!
//! Mounted paths bypass the rule tables entirely; the router resolves the
//! target file and this module turns it into a response. Unknown extensions
//! fall back to `application/octet-stream`; a missing file, a directory, or
//! a path that climbs out of the mount all answer 404.

use gantry_core::Response;
use std::path::{Component, Path};

/// Extension-to-MIME mapping for served files.
pub const MIME_TYPES: &[(&str, &str)] = &[
    ("css", "text/css"),
    ("gif", "image/gif"),
    ("html", "text/html"),
    ("ico", "image/x-icon"),
    ("jpeg", "image/jpeg"),
    ("jpg", "image/jpeg"),
    ("js", "application/javascript"),
    ("json", "application/json"),
    ("png", "image/png"),
    ("svg", "image/svg+xml"),
    ("ttf", "font/ttf"),
    ("txt", "text/plain"),
    ("wasm", "application/wasm"),
    ("woff", "font/woff"),
    ("woff2", "font/woff2"),
];

/// The MIME type for a file, by extension.
pub fn mime_for(path: &Path) -> &'static str {
    path.extension()
        .and_then(|ext| ext.to_str())
        .and_then(|ext| {
            MIME_TYPES
                .iter()
                .find(|(known, _)| *known == ext)
                .map(|(_, mime)| *mime)
        })
        .unwrap_or("application/octet-stream")
}

/// Build the response for a resolved mounted file.
pub async fn respond(file: &Path) -> Response {
    let mut response = Response::new();

    // A request path may smuggle `..` segments into the resolved file.
    if file
        .components()
        .any(|c| matches!(c, Component::ParentDir))
    {
        response.not_found();
        return response;
    }

    match tokio::fs::read(file).await {
        Ok(bytes) => {
            response.set_header("Content-Type", mime_for(file));
            response.write(&bytes);
        }
        Err(_) => response.not_found(),
    }
    response
}
