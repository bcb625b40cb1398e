use crate::http::request::{Method, Request};
use std::collections::HashMap;

#[derive(Debug, thiserror::Error)]
pub enum ParseError {
    #[error("request line needs method, path and version: {0:?}")]
    InvalidRequest(String),
    #[error("header line without a colon: {0:?}")]
    InvalidHeader(String),
}

/// Parses the text of a request head into a [`Request`].
///
/// `text` is the request line followed by header lines, separated by `\n`.
/// Parsing stops at the first empty line or at the end of the text;
/// nothing after that blank line is looked at.
pub fn parse_http_request(text: &str) -> Result<Request, ParseError> {
    let mut lines = text.split('\n');

    // Request line
    let request_line = lines.next().unwrap_or_default().trim();
    let mut parts = request_line.split(' ');

    let (method_str, path, version) = match (parts.next(), parts.next(), parts.next()) {
        (Some(m), Some(p), Some(v)) => (m, p, v),
        _ => return Err(ParseError::InvalidRequest(request_line.to_string())),
    };

    let method = Method::from_token(method_str);

    // Headers
    let mut headers = HashMap::new();

    let header_lines = lines
        .map(|l| l.strip_suffix('\r').unwrap_or(l))
        .take_while(|l| !l.is_empty());

    for line in header_lines {
        let (key, value) = line
            .split_once(':')
            .ok_or_else(|| ParseError::InvalidHeader(line.to_string()))?;

        headers.insert(key.trim().to_string(), value.trim().to_string());
    }

    Ok(Request {
        method,
        path: path.to_string(),
        version: version.to_string(),
        headers,
        body: Vec::new(),
    })
}
