use bytes::{Bytes, BytesMut};
use indexmap::IndexMap;
use std::string::FromUtf8Error;
use time::macros::format_description;
use time::{OffsetDateTime, UtcOffset};

use crate::http::cookie::Cookie;
use crate::http::status::{UnknownStatusCode, status_line};

/// Value of the `Server` field on every response.
pub const SERVER_NAME: &str = "BOX/0.1";

/// Content type used for the bodies the server synthesises itself.
pub const PLAIN_TEXT: &str = "text/plain; encoding=utf-8";

const HTTP_VERSION: &str = "HTTP/1.1";

/// Formats a timestamp the way HTTP dates are written,
/// e.g. `Sun, 06 Nov 1994 08:49:37 GMT`.
pub fn format_http_date(at: OffsetDateTime) -> String {
    let format = format_description!(
        "[weekday repr:short], [day] [month repr:short] [year] [hour]:[minute]:[second] GMT"
    );
    at.to_offset(UtcOffset::UTC)
        .format(&format)
        .unwrap_or_default()
}

/// Status and header fields of a response.
///
/// Fields keep the order they were first set in. The status lives in the
/// `Status` field and is also what the status line is built from.
#[derive(Debug, Clone)]
pub struct ResponseHeader {
    fields: IndexMap<String, String>,
    cookies: Vec<Cookie>,
}

impl Default for ResponseHeader {
    fn default() -> Self {
        Self::new()
    }
}

impl ResponseHeader {
    /// Creates a header advertising [`SERVER_NAME`] with status `200 OK`.
    pub fn new() -> Self {
        let mut fields = IndexMap::new();
        fields.insert("Server".to_string(), SERVER_NAME.to_string());
        fields.insert("Status".to_string(), "200 OK".to_string());

        Self {
            fields,
            cookies: Vec::new(),
        }
    }

    /// Adds or replaces a header field. A replaced field keeps its position.
    pub fn set_field(&mut self, name: impl Into<String>, value: impl Into<String>) {
        self.fields.insert(name.into(), value.into());
    }

    pub fn field(&self, name: &str) -> Option<&str> {
        self.fields.get(name).map(|v| v.as_str())
    }

    pub fn fields(&self) -> impl Iterator<Item = (&str, &str)> {
        self.fields.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    /// Sets the status from the code table.
    ///
    /// Fails for codes the table does not know; the status is left unchanged.
    pub fn set_status(&mut self, code: u16) -> Result<(), UnknownStatusCode> {
        let line = status_line(code)?;
        self.set_status_line(line);
        Ok(())
    }

    /// Sets an already formatted `"<code> <reason>"` status.
    pub fn set_status_line(&mut self, line: impl Into<String>) {
        self.set_field("Status", line);
    }

    pub fn status(&self) -> &str {
        self.field("Status").unwrap_or_default()
    }

    pub fn set_content_type(&mut self, content_type: impl Into<String>) {
        self.set_field("Content-Type", content_type);
    }

    pub fn content_type(&self) -> Option<&str> {
        self.field("Content-Type")
    }

    pub(crate) fn set_content_length(&mut self, length: usize) {
        self.set_field("Content-Length", length.to_string());
    }

    pub fn content_length(&self) -> Option<usize> {
        self.field("Content-Length").and_then(|v| v.parse().ok())
    }

    pub fn set_connection(&mut self, value: impl Into<String>) {
        self.set_field("Connection", value);
    }

    pub fn connection(&self) -> Option<&str> {
        self.field("Connection")
    }

    pub fn set_location(&mut self, location: impl Into<String>) {
        self.set_field("Location", location);
    }

    pub fn location(&self) -> Option<&str> {
        self.field("Location")
    }

    /// The date and time the message was sent.
    pub fn set_date(&mut self, at: OffsetDateTime) {
        self.set_field("Date", format_http_date(at));
    }

    /// The date and time the resource expires.
    pub fn set_expires(&mut self, at: OffsetDateTime) {
        self.set_field("Expires", format_http_date(at));
    }

    /// Asks the client to reload `url` after `seconds`.
    pub fn set_refresh(&mut self, seconds: u32, url: &str) {
        self.set_field("Refresh", format!("{}; url={}", seconds, url));
    }

    /// Marks the response as a file download.
    pub fn mark_as_download(&mut self, filename: &str) {
        self.set_field(
            "Content-Disposition",
            format!("attachment; filename={}", filename),
        );
    }

    pub fn add_cookie(&mut self, cookie: Cookie) {
        self.cookies.push(cookie);
    }

    pub fn cookies(&self) -> &[Cookie] {
        &self.cookies
    }

    /// Serializes the status line, every field, then one `Set-Cookie` line
    /// per cookie. Lines end in `\n`; the blank separator line is not included.
    pub fn to_http_header(&self) -> String {
        let mut out = format!("{} {}\n", HTTP_VERSION, self.status());

        for (name, value) in &self.fields {
            out.push_str(&format!("{}: {}\n", name, value));
        }

        for cookie in &self.cookies {
            out.push_str(&format!("Set-Cookie: {}\n", cookie.to_header_value()));
        }

        out
    }
}

/// A response under construction.
///
/// `Content-Length` is added by the first write or clear and from then on
/// always matches the number of body bytes.
#[derive(Debug, Clone)]
pub struct Response {
    header: ResponseHeader,
    content: BytesMut,
}

impl Default for Response {
    fn default() -> Self {
        Self::new()
    }
}

impl Response {
    /// An empty `200 OK` response carrying only the `Server` and `Status` fields.
    pub fn new() -> Self {
        Self {
            header: ResponseHeader::new(),
            content: BytesMut::new(),
        }
    }

    /// A `501 Not Implemented` response with a plain-text body.
    pub fn not_implemented() -> Self {
        Self::plain_error("501 Not Implemented")
    }

    /// A `400 Bad Request` response with a plain-text body.
    pub fn bad_request() -> Self {
        Self::plain_error("400 Bad Request")
    }

    fn plain_error(status: &str) -> Self {
        let mut response = Self::new();
        response.header.set_status_line(status);
        response.header.set_content_type(PLAIN_TEXT);
        response.write(format!("{}\n", status));
        response
    }

    pub fn header(&self) -> &ResponseHeader {
        &self.header
    }

    pub fn header_mut(&mut self) -> &mut ResponseHeader {
        &mut self.header
    }

    /// Shorthand for [`ResponseHeader::set_status`].
    pub fn set_status(&mut self, code: u16) -> Result<(), UnknownStatusCode> {
        self.header.set_status(code)
    }

    /// Appends text or bytes to the body.
    pub fn write(&mut self, data: impl AsRef<[u8]>) {
        self.content.extend_from_slice(data.as_ref());
        self.header.set_content_length(self.content.len());
    }

    /// Drops the body written so far.
    pub fn clear_content(&mut self) {
        self.content.clear();
        self.header.set_content_length(0);
    }

    pub fn content(&self) -> &[u8] {
        &self.content
    }

    /// Header text followed by the blank separator line.
    pub fn get_header_bytes(&self) -> Vec<u8> {
        let mut header = self.header.to_http_header();
        header.push('\n');
        header.into_bytes()
    }

    /// The full wire representation: header bytes, then body bytes.
    pub fn get_bytes(&self) -> Bytes {
        let header = self.get_header_bytes();
        let mut buf = BytesMut::with_capacity(header.len() + self.content.len());
        buf.extend_from_slice(&header);
        buf.extend_from_slice(&self.content);
        buf.freeze()
    }

    /// The full response as text. Fails if the body is not valid UTF-8.
    pub fn to_text(&self) -> Result<String, FromUtf8Error> {
        String::from_utf8(self.get_bytes().to_vec())
    }
}
