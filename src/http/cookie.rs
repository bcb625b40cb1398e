use time::OffsetDateTime;

use crate::http::response::format_http_date;

/// A cookie to be sent in a `Set-Cookie` response header.
///
/// Optional attributes are left out of the header value when unset.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Cookie {
    pub name: String,
    pub value: String,
    /// `-1` means no `Max-Age` attribute
    pub max_age: i64,
    pub expires: Option<OffsetDateTime>,
    /// Empty means no `domain` attribute
    pub domain: String,
    /// Empty means no `path` attribute
    pub path: String,
    pub secure: bool,
    pub http_only: bool,
}

impl Cookie {
    pub fn new(name: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            value: value.into(),
            max_age: -1,
            expires: None,
            domain: String::new(),
            path: String::new(),
            secure: false,
            http_only: false,
        }
    }

    pub fn max_age(mut self, seconds: i64) -> Self {
        self.max_age = seconds;
        self
    }

    pub fn expires(mut self, at: OffsetDateTime) -> Self {
        self.expires = Some(at);
        self
    }

    pub fn domain(mut self, domain: impl Into<String>) -> Self {
        self.domain = domain.into();
        self
    }

    pub fn path(mut self, path: impl Into<String>) -> Self {
        self.path = path.into();
        self
    }

    pub fn secure(mut self, secure: bool) -> Self {
        self.secure = secure;
        self
    }

    pub fn http_only(mut self, http_only: bool) -> Self {
        self.http_only = http_only;
        self
    }

    /// Renders the value that follows `Set-Cookie: `.
    pub fn to_header_value(&self) -> String {
        let mut out = format!("{}={}", self.name, self.value);

        if self.max_age != -1 {
            out.push_str(&format!("; Max-Age={}", self.max_age));
        }
        if let Some(expires) = self.expires {
            out.push_str(&format!("; expires={}", format_http_date(expires)));
        }
        if !self.domain.is_empty() {
            out.push_str(&format!("; domain={}", self.domain));
        }
        if !self.path.is_empty() {
            out.push_str(&format!("; path={}", self.path));
        }
        if self.secure {
            out.push_str("; secure");
        }
        if self.http_only {
            out.push_str("; HttpOnly");
        }

        out
    }
}
