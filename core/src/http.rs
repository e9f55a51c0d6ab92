//! HTTP transport types for the Candlepin binding.
//!
//! # Design
//! Requests and responses are plain data. `Rest` builds an `HttpRequest`,
//! hands it to a `Transport` for the actual round-trip, and parses the
//! returned `HttpResponse`. Keeping the wire description separate from the
//! I/O lets every header, path and status rule be tested without a socket.

use base64::engine::general_purpose::STANDARD;
use base64::Engine;

/// HTTP method for a request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HttpMethod {
    Get,
    Head,
    Post,
    Put,
    Delete,
}

impl HttpMethod {
    pub fn as_str(self) -> &'static str {
        match self {
            HttpMethod::Get => "GET",
            HttpMethod::Head => "HEAD",
            HttpMethod::Post => "POST",
            HttpMethod::Put => "PUT",
            HttpMethod::Delete => "DELETE",
        }
    }
}

/// Payload encoding used for both the request body and the response body.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ContentType {
    #[default]
    Json,
    Text,
}

impl ContentType {
    pub fn mime(self) -> &'static str {
        match self {
            ContentType::Json => "application/json",
            ContentType::Text => "text/plain",
        }
    }
}

/// Username/password pair sent as an HTTP Basic `authorization` header.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Credentials {
    pub username: String,
    pub password: String,
}

impl Credentials {
    pub fn new(username: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            username: username.into(),
            password: password.into(),
        }
    }

    /// Value of the `authorization` header, e.g. `Basic dXNlcjpwYXNz`.
    pub fn basic_auth(&self) -> String {
        let token = STANDARD.encode(format!("{}:{}", self.username, self.password));
        format!("Basic {token}")
    }
}

/// An HTTP request described as plain data.
///
/// `url` is absolute (scheme, host, port, base path and call path).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HttpRequest {
    pub method: HttpMethod,
    pub url: String,
    pub headers: Vec<(String, String)>,
    pub body: Option<String>,
}

impl HttpRequest {
    /// First header value with the given (case-insensitive) name.
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers
            .iter()
            .find(|(k, _)| k.eq_ignore_ascii_case(name))
            .map(|(_, v)| v.as_str())
    }
}

/// An HTTP response described as plain data.
///
/// The body is read in full before the response is handed back, so an error
/// carrying a response still lets the caller inspect what the server said.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HttpResponse {
    pub status: u16,
    pub reason: String,
    pub headers: Vec<(String, String)>,
    pub body: String,
}

impl HttpResponse {
    pub fn new(status: u16, body: impl Into<String>) -> Self {
        Self {
            status,
            reason: reason_phrase(status).to_string(),
            headers: Vec::new(),
            body: body.into(),
        }
    }
}

/// Canonical reason phrase for the status codes Candlepin actually returns.
pub fn reason_phrase(status: u16) -> &'static str {
    match status {
        200 => "OK",
        201 => "Created",
        204 => "No Content",
        400 => "Bad Request",
        401 => "Unauthorized",
        403 => "Forbidden",
        404 => "Not Found",
        409 => "Conflict",
        500 => "Internal Server Error",
        503 => "Service Unavailable",
        _ => "",
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn basic_auth_encodes_username_and_password() {
        let creds = Credentials::new("admin", "admin");
        assert_eq!(creds.basic_auth(), "Basic YWRtaW46YWRtaW4=");
    }

    #[test]
    fn basic_auth_with_empty_password_keeps_separator() {
        let creds = Credentials::new("user", "");
        assert_eq!(creds.basic_auth(), format!("Basic {}", STANDARD.encode("user:")));
    }

    #[test]
    fn header_lookup_ignores_case() {
        let req = HttpRequest {
            method: HttpMethod::Get,
            url: "http://localhost:8080/candlepin/pools".to_string(),
            headers: vec![("content-type".to_string(), "application/json".to_string())],
            body: None,
        };
        assert_eq!(req.header("Content-Type"), Some("application/json"));
        assert_eq!(req.header("authorization"), None);
    }

    #[test]
    fn content_type_mime_strings() {
        assert_eq!(ContentType::Json.mime(), "application/json");
        assert_eq!(ContentType::Text.mime(), "text/plain");
    }
}
