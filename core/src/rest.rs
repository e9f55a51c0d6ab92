//! Generic REST binding: path composition, marshaling, auth headers and
//! status handling for every Candlepin call.
//!
//! # Design
//! `Rest` owns an immutable `EndpointConfig` and a `Transport`. A call is
//! three steps: `build_request` (pure), `Transport::execute` (the only I/O),
//! `parse_response` (pure). `request` chains them; `get`/`head`/`post`/`put`/
//! `delete` fix the method.

use serde_json::Value;
use tracing::{debug, trace};

use crate::config::EndpointConfig;
use crate::error::{CandlepinError, Result};
use crate::http::{ContentType, Credentials, HttpMethod, HttpRequest, HttpResponse};

/// Executes one HTTP round-trip.
///
/// Implementations must return non-2xx responses as `Ok(HttpResponse)`;
/// status interpretation belongs to `parse_response`.
pub trait Transport {
    fn execute(&self, request: &HttpRequest) -> Result<HttpResponse>;
}

impl<T: Transport + ?Sized> Transport for &T {
    fn execute(&self, request: &HttpRequest) -> Result<HttpResponse> {
        (**self).execute(request)
    }
}

/// REST binding for a single endpoint.
#[derive(Debug)]
pub struct Rest<T> {
    endpoint: EndpointConfig,
    transport: T,
}

impl<T> Rest<T> {
    pub fn new(endpoint: EndpointConfig, transport: T) -> Self {
        Self { endpoint, transport }
    }

    /// Describe a call without executing it.
    pub fn build_request(
        &self,
        method: HttpMethod,
        path: &str,
        body: Option<&Value>,
        content_type: ContentType,
        credentials: Option<&Credentials>,
    ) -> Result<HttpRequest> {
        let mime = content_type.mime();
        let mut headers = vec![
            ("content-type".to_string(), mime.to_string()),
            ("accept".to_string(), mime.to_string()),
        ];
        if let Some(credentials) = credentials {
            headers.push(("authorization".to_string(), credentials.basic_auth()));
        }
        let body = body.map(|b| marshal(b, content_type)).transpose()?;

        Ok(HttpRequest {
            method,
            url: self.endpoint.url_for(path),
            headers,
            body,
        })
    }
}

impl<T: Transport> Rest<T> {
    /// Issue a call and return the demarshaled body, `None` when empty.
    pub fn request(
        &self,
        method: HttpMethod,
        path: &str,
        body: Option<&Value>,
        content_type: ContentType,
        credentials: Option<&Credentials>,
    ) -> Result<Option<Value>> {
        let request = self.build_request(method, path, body, content_type, credentials)?;
        debug!(method = method.as_str(), url = %request.url, "candlepin request");
        if let Some(body) = &request.body {
            trace!(%body, "request body");
        }

        let response = self.transport.execute(&request)?;
        debug!(status = response.status, reason = %response.reason, "candlepin response");
        trace!(body = %response.body, "response body");

        parse_response(response, content_type)
    }

    pub fn get(&self, path: &str, content_type: ContentType) -> Result<Option<Value>> {
        self.request(HttpMethod::Get, path, None, content_type, None)
    }

    pub fn head(&self, path: &str, content_type: ContentType) -> Result<Option<Value>> {
        self.request(HttpMethod::Head, path, None, content_type, None)
    }

    pub fn post(
        &self,
        path: &str,
        body: Option<&Value>,
        content_type: ContentType,
        credentials: Option<&Credentials>,
    ) -> Result<Option<Value>> {
        self.request(HttpMethod::Post, path, body, content_type, credentials)
    }

    pub fn put(&self, path: &str, body: Option<&Value>, content_type: ContentType) -> Result<Option<Value>> {
        self.request(HttpMethod::Put, path, body, content_type, None)
    }

    pub fn delete(&self, path: &str, content_type: ContentType) -> Result<Option<Value>> {
        self.request(HttpMethod::Delete, path, None, content_type, None)
    }
}

/// Encode a body for the wire.
///
/// JSON bodies are serialized; text bodies pass a JSON string through
/// verbatim and render anything else as its JSON text.
pub fn marshal(body: &Value, content_type: ContentType) -> Result<String> {
    match (content_type, body) {
        (ContentType::Json, _) => Ok(serde_json::to_string(body)?),
        (ContentType::Text, Value::String(text)) => Ok(text.clone()),
        (ContentType::Text, other) => Ok(other.to_string()),
    }
}

/// Map a response to the binding's result.
///
/// 200 and 204 are success; everything else is `CandlepinError::Http`
/// carrying the response untouched.
pub fn parse_response(response: HttpResponse, content_type: ContentType) -> Result<Option<Value>> {
    if !matches!(response.status, 200 | 204) {
        return Err(CandlepinError::Http {
            status: response.status,
            reason: response.reason.clone(),
            response: Box::new(response),
        });
    }
    if response.body.is_empty() {
        return Ok(None);
    }
    match content_type {
        ContentType::Json => Ok(Some(serde_json::from_str(&response.body)?)),
        ContentType::Text => Ok(Some(Value::String(response.body))),
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;
    use crate::testing::ScriptedTransport;

    fn endpoint() -> EndpointConfig {
        EndpointConfig::new("localhost", 8080, "/candlepin")
    }

    #[test]
    fn build_request_sets_json_headers() {
        let rest = Rest::new(endpoint(), ());
        let req = rest
            .build_request(HttpMethod::Get, "/pools", None, ContentType::Json, None)
            .unwrap();
        assert_eq!(req.method, HttpMethod::Get);
        assert_eq!(req.url, "http://localhost:8080/candlepin/pools");
        assert_eq!(req.header("content-type"), Some("application/json"));
        assert_eq!(req.header("accept"), Some("application/json"));
        assert!(req.header("authorization").is_none());
        assert!(req.body.is_none());
    }

    #[test]
    fn build_request_sets_text_headers() {
        let rest = Rest::new(endpoint(), ());
        let body = json!("cnVsZXM=");
        let req = rest
            .build_request(HttpMethod::Post, "/rules/", Some(&body), ContentType::Text, None)
            .unwrap();
        assert_eq!(req.header("content-type"), Some("text/plain"));
        assert_eq!(req.header("accept"), Some("text/plain"));
        assert_eq!(req.body.as_deref(), Some("cnVsZXM="));
    }

    #[test]
    fn build_request_adds_basic_auth_only_with_credentials() {
        let rest = Rest::new(endpoint(), ());
        let creds = Credentials::new("admin", "admin");
        let req = rest
            .build_request(HttpMethod::Post, "/consumers", None, ContentType::Json, Some(&creds))
            .unwrap();
        assert_eq!(req.header("authorization"), Some("Basic YWRtaW46YWRtaW4="));
    }

    #[test]
    fn marshal_json_encodes_strings_as_json() {
        assert_eq!(marshal(&json!("abc"), ContentType::Json).unwrap(), r#""abc""#);
        assert_eq!(marshal(&json!({"a": 1}), ContentType::Json).unwrap(), r#"{"a":1}"#);
    }

    #[test]
    fn marshal_text_passes_strings_through() {
        assert_eq!(marshal(&json!("abc"), ContentType::Text).unwrap(), "abc");
        assert_eq!(marshal(&json!(42), ContentType::Text).unwrap(), "42");
    }

    #[test]
    fn parse_response_empty_204_is_none() {
        let parsed = parse_response(HttpResponse::new(204, ""), ContentType::Json).unwrap();
        assert!(parsed.is_none());
    }

    #[test]
    fn parse_response_empty_200_is_none() {
        let parsed = parse_response(HttpResponse::new(200, ""), ContentType::Json).unwrap();
        assert!(parsed.is_none());
    }

    #[test]
    fn parse_response_decodes_json() {
        let parsed = parse_response(HttpResponse::new(200, r#"{"id":"p1"}"#), ContentType::Json).unwrap();
        assert_eq!(parsed, Some(json!({"id": "p1"})));
    }

    #[test]
    fn parse_response_passes_text_through() {
        let parsed = parse_response(HttpResponse::new(200, "{not json"), ContentType::Text).unwrap();
        assert_eq!(parsed, Some(Value::String("{not json".to_string())));
    }

    #[test]
    fn parse_response_rejects_other_success_codes() {
        let err = parse_response(HttpResponse::new(201, "{}"), ContentType::Json).unwrap_err();
        assert!(matches!(err, CandlepinError::Http { status: 201, .. }));
    }

    #[test]
    fn parse_response_keeps_rule_failure_body() {
        let response = HttpResponse::new(403, "rulefailed.virt.ents.only.for.physical.systems");
        let err = parse_response(response, ContentType::Json).unwrap_err();
        assert_eq!(err.status(), Some(403));
        let response = err.response().unwrap();
        assert_eq!(response.reason, "Forbidden");
        assert_eq!(response.body, "rulefailed.virt.ents.only.for.physical.systems");
    }

    #[test]
    fn parse_response_bad_json() {
        let err = parse_response(HttpResponse::new(200, "not json"), ContentType::Json).unwrap_err();
        assert!(matches!(err, CandlepinError::Json(_)));
    }

    #[test]
    fn convenience_methods_fix_the_http_method() {
        let transport = ScriptedTransport::new();
        for _ in 0..5 {
            transport.push(HttpResponse::new(204, ""));
        }
        let rest = Rest::new(endpoint(), &transport);
        rest.get("/a", ContentType::Json).unwrap();
        rest.head("/b", ContentType::Json).unwrap();
        rest.post("/c", None, ContentType::Json, None).unwrap();
        rest.put("/d", Some(&json!({})), ContentType::Json).unwrap();
        rest.delete("/e", ContentType::Json).unwrap();

        let methods: Vec<HttpMethod> = transport.requests().iter().map(|r| r.method).collect();
        assert_eq!(
            methods,
            vec![
                HttpMethod::Get,
                HttpMethod::Head,
                HttpMethod::Post,
                HttpMethod::Put,
                HttpMethod::Delete
            ]
        );
        assert_eq!(transport.requests()[3].body.as_deref(), Some("{}"));
    }
}
