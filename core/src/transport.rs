//! Blocking HTTP(S) transport backed by `ureq`.

use std::fs;
use std::path::Path;

use ureq::tls::{Certificate, ClientCert, PrivateKey, TlsConfig};
use ureq::{Agent, RequestBuilder};

use crate::config::EndpointConfig;
use crate::error::{CandlepinError, Result};
use crate::http::{HttpMethod, HttpRequest, HttpResponse};
use crate::rest::Transport;

/// Executes `HttpRequest`s with a single `ureq::Agent`.
///
/// Status-code-as-error is disabled so 4xx/5xx come back as data and the
/// binding decides what counts as success.
#[derive(Debug, Clone)]
pub struct UreqTransport {
    agent: Agent,
}

impl UreqTransport {
    pub fn new(endpoint: &EndpointConfig) -> Result<Self> {
        let mut tls = TlsConfig::builder().disable_verification(endpoint.accept_invalid_certs());
        if endpoint.secure() {
            if let (Some(cert), Some(key)) = (endpoint.cert_file(), endpoint.key_file()) {
                tls = tls.client_cert(Some(load_client_cert(cert, key)?));
            }
        }

        let agent = Agent::config_builder()
            .http_status_as_error(false)
            .tls_config(tls.build())
            .build()
            .new_agent();
        Ok(Self { agent })
    }
}

impl Transport for UreqTransport {
    fn execute(&self, request: &HttpRequest) -> Result<HttpResponse> {
        let url = request.url.as_str();
        let headers = request.headers.as_slice();

        let mut response = match (request.method, request.body.as_deref()) {
            (HttpMethod::Get, _) => with_headers(self.agent.get(url), headers).call(),
            (HttpMethod::Head, _) => with_headers(self.agent.head(url), headers).call(),
            (HttpMethod::Delete, _) => with_headers(self.agent.delete(url), headers).call(),
            (HttpMethod::Post, Some(body)) => with_headers(self.agent.post(url), headers).send(body),
            (HttpMethod::Post, None) => with_headers(self.agent.post(url), headers).send_empty(),
            (HttpMethod::Put, Some(body)) => with_headers(self.agent.put(url), headers).send(body),
            (HttpMethod::Put, None) => with_headers(self.agent.put(url), headers).send_empty(),
        }?;

        let status = response.status();
        let headers = response
            .headers()
            .iter()
            .map(|(name, value)| {
                (
                    name.as_str().to_string(),
                    value.to_str().unwrap_or_default().to_string(),
                )
            })
            .collect();
        let body = response.body_mut().read_to_string()?;

        Ok(HttpResponse {
            status: status.as_u16(),
            reason: status.canonical_reason().unwrap_or_default().to_string(),
            headers,
            body,
        })
    }
}

fn with_headers<B>(builder: RequestBuilder<B>, headers: &[(String, String)]) -> RequestBuilder<B> {
    headers
        .iter()
        .fold(builder, |builder, (name, value)| builder.header(name.as_str(), value.as_str()))
}

fn load_client_cert(cert_file: &Path, key_file: &Path) -> Result<ClientCert> {
    let cert_pem = read_pem(cert_file)?;
    let key_pem = read_pem(key_file)?;
    let cert = Certificate::from_pem(&cert_pem)?;
    let key = PrivateKey::from_pem(&key_pem)?;
    Ok(ClientCert::new_with_certs(&[cert], key))
}

fn read_pem(path: &Path) -> Result<Vec<u8>> {
    fs::read(path).map_err(|source| CandlepinError::Certificate {
        path: path.to_path_buf(),
        source,
    })
}
