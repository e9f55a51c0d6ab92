//! Candlepin domain operations on top of `Rest`.
//!
//! # Design
//! Each operation is a fixed path template plus optional query parameters.
//! Path segments and query values are percent-encoded. List endpoints that
//! wrap every element in a one-key object (`{"pool": {...}}`) are unwrapped
//! here so callers get the inner objects; lists the server returns bare are
//! passed through.

use base64::engine::general_purpose::STANDARD;
use base64::Engine;
use serde::de::DeserializeOwned;
use serde_json::{json, Value};
use urlencoding::encode;

use crate::config::EndpointConfig;
use crate::error::{CandlepinError, Result};
use crate::http::{ContentType, Credentials};
use crate::rest::{Rest, Transport};
use crate::transport::UreqTransport;
use crate::types::{
    Certificate, CertificateSerial, Consumer, Entitlement, NewConsumer, Pool, PoolFilter, Product,
};

/// Synchronous client for the Candlepin REST API.
#[derive(Debug)]
pub struct CandlepinApi<T = UreqTransport> {
    rest: Rest<T>,
}

impl CandlepinApi<UreqTransport> {
    /// Client that talks to `endpoint` over the network.
    pub fn connect(endpoint: EndpointConfig) -> Result<Self> {
        let transport = UreqTransport::new(&endpoint)?;
        Ok(Self::new(endpoint, transport))
    }
}

impl<T: Transport> CandlepinApi<T> {
    pub fn new(endpoint: EndpointConfig, transport: T) -> Self {
        Self {
            rest: Rest::new(endpoint, transport),
        }
    }

    /// Register a consumer. The only call that sends Basic auth.
    pub fn register_consumer(&self, credentials: &Credentials, consumer: &NewConsumer) -> Result<Consumer> {
        let body = json!({ "consumer": consumer });
        let blob = self
            .rest
            .post("/consumers", Some(&body), ContentType::Json, Some(credentials))?
            .ok_or_else(|| CandlepinError::UnexpectedPayload("empty registration response".into()))?;
        unwrap_one(blob, "consumer")
    }

    pub fn unregister_consumer(&self, consumer_uuid: &str) -> Result<Option<Value>> {
        self.rest
            .delete(&format!("/consumers/{}", encode(consumer_uuid)), ContentType::Json)
    }

    pub fn bind_product(&self, consumer_uuid: &str, product_label: &str) -> Result<Vec<Entitlement>> {
        self.bind(consumer_uuid, "product", product_label)
    }

    pub fn bind_pool(&self, consumer_uuid: &str, pool_id: &str) -> Result<Vec<Entitlement>> {
        self.bind(consumer_uuid, "pool", pool_id)
    }

    pub fn bind_regtoken(&self, consumer_uuid: &str, regtoken: &str) -> Result<Vec<Entitlement>> {
        self.bind(consumer_uuid, "token", regtoken)
    }

    fn bind(&self, consumer_uuid: &str, param: &str, value: &str) -> Result<Vec<Entitlement>> {
        let path = format!("/consumers/{}/entitlements?{param}={}", encode(consumer_uuid), encode(value));
        let blob = self.rest.post(&path, None, ContentType::Json, None)?;
        unwrap_list(blob, "entitlement")
    }

    /// Returns `None` when the server answers 204, e.g. nothing was bound.
    pub fn unbind_all(&self, consumer_uuid: &str) -> Result<Option<Value>> {
        self.rest
            .delete(&format!("/consumers/{}/entitlements", encode(consumer_uuid)), ContentType::Json)
    }

    pub fn unbind_entitlement(&self, entitlement_id: &str) -> Result<Option<Value>> {
        self.rest
            .delete(&format!("/entitlements/{}", encode(entitlement_id)), ContentType::Json)
    }

    pub fn unbind_by_serial_numbers<S: AsRef<str>>(
        &self,
        consumer_uuid: &str,
        serials: &[S],
    ) -> Result<Option<Value>> {
        let path = format!("/entitlements/consumer/{}/{}", encode(consumer_uuid), join(serials));
        self.rest.delete(&path, ContentType::Json)
    }

    /// Entitlement certificates, optionally limited to the given serials.
    pub fn get_certificates<S: AsRef<str>>(&self, consumer_uuid: &str, serials: &[S]) -> Result<Vec<Certificate>> {
        let path = certificates_path(consumer_uuid, serials);
        let blob = self.rest.get(&path, ContentType::Json)?;
        unwrap_list(blob, "cert")
    }

    pub fn get_certificate_serials(&self, consumer_uuid: &str) -> Result<Vec<CertificateSerial>> {
        let path = format!("/consumers/{}/certificates/serials", encode(consumer_uuid));
        let blob = self.rest.get(&path, ContentType::Json)?;
        plain_list(blob)
    }

    pub fn get_pool(&self, pool_id: &str) -> Result<Pool> {
        let blob = self
            .rest
            .get(&format!("/pools/{}", encode(pool_id)), ContentType::Json)?
            .ok_or_else(|| CandlepinError::UnexpectedPayload(format!("pool {pool_id} came back empty")))?;
        Ok(serde_json::from_value(blob)?)
    }

    pub fn get_pools(&self, filter: &PoolFilter) -> Result<Vec<Pool>> {
        let blob = self.rest.get(&pools_path(filter), ContentType::Json)?;
        unwrap_list(blob, "pool")
    }

    pub fn get_entitlements(&self, consumer_uuid: &str, product_id: Option<&str>) -> Result<Vec<Entitlement>> {
        let mut path = format!("/consumers/{}/entitlements", encode(consumer_uuid));
        if let Some(product_id) = product_id {
            path.push_str(&format!("?product={}", encode(product_id)));
        }
        let blob = self.rest.get(&path, ContentType::Json)?;
        plain_list(blob)
    }

    pub fn get_products(&self) -> Result<Vec<Product>> {
        let blob = self.rest.get("/products/", ContentType::Json)?;
        unwrap_list(blob, "product")
    }

    pub fn get_subscriptions(&self) -> Result<Vec<Value>> {
        let blob = self.rest.get("/subscriptions/", ContentType::Json)?;
        plain_list(blob)
    }

    pub fn create_subscription(&self, subscription: &Value) -> Result<Option<Value>> {
        self.rest
            .post("/subscriptions/", Some(subscription), ContentType::Json, None)
    }

    pub fn delete_subscription(&self, subscription_id: &str) -> Result<Option<Value>> {
        self.rest
            .delete(&format!("/subscriptions/{}", encode(subscription_id)), ContentType::Json)
    }

    /// Replace the server's rules. The script travels base64 encoded as
    /// plain text.
    pub fn upload_rules(&self, rules: &str) -> Result<Option<Value>> {
        let encoded = Value::String(STANDARD.encode(rules));
        self.rest.post("/rules/", Some(&encoded), ContentType::Text, None)
    }
}

/// `/pools?` followed by `name=value&` for each filter present, in the order
/// consumer, owner, product. Values are percent-encoded.
pub fn pools_path(filter: &PoolFilter) -> String {
    let mut path = String::from("/pools?");
    let params = [
        ("consumer", &filter.consumer),
        ("owner", &filter.owner),
        ("product", &filter.product),
    ];
    for (name, value) in params {
        if let Some(value) = value {
            path.push_str(&format!("{name}={}&", encode(value)));
        }
    }
    path
}

pub fn certificates_path<S: AsRef<str>>(consumer_uuid: &str, serials: &[S]) -> String {
    if serials.is_empty() {
        format!("/consumers/{}/certificates", encode(consumer_uuid))
    } else {
        format!("/consumers/{}/certificates?serials={}", encode(consumer_uuid), join(serials))
    }
}

/// Encodes each item; the separating commas stay literal.
fn join<S: AsRef<str>>(items: &[S]) -> String {
    items
        .iter()
        .map(|item| encode(item.as_ref()))
        .collect::<Vec<_>>()
        .join(",")
}

/// `{"<key>": inner}` → inner.
fn unwrap_one<D: DeserializeOwned>(blob: Value, key: &'static str) -> Result<D> {
    match blob {
        Value::Object(mut map) => {
            let inner = map.remove(key).ok_or(CandlepinError::MissingEnvelope { key })?;
            Ok(serde_json::from_value(inner)?)
        }
        _ => Err(CandlepinError::MissingEnvelope { key }),
    }
}

/// `[{"<key>": a}, {"<key>": b}]` → `[a, b]`. An empty body is an empty list.
fn unwrap_list<D: DeserializeOwned>(blob: Option<Value>, key: &'static str) -> Result<Vec<D>> {
    into_elements(blob)?
        .into_iter()
        .map(|element| unwrap_one(element, key))
        .collect()
}

fn plain_list<D: DeserializeOwned>(blob: Option<Value>) -> Result<Vec<D>> {
    into_elements(blob)?
        .into_iter()
        .map(|element| serde_json::from_value(element).map_err(CandlepinError::from))
        .collect()
}

fn into_elements(blob: Option<Value>) -> Result<Vec<Value>> {
    match blob {
        None => Ok(Vec::new()),
        Some(Value::Array(elements)) => Ok(elements),
        Some(other) => Err(CandlepinError::UnexpectedPayload(format!(
            "expected a JSON array, got {other}"
        ))),
    }
}
