//! Domain DTOs for the Candlepin API.
//!
//! # Design
//! Only the fields the client reads are typed. Everything else the server
//! sends is kept in a flattened `extra` map so printing a DTO shows the full
//! server object.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Consumer type, e.g. `system` or `virt_system`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ConsumerType {
    pub label: String,
}

/// A registered consumer returned by the server.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Consumer {
    pub uuid: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(rename = "type", default, skip_serializing_if = "Option::is_none")]
    pub consumer_type: Option<ConsumerType>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub facts: Option<Value>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// Registration payload. Serializes to the inner object of
/// `{"consumer": {...}}`.
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct NewConsumer {
    #[serde(rename = "type")]
    pub consumer_type: ConsumerType,
    pub name: String,
    pub facts: Facts,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub uuid: Option<String>,
}

/// Hardware facts reported at registration.
#[derive(Debug, Clone, Default, Serialize, PartialEq)]
pub struct Facts {
    pub metadata: Map<String, Value>,
}

impl NewConsumer {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            consumer_type: ConsumerType {
                label: "system".to_string(),
            },
            name: name.into(),
            facts: Facts::default(),
            uuid: None,
        }
    }

    pub fn with_type(mut self, label: impl Into<String>) -> Self {
        self.consumer_type.label = label.into();
        self
    }

    pub fn with_fact(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.facts.metadata.insert(key.into(), value.into());
        self
    }

    /// Re-register under a known UUID instead of letting the server pick one.
    pub fn with_uuid(mut self, uuid: impl Into<String>) -> Self {
        self.uuid = Some(uuid.into());
        self
    }
}

/// A pool of entitlements for one product.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Pool {
    pub id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub product_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub quantity: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub consumed: Option<i64>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// Optional filters for `CandlepinApi::get_pools`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PoolFilter {
    pub consumer: Option<String>,
    pub owner: Option<String>,
    pub product: Option<String>,
}

/// A consumer's grant against a pool.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Entitlement {
    pub id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pool: Option<Pool>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// An entitlement certificate with its key, both PEM encoded.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Certificate {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub serial: Option<Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub key: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cert: Option<String>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// One entry of `/consumers/{uuid}/certificates/serials`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct CertificateSerial {
    pub serial: Value,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Product {
    pub id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}
