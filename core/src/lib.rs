//! Synchronous binding for the Candlepin entitlement REST API.
//!
//! # Overview
//! `Rest` turns a method, call path, optional body, content type and optional
//! credentials into an `HttpRequest`, runs it through a `Transport`, and maps
//! the `HttpResponse` to a demarshaled body or a `CandlepinError`.
//! `CandlepinApi` layers the Candlepin operations (register, bind, unbind,
//! certificates, pools, ...) on top.
//!
//! # Design
//! - `EndpointConfig` is immutable; TLS is an explicit `secure` switch.
//! - One request in flight at a time, no retries, no pooling.
//! - Request building and response parsing are pure; `UreqTransport` is the
//!   only place that touches the network, and `testing::ScriptedTransport`
//!   (`testing` feature) stands in for it in tests.

pub mod client;
pub mod config;
pub mod error;
pub mod http;
pub mod rest;
#[cfg(any(test, feature = "testing"))]
pub mod testing;
pub mod transport;
pub mod types;

pub use client::CandlepinApi;
pub use config::EndpointConfig;
pub use error::CandlepinError;
pub use http::{ContentType, Credentials, HttpMethod, HttpRequest, HttpResponse};
pub use rest::{Rest, Transport};
pub use transport::UreqTransport;
pub use types::{
    Certificate, CertificateSerial, Consumer, ConsumerType, Entitlement, NewConsumer, Pool, PoolFilter, Product,
};
