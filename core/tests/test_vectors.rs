//! Verify the binding against JSON test vectors stored in `test-vectors/`.
//!
//! Each vector file describes inputs, the expected request, a simulated
//! response and the expected result. Results are compared as parsed JSON so
//! field ordering never matters.

use candlepin_core::testing::ScriptedTransport;
use candlepin_core::{CandlepinApi, Credentials, EndpointConfig, HttpMethod, HttpResponse, NewConsumer, PoolFilter};
use serde_json::Value;

const BASE_URL: &str = "http://localhost:8080/candlepin";

fn api(transport: &ScriptedTransport) -> CandlepinApi<&ScriptedTransport> {
    CandlepinApi::new(EndpointConfig::new("localhost", 8080, "/candlepin"), transport)
}

/// Parse the method string from test vectors into `HttpMethod`.
fn parse_method(s: &str) -> HttpMethod {
    match s {
        "GET" => HttpMethod::Get,
        "HEAD" => HttpMethod::Head,
        "POST" => HttpMethod::Post,
        "PUT" => HttpMethod::Put,
        "DELETE" => HttpMethod::Delete,
        other => panic!("unknown method: {other}"),
    }
}

fn simulated(case: &Value) -> HttpResponse {
    let sim = &case["simulated_response"];
    HttpResponse::new(
        sim["status"].as_u64().unwrap() as u16,
        sim["body"].as_str().unwrap(),
    )
}

fn opt(input: &Value, key: &str) -> Option<String> {
    input[key].as_str().map(str::to_string)
}

// ---------------------------------------------------------------------------
// Pools
// ---------------------------------------------------------------------------

#[test]
fn pools_test_vectors() {
    let raw = include_str!("../../test-vectors/pools.json");
    let vectors: Value = serde_json::from_str(raw).unwrap();

    for case in vectors["cases"].as_array().unwrap() {
        let name = case["name"].as_str().unwrap();
        let input = &case["input"];
        let filter = PoolFilter {
            consumer: opt(input, "consumer"),
            owner: opt(input, "owner"),
            product: opt(input, "product"),
        };

        let transport = ScriptedTransport::new();
        transport.push(simulated(case));
        let pools = api(&transport).get_pools(&filter).unwrap();

        let req = transport.last_request().unwrap();
        let expected_req = &case["expected_request"];
        assert_eq!(req.method, parse_method(expected_req["method"].as_str().unwrap()), "{name}: method");
        assert_eq!(req.url, format!("{BASE_URL}{}", expected_req["path"].as_str().unwrap()), "{name}: path");
        assert!(req.header("authorization").is_none(), "{name}: no auth");

        assert_eq!(serde_json::to_value(&pools).unwrap(), case["expected_result"], "{name}: result");
    }
}

// ---------------------------------------------------------------------------
// Register
// ---------------------------------------------------------------------------

#[test]
fn register_test_vectors() {
    let raw = include_str!("../../test-vectors/register.json");
    let vectors: Value = serde_json::from_str(raw).unwrap();

    for case in vectors["cases"].as_array().unwrap() {
        let name = case["name"].as_str().unwrap();
        let input = &case["input"];
        let credentials = Credentials::new(
            input["username"].as_str().unwrap(),
            input["password"].as_str().unwrap(),
        );
        let mut consumer = NewConsumer::new(input["name"].as_str().unwrap()).with_type(input["type"].as_str().unwrap());
        for (key, value) in input["facts"].as_object().unwrap() {
            consumer = consumer.with_fact(key.clone(), value.clone());
        }
        if let Some(uuid) = opt(input, "uuid") {
            consumer = consumer.with_uuid(uuid);
        }

        let transport = ScriptedTransport::new();
        transport.push(simulated(case));
        let registered = api(&transport).register_consumer(&credentials, &consumer).unwrap();

        let req = transport.last_request().unwrap();
        let expected_req = &case["expected_request"];
        assert_eq!(req.method, parse_method(expected_req["method"].as_str().unwrap()), "{name}: method");
        assert_eq!(req.url, format!("{BASE_URL}{}", expected_req["path"].as_str().unwrap()), "{name}: path");

        let expected_headers: Vec<(String, String)> = expected_req["headers"]
            .as_array()
            .unwrap()
            .iter()
            .map(|h| {
                let arr = h.as_array().unwrap();
                (arr[0].as_str().unwrap().to_string(), arr[1].as_str().unwrap().to_string())
            })
            .collect();
        assert_eq!(req.headers, expected_headers, "{name}: headers");

        let req_body: Value = serde_json::from_str(req.body.as_deref().unwrap()).unwrap();
        assert_eq!(req_body, expected_req["body"], "{name}: body");

        assert_eq!(serde_json::to_value(&registered).unwrap(), case["expected_result"], "{name}: result");
    }
}
