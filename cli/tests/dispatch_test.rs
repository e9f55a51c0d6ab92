//! Dispatcher end-to-end against the live mock server.

use candlepin_cli::{CliError, Dispatcher, Settings};
use serde_json::Value;

fn start_mock_server() -> std::net::SocketAddr {
    let std_listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
    let addr = std_listener.local_addr().unwrap();
    std_listener.set_nonblocking(true).unwrap();

    std::thread::spawn(move || {
        let rt = tokio::runtime::Builder::new_current_thread()
            .enable_all()
            .build()
            .unwrap();
        rt.block_on(async {
            let listener = tokio::net::TcpListener::from_std(std_listener).unwrap();
            mock_server::run(listener).await
        })
        .unwrap();
    });
    addr
}

fn dispatcher() -> Dispatcher {
    let addr = start_mock_server();
    Dispatcher::new(Settings {
        host: addr.ip().to_string(),
        port: addr.port(),
        prefix: mock_server::BASE_PATH.to_string(),
        ..Settings::default()
    })
}

fn run(dispatcher: &Dispatcher, args: &[&str]) -> Result<Value, CliError> {
    let argv: Vec<&str> = std::iter::once("candlepin").chain(args.iter().copied()).collect();
    let mut out = Vec::new();
    dispatcher.run(&argv, &mut out)?;
    Ok(serde_json::from_slice(&out).unwrap())
}

#[test]
fn register_bind_and_unbind_through_the_cli() {
    let cli = dispatcher();

    let consumer = run(
        &cli,
        &["register", "--username", "admin", "--password", "admin", "--system", "cli box", "--fact", "arch=x86_64"],
    )
    .unwrap();
    assert_eq!(consumer["name"], "cli box");
    let uuid = consumer["uuid"].as_str().unwrap().to_string();

    let pools = run(&cli, &["pools", "--consumer", &uuid]).unwrap();
    assert_eq!(pools.as_array().unwrap().len(), 3);
    let pool_id = pools[0]["id"].as_str().unwrap().to_string();

    let shown = run(&cli, &["pools", "show", "--pool", &pool_id]).unwrap();
    assert_eq!(shown["id"], pool_id.as_str());

    let bound = run(&cli, &["bind", "--consumer", &uuid, "--pool", &pool_id]).unwrap();
    assert_eq!(bound.as_array().unwrap().len(), 1);
    run(&cli, &["bind", "--consumer", &uuid, "--product", "monitoring"]).unwrap();

    let serials = run(&cli, &["certificates", "serials", "--consumer", &uuid]).unwrap();
    assert_eq!(serials.as_array().unwrap().len(), 2);

    let entitlements = run(&cli, &["entitlements", "--consumer", &uuid]).unwrap();
    assert_eq!(entitlements.as_array().unwrap().len(), 2);

    assert_eq!(run(&cli, &["unbind", "--consumer", &uuid]).unwrap(), Value::Null);
    let entitlements = run(&cli, &["entitlements", "--consumer", &uuid]).unwrap();
    assert!(entitlements.as_array().unwrap().is_empty());

    run(&cli, &["unregister", "--consumer", &uuid]).unwrap();
}

#[test]
fn server_errors_surface_as_api_errors() {
    let cli = dispatcher();
    match run(&cli, &["unregister", "--consumer", "no-such-consumer"]) {
        Err(CliError::Api(e)) => assert_eq!(e.status(), Some(404)),
        other => panic!("unexpected {other:?}"),
    }
}

#[test]
fn unknown_command_prints_usage() {
    let cli = dispatcher();
    match run(&cli, &["frobnicate", "--debug", "1"]) {
        Err(e @ CliError::Usage(_)) => {
            assert_eq!(e.exit_code(), 1);
            assert!(e.to_string().contains("subscriptions create"));
        }
        other => panic!("unexpected {other:?}"),
    }
}

#[test]
fn rules_upload_reads_the_file() {
    let cli = dispatcher();
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("rules.js");
    std::fs::write(&path, "function entitle() {}").unwrap();

    let echoed = run(&cli, &["rules", "upload", "--file", path.to_str().unwrap()]).unwrap();
    assert_eq!(echoed, "function entitle() {}");
}
