use std::net::SocketAddr;

use tokio::net::TcpListener;

/// `MOCK_CANDLEPIN_ADDR` wins over `PORT`; default is 127.0.0.1:8080.
fn listen_addr() -> Result<SocketAddr, std::io::Error> {
    let raw = match std::env::var("MOCK_CANDLEPIN_ADDR") {
        Ok(addr) => addr,
        Err(_) => format!("127.0.0.1:{}", std::env::var("PORT").as_deref().unwrap_or("8080")),
    };
    raw.parse()
        .map_err(|e| std::io::Error::new(std::io::ErrorKind::InvalidInput, format!("{raw}: {e}")))
}

#[tokio::main]
async fn main() -> Result<(), std::io::Error> {
    let listener = TcpListener::bind(listen_addr()?).await?;
    let addr = listener.local_addr()?;
    println!("mock candlepin on http://{addr}{}", mock_server::BASE_PATH);
    println!("owner {}, registration tokens token-<product>", mock_server::OWNER);
    mock_server::run(listener).await
}
