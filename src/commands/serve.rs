use anyhow::Result;

use crate::server;

/// Run the HTTP server
pub async fn run(host: &str, port: u16) -> Result<()> {
    server::run_server(host, port).await
}
