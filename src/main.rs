use std::io::Result;

#[tokio::main]
async fn main() -> Result<()> {
    beast_hunt_server::run_with_config().await
}
