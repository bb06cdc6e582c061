use anyhow::Result;
use sprout::cli;

#[tokio::main]
async fn main() -> Result<()> {
    cli::run().await
}
