#[tokio::main]
async fn main() -> anyhow::Result<()> {
    floodgate_cli::run().await
}
