#[tokio::main]
async fn main() -> std::io::Result<()> {
    mirror_auth::run_with_config().await
}
