#[tokio::main]
async fn main() {
    if let Err(e) = angor_indexer::cli::run().await {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}
