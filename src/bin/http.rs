#[cfg(feature = "http_api")]
#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    use presence_analyzer::{Config, DatasetCache, http_api, logging};

    logging::init_tracing();

    let config = Config::from_env();
    tracing::info!(
        source = %config.data_csv.display(),
        ttl_seconds = config.cache_ttl_seconds,
        "presence-analyzer HTTP API starting"
    );
    let cache = DatasetCache::new(config.data_csv.clone(), config.cache_ttl());
    http_api::serve(config.http_addr, cache).await?;
    Ok(())
}

#[cfg(not(feature = "http_api"))]
fn main() {
    eprintln!("Rebuild with the `http_api` feature to enable the HTTP server.");
}
