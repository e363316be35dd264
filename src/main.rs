use letter_lens::api;
use letter_lens::config::ServerConfig;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .with_target(false)
        .init();

    let config = ServerConfig::from_env().inspect_err(|e| {
        tracing::error!(error = %e, "Invalid configuration");
    })?;

    eprintln!("📮 Letter Lens v{}", env!("CARGO_PKG_VERSION"));
    eprintln!("   Health:  http://{}/health", config.bind_addr());
    eprintln!("   Explain: http://{}/explain", config.bind_addr());
    eprintln!("   Max body: {} bytes\n", config.max_body_bytes);

    if let Err(e) = api::serve(config).await {
        tracing::error!(error = %e, "Server stopped");
        return Err(e.into());
    }

    Ok(())
}
