use anyhow::Result;
use clap::Parser;
use sales_tracker::backend::config::AppConfig;
use sales_tracker::backend::storage::staff_accounts::hash_password;
use sales_tracker::backend::{create_router, initialize_backend};
use sales_tracker::cli::{Cli, Commands};
use tracing::info;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    if let Some(Commands::HashPassword { password }) = &cli.command {
        println!("{}", hash_password(password)?);
        return Ok(());
    }

    let config = match &cli.config {
        Some(path) => AppConfig::load_from(path)?,
        None => AppConfig::load()?,
    };

    // RUST_LOG wins over the configured level
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&config.log_level));
    tracing_subscriber::fmt().with_env_filter(filter).init();

    let state = initialize_backend(&config).await?;
    let app = create_router(state, &config);

    let addr = config.socket_addr()?;
    let listener = tokio::net::TcpListener::bind(addr).await?;
    info!("Listening on {}", addr);

    axum::serve(listener, app).await?;

    Ok(())
}
