use dotenvy::dotenv;

mod api {
    pub mod basket {
        pub mod dto;
        pub mod error_mapper;
        pub mod routes;
    }
    pub mod correlation;
    pub mod error;
    pub mod health {
        pub mod routes;
    }
    pub mod tags;
}
mod config {
    pub mod app_config;
    pub mod basket_config;
    pub mod cors_config;
    pub mod server_config;
}
mod setup {
    pub mod dependency_injection;
    pub mod server;
}

use config::app_config::AppConfig;
use setup::{dependency_injection::DependencyContainer, server::Server};

/// Basket service entry point
///
/// - config/: environment driven settings (server, CORS, basket store)
/// - setup/: dependency wiring and the HTTP server
/// - api/: routes, DTOs and error mapping
#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // 1. Initialize tracing with RUST_LOG env filter
    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info"));
    tracing_subscriber::fmt().with_env_filter(env_filter).init();

    // 2. Load environment variables
    dotenv().ok();

    // 3. Load configuration
    let config = AppConfig::from_env();

    // 4. Wire dependencies against the configured store
    let container = DependencyContainer::new(&config.basket).await?;

    // 5. Run server
    Server::run(config, container).await?;

    Ok(())
}
