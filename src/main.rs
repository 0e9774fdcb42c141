use std::path::PathBuf;
use std::sync::Arc;

use anyhow::{Context, Result};
use clap::Parser;
use tracing::{info, warn};

use employee_search::config::{generate_sample_config, AppConfig, ConfigLoader, ConfigOverrides, StoreBackend};
use employee_search::http_server;
use employee_search::logging::init_logging;
use employee_search::store::{seed_if_empty, EmployeeStore, InMemoryEmployeeStore};
use employee_search::{EmployeeSearchService, QueryCompiler};

#[derive(Parser, Debug)]
#[command(name = "employee-search", version, about = "Natural-language employee search API")]
struct Cli {
    /// Configuration file (TOML)
    #[arg(short, long, env = "EMPLOYEE_SEARCH_CONFIG")]
    config: Option<PathBuf>,

    /// Listen address, e.g. 0.0.0.0:5000
    #[arg(long)]
    bind: Option<String>,

    /// Log filter (trace, debug, info, warn, error)
    #[arg(long)]
    log_level: Option<String>,

    /// Record store backend
    #[arg(long, value_enum)]
    store: Option<StoreBackend>,

    /// Write a sample configuration file and exit
    #[arg(long, value_name = "PATH")]
    generate_config: Option<PathBuf>,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    if let Some(path) = &cli.generate_config {
        generate_sample_config(path)?;
        println!("Sample configuration written to {}", path.display());
        return Ok(());
    }

    let config = ConfigLoader::new()
        .load_from_file(cli.config.clone())
        .load_from_env()
        .load_legacy_env()
        .with_overrides(ConfigOverrides {
            bind_addr: cli.bind.clone(),
            log_level: cli.log_level.clone(),
            store_backend: cli.store,
        })
        .build()?;

    let _log_guard = init_logging(&config.logging)?;
    info!(version = env!("CARGO_PKG_VERSION"), "starting employee-search");

    let store = build_store(&config).await?;

    if config.store.seed_when_empty {
        match seed_if_empty(store.as_ref(), config.store.seed_count).await {
            Ok(0) => {}
            Ok(inserted) => info!(inserted, "store was empty, sample employees added"),
            Err(e) => warn!(error = %e, "failed to seed sample employees"),
        }
    }

    let compiler = QueryCompiler::new(&config.to_compiler_settings()?)?;
    let service = EmployeeSearchService::new(Arc::new(compiler), store);

    let app = http_server::router(service, config.server.cors_enabled);
    http_server::serve(config.bind_socket_addr()?, app).await?;

    Ok(())
}

async fn build_store(config: &AppConfig) -> Result<Arc<dyn EmployeeStore>> {
    match config.store.backend {
        StoreBackend::Memory => {
            info!("using in-memory employee store");
            Ok(Arc::new(InMemoryEmployeeStore::new()))
        }
        #[cfg(feature = "mongodb-backend")]
        StoreBackend::Mongodb => {
            let store = employee_search::store::MongoEmployeeStore::connect(&config.to_mongo_config())
                .await
                .context("Failed to connect to MongoDB")?;
            Ok(Arc::new(store))
        }
        #[cfg(not(feature = "mongodb-backend"))]
        StoreBackend::Mongodb => {
            anyhow::bail!("built without the mongodb-backend feature; use --store memory")
        }
    }
}
