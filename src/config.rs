//! Service configuration
//!
//! Sources, lowest precedence first: built-in defaults, a TOML file,
//! `EMPLOYEE_SEARCH__*` environment variables, the legacy `MONGO_URI` /
//! `PORT` variables, and command line flags.

pub mod loader;
pub mod types;

pub use loader::{ConfigLoader, ConfigOverrides};
pub use types::{AppConfig, SearchConfig, ServerConfig, StoreBackend, StoreConfig};

use anyhow::{Context, Result};
use std::path::Path;

/// Writes a commented sample configuration file
pub fn generate_sample_config(path: &Path) -> Result<()> {
    let toml_content =
        toml::to_string_pretty(&AppConfig::default()).context("Failed to serialize sample config")?;

    let sample_content = format!(
        r#"# employee-search configuration file
#
# Save as employee-search.toml (or config/employee-search.toml).
# Every key can be overridden from the environment, e.g.
#   EMPLOYEE_SEARCH__SERVER__BIND_ADDR=127.0.0.1:8080
#   EMPLOYEE_SEARCH__SEARCH__BLOCKED_TERMS=bonus,payroll
# MONGO_URI and PORT are also honored.

{}
# [server]
# bind_addr = listen address
# cors_enabled = allow any origin (GET, POST, PUT, DELETE)
#
# [store]
# backend = "mongodb" or "memory"
# seed_when_empty = insert seed_count sample employees into an empty store
#
# [search]
# numeral_window = tokens searched around salary/age/year words
# blocked_terms = terms rejected in addition to the built-in list
# [search.extra_terms]
# skill = ["Rust", "Go"]   (categories: state, department, skill, education)
#
# [logging]
# level = trace, debug, info, warn, error or an EnvFilter directive
# format = "pretty" or "json"
# file_dir = directory for rolling log files (console only when absent)
# rotation = "daily", "hourly" or "never"
"#,
        toml_content
    );

    std::fs::write(path, sample_content)
        .with_context(|| format!("Failed to write {}", path.display()))?;
    Ok(())
}
