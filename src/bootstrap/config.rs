use anyhow::{Context, Result};
use colored::Colorize;
use docstore_config::Config;

pub const CONFIG_ENV: &str = "DOCSTORE_CONFIG";
pub const DEFAULT_CONFIG_PATH: &str = "docstore.toml";

/// `--config` wins over the environment, which wins over the default path
pub fn resolve_path(flag: Option<String>) -> String {
    flag.or_else(|| std::env::var(CONFIG_ENV).ok())
        .unwrap_or_else(|| DEFAULT_CONFIG_PATH.to_string())
}

pub async fn load(config_path: &str) -> Result<Config> {
    eprintln!("  {} {}", "Loading config".dimmed(), config_path.cyan());

    let config = Config::from_file(config_path)
        .await
        .with_context(|| format!("Failed to load configuration from {}", config_path))?;
    config.handler.validate()?;

    eprintln!("  {} {} mode", "✓".green(), config.handler.mode.to_string().cyan());
    Ok(config)
}
