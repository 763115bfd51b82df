use super::defaults::DEFAULT_CONFIG_TEMPLATE;
use super::errors::ConfigError;
use super::models::Config;
use std::path::Path;

impl Config {
    /// Loads configuration from a file, writing the default template first if
    /// the file does not exist yet
    pub async fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let path = path.as_ref();

        if !path.exists() {
            create_default_config(path).await?;
            tracing::info!("Created default configuration at: {}", path.display());
        }

        let content = tokio::fs::read_to_string(path).await?;
        Self::parse(&content)
    }

    /// Parses configuration from TOML text
    pub fn parse(content: &str) -> Result<Self, ConfigError> {
        let config: Config = toml::from_str(content)?;
        Ok(config)
    }
}

/// Creates a default configuration file
async fn create_default_config(path: &Path) -> Result<(), ConfigError> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        tokio::fs::create_dir_all(parent).await?;
    }
    tokio::fs::write(path, DEFAULT_CONFIG_TEMPLATE).await?;
    Ok(())
}
