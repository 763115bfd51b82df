use super::errors::ConfigError;
use super::models::{HandlerMode, HandlerSettings, LocalSettings, RemoteSettings, TempSettings};
use docstore_utils::is_valid_path;
use url::Url;

pub const FTP_SCHEME: &str = "ftp";

impl LocalSettings {
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !self.base_directory.is_empty() && !is_valid_path(&self.base_directory) {
            return Err(ConfigError::InvalidPath(format!(
                "local.base_directory could not be verified: {:?}",
                self.base_directory
            )));
        }
        Ok(())
    }
}

impl RemoteSettings {
    pub fn validate(&self) -> Result<(), ConfigError> {
        require("remote.url", &self.url)?;
        require("remote.username", &self.username)?;
        require("remote.password", &self.password)?;

        let url = Url::parse(&self.url)
            .map_err(|e| ConfigError::InvalidConfig(format!("remote.url '{}': {}", self.url, e)))?;
        if url.scheme() != FTP_SCHEME {
            return Err(ConfigError::InvalidConfig(format!(
                "remote.url must use the ftp scheme, got '{}'",
                url.scheme()
            )));
        }
        if url.host_str().is_none() {
            return Err(ConfigError::InvalidConfig(format!(
                "remote.url has no host: {}",
                self.url
            )));
        }
        Ok(())
    }
}

impl HandlerSettings {
    /// Checks that the settings for the selected mode are present and usable
    pub fn validate(&self) -> Result<(), ConfigError> {
        validate_mode(self.mode, self.local.as_ref(), self.remote.as_ref())
    }
}

impl TempSettings {
    pub fn validate(&self) -> Result<(), ConfigError> {
        validate_mode(self.mode, self.local.as_ref(), self.remote.as_ref())?;

        if self.mode == HandlerMode::Local {
            require("folder_name", &self.folder_name)?;

            let base = self
                .local
                .as_ref()
                .map(|local| local.base_directory.trim_end_matches(['/', '\\']))
                .unwrap_or_default();
            if !base.ends_with(self.folder_name.as_str()) {
                return Err(ConfigError::InvalidConfig(format!(
                    "local.base_directory '{}' must end with folder_name '{}'",
                    base, self.folder_name
                )));
            }
        }
        Ok(())
    }
}

fn validate_mode(
    mode: HandlerMode,
    local: Option<&LocalSettings>,
    remote: Option<&RemoteSettings>,
) -> Result<(), ConfigError> {
    match mode {
        HandlerMode::Local => local
            .ok_or_else(|| ConfigError::MissingField("local".to_string()))?
            .validate(),
        HandlerMode::Remote => remote
            .ok_or_else(|| ConfigError::MissingField("remote".to_string()))?
            .validate(),
    }
}

fn require(field: &str, value: &str) -> Result<(), ConfigError> {
    if value.trim().is_empty() {
        return Err(ConfigError::MissingField(field.to_string()));
    }
    Ok(())
}
