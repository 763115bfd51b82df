use serde::{Deserialize, Serialize};
use std::fmt;

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct Config {
    #[serde(default)]
    pub handler: HandlerSettings,
    #[serde(default = "super::defaults::temp_settings")]
    pub temp: TempSettings,
}

/// Selects which storage medium a handler talks to
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum HandlerMode {
    /// Files under a base directory on the host filesystem
    #[default]
    #[serde(alias = "file")]
    Local,
    /// Files on an FTP server
    #[serde(alias = "ftp")]
    Remote,
}

impl fmt::Display for HandlerMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            HandlerMode::Local => f.write_str("local"),
            HandlerMode::Remote => f.write_str("remote"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct LocalSettings {
    /// Every path handed to the local backend is joined onto this directory.
    /// Empty means the working directory.
    pub base_directory: String,
}

impl LocalSettings {
    pub fn new(base_directory: impl Into<String>) -> Self {
        Self {
            base_directory: base_directory.into(),
        }
    }
}

#[derive(Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct RemoteSettings {
    /// Base URL, e.g. `ftp://ftp.example.com:21/documents`
    #[serde(default)]
    pub url: String,
    #[serde(default)]
    pub username: String,
    #[serde(default)]
    pub password: String,
}

impl RemoteSettings {
    /// Builds remote settings, rejecting blank fields up front
    pub fn new(
        url: impl Into<String>,
        username: impl Into<String>,
        password: impl Into<String>,
    ) -> Result<Self, super::ConfigError> {
        let settings = Self {
            url: url.into(),
            username: username.into(),
            password: password.into(),
        };
        settings.validate()?;
        Ok(settings)
    }
}

impl fmt::Debug for RemoteSettings {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RemoteSettings")
            .field("url", &self.url)
            .field("username", &self.username)
            .field("password", &"***")
            .finish()
    }
}

/// Settings consumed when a document handler is constructed
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct HandlerSettings {
    #[serde(default)]
    pub mode: HandlerMode,
    #[serde(default)]
    pub local: Option<LocalSettings>,
    #[serde(default)]
    pub remote: Option<RemoteSettings>,
}

impl HandlerSettings {
    pub fn local(settings: LocalSettings) -> Self {
        Self {
            mode: HandlerMode::Local,
            local: Some(settings),
            remote: None,
        }
    }

    pub fn remote(settings: RemoteSettings) -> Self {
        Self {
            mode: HandlerMode::Remote,
            local: None,
            remote: Some(settings),
        }
    }
}

impl Default for HandlerSettings {
    fn default() -> Self {
        Self::local(super::defaults::local_settings())
    }
}

/// Settings for the temp-scoped handler
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct TempSettings {
    #[serde(default)]
    pub mode: HandlerMode,
    #[serde(default)]
    pub local: Option<LocalSettings>,
    #[serde(default)]
    pub remote: Option<RemoteSettings>,
    /// Local mode: the base directory must end with this token.
    /// Remote mode: every path is placed under a folder of this name.
    #[serde(default = "super::defaults::temp_folder_name")]
    pub folder_name: String,
}

impl TempSettings {
    /// Settings for the handler that backs the temp scope
    pub fn to_handler_settings(&self) -> HandlerSettings {
        HandlerSettings {
            mode: self.mode,
            local: self.local.clone(),
            remote: self.remote.clone(),
        }
    }
}

impl Default for TempSettings {
    fn default() -> Self {
        super::defaults::temp_settings()
    }
}
