/// Default values for configuration fields
use super::models::{HandlerMode, LocalSettings, TempSettings};
use std::path::PathBuf;

pub const DEFAULT_TEMP_FOLDER_NAME: &str = "docstore.temp-files";

const DEFAULT_DOCUMENTS_FOLDER: &str = "Handled Documents";

/// `<directory of the running executable>/Handled Documents`
pub fn local_settings() -> LocalSettings {
    let base = std::env::current_exe()
        .ok()
        .and_then(|exe| exe.parent().map(|dir| dir.join(DEFAULT_DOCUMENTS_FOLDER)))
        .unwrap_or_else(|| PathBuf::from(DEFAULT_DOCUMENTS_FOLDER));

    LocalSettings::new(base.to_string_lossy())
}

pub fn temp_folder_name() -> String {
    DEFAULT_TEMP_FOLDER_NAME.to_string()
}

/// `<os temp dir>/docstore.temp-files`
pub fn temp_settings() -> TempSettings {
    let base = std::env::temp_dir().join(DEFAULT_TEMP_FOLDER_NAME);

    TempSettings {
        mode: HandlerMode::Local,
        local: Some(LocalSettings::new(base.to_string_lossy())),
        remote: None,
        folder_name: temp_folder_name(),
    }
}

pub const DEFAULT_CONFIG_TEMPLATE: &str = r#"# ===============================================================================
# docstore Configuration
# ===============================================================================

[handler]
mode = "local"                       # Storage medium: "local" or "remote" (FTP)

[handler.local]
base_directory = "documents"         # All paths are resolved under this directory

# Only used if mode = "remote"
#[handler.remote]
#url = "ftp://ftp.example.com/documents"
#username = "docstore"
#password = ""

# ===============================================================================
# TEMP FILES
# ===============================================================================
# Omit this section to use "<os temp dir>/docstore.temp-files".
# In local mode base_directory must end with folder_name.

#[temp]
#mode = "local"
#folder_name = "docstore.temp-files"
#
#[temp.local]
#base_directory = "/tmp/docstore.temp-files"
"#;
