use std::path::PathBuf;

use kc_core::{
    app_dirs::AppDirs,
    ports::{AppDirsError, AppDirsPort},
};

const APP_DIR_NAME: &str = "ku-check";
const LOG_DIR_NAME: &str = "logs";

/// `KC_PROFILE` isolates data of parallel dev instances.
fn resolved_app_dir_name() -> String {
    match std::env::var("KC_PROFILE") {
        Ok(profile) if !profile.is_empty() => format!("{APP_DIR_NAME}-{profile}"),
        _ => APP_DIR_NAME.to_string(),
    }
}

/// Resolves application directories from the OS data-local directory.
#[derive(Debug, Default)]
pub struct DirsAppDirsAdapter {
    base_data_local_dir_override: Option<PathBuf>,
}

impl DirsAppDirsAdapter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Use `base` instead of the system data-local directory.
    ///
    /// Mobile targets have no meaningful `dirs::data_local_dir()`; the shell
    /// passes the sandbox directory from Tauri's path resolver here when it
    /// sets up file logging.
    pub fn with_base_data_local_dir(base: PathBuf) -> Self {
        Self {
            base_data_local_dir_override: Some(base),
        }
    }

    pub fn base_data_local_dir(&self) -> Option<PathBuf> {
        if let Some(base) = &self.base_data_local_dir_override {
            return Some(base.clone());
        }
        dirs::data_local_dir()
    }
}

impl AppDirsPort for DirsAppDirsAdapter {
    fn get_app_dirs(&self) -> Result<AppDirs, AppDirsError> {
        let base_data = self
            .base_data_local_dir()
            .ok_or(AppDirsError::DataLocalDirUnavailable)?;
        let app_data_root = base_data.join(resolved_app_dir_name());

        Ok(AppDirs {
            app_log_root: app_data_root.join(LOG_DIR_NAME),
            app_data_root,
        })
    }
}
