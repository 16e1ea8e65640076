use serde::Serialize;
use std::env;
use std::fmt;
use std::path::{Path, PathBuf};
use thiserror::Error;

const DEFAULT_PROJECT_DIR: &str = ".";
const DEFAULT_MODULE_DIR: &str = "app";
const DEFAULT_CREDENTIAL_FILE: &str = "google-services.json";
const DEFAULT_PROPERTIES_FILE: &str = "local.properties";
const DEFAULT_SECRET_KEY: &str = "MAPS_API_KEY";
const DEFAULT_PLACEHOLDER_NAME: &str = "MAPS_API_KEY";
const DEFAULT_PLUGIN_ID: &str = "com.google.gms.google-services";
const DEFAULT_LOG_LEVEL: &str = "info";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Configuration validation failed: {0}")]
    ValidationFailed(String),
}

/// Where the two inputs live and what the resolver looks up in them.
///
/// The credential file is resolved against the module directory (the Gradle
/// `app` project), the properties file against the root project directory.
#[derive(Debug, Clone, Serialize)]
pub struct BuildgateConfig {
    pub project_dir: PathBuf,
    pub module_dir: PathBuf,
    pub credential_file: PathBuf,
    pub properties_file: PathBuf,
    pub secret_key: String,
    pub placeholder_name: String,
    pub plugin_id: String,
    pub log_level: String,
}

impl Default for BuildgateConfig {
    fn default() -> Self {
        let path_var = |name: &str, default: &str| {
            env::var(name)
                .ok()
                .filter(|v| !v.is_empty())
                .map(PathBuf::from)
                .unwrap_or_else(|| PathBuf::from(default))
        };
        let string_var = |name: &str, default: &str| {
            env::var(name).unwrap_or_else(|_| default.to_string())
        };

        let log_level = string_var("BUILDGATE_LOG_LEVEL", DEFAULT_LOG_LEVEL).to_lowercase();

        Self {
            project_dir: path_var("BUILDGATE_PROJECT_DIR", DEFAULT_PROJECT_DIR),
            module_dir: path_var("BUILDGATE_MODULE_DIR", DEFAULT_MODULE_DIR),
            credential_file: path_var("BUILDGATE_CREDENTIAL_FILE", DEFAULT_CREDENTIAL_FILE),
            properties_file: path_var("BUILDGATE_PROPERTIES_FILE", DEFAULT_PROPERTIES_FILE),
            secret_key: string_var("BUILDGATE_SECRET_KEY", DEFAULT_SECRET_KEY),
            placeholder_name: string_var("BUILDGATE_PLACEHOLDER_NAME", DEFAULT_PLACEHOLDER_NAME),
            plugin_id: string_var("BUILDGATE_PLUGIN_ID", DEFAULT_PLUGIN_ID),
            log_level,
        }
    }
}

impl BuildgateConfig {
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.secret_key.trim().is_empty() {
            return Err(ConfigError::ValidationFailed(
                "Secret key name cannot be empty".to_string(),
            ));
        }
        if self.placeholder_name.trim().is_empty() {
            return Err(ConfigError::ValidationFailed(
                "Placeholder name cannot be empty".to_string(),
            ));
        }
        if self.plugin_id.trim().is_empty() {
            return Err(ConfigError::ValidationFailed(
                "Plugin id cannot be empty".to_string(),
            ));
        }

        check_relative("Credential file", &self.credential_file)?;
        check_relative("Properties file", &self.properties_file)?;
        if self.module_dir.is_absolute() {
            return Err(ConfigError::ValidationFailed(format!(
                "Module directory must be relative to the project: {}",
                self.module_dir.display()
            )));
        }

        match self.log_level.as_str() {
            "trace" | "debug" | "info" | "warn" | "error" => {}
            _ => {
                return Err(ConfigError::ValidationFailed(format!(
                    "Invalid log level: {}. Valid options: trace, debug, info, warn, error",
                    self.log_level
                )))
            }
        }

        Ok(())
    }

    /// Full path of the credential file: `<project>/<module>/<credential_file>`
    pub fn credential_path(&self) -> PathBuf {
        self.project_dir
            .join(&self.module_dir)
            .join(&self.credential_file)
    }

    /// Full path of the local properties file: `<project>/<properties_file>`
    pub fn properties_path(&self) -> PathBuf {
        self.project_dir.join(&self.properties_file)
    }
}

fn check_relative(label: &str, path: &Path) -> Result<(), ConfigError> {
    if path.as_os_str().is_empty() {
        return Err(ConfigError::ValidationFailed(format!(
            "{} name cannot be empty",
            label
        )));
    }
    if path.is_absolute() {
        return Err(ConfigError::ValidationFailed(format!(
            "{} must be relative to the project: {}",
            label,
            path.display()
        )));
    }
    Ok(())
}

impl fmt::Display for BuildgateConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Buildgate Configuration:")?;
        writeln!(f, "  Project Dir: {}", self.project_dir.display())?;
        writeln!(f, "  Credential File: {}", self.credential_path().display())?;
        writeln!(f, "  Properties File: {}", self.properties_path().display())?;
        writeln!(f, "  Secret Key: {}", self.secret_key)?;
        writeln!(f, "  Placeholder: {}", self.placeholder_name)?;
        writeln!(f, "  Plugin: {}", self.plugin_id)?;
        writeln!(f, "  Log Level: {}", self.log_level)?;
        Ok(())
    }
}
