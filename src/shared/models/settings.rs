use std::{env, fs, io, path::PathBuf};
use serde::Deserialize;
use thiserror::Error;

const SETTINGS_FILENAME: &str = "settings.json";
const SETTINGS_PATH_VAR: &str = "TASKPILOT_SETTINGS";

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub tcp_socket_binding: String,
    pub tcp_socket_port: u16,
    pub database_path: String,
    pub jwt_secret: String,
    pub jwt_expiration_in_minutes: u64,
    pub log_filter: String,
}

#[derive(Debug, Error)]
pub enum SettingsError {
    #[error("cannot read settings file {path}: {source}")]
    Read { path: PathBuf, source: io::Error },
    #[error("cannot parse settings file {path}: {source}")]
    Parse { path: PathBuf, source: serde_json::Error },
    #[error("invalid value for {var}: {value}")]
    Env { var: &'static str, value: String },
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            tcp_socket_binding: "0.0.0.0".to_string(),
            tcp_socket_port: 8000,
            database_path: "taskpilot.redb".to_string(),
            jwt_secret: "change-me-before-deploying".to_string(),
            jwt_expiration_in_minutes: 24 * 60,
            log_filter: "info".to_string(),
        }
    }
}

impl Settings {
    /// Read `settings.json` (or the file named by `TASKPILOT_SETTINGS`), then
    /// apply environment overrides. A missing default file means defaults.
    pub fn load() -> Result<Settings, SettingsError> {
        let explicit = env::var_os(SETTINGS_PATH_VAR).map(PathBuf::from);
        let path = explicit.clone().unwrap_or_else(|| PathBuf::from(SETTINGS_FILENAME));

        let mut settings = match fs::read_to_string(&path) {
            Ok(content) => Self::from_json(&content)
                .map_err(|source| SettingsError::Parse { path: path.clone(), source })?,
            Err(e) if e.kind() == io::ErrorKind::NotFound && explicit.is_none() => {
                Settings::default()
            }
            Err(source) => return Err(SettingsError::Read { path, source }),
        };

        settings.apply_env_overrides()?;
        Ok(settings)
    }

    pub fn from_json(content: &str) -> Result<Settings, serde_json::Error> {
        serde_json::from_str(content)
    }

    fn apply_env_overrides(&mut self) -> Result<(), SettingsError> {
        if let Ok(secret) = env::var("TASKPILOT_JWT_SECRET") {
            self.jwt_secret = secret;
        }
        if let Ok(path) = env::var("TASKPILOT_DATABASE_PATH") {
            self.database_path = path;
        }
        if let Ok(port) = env::var("TASKPILOT_PORT") {
            self.tcp_socket_port = port
                .parse()
                .map_err(|_| SettingsError::Env { var: "TASKPILOT_PORT", value: port.clone() })?;
        }
        Ok(())
    }

    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.tcp_socket_binding, self.tcp_socket_port)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn partial_file_keeps_defaults() {
        let settings = Settings::from_json(r#"{ "tcp_socket_port": 9100 }"#).unwrap();
        assert_eq!(settings.tcp_socket_port, 9100);
        assert_eq!(settings.tcp_socket_binding, "0.0.0.0");
        assert_eq!(settings.jwt_expiration_in_minutes, 1440);
        assert_eq!(settings.bind_address(), "0.0.0.0:9100");
    }

    #[test]
    fn malformed_file_is_an_error() {
        assert!(Settings::from_json("{ not json").is_err());
    }
}
