//! Environment variable handling and .env file management

use crate::error::{AppError, Result};
use crate::logging::Logger;
use std::path::Path;

/// Environment variable configuration manager
pub struct EnvManager;

impl EnvManager {
    /// Load `path` into the process environment if it exists
    ///
    /// Variables already set in the environment win over the file. Returns
    /// whether a file was loaded.
    pub fn load_env_file(path: &Path, logger: &Logger) -> Result<bool> {
        if !path.exists() {
            logger
                .debug("No .env file found, using defaults and CLI arguments")
                .field("path", path.display().to_string())
                .log();
            return Ok(false);
        }

        dotenv::from_path(path)
            .map_err(|e| AppError::config(format!("Failed to load {}: {}", path.display(), e)))?;

        logger
            .debug("Loaded configuration from .env file")
            .field("path", path.display().to_string())
            .log();
        Ok(true)
    }

    /// Validate one variable's format before it is merged
    pub fn validate_env_var(key: &str, value: &str) -> Result<()> {
        match key {
            "NETDIAG_HOST" => {
                let host = value.trim();
                if host.is_empty() || host.starts_with('-') || host.chars().any(char::is_whitespace) {
                    return Err(AppError::config(format!("Invalid NETDIAG_HOST value '{}'", value)));
                }
            }
            "NETDIAG_PORTS" => {
                let ports = crate::models::config::parse_port_list(value)
                    .map_err(|e| AppError::config(format!("Invalid NETDIAG_PORTS value '{}': {}", value, e)))?;
                if ports.is_empty() || ports.contains(&0) {
                    return Err(AppError::config(format!("NETDIAG_PORTS must list ports between 1 and 65535, got: {}", value)));
                }
            }
            "NETDIAG_PING_COUNT" => {
                let count: u32 = value.trim().parse()
                    .map_err(|e| AppError::config(format!("Invalid NETDIAG_PING_COUNT value '{}': {}", value, e)))?;
                if count == 0 || count > 100 {
                    return Err(AppError::config(format!("NETDIAG_PING_COUNT must be between 1 and 100, got: {}", count)));
                }
            }
            "NETDIAG_TIMEOUT" => {
                let timeout: u64 = value.trim().parse()
                    .map_err(|e| AppError::config(format!("Invalid NETDIAG_TIMEOUT value '{}': {}", value, e)))?;
                if timeout == 0 || timeout > 60 {
                    return Err(AppError::config(format!("NETDIAG_TIMEOUT must be between 1 and 60, got: {}", timeout)));
                }
            }
            "NETDIAG_DNS_SERVERS" => {
                for server in crate::models::config::split_list(value) {
                    server.parse::<std::net::IpAddr>()
                        .map_err(|e| AppError::config(format!("Invalid NETDIAG_DNS_SERVERS entry '{}': {}", server, e)))?;
                }
            }
            "NETDIAG_ENABLE_COLOR" => {
                value.trim().parse::<bool>()
                    .map_err(|e| AppError::config(format!("Invalid NETDIAG_ENABLE_COLOR value '{}': {}", value, e)))?;
            }
            _ => {}
        }

        Ok(())
    }

    /// Check an env file without loading it; `None` when it does not exist
    pub fn check_env_file(path: &Path) -> Result<Option<Vec<String>>> {
        if !path.exists() {
            return Ok(None);
        }

        let content = std::fs::read_to_string(path)
            .map_err(|e| AppError::config(format!("Failed to read {}: {}", path.display(), e)))?;

        let warnings = content
            .lines()
            .map(str::trim)
            .filter(|line| !line.is_empty() && !line.starts_with('#'))
            .filter_map(|line| {
                let (key, value) = line.split_once('=')?;
                Self::validate_env_var(key.trim(), value.trim())
                    .err()
                    .map(|e| format!("Line '{}': {}", line, e))
            })
            .collect();

        Ok(Some(warnings))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn test_validate_env_var() {
        assert!(EnvManager::validate_env_var("NETDIAG_HOST", "example.com").is_ok());
        assert!(EnvManager::validate_env_var("NETDIAG_PORTS", "80, 443").is_ok());
        assert!(EnvManager::validate_env_var("NETDIAG_PING_COUNT", "4").is_ok());
        assert!(EnvManager::validate_env_var("NETDIAG_TIMEOUT", "2").is_ok());
        assert!(EnvManager::validate_env_var("NETDIAG_DNS_SERVERS", "1.1.1.1,::1").is_ok());
        assert!(EnvManager::validate_env_var("NETDIAG_ENABLE_COLOR", "false").is_ok());
        assert!(EnvManager::validate_env_var("UNRELATED", "anything").is_ok());

        assert!(EnvManager::validate_env_var("NETDIAG_HOST", "two words").is_err());
        assert!(EnvManager::validate_env_var("NETDIAG_HOST", "-f").is_err());
        assert!(EnvManager::validate_env_var("NETDIAG_PORTS", "0").is_err());
        assert!(EnvManager::validate_env_var("NETDIAG_PORTS", "http").is_err());
        assert!(EnvManager::validate_env_var("NETDIAG_PING_COUNT", "101").is_err());
        assert!(EnvManager::validate_env_var("NETDIAG_TIMEOUT", "0").is_err());
        assert!(EnvManager::validate_env_var("NETDIAG_DNS_SERVERS", "dns.google").is_err());
        assert!(EnvManager::validate_env_var("NETDIAG_ENABLE_COLOR", "maybe").is_err());
    }

    #[test]
    fn test_missing_env_file_is_not_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join(".env");
        assert!(!EnvManager::load_env_file(&path, &Logger::new("test")).unwrap());
        assert!(EnvManager::check_env_file(&path).unwrap().is_none());
    }

    #[test]
    fn test_check_env_file_reports_bad_lines() {
        let mut file = NamedTempFile::new().unwrap();
        writeln!(file, "# comment").unwrap();
        writeln!(file, "NETDIAG_PING_COUNT=4").unwrap();
        writeln!(file, "NETDIAG_TIMEOUT=600").unwrap();

        let warnings = EnvManager::check_env_file(file.path()).unwrap().unwrap();
        assert_eq!(warnings.len(), 1);
        assert!(warnings[0].contains("NETDIAG_TIMEOUT=600"));
    }
}
