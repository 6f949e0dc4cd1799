//! Configuration data model and validation

use crate::types::{AppError, Result};
use serde::{Deserialize, Serialize};
use std::net::IpAddr;
use std::str::FromStr;
use std::time::Duration;

/// How the report is rendered
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    /// Human-readable sections
    Text,
    /// Pretty-printed JSON
    Json,
}

/// Main application configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Host to diagnose
    #[serde(default = "default_host")]
    pub host: String,

    /// TCP ports to probe, in report order
    #[serde(default = "default_ports")]
    pub ports: Vec<u16>,

    /// Echo requests sent by ping
    #[serde(default = "default_ping_count")]
    pub ping_count: u32,

    /// Connect timeout for each port probe
    #[serde(default = "default_timeout_secs")]
    pub timeout_seconds: u64,

    /// DNS servers to query instead of the system resolver
    #[serde(default)]
    pub dns_servers: Vec<String>,

    /// Probe ports concurrently
    #[serde(default)]
    pub parallel_ports: bool,

    #[serde(default = "default_output_format")]
    pub output_format: OutputFormat,

    /// Enable colored terminal output
    #[serde(default = "default_enable_color")]
    pub enable_color: bool,

    /// Emit raw ping output to the log before parsing
    #[serde(default = "default_trace_ping_output")]
    pub trace_ping_output: bool,

    /// Enable verbose output
    #[serde(default)]
    pub verbose: bool,

    /// Enable debug output
    #[serde(default)]
    pub debug: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            host: default_host(),
            ports: default_ports(),
            ping_count: default_ping_count(),
            timeout_seconds: default_timeout_secs(),
            dns_servers: Vec::new(),
            parallel_ports: false,
            output_format: default_output_format(),
            enable_color: default_enable_color(),
            trace_ping_output: default_trace_ping_output(),
            verbose: false,
            debug: false,
        }
    }
}

impl Config {
    /// Create a new configuration with default values
    pub fn new() -> Self {
        Self::default()
    }

    /// Port connect timeout as Duration
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_seconds)
    }

    /// Validate the configuration and return the first problem found
    pub fn validate(&self) -> Result<()> {
        let host = self.host.trim();
        if host.is_empty() {
            return Err(AppError::config("Host cannot be empty"));
        }
        if host.chars().any(char::is_whitespace) {
            return Err(AppError::config(format!("Invalid host '{}': contains whitespace", self.host)));
        }
        // ping would read it as an option
        if host.starts_with('-') {
            return Err(AppError::config(format!("Invalid host '{}': cannot start with '-'", self.host)));
        }

        if self.ports.is_empty() {
            return Err(AppError::config("At least one port must be specified"));
        }
        if self.ports.contains(&0) {
            return Err(AppError::config("Port 0 is not a valid TCP port"));
        }

        if self.ping_count == 0 {
            return Err(AppError::config("Ping count must be greater than 0"));
        }
        if self.ping_count > 100 {
            return Err(AppError::config("Ping count cannot exceed 100"));
        }

        if self.timeout_seconds == 0 {
            return Err(AppError::config("Timeout must be greater than 0"));
        }
        if self.timeout_seconds > 60 {
            return Err(AppError::config("Timeout cannot exceed 60 seconds"));
        }

        for dns_server in &self.dns_servers {
            if IpAddr::from_str(dns_server).is_err() {
                return Err(AppError::config(format!("Invalid DNS server IP address: {}", dns_server)));
            }
        }

        Ok(())
    }

    /// Parsed DNS server addresses
    pub fn dns_server_addrs(&self) -> Result<Vec<IpAddr>> {
        self.dns_servers
            .iter()
            .map(|s| IpAddr::from_str(s).map_err(AppError::from))
            .collect()
    }

    /// Merge `NETDIAG_*` environment variables into this configuration
    pub fn merge_from_env(&mut self) -> Result<()> {
        if let Ok(host) = std::env::var("NETDIAG_HOST") {
            let host = host.trim();
            if !host.is_empty() {
                self.host = host.to_string();
            }
        }

        if let Ok(ports) = std::env::var("NETDIAG_PORTS") {
            self.ports = parse_port_list(&ports)
                .map_err(|e| AppError::config(format!("Invalid NETDIAG_PORTS value '{}': {}", ports, e)))?;
        }

        if let Ok(count) = std::env::var("NETDIAG_PING_COUNT") {
            self.ping_count = count.trim().parse()
                .map_err(|e| AppError::config(format!("Invalid NETDIAG_PING_COUNT value '{}': {}", count, e)))?;
        }

        if let Ok(timeout) = std::env::var("NETDIAG_TIMEOUT") {
            self.timeout_seconds = timeout.trim().parse()
                .map_err(|e| AppError::config(format!("Invalid NETDIAG_TIMEOUT value '{}': {}", timeout, e)))?;
        }

        if let Ok(dns_servers) = std::env::var("NETDIAG_DNS_SERVERS") {
            self.dns_servers = split_list(&dns_servers);
        }

        if let Ok(enable_color) = std::env::var("NETDIAG_ENABLE_COLOR") {
            self.enable_color = enable_color.trim().parse()
                .map_err(|e| AppError::config(format!("Invalid NETDIAG_ENABLE_COLOR value '{}': {}", enable_color, e)))?;
        }

        Ok(())
    }
}

/// Parse a comma-separated port list such as `"80, 443,22"`
pub fn parse_port_list(value: &str) -> Result<Vec<u16>> {
    split_list(value)
        .iter()
        .map(|p| p.parse::<u16>().map_err(AppError::from))
        .collect()
}

pub(crate) fn split_list(value: &str) -> Vec<String> {
    value
        .split(',')
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty())
        .collect()
}

// Default value functions for serde
fn default_host() -> String {
    crate::defaults::DEFAULT_HOST.to_string()
}

fn default_ports() -> Vec<u16> {
    crate::defaults::DEFAULT_PORTS.to_vec()
}

fn default_ping_count() -> u32 {
    crate::defaults::DEFAULT_PING_COUNT
}

fn default_timeout_secs() -> u64 {
    crate::defaults::DEFAULT_PORT_TIMEOUT.as_secs()
}

fn default_output_format() -> OutputFormat {
    OutputFormat::Text
}

fn default_enable_color() -> bool {
    crate::defaults::DEFAULT_ENABLE_COLOR
}

fn default_trace_ping_output() -> bool {
    crate::defaults::DEFAULT_TRACE_PING_OUTPUT
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_is_valid() {
        let config = Config::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.host, "google.com");
        assert_eq!(config.ports, vec![80, 443, 22, 21]);
        assert_eq!(config.ping_count, 4);
        assert_eq!(config.timeout(), Duration::from_secs(2));
        assert!(config.trace_ping_output);
    }

    #[test]
    fn test_empty_host_invalid() {
        let mut config = Config::default();
        config.host = "  ".to_string();
        assert!(config.validate().is_err());

        config.host = "bad host".to_string();
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_option_like_host_invalid() {
        let mut config = Config::default();
        config.host = "-f".to_string();
        let err = config.validate().unwrap_err();
        assert!(err.to_string().contains("cannot start with '-'"));

        config.host = "host-with-dash.example".to_string();
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_port_zero_invalid() {
        let mut config = Config::default();
        config.ports = vec![80, 0];
        assert!(config.validate().is_err());

        config.ports.clear();
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_numeric_bounds() {
        let mut config = Config::default();
        config.ping_count = 0;
        assert!(config.validate().is_err());
        config.ping_count = 101;
        assert!(config.validate().is_err());

        let mut config = Config::default();
        config.timeout_seconds = 0;
        assert!(config.validate().is_err());
        config.timeout_seconds = 61;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_invalid_dns_server_ip() {
        let mut config = Config::default();
        config.dns_servers = vec!["not-an-ip".to_string()];
        assert!(config.validate().is_err());

        config.dns_servers = vec!["1.1.1.1".to_string(), "2606:4700:4700::1111".to_string()];
        assert!(config.validate().is_ok());
        assert_eq!(config.dns_server_addrs().unwrap().len(), 2);
    }

    #[test]
    fn test_parse_port_list() {
        assert_eq!(parse_port_list("80, 443,22").unwrap(), vec![80, 443, 22]);
        assert_eq!(parse_port_list("8080,,").unwrap(), vec![8080]);
        assert!(parse_port_list("http").is_err());
        assert!(parse_port_list("70000").is_err());
    }

    #[test]
    fn test_output_format_serialization() {
        assert_eq!(serde_json::to_string(&OutputFormat::Json).unwrap(), "\"json\"");
        let parsed: OutputFormat = serde_json::from_str("\"text\"").unwrap();
        assert_eq!(parsed, OutputFormat::Text);
    }
}
