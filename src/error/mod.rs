//! Error handling for host diagnostics
//!
//! Probe-level failures (unreachable host, missing ping binary, DNS or
//! socket failures) are folded into the report records by the
//! orchestrator. They still flow through [`AppError`] inside each
//! collaborator so that the mapping into `status`/`error` happens in one
//! place.

use thiserror::Error;

/// Custom error types for host diagnostics
#[derive(Error, Debug)]
pub enum AppError {
    /// Configuration-related errors
    #[error("Configuration error: {0}")]
    Config(String),

    /// Validation errors
    #[error("Validation error: {0}")]
    Validation(String),

    /// Parsing errors (numbers, addresses, JSON)
    #[error("Parsing error: {0}")]
    Parse(String),

    /// I/O errors
    #[error("I/O error: {0}")]
    Io(String),

    /// The ping process ran but reported the host as unreachable
    #[error("{0}")]
    HostUnreachable(String),

    /// The ping utility is missing or could not be run
    #[error("{0}")]
    ProcessInvocation(String),

    /// A hostname could not be resolved
    #[error("{0}")]
    DnsResolution(String),

    /// Low-level socket failure other than refusal or timeout
    #[error("{0}")]
    Socket(String),

    /// Generic internal errors
    #[error("Internal error: {0}")]
    Internal(String),
}

impl AppError {
    /// Create a new configuration error
    pub fn config<S: Into<String>>(message: S) -> Self {
        Self::Config(message.into())
    }

    /// Create a new validation error
    pub fn validation<S: Into<String>>(message: S) -> Self {
        Self::Validation(message.into())
    }

    /// Create a new parsing error
    pub fn parse<S: Into<String>>(message: S) -> Self {
        Self::Parse(message.into())
    }

    /// Create a new I/O error
    pub fn io<S: Into<String>>(message: S) -> Self {
        Self::Io(message.into())
    }

    /// Create a new host unreachable error
    pub fn host_unreachable<S: Into<String>>(message: S) -> Self {
        Self::HostUnreachable(message.into())
    }

    /// Create a new process invocation error
    pub fn process_invocation<S: Into<String>>(message: S) -> Self {
        Self::ProcessInvocation(message.into())
    }

    /// Create a new DNS resolution error
    pub fn dns_resolution<S: Into<String>>(message: S) -> Self {
        Self::DnsResolution(message.into())
    }

    /// Create a new socket error
    pub fn socket<S: Into<String>>(message: S) -> Self {
        Self::Socket(message.into())
    }

    /// Create a new internal error
    pub fn internal<S: Into<String>>(message: S) -> Self {
        Self::Internal(message.into())
    }

    /// Get error category for logging and reporting
    pub fn category(&self) -> &'static str {
        match self {
            Self::Config(_) => "CONFIG",
            Self::Validation(_) => "VALIDATION",
            Self::Parse(_) => "PARSE",
            Self::Io(_) => "IO",
            Self::HostUnreachable(_) => "UNREACHABLE",
            Self::ProcessInvocation(_) => "PROCESS",
            Self::DnsResolution(_) => "DNS",
            Self::Socket(_) => "SOCKET",
            Self::Internal(_) => "INTERNAL",
        }
    }

    /// Whether this error belongs to a single probe rather than the run
    pub fn is_probe_failure(&self) -> bool {
        matches!(
            self,
            Self::HostUnreachable(_) | Self::ProcessInvocation(_) | Self::DnsResolution(_) | Self::Socket(_)
        )
    }

    /// Short hint printed under the error on the console
    pub fn suggestion(&self) -> &'static str {
        match self {
            Self::Config(_) | Self::Validation(_) => {
                "Check the command line, NETDIAG_* variables and your .env file."
            }
            Self::Parse(_) => "Check the format of your input values.",
            Self::Io(_) => "Check that stdout is writable.",
            Self::HostUnreachable(_) => "Verify the host is online and that ICMP is not filtered.",
            Self::ProcessInvocation(_) => "Make sure the `ping` utility is installed and on PATH.",
            Self::DnsResolution(_) => "Check the host name or try --dns-servers 1.1.1.1.",
            Self::Socket(_) => "Check local firewall rules and network connectivity.",
            Self::Internal(_) => "This is likely a bug. Please report it with the error details.",
        }
    }

    /// Get exit code for this error type
    pub fn exit_code(&self) -> i32 {
        match self {
            Self::Config(_) | Self::Validation(_) | Self::Parse(_) => 1,
            Self::HostUnreachable(_) | Self::DnsResolution(_) | Self::Socket(_) => 2,
            Self::ProcessInvocation(_) => 3,
            Self::Io(_) => 5,
            Self::Internal(_) => 99,
        }
    }

    /// Format error for console display with color coding
    pub fn format_for_console(&self, use_color: bool) -> String {
        let category = self.category();
        let message = self.to_string();

        if use_color {
            use colored::Colorize;
            match self {
                Self::Config(_) | Self::Validation(_) | Self::Parse(_) => {
                    format!("[{}] {}", category.red().bold(), message.red())
                }
                Self::HostUnreachable(_) | Self::DnsResolution(_) | Self::Socket(_) => {
                    format!("[{}] {}", category.yellow().bold(), message.yellow())
                }
                Self::ProcessInvocation(_) | Self::Io(_) => {
                    format!("[{}] {}", category.cyan().bold(), message.cyan())
                }
                Self::Internal(_) => {
                    format!("[{}] {}", category.bright_red().bold(), message.bright_red())
                }
            }
        } else {
            format!("[{}] {}", category, message)
        }
    }
}

// Standard library error conversions
impl From<std::io::Error> for AppError {
    fn from(error: std::io::Error) -> Self {
        Self::io(error.to_string())
    }
}

impl From<serde_json::Error> for AppError {
    fn from(error: serde_json::Error) -> Self {
        Self::parse(format!("JSON error: {}", error))
    }
}

impl From<trust_dns_resolver::error::ResolveError> for AppError {
    fn from(error: trust_dns_resolver::error::ResolveError) -> Self {
        Self::dns_resolution(error.to_string())
    }
}

impl From<dotenv::Error> for AppError {
    fn from(error: dotenv::Error) -> Self {
        Self::config(format!("Environment file error: {}", error))
    }
}

impl From<std::net::AddrParseError> for AppError {
    fn from(error: std::net::AddrParseError) -> Self {
        Self::parse(format!("Address parse error: {}", error))
    }
}

impl From<std::num::ParseIntError> for AppError {
    fn from(error: std::num::ParseIntError) -> Self {
        Self::parse(format!("Integer parse error: {}", error))
    }
}

/// Result type alias for convenience
pub type Result<T> = std::result::Result<T, AppError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_creation() {
        let config_error = AppError::config("bad port list");
        assert_eq!(config_error.category(), "CONFIG");
        assert_eq!(config_error.exit_code(), 1);
        assert!(!config_error.is_probe_failure());

        let dns_error = AppError::dns_resolution("no such host");
        assert_eq!(dns_error.category(), "DNS");
        assert!(dns_error.is_probe_failure());
    }

    #[test]
    fn test_probe_errors_display_bare_message() {
        // Probe messages land verbatim in report records
        assert_eq!(AppError::host_unreachable("Host unreachable").to_string(), "Host unreachable");
        assert_eq!(
            AppError::socket("Could not resolve hostname").to_string(),
            "Could not resolve hostname"
        );
    }

    #[test]
    fn test_run_errors_display_with_prefix() {
        assert_eq!(AppError::config("x").to_string(), "Configuration error: x");
        assert_eq!(AppError::internal("y").to_string(), "Internal error: y");
    }

    #[test]
    fn test_suggestions() {
        let error = AppError::process_invocation("No such file or directory");
        assert!(error.suggestion().contains("`ping`"));
        assert!(AppError::config("x").suggestion().contains(".env"));
    }

    #[test]
    fn test_console_formatting() {
        let error = AppError::validation("port 0 is not allowed");
        let plain = error.format_for_console(false);
        assert_eq!(plain, "[VALIDATION] Validation error: port 0 is not allowed");

        let colored = error.format_for_console(true);
        assert!(colored.contains("VALIDATION"));
    }

    #[test]
    fn test_error_conversions() {
        let io_error = std::io::Error::new(std::io::ErrorKind::NotFound, "missing");
        let app_error: AppError = io_error.into();
        assert!(matches!(app_error, AppError::Io(_)));

        let parse_error = "abc".parse::<u16>().unwrap_err();
        let app_error: AppError = parse_error.into();
        assert!(matches!(app_error, AppError::Parse(_)));

        let addr_error = "not-an-ip".parse::<std::net::IpAddr>().unwrap_err();
        let app_error: AppError = addr_error.into();
        assert!(matches!(app_error, AppError::Parse(_)));
    }
}
