//! Host Diagnostics
//!
//! Runs a one-shot health check against a single host: ping statistics
//! parsed from the platform's `ping` utility, DNS resolution into IPv4 and
//! IPv6 addresses, and TCP reachability of a list of ports. Results are
//! assembled into one [`DiagnosticsReport`] that never fails as a whole;
//! each probe carries its own status and error message.

pub mod cli;
pub mod config;
pub mod diagnostics;
pub mod dns;
pub mod error;
pub mod logging;
pub mod models;
pub mod output;
pub mod ping;
pub mod probe;
pub mod types;

// Re-export commonly used types
pub use error::{AppError, Result};
pub use models::{Config, DiagnosticsReport, DnsResult, PingResult, PortProbeResult};
pub use types::{Platform, PingStatus, PortStatus};
pub use diagnostics::{NetworkDiagnostics, DiagnosticsConfig};
pub use dns::resolve_dns;
pub use ping::parse_ping_output;
pub use probe::{probe_port, resolve_service_name};
pub use output::{ReportFormatter, PlainFormatter, ColoredFormatter, JsonFormatter, OutputFormatterFactory};

/// Application version information
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
pub const PKG_NAME: &str = env!("CARGO_PKG_NAME");
pub const BUILD_TIME: &str = env!("BUILD_TIME");
pub const TARGET_TRIPLE: &str = env!("TARGET_TRIPLE");
pub const GIT_COMMIT: Option<&str> = option_env!("GIT_COMMIT");

/// Default configuration values
pub mod defaults {
    use std::time::Duration;

    pub const DEFAULT_HOST: &str = "google.com";
    pub const DEFAULT_PORTS: &[u16] = &[80, 443, 22, 21];
    pub const DEFAULT_PING_COUNT: u32 = 4;
    pub const DEFAULT_PORT_TIMEOUT: Duration = Duration::from_secs(2);
    /// Per-reply wait handed to `ping -t` on macOS
    pub const DARWIN_PING_TIMEOUT_SECS: u32 = 5;
    pub const DEFAULT_ENABLE_COLOR: bool = true;
    pub const DEFAULT_TRACE_PING_OUTPUT: bool = true;
}
