//! Data models and structures for host diagnostics

pub mod config;
pub mod report;

// Re-export main model types
pub use config::{Config, OutputFormat};
pub use report::{DiagnosticsReport, DnsResult, PingResult, PortProbeResult};
