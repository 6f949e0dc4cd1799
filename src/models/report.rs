//! Report records produced by a diagnostics run
//!
//! Every record is a plain value owned by the caller. A probe that could not
//! produce data says why through its `error` field; fields are never left
//! out silently.

use crate::probe::resolve_service_name;
use crate::types::{PingStatus, PortStatus};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

/// Normalized ping statistics
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PingResult {
    pub status: PingStatus,
    pub packets_sent: u32,
    pub packets_received: u32,
    /// Derived from the packet counts whenever `packets_sent > 0`
    pub packet_loss_percent: f64,
    /// Round-trip times in milliseconds
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub min_rtt: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub avg_rtt: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_rtt: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl PingResult {
    /// Successful result with every field at its default
    pub fn empty() -> Self {
        Self {
            status: PingStatus::Success,
            packets_sent: 0,
            packets_received: 0,
            packet_loss_percent: 0.0,
            min_rtt: None,
            avg_rtt: None,
            max_rtt: None,
            error: None,
        }
    }

    /// Ping ran but the host did not answer
    pub fn failed<S: Into<String>>(message: S) -> Self {
        Self {
            status: PingStatus::Failed,
            error: Some(message.into()),
            ..Self::empty()
        }
    }

    /// Ping could not be executed
    pub fn error<S: Into<String>>(message: S) -> Self {
        Self {
            status: PingStatus::Error,
            error: Some(message.into()),
            ..Self::empty()
        }
    }

    pub fn is_success(&self) -> bool {
        self.status == PingStatus::Success
    }

    /// Whether all three round-trip figures were parsed
    pub fn has_rtt(&self) -> bool {
        self.min_rtt.is_some() && self.avg_rtt.is_some() && self.max_rtt.is_some()
    }
}

/// Outcome of probing one TCP port
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PortProbeResult {
    pub port: u16,
    pub status: PortStatus,
    pub service_name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl PortProbeResult {
    pub fn open(port: u16) -> Self {
        Self::with_status(port, PortStatus::Open, None)
    }

    pub fn closed(port: u16) -> Self {
        Self::with_status(port, PortStatus::Closed, None)
    }

    pub fn error<S: Into<String>>(port: u16, message: S) -> Self {
        Self::with_status(port, PortStatus::Error, Some(message.into()))
    }

    fn with_status(port: u16, status: PortStatus, error: Option<String>) -> Self {
        Self {
            port,
            status,
            service_name: resolve_service_name(port).to_string(),
            error,
        }
    }

    pub fn is_open(&self) -> bool {
        self.status == PortStatus::Open
    }
}

/// Addresses a hostname resolved to
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DnsResult {
    pub hostname: String,
    /// Primary IPv4 address
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ipv4_address: Option<String>,
    /// Every distinct IPv6 address; order carries no meaning
    #[serde(default, skip_serializing_if = "BTreeSet::is_empty")]
    pub ipv6_addresses: BTreeSet<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl DnsResult {
    /// Result with nothing resolved yet
    pub fn new<S: Into<String>>(hostname: S) -> Self {
        Self {
            hostname: hostname.into(),
            ipv4_address: None,
            ipv6_addresses: BTreeSet::new(),
            error: None,
        }
    }

    /// Resolution failed; addresses stay empty
    pub fn failed<S: Into<String>, M: Into<String>>(hostname: S, message: M) -> Self {
        Self {
            error: Some(message.into()),
            ..Self::new(hostname)
        }
    }

    pub fn is_resolved(&self) -> bool {
        self.error.is_none() && (self.ipv4_address.is_some() || !self.ipv6_addresses.is_empty())
    }
}

/// Aggregated result of one diagnostics run
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DiagnosticsReport {
    /// When the run started
    pub timestamp: DateTime<Utc>,
    pub host: String,
    pub ping_result: PingResult,
    pub dns_result: DnsResult,
    /// Same order as the requested ports
    pub port_results: Vec<PortProbeResult>,
}

impl DiagnosticsReport {
    pub fn new(
        timestamp: DateTime<Utc>,
        host: String,
        ping_result: PingResult,
        dns_result: DnsResult,
        port_results: Vec<PortProbeResult>,
    ) -> Self {
        Self {
            timestamp,
            host,
            ping_result,
            dns_result,
            port_results,
        }
    }

    /// Ports that accepted a connection
    pub fn open_ports(&self) -> Vec<u16> {
        self.port_results
            .iter()
            .filter(|r| r.is_open())
            .map(|r| r.port)
            .collect()
    }

    /// Number of probes (ping, DNS, ports) that carry an error message
    pub fn failed_probe_count(&self) -> usize {
        let ping = usize::from(self.ping_result.error.is_some());
        let dns = usize::from(self.dns_result.error.is_some());
        let ports = self.port_results.iter().filter(|r| r.error.is_some()).count();
        ping + dns + ports
    }

    /// One-line digest for verbose output
    pub fn summary(&self) -> String {
        let ping = if self.ping_result.is_success() {
            format!("{:.1}% loss", self.ping_result.packet_loss_percent)
        } else {
            self.ping_result.status.to_string()
        };
        let dns = if self.dns_result.error.is_some() { "unresolved" } else { "resolved" };
        format!(
            "{}: ping {}, dns {}, {}/{} ports open",
            self.host,
            ping,
            dns,
            self.open_ports().len(),
            self.port_results.len()
        )
    }
}
