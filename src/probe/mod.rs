//! TCP port reachability probing

pub mod services;

pub use services::{resolve_service_name, UNKNOWN_SERVICE, WELL_KNOWN_SERVICES};

use crate::dns::{HostResolver, SystemResolver};
use crate::error::AppError;
use crate::logging::Logger;
use crate::models::PortProbeResult;
use futures::future::join_all;
use std::io::ErrorKind;
use std::net::{IpAddr, SocketAddr};
use std::sync::Arc;
use std::time::Duration;
use tokio::net::TcpStream;

/// Message reported when the target name does not resolve
pub const UNRESOLVED_HOST_MESSAGE: &str = "Could not resolve hostname";

/// Probes TCP ports with a bounded connect timeout
pub struct PortProber {
    resolver: Arc<dyn HostResolver>,
    timeout: Duration,
    logger: Logger,
}

impl PortProber {
    pub fn new(resolver: Arc<dyn HostResolver>, timeout: Duration) -> Self {
        Self {
            resolver,
            timeout,
            logger: Logger::new("PORT"),
        }
    }

    pub fn with_logger(mut self, logger: Logger) -> Self {
        self.logger = logger;
        self
    }

    pub fn timeout(&self) -> Duration {
        self.timeout
    }

    /// Probe a single port
    ///
    /// Refusal and timeout both count as `Closed`. The stream is dropped
    /// before returning, whatever the outcome.
    pub async fn probe(&self, host: &str, port: u16) -> PortProbeResult {
        let ip = match self.resolver.lookup(host).await {
            Ok(addresses) => match preferred_address(&addresses) {
                Some(ip) => ip,
                None => return PortProbeResult::error(port, UNRESOLVED_HOST_MESSAGE),
            },
            Err(e) => {
                self.logger.debug("port probe could not resolve host")
                    .field("host", host)
                    .field("port", port)
                    .error_info(&e)
                    .log();
                return PortProbeResult::error(port, UNRESOLVED_HOST_MESSAGE);
            }
        };

        let addr = SocketAddr::new(ip, port);
        let result = match connect(addr, self.timeout).await {
            Ok(true) => PortProbeResult::open(port),
            Ok(false) => PortProbeResult::closed(port),
            Err(e) => PortProbeResult::error(port, e.to_string()),
        };

        self.logger.debug("port probed")
            .field("target", addr.to_string())
            .field("status", result.status)
            .log();
        result
    }

    /// Probe every port, keeping the input order in the output
    pub async fn probe_all(&self, host: &str, ports: &[u16], parallel: bool) -> Vec<PortProbeResult> {
        if parallel {
            join_all(ports.iter().map(|&port| self.probe(host, port))).await
        } else {
            let mut results = Vec::with_capacity(ports.len());
            for &port in ports {
                results.push(self.probe(host, port).await);
            }
            results
        }
    }
}

/// Prefer IPv4, fall back to whatever came first
fn preferred_address(addresses: &[IpAddr]) -> Option<IpAddr> {
    addresses
        .iter()
        .find(|ip| ip.is_ipv4())
        .or_else(|| addresses.first())
        .copied()
}

/// `Ok(true)` when connected, `Ok(false)` when refused or timed out
async fn connect(addr: SocketAddr, timeout: Duration) -> Result<bool, AppError> {
    match tokio::time::timeout(timeout, TcpStream::connect(addr)).await {
        Ok(Ok(stream)) => {
            drop(stream);
            Ok(true)
        }
        Ok(Err(e)) if is_closed(e.kind()) => Ok(false),
        Ok(Err(e)) => Err(AppError::socket(e.to_string())),
        Err(_elapsed) => Ok(false),
    }
}

fn is_closed(kind: ErrorKind) -> bool {
    matches!(
        kind,
        ErrorKind::ConnectionRefused
            | ErrorKind::TimedOut
            | ErrorKind::ConnectionReset
            | ErrorKind::ConnectionAborted
    )
}

/// Probe `host:port` through the system resolver
pub async fn probe_port(host: &str, port: u16, timeout: Duration) -> PortProbeResult {
    PortProber::new(Arc::new(SystemResolver::new()), timeout)
        .probe(host, port)
        .await
}
