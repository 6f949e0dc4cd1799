//! Latency measurement through the platform's `ping` utility

pub mod parser;
pub mod patterns;

pub use parser::{parse_ping_output, PingParser};
pub use patterns::{CountPattern, PacketCounts, PatternSet, RoundTrip, RttPattern};

use crate::error::{AppError, Result};
use crate::types::Platform;
use async_trait::async_trait;
use std::io::ErrorKind;
use tokio::process::Command;

/// Message recorded when ping exits with a failure status
pub const HOST_UNREACHABLE_MESSAGE: &str = "Host unreachable";

/// Runs an external ping and returns its standard output
///
/// Implementations return [`AppError::HostUnreachable`] when ping ran but
/// exited unsuccessfully and [`AppError::ProcessInvocation`] when it could
/// not be started.
#[async_trait]
pub trait PingExecutor: Send + Sync {
    async fn ping(&self, host: &str, platform: Platform, count: u32) -> Result<String>;
}

/// Invokes the `ping` binary found on PATH
#[derive(Debug, Clone)]
pub struct SystemPingExecutor {
    program: String,
}

impl SystemPingExecutor {
    pub fn new() -> Self {
        Self::with_program("ping")
    }

    /// Use another binary (for example a full path to ping)
    pub fn with_program<S: Into<String>>(program: S) -> Self {
        Self { program: program.into() }
    }

    pub fn program(&self) -> &str {
        &self.program
    }
}

impl Default for SystemPingExecutor {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl PingExecutor for SystemPingExecutor {
    async fn ping(&self, host: &str, platform: Platform, count: u32) -> Result<String> {
        let output = Command::new(&self.program)
            .args(platform.ping_args(count))
            .arg(host)
            .kill_on_drop(true)
            .output()
            .await
            .map_err(|e| match e.kind() {
                ErrorKind::NotFound => AppError::process_invocation(format!(
                    "{} not found: {}",
                    self.program, e
                )),
                _ => AppError::process_invocation(e.to_string()),
            })?;

        if !output.status.success() {
            return Err(AppError::host_unreachable(HOST_UNREACHABLE_MESSAGE));
        }

        Ok(String::from_utf8_lossy(&output.stdout).into_owned())
    }
}
