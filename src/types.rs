//! Type definitions shared across probes

use std::fmt;
use std::str::FromStr;
use serde::{Deserialize, Serialize};

// Re-export commonly used types
pub use crate::error::{AppError, Result};

/// Operating system family whose `ping` utility produced the output
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Platform {
    /// macOS and other BSD-flavoured ping
    Darwin,
    /// Windows `ping.exe`
    Windows,
    /// Linux iputils/busybox and anything unrecognised
    Linux,
}

impl Platform {
    /// Platform this binary was compiled for
    pub fn current() -> Self {
        Self::from_os(std::env::consts::OS)
    }

    /// Map a `std::env::consts::OS` style name; unknown systems use Linux rules
    pub fn from_os(os: &str) -> Self {
        match os {
            "macos" | "darwin" | "ios" => Platform::Darwin,
            "windows" => Platform::Windows,
            _ => Platform::Linux,
        }
    }

    /// Arguments passed to `ping` before the host name
    ///
    /// Only the Darwin path caps the per-reply wait (`-t 5`).
    pub fn ping_args(&self, count: u32) -> Vec<String> {
        match self {
            Platform::Darwin => vec![
                "-c".to_string(),
                count.to_string(),
                "-t".to_string(),
                crate::defaults::DARWIN_PING_TIMEOUT_SECS.to_string(),
            ],
            Platform::Windows => vec!["-n".to_string(), count.to_string()],
            Platform::Linux => vec!["-c".to_string(), count.to_string()],
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Platform::Darwin => "darwin",
            Platform::Windows => "windows",
            Platform::Linux => "linux",
        }
    }
}

impl fmt::Display for Platform {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Platform {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_lowercase().as_str() {
            "darwin" | "macos" | "osx" => Ok(Platform::Darwin),
            "windows" | "win" => Ok(Platform::Windows),
            "linux" => Ok(Platform::Linux),
            other => Err(AppError::parse(format!("Unknown platform: {}", other))),
        }
    }
}

/// Outcome of the ping step
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PingStatus {
    /// Ping ran and its output was parsed
    Success,
    /// Ping ran but reported the host unreachable
    Failed,
    /// Ping could not be run at all
    Error,
}

impl fmt::Display for PingStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            PingStatus::Success => "success",
            PingStatus::Failed => "failed",
            PingStatus::Error => "error",
        })
    }
}

/// Outcome of one TCP port probe
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PortStatus {
    /// Connection established
    Open,
    /// Connection refused or timed out
    Closed,
    /// Probe failed for another reason
    Error,
}

impl fmt::Display for PortStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            PortStatus::Open => "open",
            PortStatus::Closed => "closed",
            PortStatus::Error => "error",
        })
    }
}
