//! Command-line interface

use clap::{ArgAction, Parser};

/// Host diagnostics - ping statistics, DNS lookup and TCP port reachability for one host
#[derive(Parser, Debug, Clone)]
#[command(name = "netdiag")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Host name or IP address to diagnose [default: google.com]
    #[arg(value_name = "HOST")]
    pub host: Option<String>,

    /// TCP ports to probe (comma-separated or repeated) [default: 80,443,22,21]
    #[arg(short, long, value_delimiter = ',', action = ArgAction::Append)]
    pub ports: Vec<u16>,

    /// Number of echo requests sent by ping
    #[arg(short, long, value_parser = parse_count)]
    pub count: Option<u32>,

    /// Port connect timeout in seconds
    #[arg(short, long, value_parser = parse_timeout)]
    pub timeout: Option<u64>,

    /// Query these DNS servers instead of the system resolver (comma-separated)
    #[arg(long)]
    pub dns_servers: Option<String>,

    /// Probe ports concurrently
    #[arg(long)]
    pub parallel: bool,

    /// Print the report as JSON
    #[arg(long)]
    pub json: bool,

    /// Force colored output
    #[arg(long)]
    pub color: bool,

    /// Disable colored output
    #[arg(long)]
    pub no_color: bool,

    /// Do not log raw ping output
    #[arg(long)]
    pub no_trace: bool,

    /// Enable verbose output
    #[arg(long)]
    pub verbose: bool,

    /// Enable debug output
    #[arg(long)]
    pub debug: bool,
}

impl Cli {
    /// Validate CLI arguments for conflicts and requirements
    pub fn validate(&self) -> Result<(), String> {
        if self.color && self.no_color {
            return Err("Cannot specify both --color and --no-color".to_string());
        }

        if let Some(host) = &self.host {
            if host.trim().is_empty() {
                return Err("Host cannot be empty".to_string());
            }
        }

        if self.ports.contains(&0) {
            return Err("Port 0 is not a valid TCP port".to_string());
        }

        Ok(())
    }

    /// Check if colors should be enabled
    pub fn use_colors(&self) -> bool {
        if self.color {
            true
        } else if self.no_color {
            false
        } else {
            supports_color()
        }
    }
}

fn parse_count(s: &str) -> Result<u32, String> {
    parse_bounded(s, "Count", 100).map(|n| n as u32)
}

fn parse_timeout(s: &str) -> Result<u64, String> {
    parse_bounded(s, "Timeout", 60)
}

fn parse_bounded(s: &str, what: &str, max: u64) -> Result<u64, String> {
    // Reject "+5" and hex forms that u64::from_str would partially accept
    if s.starts_with('+') || s.starts_with("0x") || s.starts_with("0X") {
        return Err(format!("Invalid value: {}", s));
    }

    let value = s.parse::<u64>().map_err(|_| format!("Invalid value: {}", s))?;
    if value == 0 {
        Err(format!("{} must be greater than 0", what))
    } else if value > max {
        Err(format!("{} cannot exceed {}", what, max))
    } else {
        Ok(value)
    }
}

/// Check if the terminal supports color output
fn supports_color() -> bool {
    if let Ok(term) = std::env::var("TERM") {
        if term == "dumb" {
            return false;
        }
    }

    if std::env::var("NO_COLOR").is_ok() {
        return false;
    }

    if std::env::var("FORCE_COLOR").is_ok() {
        return true;
    }

    #[cfg(target_os = "windows")]
    {
        if std::env::var("ANSICON").is_ok() || std::env::var("ConEmuANSI").is_ok() {
            return true;
        }
    }

    cfg!(unix)
}
