//! Configuration parsing from CLI arguments and environment variables

use crate::{
    cli::Cli,
    config::env::EnvManager,
    error::Result,
    logging::{LogLevel, Logger},
    models::{config::split_list, Config, OutputFormat},
};
use std::path::PathBuf;

/// Configuration parser that combines CLI arguments with environment variables
pub struct ConfigParser {
    cli: Cli,
    env_file: PathBuf,
    logger: Logger,
}

impl ConfigParser {
    /// Create a parser reading `.env` from the working directory
    pub fn new(cli: Cli) -> Self {
        let mut logger = Logger::new("CONFIG");
        if cli.debug {
            logger.set_level(LogLevel::Debug);
        }
        logger.set_color(cli.use_colors());

        Self {
            cli,
            env_file: PathBuf::from(".env"),
            logger,
        }
    }

    /// Read environment defaults from another file
    pub fn with_env_file<P: Into<PathBuf>>(mut self, path: P) -> Self {
        self.env_file = path.into();
        self
    }

    /// Parse and build the complete configuration
    ///
    /// Later layers win: defaults, `.env`, `NETDIAG_*` variables, CLI.
    pub fn parse(&self) -> Result<Config> {
        let mut config = Config::default();

        // Variables already set shadow the file, so bad lines only warn here
        if let Some(warnings) = EnvManager::check_env_file(&self.env_file)? {
            for warning in warnings {
                self.logger
                    .warn("Invalid .env entry")
                    .field("path", self.env_file.display().to_string())
                    .field("detail", warning)
                    .log();
            }
        }

        EnvManager::load_env_file(&self.env_file, &self.logger)?;
        config.merge_from_env()?;
        self.apply_cli_overrides(&mut config);
        config.validate()?;

        self.logger
            .debug("Configuration loaded")
            .field("host", &config.host)
            .field("ports", &config.ports)
            .field("ping_count", config.ping_count)
            .field("timeout_seconds", config.timeout_seconds)
            .log();

        Ok(config)
    }

    fn apply_cli_overrides(&self, config: &mut Config) {
        let cli = &self.cli;

        if let Some(host) = &cli.host {
            config.host = host.trim().to_string();
        }

        if !cli.ports.is_empty() {
            config.ports = cli.ports.clone();
        }

        if let Some(count) = cli.count {
            config.ping_count = count;
        }

        if let Some(timeout) = cli.timeout {
            config.timeout_seconds = timeout;
        }

        if let Some(dns_servers) = &cli.dns_servers {
            config.dns_servers = split_list(dns_servers);
        }

        if cli.parallel {
            config.parallel_ports = true;
        }

        if cli.json {
            config.output_format = OutputFormat::Json;
        }

        // Explicit flags beat the file; otherwise the terminal must agree too
        config.enable_color = if cli.color {
            true
        } else if cli.no_color {
            false
        } else {
            config.enable_color && cli.use_colors()
        };

        if cli.no_trace {
            config.trace_ping_output = false;
        }

        // CLI-only
        config.verbose = cli.verbose;
        config.debug = cli.debug;
    }
}

/// Convenience function to load complete configuration from CLI arguments
pub fn load_config(cli: Cli) -> Result<Config> {
    ConfigParser::new(cli).parse()
}

/// Display configuration summary for debug purposes
pub fn display_config_summary(config: &Config) -> String {
    let dns_servers = if config.dns_servers.is_empty() {
        "system".to_string()
    } else {
        config.dns_servers.join(", ")
    };
    let ports = config
        .ports
        .iter()
        .map(u16::to_string)
        .collect::<Vec<_>>()
        .join(", ");

    [
        format!("Host: {}", config.host),
        format!("Ports: {}", ports),
        format!("Ping Count: {}", config.ping_count),
        format!("Port Timeout: {}s", config.timeout_seconds),
        format!("DNS Servers: {}", dns_servers),
        format!("Parallel Probes: {}", config.parallel_ports),
        format!("Color Output: {}", config.enable_color),
        format!("Trace Ping Output: {}", config.trace_ping_output),
        format!("Verbose: {}", config.verbose),
        format!("Debug: {}", config.debug),
    ]
    .join("\n")
}
