//! Diagnostics orchestration
//!
//! Runs ping, DNS lookup and port probes against one host and assembles a
//! [`DiagnosticsReport`]. Each step turns its own failures into data, so a
//! run always yields a complete report.

use crate::{
    defaults,
    dns::{build_resolver, DnsResolver, HostResolver, SystemResolver},
    error::{AppError, Result},
    logging::{Logger, LoggerFactory, TraceSink},
    models::{Config, DiagnosticsReport, PingResult},
    ping::{PingExecutor, PingParser, SystemPingExecutor},
    probe::PortProber,
    types::Platform,
};
use chrono::Utc;
use std::{sync::Arc, time::Duration};

/// Tunables for one diagnostics engine
#[derive(Debug, Clone, PartialEq)]
pub struct DiagnosticsConfig {
    /// Echo requests per ping run
    pub ping_count: u32,
    /// Connect timeout per port probe
    pub port_timeout: Duration,
    /// Probe ports concurrently
    pub parallel_ports: bool,
}

impl Default for DiagnosticsConfig {
    fn default() -> Self {
        Self {
            ping_count: defaults::DEFAULT_PING_COUNT,
            port_timeout: defaults::DEFAULT_PORT_TIMEOUT,
            parallel_ports: false,
        }
    }
}

impl From<&Config> for DiagnosticsConfig {
    fn from(config: &Config) -> Self {
        Self {
            ping_count: config.ping_count,
            port_timeout: config.timeout(),
            parallel_ports: config.parallel_ports,
        }
    }
}

/// Diagnostics engine for one platform
pub struct NetworkDiagnostics {
    platform: Platform,
    ping: Arc<dyn PingExecutor>,
    parser: PingParser,
    dns: DnsResolver,
    prober: PortProber,
    config: DiagnosticsConfig,
    logger: Logger,
}

impl NetworkDiagnostics {
    /// Assemble an engine from explicit collaborators
    pub fn new(
        platform: Platform,
        ping: Arc<dyn PingExecutor>,
        resolver: Arc<dyn HostResolver>,
        trace: Arc<dyn TraceSink>,
        config: DiagnosticsConfig,
    ) -> Self {
        Self {
            platform,
            ping,
            parser: PingParser::new(platform).with_trace(trace),
            dns: DnsResolver::new(resolver.clone()),
            prober: PortProber::new(resolver, config.port_timeout),
            config,
            logger: Logger::new("DIAG"),
        }
    }

    /// System ping, system resolver, raw ping output traced to stderr
    pub fn with_defaults(platform: Platform) -> Self {
        let mut trace = Logger::new("PING");
        trace.set_level(crate::logging::LogLevel::Debug);
        Self::new(
            platform,
            Arc::new(SystemPingExecutor::new()),
            Arc::new(SystemResolver::new()),
            Arc::new(trace),
            DiagnosticsConfig::default(),
        )
    }

    /// Build an engine for the current platform from application config
    pub fn from_config(config: &Config, loggers: &LoggerFactory) -> Result<Self> {
        let servers = config.dns_server_addrs()
            .map_err(|e| AppError::config(format!("Invalid DNS servers: {}", e)))?;
        let resolver = build_resolver(&servers)?;
        let diagnostics_config = DiagnosticsConfig::from(config);

        let mut engine = Self::new(
            Platform::current(),
            Arc::new(SystemPingExecutor::new()),
            resolver.clone(),
            loggers.create_trace_sink(),
            diagnostics_config.clone(),
        );
        engine.dns = DnsResolver::new(resolver.clone()).with_logger(loggers.create_logger("DNS"));
        engine.prober = PortProber::new(resolver, diagnostics_config.port_timeout)
            .with_logger(loggers.create_logger("PORT"));
        engine.logger = loggers.create_logger("DIAG");
        Ok(engine)
    }

    pub fn platform(&self) -> Platform {
        self.platform
    }

    pub fn config(&self) -> &DiagnosticsConfig {
        &self.config
    }

    /// Run every probe against `host`
    ///
    /// Steps run in order: ping, DNS, ports. A failing step never stops the
    /// following ones. `port_results` follows the order of `ports`.
    pub async fn run_diagnostics(&self, host: &str, ports: &[u16]) -> DiagnosticsReport {
        let timestamp = Utc::now();
        self.logger.info("starting diagnostics")
            .field("host", host)
            .field("platform", self.platform)
            .field("ports", ports)
            .log();

        let ping_result = self.run_ping(host).await;
        let dns_result = self.dns.resolve(host).await;
        let port_results = self.prober
            .probe_all(host, ports, self.config.parallel_ports)
            .await;

        let report = DiagnosticsReport::new(
            timestamp,
            host.to_string(),
            ping_result,
            dns_result,
            port_results,
        );

        self.logger.info("diagnostics complete")
            .field("host", host)
            .field("failed_probes", report.failed_probe_count())
            .field("elapsed_ms", (Utc::now() - timestamp).num_milliseconds())
            .log();
        report
    }

    /// Run against `host` with the default port list
    pub async fn run_default(&self, host: &str) -> DiagnosticsReport {
        self.run_diagnostics(host, defaults::DEFAULT_PORTS).await
    }

    async fn run_ping(&self, host: &str) -> PingResult {
        match self.ping.ping(host, self.platform, self.config.ping_count).await {
            Ok(output) => self.parser.parse(&output),
            Err(AppError::HostUnreachable(message)) => {
                self.logger.warn("ping reported host unreachable").field("host", host).log();
                PingResult::failed(message)
            }
            Err(e) => {
                self.logger.error("ping could not be run")
                    .field("host", host)
                    .error_info(&e)
                    .log();
                PingResult::error(e.to_string())
            }
        }
    }
}
