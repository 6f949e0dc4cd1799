//! Output formatting and display system
//!
//! Reports render as sectioned text (plain or colored) or as JSON.

mod colored;
mod formatter;

pub use colored::{ColorScheme, ColoredFormatter};
pub use formatter::{JsonFormatter, Painter, PlainFormatter, ReportFormatter, Tone};

use crate::{error::Result, models::{DiagnosticsReport, OutputFormat}};

/// Output formatting factory for creating appropriate formatters
pub struct OutputFormatterFactory;

impl OutputFormatterFactory {
    /// Create a formatter for the requested format and color preference
    ///
    /// JSON output is never colored.
    pub fn create_formatter(format: OutputFormat, enable_color: bool) -> Box<dyn ReportFormatter> {
        match format {
            OutputFormat::Json => Box::new(JsonFormatter::new()),
            OutputFormat::Text if enable_color => Box::new(ColoredFormatter::new()),
            OutputFormat::Text => Box::new(PlainFormatter::new()),
        }
    }

    /// Create a plain text formatter for scripts/logs
    pub fn create_plain_formatter() -> Box<dyn ReportFormatter> {
        Self::create_formatter(OutputFormat::Text, false)
    }
}

/// Renders a finished report for display
pub struct OutputCoordinator {
    formatter: Box<dyn ReportFormatter>,
    show_summary: bool,
}

impl OutputCoordinator {
    pub fn new(formatter: Box<dyn ReportFormatter>) -> Self {
        Self {
            formatter,
            show_summary: false,
        }
    }

    /// Append the one-line digest after the report
    pub fn with_summary(mut self, show_summary: bool) -> Self {
        self.show_summary = show_summary;
        self
    }

    pub fn display_report(&self, report: &DiagnosticsReport) -> Result<String> {
        let mut output = self.formatter.format_report(report)?;
        if self.show_summary {
            output.push_str("\n\n");
            output.push_str(&report.summary());
        }
        Ok(output)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{DnsResult, PingResult, PortProbeResult};
    use chrono::Utc;

    fn report() -> DiagnosticsReport {
        DiagnosticsReport::new(
            Utc::now(),
            "example.com".to_string(),
            PingResult::empty(),
            DnsResult::new("example.com"),
            vec![PortProbeResult::open(443)],
        )
    }

    #[test]
    fn test_factory_json_ignores_color() {
        let formatter = OutputFormatterFactory::create_formatter(OutputFormat::Json, true);
        let text = formatter.format_report(&report()).unwrap();
        let value: serde_json::Value = serde_json::from_str(&text).unwrap();
        assert_eq!(value["host"], "example.com");
        assert!(!text.contains('\x1b'));
    }

    #[test]
    fn test_plain_factory_has_no_escape_codes() {
        let text = OutputFormatterFactory::create_plain_formatter()
            .format_report(&report())
            .unwrap();
        assert!(text.contains("Port 443 (HTTPS): open"));
        assert!(!text.contains('\x1b'));
    }

    #[test]
    fn test_coordinator_summary() {
        let coordinator = OutputCoordinator::new(OutputFormatterFactory::create_plain_formatter());
        assert!(!coordinator.display_report(&report()).unwrap().contains("ports open"));

        let coordinator = coordinator.with_summary(true);
        let text = coordinator.display_report(&report()).unwrap();
        assert!(text.ends_with("example.com: ping 0.0% loss, dns resolved, 1/1 ports open"));
    }
}
