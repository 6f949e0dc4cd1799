//! Colored formatter implementation with terminal color support

use super::formatter::{render_dns, render_header, render_ping, render_ports, Painter, ReportFormatter, Tone};
use crate::{
    error::Result,
    models::{DiagnosticsReport, DnsResult, PingResult, PortProbeResult},
};
use colored::*;

/// Color scheme configuration
#[derive(Debug, Clone)]
pub struct ColorScheme {
    pub header: Color,
    pub section: Color,
    pub label: Color,
    pub success: Color,
    pub warning: Color,
    pub error: Color,
}

impl Default for ColorScheme {
    fn default() -> Self {
        Self {
            header: Color::Blue,
            section: Color::Cyan,
            label: Color::BrightBlack,
            success: Color::Green,
            warning: Color::Yellow,
            error: Color::Red,
        }
    }
}

impl Painter for ColorScheme {
    fn paint(&self, tone: Tone, text: &str) -> String {
        match tone {
            Tone::Title => text.color(self.header).bold().to_string(),
            Tone::Heading => text.color(self.section).bold().to_string(),
            Tone::Label => text.color(self.label).to_string(),
            Tone::Good => text.color(self.success).to_string(),
            Tone::Warning => text.color(self.warning).to_string(),
            Tone::Bad => text.color(self.error).bold().to_string(),
            Tone::Plain => text.to_string(),
        }
    }
}

/// Colored formatter implementation
#[derive(Debug, Default, Clone)]
pub struct ColoredFormatter {
    color_scheme: ColorScheme,
}

impl ColoredFormatter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Use a custom color scheme
    pub fn with_scheme(color_scheme: ColorScheme) -> Self {
        Self { color_scheme }
    }

    pub fn color_scheme(&self) -> &ColorScheme {
        &self.color_scheme
    }
}

impl ReportFormatter for ColoredFormatter {
    fn format_header(&self, report: &DiagnosticsReport) -> Result<String> {
        Ok(render_header(&self.color_scheme, report))
    }

    fn format_dns(&self, dns: &DnsResult) -> Result<String> {
        Ok(render_dns(&self.color_scheme, dns))
    }

    fn format_ping(&self, ping: &PingResult) -> Result<String> {
        Ok(render_ping(&self.color_scheme, ping))
    }

    fn format_ports(&self, ports: &[PortProbeResult]) -> Result<String> {
        Ok(render_ports(&self.color_scheme, ports))
    }
}
