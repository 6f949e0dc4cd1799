//! Core formatting traits and implementations
//!
//! The text layout lives here once; plain and colored output differ only in
//! how they paint each fragment.

use crate::{
    error::Result,
    models::{DiagnosticsReport, DnsResult, PingResult, PortProbeResult},
    types::{PingStatus, PortStatus},
};
use chrono::SecondsFormat;
use std::fmt::Write as _;

/// Main trait for report formatting
pub trait ReportFormatter {
    /// Title block with timestamp and host
    fn format_header(&self, report: &DiagnosticsReport) -> Result<String>;

    /// DNS lookup section
    fn format_dns(&self, dns: &DnsResult) -> Result<String>;

    /// Ping statistics section
    fn format_ping(&self, ping: &PingResult) -> Result<String>;

    /// One line per probed port
    fn format_ports(&self, ports: &[PortProbeResult]) -> Result<String>;

    /// Whole report
    fn format_report(&self, report: &DiagnosticsReport) -> Result<String> {
        let sections = [
            self.format_header(report)?,
            self.format_dns(&report.dns_result)?,
            self.format_ping(&report.ping_result)?,
            self.format_ports(&report.port_results)?,
        ];
        Ok(sections.join("\n\n"))
    }
}

/// Meaning of a text fragment, used to pick a color
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Tone {
    Title,
    Heading,
    Label,
    Good,
    Warning,
    Bad,
    Plain,
}

impl Tone {
    pub fn for_ping(status: PingStatus) -> Self {
        match status {
            PingStatus::Success => Tone::Good,
            PingStatus::Failed => Tone::Warning,
            PingStatus::Error => Tone::Bad,
        }
    }

    /// Average round trip under 100ms is good, under 300ms tolerable
    pub fn for_latency(avg_ms: f64) -> Self {
        if avg_ms < 100.0 {
            Tone::Good
        } else if avg_ms < 300.0 {
            Tone::Warning
        } else {
            Tone::Bad
        }
    }

    pub fn for_port(status: PortStatus) -> Self {
        match status {
            PortStatus::Open => Tone::Good,
            PortStatus::Closed => Tone::Warning,
            PortStatus::Error => Tone::Bad,
        }
    }
}

/// Paints fragments according to their tone
pub trait Painter {
    fn paint(&self, tone: Tone, text: &str) -> String;
}

/// Painter that leaves text untouched
pub struct NoPaint;

impl Painter for NoPaint {
    fn paint(&self, _tone: Tone, text: &str) -> String {
        text.to_string()
    }
}

fn heading(painter: &dyn Painter, tone: Tone, title: &str, rule: char) -> String {
    let underline: String = std::iter::repeat(rule).take(title.chars().count()).collect();
    format!("{}\n{}", painter.paint(tone, title), painter.paint(Tone::Label, &underline))
}

fn labeled(painter: &dyn Painter, label: &str, value: &str) -> String {
    format!("{} {}", painter.paint(Tone::Label, &format!("{}:", label)), value)
}

pub(crate) fn render_header(painter: &dyn Painter, report: &DiagnosticsReport) -> String {
    let mut out = heading(painter, Tone::Title, "Network Diagnostics Report", '=');
    let timestamp = report.timestamp.to_rfc3339_opts(SecondsFormat::Secs, true);
    let _ = write!(out, "\n{}", labeled(painter, "Timestamp", &timestamp));
    let _ = write!(out, "\n{}", labeled(painter, "Host", &report.host));
    out
}

pub(crate) fn render_dns(painter: &dyn Painter, dns: &DnsResult) -> String {
    let mut out = heading(painter, Tone::Heading, "DNS Lookup Results", '-');
    let _ = write!(out, "\n{}", labeled(painter, "Hostname", &dns.hostname));

    if let Some(error) = &dns.error {
        let _ = write!(out, "\n{}", labeled(painter, "Error", &painter.paint(Tone::Bad, error)));
        return out;
    }

    let ipv4 = dns.ipv4_address.as_deref().unwrap_or("none");
    let _ = write!(out, "\n{}", labeled(painter, "IPv4 Address", ipv4));

    let ipv6 = if dns.ipv6_addresses.is_empty() {
        "none".to_string()
    } else {
        dns.ipv6_addresses.iter().cloned().collect::<Vec<_>>().join(", ")
    };
    let _ = write!(out, "\n{}", labeled(painter, "IPv6 Addresses", &ipv6));
    out
}

pub(crate) fn render_ping(painter: &dyn Painter, ping: &PingResult) -> String {
    let mut out = heading(painter, Tone::Heading, "Ping Results", '-');
    let status = painter.paint(Tone::for_ping(ping.status), &ping.status.to_string());
    let _ = write!(out, "\n{}", labeled(painter, "Status", &status));

    if let Some(error) = &ping.error {
        let _ = write!(out, "\n{}", labeled(painter, "Error", &painter.paint(Tone::Bad, error)));
        return out;
    }

    let loss = format!("{:.1}% loss", ping.packet_loss_percent);
    let loss_tone = if ping.packet_loss_percent == 0.0 {
        Tone::Good
    } else if ping.packet_loss_percent < 100.0 {
        Tone::Warning
    } else {
        Tone::Bad
    };
    let packets = format!(
        "{} sent, {} received, {}",
        ping.packets_sent,
        ping.packets_received,
        painter.paint(loss_tone, &loss)
    );
    let _ = write!(out, "\n{}", labeled(painter, "Packets", &packets));

    let rtt = match (ping.min_rtt, ping.avg_rtt, ping.max_rtt) {
        (None, None, None) => "unavailable".to_string(),
        (min, avg, max) => {
            let text = format!(
                "min {} / avg {} / max {}",
                format_ms(min),
                format_ms(avg),
                format_ms(max)
            );
            match avg {
                Some(avg) => painter.paint(Tone::for_latency(avg), &text),
                None => text,
            }
        }
    };
    let _ = write!(out, "\n{}", labeled(painter, "RTT", &rtt));
    out
}

pub(crate) fn render_ports(painter: &dyn Painter, ports: &[PortProbeResult]) -> String {
    let mut out = heading(painter, Tone::Heading, "Port Scan Results", '-');
    if ports.is_empty() {
        out.push_str("\nNo ports probed");
        return out;
    }

    for result in ports {
        let status = painter.paint(Tone::for_port(result.status), &result.status.to_string());
        let _ = write!(out, "\nPort {} ({}): {}", result.port, result.service_name, status);
        if let Some(error) = &result.error {
            let _ = write!(out, " - {}", error);
        }
    }
    out
}

fn format_ms(value: Option<f64>) -> String {
    value.map_or_else(|| "n/a".to_string(), |v| format!("{:.2} ms", v))
}

/// Plain text formatter implementation
#[derive(Debug, Default, Clone)]
pub struct PlainFormatter;

impl PlainFormatter {
    pub fn new() -> Self {
        Self
    }
}

impl ReportFormatter for PlainFormatter {
    fn format_header(&self, report: &DiagnosticsReport) -> Result<String> {
        Ok(render_header(&NoPaint, report))
    }

    fn format_dns(&self, dns: &DnsResult) -> Result<String> {
        Ok(render_dns(&NoPaint, dns))
    }

    fn format_ping(&self, ping: &PingResult) -> Result<String> {
        Ok(render_ping(&NoPaint, ping))
    }

    fn format_ports(&self, ports: &[PortProbeResult]) -> Result<String> {
        Ok(render_ports(&NoPaint, ports))
    }
}

/// JSON formatter for scripts and log pipelines
#[derive(Debug, Default, Clone)]
pub struct JsonFormatter;

impl JsonFormatter {
    pub fn new() -> Self {
        Self
    }
}

impl ReportFormatter for JsonFormatter {
    fn format_header(&self, report: &DiagnosticsReport) -> Result<String> {
        Ok(serde_json::to_string_pretty(&serde_json::json!({
            "timestamp": report.timestamp,
            "host": report.host,
        }))?)
    }

    fn format_dns(&self, dns: &DnsResult) -> Result<String> {
        Ok(serde_json::to_string_pretty(dns)?)
    }

    fn format_ping(&self, ping: &PingResult) -> Result<String> {
        Ok(serde_json::to_string_pretty(ping)?)
    }

    fn format_ports(&self, ports: &[PortProbeResult]) -> Result<String> {
        Ok(serde_json::to_string_pretty(ports)?)
    }

    fn format_report(&self, report: &DiagnosticsReport) -> Result<String> {
        Ok(serde_json::to_string_pretty(report)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{DateTime, Utc};

    fn sample_report() -> DiagnosticsReport {
        let timestamp = DateTime::parse_from_rfc3339("2024-05-01T12:30:00Z")
            .unwrap()
            .with_timezone(&Utc);

        let mut dns = DnsResult::new("example.com");
        dns.ipv4_address = Some("93.184.216.34".to_string());
        dns.ipv6_addresses.insert("2606:2800:220:1::1".to_string());

        let mut ping = PingResult::empty();
        ping.packets_sent = 4;
        ping.packets_received = 4;
        ping.min_rtt = Some(10.0);
        ping.avg_rtt = Some(12.5);
        ping.max_rtt = Some(15.0);

        DiagnosticsReport::new(
            timestamp,
            "example.com".to_string(),
            ping,
            dns,
            vec![
                PortProbeResult::open(80),
                PortProbeResult::closed(21),
                PortProbeResult::error(8080, "Network is unreachable"),
            ],
        )
    }

    #[test]
    fn test_plain_report_sections() {
        let text = PlainFormatter::new().format_report(&sample_report()).unwrap();

        assert!(text.starts_with("Network Diagnostics Report\n=========================="));
        assert!(text.contains("Timestamp: 2024-05-01T12:30:00Z"));
        assert!(text.contains("Host: example.com"));
        assert!(text.contains("DNS Lookup Results"));
        assert!(text.contains("IPv4 Address: 93.184.216.34"));
        assert!(text.contains("IPv6 Addresses: 2606:2800:220:1::1"));
        assert!(text.contains("Ping Results"));
        assert!(text.contains("Status: success"));
        assert!(text.contains("Packets: 4 sent, 4 received, 0.0% loss"));
        assert!(text.contains("RTT: min 10.00 ms / avg 12.50 ms / max 15.00 ms"));
        assert!(text.contains("Port Scan Results"));
        assert!(text.contains("Port 80 (HTTP): open"));
        assert!(text.contains("Port 21 (FTP): closed"));
        assert!(text.contains("Port 8080 (Unknown): error - Network is unreachable"));
    }

    #[test]
    fn test_section_order() {
        let text = PlainFormatter::new().format_report(&sample_report()).unwrap();
        let dns = text.find("DNS Lookup Results").unwrap();
        let ping = text.find("Ping Results").unwrap();
        let ports = text.find("Port Scan Results").unwrap();
        assert!(dns < ping && ping < ports);
    }

    #[test]
    fn test_failed_ping_shows_error_only() {
        let text = PlainFormatter::new()
            .format_ping(&PingResult::failed("Host unreachable"))
            .unwrap();
        assert!(text.contains("Status: failed"));
        assert!(text.contains("Error: Host unreachable"));
        assert!(!text.contains("Packets:"));
    }

    #[test]
    fn test_missing_rtt() {
        let mut ping = PingResult::empty();
        ping.packets_sent = 2;
        ping.packet_loss_percent = 100.0;
        let text = PlainFormatter::new().format_ping(&ping).unwrap();
        assert!(text.contains("RTT: unavailable"));
        assert!(text.contains("100.0% loss"));
    }

    #[test]
    fn test_dns_error() {
        let dns = DnsResult::failed("nope.invalid", "DNS resolution failed for nope.invalid: not found");
        let text = PlainFormatter::new().format_dns(&dns).unwrap();
        assert!(text.contains("Error: DNS resolution failed for nope.invalid"));
        assert!(!text.contains("IPv4 Address"));
    }

    #[test]
    fn test_dns_without_ipv6() {
        let mut dns = DnsResult::new("v4.example");
        dns.ipv4_address = Some("192.0.2.1".to_string());
        let text = PlainFormatter::new().format_dns(&dns).unwrap();
        assert!(text.contains("IPv6 Addresses: none"));
    }

    #[test]
    fn test_empty_port_list() {
        let text = PlainFormatter::new().format_ports(&[]).unwrap();
        assert!(text.ends_with("No ports probed"));
    }

    #[test]
    fn test_json_report_round_trips() {
        let report = sample_report();
        let json = JsonFormatter::new().format_report(&report).unwrap();
        let parsed: DiagnosticsReport = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed, report);
    }

    #[test]
    fn test_json_sections() {
        let report = sample_report();
        let formatter = JsonFormatter::new();
        let header: serde_json::Value =
            serde_json::from_str(&formatter.format_header(&report).unwrap()).unwrap();
        assert_eq!(header["host"], "example.com");

        let ports: serde_json::Value =
            serde_json::from_str(&formatter.format_ports(&report.port_results).unwrap()).unwrap();
        assert_eq!(ports[0]["status"], "open");
        assert_eq!(ports[2]["error"], "Network is unreachable");
    }
}
