//! Ordered fallback patterns for `ping` summary lines
//!
//! Each platform owns two lists: one for packet counts and one for
//! round-trip times. Lists are tried front to back and the first pattern
//! that matches wins. Capture group numbers are part of each entry so a
//! list can mix layouts whose fields come in different orders.

use regex::{Captures, Regex};
use std::sync::OnceLock;

use crate::types::Platform;

/// Packet count pattern and the groups holding each figure
#[derive(Debug, Clone)]
pub struct CountPattern {
    regex: Regex,
    sent: usize,
    received: usize,
    loss: Option<usize>,
}

/// Extracted packet figures
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PacketCounts {
    pub sent: u32,
    pub received: u32,
    /// Loss percentage as printed, when the layout includes it
    pub loss_percent: Option<f64>,
}

impl CountPattern {
    /// `None` when `pattern` does not compile
    pub fn new(pattern: &str, sent: usize, received: usize, loss: Option<usize>) -> Option<Self> {
        Some(Self {
            regex: Regex::new(pattern).ok()?,
            sent,
            received,
            loss,
        })
    }

    pub fn extract(&self, text: &str) -> Option<PacketCounts> {
        let caps = self.regex.captures(text)?;
        Some(PacketCounts {
            sent: group(&caps, self.sent).unwrap_or(0),
            received: group(&caps, self.received).unwrap_or(0),
            loss_percent: self.loss.and_then(|i| group(&caps, i)),
        })
    }

    pub fn as_str(&self) -> &str {
        self.regex.as_str()
    }
}

/// Round-trip pattern and the groups holding min, avg and max
#[derive(Debug, Clone)]
pub struct RttPattern {
    regex: Regex,
    min: usize,
    avg: usize,
    max: usize,
}

/// Extracted round-trip figures in milliseconds
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RoundTrip {
    pub min: Option<f64>,
    pub avg: Option<f64>,
    pub max: Option<f64>,
}

impl RttPattern {
    /// `None` when `pattern` does not compile
    pub fn new(pattern: &str, min: usize, avg: usize, max: usize) -> Option<Self> {
        Some(Self {
            regex: Regex::new(pattern).ok()?,
            min,
            avg,
            max,
        })
    }

    pub fn extract(&self, text: &str) -> Option<RoundTrip> {
        let caps = self.regex.captures(text)?;
        Some(RoundTrip {
            min: group(&caps, self.min),
            avg: group(&caps, self.avg),
            max: group(&caps, self.max),
        })
    }

    pub fn as_str(&self) -> &str {
        self.regex.as_str()
    }
}

fn group<T: std::str::FromStr>(caps: &Captures<'_>, index: usize) -> Option<T> {
    caps.get(index)?.as_str().parse().ok()
}

/// Both fallback lists for one platform
#[derive(Debug, Clone)]
pub struct PatternSet {
    pub counts: Vec<CountPattern>,
    pub rtts: Vec<RttPattern>,
}

// Unix "N packets transmitted, M received"; macOS adds "packets" before "received"
const UNIX_COUNTS: &str = r"(\d+) packets transmitted, (\d+) received";
const DARWIN_COUNTS: &str = r"(\d+) packets transmitted, (\d+) packets received, ([\d.]+)% packet loss";
const WINDOWS_COUNTS: &str = r"Sent = (\d+), Received = (\d+)";
const WINDOWS_PACKETS_COUNTS: &str = r"Packets: Sent = (\d+), Received = (\d+)";
const UNIX_ANY_COUNTS: &str = r"(\d+) packets transmitted, (\d+) (?:packets )?received";

const DARWIN_RTT: &str = r"round-trip min/avg/max/stddev = ([\d.]+)/([\d.]+)/([\d.]+)/([\d.]+)";
const WINDOWS_INT_RTT: &str = r"Minimum = (\d+)ms, Maximum = (\d+)ms, Average = (\d+)ms";
const WINDOWS_FLOAT_RTT: &str = r"Minimum = ([\d.]+)ms, Maximum = ([\d.]+)ms, Average = ([\d.]+)ms";
const SLASH_RTT: &str = r"min/avg/max(?:/\w+)? = ([\d.]+)/([\d.]+)/([\d.]+)";
const COMPACT_RTT: &str = r"min/avg/max/\w*=([\d.]+)/([\d.]+)/([\d.]+)";
const LINUX_RTT: &str = r"rtt min/avg/max/mdev = ([\d.]+)/([\d.]+)/([\d.]+)/([\d.]+)";

impl PatternSet {
    /// Build the lists for `platform`
    ///
    /// The generic slash fallbacks (`SLASH_RTT`, `COMPACT_RTT`) read their
    /// groups as min, max, avg even though the text labels them min/avg/max.
    /// Existing reports depend on that order.
    pub fn for_platform(platform: Platform) -> Self {
        let (counts, rtts) = match platform {
            Platform::Darwin => (
                vec![CountPattern::new(DARWIN_COUNTS, 1, 2, Some(3))],
                vec![RttPattern::new(DARWIN_RTT, 1, 2, 3)],
            ),
            Platform::Windows => (
                vec![
                    CountPattern::new(WINDOWS_COUNTS, 1, 2, None),
                    CountPattern::new(WINDOWS_PACKETS_COUNTS, 1, 2, None),
                    CountPattern::new(UNIX_ANY_COUNTS, 1, 2, None),
                ],
                vec![
                    RttPattern::new(WINDOWS_INT_RTT, 1, 3, 2),
                    RttPattern::new(WINDOWS_FLOAT_RTT, 1, 3, 2),
                    RttPattern::new(SLASH_RTT, 1, 3, 2),
                ],
            ),
            Platform::Linux => (
                vec![
                    CountPattern::new(UNIX_COUNTS, 1, 2, None),
                    CountPattern::new(UNIX_COUNTS, 1, 2, None),
                    CountPattern::new(WINDOWS_COUNTS, 1, 2, None),
                ],
                vec![
                    RttPattern::new(COMPACT_RTT, 1, 3, 2),
                    RttPattern::new(LINUX_RTT, 1, 2, 3),
                    RttPattern::new(WINDOWS_FLOAT_RTT, 1, 3, 2),
                ],
            ),
        };

        Self {
            counts: counts.into_iter().flatten().collect(),
            rtts: rtts.into_iter().flatten().collect(),
        }
    }

    /// Shared, lazily compiled set for `platform`
    pub fn cached(platform: Platform) -> &'static PatternSet {
        static DARWIN: OnceLock<PatternSet> = OnceLock::new();
        static WINDOWS: OnceLock<PatternSet> = OnceLock::new();
        static LINUX: OnceLock<PatternSet> = OnceLock::new();

        let cell = match platform {
            Platform::Darwin => &DARWIN,
            Platform::Windows => &WINDOWS,
            Platform::Linux => &LINUX,
        };
        cell.get_or_init(|| Self::for_platform(platform))
    }

    /// First packet count match, if any
    pub fn match_counts(&self, text: &str) -> Option<PacketCounts> {
        self.counts.iter().find_map(|p| p.extract(text))
    }

    /// First round-trip match, if any
    pub fn match_rtt(&self, text: &str) -> Option<RoundTrip> {
        self.rtts.iter().find_map(|p| p.extract(text))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_every_pattern_compiles() {
        let expected = [(Platform::Darwin, 1, 1), (Platform::Windows, 3, 3), (Platform::Linux, 3, 3)];
        for (platform, counts, rtts) in expected {
            let set = PatternSet::for_platform(platform);
            assert_eq!(set.counts.len(), counts, "{} count patterns", platform);
            assert_eq!(set.rtts.len(), rtts, "{} rtt patterns", platform);
        }
    }

    #[test]
    fn test_invalid_pattern_is_skipped() {
        assert!(CountPattern::new(r"(\d+", 1, 2, None).is_none());
        assert!(RttPattern::new(r"[", 1, 2, 3).is_none());
    }

    #[test]
    fn test_first_matching_pattern_wins() {
        // Both Windows count layouts match; the plain one is listed first
        let set = PatternSet::for_platform(Platform::Windows);
        let text = "Packets: Sent = 4, Received = 3, Lost = 1 (25% loss),";
        let counts = set.match_counts(text).unwrap();
        assert_eq!((counts.sent, counts.received), (4, 3));
        assert!(set.counts[0].extract(text).is_some());
    }

    #[test]
    fn test_windows_unix_fallback() {
        let set = PatternSet::for_platform(Platform::Windows);
        let counts = set.match_counts("5 packets transmitted, 5 packets received, 0.0% packet loss").unwrap();
        assert_eq!((counts.sent, counts.received), (5, 5));
        assert_eq!(counts.loss_percent, None);
    }

    #[test]
    fn test_slash_fallback_reads_min_max_avg() {
        let set = PatternSet::for_platform(Platform::Windows);
        let rtt = set.match_rtt("round-trip min/avg/max = 1.0/2.0/3.0 ms").unwrap();
        assert_eq!(rtt.min, Some(1.0));
        assert_eq!(rtt.max, Some(2.0));
        assert_eq!(rtt.avg, Some(3.0));
    }

    #[test]
    fn test_linux_compact_fallback_reads_min_max_avg() {
        let set = PatternSet::for_platform(Platform::Linux);
        let rtt = set.match_rtt("min/avg/max/mdev=1.5/2.5/3.5/0.2").unwrap();
        assert_eq!(rtt.min, Some(1.5));
        assert_eq!(rtt.max, Some(2.5));
        assert_eq!(rtt.avg, Some(3.5));
    }

    #[test]
    fn test_windows_fallback_on_linux() {
        let set = PatternSet::for_platform(Platform::Linux);
        let rtt = set
            .match_rtt("Minimum = 10.5ms, Maximum = 20.5ms, Average = 15.5ms")
            .unwrap();
        assert_eq!(rtt.min, Some(10.5));
        assert_eq!(rtt.avg, Some(15.5));
        assert_eq!(rtt.max, Some(20.5));
    }

    #[test]
    fn test_unparseable_group_becomes_none() {
        let pattern = RttPattern::new(r"rtt = ([\d.]+)/([\d.]+)/([\d.]+)", 1, 2, 3).unwrap();
        let rtt = pattern.extract("rtt = 1.0/../3.0").unwrap();
        assert_eq!(rtt.min, Some(1.0));
        assert_eq!(rtt.avg, None);
        assert_eq!(rtt.max, Some(3.0));
    }

    #[test]
    fn test_cached_set_is_shared() {
        let a = PatternSet::cached(Platform::Linux) as *const PatternSet;
        let b = PatternSet::cached(Platform::Linux) as *const PatternSet;
        assert_eq!(a, b);
    }
}
