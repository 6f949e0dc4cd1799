//! Normalizes `ping` summaries into [`PingResult`]

use crate::logging::TraceSink;
use crate::models::PingResult;
use crate::ping::patterns::PatternSet;
use crate::types::Platform;
use std::sync::Arc;

/// Parser for one platform's `ping` output
#[derive(Clone)]
pub struct PingParser {
    platform: Platform,
    patterns: &'static PatternSet,
    trace: Option<Arc<dyn TraceSink>>,
}

impl PingParser {
    pub fn new(platform: Platform) -> Self {
        Self {
            platform,
            patterns: PatternSet::cached(platform),
            trace: None,
        }
    }

    /// Send every raw input to `sink` before parsing
    pub fn with_trace(mut self, sink: Arc<dyn TraceSink>) -> Self {
        self.trace = Some(sink);
        self
    }

    pub fn platform(&self) -> Platform {
        self.platform
    }

    /// Parse raw output; never fails
    ///
    /// Fields without a matching pattern keep their defaults. When at least
    /// one packet was sent, loss is recomputed from the counts and replaces
    /// any printed percentage.
    pub fn parse(&self, raw: &str) -> PingResult {
        if let Some(sink) = &self.trace {
            sink.trace("ping", raw);
        }

        let mut result = PingResult::empty();

        if let Some(counts) = self.patterns.match_counts(raw) {
            result.packets_sent = counts.sent;
            result.packets_received = counts.received;
            if let Some(loss) = counts.loss_percent {
                result.packet_loss_percent = loss;
            }
        }

        if let Some(rtt) = self.patterns.match_rtt(raw) {
            result.min_rtt = rtt.min;
            result.avg_rtt = rtt.avg;
            result.max_rtt = rtt.max;
        }

        if result.packets_sent > 0 {
            let received = f64::from(result.packets_received);
            let sent = f64::from(result.packets_sent);
            result.packet_loss_percent = (100.0 - received / sent * 100.0).clamp(0.0, 100.0);
        }

        result
    }
}

/// Parse `raw` ping output produced on `platform`
pub fn parse_ping_output(raw: &str, platform: Platform) -> PingResult {
    PingParser::new(platform).parse(raw)
}
