use std::fmt;
use std::net::Ipv4Addr;

/// Counters and round-trip times (whole milliseconds) of one run.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ProbeStats {
    sent: u32,
    received: u32,
    min_ms: u64,
    max_ms: u64,
    total_ms: u64,
}

impl ProbeStats {
    pub(crate) fn record_sent(&mut self) {
        self.sent += 1;
    }

    pub(crate) fn record_reply(&mut self, elapsed_ms: u64) {
        self.received += 1;
        self.total_ms = self.total_ms.saturating_add(elapsed_ms);
        if self.received == 1 || elapsed_ms < self.min_ms {
            self.min_ms = elapsed_ms;
        }
        if elapsed_ms > self.max_ms {
            self.max_ms = elapsed_ms;
        }
    }

    pub fn sent(&self) -> u32 {
        self.sent
    }

    pub fn received(&self) -> u32 {
        self.received
    }

    pub fn lost(&self) -> u32 {
        self.sent - self.received
    }

    pub fn loss_percent(&self) -> f64 {
        if self.sent == 0 {
            0.0
        } else {
            f64::from(self.lost()) / f64::from(self.sent) * 100.0
        }
    }

    pub fn min_ms(&self) -> u64 {
        self.min_ms
    }

    pub fn max_ms(&self) -> u64 {
        self.max_ms
    }

    pub fn total_ms(&self) -> u64 {
        self.total_ms
    }

    /// Integer average over received replies; 0 when nothing came back.
    pub fn avg_ms(&self) -> u64 {
        if self.received == 0 {
            0
        } else {
            self.total_ms / u64::from(self.received)
        }
    }

    pub fn summary(&self, target: Ipv4Addr) -> ProbeSummary<'_> {
        ProbeSummary { target, stats: self }
    }
}

pub struct ProbeSummary<'a> {
    target: Ipv4Addr,
    stats: &'a ProbeStats,
}

impl fmt::Display for ProbeSummary<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let stats = self.stats;
        writeln!(f, "\nPing statistics for {}:", self.target)?;
        if stats.sent > 0 {
            writeln!(
                f,
                "    Packets: Sent = {}, Received = {}, Lost = {} ({:.0}% loss),",
                stats.sent,
                stats.received,
                stats.lost(),
                stats.loss_percent()
            )?;
        }
        writeln!(f, "Approximate round trip times in milli-seconds:")?;
        writeln!(
            f,
            "    Minimum = {}ms, Maximum = {}ms, Average = {}ms",
            stats.min_ms,
            stats.max_ms,
            stats.avg_ms()
        )
    }
}
