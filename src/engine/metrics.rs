//! Match metrics.
//!
//! Collected only by [`RuleSet::find_verbose`](crate::RuleSet::find_verbose);
//! the plain `find` path does not touch the clock.

use std::time::Duration;

/// Timing and scan depth for a single match.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct MatchStats {
    /// Rules tried before the scan stopped (all remaining rules on a miss).
    pub rules_scanned: usize,
    /// Wall-clock time spent in the scan.
    pub elapsed: Duration,
}
