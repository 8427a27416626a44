//! OveruseGuard: flags a move to a station the worker already visits far
//! more often than their own average. Advisory only.

use crate::config::Config;
use crate::core::history::VisitCounts;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct OverusePolicy {
    /// Warn above `ratio * mean`.
    pub ratio: f64,
    /// ...and only above this absolute count.
    pub min_count: u32,
}

impl Default for OverusePolicy {
    fn default() -> Self {
        Self {
            ratio: 1.5,
            min_count: 5,
        }
    }
}

impl From<&Config> for OverusePolicy {
    fn from(cfg: &Config) -> Self {
        Self {
            ratio: cfg.overuse_ratio,
            min_count: cfg.overuse_min_count,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Verdict {
    Ok,
    Warn { count: u32, threshold: f64 },
}

impl Verdict {
    pub fn is_warn(&self) -> bool {
        matches!(self, Verdict::Warn { .. })
    }
}

/// Mean of the non-zero visit counts (0 when there are none).
///
/// Stations never visited are left out, not averaged in as zero.
pub fn mean_visits(history: &VisitCounts) -> f64 {
    let entries: Vec<u32> = history.values().copied().filter(|c| *c > 0).collect();
    if entries.is_empty() {
        return 0.0;
    }
    entries.iter().map(|c| *c as f64).sum::<f64>() / entries.len() as f64
}

pub fn evaluate(to_station: &str, history: &VisitCounts, policy: &OverusePolicy) -> Verdict {
    let threshold = policy.ratio * mean_visits(history);
    let count = history.get(to_station).copied().unwrap_or(0);

    if count as f64 > threshold && count > policy.min_count {
        Verdict::Warn { count, threshold }
    } else {
        Verdict::Ok
    }
}
