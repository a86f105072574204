//! Commit-plan records produced from a decoded cell series.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// One day that should receive backdated commits.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct CommitPlanEntry {
    /// Commit date.
    pub date: NaiveDate,

    /// Number of commits to create on that date. Always positive; zero-count
    /// days never yield an entry.
    pub count: u32,
}

/// Non-fatal conditions detected while building a plan.
///
/// A degenerate pattern is a legitimate outcome, so these are reported and
/// carried alongside the (empty) plan rather than raised as errors.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub enum PlanWarning {
    /// The input cell series was empty.
    CommitDataMissing,

    /// Every cell had a zero count and no fill was requested.
    NothingToCommit,
}

impl std::fmt::Display for PlanWarning {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            PlanWarning::CommitDataMissing => write!(f, "commit data missing"),
            PlanWarning::NothingToCommit => write!(f, "nothing to commit"),
        }
    }
}

/// Result of a populate call: the realized plan plus any warning.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct PlanOutcome {
    /// Plan entries in the order they were applied.
    pub entries: Vec<CommitPlanEntry>,

    /// Set when the input was empty or had nothing to commit.
    pub warning: Option<PlanWarning>,

    /// Total commits created (sum of entry counts).
    pub commits_applied: u64,
}
