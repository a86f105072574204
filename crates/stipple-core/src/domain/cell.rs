//! Records decoded from the contribution-graph document.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// One calendar day's activity marker, in document order.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct DayCell {
    /// Calendar date of the cell.
    pub date: NaiveDate,

    /// Number of contributions recorded on that date.
    pub count: u32,

    /// Fill color token as rendered in the source graph.
    pub fill: String,

    /// Column position in the weekly grid.
    pub x: i32,

    /// Row position in the weekly grid.
    pub y: i32,
}

/// Month caption above the grid. Layout metadata only.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct MonthLabel {
    pub name: String,
    pub x: i32,
    pub y: i32,
}

/// Weekday caption beside the grid. Layout metadata only.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct WeekdayLabel {
    pub name: String,

    /// False when the source styles the label as hidden.
    pub visible: bool,

    pub x: i32,
    pub y: i32,
}

/// A contiguous count interval `[lo, hi)` mapped to one intensity color.
///
/// Five bands cover "no activity" through "highest activity". They are
/// derived from the maximum count observed in the decoded cells, not from
/// any threshold recorded in the source document.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ColorBand {
    /// Color token for this intensity level.
    pub fill: String,

    /// Inclusive lower bound.
    pub lo: u32,

    /// Exclusive upper bound. The highest band is conceptually unbounded;
    /// it is stored as one past the maximum observed count.
    pub hi: u32,
}

impl ColorBand {
    /// Whether `count` falls inside this band's `[lo, hi)` interval.
    pub fn contains(&self, count: u32) -> bool {
        count >= self.lo && count < self.hi
    }
}

/// The decoded graph: one per parse call, immutable afterwards.
///
/// Never cached or shared between decodes; every call to
/// [`crate::graph::parse`] hands back a freshly owned value.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ContributionGraph {
    /// Day cells in document order (chronological by construction of the
    /// upstream layout; not re-sorted here).
    pub cells: Vec<DayCell>,

    /// Month captions, document order.
    pub months: Vec<MonthLabel>,

    /// Weekday captions, document order.
    pub weekdays: Vec<WeekdayLabel>,

    /// Intensity bands indexed 0 (no activity) through 4 (highest).
    pub bands: [ColorBand; 5],
}

impl ContributionGraph {
    /// Maximum contribution count across all cells, 0 for an empty graph.
    pub fn max_count(&self) -> u32 {
        self.cells.iter().map(|c| c.count).max().unwrap_or(0)
    }

    /// Index of the band containing `count`, if any.
    pub fn band_index(&self, count: u32) -> Option<usize> {
        self.bands.iter().position(|b| b.contains(count))
    }
}
