//! Turns a decoded cell series into backdated commits.
//!
//! The populator walks the cells in input order (chronological by
//! construction of the source layout) and drives a [`CommitSink`] once per
//! plan entry, so the backend sees monotonically increasing commit dates.

use chrono::NaiveDate;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use tracing::{info, warn};

use crate::domain::error::Result;
use crate::domain::{ColorBand, CommitPlanEntry, DayCell, PlanOutcome, PlanWarning};

/// Applies plan entries against a version-control backend.
///
/// Called once per entry, in plan order. Implementations fail loudly; errors
/// propagate to the caller without retries.
pub trait CommitSink {
    /// Create `count` commits dated `date`.
    fn commit(&mut self, date: NaiveDate, count: u32) -> Result<()>;
}

/// Relative draw weight of each band index when synthesizing counts for
/// empty days. Skewed toward low-but-nonzero activity, matching the shape of
/// real contribution histories.
const FILL_BIAS: [usize; 11] = [0, 0, 1, 1, 1, 1, 2, 2, 2, 3, 4];

/// Drives a [`CommitSink`] from a decoded cell series.
pub struct RepoPopulator<'a, S: CommitSink> {
    sink: &'a mut S,
}

impl<'a, S: CommitSink> RepoPopulator<'a, S> {
    pub fn new(sink: &'a mut S) -> Self {
        Self { sink }
    }

    /// Build a commit plan from `cells` and apply it.
    ///
    /// In literal mode (`randomize = false`) every cell with a positive
    /// count becomes one entry; zero-count cells are skipped. In randomized
    /// mode zero-count cells are filled with a synthesized count drawn from
    /// the band lower bounds.
    ///
    /// Empty or all-zero input is a warning, not an error: the outcome
    /// carries zero entries and the corresponding [`PlanWarning`].
    ///
    /// Reseeds from the OS on every call, so randomized fills are not
    /// reproducible across runs. Use [`Self::populate_with_rng`] for a
    /// deterministic source.
    pub fn populate(
        &mut self,
        cells: &[DayCell],
        bands: &[ColorBand; 5],
        randomize: bool,
    ) -> Result<PlanOutcome> {
        let mut rng = StdRng::from_os_rng();
        self.populate_with_rng(cells, bands, randomize, &mut rng)
    }

    /// Like [`Self::populate`] but with an injected random source.
    pub fn populate_with_rng(
        &mut self,
        cells: &[DayCell],
        bands: &[ColorBand; 5],
        randomize: bool,
        rng: &mut impl Rng,
    ) -> Result<PlanOutcome> {
        if cells.is_empty() {
            warn!("{}", PlanWarning::CommitDataMissing);
            return Ok(PlanOutcome {
                entries: Vec::new(),
                warning: Some(PlanWarning::CommitDataMissing),
                commits_applied: 0,
            });
        }

        let mut entries = Vec::new();
        for cell in cells {
            let count = if cell.count == 0 && randomize {
                synthesize_count(bands, rng)
            } else {
                cell.count
            };
            if count > 0 {
                entries.push(CommitPlanEntry {
                    date: cell.date,
                    count,
                });
            }
        }

        if entries.is_empty() {
            warn!("{}", PlanWarning::NothingToCommit);
            return Ok(PlanOutcome {
                entries,
                warning: Some(PlanWarning::NothingToCommit),
                commits_applied: 0,
            });
        }

        let mut commits_applied = 0u64;
        for entry in &entries {
            self.sink.commit(entry.date, entry.count)?;
            commits_applied += u64::from(entry.count);
        }

        info!(
            days = entries.len(),
            commits = commits_applied,
            randomize,
            "populated commit plan"
        );

        Ok(PlanOutcome {
            entries,
            warning: None,
            commits_applied,
        })
    }
}

/// Synthesized count for an empty day: the lower bound of a band drawn from
/// the bias table, clamped to 1. Band 0's lower bound is 0; the clamp maps a
/// band-0 draw onto band 1's bound, keeping every synthesized count a band
/// lower bound and strictly positive.
fn synthesize_count(bands: &[ColorBand; 5], rng: &mut impl Rng) -> u32 {
    let idx = FILL_BIAS[rng.random_range(0..FILL_BIAS.len())];
    bands[idx].lo.max(1)
}
