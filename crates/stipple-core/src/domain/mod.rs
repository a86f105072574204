//! Domain model: typed records for the decoded graph and the commit plan.

pub mod cell;
pub mod error;
pub mod plan;

pub use cell::{ColorBand, ContributionGraph, DayCell, MonthLabel, WeekdayLabel};
pub use error::{FormatError, Result, StippleError, TransportError};
pub use plan::{CommitPlanEntry, PlanOutcome, PlanWarning};
