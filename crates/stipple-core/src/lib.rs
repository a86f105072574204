//! stipple core library
//!
//! Decodes a public contribution-graph SVG into a per-day intensity model
//! and replays that model as backdated git commits. The pipeline is strictly
//! sequential: fetch, [`graph::parse`], then [`populate::RepoPopulator`]
//! against a [`populate::CommitSink`].

pub mod domain;
pub mod fetch;
pub mod git;
pub mod graph;
pub mod populate;
pub mod telemetry;

pub use domain::{
    ColorBand, CommitPlanEntry, ContributionGraph, DayCell, FormatError, MonthLabel, PlanOutcome,
    PlanWarning, Result, StippleError, TransportError, WeekdayLabel,
};

pub use fetch::GraphClient;
pub use git::GitWorkspace;
pub use graph::{parse, validate};
pub use populate::{CommitSink, RepoPopulator};
pub use telemetry::init_tracing;

/// stipple version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
