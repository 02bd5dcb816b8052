//! # diawatch-analytics
//!
//! Glycemic analytics for diabetes self-management: derived-metrics
//! computation over timestamped glucose samples, daily/hourly aggregation,
//! a thread-safe measurement journal, and the weekly context builder that
//! summarizes a patient's data for the RAG assistant.
//!
//! ## Quick Start
//!
//! ```rust
//! use chrono::{NaiveDate, NaiveTime};
//! use diawatch_analytics::{glycemic_summary, Journal};
//! use diawatch_types::{GlucoseSample, MmolL, TargetRange};
//!
//! let journal = Journal::new();
//! let handle = journal.register("patient");
//!
//! let date = NaiveDate::from_ymd_opt(2025, 3, 14).unwrap();
//! let time = NaiveTime::from_hms_opt(8, 30, 0).unwrap();
//! handle
//!     .record_glucose(GlucoseSample::new(MmolL(5.6), date, time))
//!     .unwrap();
//!
//! let samples = handle.glucose_all();
//! let summary = glycemic_summary(&samples, &TargetRange::default()).unwrap();
//! assert_eq!(summary.time_in_range_pct, 100.0);
//! ```
//!
//! The engine itself is a pure function: no clocks, no storage. "Today" is
//! always a parameter, so windows and reports are reproducible.

mod aggregate;
mod context;
mod engine;
mod error;
mod handle;
mod journal;

pub use aggregate::*;
pub use context::*;
pub use engine::*;
pub use error::RecordError;
pub use handle::PatientHandle;
pub use journal::Journal;

// Re-export types for convenience
pub use diawatch_types::{
    DailyAggregate, GlucoseSample, GlycemicSummary, HourlyAggregate, MmolL, TargetRange,
};
