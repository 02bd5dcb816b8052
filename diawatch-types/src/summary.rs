//! Derived-metrics output types produced by the analytics engine.

use chrono::NaiveDate;

use crate::MmolL;

/// Derived glycemic metrics for one patient over a selected window.
///
/// Produced by the analytics engine from a sequence of glucose samples and
/// the patient's target range. All floating point fields are rounded to two
/// decimal places.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct GlycemicSummary {
    /// Arithmetic mean glucose, mmol/L.
    pub mean: f64,

    /// Sample standard deviation, mmol/L. Zero when fewer than two samples.
    pub sd: f64,

    /// Coefficient of variation, percent. Zero when the mean is zero.
    pub cv_pct: f64,

    /// Glucose Management Indicator, percent (HbA1c estimate).
    pub gmi_pct: f64,

    /// Share of samples inside the target range, percent.
    pub time_in_range_pct: f64,

    /// Share of samples below the target minimum, percent.
    pub below_range_pct: f64,

    /// Share of samples below the critical 3.0 mmol/L threshold, percent.
    /// A subset of `below_range_pct`.
    pub critical_low_pct: f64,

    /// Share of samples above the target maximum, percent.
    pub above_range_pct: f64,

    /// Number of samples the summary was computed from.
    pub sample_count: usize,
}

/// Per-day glucose aggregate for trend charts and reports.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct DailyAggregate {
    /// The day the samples fall on.
    pub date: NaiveDate,

    /// Mean glucose for the day, mmol/L, rounded to two decimals.
    pub mean: f64,

    /// Lowest reading of the day.
    pub min: MmolL,

    /// Highest reading of the day.
    pub max: MmolL,

    /// Number of readings that day.
    pub count: usize,
}

/// Mean glucose for one hour of the day across the whole window.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct HourlyAggregate {
    /// Hour of day, 0-23.
    pub hour: u32,

    /// Mean glucose across the window for this hour, mmol/L.
    pub mean: f64,

    /// Number of readings in this hour bucket.
    pub count: usize,
}
