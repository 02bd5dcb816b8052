//! Plain-text rendering of summaries and aggregates.

use chrono::{Duration, NaiveDate};

use diawatch_types::{DailyAggregate, GlycemicSummary, HourlyAggregate, TargetRange};

/// Reporting period selected on the command line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Period {
    /// Trailing window of N days ending today.
    Days(u32),
    /// The whole journal.
    All,
}

impl Period {
    /// Parse the `--period` argument. Unrecognized values mean the whole
    /// history, matching the report surface of the source system.
    pub fn parse(raw: &str) -> Self {
        match raw {
            "7" | "30" | "90" | "365" => Period::Days(raw.parse().unwrap_or(30)),
            _ => Period::All,
        }
    }

    /// First day covered by the period, or `None` for the whole history.
    pub fn start(&self, today: NaiveDate) -> Option<NaiveDate> {
        match self {
            Period::Days(days) => Some(today - Duration::days(i64::from(days - 1))),
            Period::All => None,
        }
    }

    /// Human-readable label for report headers.
    pub fn label(&self) -> String {
        match self {
            Period::Days(365) => "Last year".to_string(),
            Period::Days(days) => format!("Last {} days", days),
            Period::All => "All history".to_string(),
        }
    }
}

/// Render the full summary report.
pub fn render(
    patient: &str,
    period_label: &str,
    target: &TargetRange,
    summary: Option<&GlycemicSummary>,
    daily: &[DailyAggregate],
    hourly: &[HourlyAggregate],
    insulin: &[(NaiveDate, f64)],
) -> String {
    let mut out = String::new();

    out.push_str(&format!("Patient: {}\n", patient));
    out.push_str(&format!("Period: {}\n", period_label));
    out.push_str(&format!(
        "Target range: {:.1}-{:.1} mmol/L\n",
        target.min.value(),
        target.max.value()
    ));
    out.push('\n');

    let Some(summary) = summary else {
        out.push_str("No glucose measurements in this period.\n");
        push_insulin_section(&mut out, insulin);
        return out;
    };

    out.push_str(&format!("Glycemic summary (n = {})\n", summary.sample_count));
    out.push_str(&format!("  Mean glucose:   {:>7.2} mmol/L\n", summary.mean));
    out.push_str(&format!("  SD:             {:>7.2} mmol/L\n", summary.sd));
    out.push_str(&format!("  CV:             {:>7.2} %\n", summary.cv_pct));
    out.push_str(&format!("  GMI:            {:>7.2} %\n", summary.gmi_pct));
    out.push_str(&format!(
        "  Time in range:  {:>7.2} %\n",
        summary.time_in_range_pct
    ));
    out.push_str(&format!(
        "  Below range:    {:>7.2} %   (critical < 3.0: {:.2} %)\n",
        summary.below_range_pct, summary.critical_low_pct
    ));
    out.push_str(&format!(
        "  Above range:    {:>7.2} %\n",
        summary.above_range_pct
    ));

    if !daily.is_empty() {
        out.push('\n');
        out.push_str("Daily averages\n");
        for day in daily {
            out.push_str(&format!(
                "  {}  mean {:>5.2}  min {:>5.2}  max {:>5.2}  (n = {})\n",
                day.date,
                day.mean,
                day.min.value(),
                day.max.value(),
                day.count
            ));
        }
    }

    if !hourly.is_empty() {
        out.push('\n');
        out.push_str("Hourly profile\n");
        for bucket in hourly {
            out.push_str(&format!(
                "  {:02}:00  mean {:>5.2}  (n = {})\n",
                bucket.hour, bucket.mean, bucket.count
            ));
        }
    }

    push_insulin_section(&mut out, insulin);

    out
}

fn push_insulin_section(out: &mut String, insulin: &[(NaiveDate, f64)]) {
    if insulin.is_empty() {
        return;
    }
    out.push('\n');
    out.push_str("Daily insulin totals\n");
    for (date, total) in insulin {
        out.push_str(&format!("  {}  {:>6.2} U\n", date, total));
    }
}
