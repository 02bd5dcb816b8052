//! Derived glycemic metrics over a window of glucose samples.

use diawatch_types::{GlucoseSample, GlycemicSummary, MmolL, TargetRange};

/// Clinical level-2 hypoglycemia threshold.
pub const CRITICAL_LOW: MmolL = MmolL(3.0);

// GMI(%) = 3.31 + 0.02392 x mean glucose in mg/dL (Bergenstal et al., 2018).
const GMI_INTERCEPT: f64 = 3.31;
const GMI_SLOPE: f64 = 0.02392;

/// Compute the glycemic summary for a window of samples.
///
/// Returns `None` for an empty window - callers render that as "no data"
/// rather than treating it as a failure.
///
/// Edge cases follow the source system's reporting conventions:
/// - standard deviation is reported as 0 when fewer than two samples exist,
/// - CV is reported as 0 when the mean is 0,
/// - every output is rounded to two decimal places.
pub fn glycemic_summary(
    samples: &[GlucoseSample],
    target: &TargetRange,
) -> Option<GlycemicSummary> {
    if samples.is_empty() {
        return None;
    }

    let n = samples.len();
    let values: Vec<f64> = samples.iter().map(|s| s.value.value()).collect();

    let mean = values.iter().sum::<f64>() / n as f64;
    let sd = sample_sd(&values, mean);
    let cv_pct = if mean > 0.0 { sd / mean * 100.0 } else { 0.0 };
    let gmi_pct = GMI_INTERCEPT + GMI_SLOPE * MmolL(mean).as_mg_dl();

    let in_range = samples.iter().filter(|s| target.contains(s.value)).count();
    let below = samples.iter().filter(|s| s.value < target.min).count();
    let critical = samples.iter().filter(|s| s.value < CRITICAL_LOW).count();
    let above = samples.iter().filter(|s| s.value > target.max).count();

    Some(GlycemicSummary {
        mean: round2(mean),
        sd: round2(sd),
        cv_pct: round2(cv_pct),
        gmi_pct: round2(gmi_pct),
        time_in_range_pct: round2(pct(in_range, n)),
        below_range_pct: round2(pct(below, n)),
        critical_low_pct: round2(pct(critical, n)),
        above_range_pct: round2(pct(above, n)),
        sample_count: n,
    })
}

/// Sample standard deviation (n-1 denominator); 0 when n <= 1.
fn sample_sd(values: &[f64], mean: f64) -> f64 {
    if values.len() <= 1 {
        return 0.0;
    }
    let variance = values
        .iter()
        .map(|v| {
            let d = v - mean;
            d * d
        })
        .sum::<f64>()
        / (values.len() - 1) as f64;
    variance.sqrt()
}

fn pct(count: usize, total: usize) -> f64 {
    count as f64 / total as f64 * 100.0
}

/// Round to two decimal places, the reporting precision of the source system.
pub(crate) fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{NaiveDate, NaiveTime};

    fn sample(value: f64, hour: u32) -> GlucoseSample {
        GlucoseSample::new(
            MmolL(value),
            NaiveDate::from_ymd_opt(2025, 3, 14).unwrap(),
            NaiveTime::from_hms_opt(hour, 0, 0).unwrap(),
        )
    }

    fn samples(values: &[f64]) -> Vec<GlucoseSample> {
        values
            .iter()
            .enumerate()
            .map(|(i, v)| sample(*v, (i % 24) as u32))
            .collect()
    }

    // ========================================================================
    // Sentinel and edge cases
    // ========================================================================

    #[test]
    fn empty_window_yields_none() {
        assert!(glycemic_summary(&[], &TargetRange::default()).is_none());
    }

    #[test]
    fn single_sample_has_zero_sd() {
        let s = glycemic_summary(&samples(&[5.6]), &TargetRange::default()).unwrap();
        assert_eq!(s.sample_count, 1);
        assert_eq!(s.mean, 5.6);
        assert_eq!(s.sd, 0.0);
        assert_eq!(s.cv_pct, 0.0);
    }

    #[test]
    fn zero_mean_reports_zero_cv() {
        // Not physiological, but the engine must not divide by zero.
        let s = glycemic_summary(&samples(&[0.0, 0.0]), &TargetRange::default()).unwrap();
        assert_eq!(s.mean, 0.0);
        assert_eq!(s.cv_pct, 0.0);
    }

    // ========================================================================
    // Formulas
    // ========================================================================

    #[test]
    fn mean_and_sd_for_known_values() {
        // values 4, 6, 8: mean 6, sample variance ((4)+(0)+(4))/2 = 4, sd 2
        let s = glycemic_summary(&samples(&[4.0, 6.0, 8.0]), &TargetRange::default()).unwrap();
        assert_eq!(s.mean, 6.0);
        assert_eq!(s.sd, 2.0);
        assert!((s.cv_pct - 33.33).abs() < 0.01);
    }

    #[test]
    fn cv_matches_sd_over_mean() {
        let list = samples(&[3.2, 5.1, 7.4, 9.8, 6.0, 4.4]);
        let s = glycemic_summary(&list, &TargetRange::default()).unwrap();
        // Rounding happens after the division, so recompute from raw values.
        let values: Vec<f64> = list.iter().map(|x| x.value.value()).collect();
        let mean = values.iter().sum::<f64>() / values.len() as f64;
        let sd = {
            let var = values.iter().map(|v| (v - mean).powi(2)).sum::<f64>()
                / (values.len() - 1) as f64;
            var.sqrt()
        };
        assert!((s.cv_pct - sd / mean * 100.0).abs() < 0.01);
    }

    #[test]
    fn gmi_for_known_mean() {
        // mean 10 mmol/L = 180.182 mg/dL; GMI = 3.31 + 0.02392 * 180.182
        let s = glycemic_summary(&samples(&[10.0, 10.0]), &TargetRange::default()).unwrap();
        assert!((s.gmi_pct - 7.62).abs() < 0.01);
    }

    // ========================================================================
    // Range partition
    // ========================================================================

    #[test]
    fn partition_accounts_for_all_samples() {
        // 2.5 critical+below, 3.5 below, 5.0 in, 9.0 in (inclusive), 12.0 above
        let s = glycemic_summary(
            &samples(&[2.5, 3.5, 5.0, 9.0, 12.0]),
            &TargetRange::default(),
        )
        .unwrap();
        assert_eq!(s.time_in_range_pct, 40.0);
        assert_eq!(s.below_range_pct, 40.0);
        assert_eq!(s.above_range_pct, 20.0);
        assert_eq!(s.critical_low_pct, 20.0);

        let total = s.time_in_range_pct + s.below_range_pct + s.above_range_pct;
        assert!((total - 100.0).abs() < 0.01);
    }

    #[test]
    fn partition_sums_to_hundred_for_arbitrary_input() {
        let s = glycemic_summary(
            &samples(&[2.9, 3.0, 3.9, 4.0, 4.1, 8.9, 9.0, 9.1, 20.0, 6.6, 7.7]),
            &TargetRange::default(),
        )
        .unwrap();
        let total = s.time_in_range_pct + s.below_range_pct + s.above_range_pct;
        assert!((total - 100.0).abs() < 0.05); // rounding slack
    }

    #[test]
    fn bounds_are_inclusive_in_range() {
        let s = glycemic_summary(&samples(&[4.0, 9.0]), &TargetRange::default()).unwrap();
        assert_eq!(s.time_in_range_pct, 100.0);
        assert_eq!(s.below_range_pct, 0.0);
        assert_eq!(s.above_range_pct, 0.0);
    }

    #[test]
    fn critical_low_is_subset_of_below() {
        let s = glycemic_summary(&samples(&[2.0, 3.5]), &TargetRange::default()).unwrap();
        assert_eq!(s.below_range_pct, 100.0);
        assert_eq!(s.critical_low_pct, 50.0);
    }

    #[test]
    fn custom_target_range_is_honored() {
        let tight = TargetRange::new(5.0, 7.0);
        let s = glycemic_summary(&samples(&[4.5, 6.0, 7.5]), &tight).unwrap();
        assert!((s.time_in_range_pct - 33.33).abs() < 0.01);
        assert!((s.below_range_pct - 33.33).abs() < 0.01);
        assert!((s.above_range_pct - 33.33).abs() < 0.01);
    }

    #[test]
    fn outputs_are_rounded_to_two_decimals() {
        let s = glycemic_summary(&samples(&[5.123, 6.456, 7.789]), &TargetRange::default())
            .unwrap();
        for v in [
            s.mean,
            s.sd,
            s.cv_pct,
            s.gmi_pct,
            s.time_in_range_pct,
            s.below_range_pct,
            s.critical_low_pct,
            s.above_range_pct,
        ] {
            assert_eq!(round2(v), v);
        }
    }
}
