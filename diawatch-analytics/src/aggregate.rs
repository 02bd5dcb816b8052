//! Daily and hourly aggregation of measurement records.

use std::collections::BTreeMap;

use chrono::{NaiveDate, Timelike};

use diawatch_types::{DailyAggregate, GlucoseSample, HourlyAggregate, InsulinDose, MmolL};

use crate::engine::round2;

/// Group glucose samples by calendar day and average each day.
///
/// Days are returned in chronological order; days without samples are
/// simply absent.
pub fn daily_averages(samples: &[GlucoseSample]) -> Vec<DailyAggregate> {
    let mut by_day: BTreeMap<NaiveDate, Vec<f64>> = BTreeMap::new();
    for sample in samples {
        by_day.entry(sample.date).or_default().push(sample.value.value());
    }

    by_day
        .into_iter()
        .map(|(date, values)| {
            let count = values.len();
            let mean = values.iter().sum::<f64>() / count as f64;
            let min = values.iter().copied().fold(f64::INFINITY, f64::min);
            let max = values.iter().copied().fold(f64::NEG_INFINITY, f64::max);
            DailyAggregate {
                date,
                mean: round2(mean),
                min: MmolL(min),
                max: MmolL(max),
                count,
            }
        })
        .collect()
}

/// Average glucose per hour of day across the whole window.
///
/// Useful for spotting recurring daily patterns (dawn highs, post-lunch
/// spikes). Only hours with at least one reading are returned, ordered by
/// hour.
pub fn hourly_profile(samples: &[GlucoseSample]) -> Vec<HourlyAggregate> {
    let mut by_hour: BTreeMap<u32, Vec<f64>> = BTreeMap::new();
    for sample in samples {
        by_hour
            .entry(sample.time.hour())
            .or_default()
            .push(sample.value.value());
    }

    by_hour
        .into_iter()
        .map(|(hour, values)| {
            let count = values.len();
            let mean = values.iter().sum::<f64>() / count as f64;
            HourlyAggregate {
                hour,
                mean: round2(mean),
                count,
            }
        })
        .collect()
}

/// Total insulin dose per day, in chronological order.
pub fn total_daily_insulin(doses: &[InsulinDose]) -> Vec<(NaiveDate, f64)> {
    let mut by_day: BTreeMap<NaiveDate, f64> = BTreeMap::new();
    for dose in doses {
        *by_day.entry(dose.date).or_insert(0.0) += dose.dose;
    }

    by_day
        .into_iter()
        .map(|(date, total)| (date, round2(total)))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveTime;

    fn date(d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2025, 3, d).unwrap()
    }

    fn at(d: u32, hour: u32, value: f64) -> GlucoseSample {
        GlucoseSample::new(
            MmolL(value),
            date(d),
            NaiveTime::from_hms_opt(hour, 0, 0).unwrap(),
        )
    }

    #[test]
    fn daily_averages_empty_input() {
        assert!(daily_averages(&[]).is_empty());
    }

    #[test]
    fn daily_averages_groups_and_orders() {
        let samples = vec![at(15, 8, 6.0), at(14, 8, 4.0), at(14, 20, 8.0)];
        let days = daily_averages(&samples);

        assert_eq!(days.len(), 2);
        assert_eq!(days[0].date, date(14));
        assert_eq!(days[0].mean, 6.0);
        assert_eq!(days[0].min, MmolL(4.0));
        assert_eq!(days[0].max, MmolL(8.0));
        assert_eq!(days[0].count, 2);

        assert_eq!(days[1].date, date(15));
        assert_eq!(days[1].mean, 6.0);
        assert_eq!(days[1].count, 1);
    }

    #[test]
    fn daily_mean_is_rounded() {
        let samples = vec![at(14, 8, 5.0), at(14, 12, 5.555), at(14, 20, 6.111)];
        let days = daily_averages(&samples);
        assert_eq!(days[0].mean, 5.56); // (5.0 + 5.555 + 6.111) / 3 = 5.5553...
    }

    #[test]
    fn hourly_profile_empty_input() {
        assert!(hourly_profile(&[]).is_empty());
    }

    #[test]
    fn hourly_profile_buckets_across_days() {
        let samples = vec![at(14, 8, 5.0), at(15, 8, 7.0), at(14, 13, 9.0)];
        let hours = hourly_profile(&samples);

        assert_eq!(hours.len(), 2);
        assert_eq!(hours[0].hour, 8);
        assert_eq!(hours[0].mean, 6.0);
        assert_eq!(hours[0].count, 2);
        assert_eq!(hours[1].hour, 13);
        assert_eq!(hours[1].count, 1);
    }

    #[test]
    fn insulin_totals_per_day() {
        let t = NaiveTime::from_hms_opt(9, 0, 0).unwrap();
        let doses = vec![
            InsulinDose::new(4.0, "bolus", date(14), t),
            InsulinDose::new(6.5, "bolus", date(14), t),
            InsulinDose::new(12.0, "basal", date(15), t),
        ];

        let totals = total_daily_insulin(&doses);
        assert_eq!(totals, vec![(date(14), 10.5), (date(15), 12.0)]);
    }

    #[test]
    fn insulin_totals_empty_input() {
        assert!(total_daily_insulin(&[]).is_empty());
    }
}
