//! Patient handle for recording and querying measurements.

use std::sync::Arc;

use chrono::{Duration, NaiveDate};

use diawatch_types::{
    ActivityRecord, GlucoseSample, InsulinDose, JournalDocument, MealRecord, PatientProfile,
};

use crate::error::RecordError;
use crate::journal::PatientState;

/// Maximum insulin dose accepted at the input boundary, in units.
const MAX_INSULIN_DOSE: f64 = 100.0;

/// A handle for recording and querying one patient's measurements.
///
/// Obtain a handle from [`crate::Journal::register`]. Handles are cheap to
/// clone and share the same underlying state.
///
/// # Example
///
/// ```rust
/// use chrono::{NaiveDate, NaiveTime};
/// use diawatch_analytics::Journal;
/// use diawatch_types::{GlucoseSample, MmolL};
///
/// let journal = Journal::new();
/// let handle = journal.register("patient");
///
/// let date = NaiveDate::from_ymd_opt(2025, 3, 14).unwrap();
/// let time = NaiveTime::from_hms_opt(8, 30, 0).unwrap();
/// handle
///     .record_glucose(GlucoseSample::new(MmolL(5.6), date, time))
///     .unwrap();
///
/// assert_eq!(handle.glucose_all().len(), 1);
/// ```
#[derive(Clone)]
pub struct PatientHandle {
    state: Arc<PatientState>,
    name: String,
}

impl PatientHandle {
    pub(crate) fn new(state: Arc<PatientState>, name: String) -> Self {
        Self { state, name }
    }

    /// Record a glucose reading.
    ///
    /// Rejects values outside the physiologically plausible 0.5-35 mmol/L
    /// band, mirroring the source system's form validation.
    pub fn record_glucose(&self, sample: GlucoseSample) -> Result<(), RecordError> {
        if !sample.value.is_physiological() {
            return Err(RecordError::OutOfRange {
                value: sample.value.value(),
            });
        }
        self.state.glucose.write().push(sample);
        Ok(())
    }

    /// Record an insulin injection. Doses must lie in 0-100 units.
    pub fn record_insulin(&self, dose: InsulinDose) -> Result<(), RecordError> {
        if !(0.0..=MAX_INSULIN_DOSE).contains(&dose.dose) {
            return Err(RecordError::InvalidDose { dose: dose.dose });
        }
        self.state.insulin.write().push(dose);
        Ok(())
    }

    /// Record a meal.
    pub fn record_meal(&self, meal: MealRecord) {
        self.state.meals.write().push(meal);
    }

    /// Record a physical activity session.
    pub fn record_activity(&self, session: ActivityRecord) {
        self.state.activity.write().push(session);
    }

    /// All glucose readings in chronological order.
    pub fn glucose_all(&self) -> Vec<GlucoseSample> {
        let mut samples = self.state.glucose.read().clone();
        samples.sort_by_key(|s| s.timestamp());
        samples
    }

    /// Glucose readings with `start <= date <= end`, in chronological order.
    pub fn glucose_between(&self, start: NaiveDate, end: NaiveDate) -> Vec<GlucoseSample> {
        let mut samples: Vec<GlucoseSample> = self
            .state
            .glucose
            .read()
            .iter()
            .filter(|s| s.date >= start && s.date <= end)
            .cloned()
            .collect();
        samples.sort_by_key(|s| s.timestamp());
        samples
    }

    /// Glucose readings in the trailing window of `days` days ending at
    /// `today` (inclusive on both ends).
    pub fn glucose_in_window(&self, today: NaiveDate, days: u32) -> Vec<GlucoseSample> {
        let start = today - Duration::days(i64::from(days.saturating_sub(1)));
        self.glucose_between(start, today)
    }

    /// All insulin records in chronological order.
    pub fn insulin_all(&self) -> Vec<InsulinDose> {
        let mut doses = self.state.insulin.read().clone();
        doses.sort_by_key(|d| d.timestamp());
        doses
    }

    /// Insulin records with `start <= date <= end`, in chronological order.
    pub fn insulin_between(&self, start: NaiveDate, end: NaiveDate) -> Vec<InsulinDose> {
        let mut doses: Vec<InsulinDose> = self
            .state
            .insulin
            .read()
            .iter()
            .filter(|d| d.date >= start && d.date <= end)
            .cloned()
            .collect();
        doses.sort_by_key(|d| d.timestamp());
        doses
    }

    /// All meals in chronological order.
    pub fn meals_all(&self) -> Vec<MealRecord> {
        let mut meals = self.state.meals.read().clone();
        meals.sort_by_key(|m| m.timestamp());
        meals
    }

    /// Meals with `start <= date <= end`, in chronological order.
    pub fn meals_between(&self, start: NaiveDate, end: NaiveDate) -> Vec<MealRecord> {
        let mut meals: Vec<MealRecord> = self
            .state
            .meals
            .read()
            .iter()
            .filter(|m| m.date >= start && m.date <= end)
            .cloned()
            .collect();
        meals.sort_by_key(|m| m.timestamp());
        meals
    }

    /// All activity sessions in chronological order.
    pub fn activity_all(&self) -> Vec<ActivityRecord> {
        let mut sessions = self.state.activity.read().clone();
        sessions.sort_by_key(|a| a.timestamp());
        sessions
    }

    /// Activity sessions with `start <= date <= end`, in chronological order.
    pub fn activity_between(&self, start: NaiveDate, end: NaiveDate) -> Vec<ActivityRecord> {
        let mut sessions: Vec<ActivityRecord> = self
            .state
            .activity
            .read()
            .iter()
            .filter(|a| a.date >= start && a.date <= end)
            .cloned()
            .collect();
        sessions.sort_by_key(|a| a.timestamp());
        sessions
    }

    /// The most recent glucose reading, if any.
    pub fn latest_glucose(&self) -> Option<GlucoseSample> {
        self.glucose_all().into_iter().last()
    }

    /// The most recent insulin record, if any.
    pub fn latest_insulin(&self) -> Option<InsulinDose> {
        self.insulin_all().into_iter().last()
    }

    /// The most recent meal, if any.
    pub fn latest_meal(&self) -> Option<MealRecord> {
        self.meals_all().into_iter().last()
    }

    /// The most recent activity session, if any.
    pub fn latest_activity(&self) -> Option<ActivityRecord> {
        self.activity_all().into_iter().last()
    }

    /// Export this patient's records as a journal document.
    pub fn to_document(&self, patient: Option<PatientProfile>) -> JournalDocument {
        let mut doc = JournalDocument::new();
        doc.patient = patient;
        doc.glucose = self.glucose_all();
        doc.insulin = self.insulin_all();
        doc.meals = self.meals_all();
        doc.activity = self.activity_all();
        doc
    }

    /// The patient name this handle records under.
    pub fn name(&self) -> &str {
        &self.name
    }
}

impl std::fmt::Debug for PatientHandle {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PatientHandle")
            .field("name", &self.name)
            .finish()
    }
}
