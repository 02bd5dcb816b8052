//! Thread-safe measurement journal shared across patients.

use std::collections::BTreeMap;
use std::sync::Arc;

use parking_lot::RwLock;

use diawatch_types::{ActivityRecord, GlucoseSample, InsulinDose, JournalDocument, MealRecord};

use crate::error::RecordError;
use crate::handle::PatientHandle;

/// Per-patient record storage.
///
/// Record vectors are kept in insertion order; queries sort by timestamp
/// when they need chronology.
#[derive(Debug, Default)]
pub(crate) struct PatientState {
    pub(crate) glucose: RwLock<Vec<GlucoseSample>>,
    pub(crate) insulin: RwLock<Vec<InsulinDose>>,
    pub(crate) meals: RwLock<Vec<MealRecord>>,
    pub(crate) activity: RwLock<Vec<ActivityRecord>>,
}

/// In-memory journal holding measurement records for any number of patients.
///
/// Cloneable handles are cheap (`Arc` internally) and safe to use from any
/// thread or async task.
///
/// # Example
///
/// ```rust
/// use diawatch_analytics::Journal;
///
/// let journal = Journal::new();
/// let handle = journal.register("patient");
/// assert_eq!(handle.name(), "patient");
/// ```
#[derive(Debug, Default)]
pub struct Journal {
    patients: RwLock<BTreeMap<String, Arc<PatientState>>>,
}

impl Journal {
    /// Create an empty journal.
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a patient or get the existing entry.
    ///
    /// Handles obtained from repeated calls share the same underlying state.
    pub fn register(&self, name: &str) -> PatientHandle {
        // Fast path: check if it exists
        {
            let patients = self.patients.read();
            if let Some(state) = patients.get(name) {
                return PatientHandle::new(state.clone(), name.to_string());
            }
        }

        // Slow path: create it
        let mut patients = self.patients.write();
        let state = patients
            .entry(name.to_string())
            .or_insert_with(|| Arc::new(PatientState::default()))
            .clone();
        PatientHandle::new(state, name.to_string())
    }

    /// Names of all registered patients.
    pub fn patient_names(&self) -> Vec<String> {
        self.patients.read().keys().cloned().collect()
    }

    /// Load a journal document, registering its patient and recording every
    /// entry through the validating record path.
    ///
    /// Fails fast on the first rejected record or an incompatible schema
    /// version.
    pub fn load(&self, document: JournalDocument) -> Result<PatientHandle, RecordError> {
        if !document.version.is_compatible() {
            return Err(RecordError::IncompatibleVersion {
                major: document.version.major,
                minor: document.version.minor,
            });
        }

        let name = document
            .patient
            .as_ref()
            .map(|p| p.name.clone())
            .unwrap_or_else(|| "patient".to_string());
        let handle = self.register(&name);

        for sample in document.glucose {
            handle.record_glucose(sample)?;
        }
        for dose in document.insulin {
            handle.record_insulin(dose)?;
        }
        for meal in document.meals {
            handle.record_meal(meal);
        }
        for session in document.activity {
            handle.record_activity(session);
        }

        Ok(handle)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{NaiveDate, NaiveTime};
    use diawatch_types::{MmolL, PatientProfile, SchemaVersion};

    fn sample(value: f64) -> GlucoseSample {
        GlucoseSample::new(
            MmolL(value),
            NaiveDate::from_ymd_opt(2025, 3, 14).unwrap(),
            NaiveTime::from_hms_opt(8, 0, 0).unwrap(),
        )
    }

    #[test]
    fn register_returns_shared_state() {
        let journal = Journal::new();
        let h1 = journal.register("patient");
        let h2 = journal.register("patient");

        h1.record_glucose(sample(5.6)).unwrap();
        assert_eq!(h2.glucose_all().len(), 1);
    }

    #[test]
    fn patients_are_isolated() {
        let journal = Journal::new();
        let a = journal.register("a");
        let b = journal.register("b");

        a.record_glucose(sample(5.6)).unwrap();
        assert_eq!(a.glucose_all().len(), 1);
        assert!(b.glucose_all().is_empty());
        assert_eq!(journal.patient_names(), vec!["a", "b"]);
    }

    #[test]
    fn load_registers_document_patient() {
        let mut doc = JournalDocument::new();
        doc.patient = Some(PatientProfile::new("marta"));
        doc.glucose.push(sample(5.6));

        let journal = Journal::new();
        let handle = journal.load(doc).unwrap();
        assert_eq!(handle.name(), "marta");
        assert_eq!(handle.glucose_all().len(), 1);
    }

    #[test]
    fn load_rejects_out_of_range_values() {
        let mut doc = JournalDocument::new();
        doc.glucose.push(sample(99.0));

        let journal = Journal::new();
        let err = journal.load(doc).unwrap_err();
        assert!(matches!(err, RecordError::OutOfRange { .. }));
    }

    #[test]
    fn load_rejects_incompatible_version() {
        let mut doc = JournalDocument::new();
        doc.version = SchemaVersion::new(diawatch_types::SCHEMA_VERSION + 1, 0);

        let journal = Journal::new();
        let err = journal.load(doc).unwrap_err();
        assert!(matches!(err, RecordError::IncompatibleVersion { .. }));
    }

    #[test]
    fn concurrent_recording_is_thread_safe() {
        use std::thread;

        let journal = Arc::new(Journal::new());
        let mut handles = vec![];
        for _ in 0..8 {
            let journal = journal.clone();
            handles.push(thread::spawn(move || {
                let patient = journal.register("shared");
                for _ in 0..50 {
                    patient.record_glucose(sample(5.6)).unwrap();
                }
            }));
        }
        for h in handles {
            h.join().unwrap();
        }

        assert_eq!(journal.register("shared").glucose_all().len(), 400);
    }
}
