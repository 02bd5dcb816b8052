//! Journal document - the serialized on-disk form of a patient's records.

use crate::{
    ActivityRecord, GlucoseSample, InsulinDose, MealRecord, PatientProfile, SchemaVersion,
};

/// A patient's measurement journal as stored on disk.
///
/// This is the top-level type the CLI reads and writes. It carries the schema
/// version, the patient profile (when known), and every record category.
///
/// # Example
///
/// ```rust
/// use diawatch_types::JournalDocument;
///
/// let doc = JournalDocument::new();
/// assert!(doc.is_empty());
/// assert!(doc.version.is_compatible());
/// ```
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct JournalDocument {
    /// Schema version for forward compatibility.
    #[cfg_attr(feature = "serde", serde(default))]
    pub version: SchemaVersion,

    /// Patient profile, when the journal carries one.
    #[cfg_attr(feature = "serde", serde(skip_serializing_if = "Option::is_none"))]
    #[cfg_attr(feature = "serde", serde(default))]
    pub patient: Option<PatientProfile>,

    /// Glucose readings.
    #[cfg_attr(feature = "serde", serde(default))]
    pub glucose: Vec<GlucoseSample>,

    /// Insulin injections.
    #[cfg_attr(feature = "serde", serde(default))]
    pub insulin: Vec<InsulinDose>,

    /// Logged meals.
    #[cfg_attr(feature = "serde", serde(default))]
    pub meals: Vec<MealRecord>,

    /// Physical activity sessions.
    #[cfg_attr(feature = "serde", serde(default))]
    pub activity: Vec<ActivityRecord>,
}

impl JournalDocument {
    /// Create an empty journal with the current schema version.
    pub fn new() -> Self {
        Self {
            version: SchemaVersion::current(),
            patient: None,
            glucose: Vec::new(),
            insulin: Vec::new(),
            meals: Vec::new(),
            activity: Vec::new(),
        }
    }

    /// Check if the journal holds no records at all.
    pub fn is_empty(&self) -> bool {
        self.glucose.is_empty()
            && self.insulin.is_empty()
            && self.meals.is_empty()
            && self.activity.is_empty()
    }

    /// Total number of records across all categories.
    pub fn len(&self) -> usize {
        self.glucose.len() + self.insulin.len() + self.meals.len() + self.activity.len()
    }
}

impl Default for JournalDocument {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::MmolL;
    use chrono::{NaiveDate, NaiveTime};

    #[test]
    fn new_document_is_empty() {
        let doc = JournalDocument::new();
        assert!(doc.is_empty());
        assert_eq!(doc.len(), 0);
        assert!(doc.patient.is_none());
    }

    #[test]
    fn len_counts_all_categories() {
        let date = NaiveDate::from_ymd_opt(2025, 3, 14).unwrap();
        let time = NaiveTime::from_hms_opt(8, 0, 0).unwrap();

        let mut doc = JournalDocument::new();
        doc.glucose.push(GlucoseSample::new(MmolL(5.6), date, time));
        doc.insulin.push(InsulinDose::new(4.0, "bolus", date, time));
        doc.meals.push(MealRecord::new("Сніданок", date, time));
        doc.activity.push(ActivityRecord::new("Біг", date, time));

        assert_eq!(doc.len(), 4);
        assert!(!doc.is_empty());
    }

    #[cfg(feature = "serde")]
    #[test]
    fn serde_roundtrip() {
        let date = NaiveDate::from_ymd_opt(2025, 3, 14).unwrap();
        let time = NaiveTime::from_hms_opt(8, 0, 0).unwrap();

        let mut doc = JournalDocument::new();
        doc.glucose
            .push(GlucoseSample::new(MmolL(5.6), date, time).with_category("Натщесердце"));

        let json = serde_json::to_string(&doc).unwrap();
        let parsed: JournalDocument = serde_json::from_str(&json).unwrap();
        assert_eq!(doc, parsed);
    }

    #[cfg(feature = "serde")]
    #[test]
    fn missing_sections_default_to_empty() {
        let parsed: JournalDocument =
            serde_json::from_str(r#"{"version":{"major":1,"minor":0}}"#).unwrap();
        assert!(parsed.is_empty());
        assert!(parsed.version.is_compatible());
    }
}
