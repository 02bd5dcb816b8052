//! Patient profile and target glucose range.

use crate::MmolL;

/// The glucose band a patient aims to stay within.
///
/// Defaults match the patient model in the source system: 4.0-9.0 mmol/L.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct TargetRange {
    /// Lower bound, inclusive.
    pub min: MmolL,

    /// Upper bound, inclusive.
    pub max: MmolL,
}

impl TargetRange {
    /// Create a range from raw mmol/L bounds.
    pub fn new(min: f64, max: f64) -> Self {
        Self {
            min: MmolL(min),
            max: MmolL(max),
        }
    }

    /// Check whether a value falls inside the range (bounds inclusive).
    pub fn contains(&self, value: MmolL) -> bool {
        value >= self.min && value <= self.max
    }
}

impl Default for TargetRange {
    fn default() -> Self {
        Self::new(4.0, 9.0)
    }
}

/// Patient sex as recorded in the profile.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum Sex {
    Male,
    Female,
}

impl Sex {
    /// Display label in the product locale.
    pub fn label(&self) -> &'static str {
        match self {
            Sex::Male => "Чоловік",
            Sex::Female => "Жінка",
        }
    }
}

/// Diabetes type as recorded in the profile.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum DiabetesType {
    #[cfg_attr(feature = "serde", serde(rename = "type1"))]
    Type1,
    #[cfg_attr(feature = "serde", serde(rename = "type2"))]
    Type2,
    #[cfg_attr(feature = "serde", serde(rename = "gestational"))]
    Gestational,
}

impl DiabetesType {
    /// Display label in the product locale.
    pub fn label(&self) -> &'static str {
        match self {
            DiabetesType::Type1 => "Діабет 1-го типу",
            DiabetesType::Type2 => "Діабет 2-го типу",
            DiabetesType::Gestational => "Гестаційний діабет",
        }
    }
}

/// A patient's profile as far as analytics and context building need it.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct PatientProfile {
    /// Display name (full name or username).
    pub name: String,

    /// Age in years.
    #[cfg_attr(feature = "serde", serde(skip_serializing_if = "Option::is_none"))]
    #[cfg_attr(feature = "serde", serde(default))]
    pub age: Option<u32>,

    #[cfg_attr(feature = "serde", serde(skip_serializing_if = "Option::is_none"))]
    #[cfg_attr(feature = "serde", serde(default))]
    pub sex: Option<Sex>,

    #[cfg_attr(feature = "serde", serde(skip_serializing_if = "Option::is_none"))]
    #[cfg_attr(feature = "serde", serde(default))]
    pub diabetes_type: Option<DiabetesType>,

    /// Personal target glucose band.
    #[cfg_attr(feature = "serde", serde(default))]
    pub target: TargetRange,

    /// Height in meters.
    #[cfg_attr(feature = "serde", serde(skip_serializing_if = "Option::is_none"))]
    #[cfg_attr(feature = "serde", serde(default))]
    pub height_m: Option<f64>,

    /// Weight in kilograms.
    #[cfg_attr(feature = "serde", serde(skip_serializing_if = "Option::is_none"))]
    #[cfg_attr(feature = "serde", serde(default))]
    pub weight_kg: Option<f64>,

    /// Whether the patient is on insulin therapy.
    #[cfg_attr(feature = "serde", serde(default))]
    pub on_insulin: bool,
}

impl PatientProfile {
    /// Create a profile with just a name; everything else unset.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            age: None,
            sex: None,
            diabetes_type: None,
            target: TargetRange::default(),
            height_m: None,
            weight_kg: None,
            on_insulin: false,
        }
    }

    /// Body mass index derived from height and weight, if both are present
    /// and the height is positive.
    pub fn bmi(&self) -> Option<f64> {
        let height = self.height_m?;
        let weight = self.weight_kg?;
        if height > 0.0 {
            Some(weight / (height * height))
        } else {
            None
        }
    }
}
