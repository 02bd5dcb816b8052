//! Measurement records logged by a patient.

use chrono::{NaiveDate, NaiveDateTime, NaiveTime};

use crate::MmolL;

/// A single timestamped blood glucose reading.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct GlucoseSample {
    /// Measured concentration in mmol/L.
    pub value: MmolL,

    /// Calendar date of the measurement.
    pub date: NaiveDate,

    /// Local time of the measurement.
    pub time: NaiveTime,

    /// Free-form measurement category from the source system
    /// (fasting, before/after a meal, ...).
    #[cfg_attr(feature = "serde", serde(skip_serializing_if = "Option::is_none"))]
    #[cfg_attr(feature = "serde", serde(default))]
    pub category: Option<String>,
}

impl GlucoseSample {
    /// Create a sample without a category.
    pub fn new(value: impl Into<MmolL>, date: NaiveDate, time: NaiveTime) -> Self {
        Self {
            value: value.into(),
            date,
            time,
            category: None,
        }
    }

    /// Attach a measurement category.
    pub fn with_category(mut self, category: impl Into<String>) -> Self {
        self.category = Some(category.into());
        self
    }

    /// Combined timestamp used for chronological ordering.
    pub fn timestamp(&self) -> NaiveDateTime {
        self.date.and_time(self.time)
    }
}

/// A single insulin injection.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct InsulinDose {
    /// Dose in insulin units (bounded 0-100 at the input boundary).
    pub dose: f64,

    /// Insulin category from the source system (bolus, basal, ...).
    pub category: String,

    /// Calendar date of the injection.
    pub date: NaiveDate,

    /// Local time of the injection.
    pub time: NaiveTime,
}

impl InsulinDose {
    /// Create a dose record.
    pub fn new(dose: f64, category: impl Into<String>, date: NaiveDate, time: NaiveTime) -> Self {
        Self {
            dose,
            category: category.into(),
            date,
            time,
        }
    }

    /// Combined timestamp used for chronological ordering.
    pub fn timestamp(&self) -> NaiveDateTime {
        self.date.and_time(self.time)
    }
}

/// A food item consumed as part of a meal.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct FoodItem {
    /// Item name from the food catalog.
    pub name: String,

    /// Portion weight in grams.
    pub grams: f64,

    /// Carbohydrates per 100 g of the item.
    pub carbs: f64,
}

/// A logged meal with its portions and surrounding insulin doses.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct MealRecord {
    /// Meal category (breakfast, lunch, ...).
    pub category: String,

    /// Carbohydrate content in bread units.
    #[cfg_attr(feature = "serde", serde(skip_serializing_if = "Option::is_none"))]
    #[cfg_attr(feature = "serde", serde(default))]
    pub bread_units: Option<f64>,

    /// Insulin dose taken before the meal, in units.
    #[cfg_attr(feature = "serde", serde(skip_serializing_if = "Option::is_none"))]
    #[cfg_attr(feature = "serde", serde(default))]
    pub dose_before: Option<f64>,

    /// Insulin dose taken after the meal, in units.
    #[cfg_attr(feature = "serde", serde(skip_serializing_if = "Option::is_none"))]
    #[cfg_attr(feature = "serde", serde(default))]
    pub dose_after: Option<f64>,

    /// Calendar date of the meal.
    pub date: NaiveDate,

    /// Local time of eating.
    pub time: NaiveTime,

    /// Individual food portions.
    #[cfg_attr(feature = "serde", serde(default))]
    pub items: Vec<FoodItem>,
}

impl MealRecord {
    /// Create a meal record with no portions attached.
    pub fn new(category: impl Into<String>, date: NaiveDate, time: NaiveTime) -> Self {
        Self {
            category: category.into(),
            bread_units: None,
            dose_before: None,
            dose_after: None,
            date,
            time,
            items: Vec::new(),
        }
    }

    /// Combined timestamp used for chronological ordering.
    pub fn timestamp(&self) -> NaiveDateTime {
        self.date.and_time(self.time)
    }
}

/// A logged physical activity session.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ActivityRecord {
    /// Activity type name (running, swimming, ...).
    pub activity: String,

    /// Number of approaches/sets, where the activity has them.
    #[cfg_attr(feature = "serde", serde(skip_serializing_if = "Option::is_none"))]
    #[cfg_attr(feature = "serde", serde(default))]
    pub approaches: Option<u32>,

    /// Free-form commentary.
    #[cfg_attr(feature = "serde", serde(skip_serializing_if = "Option::is_none"))]
    #[cfg_attr(feature = "serde", serde(default))]
    pub comment: Option<String>,

    /// Calendar date of the session.
    pub date: NaiveDate,

    /// Local time of the session.
    pub time: NaiveTime,
}

impl ActivityRecord {
    /// Create an activity record.
    pub fn new(activity: impl Into<String>, date: NaiveDate, time: NaiveTime) -> Self {
        Self {
            activity: activity.into(),
            approaches: None,
            comment: None,
            date,
            time,
        }
    }

    /// Combined timestamp used for chronological ordering.
    pub fn timestamp(&self) -> NaiveDateTime {
        self.date.and_time(self.time)
    }
}
