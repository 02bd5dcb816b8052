//! Weekly patient context for the RAG assistant.
//!
//! Builds the summarized payload the chat layer forwards to the RAG
//! microservice: per-day rollups of every measurement category plus a
//! human-readable personal-context block in the product locale. Field names
//! follow the wire format the service already consumes.

use chrono::{Duration, NaiveDate};
use serde::{Deserialize, Serialize};

use diawatch_types::PatientProfile;

use crate::engine::round2;
use crate::handle::PatientHandle;

/// Days covered by the trailing context window.
const CONTEXT_WINDOW_DAYS: i64 = 7;

/// One day of glucose readings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GlucoseDay {
    /// Day in `%Y-%m-%d` form.
    pub date: String,
    /// Mean of the day's readings, mmol/L.
    pub average: f64,
    /// The individual readings.
    pub measurements: Vec<GlucoseEntry>,
}

/// A single glucose reading inside a [`GlucoseDay`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GlucoseEntry {
    pub value: f64,
    pub category: Option<String>,
    /// Time in `%H:%M` form.
    pub time: String,
}

/// One day of insulin injections.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InsulinDay {
    pub date: String,
    pub total_dose: f64,
    pub records: Vec<InsulinEntry>,
}

/// A single injection inside an [`InsulinDay`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InsulinEntry {
    pub category: String,
    pub dose: f64,
    pub time: String,
}

/// One day of meals.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FoodDay {
    pub date: String,
    pub meals: Vec<MealEntry>,
}

/// A single meal inside a [`FoodDay`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MealEntry {
    pub category: String,
    pub bread_unit: f64,
    pub insuline_dose_before: f64,
    pub insuline_dose_after: f64,
    pub time: String,
    pub food_items: Vec<FoodEntry>,
}

/// A food portion inside a [`MealEntry`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FoodEntry {
    pub name: String,
    pub grams: f64,
    pub carbs: f64,
}

/// One day of physical activity.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ActivityDay {
    pub date: String,
    pub activities: Vec<ActivityEntry>,
}

/// A single session inside an [`ActivityDay`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ActivityEntry {
    #[serde(rename = "type")]
    pub activity_type: String,
    pub approaches: Option<u32>,
    pub comment: Option<String>,
    pub time: String,
}

/// The full context payload for a personalized assistant query.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PatientContext {
    pub patient_name: String,
    /// Human-readable personal-context block, in the product locale.
    pub personal_context: String,
    pub glucose: Vec<GlucoseDay>,
    pub insulin: Vec<InsulinDay>,
    pub food: Vec<FoodDay>,
    pub activity: Vec<ActivityDay>,
}

/// Build the weekly context for a patient.
///
/// Each category covers the trailing week ending at `today`; when a category
/// has no records in that window, the patient's full history is used instead
/// so the assistant never sees an empty picture while data exists.
pub fn build_weekly_context(
    profile: &PatientProfile,
    handle: &PatientHandle,
    today: NaiveDate,
) -> PatientContext {
    let start = today - Duration::days(CONTEXT_WINDOW_DAYS);

    let glucose = {
        let mut samples = handle.glucose_between(start, today);
        if samples.is_empty() {
            samples = handle.glucose_all();
        }
        glucose_days(&samples)
    };

    let insulin = {
        let mut doses = handle.insulin_between(start, today);
        if doses.is_empty() {
            doses = handle.insulin_all();
        }
        insulin_days(&doses)
    };

    let food = {
        let mut meals = handle.meals_between(start, today);
        if meals.is_empty() {
            meals = handle.meals_all();
        }
        food_days(&meals)
    };

    let activity = {
        let mut sessions = handle.activity_between(start, today);
        if sessions.is_empty() {
            sessions = handle.activity_all();
        }
        activity_days(&sessions)
    };

    PatientContext {
        patient_name: profile.name.clone(),
        personal_context: personal_context(profile, handle),
        glucose,
        insulin,
        food,
        activity,
    }
}

/// Render the personal-context text block shown to the assistant.
///
/// Line set and wording follow the chat layer of the source system.
pub fn personal_context(profile: &PatientProfile, handle: &PatientHandle) -> String {
    let mut parts = vec![format!("Пацієнт: {}", profile.name)];

    if let Some(age) = profile.age {
        parts.push(format!("Вік: {} років", age));
    }
    if let Some(sex) = profile.sex {
        parts.push(format!("Стать: {}", sex.label()));
    }
    if let Some(diabetes_type) = profile.diabetes_type {
        parts.push(format!("Тип діабету: {}", diabetes_type.label()));
    }
    parts.push(format!(
        "Цільовий діапазон глюкози: {:.1} – {:.1} ммоль/л",
        profile.target.min.value(),
        profile.target.max.value()
    ));
    if let Some(height) = profile.height_m {
        parts.push(format!("Зріст: {} м", height));
    }
    if let Some(weight) = profile.weight_kg {
        parts.push(format!("Вага: {} кг", weight));
    }
    if let Some(bmi) = profile.bmi() {
        parts.push(format!("ІМТ: {:.1}", bmi));
    }

    if let Some(sample) = handle.latest_glucose() {
        parts.push(format!(
            "Останній замір глюкози: {:.1} ммоль/л ({} {})",
            sample.value.value(),
            sample.date.format("%d.%m.%Y"),
            sample.time.format("%H:%M")
        ));
    }
    if let Some(dose) = handle.latest_insulin() {
        parts.push(format!(
            "Остання інʼєкція інсуліну: {} ОД, категорія {} ({} {})",
            dose.dose,
            dose.category,
            dose.date.format("%d.%m.%Y"),
            dose.time.format("%H:%M")
        ));
    }
    if let Some(meal) = handle.latest_meal() {
        parts.push(format!(
            "Останній прийом їжі: {} ({} {})",
            meal.category,
            meal.date.format("%d.%m.%Y"),
            meal.time.format("%H:%M")
        ));
    }
    if let Some(session) = handle.latest_activity() {
        parts.push(format!(
            "Остання активність: {} ({} {})",
            session.activity,
            session.date.format("%d.%m.%Y"),
            session.time.format("%H:%M")
        ));
    }

    parts.join("\n")
}

fn glucose_days(samples: &[diawatch_types::GlucoseSample]) -> Vec<GlucoseDay> {
    group_dates(samples.iter().map(|s| s.date))
        .into_iter()
        .map(|date| {
            let day: Vec<_> = samples.iter().filter(|s| s.date == date).collect();
            let average =
                round2(day.iter().map(|s| s.value.value()).sum::<f64>() / day.len() as f64);
            GlucoseDay {
                date: date.format("%Y-%m-%d").to_string(),
                average,
                measurements: day
                    .iter()
                    .map(|s| GlucoseEntry {
                        value: s.value.value(),
                        category: s.category.clone(),
                        time: s.time.format("%H:%M").to_string(),
                    })
                    .collect(),
            }
        })
        .collect()
}

fn insulin_days(doses: &[diawatch_types::InsulinDose]) -> Vec<InsulinDay> {
    group_dates(doses.iter().map(|d| d.date))
        .into_iter()
        .map(|date| {
            let day: Vec<_> = doses.iter().filter(|d| d.date == date).collect();
            InsulinDay {
                date: date.format("%Y-%m-%d").to_string(),
                total_dose: round2(day.iter().map(|d| d.dose).sum()),
                records: day
                    .iter()
                    .map(|d| InsulinEntry {
                        category: d.category.clone(),
                        dose: d.dose,
                        time: d.time.format("%H:%M").to_string(),
                    })
                    .collect(),
            }
        })
        .collect()
}

fn food_days(meals: &[diawatch_types::MealRecord]) -> Vec<FoodDay> {
    group_dates(meals.iter().map(|m| m.date))
        .into_iter()
        .map(|date| FoodDay {
            date: date.format("%Y-%m-%d").to_string(),
            meals: meals
                .iter()
                .filter(|m| m.date == date)
                .map(|m| MealEntry {
                    category: m.category.clone(),
                    bread_unit: m.bread_units.unwrap_or(0.0),
                    insuline_dose_before: m.dose_before.unwrap_or(0.0),
                    insuline_dose_after: m.dose_after.unwrap_or(0.0),
                    time: m.time.format("%H:%M").to_string(),
                    food_items: m
                        .items
                        .iter()
                        .map(|item| FoodEntry {
                            name: item.name.clone(),
                            grams: item.grams,
                            carbs: item.carbs,
                        })
                        .collect(),
                })
                .collect(),
        })
        .collect()
}

fn activity_days(sessions: &[diawatch_types::ActivityRecord]) -> Vec<ActivityDay> {
    group_dates(sessions.iter().map(|a| a.date))
        .into_iter()
        .map(|date| ActivityDay {
            date: date.format("%Y-%m-%d").to_string(),
            activities: sessions
                .iter()
                .filter(|a| a.date == date)
                .map(|a| ActivityEntry {
                    activity_type: a.activity.clone(),
                    approaches: a.approaches,
                    comment: a.comment.clone(),
                    time: a.time.format("%H:%M").to_string(),
                })
                .collect(),
        })
        .collect()
}

/// Distinct dates in ascending order.
fn group_dates(dates: impl Iterator<Item = NaiveDate>) -> Vec<NaiveDate> {
    let mut distinct: Vec<NaiveDate> = dates.collect();
    distinct.sort();
    distinct.dedup();
    distinct
}
