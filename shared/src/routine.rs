//! Gym routines and day resolution

use chrono::{Datelike, NaiveDate, Weekday};
use serde::{Deserialize, Serialize};

use crate::models::ExerciseDefinition;

/// Weekly exercise schedule
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Routine {
    pub routine_id: String,
    #[serde(default)]
    pub routine_name: String,
    #[serde(default)]
    pub days: Vec<RoutineDay>,
}

/// Exercises scheduled for one day of the week
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RoutineDay {
    /// Day name, e.g. "Monday"
    pub day: String,
    #[serde(default)]
    pub exercises: Vec<RoutineExercise>,
}

/// Reference to a catalog exercise with its prescription
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RoutineExercise {
    pub exercise_id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sets: Option<i32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reps: Option<i32>,
}

/// Exercises required on one day, resolved against the catalog
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ResolvedDay {
    pub required: Vec<ExerciseDefinition>,
    /// Referenced ids missing from the catalog
    pub unresolved: Vec<String>,
}

/// English day name used by routines and progress documents
pub fn day_name(weekday: Weekday) -> &'static str {
    match weekday {
        Weekday::Mon => "Monday",
        Weekday::Tue => "Tuesday",
        Weekday::Wed => "Wednesday",
        Weekday::Thu => "Thursday",
        Weekday::Fri => "Friday",
        Weekday::Sat => "Saturday",
        Weekday::Sun => "Sunday",
    }
}

/// Day name for a calendar date
pub fn day_name_for(date: NaiveDate) -> &'static str {
    day_name(date.weekday())
}

impl Routine {
    /// Schedule for `day_name`, matched case-insensitively
    pub fn day(&self, day_name: &str) -> Option<&RoutineDay> {
        self.days
            .iter()
            .find(|d| d.day.trim().eq_ignore_ascii_case(day_name.trim()))
    }

    /// Catalog definitions required on `day_name`, in schedule order
    ///
    /// A day without a schedule resolves to nothing.
    pub fn resolve_day(&self, day_name: &str, catalog: &[ExerciseDefinition]) -> ResolvedDay {
        let Some(day) = self.day(day_name) else {
            return ResolvedDay::default();
        };

        let mut resolved = ResolvedDay::default();
        for reference in &day.exercises {
            match catalog
                .iter()
                .find(|def| def.exercise_id == reference.exercise_id)
            {
                Some(def) => resolved.required.push(def.clone()),
                None => resolved.unresolved.push(reference.exercise_id.clone()),
            }
        }
        resolved
    }
}
