//! Fitness Admin WASM Module
//!
//! This crate provides WebAssembly bindings so the exercise forms can apply
//! the resize rule and preview burn in the browser without a round trip.
//! Structured values cross the boundary as JSON strings.

use fitness_admin_shared::burn::reps_factor;
use fitness_admin_shared::types::BurnPreviewResponse;
use fitness_admin_shared::validation::parse_ai_exercise_payload;
use fitness_admin_shared::{
    checked_sets, clamp_sets, recompute_burn, reconcile_with_report, ExerciseCompletion,
    ExerciseDefinition,
};
use serde::de::DeserializeOwned;
use validator::Validate;
use wasm_bindgen::prelude::*;

/// Resize a reps list to `sets_completed` entries, padding with zeros
#[wasm_bindgen(js_name = resizeReps)]
pub fn resize_reps(reps_per_set: Vec<i32>, sets_completed: i32) -> Vec<i32> {
    fitness_admin_shared::resize_reps(&reps_per_set, clamp_sets(sets_completed))
}

/// Burn preview for a definition (JSON) and the logged performance
///
/// Returns a JSON object with the resized reps, the reps factor and the burn.
#[wasm_bindgen(js_name = previewBurn)]
pub fn preview_burn(
    definition_json: &str,
    sets_completed: i32,
    reps_per_set: Vec<i32>,
) -> Result<String, JsValue> {
    preview(definition_json, sets_completed, &reps_per_set).map_err(|e| JsValue::from_str(&e))
}

/// Merge recorded completions (JSON array) with the required exercises (JSON array)
///
/// Returns a JSON object with `exercises`, `added` and `removed`.
#[wasm_bindgen(js_name = reconcileProgress)]
pub fn reconcile_progress(required_json: &str, existing_json: &str) -> Result<String, JsValue> {
    reconcile(required_json, existing_json).map_err(|e| JsValue::from_str(&e))
}

/// Validate an AI auto-fill reply, returning the drafts as a JSON array
#[wasm_bindgen(js_name = parseAutofill)]
pub fn parse_autofill(text: &str) -> Result<String, JsValue> {
    parse_ai_exercise_payload(text)
        .map_err(|e| e.to_string())
        .and_then(|drafts| to_json(&drafts))
        .map_err(|e| JsValue::from_str(&e))
}

fn preview(definition_json: &str, sets_completed: i32, reps_per_set: &[i32]) -> Result<String, String> {
    let definition: ExerciseDefinition = from_json(definition_json)?;
    definition
        .validate()
        .map_err(|e| format!("Invalid exercise definition: {}", e))?;
    let sets = checked_sets(sets_completed).map_err(|e| e.to_string())?;
    let reps = fitness_admin_shared::resize_reps(reps_per_set, sets);
    let burn = recompute_burn(&definition, sets_completed, &reps).map_err(|e| e.to_string())?;

    to_json(&BurnPreviewResponse {
        sets_completed,
        reps_factor: reps_factor(&definition, sets_completed, &reps),
        reps_per_set: reps,
        burn,
    })
}

fn reconcile(required_json: &str, existing_json: &str) -> Result<String, String> {
    let required: Vec<ExerciseDefinition> = from_json(required_json)?;
    let existing: Vec<ExerciseCompletion> = from_json(existing_json)?;
    to_json(&reconcile_with_report(&required, &existing))
}

fn from_json<T: DeserializeOwned>(json: &str) -> Result<T, String> {
    serde_json::from_str(json).map_err(|e| format!("Invalid JSON: {}", e))
}

fn to_json<T: serde::Serialize>(value: &T) -> Result<String, String> {
    serde_json::to_string(value).map_err(|e| e.to_string())
}
