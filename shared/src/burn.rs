//! Burn recalculation
//!
//! Converts logged performance (sets and reps) into the nutritional burn of a
//! single exercise entry. Catalog burn rates are defined per set at the
//! exercise's default rep count; performing fewer or more reps scales the
//! estimate proportionally.
//!
//! All functions are pure.

use serde::{Deserialize, Serialize};

use crate::errors::BurnError;
use crate::models::ExerciseDefinition;
use crate::reps::checked_sets;

/// Reference rep count used when a definition has no default reps
pub const DEFAULT_REPS_FALLBACK: i32 = 8;

/// Decimal places kept for calories and macronutrients
pub const MACRO_PRECISION: u32 = 2;

/// Decimal places kept for water loss
pub const WATER_PRECISION: u32 = 3;

/// Actual burn for one exercise entry
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BurnResult {
    pub calories_burned: f64,
    pub protein_burned: f64,
    pub carbs_burned: f64,
    pub fats_burned: f64,
    pub water_loss: f64,
}

impl BurnResult {
    /// Burn of an entry with nothing performed
    pub const ZERO: BurnResult = BurnResult {
        calories_burned: 0.0,
        protein_burned: 0.0,
        carbs_burned: 0.0,
        fats_burned: 0.0,
        water_loss: 0.0,
    };
}

/// Rep count the burn rates of `definition` refer to
pub fn effective_default_reps(definition: &ExerciseDefinition) -> i32 {
    if definition.default_reps > 0 {
        definition.default_reps
    } else {
        DEFAULT_REPS_FALLBACK
    }
}

/// Ratio between the average reps performed per set and the reference reps
///
/// Returns 0 when no sets were completed.
pub fn reps_factor(definition: &ExerciseDefinition, sets_completed: i32, reps_per_set: &[i32]) -> f64 {
    if sets_completed <= 0 {
        return 0.0;
    }
    let total_reps: i64 = reps_per_set.iter().map(|&r| i64::from(r)).sum();
    let avg_reps_per_set = total_reps as f64 / f64::from(sets_completed);
    avg_reps_per_set / f64::from(effective_default_reps(definition))
}

/// Round `value` to `places` decimal places
pub fn round_to(value: f64, places: u32) -> f64 {
    let factor = 10f64.powi(places as i32);
    (value * factor).round() / factor
}

/// Recompute the burn of one exercise entry
///
/// `reps_per_set` must already have been resized to `sets_completed` (see
/// [`crate::reps::resize_reps`]); a length mismatch is reported as
/// [`BurnError::InconsistentState`] rather than silently corrected.
pub fn recompute_burn(
    definition: &ExerciseDefinition,
    sets_completed: i32,
    reps_per_set: &[i32],
) -> Result<BurnResult, BurnError> {
    let sets = checked_sets(sets_completed)?;
    if let Some((index, reps)) = reps_per_set.iter().enumerate().find(|(_, &r)| r < 0) {
        return Err(BurnError::InvalidInput(format!(
            "reps for set {} cannot be negative (got {})",
            index + 1,
            reps
        )));
    }
    if reps_per_set.len() != sets {
        return Err(BurnError::InconsistentState {
            sets: sets_completed,
            reps: reps_per_set.len(),
        });
    }

    if sets_completed == 0 {
        return Ok(BurnResult::ZERO);
    }

    let scale = f64::from(sets_completed) * reps_factor(definition, sets_completed, reps_per_set);

    Ok(BurnResult {
        calories_burned: round_to(definition.calories_burned_per_set * scale, MACRO_PRECISION),
        protein_burned: round_to(definition.protein_burned_per_set * scale, MACRO_PRECISION),
        carbs_burned: round_to(definition.carbs_burned_per_set * scale, MACRO_PRECISION),
        fats_burned: round_to(definition.fats_burned_per_set * scale, MACRO_PRECISION),
        water_loss: round_to(definition.water_loss_per_set * scale, WATER_PRECISION),
    })
}
