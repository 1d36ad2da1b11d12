//! Business logic services
//!
//! This module contains the service layer that implements business logic
//! on top of the fitness API client.

pub mod exercise;
pub mod workout_progress;

pub use exercise::ExerciseService;
pub use workout_progress::WorkoutProgressService;
