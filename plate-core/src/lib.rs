#![warn(missing_docs)]
//! Models and requirement calculations for plate-based meal planning.
//!
//! A meal is served on a plate with one large and two small sections, each
//! filled from one food category. This crate defines the vocabulary shared by
//! the optimizer and its callers: nutrient vectors, catalog items, biometric
//! profiles, and the per-meal nutrient target ranges derived from them.

/// Core domain models.
///
/// These are plain data structures with a small amount of validation; the
/// optimization itself lives in the `plate-solver` crate.
pub mod models;

/// Nutrient target ranges derived from a biometric profile.
///
/// The calculation estimates basal energy with sex-specific linear coefficients,
/// scales it by activity level, adjusts for the health goal, derives the
/// macro-nutrient bounds from body weight and calories, fills the remaining
/// nutrients from a fixed table, and finally splits the daily range into meals.
pub mod requirements;

pub use requirements::{RequirementError, compute_requirement_range, compute_requirement_range_on};
