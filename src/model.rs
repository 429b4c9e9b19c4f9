//! FoodScale record and the candidate shape accepted for writes.

use serde::Serialize;
use sqlx::FromRow;

/// A persisted food scale. `version` is the concurrency token: it starts at 1
/// and moves up by exactly one on every successful update.
#[derive(Debug, Clone, PartialEq, Serialize, FromRow)]
pub struct FoodScale {
    pub id: i64,
    pub model: String,
    pub price: f64,
    pub year: i32,
    pub dimensions: Vec<f64>,
    pub runtime: i32,
    pub version: i32,
}

/// Caller-supplied fields for insert and update, prior to validation.
/// `dimensions` stays optional so a missing array is reported as a field
/// error rather than a decode failure.
#[derive(Debug, Clone, Default)]
pub struct ScaleCandidate {
    pub model: String,
    pub price: f64,
    pub year: i32,
    pub dimensions: Option<Vec<f64>>,
    pub runtime: i32,
}

impl ScaleCandidate {
    /// Candidate carrying the mutable fields of an existing record, used to
    /// re-validate before a conditional update.
    pub fn from_scale(scale: &FoodScale) -> Self {
        ScaleCandidate {
            model: scale.model.clone(),
            price: scale.price,
            year: scale.year,
            dimensions: Some(scale.dimensions.clone()),
            runtime: scale.runtime,
        }
    }
}
