//! Pacing calculator for long-track speed skating.
//!
//! Relates the opening lap, the steady 400m lap time and the final result for
//! a race distance, and turns them into a lap-by-lap split table.

use serde::Serialize;
use wasm_bindgen::prelude::*;

pub mod config;
pub mod distance;
pub mod pace;
pub mod query;
pub mod utils;

pub use distance::{Distance, DistanceProfile, ParseDistanceError};
pub use pace::{LapSplit, LockMode, Pace, PaceAction, PaceModel, PaceState, ResultBounds};
pub use utils::{format_clock, format_distance, format_split_time, parse_time_to_sec};

/// Everything a page needs to render one pacing plan.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PacePlan {
    pub distance_m: u32,
    pub pace: Pace,
    pub bounds: ResultBounds,
    pub splits: Vec<LapSplit>,
}

impl PacePlan {
    pub fn from_model(model: &PaceModel) -> Self {
        Self {
            distance_m: model.distance().meters(),
            pace: model.derive(),
            bounds: model.result_bounds(),
            splits: model.lap_splits(),
        }
    }

    /// Plan for a distance key in meters, starting from an opening and lap time.
    pub fn from_laps(distance_m: u32, opening: f64, lap: f64) -> Result<Self, ParseDistanceError> {
        let distance =
            Distance::from_meters(distance_m).ok_or(ParseDistanceError::Unsupported(distance_m))?;
        let mut model = PaceModel::new(distance);
        model.set_opening(opening);
        model.set_lap(lap);
        Ok(Self::from_model(&model))
    }
}

/// JS entry point computing a plan from an opening and lap time.
///
/// # Arguments
/// * `distance` - Race distance key in meters (`500`, `1000`, ...)
/// * `opening` - Opening lap time in seconds, clamped to 5..=60
/// * `lap` - Lap time in seconds, clamped to 5..=60
///
/// # Returns
/// Serialized [`PacePlan`], or an error message string for an unknown distance
#[wasm_bindgen]
pub fn pace_splits(distance: u32, opening: f64, lap: f64) -> JsValue {
    match PacePlan::from_laps(distance, opening, lap) {
        Ok(plan) => serde_wasm_bindgen::to_value(&plan).unwrap_or(JsValue::NULL),
        Err(e) => serde_wasm_bindgen::to_value(&format!("Calculation failed: {}", e))
            .unwrap_or(JsValue::NULL),
    }
}
