//! Application-level configuration constants.

// Pace limits
pub const MIN_TIME_SEC: f64 = 5.0;
pub const MAX_TIME_SEC: f64 = 60.0;
pub const LAP_DISTANCE_M: u32 = 400;

// Default values on first load
pub const DEFAULT_OPENING_SEC: f64 = 20.0;
pub const DEFAULT_LAP_SEC: f64 = 40.0;
pub const DEFAULT_DISTANCE_M: u32 = 5000;

// Query string
pub const DISTANCE_PARAM: &str = "distance";

// UI constants
pub const SLIDER_STEP_SEC: f64 = 0.1;
pub const SLIDER_MARKS_SEC: [u32; 6] = [10, 20, 30, 40, 50, 60];
