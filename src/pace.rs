//! Pace model: opening time, lap time and result, and how they follow each other.
//!
//! The three quantities are tied by `result = opening + lap * laps`. The model
//! stores either the two lap quantities ([`PaceState::ByLaps`]) or the result
//! alone ([`PaceState::ByResult`]); whatever is not stored is derived on every
//! query, using the active [`LockMode`] to decide how a result is split.

use log::debug;
use serde::Serialize;

use crate::config::{
    DEFAULT_LAP_SEC, DEFAULT_OPENING_SEC, LAP_DISTANCE_M, MAX_TIME_SEC, MIN_TIME_SEC,
};
use crate::distance::{Distance, DistanceProfile};

/// Which quantity stays put while the result is edited.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub enum LockMode {
    None,
    Lap(f64),
    Opening(f64),
}

/// The single stored source of truth for the current timings.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub enum PaceState {
    ByLaps { opening: f64, lap: f64 },
    ByResult { result: f64 },
}

/// Derived view of the current timings, all in seconds.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Pace {
    pub opening: f64,
    pub lap: f64,
    pub result: f64,
}

/// Cumulative distance and elapsed time at the end of a lap.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct LapSplit {
    pub lap_number: u32,
    pub distance_m: u32,
    pub time_sec: f64,
}

/// Legal result range for the current lock.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ResultBounds {
    pub min: f64,
    pub max: f64,
}

impl ResultBounds {
    pub fn contains(&self, result: f64) -> bool {
        result >= self.min && result <= self.max
    }
}

/// Edits coming from the UI.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum PaceAction {
    SetOpening(f64),
    SetLap(f64),
    SetResult(f64),
    ToggleLapLock,
    ToggleOpeningLock,
    SelectDistance(Distance),
}

pub fn clamp_time(sec: f64) -> f64 {
    sec.clamp(MIN_TIME_SEC, MAX_TIME_SEC)
}

/// Split a result into `(opening, lap)` according to the lock.
pub fn split_result(lock: LockMode, result: f64, profile: &DistanceProfile) -> (f64, f64) {
    let laps = f64::from(profile.laps);
    match lock {
        LockMode::Opening(opening) => (opening, (result - opening) / laps),
        LockMode::Lap(lap) => (result - lap * laps, lap),
        LockMode::None => {
            let fraction = profile.default_opening_fraction;
            let opening = fraction * result;
            if opening < MIN_TIME_SEC {
                return (MIN_TIME_SEC, (result - MIN_TIME_SEC) / laps);
            }
            if opening > MAX_TIME_SEC {
                return (MAX_TIME_SEC, (result - MAX_TIME_SEC) / laps);
            }
            let lap = (1.0 - fraction) * result / laps;
            if lap > MAX_TIME_SEC {
                return (result - MAX_TIME_SEC * laps, MAX_TIME_SEC);
            }
            (opening, lap)
        }
    }
}

pub fn result_bounds(lock: LockMode, profile: &DistanceProfile) -> ResultBounds {
    let laps = f64::from(profile.laps);
    let (min, max) = match lock {
        LockMode::None => (
            MIN_TIME_SEC * (laps + 1.0),
            MAX_TIME_SEC * (laps + 1.0),
        ),
        LockMode::Lap(lap) => (MIN_TIME_SEC + laps * lap, MAX_TIME_SEC + laps * lap),
        LockMode::Opening(opening) => (
            opening + laps * MIN_TIME_SEC,
            opening + laps * MAX_TIME_SEC,
        ),
    };
    ResultBounds { min, max }
}

/// Opening row plus one row per full lap.
pub fn lap_splits(opening: f64, lap: f64, profile: &DistanceProfile) -> Vec<LapSplit> {
    let mut splits = Vec::with_capacity(profile.laps as usize + 1);
    let mut distance_m = profile.opening_m;
    let mut time_sec = opening;
    for lap_number in 1..=profile.laps + 1 {
        splits.push(LapSplit {
            lap_number,
            distance_m,
            time_sec,
        });
        distance_m += LAP_DISTANCE_M;
        time_sec += lap;
    }
    splits
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PaceModel {
    distance: Distance,
    lock: LockMode,
    state: PaceState,
}

impl Default for PaceModel {
    fn default() -> Self {
        Self::new(Distance::default())
    }
}

impl PaceModel {
    pub fn new(distance: Distance) -> Self {
        Self {
            distance,
            lock: LockMode::None,
            state: PaceState::ByLaps {
                opening: DEFAULT_OPENING_SEC,
                lap: DEFAULT_LAP_SEC,
            },
        }
    }

    pub fn distance(&self) -> Distance {
        self.distance
    }

    pub fn lock(&self) -> LockMode {
        self.lock
    }

    pub fn state(&self) -> PaceState {
        self.state
    }

    pub fn lap_locked(&self) -> bool {
        matches!(self.lock, LockMode::Lap(_))
    }

    pub fn opening_locked(&self) -> bool {
        matches!(self.lock, LockMode::Opening(_))
    }

    pub fn derive(&self) -> Pace {
        let profile = self.distance.profile();
        match self.state {
            PaceState::ByLaps { opening, lap } => Pace {
                opening,
                lap,
                result: opening + lap * f64::from(profile.laps),
            },
            PaceState::ByResult { result } => {
                let (opening, lap) = split_result(self.lock, result, &profile);
                Pace {
                    opening,
                    lap,
                    result,
                }
            }
        }
    }

    pub fn lap_splits(&self) -> Vec<LapSplit> {
        let pace = self.derive();
        lap_splits(pace.opening, pace.lap, &self.distance.profile())
    }

    pub fn result_bounds(&self) -> ResultBounds {
        result_bounds(self.lock, &self.distance.profile())
    }

    /// Edit the opening time. A held opening lock is released first.
    pub fn set_opening(&mut self, sec: f64) {
        let opening = clamp_time(sec);
        let lap = match self.state {
            PaceState::ByLaps { lap, .. } => lap,
            PaceState::ByResult { .. } => self.derive().lap,
        };
        if self.opening_locked() {
            debug!("Opening edited while locked, releasing lock");
            self.lock = LockMode::None;
        }
        self.state = PaceState::ByLaps { opening, lap };
    }

    /// Edit the lap time. A held lap lock is released first.
    pub fn set_lap(&mut self, sec: f64) {
        let lap = clamp_time(sec);
        let opening = match self.state {
            PaceState::ByLaps { opening, .. } => opening,
            PaceState::ByResult { .. } => self.derive().opening,
        };
        if self.lap_locked() {
            debug!("Lap edited while locked, releasing lock");
            self.lock = LockMode::None;
        }
        self.state = PaceState::ByLaps { opening, lap };
    }

    pub fn set_result(&mut self, sec: f64) {
        self.state = PaceState::ByResult { result: sec };
    }

    pub fn toggle_lap_lock(&mut self) {
        self.lock = match self.lock {
            LockMode::Lap(_) => LockMode::None,
            _ => LockMode::Lap(self.derive().lap),
        };
        debug!("Lock mode is now {:?}", self.lock);
    }

    pub fn toggle_opening_lock(&mut self) {
        self.lock = match self.lock {
            LockMode::Opening(_) => LockMode::None,
            _ => LockMode::Opening(self.derive().opening),
        };
        debug!("Lock mode is now {:?}", self.lock);
    }

    pub fn select_distance(&mut self, distance: Distance) {
        debug!("Distance {} -> {}", self.distance, distance);
        self.distance = distance;
    }

    pub fn apply(&mut self, action: PaceAction) {
        match action {
            PaceAction::SetOpening(sec) => self.set_opening(sec),
            PaceAction::SetLap(sec) => self.set_lap(sec),
            PaceAction::SetResult(sec) => self.set_result(sec),
            PaceAction::ToggleLapLock => self.toggle_lap_lock(),
            PaceAction::ToggleOpeningLock => self.toggle_opening_lock(),
            PaceAction::SelectDistance(distance) => self.select_distance(distance),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    const EPS: f64 = 1e-9;

    fn assert_close(actual: f64, expected: f64) {
        assert!(
            (actual - expected).abs() < EPS,
            "expected {expected}, got {actual}"
        );
    }

    fn by_result(distance: Distance, lock: LockMode, result: f64) -> PaceModel {
        PaceModel {
            distance,
            lock,
            state: PaceState::ByResult { result },
        }
    }

    #[test]
    fn starts_at_20_40_on_laps() {
        let model = PaceModel::new(Distance::M1000);
        assert_eq!(
            model.state(),
            PaceState::ByLaps {
                opening: 20.0,
                lap: 40.0
            }
        );
        assert_eq!(model.lock(), LockMode::None);
    }

    #[test]
    fn thousand_meter_example() {
        let model = PaceModel::new(Distance::M1000);
        assert_eq!(model.derive().result, 100.0);
        assert_eq!(
            model.lap_splits(),
            vec![
                LapSplit { lap_number: 1, distance_m: 200, time_sec: 20.0 },
                LapSplit { lap_number: 2, distance_m: 600, time_sec: 60.0 },
                LapSplit { lap_number: 3, distance_m: 1000, time_sec: 100.0 },
            ]
        );
    }

    #[test]
    fn short_opening_is_clamped_up() {
        let pace = by_result(Distance::M500, LockMode::None, 15.0).derive();
        assert_eq!(pace.opening, 5.0);
        assert_eq!(pace.lap, 10.0);
        assert_eq!(pace.result, 15.0);
    }

    #[test]
    fn long_opening_is_clamped_down() {
        // 0.275 * 240 = 66
        let pace = by_result(Distance::M500, LockMode::None, 240.0).derive();
        assert_eq!(pace.opening, 60.0);
        assert_eq!(pace.lap, 180.0);
    }

    #[test]
    fn slow_laps_are_capped_and_opening_absorbs_the_rest() {
        // 0.05 * 780 = 39 opening, laps would be 61.75
        let pace = by_result(Distance::M5000, LockMode::None, 780.0).derive();
        assert_eq!(pace.lap, 60.0);
        assert_eq!(pace.opening, 60.0);
        let pace = by_result(Distance::M5000, LockMode::None, 770.0).derive();
        assert_eq!(pace.lap, 60.0);
        assert_eq!(pace.opening, 50.0);
    }

    #[test]
    fn unclamped_split_uses_default_fraction() {
        let pace = by_result(Distance::M1000, LockMode::None, 100.0).derive();
        assert_close(pace.opening, 24.0);
        assert_close(pace.lap, 38.0);
    }

    #[test]
    fn bounds_for_5000_without_lock() {
        let model = PaceModel::new(Distance::M5000);
        assert_eq!(
            model.result_bounds(),
            ResultBounds {
                min: 65.0,
                max: 780.0
            }
        );
    }

    #[test]
    fn bounds_follow_lock() {
        let profile = Distance::M1500.profile();
        assert_eq!(
            result_bounds(LockMode::Lap(30.0), &profile),
            ResultBounds {
                min: 95.0,
                max: 150.0
            }
        );
        assert_eq!(
            result_bounds(LockMode::Opening(25.0), &profile),
            ResultBounds {
                min: 40.0,
                max: 205.0
            }
        );
    }

    #[test]
    fn editing_opening_from_result_keeps_derived_lap() {
        let mut model = by_result(Distance::M1000, LockMode::Lap(35.0), 100.0);
        model.set_opening(22.0);
        assert_eq!(
            model.state(),
            PaceState::ByLaps {
                opening: 22.0,
                lap: 35.0
            }
        );
        // lap lock is untouched by an opening edit
        assert_eq!(model.lock(), LockMode::Lap(35.0));
    }

    #[test]
    fn editing_lap_from_result_keeps_derived_opening() {
        let mut model = by_result(Distance::M1000, LockMode::Opening(18.0), 100.0);
        model.set_lap(30.0);
        assert_eq!(
            model.state(),
            PaceState::ByLaps {
                opening: 18.0,
                lap: 30.0
            }
        );
        assert!(model.opening_locked());
    }

    #[test]
    fn editing_a_locked_quantity_releases_its_lock() {
        let mut model = PaceModel::new(Distance::M3000);
        model.toggle_lap_lock();
        assert!(model.lap_locked());
        model.set_lap(33.0);
        assert_eq!(model.lock(), LockMode::None);

        model.toggle_opening_lock();
        assert_eq!(model.lock(), LockMode::Opening(20.0));
        model.set_opening(21.0);
        assert_eq!(model.lock(), LockMode::None);
    }

    #[test]
    fn direct_edits_are_clamped() {
        let mut model = PaceModel::new(Distance::M1500);
        model.set_opening(2.0);
        model.set_lap(75.0);
        assert_eq!(
            model.state(),
            PaceState::ByLaps {
                opening: 5.0,
                lap: 60.0
            }
        );
    }

    #[test]
    fn toggling_captures_the_derived_value() {
        let mut model = by_result(Distance::M1000, LockMode::None, 100.0);
        model.toggle_lap_lock();
        match model.lock() {
            LockMode::Lap(lap) => assert_close(lap, 38.0),
            other => panic!("expected lap lock, got {other:?}"),
        }
        // switching straight to the other lock replaces it
        model.toggle_opening_lock();
        match model.lock() {
            LockMode::Opening(opening) => assert_close(opening, 24.0),
            other => panic!("expected opening lock, got {other:?}"),
        }
        model.toggle_opening_lock();
        assert_eq!(model.lock(), LockMode::None);
        assert!(matches!(model.state(), PaceState::ByResult { .. }));
    }

    #[test]
    fn selecting_a_distance_keeps_lock_and_state() {
        let mut model = by_result(Distance::M1000, LockMode::Lap(30.0), 100.0);
        model.apply(PaceAction::SelectDistance(Distance::M10000));
        assert_eq!(model.distance(), Distance::M10000);
        assert_eq!(model.lock(), LockMode::Lap(30.0));
        assert_eq!(model.state(), PaceState::ByResult { result: 100.0 });
        assert_eq!(model.lap_splits().len(), 25);
    }

    #[test]
    fn set_result_always_switches_to_result() {
        let mut model = PaceModel::new(Distance::M500);
        model.apply(PaceAction::SetResult(42.5));
        assert_eq!(model.state(), PaceState::ByResult { result: 42.5 });
    }

    fn any_distance() -> impl Strategy<Value = Distance> {
        prop::sample::select(Distance::ALL.to_vec())
    }

    proptest! {
        #[test]
        fn splits_have_one_row_per_lap_plus_opening(
            distance in any_distance(),
            opening in 5.0..60.0f64,
            lap in 5.0..60.0f64,
        ) {
            let profile = distance.profile();
            let splits = lap_splits(opening, lap, &profile);
            prop_assert_eq!(splits.len(), profile.laps as usize + 1);
            prop_assert_eq!(splits[0].distance_m, profile.opening_m);
            prop_assert_eq!(splits[0].time_sec, opening);
            for pair in splits.windows(2) {
                prop_assert_eq!(pair[1].distance_m - pair[0].distance_m, 400);
                prop_assert_eq!(pair[1].lap_number, pair[0].lap_number + 1);
            }
            prop_assert_eq!(
                splits.last().map(|s| s.distance_m),
                Some(profile.opening_m + profile.laps * LAP_DISTANCE_M)
            );
        }

        #[test]
        fn lap_lock_holds_lap_exactly(
            distance in any_distance(),
            lap in 5.0..60.0f64,
            result in 10.0..1500.0f64,
        ) {
            let pace = by_result(distance, LockMode::Lap(lap), result).derive();
            prop_assert_eq!(pace.lap, lap);
            prop_assert_eq!(pace.opening, result - lap * f64::from(distance.laps()));
        }

        #[test]
        fn opening_lock_holds_opening_exactly(
            distance in any_distance(),
            opening in 5.0..60.0f64,
            result in 10.0..1500.0f64,
        ) {
            let pace = by_result(distance, LockMode::Opening(opening), result).derive();
            prop_assert_eq!(pace.opening, opening);
            prop_assert_eq!(pace.lap, (result - opening) / f64::from(distance.laps()));
        }

        #[test]
        fn unlocked_split_adds_back_up_to_result(
            distance in any_distance(),
            frac in 0.0..1.0f64,
        ) {
            let bounds = result_bounds(LockMode::None, &distance.profile());
            let result = bounds.min + frac * (bounds.max - bounds.min);
            let pace = by_result(distance, LockMode::None, result).derive();
            let total = pace.opening + pace.lap * f64::from(distance.laps());
            prop_assert!((total - result).abs() < 1e-6);
            prop_assert!(pace.lap <= MAX_TIME_SEC + 1e-9);
        }

        #[test]
        fn laps_round_trip_through_result(
            distance in any_distance(),
            result_frac in 0.0..1.0f64,
        ) {
            let profile = distance.profile();
            let laps = f64::from(profile.laps);
            let bounds = result_bounds(LockMode::None, &profile);
            let result = bounds.min + result_frac * (bounds.max - bounds.min);
            let opening = profile.default_opening_fraction * result;
            let lap = (1.0 - profile.default_opening_fraction) * result / laps;
            prop_assume!((MIN_TIME_SEC..=MAX_TIME_SEC).contains(&opening));
            prop_assume!((MIN_TIME_SEC..=MAX_TIME_SEC).contains(&lap));

            let mut model = PaceModel::new(distance);
            model.set_opening(opening);
            model.set_lap(lap);
            let derived = model.derive();
            model.set_result(derived.result);
            let again = model.derive();
            prop_assert!((again.opening - opening).abs() < 1e-6);
            prop_assert!((again.lap - lap).abs() < 1e-6);
        }
    }
}
