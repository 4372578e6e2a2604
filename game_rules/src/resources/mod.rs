//! Resource model: the three percentages the night wears down, plus the
//! additive inventory.

mod inventory;

pub use inventory::*;

use serde::{Deserialize, Serialize};

use crate::endings::EndingKind;

/// Upper bound for every resource percentage.
pub const RESOURCE_MAX: u8 = 100;

/// Car condition forced when the tank runs dry with a healthy engine.
pub const STRANDED_CAR_CONDITION: u8 = 10;

/// The three numeric resources of a playthrough, each in `0..=100`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Resources {
    pub sanity: u8,
    pub fuel: u8,
    pub car_condition: u8,
}

impl Default for Resources {
    fn default() -> Self {
        Self {
            sanity: 100,
            fuel: 80,
            car_condition: 100,
        }
    }
}

/// Costs subtracted from the resources by a scene or a choice.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct StatDelta {
    pub sanity: u8,
    pub fuel: u8,
    pub car: u8,
}

impl StatDelta {
    /// A delta that costs nothing but still runs the threshold checks.
    pub const NONE: Self = Self::new(0, 0, 0);

    pub const fn new(sanity: u8, fuel: u8, car: u8) -> Self {
        Self { sanity, fuel, car }
    }

    /// A delta that only costs sanity.
    pub const fn sanity(cost: u8) -> Self {
        Self::new(cost, 0, 0)
    }
}

/// What a resource mutation means for the scene that triggered it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DeltaOutcome {
    /// No threshold crossed; the scene carries on.
    Stable,
    /// A resource hit zero and the playthrough must end.
    Ended(EndingKind),
    /// Out of fuel: the car is forced to the stranded condition and the
    /// story routes to the on-foot branch.
    Stranded,
    /// The playthrough was already over; nothing was touched.
    AlreadyEnded,
}

impl DeltaOutcome {
    /// Whether the calling scene must stop processing.
    pub fn halts(&self) -> bool {
        !matches!(self, DeltaOutcome::Stable)
    }
}

impl Resources {
    pub const fn new(sanity: u8, fuel: u8, car_condition: u8) -> Self {
        Self {
            sanity,
            fuel,
            car_condition,
        }
    }

    /// Subtract the costs, flooring at zero, then evaluate the thresholds.
    ///
    /// Checks run in a fixed order: sanity, then car, then fuel. Only the
    /// first one that trips is reported.
    pub fn apply(&mut self, delta: StatDelta) -> DeltaOutcome {
        self.sanity = self.sanity.saturating_sub(delta.sanity);
        self.fuel = self.fuel.saturating_sub(delta.fuel);
        self.car_condition = self.car_condition.saturating_sub(delta.car);

        if self.sanity == 0 {
            return DeltaOutcome::Ended(EndingKind::Sanity);
        }
        if self.car_condition == 0 {
            return DeltaOutcome::Ended(EndingKind::Crash);
        }
        if self.fuel == 0 && self.car_condition > STRANDED_CAR_CONDITION {
            self.car_condition = STRANDED_CAR_CONDITION;
            return DeltaOutcome::Stranded;
        }
        DeltaOutcome::Stable
    }

    /// Overwrite the car condition (repairs and breakdowns are absolute).
    pub fn set_car_condition(&mut self, value: u8) {
        self.car_condition = value.min(RESOURCE_MAX);
    }

    /// Check every resource is inside `0..=RESOURCE_MAX`.
    pub fn is_within_bounds(&self) -> bool {
        self.sanity <= RESOURCE_MAX
            && self.fuel <= RESOURCE_MAX
            && self.car_condition <= RESOURCE_MAX
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_costs_floor_at_zero() {
        let mut resources = Resources::new(5, 3, 50);
        let outcome = resources.apply(StatDelta::new(20, 0, 0));

        assert_eq!(resources.sanity, 0);
        assert_eq!(outcome, DeltaOutcome::Ended(EndingKind::Sanity));
    }

    #[test]
    fn test_stable_delta() {
        let mut resources = Resources::default();
        let outcome = resources.apply(StatDelta::new(10, 5, 0));

        assert_eq!(outcome, DeltaOutcome::Stable);
        assert_eq!(resources, Resources::new(90, 75, 100));
        assert!(!outcome.halts());
    }

    #[test]
    fn test_sanity_wins_over_crash_and_fuel() {
        let mut resources = Resources::new(10, 2, 20);
        let outcome = resources.apply(StatDelta::new(10, 2, 20));
        assert_eq!(outcome, DeltaOutcome::Ended(EndingKind::Sanity));
    }

    #[test]
    fn test_crash_wins_over_fuel() {
        let mut resources = Resources::new(50, 2, 20);
        let outcome = resources.apply(StatDelta::new(5, 2, 20));
        assert_eq!(outcome, DeltaOutcome::Ended(EndingKind::Crash));
        assert_eq!(resources.car_condition, 0);
    }

    #[test]
    fn test_empty_tank_strands_the_car() {
        let mut resources = Resources::new(50, 4, 60);
        let outcome = resources.apply(StatDelta::new(0, 5, 0));

        assert_eq!(outcome, DeltaOutcome::Stranded);
        assert_eq!(resources.fuel, 0);
        assert_eq!(resources.car_condition, STRANDED_CAR_CONDITION);
        assert!(outcome.halts());
    }

    #[test]
    fn test_empty_tank_with_wrecked_car_is_not_a_signal() {
        let mut resources = Resources::new(50, 0, 10);
        assert_eq!(resources.apply(StatDelta::NONE), DeltaOutcome::Stable);

        let mut resources = Resources::new(50, 0, 7);
        assert_eq!(resources.apply(StatDelta::sanity(5)), DeltaOutcome::Stable);
        assert_eq!(resources.car_condition, 7);
    }

    #[test]
    fn test_zero_delta_still_checks_thresholds() {
        let mut resources = Resources::new(40, 0, 30);
        assert_eq!(resources.apply(StatDelta::NONE), DeltaOutcome::Stranded);
        assert_eq!(resources.car_condition, STRANDED_CAR_CONDITION);
    }

    #[test]
    fn test_set_car_condition_is_absolute_and_bounded() {
        let mut resources = Resources::new(50, 50, 5);
        resources.set_car_condition(30);
        assert_eq!(resources.car_condition, 30);

        resources.set_car_condition(250);
        assert_eq!(resources.car_condition, RESOURCE_MAX);
        assert!(resources.is_within_bounds());
    }
}
