//! Game state - the mutable record of a single playthrough.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::clock::NightClock;
use crate::config::GameConfig;
use crate::endings::EndingKind;
use crate::resources::{DeltaOutcome, Inventory, Item, Resources, StatDelta};

/// Identifies one playthrough. Deferred work is tagged with it so that a
/// timer scheduled for an old night never touches a new one.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SessionId(pub Uuid);

impl SessionId {
    /// Create a new random session ID.
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }

    /// Create a nil session ID (useful for placeholders).
    pub fn nil() -> Self {
        Self(Uuid::nil())
    }
}

impl Default for SessionId {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Display for SessionId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Everything that changes during one night.
///
/// Once the state has ended, every mutator is a no-op: the first ending
/// written wins and nothing afterwards can change resources, inventory or
/// the clock.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GameState {
    id: SessionId,
    resources: Resources,
    inventory: Inventory,
    clock: NightClock,
    ending: Option<EndingKind>,
}

impl Default for GameState {
    fn default() -> Self {
        Self::new(&GameConfig::default())
    }
}

impl GameState {
    /// Start a fresh night with its own session ID.
    pub fn new(config: &GameConfig) -> Self {
        Self {
            id: SessionId::new(),
            resources: config.starting,
            inventory: Inventory::new(),
            clock: NightClock::new(config.start_minutes, config.end_minutes),
            ending: None,
        }
    }

    /// Replace the resources (for setting up specific situations).
    pub fn with_resources(mut self, resources: Resources) -> Self {
        self.resources = resources;
        self
    }

    /// Start holding an item (for setting up specific situations).
    pub fn with_item(mut self, item: Item) -> Self {
        self.inventory.grant(item);
        self
    }

    pub fn id(&self) -> SessionId {
        self.id
    }

    pub fn resources(&self) -> &Resources {
        &self.resources
    }

    pub fn inventory(&self) -> &Inventory {
        &self.inventory
    }

    pub fn clock(&self) -> &NightClock {
        &self.clock
    }

    pub fn is_active(&self) -> bool {
        self.ending.is_none()
    }

    /// The ending reached, if any.
    pub fn ending(&self) -> Option<EndingKind> {
        self.ending
    }

    pub fn has(&self, item: Item) -> bool {
        self.inventory.has(item)
    }

    /// Apply a cost and report which threshold, if any, was crossed.
    ///
    /// The ending itself is not recorded here; the caller decides how to
    /// present it and then calls [`GameState::terminate`].
    pub fn apply_delta(&mut self, delta: StatDelta) -> DeltaOutcome {
        if !self.is_active() {
            return DeltaOutcome::AlreadyEnded;
        }
        self.resources.apply(delta)
    }

    /// Add an item. Returns `true` if it was newly granted.
    pub fn grant(&mut self, item: Item) -> bool {
        self.is_active() && self.inventory.grant(item)
    }

    /// Overwrite the car condition. Returns `false` once ended.
    pub fn set_car_condition(&mut self, value: u8) -> bool {
        if !self.is_active() {
            return false;
        }
        self.resources.set_car_condition(value);
        true
    }

    /// Advance the clock one minute. Returns `true` if dawn was reached.
    pub fn advance_clock(&mut self) -> bool {
        if !self.is_active() {
            return false;
        }
        self.clock.advance_minute();
        self.clock.is_over()
    }

    /// End the night. Returns `false` if it had already ended.
    pub fn terminate(&mut self, kind: EndingKind) -> bool {
        if !self.is_active() {
            return false;
        }
        self.ending = Some(kind);
        true
    }

    /// The status bar line, e.g.
    /// `TIME: 02:17 AM | SANITY: 100% | FUEL: 80% | CAR: 100%`.
    pub fn status_line(&self) -> String {
        format!(
            "TIME: {} | SANITY: {}% | FUEL: {}% | CAR: {}%",
            self.clock.formatted(),
            self.resources.sanity,
            self.resources.fuel,
            self.resources.car_condition
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fresh_state() {
        let state = GameState::default();
        assert!(state.is_active());
        assert!(state.inventory().is_empty());
        assert_eq!(
            state.status_line(),
            "TIME: 02:17 AM | SANITY: 100% | FUEL: 80% | CAR: 100%"
        );
    }

    #[test]
    fn test_each_state_has_its_own_id() {
        let a = GameState::default();
        let b = GameState::default();
        assert_ne!(a.id(), b.id());
    }

    #[test]
    fn test_terminate_once() {
        let mut state = GameState::default();
        assert!(state.terminate(EndingKind::Crash));
        assert!(!state.terminate(EndingKind::Survived));
        assert_eq!(state.ending(), Some(EndingKind::Crash));
        assert!(!state.is_active());
    }

    #[test]
    fn test_ended_state_is_frozen() {
        let mut state = GameState::default();
        state.terminate(EndingKind::Captured);
        let before = *state.resources();

        assert_eq!(state.apply_delta(StatDelta::new(50, 50, 50)), DeltaOutcome::AlreadyEnded);
        assert!(!state.grant(Item::Clue));
        assert!(!state.set_car_condition(30));
        assert!(!state.advance_clock());

        assert_eq!(*state.resources(), before);
        assert!(!state.has(Item::Clue));
        assert_eq!(state.clock().elapsed_minutes(), 137);
    }

    #[test]
    fn test_advance_clock_reports_dawn() {
        let config = GameConfig {
            start_minutes: 282,
            ..GameConfig::default()
        };
        let mut state = GameState::new(&config);

        assert!(!state.advance_clock());
        assert!(state.advance_clock());
        assert_eq!(state.clock().elapsed_minutes(), 284);
    }

    #[test]
    fn test_apply_delta_stays_in_bounds() {
        let mut state = GameState::default();
        for _ in 0..10 {
            state.apply_delta(StatDelta::new(7, 9, 3));
            assert!(state.resources().is_within_bounds());
        }
    }

    #[test]
    fn test_builders() {
        let state = GameState::default()
            .with_resources(Resources::new(40, 10, 5))
            .with_item(Item::SparkPlug);

        assert_eq!(state.resources().car_condition, 5);
        assert!(state.has(Item::SparkPlug));
        assert!(!state.has(Item::Locket));
    }
}
