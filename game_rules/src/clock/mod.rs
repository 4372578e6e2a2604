//! The night clock: minutes past midnight, counting towards dawn.

use serde::{Deserialize, Serialize};

/// 02:17, when the woman first appears on the road.
pub const DEFAULT_START_MINUTES: u32 = 137;

/// 04:44, when the night lets go.
pub const DEFAULT_END_MINUTES: u32 = 284;

/// Elapsed in-game time, one minute per clock tick.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct NightClock {
    elapsed_minutes: u32,
    end_minutes: u32,
}

impl Default for NightClock {
    fn default() -> Self {
        Self::new(DEFAULT_START_MINUTES, DEFAULT_END_MINUTES)
    }
}

impl NightClock {
    pub fn new(start_minutes: u32, end_minutes: u32) -> Self {
        Self {
            elapsed_minutes: start_minutes,
            end_minutes,
        }
    }

    pub fn elapsed_minutes(&self) -> u32 {
        self.elapsed_minutes
    }

    pub fn end_minutes(&self) -> u32 {
        self.end_minutes
    }

    pub fn hour(&self) -> u32 {
        self.elapsed_minutes / 60
    }

    pub fn minute(&self) -> u32 {
        self.elapsed_minutes % 60
    }

    /// Advance by one minute.
    pub fn advance_minute(&mut self) {
        self.elapsed_minutes = self.elapsed_minutes.saturating_add(1);
    }

    /// Check if dawn has been reached.
    pub fn is_over(&self) -> bool {
        self.elapsed_minutes >= self.end_minutes
    }

    /// Format as the status-bar time, e.g. `02:17 AM`.
    pub fn formatted(&self) -> String {
        format!("{:02}:{:02} AM", self.hour(), self.minute())
    }
}

impl std::fmt::Display for NightClock {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.formatted())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_clock_format() {
        let clock = NightClock::default();
        assert_eq!(clock.formatted(), "02:17 AM");
        assert_eq!(clock.hour(), 2);
        assert_eq!(clock.minute(), 17);
        assert!(!clock.is_over());
    }

    #[test]
    fn test_advance_rolls_over_the_hour() {
        let mut clock = NightClock::new(179, 284);
        clock.advance_minute();
        assert_eq!(clock.to_string(), "03:00 AM");
    }

    #[test]
    fn test_is_over_at_end_minute() {
        let mut clock = NightClock::new(283, 284);
        assert!(!clock.is_over());

        clock.advance_minute();
        assert_eq!(clock.elapsed_minutes(), 284);
        assert_eq!(clock.formatted(), "04:44 AM");
        assert!(clock.is_over());
    }
}
