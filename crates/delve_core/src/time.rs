//! Deterministic time
//!
//! Fixed 60Hz tick rate, plus the battle pacing derived from the
//! player's speed setting.

use std::time::Duration;

/// Fixed simulation tick rate (60 Hz = 16.666ms per tick)
pub const TICK_RATE_HZ: u32 = 60;
pub const TICK_DURATION: Duration = Duration::from_micros(16_666); // ~16.666ms

/// Slowest battle speed setting.
pub const BATTLE_SPEED_MIN: u32 = 1;
/// Fastest battle speed setting.
pub const BATTLE_SPEED_MAX: u32 = 6;

/// Number of simulation ticks between two battle actions for a given
/// speed setting. Out-of-range settings are clamped first, so the result
/// is always in `TICK_RATE_HZ / BATTLE_SPEED_MAX ..= TICK_RATE_HZ`.
pub fn battle_step_ticks(speed_setting: u32) -> u32 {
    TICK_RATE_HZ / speed_setting.clamp(BATTLE_SPEED_MIN, BATTLE_SPEED_MAX)
}

/// Wall-clock duration of one battle step.
pub fn battle_step_duration(speed_setting: u32) -> Duration {
    TICK_DURATION * battle_step_ticks(speed_setting)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_battle_step_divides_tick_rate() {
        assert_eq!(battle_step_ticks(1), 60);
        assert_eq!(battle_step_ticks(2), 30);
        assert_eq!(battle_step_ticks(4), 15);
        assert_eq!(battle_step_ticks(6), 10);
    }

    #[test]
    fn test_battle_step_clamps_setting() {
        // Zero would divide by zero without the clamp
        assert_eq!(battle_step_ticks(0), battle_step_ticks(BATTLE_SPEED_MIN));
        assert_eq!(battle_step_ticks(99), battle_step_ticks(BATTLE_SPEED_MAX));
    }

    #[test]
    fn test_battle_step_duration() {
        assert_eq!(battle_step_duration(6), TICK_DURATION * 10);
    }
}
