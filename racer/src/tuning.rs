//! Gameplay rulesets.
//!
//! Two rulesets have shipped: [`Tuning::CLASSIC`] (the default) and
//! [`Tuning::RELAXED`], which lets the car coast further and spawns
//! obstacles less often. Everything else is shared.

use crate::time::Duration;

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Tuning {
    // Car
    pub car_width: f32,
    pub car_height: f32,
    /// Gap between the car's bottom edge and the bottom of the screen.
    pub car_bottom_margin: f32,
    pub car_acceleration: f32,
    pub car_max_speed: f32,
    /// Speed multiplier per tick while no steering button is held.
    pub friction: f32,

    // Obstacles
    pub obstacle_width: f32,
    pub obstacle_height: f32,
    /// Extra distance above the screen at which obstacles appear.
    pub obstacle_spawn_gap: f32,
    /// Minimum time between spawn waves.
    pub obstacle_interval: Duration,
    pub obstacle_min_speed: f32,
    pub obstacle_max_speed: f32,
    /// Score needed for each extra pixel per tick of obstacle speed.
    pub score_per_speed_step: u32,
    pub max_speed_bonus: f32,

    // Shield
    pub shield_width: f32,
    pub shield_height: f32,
    pub shield_duration: Duration,
    pub shield_fall_speed: f32,
    pub shield_interval_min: Duration,
    pub shield_interval_max: Duration,

    // Background
    pub scroll_speed: f32,
}

impl Tuning {
    pub const CLASSIC: Self = Self {
        car_width: 20.0,
        car_height: 50.0,
        car_bottom_margin: 10.0,
        car_acceleration: 2.0,
        car_max_speed: 15.0,
        friction: 0.8,

        obstacle_width: 24.0,
        obstacle_height: 55.0,
        obstacle_spawn_gap: 40.0,
        obstacle_interval: Duration::millis(2_000),
        obstacle_min_speed: 3.0,
        obstacle_max_speed: 7.0,
        score_per_speed_step: 1_000,
        max_speed_bonus: 4.0,

        shield_width: 24.0,
        shield_height: 24.0,
        shield_duration: Duration::secs(5),
        shield_fall_speed: 3.0,
        shield_interval_min: Duration::secs(20),
        shield_interval_max: Duration::secs(30),

        scroll_speed: 4.0,
    };

    pub const RELAXED: Self = Self {
        friction: 0.9,
        obstacle_interval: Duration::millis(2_500),
        ..Self::CLASSIC
    };

    /// Speed added to freshly spawned obstacles at `score`.
    pub fn speed_bonus(&self, score: u32) -> f32 {
        if self.score_per_speed_step == 0 {
            return 0.0;
        }
        ((score / self.score_per_speed_step) as f32).min(self.max_speed_bonus)
    }
}

impl Default for Tuning {
    fn default() -> Self {
        Self::CLASSIC
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn relaxed_only_changes_friction_and_spawn_gate() {
        let relaxed = Tuning::RELAXED;
        assert_eq!(relaxed.friction, 0.9);
        assert_eq!(relaxed.obstacle_interval, Duration::millis(2_500));
        assert_eq!(
            Tuning {
                friction: Tuning::CLASSIC.friction,
                obstacle_interval: Tuning::CLASSIC.obstacle_interval,
                ..relaxed
            },
            Tuning::CLASSIC
        );
        assert_eq!(relaxed.shield_duration, Duration::secs(5));
    }

    #[test]
    fn speed_bonus_steps_and_caps() {
        let tuning = Tuning::CLASSIC;
        assert_eq!(tuning.speed_bonus(0), 0.0);
        assert_eq!(tuning.speed_bonus(999), 0.0);
        assert_eq!(tuning.speed_bonus(2_500), 2.0);
        assert_eq!(tuning.speed_bonus(1_000_000), 4.0);
        assert_eq!(
            Tuning {
                score_per_speed_step: 0,
                ..tuning
            }
            .speed_bonus(5_000),
            0.0
        );
    }
}
