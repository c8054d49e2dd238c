//! Shield power-up.
//!
//! The shield is a single item per game. It periodically drops onto the
//! field; driving into it banks one use. A banked use can be engaged at any
//! time for [`Tuning::shield_duration`] of invulnerability.
//!
//! ```text
//!             spawn()                 collect()
//!  Inactive ───────────► Active(Falling) ───────► Inactive, count + 1
//!     ▲                        │
//!     │   deactivate()         │ expires / leaves the screen
//!     └────────────────────────┘
//!     │
//!     │ use_shield(), count > 0
//!     ▼
//!  Active(Worn) ── expires ──► Inactive
//! ```
//!
//! Both active modes count for [`ShieldItem::is_active`], which is what
//! grants invulnerability. Expiry is evaluated lazily; the game loop calls
//! [`ShieldItem::deactivate`] once [`ShieldItem::is_expired`] reports true.

use crate::{
    geometry::BBox,
    rng::Rng,
    time::{
        Duration,
        Instant,
        elapsed,
    },
    tuning::Tuning,
};

/// How an active shield got onto the screen.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ShieldMode {
    /// Dropped on the field as a pickup, falling toward the car.
    Falling,
    /// Engaged from the bank, riding along with the car.
    Worn,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ShieldState {
    Inactive,
    Active(ShieldMode),
}

#[derive(Clone, Debug)]
pub struct ShieldItem {
    width: f32,
    height: f32,
    state: ShieldState,
    duration: Duration,
    activation_time: Instant,
    spawn_time: Instant,
    spawn_interval: Duration,
    spawn_speed: f32,
    count: u32,
    x: f32,
    y: f32,
    interval_min: Duration,
    interval_max: Duration,
}

impl ShieldItem {
    /// An inactive shield whose first drop is due one spawn interval after `now`.
    pub fn new(tuning: &Tuning, now: Instant, rng: &mut Rng) -> Self {
        let mut shield = Self {
            width: tuning.shield_width,
            height: tuning.shield_height,
            state: ShieldState::Inactive,
            duration: tuning.shield_duration,
            activation_time: now,
            spawn_time: now,
            spawn_interval: tuning.shield_interval_min,
            spawn_speed: tuning.shield_fall_speed,
            count: 0,
            x: 0.0,
            y: -tuning.shield_height,
            interval_min: tuning.shield_interval_min,
            interval_max: tuning.shield_interval_max,
        };
        shield.roll_spawn_interval(rng);
        shield
    }

    /// Drop the shield at a random column just above the screen.
    pub fn spawn(&mut self, now: Instant, field_width: f32, rng: &mut Rng) {
        self.state = ShieldState::Active(ShieldMode::Falling);
        self.activation_time = now;
        self.spawn_time = now;
        self.x = rng.range_inclusive(0, (field_width - self.width) as i32) as f32;
        self.y = -self.height;
        self.roll_spawn_interval(rng);
        debug!("shield dropped at x={}", self.x);
    }

    /// Falling shields sink toward the car; worn ones follow it.
    pub fn update(&mut self, car: &BBox) {
        match self.state {
            ShieldState::Active(ShieldMode::Falling) => self.y += self.spawn_speed,
            ShieldState::Active(ShieldMode::Worn) => {
                let bbox = self.bbox().centered_on(car);
                self.x = bbox.x;
                self.y = bbox.y;
            }
            ShieldState::Inactive => {}
        }
    }

    /// Overlap between the item's own box and the car's.
    pub fn collides_with(&self, car: &BBox) -> bool {
        self.bbox().overlaps(car)
    }

    /// Take the item off the field and bank one use.
    pub fn collect(&mut self) {
        if self.state == ShieldState::Inactive {
            return;
        }
        self.state = ShieldState::Inactive;
        self.count = self.count.saturating_add(1);
        debug!("shield collected, {} banked", self.count);
    }

    /// Engage a banked use around the car. Returns `false` when nothing is
    /// banked or a shield is already protecting the car.
    pub fn use_shield(&mut self, now: Instant, car: &BBox) -> bool {
        if self.count == 0 || self.is_active(now) {
            return false;
        }
        self.count -= 1;
        self.state = ShieldState::Active(ShieldMode::Worn);
        self.activation_time = now;
        let bbox = self.bbox().centered_on(car);
        self.x = bbox.x;
        self.y = bbox.y;
        debug!("shield engaged, {} left", self.count);
        true
    }

    /// Back to inactive without banking anything.
    pub fn deactivate(&mut self) {
        self.state = ShieldState::Inactive;
    }

    /// Active and still inside its duration window.
    pub fn is_active(&self, now: Instant) -> bool {
        matches!(self.state, ShieldState::Active(_))
            && elapsed(now, self.activation_time) < self.duration
    }

    /// Active but past its duration window.
    pub fn is_expired(&self, now: Instant) -> bool {
        matches!(self.state, ShieldState::Active(_)) && !self.is_active(now)
    }

    /// Whether a new drop is due.
    pub fn spawn_due(&self, now: Instant) -> bool {
        self.state == ShieldState::Inactive && elapsed(now, self.spawn_time) > self.spawn_interval
    }

    pub fn state(&self) -> ShieldState {
        self.state
    }

    pub fn is_falling(&self) -> bool {
        self.state == ShieldState::Active(ShieldMode::Falling)
    }

    pub fn is_worn(&self) -> bool {
        self.state == ShieldState::Active(ShieldMode::Worn)
    }

    /// Banked uses.
    pub fn count(&self) -> u32 {
        self.count
    }

    pub fn bbox(&self) -> BBox {
        BBox::new(self.x, self.y, self.width, self.height)
    }

    pub fn spawn_interval(&self) -> Duration {
        self.spawn_interval
    }

    /// Time left in the active window, zero when inactive.
    pub fn remaining(&self, now: Instant) -> Duration {
        if !self.is_active(now) {
            return Duration::from_ticks(0);
        }
        self.duration - elapsed(now, self.activation_time)
    }

    #[cfg(test)]
    pub(crate) fn place(&mut self, x: f32, y: f32) {
        self.x = x;
        self.y = y;
    }

    fn roll_spawn_interval(&mut self, rng: &mut Rng) {
        let min = self.interval_min.to_millis();
        let span = self.interval_max.to_millis().saturating_sub(min);
        let extra = rng.range(span.min(u32::MAX as u64) as u32 + 1);
        self.spawn_interval = Duration::millis(min + extra as u64);
    }
}
