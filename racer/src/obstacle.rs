//! Rival cars falling down the circuit, drifting sideways as they go.

use crate::{
    geometry::BBox,
    rng::Rng,
};

/// Fastest sideways drift, in pixels per tick, either direction.
pub const MAX_DRIFT_SPEED: f32 = 5.0;
/// Largest random nudge applied to the drift each tick.
const DRIFT_JITTER: f32 = 0.1;
/// Inward margin used when checking obstacles against each other.
pub const COLLISION_BUFFER: f32 = 5.0;

/// Which sprite an obstacle is drawn with.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ObstacleKind {
    Sedan,
    Coupe,
}

impl ObstacleKind {
    pub(crate) fn random(rng: &mut Rng) -> Self {
        if rng.range(2) == 0 { Self::Sedan } else { Self::Coupe }
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct Obstacle {
    width: f32,
    height: f32,
    speed: f32,
    x: f32,
    y: f32,
    x_speed: f32,
    x_acceleration: f32,
    kind: ObstacleKind,
}

impl Obstacle {
    /// An obstacle at rest horizontally, falling at `speed` pixels per tick.
    pub const fn new(bbox: BBox, speed: f32, kind: ObstacleKind) -> Self {
        Self {
            width: bbox.width,
            height: bbox.height,
            speed,
            x: bbox.x,
            y: bbox.y,
            x_speed: 0.0,
            x_acceleration: 0.0,
            kind,
        }
    }

    /// Advance one tick inside a field `field_width` pixels wide.
    pub fn update(&mut self, field_width: f32, rng: &mut Rng) {
        self.y += self.speed;
        self.x += self.x_speed;

        let max_x = (field_width - self.width).max(0.0);
        if self.x <= 0.0 || self.x >= max_x {
            self.x = self.x.clamp(0.0, max_x);
            self.x_speed = -self.x_speed;
        }

        self.x_acceleration = rng.uniform(-DRIFT_JITTER, DRIFT_JITTER);
        self.x_speed = (self.x_speed + self.x_acceleration).clamp(-MAX_DRIFT_SPEED, MAX_DRIFT_SPEED);
    }

    /// Overlap with another obstacle, ignoring a thin margin on each.
    pub fn collides_with(&self, other: &Self) -> bool {
        self.bbox()
            .overlaps_with_buffer(&other.bbox(), COLLISION_BUFFER)
    }

    pub fn bbox(&self) -> BBox {
        BBox::new(self.x, self.y, self.width, self.height)
    }

    pub fn kind(&self) -> ObstacleKind {
        self.kind
    }

    pub fn speed(&self) -> f32 {
        self.speed
    }

    pub fn x_speed(&self) -> f32 {
        self.x_speed
    }

    pub fn x_acceleration(&self) -> f32 {
        self.x_acceleration
    }
}
