//! One run of the game: the car, the traffic, the shield and the scrolling road.

use heapless::Vec;

use crate::{
    geometry::BBox,
    input::ButtonState,
    obstacle::{
        Obstacle,
        ObstacleKind,
    },
    rng::Rng,
    session::Event,
    shield::ShieldItem,
    time::{
        Instant,
        elapsed,
    },
    tuning::Tuning,
};

/// Most obstacles alive at once. Spawns beyond this are dropped.
pub const MAX_OBSTACLES: usize = 16;

pub struct Game {
    width: f32,
    height: f32,
    tuning: Tuning,

    car_x: f32,
    car_y: f32,
    car_speed: f32,

    obstacles: Vec<Obstacle, MAX_OBSTACLES>,
    last_obstacle_time: Instant,

    shield: ShieldItem,
    background_y: f32,
}

impl Game {
    /// A fresh run on a `width` × `height` field, car centered near the bottom.
    pub fn new(width: f32, height: f32, tuning: Tuning, now: Instant, rng: &mut Rng) -> Self {
        Self {
            width,
            height,
            car_x: ((width - tuning.car_width) / 2.0).max(0.0),
            car_y: height - tuning.car_height - tuning.car_bottom_margin,
            car_speed: 0.0,
            obstacles: Vec::new(),
            last_obstacle_time: now,
            shield: ShieldItem::new(&tuning, now, rng),
            background_y: 0.0,
            tuning,
        }
    }

    /// Start a wave of one or two obstacles once the spawn gate has opened.
    ///
    /// Candidates overlapping an obstacle already on the field are dropped,
    /// not retried, so a crowded road sees fewer spawns.
    pub fn spawn_obstacle(&mut self, now: Instant, score: u32, rng: &mut Rng) {
        if elapsed(now, self.last_obstacle_time) <= self.tuning.obstacle_interval {
            return;
        }

        let wave = rng.range_inclusive(1, 2);
        for _ in 0..wave {
            let speed = rng.uniform(self.tuning.obstacle_min_speed, self.tuning.obstacle_max_speed)
                + self.tuning.speed_bonus(score);
            let x = rng.range_inclusive(0, (self.width - self.tuning.obstacle_width) as i32) as f32;
            let y = -self.tuning.obstacle_height - self.tuning.obstacle_spawn_gap;
            let candidate = Obstacle::new(
                BBox::new(x, y, self.tuning.obstacle_width, self.tuning.obstacle_height),
                speed,
                ObstacleKind::random(rng),
            );

            if self.obstacles.iter().any(|o| candidate.collides_with(o)) {
                trace!("spawn at x={} rejected: overlaps traffic", x);
                continue;
            }
            if self.obstacles.push(candidate).is_err() {
                trace!("spawn at x={} rejected: road full", x);
            }
        }
        self.last_obstacle_time = now;
    }

    /// Drop the shield onto the field when its interval has passed.
    pub fn spawn_shield(&mut self, now: Instant, rng: &mut Rng) {
        if self.shield.spawn_due(now) {
            self.shield.spawn(now, self.width, rng);
        }
    }

    /// Advance one tick. Returns [`Event::ShieldCollected`] when the car
    /// picks up a falling shield.
    pub fn update(
        &mut self,
        now: Instant,
        buttons: ButtonState,
        score: u32,
        rng: &mut Rng,
    ) -> Option<Event> {
        self.background_y = (self.background_y + self.tuning.scroll_speed) % self.height;

        for obstacle in self.obstacles.iter_mut() {
            obstacle.update(self.width, rng);
        }
        let height = self.height;
        self.obstacles.retain(|o| o.bbox().y <= height);

        self.update_car_position(buttons);

        self.spawn_shield(now, rng);
        self.spawn_obstacle(now, score, rng);

        let car = self.car_bbox();
        self.shield.update(&car);

        if self.shield.is_expired(now) || (self.shield.is_falling() && self.shield.bbox().y > height) {
            self.shield.deactivate();
        }

        if self.shield.is_falling() && self.shield.collides_with(&car) {
            self.shield.collect();
            return Some(Event::ShieldCollected);
        }
        None
    }

    /// Steer with left/right, coast with friction otherwise. Left wins when
    /// both are held.
    pub fn update_car_position(&mut self, buttons: ButtonState) {
        if buttons.left {
            self.car_speed -= self.tuning.car_acceleration;
        } else if buttons.right {
            self.car_speed += self.tuning.car_acceleration;
        } else {
            self.car_speed *= self.tuning.friction;
        }

        let max = self.tuning.car_max_speed;
        self.car_speed = self.car_speed.clamp(-max, max);

        self.car_x += self.car_speed;
        self.car_x = self
            .car_x
            .clamp(0.0, (self.width - self.tuning.car_width).max(0.0));
    }

    /// Whether the car hit an obstacle. Hits while the shield is active are
    /// ignored.
    pub fn check_collision(&self, now: Instant) -> bool {
        let car = self.car_bbox();
        let shielded = self.shield.is_active(now);
        for obstacle in &self.obstacles {
            if car.overlaps(&obstacle.bbox()) {
                if shielded {
                    continue;
                }
                return true;
            }
        }
        false
    }

    /// Engage a banked shield around the car.
    pub fn use_shield(&mut self, now: Instant) -> bool {
        let car = self.car_bbox();
        self.shield.use_shield(now, &car)
    }

    pub fn car_bbox(&self) -> BBox {
        BBox::new(self.car_x, self.car_y, self.tuning.car_width, self.tuning.car_height)
    }

    pub fn car_speed(&self) -> f32 {
        self.car_speed
    }

    pub fn obstacles(&self) -> &[Obstacle] {
        &self.obstacles
    }

    pub fn shield(&self) -> &ShieldItem {
        &self.shield
    }

    /// Vertical scroll of the road, in `0..height`.
    pub fn background_y(&self) -> f32 {
        self.background_y
    }

    pub fn width(&self) -> f32 {
        self.width
    }

    pub fn height(&self) -> f32 {
        self.height
    }

    pub fn tuning(&self) -> &Tuning {
        &self.tuning
    }

    #[cfg(test)]
    pub(crate) fn shield_mut(&mut self) -> &mut ShieldItem {
        &mut self.shield
    }

    #[cfg(test)]
    pub(crate) fn insert_obstacle(&mut self, obstacle: Obstacle) {
        assert!(self.obstacles.push(obstacle).is_ok(), "test road is full");
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        shield::ShieldState,
        time::Duration,
    };

    const LEFT: ButtonState = ButtonState {
        left: true,
        ..ButtonState::NONE
    };
    const RIGHT: ButtonState = ButtonState {
        right: true,
        ..ButtonState::NONE
    };

    fn game() -> (Game, Rng, Instant) {
        let mut rng = Rng::new(0xC0FFEE);
        let now = Instant::from_ticks(0);
        (Game::new(240.0, 240.0, Tuning::CLASSIC, now, &mut rng), rng, now)
    }

    fn still(x: f32, y: f32) -> Obstacle {
        Obstacle::new(BBox::new(x, y, 24.0, 55.0), 0.0, ObstacleKind::Coupe)
    }

    #[test]
    fn car_starts_centered_near_the_bottom() {
        let (game, _, _) = game();
        assert_eq!(game.car_bbox(), BBox::new(110.0, 180.0, 20.0, 50.0));
        assert_eq!(game.car_speed(), 0.0);
        assert!(game.obstacles().is_empty());
    }

    #[test]
    fn holding_left_saturates_speed_and_stops_at_the_edge() {
        let (mut game, _, _) = game();
        game.car_x = 100.0;

        let mut previous_x = game.car_bbox().x;
        for tick in 1..=8 {
            game.update_car_position(LEFT);
            let x = game.car_bbox().x;
            assert!(x < previous_x);
            previous_x = x;
            if tick < 8 {
                assert_eq!(game.car_speed(), -2.0 * tick as f32);
            }
        }
        assert_eq!(game.car_speed(), -15.0);

        for _ in 0..20 {
            game.update_car_position(LEFT);
            let x = game.car_bbox().x;
            assert!(x <= previous_x);
            assert!(x >= 0.0);
            assert_eq!(game.car_speed(), -15.0);
            previous_x = x;
        }
        assert_eq!(game.car_bbox().x, 0.0);
    }

    #[test]
    fn right_edge_clamps_too() {
        let (mut game, _, _) = game();
        for _ in 0..50 {
            game.update_car_position(RIGHT);
            assert!(game.car_speed() <= 15.0);
            assert!(game.car_bbox().right() <= 240.0);
        }
        assert_eq!(game.car_bbox().x, 220.0);
    }

    #[test]
    fn left_takes_priority_over_right() {
        let (mut game, _, _) = game();
        game.update_car_position(ButtonState {
            left: true,
            right: true,
            ..ButtonState::NONE
        });
        assert_eq!(game.car_speed(), -2.0);
    }

    #[test]
    fn friction_decays_speed() {
        let (mut game, _, _) = game();
        for _ in 0..3 {
            game.update_car_position(RIGHT);
        }
        assert_eq!(game.car_speed(), 6.0);
        game.update_car_position(ButtonState::NONE);
        assert!((game.car_speed() - 4.8).abs() < 1e-5);
        for _ in 0..100 {
            game.update_car_position(ButtonState::NONE);
        }
        assert!(game.car_speed().abs() < 1e-3);
    }

    #[test]
    fn relaxed_friction_coasts_further() {
        let mut rng = Rng::new(1);
        let now = Instant::from_ticks(0);
        let mut game = Game::new(240.0, 240.0, Tuning::RELAXED, now, &mut rng);
        for _ in 0..3 {
            game.update_car_position(RIGHT);
        }
        game.update_car_position(ButtonState::NONE);
        assert!((game.car_speed() - 5.4).abs() < 1e-5);
    }

    #[test]
    fn unshielded_overlap_ends_the_game() {
        let (mut game, _, now) = game();
        assert!(!game.check_collision(now));
        game.insert_obstacle(still(100.0, 170.0));
        assert!(game.check_collision(now));
    }

    #[test]
    fn shield_grants_invulnerability_until_it_expires() {
        let (mut game, mut rng, now) = game();
        game.insert_obstacle(still(0.0, 0.0));
        game.insert_obstacle(still(100.0, 170.0));

        game.shield.spawn(now, 240.0, &mut rng);
        game.shield.collect();
        assert!(game.use_shield(now));
        assert!(game.shield().is_active(now));
        assert!(!game.check_collision(now));
        assert!(!game.check_collision(now + Duration::millis(4_999)));
        assert!(game.check_collision(now + Duration::secs(5)));
    }

    #[test]
    fn obstacles_are_pruned_once_past_the_bottom() {
        let (mut game, mut rng, now) = game();
        game.insert_obstacle(Obstacle::new(
            BBox::new(100.0, -95.0, 24.0, 55.0),
            5.0,
            ObstacleKind::Sedan,
        ));

        for _ in 0..20 {
            game.update(now, ButtonState::NONE, 0, &mut rng);
        }
        assert_eq!(game.obstacles()[0].bbox().y, 5.0);

        for _ in 20..67 {
            game.update(now, ButtonState::NONE, 0, &mut rng);
        }
        assert_eq!(game.obstacles()[0].bbox().y, 240.0);

        game.update(now, ButtonState::NONE, 0, &mut rng);
        assert!(game.obstacles().is_empty());
    }

    #[test]
    fn obstacle_spawns_are_rate_limited() {
        let (mut game, mut rng, now) = game();
        game.spawn_obstacle(now + Duration::secs(2), 0, &mut rng);
        assert!(game.obstacles().is_empty());

        let later = now + Duration::millis(2_001);
        game.spawn_obstacle(later, 0, &mut rng);
        let wave = game.obstacles().len();
        assert!((1..=2).contains(&wave));
        for obstacle in game.obstacles() {
            let bbox = obstacle.bbox();
            assert_eq!(bbox.y, -95.0);
            assert!(bbox.x >= 0.0 && bbox.right() <= 240.0);
            assert!((3.0..7.0).contains(&obstacle.speed()));
        }

        game.spawn_obstacle(later + Duration::millis(500), 0, &mut rng);
        assert_eq!(game.obstacles().len(), wave);
    }

    #[test]
    fn spawned_obstacles_never_overlap_each_other() {
        let (mut game, mut rng, now) = game();
        for wave in 1..=200u64 {
            let t = now + Duration::millis(2_001 * wave);
            game.spawn_obstacle(t, 0, &mut rng);
            let obstacles = game.obstacles();
            for (i, a) in obstacles.iter().enumerate() {
                for b in &obstacles[..i] {
                    assert!(!a.collides_with(b));
                }
            }
            game.obstacles.clear();
        }
    }

    #[test]
    fn crowded_spawns_are_dropped_not_retried() {
        let (mut game, mut rng, now) = game();
        for column in 0..10 {
            game.insert_obstacle(still(column as f32 * 24.0, -95.0));
        }
        game.spawn_obstacle(now + Duration::secs(3), 0, &mut rng);
        assert_eq!(game.obstacles().len(), 10);
    }

    #[test]
    fn spawn_speed_grows_with_score() {
        let (mut game, mut rng, now) = game();
        game.spawn_obstacle(now + Duration::secs(3), 10_000, &mut rng);
        for obstacle in game.obstacles() {
            assert!((7.0..11.0).contains(&obstacle.speed()));
        }
    }

    #[test]
    fn background_wraps_at_screen_height() {
        let (mut game, mut rng, now) = game();
        for _ in 0..59 {
            game.update(now, ButtonState::NONE, 0, &mut rng);
        }
        assert_eq!(game.background_y(), 236.0);
        game.update(now, ButtonState::NONE, 0, &mut rng);
        assert_eq!(game.background_y(), 0.0);
        game.update(now, ButtonState::NONE, 0, &mut rng);
        assert_eq!(game.background_y(), 4.0);
    }

    #[test]
    fn shield_drops_after_its_interval_and_is_collected() {
        let (mut game, mut rng, now) = game();
        let due = now + game.shield().spawn_interval() + Duration::millis(1);
        game.update(due, ButtonState::NONE, 0, &mut rng);
        assert!(game.shield().is_falling());

        // Park it right on the car.
        game.shield.place(108.0, 190.0);
        assert_eq!(game.update(due, ButtonState::NONE, 0, &mut rng), Some(Event::ShieldCollected));
        assert_eq!(game.shield().state(), ShieldState::Inactive);
        assert_eq!(game.shield().count(), 1);
    }

    #[test]
    fn missed_shield_leaves_the_screen() {
        let (mut game, mut rng, now) = game();
        game.shield.spawn(now, 240.0, &mut rng);
        game.shield.place(0.0, -24.0);
        game.car_x = 200.0;
        for _ in 0..200 {
            assert_eq!(game.update(now, ButtonState::NONE, 0, &mut rng), None);
            if game.shield().state() == ShieldState::Inactive {
                break;
            }
        }
        assert_eq!(game.shield().state(), ShieldState::Inactive);
        assert_eq!(game.shield().count(), 0);
    }

    #[test]
    fn expired_shield_is_deactivated_by_update() {
        let (mut game, mut rng, now) = game();
        game.shield.spawn(now, 240.0, &mut rng);
        game.shield.collect();
        game.use_shield(now);

        game.update(now + Duration::secs(4), ButtonState::NONE, 0, &mut rng);
        assert!(game.shield().is_worn());
        game.update(now + Duration::secs(5), ButtonState::NONE, 0, &mut rng);
        assert_eq!(game.shield().state(), ShieldState::Inactive);
    }

    #[test]
    fn worn_shield_is_never_collected_back() {
        let (mut game, mut rng, now) = game();
        game.shield.spawn(now, 240.0, &mut rng);
        game.shield.collect();
        game.use_shield(now);
        assert_eq!(game.update(now, ButtonState::NONE, 0, &mut rng), None);
        assert_eq!(game.shield().count(), 0);
        assert!(game.shield().is_worn());
    }
}
