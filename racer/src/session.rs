//! The top-level loop: start screen, playing, game over.
//!
//! ```text
//!  Waiting ──any press──► Playing ──unshielded crash──► GameOver
//!     ▲                      ▲                              │
//!     │                      └──────────── B ───────────────┤
//!     └──────────────────────────────────── A ──────────────┘
//! ```
//!
//! The session owns the score, the high score table and the current
//! [`Game`]. Buttons are edge-detected between ticks, so holding a button
//! through a screen change does not trigger the next screen's action.

use crate::{
    game::Game,
    input::ButtonState,
    rng::Rng,
    scores::TopScores,
    time::Instant,
    tuning::Tuning,
};

const BOOT_SEED: u32 = 0x5EED_CA75;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Screen {
    Waiting,
    Playing,
    GameOver,
}

/// Something the board may want to react to (LEDs, rumble, logs).
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Event {
    /// A fresh game began.
    Started,
    /// The car picked up a falling shield.
    ShieldCollected,
    /// A banked shield was switched on.
    ShieldEngaged,
    /// Unshielded collision. `rank` is the place in the top scores, if any.
    Crashed { score: u32, rank: Option<usize> },
    /// Back to the start screen.
    Reset,
}

pub struct Session {
    screen: Screen,
    game: Game,
    score: u32,
    top_scores: TopScores,
    last_rank: Option<usize>,
    rng: Rng,
    tuning: Tuning,
    width: f32,
    height: f32,
    previous: ButtonState,
}

impl Session {
    /// A session on the start screen for a `width` × `height` display.
    pub fn new(width: f32, height: f32, tuning: Tuning, now: Instant) -> Self {
        let mut rng = Rng::new(BOOT_SEED);
        Self {
            screen: Screen::Waiting,
            game: Game::new(width, height, tuning, now, &mut rng),
            score: 0,
            top_scores: TopScores::new(),
            last_rank: None,
            rng,
            tuning,
            width,
            height,
            previous: ButtonState::NONE,
        }
    }

    /// Run one step of the current screen with a fresh button poll.
    pub fn tick(&mut self, now: Instant, buttons: ButtonState) -> Option<Event> {
        let pressed = buttons.just_pressed(&self.previous);
        self.previous = buttons;

        match self.screen {
            Screen::Waiting => {
                if pressed.any() {
                    self.start(now);
                    return Some(Event::Started);
                }
                None
            }
            Screen::Playing => self.play(now, buttons, pressed),
            Screen::GameOver => {
                if pressed.a {
                    self.reset(now);
                    return Some(Event::Reset);
                }
                if pressed.b {
                    self.start(now);
                    return Some(Event::Started);
                }
                None
            }
        }
    }

    fn play(&mut self, now: Instant, buttons: ButtonState, pressed: ButtonState) -> Option<Event> {
        let mut event = None;
        if pressed.a && self.game.use_shield(now) {
            event = Some(Event::ShieldEngaged);
        }

        if let Some(collected) = self.game.update(now, buttons, self.score, &mut self.rng) {
            event = Some(collected);
        }

        if self.game.check_collision(now) {
            self.screen = Screen::GameOver;
            self.last_rank = self.top_scores.insert(self.score);
            info!("crashed with score {}", self.score);
            return Some(Event::Crashed {
                score: self.score,
                rank: self.last_rank,
            });
        }

        self.score = self.score.saturating_add(1);
        event
    }

    /// Fresh game straight into play. The first press time seeds the RNG.
    fn start(&mut self, now: Instant) {
        self.rng = Rng::new(now.ticks() as u32 ^ BOOT_SEED);
        self.new_game(now);
        self.screen = Screen::Playing;
        info!("game started");
    }

    fn reset(&mut self, now: Instant) {
        self.new_game(now);
        self.screen = Screen::Waiting;
    }

    fn new_game(&mut self, now: Instant) {
        self.game = Game::new(self.width, self.height, self.tuning, now, &mut self.rng);
        self.score = 0;
        self.last_rank = None;
    }

    pub fn screen(&self) -> Screen {
        self.screen
    }

    pub fn score(&self) -> u32 {
        self.score
    }

    pub fn game(&self) -> &Game {
        &self.game
    }

    pub fn top_scores(&self) -> &TopScores {
        &self.top_scores
    }

    /// Rank of the score that ended the last game, if it made the table.
    pub fn last_rank(&self) -> Option<usize> {
        self.last_rank
    }

    #[cfg(test)]
    pub(crate) fn game_mut(&mut self) -> &mut Game {
        &mut self.game
    }
}
