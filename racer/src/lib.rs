//! # racer
//!
//! Game core for a vertical scrolling arcade racer on a small SPI LCD.
//!
//! Hardware independent: the core reads a [`ButtonState`] snapshot, takes
//! monotonic [`Instant`]s from the caller and draws into any
//! `embedded-graphics` target. Everything else lives in the board crate.
//!
//! - **Game**: car physics, obstacle spawning/drift, shield power-up, collisions
//! - **Session**: start screen → playing → game over, score and top-5 list
//! - **Render**: composes a full RGB565 [`Frame`] from BMP [`Assets`]
//!
//! ## Quick start
//!
//! ```rust,ignore
//! let assets = racer::Assets::parse(&SOURCES)?;
//! let mut frame = racer::Frame::new(buffer, Size::new(170, 320))?;
//! let mut session = racer::Session::new(170.0, 320.0, racer::Tuning::CLASSIC, now());
//!
//! loop {
//!     session.tick(now(), buttons.state());
//!     racer::render_frame(&mut frame, &session, &assets)?;
//!     frame.present(&mut display)?;
//! }
//! ```

#![no_std]

#[macro_use]
mod fmt;

mod assets;
mod error;
mod frame;
mod game;
mod geometry;
mod input;
mod obstacle;
mod render;
mod rng;
mod scores;
mod session;
mod shield;
mod time;
mod tuning;

pub use assets::{
    AssetSources,
    Assets,
};
pub use error::Error;
pub use frame::Frame;
pub use game::Game;
pub use geometry::BBox;
pub use input::{
    ButtonSource,
    ButtonState,
    PinButtons,
};
pub use obstacle::{
    Obstacle,
    ObstacleKind,
};
pub use render::{
    TRANSPARENT,
    render_frame,
};
pub use rng::Rng;
pub use scores::{
    TOP_SCORES,
    TopScores,
};
pub use session::{
    Event,
    Screen,
    Session,
};
pub use shield::{
    ShieldItem,
    ShieldMode,
    ShieldState,
};
pub use time::{
    Duration,
    Instant,
};
pub use tuning::Tuning;
