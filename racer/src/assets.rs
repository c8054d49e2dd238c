//! Sprite set, parsed once at startup.
//!
//! All sprites are 24-bit BMP files. Pixels keyed to [`crate::TRANSPARENT`]
//! (magenta, `#FF00FF`) are skipped when a sprite is drawn.

use embedded_graphics::pixelcolor::Rgb565;
use tinybmp::Bmp;

use crate::{
    error::Error,
    obstacle::ObstacleKind,
};

/// Raw BMP bytes for every sprite, usually from `include_bytes!`.
#[derive(Clone, Copy)]
pub struct AssetSources<'a> {
    pub car: &'a [u8],
    pub sedan: &'a [u8],
    pub coupe: &'a [u8],
    pub shield: &'a [u8],
    pub background: &'a [u8],
    pub start_screen: &'a [u8],
    pub game_over: &'a [u8],
}

/// Parsed sprites, borrowing the source bytes.
pub struct Assets<'a> {
    pub car: Bmp<'a, Rgb565>,
    pub sedan: Bmp<'a, Rgb565>,
    pub coupe: Bmp<'a, Rgb565>,
    pub shield: Bmp<'a, Rgb565>,
    /// Road tile, drawn twice to scroll seamlessly.
    pub background: Bmp<'a, Rgb565>,
    pub start_screen: Bmp<'a, Rgb565>,
    pub game_over: Bmp<'a, Rgb565>,
}

impl<'a> Assets<'a> {
    /// Parse every sprite. Fails on the first one `tinybmp` rejects.
    pub fn parse(sources: &AssetSources<'a>) -> Result<Self, Error> {
        let assets = Self {
            car: load("car", sources.car)?,
            sedan: load("sedan", sources.sedan)?,
            coupe: load("coupe", sources.coupe)?,
            shield: load("shield", sources.shield)?,
            background: load("background", sources.background)?,
            start_screen: load("start_screen", sources.start_screen)?,
            game_over: load("game_over", sources.game_over)?,
        };
        debug!("sprites parsed");
        Ok(assets)
    }

    /// Sprite for an obstacle variant.
    pub fn obstacle(&self, kind: ObstacleKind) -> &Bmp<'a, Rgb565> {
        match kind {
            ObstacleKind::Sedan => &self.sedan,
            ObstacleKind::Coupe => &self.coupe,
        }
    }
}

fn load<'a>(name: &'static str, data: &'a [u8]) -> Result<Bmp<'a, Rgb565>, Error> {
    Bmp::from_slice(data).map_err(|_| Error::Asset { name })
}
