//! Frame composition for each screen.
//!
//! Draw order while playing: road, traffic, falling shield, car, worn
//! shield, HUD. Sprites are chroma-keyed on [`TRANSPARENT`]; the road tile
//! and the menu backdrops are opaque.

use core::fmt::Write;

use embedded_graphics::{
    image::Image,
    mono_font::{
        MonoFont,
        MonoTextStyle,
        ascii::{
            FONT_6X10,
            FONT_10X20,
        },
    },
    pixelcolor::Rgb565,
    prelude::*,
    text::{
        Alignment,
        Baseline,
        Text,
        TextStyle,
        TextStyleBuilder,
    },
};
use heapless::String;
use tinybmp::Bmp;

use crate::{
    assets::Assets,
    session::{
        Screen,
        Session,
    },
};

/// Sprite pixels of this color are not drawn. `#FF00FF` in the source BMP.
pub const TRANSPARENT: Rgb565 = Rgb565::MAGENTA;

const OUTLINE: Rgb565 = Rgb565::BLACK;
const OUTLINE_OFFSETS: [(i32, i32); 8] = [
    (-1, -1),
    (0, -1),
    (1, -1),
    (-1, 0),
    (1, 0),
    (-1, 1),
    (0, 1),
    (1, 1),
];

const HUD_MARGIN: i32 = 4;
const HIGHLIGHT: Rgb565 = Rgb565::YELLOW;

const LEFT_TOP: TextStyle = TextStyleBuilder::new()
    .alignment(Alignment::Left)
    .baseline(Baseline::Top)
    .build();
const CENTER_TOP: TextStyle = TextStyleBuilder::new()
    .alignment(Alignment::Center)
    .baseline(Baseline::Top)
    .build();

/// Compose the current screen of `session` into `target`.
pub fn render_frame<D>(target: &mut D, session: &Session, assets: &Assets<'_>) -> Result<(), D::Error>
where
    D: DrawTarget<Color = Rgb565>,
{
    match session.screen() {
        Screen::Waiting => render_start(target, session, assets),
        Screen::Playing => render_playing(target, session, assets),
        Screen::GameOver => render_game_over(target, session, assets),
    }
}

/// Draw `sprite` with its top-left corner at `position`, skipping keyed pixels.
pub fn draw_sprite<D>(target: &mut D, sprite: &Bmp<'_, Rgb565>, position: Point) -> Result<(), D::Error>
where
    D: DrawTarget<Color = Rgb565>,
{
    target.draw_iter(
        sprite
            .pixels()
            .filter(|Pixel(_, color)| *color != TRANSPARENT)
            .map(|Pixel(point, color)| Pixel(point + position, color)),
    )
}

/// Text with a one pixel black outline, readable over any background.
pub fn draw_outlined_text<D>(
    target: &mut D,
    text: &str,
    position: Point,
    font: &'static MonoFont<'static>,
    color: Rgb565,
    text_style: TextStyle,
) -> Result<(), D::Error>
where
    D: DrawTarget<Color = Rgb565>,
{
    let outline = MonoTextStyle::new(font, OUTLINE);
    for (dx, dy) in OUTLINE_OFFSETS {
        Text::with_text_style(text, position + Point::new(dx, dy), outline, text_style).draw(target)?;
    }
    Text::with_text_style(text, position, MonoTextStyle::new(font, color), text_style).draw(target)?;
    Ok(())
}

/// Road tile at `offset` plus a second copy directly above it, so the
/// scroll wraps without a seam.
fn draw_road<D>(target: &mut D, road: &Bmp<'_, Rgb565>, offset: i32) -> Result<(), D::Error>
where
    D: DrawTarget<Color = Rgb565>,
{
    let tile_height = road.size().height as i32;
    Image::new(road, Point::new(0, offset)).draw(target)?;
    Image::new(road, Point::new(0, offset - tile_height)).draw(target)?;
    Ok(())
}

fn centered_x(target_width: u32, sprite: &Bmp<'_, Rgb565>) -> i32 {
    (target_width as i32 - sprite.size().width as i32) / 2
}

fn render_start<D>(target: &mut D, session: &Session, assets: &Assets<'_>) -> Result<(), D::Error>
where
    D: DrawTarget<Color = Rgb565>,
{
    let size = target.bounding_box().size;
    let center = size.width as i32 / 2;

    target.clear(Rgb565::BLACK)?;
    draw_road(target, &assets.background, 0)?;

    let logo = Point::new(centered_x(size.width, &assets.start_screen), size.height as i32 / 4);
    draw_sprite(target, &assets.start_screen, logo)?;

    let prompt_y = size.height as i32 * 3 / 4;
    draw_outlined_text(
        target,
        "PRESS ANY BUTTON",
        Point::new(center, prompt_y),
        &FONT_6X10,
        Rgb565::WHITE,
        CENTER_TOP,
    )?;

    if let Some(best) = session.top_scores().best() {
        let mut line: String<20> = String::new();
        core::write!(line, "BEST {}", best).ok();
        draw_outlined_text(target, &line, Point::new(center, prompt_y + 16), &FONT_6X10, HIGHLIGHT, CENTER_TOP)?;
    }
    Ok(())
}

fn render_playing<D>(target: &mut D, session: &Session, assets: &Assets<'_>) -> Result<(), D::Error>
where
    D: DrawTarget<Color = Rgb565>,
{
    let game = session.game();
    let shield = game.shield();

    draw_road(target, &assets.background, game.background_y() as i32)?;

    for obstacle in game.obstacles() {
        draw_sprite(target, assets.obstacle(obstacle.kind()), obstacle.bbox().top_left())?;
    }
    if shield.is_falling() {
        draw_sprite(target, &assets.shield, shield.bbox().top_left())?;
    }
    draw_sprite(target, &assets.car, game.car_bbox().top_left())?;
    if shield.is_worn() {
        draw_sprite(target, &assets.shield, shield.bbox().top_left())?;
    }

    let mut line: String<20> = String::new();
    core::write!(line, "SCORE {}", session.score()).ok();
    draw_outlined_text(
        target,
        &line,
        Point::new(HUD_MARGIN, HUD_MARGIN),
        &FONT_10X20,
        Rgb565::WHITE,
        LEFT_TOP,
    )?;

    if shield.count() > 0 {
        line.clear();
        core::write!(line, "SHIELD x{}", shield.count()).ok();
        draw_outlined_text(
            target,
            &line,
            Point::new(HUD_MARGIN, HUD_MARGIN + 22),
            &FONT_6X10,
            Rgb565::CYAN,
            LEFT_TOP,
        )?;
    }
    Ok(())
}

fn render_game_over<D>(target: &mut D, session: &Session, assets: &Assets<'_>) -> Result<(), D::Error>
where
    D: DrawTarget<Color = Rgb565>,
{
    let size = target.bounding_box().size;
    let center = size.width as i32 / 2;

    target.clear(Rgb565::BLACK)?;
    draw_road(target, &assets.background, 0)?;

    let banner_y = 16;
    draw_sprite(
        target,
        &assets.game_over,
        Point::new(centered_x(size.width, &assets.game_over), banner_y),
    )?;

    let mut y = banner_y + assets.game_over.size().height as i32 + 8;
    let mut line: String<20> = String::new();
    core::write!(line, "SCORE {}", session.score()).ok();
    draw_outlined_text(target, &line, Point::new(center, y), &FONT_10X20, Rgb565::WHITE, CENTER_TOP)?;
    y += 30;

    draw_outlined_text(target, "TOP 5", Point::new(center, y), &FONT_6X10, Rgb565::WHITE, CENTER_TOP)?;
    y += 14;

    for (rank, score) in session.top_scores().as_slice().iter().enumerate() {
        line.clear();
        core::write!(line, "{}. {}", rank + 1, score).ok();
        let color = if session.last_rank() == Some(rank) { HIGHLIGHT } else { Rgb565::WHITE };
        draw_outlined_text(target, &line, Point::new(center, y), &FONT_10X20, color, CENTER_TOP)?;
        y += 22;
    }

    let footer_y = size.height as i32 - 16;
    draw_outlined_text(
        target,
        "A: MENU  B: RETRY",
        Point::new(center, footer_y),
        &FONT_6X10,
        Rgb565::WHITE,
        CENTER_TOP,
    )?;
    Ok(())
}
