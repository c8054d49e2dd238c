//! Badge Racer on the Disobey 2026 badge.
//!
//! - Left/Right steer the car
//! - A engages a banked shield; on the game-over screen it returns to the menu
//! - B restarts straight from the game-over screen
//! - LED bars count banked shields (blue), turn white while a shield is up
//!   and flash red with a rumble on a crash

#![no_std]
#![no_main]

use defmt::{
    error,
    info,
};
use embassy_executor::Spawner;
use embassy_futures::join::join;
use embassy_time::{
    Duration,
    Timer,
};
use embedded_graphics::{
    pixelcolor::Rgb565,
    prelude::*,
};
use esp_backtrace as _;
use esp_hal::timer::timg::TimerGroup;
use esp_println as _;
use racer::{
    AssetSources,
    Assets,
    ButtonSource,
    Event,
    Frame,
    Screen,
    Session,
    Tuning,
};
#[allow(clippy::wildcard_imports)]
use racer_badge::*;
use static_cell::ConstStaticCell;

extern crate alloc;

esp_bootloader_esp_idf::esp_app_desc!();

const PIXELS: usize = (WIDTH * HEIGHT) as usize;

/// Sleep between ticks while playing.
const FRAME_TIME: Duration = Duration::from_millis(1);
/// Sleep between polls on the static screens.
const MENU_POLL: Duration = Duration::from_millis(10);

const CRASH_RUMBLE: Duration = Duration::from_millis(300);
const CRASH_FLASHES: usize = 3;
const FLASH_TIME: Duration = Duration::from_millis(100);

#[cfg(not(feature = "relaxed"))]
const TUNING: Tuning = Tuning::CLASSIC;
#[cfg(feature = "relaxed")]
const TUNING: Tuning = Tuning::RELAXED;

static FRAMEBUF: ConstStaticCell<[Rgb565; PIXELS]> = ConstStaticCell::new([Rgb565::BLACK; PIXELS]);

static SPRITES: AssetSources<'static> = AssetSources {
    car: include_bytes!("../assets/car.bmp"),
    sedan: include_bytes!("../assets/sedan.bmp"),
    coupe: include_bytes!("../assets/coupe.bmp"),
    shield: include_bytes!("../assets/shield.bmp"),
    background: include_bytes!("../assets/background.bmp"),
    start_screen: include_bytes!("../assets/start_screen.bmp"),
    game_over: include_bytes!("../assets/game_over.bmp"),
};

/// Monotonic time in the game's clock.
fn now() -> racer::Instant {
    racer::Instant::from_ticks(embassy_time::Instant::now().as_micros())
}

async fn crash_feedback(leds: &mut Leds<'static>, vibration: &mut Vibration) {
    let flashes = async {
        for _ in 0..CRASH_FLASHES {
            leds.show_crash();
            leds.update().await;
            Timer::after(FLASH_TIME).await;
            leds.clear();
            leds.update().await;
            Timer::after(FLASH_TIME).await;
        }
    };
    join(vibration.pulse(CRASH_RUMBLE), flashes).await;
}

#[embassy_executor::task]
async fn game_task(
    display: &'static mut Display<'static>,
    backlight: &'static mut Backlight,
    buttons: &'static mut Buttons,
    leds: &'static mut Leds<'static>,
    vibration: &'static mut Vibration,
) {
    let assets = match Assets::parse(&SPRITES) {
        Ok(assets) => assets,
        Err(e) => defmt::panic!("Cannot load sprites: {}", e),
    };
    let mut frame = defmt::unwrap!(Frame::new(FRAMEBUF.take(), Size::new(WIDTH, HEIGHT)));
    let mut session = Session::new(WIDTH as f32, HEIGHT as f32, TUNING, now());
    let mut drawn: Option<Screen> = None;

    info!("Badge Racer running");

    loop {
        let input = if session.screen() == Screen::Playing {
            buttons.state()
        } else {
            debounced(buttons).await
        };
        let event = session.tick(now(), input);
        let screen = session.screen();

        // Static screens are only redrawn when they change.
        if screen == Screen::Playing || drawn != Some(screen) {
            let Ok(()) = racer::render_frame(&mut frame, &session, &assets);
            if frame.present(display).is_err() {
                error!("Display write failed");
            }
            if drawn.is_none() {
                backlight.on();
            }
            drawn = Some(screen);
        }

        match event {
            Some(Event::Started) => {
                info!("Race on");
                leds.clear();
            }
            Some(Event::Reset) => {
                info!("Back to the start screen");
                leds.clear();
                leds.update().await;
            }
            Some(Event::Crashed { score, rank }) => {
                match rank {
                    Some(rank) => info!("Crashed at {}, new #{} score", score, rank + 1),
                    None => info!("Crashed at {}", score),
                }
                crash_feedback(leds, vibration).await;
            }
            Some(Event::ShieldCollected) => info!("Shield collected"),
            Some(Event::ShieldEngaged) => info!("Shield up"),
            None => {}
        }

        if screen == Screen::Playing {
            let shield = session.game().shield();
            leds.show_shield(shield.count(), shield.is_active(now()));
            leds.update().await;
        }

        if matches!(event, Some(Event::Started | Event::Reset | Event::Crashed { .. })) {
            Timer::after(MENU_SETTLE).await;
        }
        Timer::after(if screen == Screen::Playing { FRAME_TIME } else { MENU_POLL }).await;
    }
}

#[esp_rtos::main]
async fn main(spawner: Spawner) -> ! {
    let peripherals = racer_badge::init();
    let resources = split_resources!(peripherals);

    esp_alloc::heap_allocator!(size: 16 * 1024);

    let timg0 = TimerGroup::new(peripherals.TIMG0);
    esp_rtos::start(timg0.timer0);

    let display = mk_static!(Display<'static>, resources.display.into());
    let backlight = mk_static!(Backlight, resources.backlight.into());
    let buttons = mk_static!(Buttons, resources.buttons.into());
    let leds = mk_static!(Leds<'static>, resources.leds.into());
    let vibration = mk_static!(Vibration, resources.vibra.into());

    spawner.must_spawn(game_task(display, backlight, buttons, leds, vibration));

    loop {
        Timer::after(Duration::from_secs(600)).await;
    }
}
