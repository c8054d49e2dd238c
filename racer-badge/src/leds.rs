//! WS2812 LED bars driven through the RMT peripheral.
//!
//! Ten LEDs in two bars of five, one on each side of the screen. Hardware
//! index 0 is bottom right, 4 top right, 5 top left, 9 bottom left.

extern crate alloc;

use defmt::error;
use embassy_time::{
    Duration,
    Timer,
};
use esp_hal::{
    Blocking,
    gpio::Level,
    rmt::{
        PulseCode,
        Tx,
    },
};
use palette::Srgb;

/// Number of WS2812 LEDs on the badge.
pub const LED_COUNT: usize = 10;

/// LEDs per bar.
pub const BAR_COUNT: usize = 5;

const OFF: Srgb<u8> = Srgb::new(0, 0, 0);
const BANKED: Srgb<u8> = Srgb::new(0, 0, 24);
const SHIELDED: Srgb<u8> = Srgb::new(20, 20, 20);
const CRASH: Srgb<u8> = Srgb::new(25, 0, 0);

/// LED strip with an in-memory frame, pushed out by [`Leds::update`].
pub struct Leds<'a> {
    channel: Option<esp_hal::rmt::Channel<'a, Blocking, Tx>>,
    framebuffer: [Srgb<u8>; LED_COUNT],
}

impl<'a> Leds<'a> {
    pub const fn new(channel: esp_hal::rmt::Channel<'a, Blocking, Tx>) -> Self {
        Self {
            channel: Some(channel),
            framebuffer: [OFF; LED_COUNT],
        }
    }

    /// Flush the frame to the physical LEDs.
    pub async fn update(&mut self) {
        let Some(channel) = self.channel.take() else {
            error!("RMT channel lost during previous transmission");
            return;
        };

        // WS2812 wants GRB byte order.
        let pulses = self
            .framebuffer
            .iter()
            .flat_map(|c| [c.green, c.red, c.blue].into_iter().flat_map(Self::byte_to_pulses))
            .chain(core::iter::once(PulseCode::end_marker()))
            .collect::<alloc::vec::Vec<_>>();

        let transaction = match channel.transmit(&pulses) {
            Ok(t) => t,
            Err(e) => {
                error!("RMT transmit failed: {}", e);
                return;
            }
        };

        self.channel = Some(match transaction.wait() {
            Ok(ch) => ch,
            Err((err, ch)) => {
                error!("RMT transaction failed: {}", err);
                ch
            }
        });

        // Latch
        Timer::after(Duration::from_micros(50)).await;
    }

    pub fn fill(&mut self, color: Srgb<u8>) {
        self.framebuffer.fill(color);
    }

    pub fn clear(&mut self) {
        self.fill(OFF);
    }

    /// Set both bars to the same colors, index 0 at the bottom.
    pub fn set_both_bars(&mut self, colors: &[Srgb<u8>; BAR_COUNT]) {
        self.framebuffer[..BAR_COUNT].copy_from_slice(colors);
        for (i, color) in colors.iter().enumerate() {
            self.framebuffer[LED_COUNT - 1 - i] = *color;
        }
    }

    /// Shield meter: one blue LED per banked shield from the bottom up,
    /// all white while a shield is up.
    pub fn show_shield(&mut self, banked: u32, active: bool) {
        if active {
            self.fill(SHIELDED);
            return;
        }
        let mut bar = [OFF; BAR_COUNT];
        for led in bar.iter_mut().take(banked as usize) {
            *led = BANKED;
        }
        self.set_both_bars(&bar);
    }

    /// Crash indicator, all red.
    pub fn show_crash(&mut self) {
        self.fill(CRASH);
    }

    /// WS2812 bit timing at 40 MHz RMT clock.
    const fn bit_to_pulse(bit: bool) -> PulseCode {
        if bit {
            // '1': 0.8 µs high, 0.45 µs low
            PulseCode::new(Level::High, 32, Level::Low, 18)
        } else {
            // '0': 0.4 µs high, 0.85 µs low
            PulseCode::new(Level::High, 16, Level::Low, 34)
        }
    }

    fn byte_to_pulses(byte: u8) -> [PulseCode; 8] {
        core::array::from_fn(|i| Self::bit_to_pulse((byte >> (7 - i)) & 1 != 0))
    }
}
