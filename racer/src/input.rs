//! Button input as the game sees it: four logical "pressed" flags.

use embedded_hal::digital::InputPin;

/// One poll of the four game buttons. `true` means pressed.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct ButtonState {
    pub left: bool,
    pub right: bool,
    pub a: bool,
    pub b: bool,
}

impl ButtonState {
    pub const NONE: Self = Self {
        left: false,
        right: false,
        a: false,
        b: false,
    };

    pub const fn any(&self) -> bool {
        self.left || self.right || self.a || self.b
    }

    /// Buttons down now that were up in `previous`.
    pub const fn just_pressed(&self, previous: &Self) -> Self {
        Self {
            left: self.left && !previous.left,
            right: self.right && !previous.right,
            a: self.a && !previous.a,
            b: self.b && !previous.b,
        }
    }
}

/// Anything that can be polled for the current button state.
pub trait ButtonSource {
    fn state(&mut self) -> ButtonState;
}

/// Four pull-up GPIO buttons, pressed when the pin reads low.
pub struct PinButtons<P> {
    pub left: P,
    pub right: P,
    pub a: P,
    pub b: P,
}

impl<P: InputPin> PinButtons<P> {
    pub const fn new(left: P, right: P, a: P, b: P) -> Self {
        Self { left, right, a, b }
    }

    /// A pin that cannot be read counts as released.
    fn pressed(pin: &mut P) -> bool {
        pin.is_low().unwrap_or(false)
    }
}

impl<P: InputPin> ButtonSource for PinButtons<P> {
    fn state(&mut self) -> ButtonState {
        ButtonState {
            left: Self::pressed(&mut self.left),
            right: Self::pressed(&mut self.right),
            a: Self::pressed(&mut self.a),
            b: Self::pressed(&mut self.b),
        }
    }
}

#[cfg(test)]
mod tests {
    use embedded_hal::digital::{
        ErrorKind,
        ErrorType,
    };

    use super::*;

    /// Pin reading a fixed electrical level, or failing.
    enum FakePin {
        High,
        Low,
        Broken,
    }

    impl ErrorType for FakePin {
        type Error = ErrorKind;
    }

    impl InputPin for FakePin {
        fn is_high(&mut self) -> Result<bool, Self::Error> {
            self.is_low().map(|low| !low)
        }

        fn is_low(&mut self) -> Result<bool, Self::Error> {
            match self {
                Self::High => Ok(false),
                Self::Low => Ok(true),
                Self::Broken => Err(ErrorKind::Other),
            }
        }
    }

    #[test]
    fn low_pins_read_as_pressed() {
        let mut buttons = PinButtons::new(FakePin::Low, FakePin::High, FakePin::High, FakePin::Low);
        assert_eq!(
            buttons.state(),
            ButtonState {
                left: true,
                right: false,
                a: false,
                b: true,
            }
        );
    }

    #[test]
    fn unreadable_pin_is_released() {
        let mut buttons =
            PinButtons::new(FakePin::Broken, FakePin::High, FakePin::Broken, FakePin::High);
        assert_eq!(buttons.state(), ButtonState::NONE);
    }

    #[test]
    fn edges_only_report_new_presses() {
        let held = ButtonState {
            a: true,
            ..ButtonState::NONE
        };
        let now = ButtonState {
            a: true,
            b: true,
            ..ButtonState::NONE
        };
        let edges = now.just_pressed(&held);
        assert!(!edges.a);
        assert!(edges.b);
        assert!(edges.any());
        assert!(!held.just_pressed(&held).any());
    }
}
