//! The four game buttons: D-pad left/right, A and B.
//!
//! All are pull-up inputs, pressed when low. The game only ever sees a
//! [`ButtonState`] snapshot through [`racer::ButtonSource`].

use embassy_time::{
    Duration,
    Timer,
};
use esp_hal::gpio::{
    Input,
    InputConfig,
    Pull,
};
use racer::{
    ButtonSource,
    ButtonState,
    PinButtons,
};

use crate::ButtonResources;

/// Game buttons on the badge's GPIOs.
pub type Buttons = PinButtons<Input<'static>>;

const DEBOUNCE_MS: u64 = 20;

/// Pause after a menu transition so the press that caused it is released
/// before the next screen starts listening.
pub const MENU_SETTLE: Duration = Duration::from_millis(200);

impl From<ButtonResources<'static>> for Buttons {
    fn from(res: ButtonResources<'static>) -> Self {
        let pull_up = InputConfig::default().with_pull(Pull::Up);
        PinButtons::new(
            Input::new(res.left, pull_up),
            Input::new(res.right, pull_up),
            Input::new(res.a, pull_up),
            Input::new(res.b, pull_up),
        )
    }
}

/// Poll twice, [`DEBOUNCE_MS`] apart; a button counts only if it is down
/// both times. Used on the static screens where latency does not matter.
pub async fn debounced(buttons: &mut Buttons) -> ButtonState {
    let first = buttons.state();
    if !first.any() {
        return first;
    }
    Timer::after(Duration::from_millis(DEBOUNCE_MS)).await;
    let second = buttons.state();
    ButtonState {
        left: first.left && second.left,
        right: first.right && second.right,
        a: first.a && second.a,
        b: first.b && second.b,
    }
}
