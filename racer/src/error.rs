//! Errors raised while bringing the game up.
//!
//! Per-frame logic never fails: positions and speeds are clamped before use.

/// Startup failures. All of them are fatal for the firmware.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Error {
    /// A sprite is not a BMP image `tinybmp` can read.
    Asset { name: &'static str },
    /// The frame buffer does not hold exactly `width * height` pixels.
    FrameSize { expected: usize, actual: usize },
}

impl core::fmt::Display for Error {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            Self::Asset { name } => write!(f, "sprite `{name}` is not a readable BMP image"),
            Self::FrameSize { expected, actual } => {
                write!(f, "frame buffer holds {actual} pixels, expected {expected}")
            }
        }
    }
}

impl core::error::Error for Error {}

#[cfg(test)]
mod tests {
    extern crate std;

    use std::string::ToString;

    use super::*;

    #[test]
    fn messages_name_the_failure() {
        assert_eq!(
            Error::Asset { name: "car" }.to_string(),
            "sprite `car` is not a readable BMP image"
        );
        assert_eq!(
            Error::FrameSize {
                expected: 4,
                actual: 3
            }
            .to_string(),
            "frame buffer holds 3 pixels, expected 4"
        );
    }
}
