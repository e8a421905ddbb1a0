//! Color module
//!
//! Validated RGB values, hex conversion, perceptual distance and the random
//! generators used to build rounds.

mod generate;
mod rgb;

pub use generate::{random_color, similar_color, SIMILAR_COLOR_MAX_ATTEMPTS};
pub use rgb::Rgb;
