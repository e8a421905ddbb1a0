//! Color panels and their identifiers

use rand::Rng;
use serde::{Deserialize, Serialize};
use std::fmt;

use crate::color::{random_color, Rgb};

/// Identifier of a panel, unique within the generator that issued it
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PanelId(u32);

impl PanelId {
    pub const fn new(index: u32) -> Self {
        Self(index)
    }

    pub fn index(&self) -> u32 {
        self.0
    }
}

impl fmt::Display for PanelId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "panel-{}", self.0)
    }
}

/// Sequential id source.
///
/// Each round gets its own generator, so ids restart at `panel-0` for every
/// round and are only unique within it.
#[derive(Debug, Clone, Default)]
pub struct PanelIdGenerator {
    next: u32,
}

impl PanelIdGenerator {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn next_id(&mut self) -> PanelId {
        let id = PanelId(self.next);
        self.next += 1;
        id
    }
}

/// A colored panel shown to the player
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ColorPanel {
    pub id: PanelId,
    pub color: Rgb,
}

/// Panel with a random color and the next id from `ids`.
pub fn create_color_panel<R: Rng + ?Sized>(ids: &mut PanelIdGenerator, rng: &mut R) -> ColorPanel {
    ColorPanel {
        id: ids.next_id(),
        color: random_color(rng),
    }
}
