//! A single grid cell: its load and whether it is hovered.

use bevy::prelude::*;

use crate::math::{self, MAX_LOAD};

/// One tile of the load map. Its index is its position in the sequence.
///
/// Fields are private so the load can only be set through clamping
/// constructors.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Reflect)]
pub struct Tile {
    load: u8,
    highlighted: bool,
}

impl Tile {
    /// Unhighlighted tile; `load` above 100 saturates.
    pub fn new(load: u8) -> Self {
        Self {
            load: load.min(MAX_LOAD),
            highlighted: false,
        }
    }

    /// Current load in `[0, 100]`.
    pub fn load(&self) -> u8 {
        self.load
    }

    /// Whether the pointer is over this tile.
    pub fn is_highlighted(&self) -> bool {
        self.highlighted
    }

    /// Same highlight state, new load clamped into range.
    pub fn with_load(self, load: i32) -> Self {
        Self {
            load: math::clamp_load(load),
            ..self
        }
    }

    /// Same load, given highlight state.
    pub fn with_highlight(self, highlighted: bool) -> Self {
        Self {
            highlighted,
            ..self
        }
    }

    /// Text drawn on the tile: `"42 %"`, or the bare `"42"` while hovered
    /// (the hovered label is drawn larger, so the unit is dropped).
    pub fn label(&self) -> String {
        if self.highlighted {
            self.load.to_string()
        } else {
            format!("{} %", self.load)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_saturates_load() {
        assert_eq!(Tile::new(250).load(), 100);
        assert!(!Tile::new(5).is_highlighted());
    }

    #[test]
    fn with_load_clamps_and_keeps_highlight() {
        let t = Tile::new(50).with_highlight(true);
        let lower = t.with_load(-30);
        assert_eq!(lower.load(), 0);
        assert!(lower.is_highlighted());
        assert_eq!(t.with_load(180).load(), 100);
    }

    #[test]
    fn label_drops_unit_while_highlighted() {
        let t = Tile::new(42);
        assert_eq!(t.label(), "42 %");
        assert_eq!(t.with_highlight(true).label(), "42");
    }
}
