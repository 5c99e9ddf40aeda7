//! Piecewise-linear load → color scale.

use bevy::prelude::*;

use crate::config::{ColorStop, Palette};
use crate::math;

/// Maps a load to a color by interpolating between the palette's stops.
#[derive(Clone, Debug, PartialEq, Reflect)]
pub struct ColorScale {
    stops: [ColorStop; 4],
}

impl ColorScale {
    /// Scale over a validated palette (thresholds strictly increasing).
    pub fn new(palette: &Palette) -> Self {
        Self {
            stops: palette.stops,
        }
    }

    /// Color for `value`.
    ///
    /// Values outside the first/last threshold take the end colors, as does
    /// NaN (first). A value exactly on a threshold yields that stop's color
    /// unchanged.
    pub fn color(&self, value: f32) -> Srgba {
        let first = self.stops[0];
        let last = self.stops[self.stops.len() - 1];
        if value.is_nan() || value <= first.threshold {
            return first.color;
        }
        if value >= last.threshold {
            return last.color;
        }

        for pair in self.stops.windows(2) {
            let (lo, hi) = (pair[0], pair[1]);
            if value <= hi.threshold {
                let t = math::inverse_lerp(lo.threshold, hi.threshold, value);
                return mix(lo.color, hi.color, t);
            }
        }
        last.color
    }

    /// Color for a tile load.
    pub fn color_for_load(&self, load: u8) -> Srgba {
        self.color(load as f32)
    }
}

fn mix(a: Srgba, b: Srgba, t: f32) -> Srgba {
    Srgba::new(
        math::lerp(a.red, b.red, t),
        math::lerp(a.green, b.green, t),
        math::lerp(a.blue, b.blue, t),
        math::lerp(a.alpha, b.alpha, t),
    )
}
