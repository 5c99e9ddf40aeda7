//! Process-wide grid configuration, set once at startup.

use std::time::Duration;

use bevy::prelude::*;
use thiserror::Error;

use crate::math::MAX_LOAD;

/// Nested configuration for the load map.
#[derive(Resource, Clone, Debug, Reflect)]
pub struct GridConfig {
    /// Grid shape and pixel extent.
    pub layout: LayoutSettings,
    /// Load → color control points.
    pub palette: Palette,
    /// Random walk and spike parameters.
    pub simulation: SimulationSettings,
    /// Initial fill and the load given to appended tiles.
    pub tiles: TileSettings,
}

/// Grid shape and pixel extent.
#[derive(Clone, Debug, Reflect)]
pub struct LayoutSettings {
    /// Capacity of the long rows; short rows hold one less.
    pub tiles_per_row: u32,
    /// Total drawing width in pixels. Tile size is derived from it.
    pub graph_width: f32,
}

/// One `(threshold, color)` breakpoint of the color scale.
#[derive(Clone, Copy, Debug, PartialEq, Reflect)]
pub struct ColorStop {
    /// Load at which `color` is reached exactly.
    pub threshold: f32,
    /// Color at `threshold`.
    pub color: Srgba,
}

/// Four control points, thresholds strictly increasing.
#[derive(Clone, Debug, PartialEq, Reflect)]
pub struct Palette {
    /// Breakpoints, lowest threshold first.
    pub stops: [ColorStop; 4],
}

impl Default for Palette {
    fn default() -> Self {
        Self {
            stops: [
                ColorStop {
                    threshold: 0.0,
                    color: Srgba::rgb_u8(0x6E, 0xD0, 0x71),
                },
                ColorStop {
                    threshold: 33.0,
                    color: Srgba::rgb_u8(0xD0, 0x99, 0x02),
                },
                ColorStop {
                    threshold: 66.0,
                    color: Srgba::rgb_u8(0xD4, 0x5D, 0x01),
                },
                ColorStop {
                    threshold: 100.0,
                    color: Srgba::rgb_u8(0xA1, 0x29, 0x2E),
                },
            ],
        }
    }
}

/// Random walk and spike parameters for the load simulator.
#[derive(Clone, Debug, Reflect)]
pub struct SimulationSettings {
    /// Time between two simulation ticks.
    pub tick_interval: Duration,
    /// Smallest per-tick load change (inclusive).
    pub min_delta: i32,
    /// Largest per-tick load change (inclusive).
    pub max_delta: i32,
    /// Per-tile, per-tick chance of a spike event.
    pub spike_probability: f64,
    /// Load forced onto a tile by a spike.
    pub spike_value: u8,
    /// Fixed RNG seed; `None` seeds from the OS.
    pub seed: Option<u64>,
}

/// Initial fill and the load given to appended tiles.
#[derive(Clone, Debug, Reflect)]
pub struct TileSettings {
    /// Number of tiles created at startup.
    pub initial_count: usize,
    /// Load of every tile created at startup.
    pub initial_load: u8,
    /// Load of a tile appended by `add_tile`.
    pub new_tile_load: u8,
}

impl Default for GridConfig {
    fn default() -> Self {
        GridPreset::LoadMap.config()
    }
}

/// Named configurations for the two historical dashboards.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Reflect)]
#[cfg_attr(feature = "native", derive(clap::ValueEnum))]
pub enum GridPreset {
    /// 12-wide map of 37 tiles with a downward-biased walk and spikes.
    #[default]
    LoadMap,
    /// 10-wide map of 23 hosts with a symmetric walk and no spikes.
    HostMap,
}

impl GridPreset {
    /// Builds the full configuration for this preset.
    pub fn config(self) -> GridConfig {
        match self {
            Self::LoadMap => GridConfig {
                layout: LayoutSettings {
                    tiles_per_row: 12,
                    graph_width: 1200.0,
                },
                palette: Palette::default(),
                simulation: SimulationSettings {
                    tick_interval: Duration::from_millis(2000),
                    min_delta: -13,
                    max_delta: 7,
                    spike_probability: 1.0 / 31.0,
                    spike_value: MAX_LOAD,
                    seed: None,
                },
                tiles: TileSettings {
                    initial_count: 37,
                    initial_load: 20,
                    new_tile_load: 20,
                },
            },
            Self::HostMap => GridConfig {
                layout: LayoutSettings {
                    tiles_per_row: 10,
                    graph_width: 1200.0,
                },
                palette: Palette::default(),
                simulation: SimulationSettings {
                    tick_interval: Duration::from_millis(2000),
                    min_delta: -10,
                    max_delta: 10,
                    spike_probability: 0.0,
                    spike_value: MAX_LOAD,
                    seed: None,
                },
                tiles: TileSettings {
                    initial_count: 23,
                    initial_load: 10,
                    new_tile_load: 0,
                },
            },
        }
    }
}

/// Rejected configuration. Raised once at startup, never per tick.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ConfigError {
    /// Brick rows need a short row of at least one tile.
    #[error("tiles_per_row must be at least 2, got {0}")]
    TooFewTilesPerRow(u32),
    /// Tile size would be zero, negative or undefined.
    #[error("graph_width must be a positive finite number, got {0}")]
    InvalidGraphWidth(f32),
    /// Color stops out of order (or NaN).
    #[error("palette thresholds must be strictly increasing, {previous} is followed by {next}")]
    NonIncreasingPalette {
        /// Threshold of the earlier stop.
        previous: f32,
        /// Threshold of the stop that fails to exceed it.
        next: f32,
    },
    /// The scheduler would fire continuously.
    #[error("tick interval must be positive")]
    ZeroTickInterval,
    /// `min_delta` above `max_delta`.
    #[error("random walk bounds are inverted: min {min} > max {max}")]
    InvertedDeltaRange {
        /// Configured lower bound.
        min: i32,
        /// Configured upper bound.
        max: i32,
    },
    /// Not a probability.
    #[error("spike probability must lie in [0, 1], got {0}")]
    InvalidSpikeProbability(f64),
    /// A configured load exceeds the tile maximum.
    #[error("{field} must not exceed 100, got {value}")]
    LoadOutOfRange {
        /// Name of the offending setting.
        field: &'static str,
        /// Configured value.
        value: u8,
    },
}

impl GridConfig {
    /// Checks every constraint the layout, color scale and simulator rely on.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let layout = &self.layout;
        if layout.tiles_per_row < 2 {
            return Err(ConfigError::TooFewTilesPerRow(layout.tiles_per_row));
        }
        if !layout.graph_width.is_finite() || layout.graph_width <= 0.0 {
            return Err(ConfigError::InvalidGraphWidth(layout.graph_width));
        }

        for pair in self.palette.stops.windows(2) {
            let (previous, next) = (pair[0].threshold, pair[1].threshold);
            if previous.is_nan() || next.is_nan() || next <= previous {
                return Err(ConfigError::NonIncreasingPalette { previous, next });
            }
        }

        let sim = &self.simulation;
        if sim.tick_interval.is_zero() {
            return Err(ConfigError::ZeroTickInterval);
        }
        if sim.min_delta > sim.max_delta {
            return Err(ConfigError::InvertedDeltaRange {
                min: sim.min_delta,
                max: sim.max_delta,
            });
        }
        if !(0.0..=1.0).contains(&sim.spike_probability) {
            return Err(ConfigError::InvalidSpikeProbability(sim.spike_probability));
        }

        for (field, value) in [
            ("spike_value", sim.spike_value),
            ("initial_load", self.tiles.initial_load),
            ("new_tile_load", self.tiles.new_tile_load),
        ] {
            if value > MAX_LOAD {
                return Err(ConfigError::LoadOutOfRange { field, value });
            }
        }

        Ok(())
    }
}
