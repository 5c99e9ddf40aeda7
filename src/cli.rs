//! Command-line overrides for the startup configuration.

use std::time::Duration;

use clap::Parser;

use crate::config::{GridConfig, GridPreset};

/// Hexagonal load map.
#[derive(Parser, Debug)]
#[command(version, about)]
pub struct Cli {
    /// Starting configuration; the flags below override parts of it.
    #[arg(long, value_enum, default_value_t = GridPreset::LoadMap)]
    pub preset: GridPreset,
    /// Tiles in a long row (short rows hold one less).
    #[arg(long)]
    pub tiles_per_row: Option<u32>,
    /// Drawing width in pixels.
    #[arg(long)]
    pub width: Option<f32>,
    /// Initial number of tiles.
    #[arg(long)]
    pub tiles: Option<usize>,
    /// Milliseconds between simulation ticks.
    #[arg(long)]
    pub tick_ms: Option<u64>,
    /// Seed for a reproducible simulation.
    #[arg(long)]
    pub seed: Option<u64>,
}

impl Cli {
    /// Preset with every given flag applied. Not validated.
    pub fn into_config(self) -> GridConfig {
        let mut config = self.preset.config();
        if let Some(n) = self.tiles_per_row {
            config.layout.tiles_per_row = n;
        }
        if let Some(w) = self.width {
            config.layout.graph_width = w;
        }
        if let Some(n) = self.tiles {
            config.tiles.initial_count = n;
        }
        if let Some(ms) = self.tick_ms {
            config.simulation.tick_interval = Duration::from_millis(ms);
        }
        config.simulation.seed = self.seed;
        config
    }
}
