//! The load map's single source of truth.
//!
//! [`GridModel`] owns the tile sequence and composes layout, color scale,
//! highlighting and simulation into commands and a render-ready query. Every
//! mutation goes through `&mut self`, so commands and simulation ticks are
//! serialized by construction.

use std::time::Duration;

use bevy::prelude::*;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

use crate::color::ColorScale;
use crate::config::{ConfigError, GridConfig};
use crate::geometry::HexOutline;
use crate::highlight;
use crate::layout::BrickLayout;
use crate::simulation::{LoadSimulator, LoadSource};
use crate::tile::Tile;

/// Everything a renderer needs to draw one tile.
#[derive(Clone, Debug, PartialEq)]
pub struct RenderedTile {
    /// Position in the sequence.
    pub index: usize,
    /// Top-left of the tile's bounding box.
    pub origin: Vec2,
    /// Outline relative to `origin`.
    pub polygon: HexOutline,
    /// Fill color for the tile's load.
    pub color: Srgba,
    /// `"42 %"`, or `"42"` while hovered.
    pub label: String,
    /// Hovered tiles draw their label enlarged.
    pub emphasized: bool,
    /// Label size, already doubled when `emphasized`.
    pub font_size: f32,
}

/// Tile sequence plus the engines that place, color and perturb it.
#[derive(Resource)]
pub struct GridModel {
    config: GridConfig,
    layout: BrickLayout,
    colors: ColorScale,
    outline: HexOutline,
    simulator: LoadSimulator,
    source: Box<dyn LoadSource>,
    tiles: Vec<Tile>,
    generation: u64,
}

impl GridModel {
    /// Validates `config` and builds the initial fill, seeding the RNG from
    /// `config.simulation.seed` or the OS.
    pub fn new(config: GridConfig) -> Result<Self, ConfigError> {
        let rng = match config.simulation.seed {
            Some(seed) => ChaCha8Rng::seed_from_u64(seed),
            None => ChaCha8Rng::from_os_rng(),
        };
        Self::with_source(config, Box::new(rng))
    }

    /// Like [`Self::new`] with an explicit randomness source.
    pub fn with_source(
        config: GridConfig,
        source: Box<dyn LoadSource>,
    ) -> Result<Self, ConfigError> {
        config.validate()?;

        let layout = BrickLayout::from_settings(&config.layout);
        let outline = layout.geometry().outline();
        let tiles = vec![Tile::new(config.tiles.initial_load); config.tiles.initial_count];

        info!(
            "load map: {} tiles, {} per row, {}px wide, tick every {:?}",
            tiles.len(),
            config.layout.tiles_per_row,
            config.layout.graph_width,
            config.simulation.tick_interval,
        );

        Ok(Self {
            colors: ColorScale::new(&config.palette),
            simulator: LoadSimulator::new(&config.simulation),
            layout,
            outline,
            source,
            tiles,
            generation: 0,
            config,
        })
    }

    // ── Queries ────────────────────────────────────────────────────

    /// Validated configuration the model was built from.
    pub fn config(&self) -> &GridConfig {
        &self.config
    }

    /// Brick layout placing the tiles.
    pub fn layout(&self) -> &BrickLayout {
        &self.layout
    }

    /// Current tile sequence.
    pub fn tiles(&self) -> &[Tile] {
        &self.tiles
    }

    /// Number of tiles.
    pub fn len(&self) -> usize {
        self.tiles.len()
    }

    /// `true` when there are no tiles.
    pub fn is_empty(&self) -> bool {
        self.tiles.is_empty()
    }

    /// Counter bumped by every mutation that changed the sequence.
    pub fn generation(&self) -> u64 {
        self.generation
    }

    /// Index of the hovered tile, if any.
    pub fn highlighted(&self) -> Option<usize> {
        highlight::highlighted(&self.tiles)
    }

    /// Tile under `point` in graph space, if any.
    pub fn tile_at(&self, point: Vec2) -> Option<usize> {
        self.layout.tile_at(point, &self.outline, self.tiles.len())
    }

    /// `(graph_width, graph_height)` for the current tile count.
    pub fn graph_size(&self) -> Vec2 {
        Vec2::new(
            self.config.layout.graph_width,
            self.layout.graph_height(self.tiles.len()),
        )
    }

    /// Render-ready description of every tile, in sequence order.
    pub fn render(&self) -> Vec<RenderedTile> {
        let font_size = self.layout.geometry().font_size;
        self.tiles
            .iter()
            .enumerate()
            .map(|(index, tile)| {
                let emphasized = tile.is_highlighted();
                RenderedTile {
                    index,
                    origin: self.layout.origin(index),
                    polygon: self.outline,
                    color: self.colors.color_for_load(tile.load()),
                    label: tile.label(),
                    emphasized,
                    font_size: if emphasized { font_size * 2.0 } else { font_size },
                }
            })
            .collect()
    }

    // ── Commands ───────────────────────────────────────────────────

    /// Appends a tile at the configured new-tile load.
    pub fn add_tile(&mut self) {
        self.tiles.push(Tile::new(self.config.tiles.new_tile_load));
        self.generation += 1;
        debug!("added tile #{}", self.tiles.len() - 1);
    }

    /// Removes the last tile. Returns `false` (and does nothing) when empty.
    pub fn remove_tile(&mut self) -> bool {
        if self.tiles.pop().is_none() {
            return false;
        }
        self.generation += 1;
        debug!("removed tile #{}", self.tiles.len());
        true
    }

    /// Highlights tile `index` alone. Out-of-range indices are ignored.
    pub fn hover(&mut self, index: usize) {
        if self.highlighted() == Some(index) {
            return;
        }
        if let Some(next) = highlight::hover(&self.tiles, index) {
            self.commit(next);
        }
    }

    /// Clears any highlight.
    pub fn unhover(&mut self) {
        if self.highlighted().is_some() {
            let next = highlight::unhover(&self.tiles);
            self.commit(next);
        }
    }

    /// Applies one simulation step immediately, running or not. Returns the
    /// number of spikes.
    pub fn tick(&mut self) -> usize {
        let outcome = self.simulator.step(&self.tiles, self.source.as_mut());
        if outcome.spikes > 0 {
            trace!("{} tile(s) spiked", outcome.spikes);
        }
        self.commit(outcome.tiles);
        outcome.spikes
    }

    // ── Scheduler ──────────────────────────────────────────────────

    /// Begins producing ticks from [`Self::advance`]. Idempotent.
    pub fn start(&mut self) {
        if self.simulator.start() {
            debug!("load simulation started");
        }
    }

    /// Stops producing ticks; no tick runs after this returns. Idempotent.
    pub fn stop(&mut self) {
        if self.simulator.stop() {
            debug!("load simulation stopped");
        }
    }

    /// Whether the simulation scheduler is running.
    pub fn is_running(&self) -> bool {
        self.simulator.is_running()
    }

    /// Feeds elapsed time to the scheduler and runs every tick that came due.
    /// Returns how many ticks ran.
    pub fn advance(&mut self, elapsed: Duration) -> u32 {
        let due = self.simulator.advance(elapsed);
        for _ in 0..due {
            self.tick();
        }
        due
    }

    fn commit(&mut self, tiles: Vec<Tile>) {
        debug_assert!(tiles.iter().filter(|t| t.is_highlighted()).count() <= 1);
        self.tiles = tiles;
        self.generation += 1;
    }
}
