//! Periodic load perturbation: bounded random walk plus rare spikes.
//!
//! [`LoadSimulator`] owns both the cadence (a repeating [`Timer`] that only
//! accumulates while running) and the per-tick transition. The transition
//! reads one snapshot of the tiles and returns a whole new sequence, so no
//! tile's update can observe another's within the same tick.

use std::time::Duration;

use bevy::prelude::*;
use rand::Rng;

use crate::config::SimulationSettings;
use crate::tile::Tile;

/// Source of randomness for the simulator.
///
/// Every [`rand::Rng`] qualifies; tests substitute scripted sources.
pub trait LoadSource: Send + Sync {
    /// Uniform draw from `min..=max`.
    fn delta(&mut self, min: i32, max: i32) -> i32;
    /// `true` with the given probability.
    fn spike(&mut self, probability: f64) -> bool;
}

impl<R: Rng + Send + Sync> LoadSource for R {
    fn delta(&mut self, min: i32, max: i32) -> i32 {
        self.random_range(min..=max)
    }

    fn spike(&mut self, probability: f64) -> bool {
        self.random_bool(probability)
    }
}

/// Result of one simulation tick.
#[derive(Debug, Clone, PartialEq)]
pub struct TickOutcome {
    /// The replacement tile sequence.
    pub tiles: Vec<Tile>,
    /// How many tiles were forced to the spike value.
    pub spikes: usize,
}

/// Drives tile loads on a fixed cadence between `start` and `stop`.
#[derive(Debug, Clone)]
pub struct LoadSimulator {
    settings: SimulationSettings,
    timer: Timer,
    running: bool,
}

impl LoadSimulator {
    /// Stopped simulator; call [`Self::start`] to begin accumulating time.
    pub fn new(settings: &SimulationSettings) -> Self {
        Self {
            settings: settings.clone(),
            timer: Timer::new(settings.tick_interval, TimerMode::Repeating),
            running: false,
        }
    }

    /// Whether elapsed time currently produces ticks.
    pub fn is_running(&self) -> bool {
        self.running
    }

    /// Enters the running state. Returns `false` if it was already running.
    pub fn start(&mut self) -> bool {
        if self.running {
            return false;
        }
        self.running = true;
        true
    }

    /// Leaves the running state and drops any partial interval, so a later
    /// start waits a full interval. Returns `false` if it was not running.
    pub fn stop(&mut self) -> bool {
        if !self.running {
            return false;
        }
        self.running = false;
        self.timer.reset();
        true
    }

    /// Feeds `elapsed` wall (or virtual) time and returns how many ticks
    /// came due. Always zero while stopped.
    pub fn advance(&mut self, elapsed: Duration) -> u32 {
        if !self.running {
            return 0;
        }
        self.timer.tick(elapsed);
        self.timer.times_finished_this_tick()
    }

    /// Applies one tick to `tiles`.
    ///
    /// Each tile walks by a delta drawn from `[min_delta, max_delta]`, then,
    /// independently, may be overridden by a spike. Loads are clamped and
    /// highlight flags carried over untouched.
    pub fn step(&self, tiles: &[Tile], source: &mut dyn LoadSource) -> TickOutcome {
        let s = &self.settings;
        let mut spikes = 0;
        let next = tiles
            .iter()
            .map(|tile| {
                let delta = source.delta(s.min_delta, s.max_delta);
                let walked = tile.with_load((tile.load() as i32).saturating_add(delta));
                if source.spike(s.spike_probability) {
                    spikes += 1;
                    walked.with_load(s.spike_value as i32)
                } else {
                    walked
                }
            })
            .collect();
        TickOutcome {
            tiles: next,
            spikes,
        }
    }
}
