#![warn(missing_docs)]
//! Hexagonal load map.
//!
//! Lays a variable-length sequence of loads (0–100) out as a brick-offset grid
//! of hexagons, colors each by its load, perturbs the loads on a fixed cadence
//! and tracks a single hovered tile. The core ([`model::GridModel`] and the
//! modules it composes) is plain data; [`hexmap`] and [`view`] wire it into
//! bevy.

#[cfg(feature = "native")]
pub mod cli;
pub mod color;
pub mod config;
pub mod geometry;
pub mod hexmap;
pub mod highlight;
pub mod layout;
pub mod math;
pub mod model;
pub mod simulation;
pub mod tile;
pub mod view;
