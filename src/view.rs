//! 2D front-end for the load map: tile meshes, labels, pointer hover and the
//! add/remove controls.
//!
//! Everything here reads [`GridModel`](crate::model::GridModel) and calls its
//! commands; no load, layout or color logic lives in this module.

mod entities;
mod systems;

pub use entities::{HexTile, MapCamera, TileLabel};

use bevy::prelude::*;

use crate::hexmap::HexMapSet;
use crate::model::GridModel;

/// Per-plugin configuration for the load map view.
#[derive(Resource, Clone, Debug, Reflect)]
pub struct ViewConfig {
    /// Background clear color.
    pub clear_color: Color,
    /// Tile outline color.
    pub border_color: Color,
    /// Label text color.
    pub label_color: Color,
}

impl Default for ViewConfig {
    fn default() -> Self {
        Self {
            clear_color: Color::srgb(0.08, 0.09, 0.12),
            border_color: Color::BLACK,
            label_color: Color::WHITE,
        }
    }
}

/// Draws the model and routes input back into it.
///
/// Stays idle when [`HexMapPlugin`](crate::hexmap::HexMapPlugin) rejected its
/// configuration and inserted no model.
pub struct HexMapViewPlugin(pub ViewConfig);

impl Plugin for HexMapViewPlugin {
    fn build(&self, app: &mut App) {
        app.register_type::<ViewConfig>()
            .register_type::<HexTile>()
            .register_type::<TileLabel>()
            .insert_resource(self.0.clone())
            .insert_resource(ClearColor(self.0.clear_color))
            .init_resource::<entities::SpawnedTiles>()
            .add_systems(
                Startup,
                systems::setup_view.run_if(resource_exists::<GridModel>),
            )
            .add_systems(
                Update,
                (
                    systems::keyboard_controls,
                    systems::track_hover,
                    systems::fit_camera,
                    systems::sync_tiles,
                )
                    .chain()
                    .after(HexMapSet::Simulate)
                    .run_if(resource_exists::<GridModel>),
            )
            .add_systems(
                bevy_egui::EguiPrimaryContextPass,
                systems::controls_panel.run_if(resource_exists::<GridModel>),
            );
    }
}
