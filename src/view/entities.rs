use bevy::prelude::*;

/// Marker on the 2D camera looking at the map.
#[derive(Component)]
pub struct MapCamera;

/// Tile entity, positioned at the hexagon's center.
#[derive(Component, Reflect)]
pub struct HexTile {
    /// Position of the tile in the model's sequence.
    pub index: usize,
}

/// Text child of a [`HexTile`].
#[derive(Component, Reflect)]
pub struct TileLabel;

/// Shared handles used when spawning tiles.
#[derive(Resource)]
pub struct TileAssets {
    /// Hexagon mesh centered on the origin, y up.
    pub hex_mesh: Handle<Mesh>,
    /// Material of the outline drawn behind every tile.
    pub border_material: Handle<ColorMaterial>,
    /// Outline mesh scale: one stroke wider than the tile.
    pub border_scale: f32,
}

/// Tile entities currently on screen and the model generation they show.
#[derive(Resource, Default)]
pub struct SpawnedTiles {
    pub(super) entities: Vec<Entity>,
    pub(super) generation: Option<u64>,
}
