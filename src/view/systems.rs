use bevy::asset::RenderAssetUsages;
use bevy::camera::ScalingMode;
use bevy::mesh::Indices;
use bevy::prelude::*;
use bevy::render::render_resource::PrimitiveTopology;
use bevy::window::PrimaryWindow;
use bevy_egui::{EguiContexts, egui};

use super::ViewConfig;
use super::entities::{HexTile, MapCamera, SpawnedTiles, TileAssets, TileLabel};
use crate::geometry::HexOutline;
use crate::math;
use crate::model::GridModel;

// ── Startup ────────────────────────────────────────────────────────

/// Spawns the camera and builds the shared tile mesh and outline material.
pub fn setup_view(
    mut commands: Commands,
    mut meshes: ResMut<Assets<Mesh>>,
    mut materials: ResMut<Assets<ColorMaterial>>,
    model: Res<GridModel>,
    cfg: Res<ViewConfig>,
) {
    commands.spawn((Name::new("Camera"), Camera2d, MapCamera));

    let geometry = model.layout().geometry();
    commands.insert_resource(TileAssets {
        hex_mesh: meshes.add(hex_mesh(&geometry.outline())),
        border_material: materials.add(ColorMaterial::from_color(cfg.border_color)),
        border_scale: (geometry.hexa_width + geometry.stroke_width) / geometry.hexa_width,
    });
}

/// Triangle fan over the outline, centered on the origin.
fn hex_mesh(outline: &HexOutline) -> Mesh {
    let corners = outline.centered_y_up();
    let extent = corners
        .iter()
        .fold(Vec2::ZERO, |acc, c| acc.max(c.abs()))
        .max(Vec2::splat(f32::EPSILON));

    let mut positions = vec![[0.0, 0.0, 0.0]];
    positions.extend(corners.iter().map(|c| [c.x, c.y, 0.0]));
    let normals = vec![[0.0, 0.0, 1.0]; positions.len()];
    let uvs: Vec<[f32; 2]> = positions
        .iter()
        .map(|p| [0.5 + p[0] / extent.x / 2.0, 0.5 - p[1] / extent.y / 2.0])
        .collect();

    // Corners run clockwise in y-up space; emit each fan triangle CCW.
    let mut indices: Vec<u16> = Vec::with_capacity(18);
    for i in 0..6u16 {
        indices.extend([0, 1 + (i + 1) % 6, 1 + i]);
    }

    Mesh::new(
        PrimitiveTopology::TriangleList,
        RenderAssetUsages::RENDER_WORLD,
    )
    .with_inserted_attribute(Mesh::ATTRIBUTE_POSITION, positions)
    .with_inserted_attribute(Mesh::ATTRIBUTE_NORMAL, normals)
    .with_inserted_attribute(Mesh::ATTRIBUTE_UV_0, uvs)
    .with_inserted_indices(Indices::U16(indices))
}

// ── Update: input ──────────────────────────────────────────────────

/// `+`/`-` add and remove tiles, `Space` pauses or resumes the simulation.
pub fn keyboard_controls(keys: Res<ButtonInput<KeyCode>>, mut model: ResMut<GridModel>) {
    if keys.any_just_pressed([KeyCode::Equal, KeyCode::NumpadAdd]) {
        model.add_tile();
    }
    if keys.any_just_pressed([KeyCode::Minus, KeyCode::NumpadSubtract]) {
        model.remove_tile();
    }
    if keys.just_pressed(KeyCode::Space) {
        if model.is_running() {
            model.stop();
        } else {
            model.start();
        }
    }
}

/// Hovers the tile under the cursor, or clears the hover when there is none.
///
/// A cursor over an egui window hovers nothing.
pub fn track_hover(
    windows: Query<&Window, With<PrimaryWindow>>,
    camera_q: Query<(&Camera, &GlobalTransform), With<MapCamera>>,
    mut contexts: EguiContexts,
    mut model: ResMut<GridModel>,
) {
    let Ok(window) = windows.single() else { return };
    let Ok((camera, cam_gt)) = camera_q.single() else {
        return;
    };

    let over_ui = contexts.ctx_mut().is_ok_and(|ctx| ctx.wants_pointer_input());
    let size = model.graph_size();
    let hovered = map_cursor(window.cursor_position(), over_ui)
        .and_then(|cursor| camera.viewport_to_world_2d(cam_gt, cursor).ok())
        .and_then(|world| model.tile_at(math::world_to_graph(world, size)));

    match hovered {
        Some(index) => model.hover(index),
        None => model.unhover(),
    }
}

/// Cursor position that may hover a tile: none while egui holds the pointer.
fn map_cursor(cursor: Option<Vec2>, over_ui: bool) -> Option<Vec2> {
    cursor.filter(|_| !over_ui)
}

/// "More data!" / "Less data!" buttons plus a simulation toggle.
pub fn controls_panel(mut contexts: EguiContexts, mut model: ResMut<GridModel>) -> Result {
    let ctx = contexts.ctx_mut()?;

    egui::Window::new("Load map")
        .resizable(false)
        .show(ctx, |ui| {
            ui.horizontal(|ui| {
                if ui.button("More data!").clicked() {
                    model.add_tile();
                }
                if ui.button("Less data!").clicked() {
                    model.remove_tile();
                }
            });
            ui.label(format!("{} tiles", model.len()));

            let mut running = model.is_running();
            if ui.checkbox(&mut running, "Simulate load").changed() {
                if running {
                    model.start();
                } else {
                    model.stop();
                }
            }
        });
    Ok(())
}

// ── Update: presentation ───────────────────────────────────────────

/// Keeps the whole graph in view as rows come and go.
pub fn fit_camera(
    model: Res<GridModel>,
    mut camera_q: Query<&mut Projection, With<MapCamera>>,
    mut fitted: Local<Option<Vec2>>,
) {
    let size = model.graph_size();
    if *fitted == Some(size) {
        return;
    }
    let Ok(mut projection) = camera_q.single_mut() else {
        return;
    };
    if let Projection::Orthographic(ortho) = &mut *projection {
        ortho.scaling_mode = ScalingMode::AutoMin {
            min_width: size.x,
            min_height: size.y,
        };
        *fitted = Some(size);
    }
}

/// Respawns tile entities whenever the model's generation moves.
///
/// Tile count, positions (the graph re-centers as rows are added), colors and
/// labels can all change at once, so the whole set is rebuilt.
pub fn sync_tiles(
    mut commands: Commands,
    model: Res<GridModel>,
    assets: Option<Res<TileAssets>>,
    cfg: Res<ViewConfig>,
    mut materials: ResMut<Assets<ColorMaterial>>,
    mut spawned: ResMut<SpawnedTiles>,
) {
    let Some(assets) = assets else { return };
    if spawned.generation == Some(model.generation()) {
        return;
    }
    spawned.generation = Some(model.generation());

    for entity in spawned.entities.drain(..) {
        commands.entity(entity).despawn();
    }

    let size = model.graph_size();
    let anchor = model.layout().geometry().label_anchor();

    for tile in model.render() {
        let center = math::graph_to_world(tile.origin + anchor, size);
        let border_mesh = assets.hex_mesh.clone();
        let border_material = assets.border_material.clone();
        let border_scale = assets.border_scale;
        let label_color = cfg.label_color;

        let entity = commands
            .spawn((
                Name::new(format!("Tile {}", tile.index)),
                HexTile { index: tile.index },
                Mesh2d(assets.hex_mesh.clone()),
                MeshMaterial2d(materials.add(ColorMaterial::from_color(tile.color))),
                Transform::from_xyz(center.x, center.y, 0.0),
            ))
            .with_children(move |parent| {
                parent.spawn((
                    Mesh2d(border_mesh),
                    MeshMaterial2d(border_material),
                    Transform::from_xyz(0.0, 0.0, -0.1).with_scale(Vec3::splat(border_scale)),
                ));
                parent.spawn((
                    TileLabel,
                    Text2d::new(tile.label),
                    TextFont {
                        font_size: tile.font_size,
                        ..default()
                    },
                    TextColor(label_color),
                    Transform::from_xyz(0.0, 0.0, 0.1),
                ));
            })
            .id();
        spawned.entities.push(entity);
    }
}
