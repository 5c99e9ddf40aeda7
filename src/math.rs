//! Pure computation helpers extracted for testability.
//!
//! Nothing here touches the ECS; the functions operate on plain numbers so the
//! layout, color and simulation modules can share them.

use bevy::math::Vec2;

/// Highest load a tile can carry.
pub const MAX_LOAD: u8 = 100;

/// Clamps a signed load into `[0, MAX_LOAD]`.
///
/// # Examples
/// ```
/// # use hex_load_map::math::clamp_load;
/// assert_eq!(clamp_load(-4), 0);
/// assert_eq!(clamp_load(57), 57);
/// assert_eq!(clamp_load(130), 100);
/// ```
pub fn clamp_load(value: i32) -> u8 {
    // Bounded by the clamp, so the cast is lossless.
    value.clamp(0, MAX_LOAD as i32) as u8
}

/// Linear blend of `a` and `b`.
///
/// Written as `a * (1 - t) + b * t` so that `t == 0` returns `a` and `t == 1`
/// returns `b` bit-exactly.
pub fn lerp(a: f32, b: f32, t: f32) -> f32 {
    a * (1.0 - t) + b * t
}

/// Fraction of the way `value` sits between `start` and `end`.
///
/// Returns `0.0` for a degenerate (zero-width) span.
pub fn inverse_lerp(start: f32, end: f32, value: f32) -> f32 {
    let span = end - start;
    if span == 0.0 {
        return 0.0;
    }
    (value - start) / span
}

/// Rounds half away from zero, matching how label sizes are derived.
pub fn round_px(value: f32) -> f32 {
    value.round()
}

/// Graph space (origin top-left, y down) to world space centered on the
/// graph (y up).
pub fn graph_to_world(point: Vec2, graph_size: Vec2) -> Vec2 {
    Vec2::new(point.x - graph_size.x / 2.0, graph_size.y / 2.0 - point.y)
}

/// Inverse of [`graph_to_world`].
pub fn world_to_graph(point: Vec2, graph_size: Vec2) -> Vec2 {
    Vec2::new(point.x + graph_size.x / 2.0, graph_size.y / 2.0 - point.y)
}
