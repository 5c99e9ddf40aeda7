//! Hexagon outline and the per-tile metrics derived from the config.

use std::fmt::Write as _;

use bevy::prelude::*;

use crate::config::LayoutSettings;
use crate::math;

/// Pixel metrics shared by every tile, derived from [`LayoutSettings`].
#[derive(Clone, Copy, Debug, PartialEq, Reflect)]
pub struct TileGeometry {
    /// Margin around the whole grid.
    pub padding: f32,
    /// Horizontal extent of one tile.
    pub hexa_width: f32,
    /// Circumradius of one tile (`hexa_width / sqrt(3)`).
    pub hexa_radius: f32,
    /// `hexa_width / 2`; also the x offset of the short rows.
    pub half_hexa_width: f32,
    /// `hexa_radius / 2`.
    pub half_hexa_radius: f32,
    /// Label font size before emphasis.
    pub font_size: f32,
    /// Outline stroke width.
    pub stroke_width: f32,
}

impl TileGeometry {
    /// Derives tile size from the drawing width and row capacity.
    ///
    /// The padding is half a tile-slot of an `tiles_per_row + 1` wide grid so
    /// the short rows' half-tile offset never touches the border.
    pub fn from_settings(layout: &LayoutSettings) -> Self {
        let per_row = layout.tiles_per_row as f32;
        let padding = layout.graph_width / (per_row + 1.0) / 2.0;
        let hexa_width = (layout.graph_width - padding * 2.0) / per_row;
        let hexa_radius = hexa_width / 3f32.sqrt();

        Self {
            padding,
            hexa_width,
            hexa_radius,
            half_hexa_width: hexa_width / 2.0,
            half_hexa_radius: hexa_radius / 2.0,
            font_size: math::round_px(hexa_radius / 2.5),
            stroke_width: math::round_px(hexa_radius / 7.0),
        }
    }

    /// Vertical distance between two consecutive rows.
    pub fn row_advance(&self) -> f32 {
        self.hexa_radius + self.half_hexa_radius
    }

    /// Label anchor relative to the tile origin: the hexagon's center.
    pub fn label_anchor(&self) -> Vec2 {
        Vec2::new(self.half_hexa_width, self.hexa_radius)
    }

    /// Outline of one tile at this size.
    pub fn outline(&self) -> HexOutline {
        HexOutline::new(self.hexa_width)
    }
}

/// The six vertices of a hexagon with vertical sides, relative to its
/// bounding-box origin (top-left, y pointing down).
#[derive(Clone, Copy, Debug, PartialEq, Reflect)]
pub struct HexOutline {
    /// Vertices in drawing order, starting at the upper-left edge.
    pub vertices: [Vec2; 6],
}

impl HexOutline {
    /// Outline inscribed in a tile `width` pixels wide.
    pub fn new(width: f32) -> Self {
        let r = width / 3f32.sqrt();
        let hw = width / 2.0;
        let hr = r / 2.0;
        Self {
            vertices: [
                Vec2::new(0.0, hr),
                Vec2::new(hw, 0.0),
                Vec2::new(width, hr),
                Vec2::new(width, r + hr),
                Vec2::new(hw, 2.0 * r),
                Vec2::new(0.0, r + hr),
            ],
        }
    }

    /// Space-separated `x,y` pairs, the format polygon `points` attributes take.
    pub fn points_string(&self) -> String {
        let mut out = String::new();
        for (i, v) in self.vertices.iter().enumerate() {
            if i > 0 {
                out.push(' ');
            }
            // Writing to a String cannot fail.
            let _ = write!(out, "{},{}", v.x, v.y);
        }
        out
    }

    /// Whether `point` (relative to the tile origin) lies inside or on the
    /// outline.
    pub fn contains(&self, point: Vec2) -> bool {
        let mut sign = 0.0f32;
        for i in 0..6 {
            let a = self.vertices[i];
            let b = self.vertices[(i + 1) % 6];
            let cross = (b - a).perp_dot(point - a);
            if cross == 0.0 {
                continue;
            }
            if sign == 0.0 {
                sign = cross.signum();
            } else if cross.signum() != sign {
                return false;
            }
        }
        true
    }

    /// Same vertices flipped to y-up and shifted so the hexagon is centered on
    /// the origin, for engines whose mesh space is y-up.
    pub fn centered_y_up(&self) -> [Vec2; 6] {
        let (min, max) = self.vertices.iter().fold(
            (Vec2::splat(f32::INFINITY), Vec2::splat(f32::NEG_INFINITY)),
            |(lo, hi), v| (lo.min(*v), hi.max(*v)),
        );
        let center = (min + max) / 2.0;
        self.vertices.map(|v| Vec2::new(v.x - center.x, center.y - v.y))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::GridConfig;

    fn load_map_geometry() -> TileGeometry {
        TileGeometry::from_settings(&GridConfig::default().layout)
    }

    // ── TileGeometry ────────────────────────────────────────────────

    #[test]
    fn padding_and_width_for_twelve_per_row() {
        let g = load_map_geometry();
        let padding = 1200.0 / 13.0 / 2.0;
        assert!((g.padding - padding).abs() < 1e-4);
        assert!((g.hexa_width - (1200.0 - 2.0 * padding) / 12.0).abs() < 1e-4);
    }

    #[test]
    fn grid_plus_padding_spans_graph_width() {
        let g = load_map_geometry();
        let total = 2.0 * g.padding + 12.0 * g.hexa_width;
        assert!((total - 1200.0).abs() < 1e-3);
    }

    #[test]
    fn radius_relations() {
        let g = load_map_geometry();
        assert!((g.hexa_radius * 3f32.sqrt() - g.hexa_width).abs() < 1e-4);
        assert!((g.half_hexa_radius * 2.0 - g.hexa_radius).abs() < 1e-6);
        assert!((g.row_advance() - 1.5 * g.hexa_radius).abs() < 1e-4);
    }

    #[test]
    fn font_and_stroke_are_whole_pixels() {
        let g = load_map_geometry();
        assert_eq!(g.font_size.fract(), 0.0);
        assert_eq!(g.stroke_width.fract(), 0.0);
        // 12 per row at 1200px: radius ~53.3
        assert_eq!(g.font_size, 21.0);
        assert_eq!(g.stroke_width, 8.0);
    }

    // ── HexOutline ──────────────────────────────────────────────────

    #[test]
    fn outline_matches_closed_form_vertices() {
        let w = 90.0;
        let r = w / 3f32.sqrt();
        let o = HexOutline::new(w);
        let expected = [
            Vec2::new(0.0, r / 2.0),
            Vec2::new(w / 2.0, 0.0),
            Vec2::new(w, r / 2.0),
            Vec2::new(w, 1.5 * r),
            Vec2::new(w / 2.0, 2.0 * r),
            Vec2::new(0.0, 1.5 * r),
        ];
        for (i, (got, want)) in o.vertices.iter().zip(expected).enumerate() {
            assert!((*got - want).length() < 1e-4, "vertex {i}: {got:?} vs {want:?}");
        }
    }

    #[test]
    fn outline_is_regular() {
        let o = HexOutline::new(60.0);
        let side = o.vertices[0].distance(o.vertices[1]);
        for i in 0..6 {
            let d = o.vertices[i].distance(o.vertices[(i + 1) % 6]);
            assert!((d - side).abs() < 1e-3, "edge {i} has length {d}, expected {side}");
        }
    }

    #[test]
    fn points_string_lists_six_pairs() {
        let s = HexOutline::new(2.0).points_string();
        let pairs: Vec<&str> = s.split(' ').collect();
        assert_eq!(pairs.len(), 6);
        assert_eq!(pairs[1], "1,0");
        assert!(pairs.iter().all(|p| p.split(',').count() == 2));
    }

    #[test]
    fn contains_center_and_rejects_corners_of_bounding_box() {
        let w = 60.0;
        let r = w / 3f32.sqrt();
        let o = HexOutline::new(w);
        assert!(o.contains(Vec2::new(w / 2.0, r)));
        assert!(o.contains(o.vertices[3]));
        assert!(!o.contains(Vec2::new(1.0, 1.0)));
        assert!(!o.contains(Vec2::new(w - 1.0, 2.0 * r - 1.0)));
        assert!(!o.contains(Vec2::new(-1.0, r)));
    }

    #[test]
    fn centered_outline_is_symmetric() {
        let c = HexOutline::new(60.0).centered_y_up();
        let sum: Vec2 = c.iter().copied().sum();
        assert!(sum.length() < 1e-3);
        // Second vertex is the top point in y-up space.
        assert!(c[1].y > 0.0 && c[1].x.abs() < 1e-4);
    }
}
