//! Brick-offset placement of a linear tile sequence.
//!
//! Rows alternate between a short capacity (`tiles_per_row - 1`, even rows)
//! and a long one (`tiles_per_row`, odd rows), starting short. Short rows are
//! shifted right by half a tile, which makes consecutive rows nest like
//! hexagons without any axial coordinate system.

use bevy::prelude::*;

use crate::config::LayoutSettings;
use crate::geometry::{HexOutline, TileGeometry};

/// Row and column of a tile in the brick pattern.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct GridCell {
    /// Zero-based row, top to bottom.
    pub row: usize,
    /// Zero-based position within the row.
    pub col: usize,
}

/// Maps tile indices to pixel origins.
#[derive(Clone, Debug, Reflect)]
pub struct BrickLayout {
    tiles_per_row: usize,
    geometry: TileGeometry,
}

impl BrickLayout {
    /// Builds the layout. `tiles_per_row` is expected to be validated (>= 2).
    pub fn from_settings(settings: &LayoutSettings) -> Self {
        Self {
            tiles_per_row: settings.tiles_per_row as usize,
            geometry: TileGeometry::from_settings(settings),
        }
    }

    /// Tile metrics this layout places.
    pub fn geometry(&self) -> &TileGeometry {
        &self.geometry
    }

    /// How many tiles fit in `row`.
    pub fn row_capacity(&self, row: usize) -> usize {
        if row.is_multiple_of(2) {
            self.tiles_per_row - 1
        } else {
            self.tiles_per_row
        }
    }

    /// Row and column of tile `index`.
    ///
    /// Equivalent to consuming row capacities (short, long, short, ...) from
    /// `index` until it no longer fits, but done per short+long row pair.
    pub fn locate(&self, index: usize) -> GridCell {
        let short = self.tiles_per_row - 1;
        let pair = short + self.tiles_per_row;
        let (pairs, rem) = (index / pair, index % pair);
        if rem < short {
            GridCell {
                row: pairs * 2,
                col: rem,
            }
        } else {
            GridCell {
                row: pairs * 2 + 1,
                col: rem - short,
            }
        }
    }

    /// Row of tile `index`.
    pub fn row_of(&self, index: usize) -> usize {
        self.locate(index).row
    }

    /// Position of tile `index` within its row.
    pub fn col_in_row(&self, index: usize) -> usize {
        self.locate(index).col
    }

    /// Inverse of [`Self::locate`]; `None` when `col` does not fit in `row`
    /// or the index would not fit in a `usize`.
    pub fn index_of(&self, cell: GridCell) -> Option<usize> {
        if cell.col >= self.row_capacity(cell.row) {
            return None;
        }
        let pair = 2 * self.tiles_per_row - 1;
        let short_before = if cell.row.is_multiple_of(2) {
            0
        } else {
            self.tiles_per_row - 1
        };
        (cell.row / 2)
            .checked_mul(pair)?
            .checked_add(short_before)?
            .checked_add(cell.col)
    }

    /// Top-left corner of the bounding box of tile `index`.
    pub fn origin(&self, index: usize) -> Vec2 {
        let GridCell { row, col } = self.locate(index);
        let g = &self.geometry;
        let offset = if row.is_multiple_of(2) { g.half_hexa_width } else { 0.0 };
        Vec2::new(
            g.padding + offset + col as f32 * g.hexa_width,
            g.padding + row as f32 * g.row_advance(),
        )
    }

    /// Index of the tile under `point` (graph space) among the first `len`
    /// tiles, if any.
    ///
    /// Bounding boxes of consecutive rows overlap by half a radius, so the
    /// point is tested against the row it falls in and the one above.
    pub fn tile_at(&self, point: Vec2, outline: &HexOutline, len: usize) -> Option<usize> {
        let g = &self.geometry;
        let local_y = point.y - g.padding;
        if !point.is_finite() || local_y < 0.0 || point.x < 0.0 {
            return None;
        }
        let lowest = (local_y / g.row_advance()).floor() as usize;
        if lowest > self.row_count(len) {
            return None;
        }
        for row in [Some(lowest), lowest.checked_sub(1)].into_iter().flatten() {
            let offset = if row.is_multiple_of(2) { g.half_hexa_width } else { 0.0 };
            let local_x = point.x - g.padding - offset;
            if local_x < 0.0 {
                continue;
            }
            let col = (local_x / g.hexa_width).floor() as usize;
            let Some(index) = self.index_of(GridCell { row, col }) else {
                continue;
            };
            if index < len && outline.contains(point - self.origin(index)) {
                return Some(index);
            }
        }
        None
    }

    /// Number of rows occupied by `len` tiles.
    pub fn row_count(&self, len: usize) -> usize {
        match len {
            0 => 0,
            n => self.row_of(n - 1) + 1,
        }
    }

    /// Drawing height needed for `len` tiles; `2 * padding` when empty.
    pub fn graph_height(&self, len: usize) -> f32 {
        let g = &self.geometry;
        match self.row_count(len) {
            0 => 2.0 * g.padding,
            rows => {
                2.0 * g.hexa_radius + (rows - 1) as f32 * g.row_advance() + 2.0 * g.padding
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn layout(tiles_per_row: u32) -> BrickLayout {
        BrickLayout::from_settings(&LayoutSettings {
            tiles_per_row,
            graph_width: 1200.0,
        })
    }

    /// Literal capacity consumption, one row at a time.
    fn consume(tiles_per_row: usize, index: usize) -> (usize, usize) {
        let mut remaining = index;
        let mut row: usize = 0;
        loop {
            let cap = if row.is_multiple_of(2) {
                tiles_per_row - 1
            } else {
                tiles_per_row
            };
            if remaining < cap {
                return (row, remaining);
            }
            remaining -= cap;
            row += 1;
        }
    }

    // ── row_of / col_in_row ─────────────────────────────────────────

    #[test]
    fn matches_row_by_row_consumption() {
        for n in [2u32, 3, 10, 12] {
            let l = layout(n);
            for i in 0..10_000 {
                assert_eq!(
                    (l.row_of(i), l.col_in_row(i)),
                    consume(n as usize, i),
                    "tiles_per_row {n}, index {i}"
                );
            }
        }
    }

    #[test]
    fn locate_is_a_bijection() {
        for n in [2u32, 7, 12] {
            let l = layout(n);
            for i in 0..10_000 {
                let cell = l.locate(i);
                assert!(cell.col < l.row_capacity(cell.row));
                assert_eq!(l.index_of(cell), Some(i), "tiles_per_row {n}, index {i}");
            }
        }
    }

    #[test]
    fn index_of_rejects_overfull_rows() {
        let l = layout(12);
        assert_eq!(l.index_of(GridCell { row: 0, col: 11 }), None);
        assert_eq!(l.index_of(GridCell { row: 1, col: 11 }), Some(22));
        assert_eq!(l.index_of(GridCell { row: 1, col: 12 }), None);
    }

    #[test]
    fn twelve_per_row_row_boundaries() {
        let l = layout(12);
        assert_eq!(l.locate(0), GridCell { row: 0, col: 0 });
        assert_eq!(l.locate(10), GridCell { row: 0, col: 10 });
        assert_eq!(l.locate(11), GridCell { row: 1, col: 0 });
        assert_eq!(l.locate(22), GridCell { row: 1, col: 11 });
        assert_eq!(l.locate(23), GridCell { row: 2, col: 0 });
        assert_eq!(l.locate(33), GridCell { row: 2, col: 10 });
        assert_eq!(l.locate(34), GridCell { row: 3, col: 0 });
        assert_eq!(l.locate(36), GridCell { row: 3, col: 2 });
    }

    #[test]
    fn two_per_row_alternates_one_and_two() {
        let l = layout(2);
        let rows: Vec<usize> = (0..6).map(|i| l.row_of(i)).collect();
        assert_eq!(rows, vec![0, 1, 1, 2, 3, 3]);
    }

    // ── origin ──────────────────────────────────────────────────────

    #[test]
    fn first_tile_is_offset_by_half_width() {
        let l = layout(10);
        let g = *l.geometry();
        let o = l.origin(0);
        assert!((o.x - (g.padding + g.half_hexa_width)).abs() < 1e-4);
        assert!((o.y - g.padding).abs() < 1e-4);
    }

    #[test]
    fn long_rows_start_at_padding() {
        let l = layout(10);
        let g = *l.geometry();
        let o = l.origin(9);
        assert!((o.x - g.padding).abs() < 1e-4);
        assert!((o.y - (g.padding + g.row_advance())).abs() < 1e-4);
    }

    #[test]
    fn neighbours_in_a_row_are_one_width_apart() {
        let l = layout(12);
        let w = l.geometry().hexa_width;
        for i in 11..22 {
            let d = l.origin(i + 1).x - l.origin(i).x;
            assert!((d - w).abs() < 1e-3);
        }
    }

    // ── tile_at ─────────────────────────────────────────────────────

    #[test]
    fn tile_at_finds_every_center() {
        let l = layout(12);
        let g = *l.geometry();
        let outline = g.outline();
        for i in 0..37 {
            let center = l.origin(i) + g.label_anchor();
            assert_eq!(l.tile_at(center, &outline, 37), Some(i));
        }
    }

    #[test]
    fn tile_at_resolves_overlapping_rows() {
        let l = layout(12);
        let g = *l.geometry();
        let outline = g.outline();
        // Just inside the bottom point of tile 0, below row 1's top edge.
        let bottom = l.origin(0) + Vec2::new(g.half_hexa_width, 2.0 * g.hexa_radius - 1.0);
        assert_eq!(l.tile_at(bottom, &outline, 37), Some(0));
        // Top point of tile 11, inside row 0's bounding boxes.
        let top = l.origin(11) + Vec2::new(g.half_hexa_width, 1.0);
        assert_eq!(l.tile_at(top, &outline, 37), Some(11));
    }

    #[test]
    fn tile_at_misses_padding_and_absent_tiles() {
        let l = layout(12);
        let g = *l.geometry();
        let outline = g.outline();
        assert_eq!(l.tile_at(Vec2::new(1.0, 1.0), &outline, 37), None);
        let beyond = l.origin(40) + g.label_anchor();
        assert_eq!(l.tile_at(beyond, &outline, 37), None);
        assert_eq!(l.tile_at(l.origin(0) + g.label_anchor(), &outline, 0), None);
    }

    #[test]
    fn tile_at_ignores_far_and_non_finite_points() {
        let l = layout(12);
        let g = *l.geometry();
        let outline = g.outline();
        let x = g.padding + g.half_hexa_width + 1.0;
        assert_eq!(l.tile_at(Vec2::new(x, 1.0e30), &outline, 37), None);
        assert_eq!(l.tile_at(Vec2::new(1.0e30, g.padding + 1.0), &outline, 37), None);
        assert_eq!(l.tile_at(Vec2::new(f32::MAX, f32::MAX), &outline, usize::MAX), None);
        assert_eq!(l.tile_at(Vec2::new(f32::NAN, 10.0), &outline, 37), None);
        assert_eq!(l.tile_at(Vec2::new(x, f32::INFINITY), &outline, 37), None);
    }

    #[test]
    fn index_of_huge_row_is_none() {
        let l = layout(12);
        assert_eq!(l.index_of(GridCell { row: usize::MAX, col: 0 }), None);
        assert_eq!(l.index_of(GridCell { row: usize::MAX - 1, col: 10 }), None);
    }

    // ── graph_height ────────────────────────────────────────────────

    #[test]
    fn height_for_thirty_seven_tiles() {
        let l = layout(12);
        let g = *l.geometry();
        assert_eq!(l.row_count(37), 4);
        let expected = 2.0 * g.hexa_radius
            + 3.0 * (g.hexa_radius + g.half_hexa_radius)
            + 2.0 * g.padding;
        assert!((l.graph_height(37) - expected).abs() < 1e-3);
    }

    #[test]
    fn height_of_empty_grid_is_padding_only() {
        let l = layout(12);
        let h = l.graph_height(0);
        assert!(h.is_finite());
        assert!((h - 2.0 * l.geometry().padding).abs() < 1e-4);
    }

    #[test]
    fn height_grows_only_on_new_rows() {
        let l = layout(12);
        assert_eq!(l.graph_height(1), l.graph_height(11));
        assert!(l.graph_height(12) > l.graph_height(11));
    }
}
