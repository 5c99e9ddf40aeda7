//! Hover highlighting with at most one highlighted tile.
//!
//! Both commands build a complete replacement sequence rather than flipping a
//! flag in place, so a stale highlight can never survive a hover.

use crate::tile::Tile;

/// Sequence with exactly tile `index` highlighted, or `None` when `index` is
/// out of range (the caller keeps its current sequence).
pub fn hover(tiles: &[Tile], index: usize) -> Option<Vec<Tile>> {
    if index >= tiles.len() {
        return None;
    }
    Some(
        tiles
            .iter()
            .enumerate()
            .map(|(i, tile)| tile.with_highlight(i == index))
            .collect(),
    )
}

/// Sequence with no tile highlighted.
pub fn unhover(tiles: &[Tile]) -> Vec<Tile> {
    tiles.iter().map(|tile| tile.with_highlight(false)).collect()
}

/// Index of the highlighted tile, if any.
pub fn highlighted(tiles: &[Tile]) -> Option<usize> {
    tiles.iter().position(Tile::is_highlighted)
}
