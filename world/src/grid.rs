//! Dense tile storage addressed by row-major linear index.

use dungeon_chase_core::{CellCoord, Tile};

/// Fixed-size rectangular tile grid owned by the world.
///
/// The grid is created once at load time and never resized; interactions
/// mutate tiles in place through [`TileGrid::set_tile`], which stays private
/// to the world crate so terrain has a single writer.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TileGrid {
    columns: u32,
    rows: u32,
    tiles: Vec<Tile>,
}

impl TileGrid {
    pub(crate) fn new(columns: u32, rows: u32, tiles: Vec<Tile>) -> Self {
        debug_assert_eq!(
            tiles.len(),
            usize::try_from(u64::from(columns) * u64::from(rows)).unwrap_or(usize::MAX),
        );
        Self {
            columns,
            rows,
            tiles,
        }
    }

    /// Number of columns contained in the grid.
    #[must_use]
    pub const fn columns(&self) -> u32 {
        self.columns
    }

    /// Number of rows contained in the grid.
    #[must_use]
    pub const fn rows(&self) -> u32 {
        self.rows
    }

    /// Reports whether the cell lies within the grid bounds.
    #[must_use]
    pub const fn in_bounds(&self, cell: CellCoord) -> bool {
        cell.column() < self.columns && cell.row() < self.rows
    }

    /// Row-major linear index of the cell, or `None` when out of bounds.
    ///
    /// Out-of-range coordinates never produce an index, so callers cannot
    /// observe a hash computed from an invalid position.
    #[must_use]
    pub fn index_of(&self, cell: CellCoord) -> Option<usize> {
        if !self.in_bounds(cell) {
            return None;
        }

        let row = usize::try_from(cell.row()).ok()?;
        let column = usize::try_from(cell.column()).ok()?;
        let width = usize::try_from(self.columns).ok()?;
        row.checked_mul(width)?.checked_add(column)
    }

    /// Tile stored at the cell, or `None` when out of bounds.
    #[must_use]
    pub fn tile_at(&self, cell: CellCoord) -> Option<Tile> {
        self.index_of(cell)
            .and_then(|index| self.tiles.get(index).copied())
    }

    /// Reports whether an entity may legally occupy the cell.
    ///
    /// Cells outside the grid are impassable.
    #[must_use]
    pub fn is_passable(&self, cell: CellCoord) -> bool {
        self.tile_at(cell).is_some_and(Tile::is_passable)
    }

    /// Dense tile storage in row-major order.
    #[must_use]
    pub fn tiles(&self) -> &[Tile] {
        &self.tiles
    }

    pub(crate) fn set_tile(&mut self, cell: CellCoord, tile: Tile) {
        if let Some(index) = self.index_of(cell) {
            if let Some(slot) = self.tiles.get_mut(index) {
                *slot = tile;
            }
        }
    }
}
