//! Text map loader that produces a ready-to-simulate world.

use std::{error::Error, fmt};

use dungeon_chase_core::{CellCoord, EnemyId, Tile};

use crate::{grid::TileGrid, Enemy, Inventory, World};

/// Parses a character-grid map into a [`World`].
///
/// One text line per grid row, every row the same length. Tile characters
/// follow the vocabulary of [`Tile::decode`]; `@` marks the unique player
/// start and any other alphabetic character spawns an enemy displayed with
/// that glyph. The tile beneath an entity start becomes floor. Anything else
/// is rejected; no partial world escapes a failed load.
pub fn load_world(source: &str) -> Result<World, LoadError> {
    let mut tiles = Vec::new();
    let mut player: Option<CellCoord> = None;
    let mut enemies: Vec<Enemy> = Vec::new();
    let mut columns = 0u32;
    let mut rows = 0u32;

    for (row_index, line) in source.lines().enumerate() {
        let row = row_index as u32;
        let width = line.chars().count() as u32;

        if row == 0 {
            columns = width;
        } else if width != columns {
            return Err(LoadError::RaggedRow {
                row,
                expected: columns,
                found: width,
            });
        }

        for (column_index, symbol) in line.chars().enumerate() {
            let column = column_index as u32;
            let cell = CellCoord::new(column, row);

            if symbol == '@' {
                if player.is_some() {
                    return Err(LoadError::DuplicatePlayer { row, column });
                }
                player = Some(cell);
                tiles.push(Tile::Floor);
            } else if let Some(tile) = Tile::decode(symbol) {
                tiles.push(tile);
            } else if symbol.is_alphabetic() {
                let id = EnemyId::new(enemies.len() as u32);
                enemies.push(Enemy {
                    id,
                    cell,
                    glyph: symbol,
                });
                tiles.push(Tile::Floor);
            } else {
                return Err(LoadError::UnrecognizedSymbol {
                    row,
                    column,
                    symbol,
                });
            }
        }

        rows = row + 1;
    }

    if columns == 0 || rows == 0 {
        return Err(LoadError::EmptyMap);
    }

    let player = player.ok_or(LoadError::MissingPlayer)?;

    Ok(World {
        grid: TileGrid::new(columns, rows, tiles),
        player,
        inventory: Inventory::default(),
        enemies,
        tick_index: 0,
    })
}

/// Reasons a map source is rejected by the loader.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum LoadError {
    /// The source contained no rows or no columns.
    EmptyMap,
    /// A row's length disagreed with the first row.
    RaggedRow {
        /// Zero-based index of the offending row.
        row: u32,
        /// Width established by the first row.
        expected: u32,
        /// Width actually found.
        found: u32,
    },
    /// A character outside the map vocabulary was encountered.
    UnrecognizedSymbol {
        /// Zero-based row of the offending character.
        row: u32,
        /// Zero-based column of the offending character.
        column: u32,
        /// The character that failed to decode.
        symbol: char,
    },
    /// No `@` player start was present.
    MissingPlayer,
    /// More than one `@` player start was present.
    DuplicatePlayer {
        /// Zero-based row of the second player start.
        row: u32,
        /// Zero-based column of the second player start.
        column: u32,
    },
}

impl fmt::Display for LoadError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::EmptyMap => write!(f, "map source contains no cells"),
            Self::RaggedRow {
                row,
                expected,
                found,
            } => write!(
                f,
                "row {row} is {found} cells wide but the map is {expected} cells wide"
            ),
            Self::UnrecognizedSymbol {
                row,
                column,
                symbol,
            } => write!(f, "unrecognized map symbol {symbol:?} at row {row}, column {column}"),
            Self::MissingPlayer => write!(f, "map contains no player start (@)"),
            Self::DuplicatePlayer { row, column } => write!(
                f,
                "second player start (@) at row {row}, column {column}; the player is unique"
            ),
        }
    }
}

impl Error for LoadError {}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::query;

    #[test]
    fn loads_tiles_player_and_enemies_in_reading_order() {
        let world = load_world("#.@\n-kZ\n$&|").expect("well-formed map");
        let grid = query::tile_grid(&world);

        assert_eq!(grid.columns(), 3);
        assert_eq!(grid.rows(), 3);
        assert_eq!(query::player(&world), CellCoord::new(2, 0));

        // Entity starts decay to floor.
        assert_eq!(grid.tile_at(CellCoord::new(2, 0)), Some(Tile::Floor));
        assert_eq!(grid.tile_at(CellCoord::new(1, 1)), Some(Tile::Floor));
        assert_eq!(grid.tile_at(CellCoord::new(2, 1)), Some(Tile::Floor));

        assert_eq!(grid.tile_at(CellCoord::new(0, 0)), Some(Tile::Wall));
        assert_eq!(grid.tile_at(CellCoord::new(0, 1)), Some(Tile::Key));
        assert_eq!(grid.tile_at(CellCoord::new(0, 2)), Some(Tile::Gold));
        assert_eq!(grid.tile_at(CellCoord::new(1, 2)), Some(Tile::Tree));
        assert_eq!(grid.tile_at(CellCoord::new(2, 2)), Some(Tile::Door));

        let enemies = query::enemy_view(&world).into_vec();
        assert_eq!(enemies.len(), 2);
        assert_eq!(enemies[0].id, EnemyId::new(0));
        assert_eq!(enemies[0].cell, CellCoord::new(1, 1));
        assert_eq!(enemies[0].glyph, 'k');
        assert_eq!(enemies[1].id, EnemyId::new(1));
        assert_eq!(enemies[1].cell, CellCoord::new(2, 1));
        assert_eq!(enemies[1].glyph, 'Z');
    }

    #[test]
    fn empty_source_is_rejected() {
        assert_eq!(load_world(""), Err(LoadError::EmptyMap));
    }

    #[test]
    fn ragged_rows_are_rejected() {
        assert_eq!(
            load_world("@..\n.."),
            Err(LoadError::RaggedRow {
                row: 1,
                expected: 3,
                found: 2,
            })
        );
    }

    #[test]
    fn unrecognized_symbols_are_rejected() {
        assert_eq!(
            load_world("@.\n.!"),
            Err(LoadError::UnrecognizedSymbol {
                row: 1,
                column: 1,
                symbol: '!',
            })
        );
    }

    #[test]
    fn missing_player_is_rejected() {
        assert_eq!(load_world("...\n..."), Err(LoadError::MissingPlayer));
    }

    #[test]
    fn duplicate_player_is_rejected() {
        assert_eq!(
            load_world("@.\n.@"),
            Err(LoadError::DuplicatePlayer { row: 1, column: 1 })
        );
    }
}
