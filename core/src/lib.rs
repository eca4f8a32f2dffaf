#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Core contracts shared across the Dungeon Chase engine.
//!
//! This crate defines the message surface that connects adapters, the
//! authoritative world, and pure systems. Adapters submit [`Command`] values
//! describing desired mutations, the world executes those commands via its
//! `apply` entry point, and then broadcasts [`Event`] values for systems and
//! adapters to react to deterministically. Systems consume event streams,
//! query immutable snapshots, and respond exclusively with new command
//! batches.

use std::time::Duration;

use serde::{Deserialize, Serialize};

/// Commands that express all permissible world mutations.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Command {
    /// Requests that the player advance a single step in the given direction.
    MovePlayer {
        /// Direction of travel for the attempted step.
        direction: Direction,
    },
    /// Advances the simulation clock by the provided delta time.
    Tick {
        /// Duration of simulated time that elapsed since the previous tick.
        dt: Duration,
    },
    /// Requests that an enemy advance a single step in the given direction.
    StepEnemy {
        /// Identifier of the enemy attempting to move.
        enemy_id: EnemyId,
        /// Direction of travel for the attempted step.
        direction: Direction,
    },
}

/// Events broadcast by the world after processing commands.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Event {
    /// Indicates that the simulation clock advanced.
    TimeAdvanced {
        /// Duration of simulated time that elapsed in the tick.
        dt: Duration,
    },
    /// Confirms that the player moved between two cells.
    PlayerMoved {
        /// Cell the player occupied before moving.
        from: CellCoord,
        /// Cell the player occupies after completing the move.
        to: CellCoord,
    },
    /// Reports that a player step was rejected by the terrain.
    PlayerBlocked {
        /// Direction of the rejected step.
        direction: Direction,
    },
    /// Confirms that the player unlocked a door by spending a key.
    DoorUnlocked {
        /// Cell that held the door; it is floor from now on.
        cell: CellCoord,
    },
    /// Confirms that the player picked up a key.
    KeyCollected {
        /// Cell that held the key; it is floor from now on.
        cell: CellCoord,
        /// Number of keys carried after the pickup.
        total: u32,
    },
    /// Confirms that the player picked up a pile of gold.
    GoldCollected {
        /// Cell that held the gold; it is floor from now on.
        cell: CellCoord,
        /// Amount of gold carried after the pickup.
        total: u32,
    },
    /// Confirms that an enemy moved between two cells.
    EnemyAdvanced {
        /// Identifier of the enemy that advanced.
        enemy_id: EnemyId,
        /// Cell the enemy occupied before moving.
        from: CellCoord,
        /// Cell the enemy occupies after completing the move.
        to: CellCoord,
    },
}

/// Cardinal movement directions available to the player and enemies.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Direction {
    /// Movement toward decreasing row indices.
    North,
    /// Movement toward increasing column indices.
    East,
    /// Movement toward increasing row indices.
    South,
    /// Movement toward decreasing column indices.
    West,
}

impl Direction {
    /// Cell reached by stepping once from `cell` in this direction.
    ///
    /// Returns `None` when the step would leave the low edge of the grid;
    /// the underflow is detected before any decrement so a wrapped
    /// coordinate can never be observed. The high edges are bounded by the
    /// grid itself.
    #[must_use]
    pub fn offset_from(self, cell: CellCoord) -> Option<CellCoord> {
        match self {
            Self::North => cell
                .row()
                .checked_sub(1)
                .map(|row| CellCoord::new(cell.column(), row)),
            Self::East => Some(CellCoord::new(cell.column() + 1, cell.row())),
            Self::South => Some(CellCoord::new(cell.column(), cell.row() + 1)),
            Self::West => cell
                .column()
                .checked_sub(1)
                .map(|column| CellCoord::new(column, cell.row())),
        }
    }
}

/// Unique identifier assigned to an enemy.
#[derive(
    Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize,
)]
pub struct EnemyId(u32);

impl EnemyId {
    /// Creates a new enemy identifier with the provided numeric value.
    #[must_use]
    pub const fn new(value: u32) -> Self {
        Self(value)
    }

    /// Retrieves the numeric representation of the identifier.
    #[must_use]
    pub const fn get(&self) -> u32 {
        self.0
    }
}

/// Location of a single grid cell expressed as column and row coordinates.
#[derive(
    Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize,
)]
pub struct CellCoord {
    column: u32,
    row: u32,
}

impl CellCoord {
    /// Creates a new grid cell coordinate.
    #[must_use]
    pub const fn new(column: u32, row: u32) -> Self {
        Self { column, row }
    }

    /// Zero-based column index of the cell.
    #[must_use]
    pub const fn column(&self) -> u32 {
        self.column
    }

    /// Zero-based row index of the cell.
    #[must_use]
    pub const fn row(&self) -> u32 {
        self.row
    }

    /// Computes the Manhattan distance between two cell coordinates.
    #[must_use]
    pub fn manhattan_distance(self, other: CellCoord) -> u32 {
        self.column().abs_diff(other.column()) + self.row().abs_diff(other.row())
    }
}

/// Terrain classification of a single grid cell.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Tile {
    /// Open ground that any entity may occupy.
    Floor,
    /// Solid masonry; never passable.
    Wall,
    /// Passable scenery with no interaction.
    Tree,
    /// Locked barrier; impassable until a key converts it to floor.
    Door,
    /// Collectible key; consumed on entry.
    Key,
    /// Collectible gold; consumed on entry.
    Gold,
}

impl Tile {
    /// Decodes a tile from the map source vocabulary.
    ///
    /// Returns `None` for characters outside the vocabulary; the loader
    /// decides whether those denote entities or a malformed map.
    #[must_use]
    pub const fn decode(symbol: char) -> Option<Self> {
        match symbol {
            '.' => Some(Self::Floor),
            '#' => Some(Self::Wall),
            '&' => Some(Self::Tree),
            '|' => Some(Self::Door),
            '-' => Some(Self::Key),
            '$' => Some(Self::Gold),
            _ => None,
        }
    }

    /// Character used when presenting the tile.
    #[must_use]
    pub const fn glyph(self) -> char {
        match self {
            Self::Floor => '.',
            Self::Wall => '#',
            Self::Tree => '&',
            Self::Door => '|',
            Self::Key => '-',
            Self::Gold => '$',
        }
    }

    /// Reports whether an entity may legally occupy the tile.
    ///
    /// Only walls and locked doors block movement; trees are scenery and
    /// collectibles are entered (and consumed) freely.
    #[must_use]
    pub const fn is_passable(self) -> bool {
        !matches!(self, Self::Wall | Self::Door)
    }
}

/// Keyboard command vocabulary decoded by the input bridge.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum PlayerCommand {
    /// Move the player one cell in the given direction.
    Move(Direction),
    /// Terminate the simulation.
    Quit,
}

impl PlayerCommand {
    /// Decodes a raw keystroke into a player command.
    ///
    /// `w`/`a`/`s`/`d` map to the four directions and `q` quits; every other
    /// key decodes to `None` and yields an idle tick.
    #[must_use]
    pub const fn from_key(key: char) -> Option<Self> {
        match key {
            'w' => Some(Self::Move(Direction::North)),
            'a' => Some(Self::Move(Direction::West)),
            's' => Some(Self::Move(Direction::South)),
            'd' => Some(Self::Move(Direction::East)),
            'q' => Some(Self::Quit),
            _ => None,
        }
    }
}
