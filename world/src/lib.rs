#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Authoritative world state management for Dungeon Chase.

mod grid;
mod loader;

pub use grid::TileGrid;
pub use loader::{load_world, LoadError};

use dungeon_chase_core::{CellCoord, Command, Direction, EnemyId, Event, Tile};

/// Resource counters carried by the player.
///
/// Counters only grow; keys are spent by converting a door tile to floor in
/// the same step that decrements the count, so the total never observes an
/// intermediate state.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Inventory {
    keys: u32,
    gold: u32,
}

impl Inventory {
    /// Number of unspent keys the player carries.
    #[must_use]
    pub const fn keys(&self) -> u32 {
        self.keys
    }

    /// Amount of gold the player has collected.
    #[must_use]
    pub const fn gold(&self) -> u32 {
        self.gold
    }
}

#[derive(Clone, Debug, PartialEq)]
struct Enemy {
    id: EnemyId,
    cell: CellCoord,
    glyph: char,
}

/// Represents the authoritative Dungeon Chase world state.
///
/// Constructed exclusively by [`load_world`]; every mutation flows through
/// [`apply`] so systems and adapters observe a single consistent unit of
/// state per tick.
#[derive(Clone, Debug, PartialEq)]
pub struct World {
    grid: TileGrid,
    player: CellCoord,
    inventory: Inventory,
    enemies: Vec<Enemy>,
    tick_index: u64,
}

impl World {
    fn enemy_mut(&mut self, enemy_id: EnemyId) -> Option<&mut Enemy> {
        self.enemies.iter_mut().find(|enemy| enemy.id == enemy_id)
    }

    fn resolve_player_move(&mut self, direction: Direction, out_events: &mut Vec<Event>) {
        let Some(candidate) = direction.offset_from(self.player) else {
            out_events.push(Event::PlayerBlocked { direction });
            return;
        };

        if !self.grid.in_bounds(candidate) {
            // Well-formed maps wall their perimeter; an escape attempt is
            // still rejected rather than trusted.
            out_events.push(Event::PlayerBlocked { direction });
            return;
        }

        if self.grid.tile_at(candidate) == Some(Tile::Door) && self.inventory.keys > 0 {
            self.inventory.keys -= 1;
            self.grid.set_tile(candidate, Tile::Floor);
            out_events.push(Event::DoorUnlocked { cell: candidate });
        }

        if !self.grid.is_passable(candidate) {
            out_events.push(Event::PlayerBlocked { direction });
            return;
        }

        let from = self.player;
        self.player = candidate;
        out_events.push(Event::PlayerMoved {
            from,
            to: candidate,
        });

        match self.grid.tile_at(candidate) {
            Some(Tile::Key) => {
                self.inventory.keys += 1;
                self.grid.set_tile(candidate, Tile::Floor);
                out_events.push(Event::KeyCollected {
                    cell: candidate,
                    total: self.inventory.keys,
                });
            }
            Some(Tile::Gold) => {
                self.inventory.gold += 1;
                self.grid.set_tile(candidate, Tile::Floor);
                out_events.push(Event::GoldCollected {
                    cell: candidate,
                    total: self.inventory.gold,
                });
            }
            _ => {}
        }
    }

    fn resolve_enemy_step(
        &mut self,
        enemy_id: EnemyId,
        direction: Direction,
        out_events: &mut Vec<Event>,
    ) {
        let Some(enemy) = self.enemies.iter().find(|enemy| enemy.id == enemy_id) else {
            return;
        };

        let Some(candidate) = direction.offset_from(enemy.cell) else {
            return;
        };

        if !self.grid.is_passable(candidate) {
            return;
        }

        let Some(enemy) = self.enemy_mut(enemy_id) else {
            return;
        };
        let from = enemy.cell;
        enemy.cell = candidate;
        out_events.push(Event::EnemyAdvanced {
            enemy_id,
            from,
            to: candidate,
        });
    }
}

/// Applies the provided command to the world, mutating state deterministically.
///
/// Player movement is the interaction engine of the simulation: a single
/// atomic step that may unlock a door, move the player, and consume a
/// collectible before returning. Enemy steps only relocate the enemy; they
/// never mutate terrain or inventory.
pub fn apply(world: &mut World, command: Command, out_events: &mut Vec<Event>) {
    match command {
        Command::MovePlayer { direction } => {
            world.resolve_player_move(direction, out_events);
        }
        Command::Tick { dt } => {
            world.tick_index = world.tick_index.saturating_add(1);
            out_events.push(Event::TimeAdvanced { dt });
        }
        Command::StepEnemy {
            enemy_id,
            direction,
        } => {
            world.resolve_enemy_step(enemy_id, direction, out_events);
        }
    }
}

/// Query functions that provide read-only access to the world state.
pub mod query {
    use super::{Inventory, TileGrid, World};
    use dungeon_chase_core::{CellCoord, EnemyId};

    /// Provides read-only access to the world's tile grid.
    #[must_use]
    pub fn tile_grid(world: &World) -> &TileGrid {
        &world.grid
    }

    /// Cell currently occupied by the player.
    #[must_use]
    pub fn player(world: &World) -> CellCoord {
        world.player
    }

    /// Resource counters carried by the player.
    #[must_use]
    pub fn inventory(world: &World) -> Inventory {
        world.inventory
    }

    /// Number of ticks the world has processed.
    #[must_use]
    pub fn tick_index(world: &World) -> u64 {
        world.tick_index
    }

    /// Captures a read-only view of the enemies inhabiting the world.
    #[must_use]
    pub fn enemy_view(world: &World) -> EnemyView {
        let mut snapshots: Vec<EnemySnapshot> = world
            .enemies
            .iter()
            .map(|enemy| EnemySnapshot {
                id: enemy.id,
                cell: enemy.cell,
                glyph: enemy.glyph,
            })
            .collect();
        snapshots.sort_by_key(|snapshot| snapshot.id);
        EnemyView { snapshots }
    }

    /// Read-only snapshot describing all enemies within the world.
    #[derive(Clone, Debug, Default)]
    pub struct EnemyView {
        snapshots: Vec<EnemySnapshot>,
    }

    impl EnemyView {
        /// Iterator over the captured enemy snapshots in deterministic order.
        pub fn iter(&self) -> impl Iterator<Item = &EnemySnapshot> {
            self.snapshots.iter()
        }

        /// Consumes the view, yielding the underlying snapshots.
        #[must_use]
        pub fn into_vec(self) -> Vec<EnemySnapshot> {
            self.snapshots
        }
    }

    /// Immutable representation of a single enemy's state used for queries.
    #[derive(Clone, Copy, Debug, PartialEq, Eq)]
    pub struct EnemySnapshot {
        /// Unique identifier assigned to the enemy.
        pub id: EnemyId,
        /// Grid cell currently occupied by the enemy.
        pub cell: CellCoord,
        /// Character used when presenting the enemy.
        pub glyph: char,
    }
}
