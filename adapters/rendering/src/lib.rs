#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Shared rendering contracts for Dungeon Chase adapters.
//!
//! The simulation never talks to a terminal directly; it is flattened into a
//! [`Scene`] of tinted glyphs that any backend can present. Backends receive
//! one scene per tick and decide how colors and cursor movement map onto
//! their medium.

use anyhow::Result as AnyResult;
use dungeon_chase_core::Tile;
use dungeon_chase_world::{query, World};

/// Presentation class of a single glyph, mapped to a color by backends.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Tint {
    /// The player's glyph.
    Player,
    /// Any enemy glyph.
    Enemy,
    /// Open floor.
    Floor,
    /// Solid wall.
    Wall,
    /// Tree scenery.
    Tree,
    /// Locked door.
    Door,
    /// Uncollected key.
    Key,
    /// Uncollected gold.
    Gold,
}

/// One renderable character cell.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Glyph {
    /// Character shown at the cell.
    pub symbol: char,
    /// Presentation class used to color the character.
    pub tint: Tint,
}

/// Flattened, backend-agnostic view of one world snapshot.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Scene {
    columns: u32,
    glyphs: Vec<Glyph>,
    keys: u32,
    gold: u32,
}

impl Scene {
    /// Number of glyph columns per row.
    #[must_use]
    pub const fn columns(&self) -> u32 {
        self.columns
    }

    /// Iterates over the scene's rows in top-to-bottom order.
    pub fn rows(&self) -> impl Iterator<Item = &[Glyph]> {
        self.glyphs.chunks(self.columns.max(1) as usize)
    }

    /// Number of keys reported in the inventory summary.
    #[must_use]
    pub const fn keys(&self) -> u32 {
        self.keys
    }

    /// Amount of gold reported in the inventory summary.
    #[must_use]
    pub const fn gold(&self) -> u32 {
        self.gold
    }
}

/// Flattens a world snapshot into a scene.
///
/// Cells show the player above any enemy above the terrain; enemies keep
/// their stable order, so the first enemy on a contested cell wins it.
#[must_use]
pub fn compose_scene(world: &World) -> Scene {
    let grid = query::tile_grid(world);
    let mut glyphs: Vec<Glyph> = grid
        .tiles()
        .iter()
        .map(|tile| Glyph {
            symbol: tile.glyph(),
            tint: tile_tint(*tile),
        })
        .collect();

    for enemy in query::enemy_view(world).into_vec().into_iter().rev() {
        if let Some(index) = grid.index_of(enemy.cell) {
            glyphs[index] = Glyph {
                symbol: enemy.glyph,
                tint: Tint::Enemy,
            };
        }
    }

    if let Some(index) = grid.index_of(query::player(world)) {
        glyphs[index] = Glyph {
            symbol: '@',
            tint: Tint::Player,
        };
    }

    let inventory = query::inventory(world);
    Scene {
        columns: grid.columns(),
        glyphs,
        keys: inventory.keys(),
        gold: inventory.gold(),
    }
}

const fn tile_tint(tile: Tile) -> Tint {
    match tile {
        Tile::Floor => Tint::Floor,
        Tile::Wall => Tint::Wall,
        Tile::Tree => Tint::Tree,
        Tile::Door => Tint::Door,
        Tile::Key => Tint::Key,
        Tile::Gold => Tint::Gold,
    }
}

/// Rendering backend capable of presenting Dungeon Chase scenes.
pub trait RenderingBackend {
    /// Presents a single scene, replacing whatever was shown before.
    fn present(&mut self, scene: &Scene) -> AnyResult<()>;
}
