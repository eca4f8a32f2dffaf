#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Fixed-tick simulation driver for Dungeon Chase.
//!
//! The driver is a two-state machine: it awaits ticks until the quit command
//! arrives, then stays terminated forever. Each tick consumes at most one
//! captured player command, lets every enemy take one pursuit step, and
//! advances the simulation clock. Wall-clock pacing and rendering belong to
//! the adapter driving the loop, not to this crate.

use std::time::Duration;

use dungeon_chase_core::{Command, Event, PlayerCommand};
use dungeon_chase_system_pursuit::Pursuit;
use dungeon_chase_world::{self as world, World};

/// Tick cadence of the reference experience.
pub const DEFAULT_TICK_INTERVAL: Duration = Duration::from_millis(160);

/// Reports whether the simulation wants another tick.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TickOutcome {
    /// The world advanced; schedule the next tick.
    Running,
    /// The quit command was observed; the world will not mutate again.
    Quit,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum State {
    AwaitingTick,
    Terminated,
}

/// Fixed-tick state machine that turns captured commands into world updates.
#[derive(Debug)]
pub struct Simulation {
    state: State,
    tick_interval: Duration,
    pursuit: Pursuit,
    command_batch: Vec<Command>,
}

impl Simulation {
    /// Creates a simulation that stamps each tick with the given interval.
    #[must_use]
    pub fn new(tick_interval: Duration) -> Self {
        Self {
            state: State::AwaitingTick,
            tick_interval,
            pursuit: Pursuit::default(),
            command_batch: Vec::new(),
        }
    }

    /// Reports whether the quit command has been observed.
    #[must_use]
    pub fn is_terminated(&self) -> bool {
        self.state == State::Terminated
    }

    /// Advances the world by one tick.
    ///
    /// The captured command is the most recent keystroke decoded by the
    /// input bridge, or `None` for an idle tick. Enemies re-plan their
    /// pursuit only on non-idle ticks, so the chase pauses while the player
    /// hesitates. A terminated simulation ignores the world entirely and
    /// keeps reporting [`TickOutcome::Quit`].
    pub fn tick(
        &mut self,
        world: &mut World,
        captured: Option<PlayerCommand>,
        out_events: &mut Vec<Event>,
    ) -> TickOutcome {
        if self.state == State::Terminated {
            return TickOutcome::Quit;
        }

        let direction = match captured {
            Some(PlayerCommand::Quit) => {
                self.state = State::Terminated;
                return TickOutcome::Quit;
            }
            Some(PlayerCommand::Move(direction)) => Some(direction),
            None => None,
        };

        if let Some(direction) = direction {
            world::apply(world, Command::MovePlayer { direction }, out_events);

            self.command_batch.clear();
            self.pursuit.plan(world, &mut self.command_batch);
            for command in self.command_batch.drain(..) {
                world::apply(world, command, out_events);
            }
        }

        world::apply(
            world,
            Command::Tick {
                dt: self.tick_interval,
            },
            out_events,
        );

        TickOutcome::Running
    }
}

impl Default for Simulation {
    fn default() -> Self {
        Self::new(DEFAULT_TICK_INTERVAL)
    }
}
