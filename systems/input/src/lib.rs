#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Pure input system translating key transitions into world commands.
//!
//! Every command fires once per physical press: repeated key-down events for a
//! key that is already held are ignored until the matching key-up arrives.

use std::collections::BTreeSet;

use furrow_core::{ActionRejection, Command, Direction, Event, Intent};
use tracing::trace;

/// Logical keys the farm understands.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Key {
    /// Walk one tile up.
    Up,
    /// Walk one tile right.
    Right,
    /// Walk one tile down.
    Down,
    /// Walk one tile left.
    Left,
    /// Plant a seed on the current tile.
    Plant,
    /// Harvest the crop on the current tile.
    Harvest,
    /// Undo the latest action.
    Undo,
    /// Redo the latest undone action.
    Redo,
}

impl Key {
    /// Command issued when the key is pressed.
    #[must_use]
    pub const fn command(self) -> Command {
        match self {
            Self::Up => Command::BeginMove {
                direction: Direction::North,
            },
            Self::Right => Command::BeginMove {
                direction: Direction::East,
            },
            Self::Down => Command::BeginMove {
                direction: Direction::South,
            },
            Self::Left => Command::BeginMove {
                direction: Direction::West,
            },
            Self::Plant => Command::Plant,
            Self::Harvest => Command::Harvest,
            Self::Undo => Command::Undo,
            Self::Redo => Command::Redo,
        }
    }
}

/// Physical transition of a key.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum KeyState {
    /// The key went down, or the platform repeated a held key.
    Pressed,
    /// The key went up.
    Released,
}

/// Key transition reported by the host engine.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct KeyEvent {
    /// Key that changed.
    pub key: Key,
    /// New state of the key.
    pub state: KeyState,
}

impl KeyEvent {
    /// Key-down transition for `key`.
    #[must_use]
    pub const fn pressed(key: Key) -> Self {
        Self {
            key,
            state: KeyState::Pressed,
        }
    }

    /// Key-up transition for `key`.
    #[must_use]
    pub const fn released(key: Key) -> Self {
        Self {
            key,
            state: KeyState::Released,
        }
    }
}

/// Edge-triggered mapper from key transitions to commands.
///
/// The mapper also tracks whether the player is mid-move from world events and
/// swallows presses while busy. Presses swallowed this way still count as held.
#[derive(Clone, Debug, Default)]
pub struct InputMapper {
    held: BTreeSet<Key>,
    busy: bool,
}

impl InputMapper {
    /// Creates a mapper with no keys held.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Whether a movement transition is in flight as far as the mapper knows.
    #[must_use]
    pub const fn busy(&self) -> bool {
        self.busy
    }

    /// Reports whether `key` is currently held.
    #[must_use]
    pub fn is_held(&self, key: Key) -> bool {
        self.held.contains(&key)
    }

    /// Consumes world events and key transitions, emitting at most one command per press.
    pub fn handle(&mut self, events: &[Event], input: &[KeyEvent], out: &mut Vec<Command>) {
        for event in events {
            match event {
                Event::MoveStarted { .. } => self.busy = true,
                Event::PlayerMoved { .. } | Event::WorldRestored => self.busy = false,
                Event::ActionRejected {
                    intent: Intent::Move,
                    reason,
                } if *reason != ActionRejection::PlayerBusy => self.busy = false,
                _ => {}
            }
        }

        for event in input {
            match event.state {
                KeyState::Pressed => {
                    if !self.held.insert(event.key) {
                        continue;
                    }
                    if self.busy {
                        trace!(key = ?event.key, "press ignored while moving");
                        continue;
                    }
                    let command = event.key.command();
                    if matches!(command, Command::BeginMove { .. }) {
                        self.busy = true;
                    }
                    out.push(command);
                }
                KeyState::Released => {
                    let _ = self.held.remove(&event.key);
                }
            }
        }
    }
}
