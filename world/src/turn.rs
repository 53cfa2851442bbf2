//! Action budget and turn counter.

use furrow_core::TurnState;

/// Outcome of spending one action.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TurnProgress {
    /// The current turn still has actions available.
    Continuing,
    /// The budget was exhausted and a new turn began.
    TurnEnded,
}

/// Counts committed actions and rolls the turn over when the budget runs out.
#[derive(Clone, Debug)]
pub struct TurnController {
    actions_per_turn: u32,
    action_count: u32,
    current_turn: u32,
}

impl TurnController {
    /// Creates a controller at the start of turn one.
    ///
    /// A zero budget is clamped to one action per turn.
    #[must_use]
    pub fn new(actions_per_turn: u32) -> Self {
        Self {
            actions_per_turn: actions_per_turn.max(1),
            action_count: 0,
            current_turn: 1,
        }
    }

    /// Spends one action, ending the turn when the budget is exhausted.
    pub fn action_taken(&mut self) -> TurnProgress {
        self.action_count += 1;
        if self.action_count >= self.actions_per_turn {
            self.action_count = 0;
            self.current_turn += 1;
            TurnProgress::TurnEnded
        } else {
            TurnProgress::Continuing
        }
    }

    /// Overwrites the counters with values captured in a snapshot.
    pub fn restore(&mut self, action_count: u32, current_turn: u32) {
        self.action_count = action_count.min(self.actions_per_turn - 1);
        self.current_turn = current_turn.max(1);
    }

    /// Actions still available in the current turn.
    #[must_use]
    pub const fn actions_left(&self) -> u32 {
        self.actions_per_turn - self.action_count
    }

    /// Actions spent in the current turn.
    #[must_use]
    pub const fn action_count(&self) -> u32 {
        self.action_count
    }

    /// Turn currently in progress.
    #[must_use]
    pub const fn current_turn(&self) -> u32 {
        self.current_turn
    }

    /// Actions available per turn.
    #[must_use]
    pub const fn actions_per_turn(&self) -> u32 {
        self.actions_per_turn
    }

    /// Read-only summary of the counters.
    #[must_use]
    pub const fn state(&self) -> TurnState {
        TurnState {
            current_turn: self.current_turn,
            action_count: self.action_count,
            actions_per_turn: self.actions_per_turn,
        }
    }
}
