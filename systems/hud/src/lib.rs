#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Heads-up display model folded from world events.

use furrow_core::{ActionRejection, Event, HistoryDirection, Intent, TurnState};

/// Display model showing the turn economy and notable announcements.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Hud {
    current_turn: u32,
    actions_left: u32,
    harvested: u32,
    milestone: Option<u32>,
    last_rejection: Option<(Intent, ActionRejection)>,
    last_history_step: Option<HistoryDirection>,
}

impl Hud {
    /// Creates a display seeded from the world's current turn counters.
    #[must_use]
    pub const fn new(turn: TurnState) -> Self {
        Self {
            current_turn: turn.current_turn,
            actions_left: turn.actions_left(),
            harvested: 0,
            milestone: None,
            last_rejection: None,
            last_history_step: None,
        }
    }

    /// Folds a batch of world events into the display.
    pub fn handle(&mut self, events: &[Event]) {
        for event in events {
            match *event {
                Event::ActionTaken {
                    actions_left,
                    current_turn,
                } => {
                    self.actions_left = actions_left;
                    self.current_turn = current_turn;
                    self.last_rejection = None;
                }
                Event::TurnEnded { current_turn } => self.current_turn = current_turn,
                Event::PlantHarvested { harvested, .. } => self.harvested = harvested,
                Event::HarvestMilestone { count } => self.milestone = Some(count),
                Event::ActionRejected { intent, reason } => {
                    self.last_rejection = Some((intent, reason));
                }
                Event::HistoryApplied { direction, .. } => {
                    self.last_history_step = Some(direction);
                }
                _ => {}
            }
        }
    }

    /// Turn currently shown.
    #[must_use]
    pub const fn current_turn(&self) -> u32 {
        self.current_turn
    }

    /// Remaining actions currently shown.
    #[must_use]
    pub const fn actions_left(&self) -> u32 {
        self.actions_left
    }

    /// Harvest count from the latest harvest announcement.
    #[must_use]
    pub const fn harvested(&self) -> u32 {
        self.harvested
    }

    /// Turn counter label.
    #[must_use]
    pub fn turn_line(&self) -> String {
        format!("Turn: {}", self.current_turn)
    }

    /// Action budget label.
    #[must_use]
    pub fn actions_line(&self) -> String {
        format!("Actions Left: {}", self.actions_left)
    }

    /// Milestone announcement, once it has been reached.
    #[must_use]
    pub fn milestone_banner(&self) -> Option<String> {
        self.milestone
            .map(|count| format!("You harvested {count} plants!"))
    }

    /// Explanation of the most recent rejection, cleared by the next successful action.
    #[must_use]
    pub fn rejection_line(&self) -> Option<String> {
        self.last_rejection
            .map(|(intent, reason)| format!("{intent:?} failed: {reason}"))
    }

    /// Most recent history step, if any.
    #[must_use]
    pub const fn last_history_step(&self) -> Option<HistoryDirection> {
        self.last_history_step
    }
}
