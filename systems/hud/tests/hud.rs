use furrow_core::{
    Action, ActionRejection, Event, HistoryDirection, Intent, Species, TilePosition, TurnState,
};
use furrow_system_hud::Hud;

fn fresh() -> Hud {
    Hud::new(TurnState {
        current_turn: 1,
        action_count: 0,
        actions_per_turn: 10,
    })
}

#[test]
fn starts_from_world_counters() {
    let hud = fresh();
    assert_eq!(hud.turn_line(), "Turn: 1");
    assert_eq!(hud.actions_line(), "Actions Left: 10");
    assert_eq!(hud.milestone_banner(), None);
    assert_eq!(hud.rejection_line(), None);
}

#[test]
fn action_and_turn_events_update_labels() {
    let mut hud = fresh();
    hud.handle(&[Event::ActionTaken {
        actions_left: 7,
        current_turn: 1,
    }]);
    assert_eq!(hud.actions_line(), "Actions Left: 7");

    hud.handle(&[
        Event::TurnEnded { current_turn: 2 },
        Event::ActionTaken {
            actions_left: 10,
            current_turn: 2,
        },
    ]);
    assert_eq!(hud.turn_line(), "Turn: 2");
    assert_eq!(hud.actions_left(), 10);
}

#[test]
fn rejection_shows_until_next_success() {
    let mut hud = fresh();
    hud.handle(&[Event::ActionRejected {
        intent: Intent::Harvest,
        reason: ActionRejection::NotReady,
    }]);
    assert_eq!(
        hud.rejection_line().as_deref(),
        Some("Harvest failed: crop is not ready to harvest")
    );

    hud.handle(&[Event::ActionTaken {
        actions_left: 9,
        current_turn: 1,
    }]);
    assert_eq!(hud.rejection_line(), None);
}

#[test]
fn milestone_and_history_are_remembered() {
    let mut hud = fresh();
    hud.handle(&[
        Event::PlantHarvested {
            tile: TilePosition::new(5, 5),
            species: Species::Tomato,
            harvested: 30,
        },
        Event::HarvestMilestone { count: 30 },
        Event::HistoryApplied {
            direction: HistoryDirection::Undo,
            effect: Action::Plant {
                species: Species::Tomato,
                tile: TilePosition::new(5, 5),
            },
        },
    ]);

    assert_eq!(hud.harvested(), 30);
    assert_eq!(
        hud.milestone_banner().as_deref(),
        Some("You harvested 30 plants!")
    );
    assert_eq!(hud.last_history_step(), Some(HistoryDirection::Undo));
}
