//! Drives a world from text tokens and prints what changed.

use std::io::Write;

use anyhow::Result;
use furrow_core::{Command, Event};
use furrow_system_bootstrap::{Bootstrap, FieldLayout};
use furrow_system_hud::Hud;
use furrow_system_input::{InputMapper, KeyEvent};
use furrow_world::{self as world, query, World};
use tracing::debug;

use crate::script::Token;

/// One play session: the world plus the systems around it.
#[derive(Debug)]
pub(crate) struct Session {
    world: World,
    layout: FieldLayout,
    bootstrap: Bootstrap,
    input: InputMapper,
    hud: Hud,
    pending: Vec<Event>,
}

impl Session {
    pub(crate) fn new(world: World, layout: FieldLayout) -> Self {
        let hud = Hud::new(query::turn_state(&world));
        Self {
            world,
            layout,
            bootstrap: Bootstrap,
            input: InputMapper::new(),
            hud,
            pending: Vec::new(),
        }
    }

    pub(crate) fn world(&self) -> &World {
        &self.world
    }

    pub(crate) fn greet(&self, out: &mut impl Write) -> Result<()> {
        writeln!(out, "{}", self.bootstrap.welcome_banner(&self.world))?;
        self.print_status(out)
    }

    /// Executes one token, writing notable outcomes to `out`.
    pub(crate) fn run(&mut self, token: Token, out: &mut impl Write) -> Result<()> {
        match token {
            Token::Status => self.print_status(out),
            Token::Map => {
                write!(out, "{}", self.bootstrap.field_view(&self.world, &self.layout))?;
                Ok(())
            }
            Token::Key(key) => {
                let mut commands = Vec::new();
                let events = std::mem::take(&mut self.pending);
                self.input.handle(
                    &events,
                    &[KeyEvent::pressed(key), KeyEvent::released(key)],
                    &mut commands,
                );

                let mut events = Vec::new();
                for command in commands {
                    world::apply(&mut self.world, command, &mut events);
                    if events
                        .iter()
                        .any(|event| matches!(event, Event::MoveStarted { .. }))
                        && query::move_in_flight(&self.world)
                    {
                        // No animation to wait for on a terminal.
                        world::apply(&mut self.world, Command::CompleteMove, &mut events);
                    }
                }

                self.hud.handle(&events);
                for event in &events {
                    debug!(?event, "world event");
                    describe(event, out)?;
                }
                self.pending = events;
                Ok(())
            }
        }
    }

    fn print_status(&self, out: &mut impl Write) -> Result<()> {
        writeln!(out, "{}", self.hud.turn_line())?;
        writeln!(out, "{}", self.hud.actions_line())?;
        if let Some(banner) = self.hud.milestone_banner() {
            writeln!(out, "{banner}")?;
        }
        Ok(())
    }
}

fn describe(event: &Event, out: &mut impl Write) -> Result<()> {
    match event {
        Event::PlayerMoved { to, .. } => writeln!(out, "moved to {to}")?,
        Event::PlantSpawned { tile, species } => writeln!(out, "planted {species} at {tile}")?,
        Event::PlantHarvested {
            tile,
            species,
            harvested,
        } => writeln!(out, "harvested {species} at {tile} ({harvested} total)")?,
        Event::PlantRipened { tile, species } => writeln!(out, "{species} at {tile} is ripe")?,
        Event::TurnEnded { current_turn } => writeln!(out, "Turn: {current_turn}")?,
        Event::HarvestMilestone { count } => {
            writeln!(out, "You harvested {count} plants!")?;
        }
        Event::ActionRejected { intent, reason } => {
            writeln!(out, "{intent:?} rejected: {reason}")?;
        }
        Event::HistoryApplied { direction, effect } => {
            writeln!(out, "{direction:?}: {effect:?}")?;
        }
        Event::ActionTaken { actions_left, .. } => {
            writeln!(out, "Actions Left: {actions_left}")?;
        }
        Event::MoveStarted { .. } | Event::PlantGrew { .. } | Event::WorldRestored => {}
    }
    Ok(())
}
