//! Fixed-step frame tick
//!
//! One call per display frame. Inputs collected since the previous frame are
//! applied first, then the simulation advances by exactly one step.

use super::state::{GameSession, Mode};
use crate::persistence::ScoreStore;

/// Discrete player commands
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputEvent {
    /// Start a run or flap (click/tap/space)
    Activate,
    /// Restart control pressed
    Restart,
}

/// Input commands for a single tick
#[derive(Debug, Clone, Default)]
pub struct TickInput {
    /// Commands received since the previous tick, in arrival order
    pub events: Vec<InputEvent>,
    /// Demo mode - autopilot flaps for the player
    pub autopilot: bool,
}

impl TickInput {
    pub fn activate() -> Self {
        Self {
            events: vec![InputEvent::Activate],
            ..Default::default()
        }
    }

    pub fn restart() -> Self {
        Self {
            events: vec![InputEvent::Restart],
            ..Default::default()
        }
    }
}

/// Advance the session by one frame
pub fn tick<S: ScoreStore + ?Sized>(session: &mut GameSession, input: &TickInput, store: &mut S) {
    // Apply commands in the order they arrived so a click that lands before
    // a restart sees the mode it was aimed at
    for event in &input.events {
        match event {
            InputEvent::Activate => session.activate(),
            InputEvent::Restart => {
                session.restart(store);
            }
        }
    }

    if input.autopilot && autopilot_wants_flap(session) {
        session.activate();
    }

    session.step();
}

/// Demo controller: flap whenever the body sinks toward the bottom of the
/// next gap. Starts waiting runs on its own.
pub fn autopilot_wants_flap(session: &GameSession) -> bool {
    match session.mode() {
        Mode::AwaitingStart => true,
        Mode::Over => false,
        Mode::Playing => {
            let body = &session.body;
            if body.vel < 0.0 {
                return false;
            }

            // Aim for the lower part of the gap so one flap never reaches the top
            let floor = match session.obstacles.next_ahead(body.left()) {
                Some(obstacle) => obstacle.bottom_y,
                None => session.settings().canvas_height / 2.0 + 75.0,
            };
            let threshold = floor - body.radius - 25.0;

            body.pos.y + body.vel + body.gravity >= threshold
        }
    }
}
