//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - Fixed per-frame increments only (no delta-time scaling)
//! - Seeded RNG only
//! - Stable iteration order (spawn order)
//! - No rendering or platform dependencies

pub mod body;
pub mod collision;
pub mod obstacle;
pub mod state;
pub mod tick;

pub use body::{Body, BodyStep};
pub use collision::{body_obstacle_collision, collides};
pub use obstacle::{Obstacle, ObstacleSet};
pub use state::{CrashCause, GameEvent, GameSession, Mode};
pub use tick::{InputEvent, TickInput, autopilot_wants_flap, tick};
