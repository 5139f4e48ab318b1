//! The falling body the player steers
//!
//! Vertical-only motion with fixed per-frame increments. Position is clamped
//! to the surface after every integration step so the body never leaves the
//! visible area.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use crate::settings::Settings;

/// Outcome of a single integration step
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct BodyStep {
    /// Hit the ground and was clamped
    pub grounded: bool,
}

/// The player-controlled body
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Body {
    /// Center position (x is fixed for the whole run)
    pub pos: Vec2,
    /// Vertical velocity, positive = downward
    pub vel: f32,
    pub radius: f32,
    pub gravity: f32,
    /// Flap velocity (negative = upward)
    pub impulse: f32,
    /// Ground line
    ground_y: f32,
}

impl Body {
    pub fn new(settings: &Settings) -> Self {
        Self {
            pos: Vec2::new(settings.body_x, settings.canvas_height / 2.0),
            vel: 0.0,
            radius: settings.body_radius,
            gravity: settings.gravity,
            impulse: settings.impulse,
            ground_y: settings.ground_y(),
        }
    }

    /// Lowest allowed center position
    #[inline]
    pub fn floor_limit(&self) -> f32 {
        self.ground_y - self.radius
    }

    /// Horizontal extent `[left, right]`
    #[inline]
    pub fn left(&self) -> f32 {
        self.pos.x - self.radius
    }

    #[inline]
    pub fn right(&self) -> f32 {
        self.pos.x + self.radius
    }

    /// Vertical extent `[top, bottom]`
    #[inline]
    pub fn top(&self) -> f32 {
        self.pos.y - self.radius
    }

    #[inline]
    pub fn bottom(&self) -> f32 {
        self.pos.y + self.radius
    }

    /// Integrate one frame: gravity, then position, then clamp
    pub fn update(&mut self) -> BodyStep {
        let mut step = BodyStep::default();

        self.vel += self.gravity;
        self.pos.y += self.vel;

        if self.top() < 0.0 {
            self.pos.y = self.radius;
            self.vel = 0.0;
        }

        if self.bottom() > self.ground_y {
            self.pos.y = self.floor_limit();
            self.vel = 0.0;
            step.grounded = true;
        }

        step
    }

    /// Flap: overrides the current velocity, never adds to it
    pub fn flap(&mut self) {
        self.vel = self.impulse;
    }

    /// Back to the idle position in the vertical center
    pub fn reset(&mut self) {
        self.pos.y = self.ground_y / 2.0;
        self.vel = 0.0;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn body() -> Body {
        Body::new(&Settings::default())
    }

    #[test]
    fn test_new_body_centered() {
        let body = body();
        assert_eq!(body.pos, Vec2::new(80.0, 300.0));
        assert_eq!(body.vel, 0.0);
        assert_eq!(body.floor_limit(), 585.0);
    }

    #[test]
    fn test_update_applies_gravity_then_moves() {
        let mut body = body();
        let step = body.update();
        assert_eq!(step, BodyStep::default());
        assert_eq!(body.vel, 0.5);
        assert_eq!(body.pos.y, 300.5);
    }

    #[test]
    fn test_ceiling_clamp_is_silent() {
        let mut body = body();
        body.pos.y = 20.0;
        body.vel = -30.0;
        let step = body.update();
        assert!(!step.grounded);
        assert_eq!(body.pos.y, 15.0);
        assert_eq!(body.vel, 0.0);
    }

    #[test]
    fn test_ground_clamp_signals() {
        let mut body = body();
        body.pos.y = 580.0;
        body.vel = 10.0;
        let step = body.update();
        assert!(step.grounded);
        assert_eq!(body.pos.y, 585.0);
        assert_eq!(body.vel, 0.0);
    }

    #[test]
    fn test_resting_on_ground_keeps_signalling() {
        let mut body = body();
        body.pos.y = body.floor_limit();
        assert!(body.update().grounded);
        assert!(body.update().grounded);
        assert_eq!(body.pos.y, 585.0);
    }

    #[test]
    fn test_flap_overrides_velocity() {
        let mut body = body();
        body.vel = 12.0;
        body.flap();
        assert_eq!(body.vel, -9.0);
        body.vel = -20.0;
        body.flap();
        assert_eq!(body.vel, -9.0);
    }

    #[test]
    fn test_reset() {
        let mut body = body();
        body.pos.y = 42.0;
        body.vel = 7.0;
        body.reset();
        assert_eq!(body.pos.y, 300.0);
        assert_eq!(body.vel, 0.0);
        assert_eq!(body.pos.x, 80.0);
    }

    proptest! {
        #[test]
        fn prop_update_stays_in_bounds(
            start_y in 15.0f32..=585.0,
            start_vel in -200.0f32..200.0,
            frames in 1usize..200,
        ) {
            let mut body = body();
            body.pos.y = start_y;
            body.vel = start_vel;
            for _ in 0..frames {
                let step = body.update();
                prop_assert!(body.pos.y >= body.radius);
                prop_assert!(body.pos.y <= body.floor_limit());
                if step.grounded {
                    prop_assert_eq!(body.vel, 0.0);
                }
            }
        }

        #[test]
        fn prop_flap_always_yields_impulse(prior in -1000.0f32..1000.0) {
            let mut body = body();
            body.vel = prior;
            body.flap();
            prop_assert_eq!(body.vel, body.impulse);
        }

        #[test]
        fn prop_ceiling_clamp_holds_without_gravity(
            push in -100.0f32..-0.01,
            frames in 1usize..100,
        ) {
            let mut body = body();
            body.gravity = 0.0;
            for _ in 0..frames {
                body.vel = push;
                body.update();
                prop_assert!(body.pos.y >= body.radius);
            }
        }
    }
}
