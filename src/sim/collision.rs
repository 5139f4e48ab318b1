//! Collision detection between the body and obstacles
//!
//! The body is treated as its axis-aligned bounding box: a hit is any
//! horizontal overlap with an obstacle while the body pokes out of the gap.

use super::body::Body;
use super::obstacle::{Obstacle, ObstacleSet};

/// Check the body against a single obstacle
pub fn body_obstacle_collision(body: &Body, obstacle: &Obstacle) -> bool {
    let overlaps_x = body.right() > obstacle.x && body.left() < obstacle.right();
    if !overlaps_x {
        return false;
    }
    body.top() < obstacle.top_height || body.bottom() > obstacle.bottom_y
}

/// True if the body hits any obstacle (short-circuits on the first hit)
pub fn collides(body: &Body, obstacles: &ObstacleSet) -> bool {
    obstacles
        .iter()
        .any(|obstacle| body_obstacle_collision(body, obstacle))
}
