//! Gapped obstacles and the ordered set that spawns, scrolls and retires them

use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::settings::Settings;

/// A paired top/bottom barrier with a passable gap between them
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Obstacle {
    /// Left edge
    pub x: f32,
    /// Height of the top segment (gap starts here)
    pub top_height: f32,
    /// Where the bottom segment starts (top_height + gap, fixed at creation)
    pub bottom_y: f32,
    pub width: f32,
    /// Body already passed this one
    pub scored: bool,
}

impl Obstacle {
    pub fn new(x: f32, top_height: f32, gap: f32, width: f32) -> Self {
        Self {
            x,
            top_height,
            bottom_y: top_height + gap,
            width,
            scored: false,
        }
    }

    #[inline]
    pub fn right(&self) -> f32 {
        self.x + self.width
    }
}

/// Active obstacles in spawn order (front = oldest, nearest the body)
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ObstacleSet {
    obstacles: Vec<Obstacle>,
}

impl ObstacleSet {
    pub fn new() -> Self {
        Self {
            obstacles: Vec::new(),
        }
    }

    pub fn len(&self) -> usize {
        self.obstacles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.obstacles.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Obstacle> {
        self.obstacles.iter()
    }

    pub fn as_slice(&self) -> &[Obstacle] {
        &self.obstacles
    }

    pub fn push(&mut self, obstacle: Obstacle) {
        self.obstacles.push(obstacle);
    }

    pub fn clear(&mut self) {
        self.obstacles.clear();
    }

    /// Append a new obstacle at the right edge when `frame` is a multiple of
    /// `spawn_period`. Returns the spawned obstacle.
    pub fn try_spawn<R: Rng>(
        &mut self,
        frame: u64,
        settings: &Settings,
        rng: &mut R,
    ) -> Option<&Obstacle> {
        if settings.spawn_period == 0 || frame % settings.spawn_period != 0 {
            return None;
        }

        // Whole pixels, both ends reachable
        let min = settings.min_top_height;
        let lo = min.ceil() as u32;
        let hi = (settings.max_top_height().floor() as u32).max(lo);
        let top_height = (rng.random_range(lo..=hi) as f32).max(min);

        self.obstacles.push(Obstacle::new(
            settings.canvas_width,
            top_height,
            settings.gap_size,
            settings.obstacle_width,
        ));
        log::debug!("Spawned obstacle at frame {} (top {})", frame, top_height);
        self.obstacles.last()
    }

    /// Scroll everything left, then drop obstacles fully past the left edge
    pub fn advance(&mut self, speed: f32) {
        for obstacle in &mut self.obstacles {
            obstacle.x -= speed;
        }
        self.obstacles.retain(|o| o.right() >= 0.0);
    }

    /// Mark obstacles the body has fully passed. Each obstacle reports once.
    pub fn consume_scoring(&mut self, body_x: f32, body_radius: f32) -> u32 {
        let body_left = body_x - body_radius;
        let mut passed = 0;
        for obstacle in self.obstacles.iter_mut().filter(|o| !o.scored) {
            if obstacle.right() < body_left {
                obstacle.scored = true;
                passed += 1;
            }
        }
        passed
    }

    /// First obstacle the body has not yet passed
    pub fn next_ahead(&self, body_left: f32) -> Option<&Obstacle> {
        self.obstacles.iter().find(|o| o.right() >= body_left)
    }
}

impl<'a> IntoIterator for &'a ObstacleSet {
    type Item = &'a Obstacle;
    type IntoIter = std::slice::Iter<'a, Obstacle>;

    fn into_iter(self) -> Self::IntoIter {
        self.obstacles.iter()
    }
}
