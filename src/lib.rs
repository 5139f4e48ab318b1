//! Flappy Bird - A single-screen canvas arcade game
//!
//! Core modules:
//! - `sim`: Deterministic simulation (body physics, obstacles, collisions, game state)
//! - `renderer`: Display-list drawing of the current session
//! - `platform`: Input event queue and key/pointer mapping
//! - `persistence`: Best score storage behind a key-value store
//! - `settings`: Data-driven game tuning

pub mod persistence;
pub mod platform;
pub mod renderer;
pub mod settings;
pub mod sim;

pub use persistence::{LocalStore, MemoryStore, ScoreStore, StoreError};
pub use settings::{Settings, SettingsError};

/// Game configuration constants
///
/// All physics values are per-frame increments: the simulation assumes the
/// frame callback fires at a roughly constant rate and never scales by
/// elapsed wall-clock time.
pub mod consts {
    /// Logical canvas size (origin top-left, y grows downward)
    pub const CANVAS_WIDTH: f32 = 400.0;
    pub const CANVAS_HEIGHT: f32 = 600.0;

    /// Body defaults
    pub const BODY_X: f32 = 80.0;
    pub const BODY_RADIUS: f32 = 15.0;
    /// Downward acceleration added to velocity every frame
    pub const GRAVITY: f32 = 0.5;
    /// Velocity override on flap (negative = upward)
    pub const IMPULSE: f32 = -9.0;

    /// Obstacle defaults
    pub const OBSTACLE_WIDTH: f32 = 60.0;
    pub const GAP_SIZE: f32 = 150.0;
    /// Frames between obstacle spawns
    pub const SPAWN_PERIOD: u64 = 90;
    /// Horizontal scroll per frame
    pub const SCROLL_SPEED: f32 = 3.0;
    /// Smallest allowed top segment height
    pub const MIN_TOP_HEIGHT: f32 = 50.0;
    /// Clearance kept between the bottom segment and the ground
    pub const GROUND_MARGIN: f32 = 100.0;

    /// Storage keys
    pub const BEST_SCORE_KEY: &str = "flappyBirdBest";
    pub const SETTINGS_KEY: &str = "flappy_settings";
}
