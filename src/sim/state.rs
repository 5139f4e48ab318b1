//! Game session and the start / playing / over state machine
//!
//! A single owned aggregate holds everything a run needs. Renderers and input
//! handlers get it passed in explicitly.

use rand::SeedableRng;
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use super::body::Body;
use super::collision::collides;
use super::obstacle::ObstacleSet;
use crate::persistence::{ScoreStore, commit_best};
use crate::settings::Settings;

/// Current mode of the session
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum Mode {
    /// Body idles in the center, waiting for the first activate
    #[default]
    AwaitingStart,
    /// Active gameplay
    Playing,
    /// Run ended, frozen until restart
    Over,
}

/// What ended a run
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum CrashCause {
    Ground,
    Obstacle,
}

/// Things that happened during a tick, drained by the platform layer
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum GameEvent {
    /// AwaitingStart -> Playing
    Started,
    /// Impulse applied
    Flapped,
    /// New obstacle entered at the right edge
    Spawned { top_height: f32 },
    /// Current score changed
    Scored { score: u32 },
    /// Playing -> Over
    Crashed { cause: CrashCause, score: u32 },
    /// Best score committed
    BestScore { best: u32 },
    /// Over -> AwaitingStart
    Restarted,
}

/// Complete game session
#[derive(Debug, Clone)]
pub struct GameSession {
    settings: Settings,
    /// Run seed for reproducibility
    seed: u64,
    rng: Pcg32,
    mode: Mode,
    pub body: Body,
    pub obstacles: ObstacleSet,
    score: u32,
    best_score: u32,
    /// Frames simulated while playing, drives spawn cadence
    frame_count: u64,
    events: Vec<GameEvent>,
}

impl GameSession {
    /// Create a session waiting for its first activate
    pub fn new(settings: Settings, seed: u64, best_score: u32) -> Self {
        Self {
            body: Body::new(&settings),
            obstacles: ObstacleSet::new(),
            rng: Pcg32::seed_from_u64(seed),
            seed,
            settings,
            mode: Mode::AwaitingStart,
            score: 0,
            best_score,
            frame_count: 0,
            events: Vec::new(),
        }
    }

    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    pub fn seed(&self) -> u64 {
        self.seed
    }

    pub fn mode(&self) -> Mode {
        self.mode
    }

    pub fn score(&self) -> u32 {
        self.score
    }

    pub fn best_score(&self) -> u32 {
        self.best_score
    }

    /// Best score including a not-yet-committed result of the current run
    pub fn pending_best(&self) -> u32 {
        self.best_score.max(self.score)
    }

    pub fn frame_count(&self) -> u64 {
        self.frame_count
    }

    /// Take the events produced since the last drain
    pub fn drain_events(&mut self) -> Vec<GameEvent> {
        std::mem::take(&mut self.events)
    }

    /// Primary input: starts a run or flaps. Ignored once the run is over.
    pub fn activate(&mut self) {
        match self.mode {
            Mode::AwaitingStart => {
                self.mode = Mode::Playing;
                self.body.flap();
                self.events.push(GameEvent::Started);
                self.events.push(GameEvent::Flapped);
                log::info!("Run started (seed {})", self.seed);
            }
            Mode::Playing => {
                self.body.flap();
                self.events.push(GameEvent::Flapped);
            }
            Mode::Over => {}
        }
    }

    /// Advance one frame. Only `Playing` simulates; other modes stay frozen.
    pub fn step(&mut self) {
        if self.mode != Mode::Playing {
            return;
        }

        let body_step = self.body.update();
        if body_step.grounded {
            self.crash(CrashCause::Ground);
            return;
        }

        self.obstacles.advance(self.settings.scroll_speed);

        self.frame_count += 1;
        if let Some(spawned) = self
            .obstacles
            .try_spawn(self.frame_count, &self.settings, &mut self.rng)
        {
            self.events.push(GameEvent::Spawned {
                top_height: spawned.top_height,
            });
        }

        let passed = self
            .obstacles
            .consume_scoring(self.body.pos.x, self.body.radius);
        if passed > 0 {
            self.score += passed;
            self.events.push(GameEvent::Scored { score: self.score });
        }

        if collides(&self.body, &self.obstacles) {
            self.crash(CrashCause::Obstacle);
        }
    }

    fn crash(&mut self, cause: CrashCause) {
        self.mode = Mode::Over;
        self.events.push(GameEvent::Crashed {
            cause,
            score: self.score,
        });
        log::info!(
            "Run over: {:?} after {} frames, score {}",
            cause,
            self.frame_count,
            self.score
        );
    }

    /// Over -> AwaitingStart. Commits a new best, then resets the run.
    /// Returns false (and does nothing) outside `Over`.
    pub fn restart<S: ScoreStore + ?Sized>(&mut self, store: &mut S) -> bool {
        if self.mode != Mode::Over {
            log::debug!("Restart ignored in {:?}", self.mode);
            return false;
        }

        if self.score > self.best_score {
            self.best_score = self.score;
            commit_best(store, self.best_score);
            self.events.push(GameEvent::BestScore {
                best: self.best_score,
            });
            log::info!("New best score: {}", self.best_score);
        }

        self.score = 0;
        self.frame_count = 0;
        self.obstacles.clear();
        self.body.reset();
        self.mode = Mode::AwaitingStart;
        self.events.push(GameEvent::Restarted);
        true
    }

    /// Overwrite the score (tests and tooling)
    #[doc(hidden)]
    pub fn set_score(&mut self, score: u32) {
        self.score = score;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::persistence::{MemoryStore, load_best};
    use crate::sim::obstacle::Obstacle;

    fn session() -> GameSession {
        GameSession::new(Settings::default(), 42, 0)
    }

    fn drop_to_ground(s: &mut GameSession) {
        s.body.pos.y = s.body.floor_limit();
        s.body.vel = 5.0;
        s.step();
    }

    #[test]
    fn test_new_session_awaits_start() {
        let s = session();
        assert_eq!(s.mode(), Mode::AwaitingStart);
        assert_eq!(s.score(), 0);
        assert_eq!(s.frame_count(), 0);
        assert!(s.obstacles.is_empty());
        assert_eq!(s.body.pos.y, 300.0);
    }

    #[test]
    fn test_step_frozen_before_start() {
        let mut s = session();
        for _ in 0..10 {
            s.step();
        }
        assert_eq!(s.body.pos.y, 300.0);
        assert_eq!(s.frame_count(), 0);
    }

    #[test]
    fn test_activate_starts_and_flaps() {
        let mut s = session();
        s.activate();
        assert_eq!(s.mode(), Mode::Playing);
        assert_eq!(s.body.vel, -9.0);
        assert_eq!(
            s.drain_events(),
            vec![GameEvent::Started, GameEvent::Flapped]
        );
    }

    #[test]
    fn test_activate_while_playing_only_flaps() {
        let mut s = session();
        s.activate();
        s.step();
        s.drain_events();
        s.activate();
        assert_eq!(s.mode(), Mode::Playing);
        assert_eq!(s.body.vel, -9.0);
        assert_eq!(s.drain_events(), vec![GameEvent::Flapped]);
    }

    #[test]
    fn test_ground_ends_run() {
        let mut s = session();
        s.activate();
        s.body.pos.y = s.body.floor_limit() - 1.0;
        s.body.vel = 5.0;
        s.step();
        assert_eq!(s.mode(), Mode::Over);
        // Obstacles did not advance on the crash frame
        assert_eq!(s.frame_count(), 0);
        assert!(s.drain_events().contains(&GameEvent::Crashed {
            cause: CrashCause::Ground,
            score: 0
        }));
    }

    #[test]
    fn test_ceiling_is_never_fatal() {
        let mut s = session();
        s.activate();
        for _ in 0..30 {
            s.body.pos.y = s.body.radius;
            s.activate();
            s.step();
            assert_eq!(s.mode(), Mode::Playing);
        }
    }

    #[test]
    fn test_obstacle_hit_ends_run() {
        let mut s = session();
        s.activate();
        s.obstacles.push(Obstacle::new(73.0, 400.0, 150.0, 60.0));
        s.step();
        assert_eq!(s.mode(), Mode::Over);
        assert!(s.drain_events().contains(&GameEvent::Crashed {
            cause: CrashCause::Obstacle,
            score: 0
        }));
    }

    #[test]
    fn test_passing_obstacle_scores() {
        let mut s = session();
        s.activate();
        // Right edge lands at 62 after one frame, behind the body's left edge
        s.obstacles.push(Obstacle::new(5.0, 100.0, 400.0, 60.0));
        s.step();
        assert_eq!(s.score(), 1);
        assert!(s.drain_events().contains(&GameEvent::Scored { score: 1 }));
        s.step();
        assert_eq!(s.score(), 1);
    }

    #[test]
    fn test_frozen_when_over() {
        let mut s = session();
        s.activate();
        drop_to_ground(&mut s);
        assert_eq!(s.mode(), Mode::Over);
        let y = s.body.pos.y;
        s.activate();
        s.step();
        assert_eq!(s.mode(), Mode::Over);
        assert_eq!(s.body.pos.y, y);
    }

    #[test]
    fn test_restart_only_from_over() {
        let mut s = session();
        let mut store = MemoryStore::new();
        assert!(!s.restart(&mut store));
        s.activate();
        assert!(!s.restart(&mut store));
        assert_eq!(s.mode(), Mode::Playing);
    }

    #[test]
    fn test_restart_commits_better_score() {
        let mut s = GameSession::new(Settings::default(), 1, 3);
        let mut store = MemoryStore::new();
        s.activate();
        s.set_score(5);
        drop_to_ground(&mut s);
        assert_eq!(s.pending_best(), 5);
        assert_eq!(s.best_score(), 3);

        assert!(s.restart(&mut store));
        assert_eq!(s.best_score(), 5);
        assert_eq!(load_best(&store), 5);
        assert_eq!(s.score(), 0);
        assert_eq!(s.mode(), Mode::AwaitingStart);
        let events = s.drain_events();
        assert!(events.contains(&GameEvent::BestScore { best: 5 }));
        assert_eq!(events.last(), Some(&GameEvent::Restarted));
    }

    #[test]
    fn test_restart_keeps_higher_best() {
        let mut s = GameSession::new(Settings::default(), 1, 10);
        let mut store = MemoryStore::new();
        s.activate();
        s.set_score(5);
        drop_to_ground(&mut s);
        s.restart(&mut store);
        assert_eq!(s.best_score(), 10);
        assert_eq!(load_best(&store), 0);
    }
}
