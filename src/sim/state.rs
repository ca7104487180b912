//! Session state and core simulation types
//!
//! The whole mutable state of a run lives on the [`Session`] aggregate:
//! entities, life, score, timers and the pause/resume machinery. One writer
//! per tick, no free-floating module state.

use glam::Vec2;
use rand::SeedableRng;
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use super::{spawn, timer::Interval};
use crate::config::{Config, RawConfig};
use crate::consts::*;
use crate::ms_to_ticks;

/// Obstacle size class - determines sprite size and spawn probability
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SizeClass {
    Large,
    Small,
}

impl SizeClass {
    /// Sprite side length
    pub fn size(&self) -> f32 {
        match self {
            SizeClass::Large => OBSTACLE_LARGE_SIZE,
            SizeClass::Small => OBSTACLE_SMALL_SIZE,
        }
    }
}

/// Pickup variants
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PickupKind {
    /// Restores one life when collected below the cap
    Health,
}

impl PickupKind {
    pub fn size(&self) -> f32 {
        match self {
            PickupKind::Health => PICKUP_SIZE,
        }
    }
}

/// A moving obstacle. Positions are the top-left corner of a square sprite.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Obstacle {
    pub id: u32,
    pub pos: Vec2,
    pub class: SizeClass,
}

impl Obstacle {
    pub fn size(&self) -> f32 {
        self.class.size()
    }

    pub fn center(&self) -> Vec2 {
        self.pos + self.size() / 2.0
    }
}

/// A stationary restorative pickup
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Pickup {
    pub id: u32,
    pub pos: Vec2,
    pub kind: PickupKind,
}

impl Pickup {
    pub fn size(&self) -> f32 {
        self.kind.size()
    }

    pub fn center(&self) -> Vec2 {
        self.pos + self.size() / 2.0
    }
}

/// Current phase of the session
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Phase {
    /// Timers stopped, configuration panel open. Initial state.
    Paused,
    /// Active play
    Running,
    /// Life exhausted - paused with a terminal message; resume is allowed
    GameOver,
}

/// Severity tag attached to every status line, mapped to a display color
/// by the render sink
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Severity {
    Damage,
    Heal,
    Default,
}

/// Status line published to the render sink
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Status {
    /// Configuration applied, waiting for the first resume
    Ready,
    /// Shown when a run starts or resumes
    Resumed,
    /// Restored once an invulnerability window ends mid-run
    Playing,
    /// Manual pause
    Paused,
    /// A hit landed; carries the remaining life
    Damaged { life: u32 },
    /// Terminal line; carries the survival time in whole seconds
    GameOver { score: u32 },
    /// A health pickup restored a life
    Healed,
    /// A health pickup was collected at full life
    LifeFull,
}

impl Status {
    pub fn severity(&self) -> Severity {
        match self {
            Status::Paused | Status::Damaged { .. } | Status::GameOver { .. } => Severity::Damage,
            Status::Healed => Severity::Heal,
            Status::Ready | Status::Resumed | Status::Playing | Status::LifeFull => {
                Severity::Default
            }
        }
    }

    pub fn text(&self) -> String {
        match self {
            Status::Ready => "Settings applied. Press Enter to play.".into(),
            Status::Resumed => "Game on. Good luck!".into(),
            Status::Playing => "Game on...".into(),
            Status::Paused => "Paused. Press Enter to resume.".into(),
            Status::Damaged { life } => format!("Hit! Lives left: {life}."),
            Status::GameOver { score } => format!("Game over. Survival time: {score}s."),
            Status::Healed => "Health restored!".into(),
            Status::LifeFull => "Already at full health. Keep dodging!".into(),
        }
    }
}

/// Complete session state
#[derive(Debug, Clone)]
pub struct Session {
    /// Active configuration; swapped only through [`Session::apply_config`]
    pub config: Config,
    pub phase: Phase,
    /// Player sprite top-left, clamped to the field
    pub player_pos: Vec2,
    /// Current life, always within `[0, config.start_life]`
    pub life: u32,
    /// Whole seconds survived since the last resume
    pub score: u32,
    /// Damage-suppression countdown in ticks; 0 = vulnerable
    pub invuln_ticks: u32,
    pub obstacles: Vec<Obstacle>,
    pub pickups: Vec<Pickup>,
    /// Latest status line for the render sink
    pub status: Status,
    /// Run seed for reproducibility
    pub seed: u64,
    pub(crate) rng: Pcg32,
    score_timer: Interval,
    obstacle_timer: Interval,
    pickup_timer: Interval,
    /// Next entity id; monotonically increasing, never reused
    next_id: u32,
}

impl Session {
    /// Create a session in the initial paused state, already reset
    pub fn new(config: Config, seed: u64) -> Self {
        let mut session = Self {
            config,
            phase: Phase::Paused,
            player_pos: Vec2::ZERO,
            life: config.start_life,
            score: 0,
            invuln_ticks: 0,
            obstacles: Vec::new(),
            pickups: Vec::new(),
            status: Status::Ready,
            seed,
            rng: Pcg32::seed_from_u64(seed),
            score_timer: Interval::new(ms_to_ticks(SCORE_TICK_MS)),
            obstacle_timer: Interval::new(ms_to_ticks(OBSTACLE_SPAWN_MS)),
            pickup_timer: Interval::new(ms_to_ticks(PICKUP_SPAWN_MS)),
            next_id: 1,
        };
        session.reset();
        log::debug!("session created with seed {seed}");
        session
    }

    pub fn is_running(&self) -> bool {
        self.phase == Phase::Running
    }

    /// Allocate a fresh entity id
    pub fn next_entity_id(&mut self) -> u32 {
        let id = self.next_id;
        self.next_id += 1;
        id
    }

    /// Insert an obstacle with a freshly allocated id
    pub fn add_obstacle(&mut self, pos: Vec2, class: SizeClass) -> u32 {
        let id = self.next_entity_id();
        self.obstacles.push(Obstacle { id, pos, class });
        id
    }

    /// Insert a pickup with a freshly allocated id
    pub fn add_pickup(&mut self, pos: Vec2, kind: PickupKind) -> u32 {
        let id = self.next_entity_id();
        self.pickups.push(Pickup { id, pos, kind });
        id
    }

    /// Remove a pickup by id; unknown ids are a no-op
    pub fn remove_pickup(&mut self, id: u32) {
        self.pickups.retain(|p| p.id != id);
    }

    /// Paused -> Running. Restarts the score counter and both spawn
    /// generators (canceling any stale cadence) and clears pause markers.
    pub fn resume(&mut self) {
        if self.is_running() {
            return;
        }
        self.phase = Phase::Running;
        self.score = 0;
        self.score_timer.start();
        self.obstacle_timer.start();
        self.pickup_timer.start();
        self.status = Status::Resumed;
        log::info!("session resumed (life {}/{})", self.life, self.config.start_life);
    }

    /// Running -> Paused. Cancels the score counter and both spawn
    /// generators; idempotent, so a second call changes nothing.
    pub fn pause(&mut self) {
        self.score_timer.cancel();
        self.obstacle_timer.cancel();
        self.pickup_timer.cancel();
        if self.phase == Phase::Running {
            self.phase = Phase::Paused;
            log::info!("session paused at {}s", self.score);
        }
        if self.phase == Phase::Paused {
            self.status = Status::Paused;
        }
    }

    /// Pause/resume toggle, the single discrete input trigger
    pub fn toggle(&mut self) {
        if self.is_running() {
            self.pause();
        } else {
            self.resume();
        }
    }

    /// Life exhausted: the pause path with a terminal flavor
    pub(crate) fn game_over(&mut self) {
        self.pause();
        self.phase = Phase::GameOver;
        self.status = Status::GameOver { score: self.score };
        log::info!("game over after {}s", self.score);
    }

    /// Begin a damage-suppression window
    pub(crate) fn start_invulnerability(&mut self) {
        self.invuln_ticks = self.config.invulnerability_ticks();
    }

    /// Clamp raw configuration input, store it, and restart the session.
    /// Always forces a pause first; the session stays paused afterwards.
    pub fn apply_config(&mut self, raw: &RawConfig) {
        self.pause();
        self.config = self.config.clamped(raw);
        self.reset();
        self.status = Status::Ready;
        log::info!(
            "config applied: enemies={} speed={} life={}",
            self.config.num_enemies,
            self.config.speed_factor,
            self.config.start_life
        );
    }

    /// Recenter the player, restore life, clear invulnerability, destroy all
    /// entities and scatter the configured starting obstacles. Timers are
    /// left alone; the session stays paused.
    pub fn reset(&mut self) {
        self.player_pos = Vec2::new(
            FIELD_WIDTH / 2.0 - PLAYER_SIZE / 2.0,
            FIELD_HEIGHT / 2.0 - PLAYER_SIZE / 2.0,
        );
        self.life = self.config.start_life;
        self.invuln_ticks = 0;
        self.obstacles.clear();
        self.pickups.clear();
        spawn::scatter_initial(self);
    }

    /// Translate a pointer position in field coordinates into the clamped
    /// player sprite position (the pointer sits at the sprite center)
    pub fn set_pointer(&mut self, pointer: Vec2) {
        let max = Vec2::new(FIELD_WIDTH - PLAYER_SIZE, FIELD_HEIGHT - PLAYER_SIZE);
        self.player_pos = (pointer - PLAYER_SIZE / 2.0).clamp(Vec2::ZERO, max);
    }

    pub fn player_center(&self) -> Vec2 {
        self.player_pos + PLAYER_SIZE / 2.0
    }

    /// Advance the periodic timers by one tick.
    /// Returns `(score_fired, obstacle_fired, pickup_fired)`.
    pub(crate) fn tick_timers(&mut self) -> (bool, bool, bool) {
        (
            self.score_timer.tick(),
            self.obstacle_timer.tick(),
            self.pickup_timer.tick(),
        )
    }
}
