//! Render sink boundary
//!
//! The core publishes a plain-data snapshot once per tick; display layers
//! consume it and own every visual handle (keyed by entity id), so the
//! simulation never touches one.

use glam::Vec2;
use serde::Serialize;

use crate::consts::PLAYER_SIZE;
use crate::sim::{Phase, PickupKind, Session, Severity, SizeClass};

/// A sprite as published to the sink
#[derive(Debug, Clone, Serialize)]
pub struct SpriteView {
    pub id: u32,
    pub pos: Vec2,
    pub size: f32,
    /// Style hook for the sink, e.g. a CSS modifier class
    pub style: &'static str,
}

/// Everything a display layer needs for one frame
#[derive(Debug, Clone, Serialize)]
pub struct Snapshot {
    pub phase: Phase,
    pub player_pos: Vec2,
    pub player_size: f32,
    pub invulnerable: bool,
    pub obstacles: Vec<SpriteView>,
    pub pickups: Vec<SpriteView>,
    pub life: u32,
    pub max_life: u32,
    pub score: u32,
    pub message: String,
    pub severity: Severity,
}

impl Snapshot {
    pub fn capture(session: &Session) -> Self {
        Self {
            phase: session.phase,
            player_pos: session.player_pos,
            player_size: PLAYER_SIZE,
            invulnerable: session.invuln_ticks > 0,
            obstacles: session
                .obstacles
                .iter()
                .map(|o| SpriteView {
                    id: o.id,
                    pos: o.pos,
                    size: o.size(),
                    style: match o.class {
                        SizeClass::Large => "meteor large",
                        SizeClass::Small => "meteor small",
                    },
                })
                .collect(),
            pickups: session
                .pickups
                .iter()
                .map(|p| SpriteView {
                    id: p.id,
                    pos: p.pos,
                    size: p.size(),
                    style: match p.kind {
                        PickupKind::Health => "power-up health-powerup",
                    },
                })
                .collect(),
            life: session.life,
            max_life: session.config.start_life,
            score: session.score,
            message: session.status.text(),
            severity: session.status.severity(),
        }
    }
}

/// Display color for each severity tag
pub fn severity_color(severity: Severity) -> &'static str {
    match severity {
        Severity::Damage => "#e74c3c",
        Severity::Heal | Severity::Default => "#2ecc71",
    }
}

/// Heart-icon life line: filled hearts for current life, empty up to the cap
pub fn life_hearts(life: u32, max_life: u32) -> String {
    let mut hearts = "\u{2764}\u{fe0f}".repeat(life as usize);
    hearts.push_str(&"\u{1f5a4}".repeat(max_life.saturating_sub(life) as usize));
    hearts
}

/// Consumes simulation snapshots; implementations own all visual handles
pub trait RenderSink {
    fn present(&mut self, snapshot: &Snapshot);
}
