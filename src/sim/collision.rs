//! Collision detection and response
//!
//! Center-to-center proximity checks between the player and every live
//! entity, run after the motion pass each tick. Obstacle contact costs a
//! life unless an invulnerability window is open; pickup contact always
//! removes the pickup, restoring a life when below the cap.

use glam::Vec2;

use super::state::{Obstacle, Pickup, PickupKind, Session, Status};
use crate::consts::{OBSTACLE_HIT_FACTOR, PICKUP_GRAB_FACTOR, PLAYER_SIZE};

/// True when two square sprites' centers are closer than `factor` times the
/// sum of their half-sizes
fn within(a_center: Vec2, a_size: f32, b_center: Vec2, b_size: f32, factor: f32) -> bool {
    let min_distance = (a_size + b_size) / 2.0;
    a_center.distance(b_center) < min_distance * factor
}

/// Player-obstacle contact check
pub fn hits_player(player_center: Vec2, obstacle: &Obstacle) -> bool {
    within(
        player_center,
        PLAYER_SIZE,
        obstacle.center(),
        obstacle.size(),
        OBSTACLE_HIT_FACTOR,
    )
}

/// Player-pickup contact check
pub fn grabs_pickup(player_center: Vec2, pickup: &Pickup) -> bool {
    within(
        player_center,
        PLAYER_SIZE,
        pickup.center(),
        pickup.size(),
        PICKUP_GRAB_FACTOR,
    )
}

/// Resolve all player contacts for this tick. Every live entity is visited
/// exactly once; obstacles persist through hits, pickups are removed on
/// contact whether or not they had an effect.
pub fn resolve(state: &mut Session) {
    let player = state.player_center();

    let hits = state
        .obstacles
        .iter()
        .filter(|o| hits_player(player, o))
        .count();
    for _ in 0..hits {
        apply_hit(state);
    }

    let grabbed: Vec<(u32, PickupKind)> = state
        .pickups
        .iter()
        .filter(|p| grabs_pickup(player, p))
        .map(|p| (p.id, p.kind))
        .collect();
    for (id, kind) in grabbed {
        state.remove_pickup(id);
        apply_pickup(state, kind);
    }
}

/// One obstacle contact: suppressed inside an invulnerability window,
/// otherwise costs a life and either opens a new window or ends the run.
/// The window covers contacts from every obstacle, not just the one that
/// opened it.
fn apply_hit(state: &mut Session) {
    if state.invuln_ticks > 0 {
        return;
    }
    state.life = state.life.saturating_sub(1);
    if state.life == 0 {
        state.game_over();
    } else {
        state.status = Status::Damaged { life: state.life };
        state.start_invulnerability();
    }
}

fn apply_pickup(state: &mut Session, kind: PickupKind) {
    match kind {
        PickupKind::Health => {
            if state.life < state.config.start_life {
                state.life += 1;
                state.status = Status::Healed;
            } else {
                state.status = Status::LifeFull;
            }
        }
    }
}
