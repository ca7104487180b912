//! Entity spawning
//!
//! Two independent generators feed the entity store while the session runs:
//! obstacles every second from a random field edge, health pickups every ten
//! seconds at a random interior point. Reset scatters the configured number
//! of large obstacles across the interior.

use glam::Vec2;
use rand::Rng;

use super::state::{PickupKind, Session, SizeClass};
use crate::consts::*;

/// Spawn one obstacle just outside a random field edge, placed uniformly
/// along the perpendicular axis
pub fn spawn_obstacle(state: &mut Session) {
    let class = if state.rng.random_bool(SMALL_SPAWN_CHANCE) {
        SizeClass::Small
    } else {
        SizeClass::Large
    };
    let size = class.size();
    let pos = match state.rng.random_range(0..4u8) {
        0 => Vec2::new(state.rng.random_range(0.0..FIELD_WIDTH), -size),
        1 => Vec2::new(FIELD_WIDTH, state.rng.random_range(0.0..FIELD_HEIGHT)),
        2 => Vec2::new(state.rng.random_range(0.0..FIELD_WIDTH), FIELD_HEIGHT),
        _ => Vec2::new(-size, state.rng.random_range(0.0..FIELD_HEIGHT)),
    };
    let id = state.add_obstacle(pos, class);
    log::trace!("spawned {class:?} obstacle {id} at {pos}");
}

/// Place one health pickup at a uniform interior point, fully inside bounds
pub fn spawn_pickup(state: &mut Session) {
    let kind = PickupKind::Health;
    let size = kind.size();
    let pos = Vec2::new(
        state.rng.random_range(0.0..FIELD_WIDTH - size),
        state.rng.random_range(0.0..FIELD_HEIGHT - size),
    );
    let id = state.add_pickup(pos, kind);
    log::trace!("spawned {kind:?} pickup {id} at {pos}");
}

/// Scatter the configured number of large obstacles for a fresh run.
/// Overlap between them is allowed; separation pushes them apart over the
/// first few ticks.
pub fn scatter_initial(state: &mut Session) {
    let size = SizeClass::Large.size();
    for _ in 0..state.config.num_enemies {
        let pos = Vec2::new(
            state.rng.random_range(0.0..FIELD_WIDTH - size),
            state.rng.random_range(0.0..FIELD_HEIGHT - size),
        );
        state.add_obstacle(pos, SizeClass::Large);
    }
}
