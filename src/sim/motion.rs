//! Obstacle motion
//!
//! Two passes per tick: pairwise separation keeps the swarm from clumping,
//! then every obstacle seeks the player. Positions are rounded to whole
//! units afterwards so rendering never accumulates float drift. Pickups are
//! stationary and never pass through here.

use glam::Vec2;

use super::state::Obstacle;
use crate::consts::{SEPARATION_DISTANCE, SEPARATION_STRENGTH};

/// Push apart every obstacle pair closer than the separation threshold,
/// proportionally to how deep inside the threshold the pair sits.
///
/// Updates are sequential and in place; threshold effects self-correct over
/// subsequent ticks, so pair order does not need to be canonical. Coincident
/// obstacles have no connecting line and stay put until something else moves
/// them.
pub fn separate(obstacles: &mut [Obstacle]) {
    for i in 0..obstacles.len() {
        for j in 0..obstacles.len() {
            if i == j {
                continue;
            }
            let delta = obstacles[j].pos - obstacles[i].pos;
            let dist = delta.length();
            if dist < SEPARATION_DISTANCE {
                let repel = (SEPARATION_DISTANCE - dist) / SEPARATION_DISTANCE;
                obstacles[i].pos -= delta * repel * SEPARATION_STRENGTH;
            }
        }
    }
}

/// Step every obstacle toward `target` at `step` units per tick, never
/// overshooting, then round positions to whole units
pub fn seek(obstacles: &mut [Obstacle], target: Vec2, step: f32) {
    for obstacle in obstacles.iter_mut() {
        let delta = target - obstacle.pos;
        let dist = delta.length();
        if dist > step {
            obstacle.pos += delta / dist * step;
        }
        obstacle.pos = obstacle.pos.round();
    }
}
