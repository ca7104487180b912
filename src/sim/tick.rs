//! Simulation tick
//!
//! One tick per display refresh. While running: pointer tracking, timer
//! firings, motion, then collisions, in that order. Motion always completes
//! before collision detection, and both before the driver snapshots the
//! state for the render sink.

use glam::Vec2;

use super::state::{Session, Status};
use super::{collision, motion, spawn};

/// Input sampled by the driver for a single tick
#[derive(Debug, Clone, Copy, Default)]
pub struct TickInput {
    /// Latest pointer position in field coordinates
    pub pointer: Option<Vec2>,
    /// Pause/resume toggle (one-shot)
    pub toggle: bool,
}

/// Advance the session by one tick.
///
/// Drivers call this every frame regardless of phase: paused ticks are inert
/// except for the invulnerability countdown, whose deferred clear must fire
/// on schedule. The status restoration when the window closes is gated on
/// the running flag, so it is a no-op after a pause.
pub fn tick(state: &mut Session, input: &TickInput) {
    if input.toggle {
        state.toggle();
    }

    if state.invuln_ticks > 0 {
        state.invuln_ticks -= 1;
        if state.invuln_ticks == 0 && state.is_running() {
            state.status = Status::Playing;
        }
    }

    if !state.is_running() {
        return;
    }

    if let Some(pointer) = input.pointer {
        state.set_pointer(pointer);
    }

    let (score_fired, obstacle_fired, pickup_fired) = state.tick_timers();
    if score_fired {
        state.score += 1;
    }
    if obstacle_fired {
        spawn::spawn_obstacle(state);
    }
    if pickup_fired {
        spawn::spawn_pickup(state);
    }

    motion::separate(&mut state.obstacles);
    motion::seek(&mut state.obstacles, state.player_pos, state.config.seek_step());

    collision::resolve(state);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Config;
    use crate::consts::TICK_HZ;
    use crate::sim::state::{Phase, SizeClass};

    fn session() -> Session {
        Session::new(Config::default(), 3)
    }

    fn toggle() -> TickInput {
        TickInput {
            toggle: true,
            ..Default::default()
        }
    }

    /// Pin an obstacle onto the player so every tick produces a contact
    fn pin_obstacle(s: &mut Session) {
        let pos = s.player_center() - SizeClass::Large.size() / 2.0;
        s.add_obstacle(pos, SizeClass::Large);
    }

    #[test]
    fn test_toggle_transitions() {
        let mut s = session();
        tick(&mut s, &toggle());
        assert_eq!(s.phase, Phase::Running);
        tick(&mut s, &toggle());
        assert_eq!(s.phase, Phase::Paused);
    }

    #[test]
    fn test_paused_tick_is_inert() {
        let mut s = session();
        let obstacles: Vec<Vec2> = s.obstacles.iter().map(|o| o.pos).collect();
        for _ in 0..(TICK_HZ * 3) {
            tick(&mut s, &TickInput::default());
        }
        assert_eq!(s.score, 0);
        assert_eq!(
            obstacles,
            s.obstacles.iter().map(|o| o.pos).collect::<Vec<_>>()
        );
    }

    #[test]
    fn test_pointer_ignored_while_paused() {
        let mut s = session();
        let start = s.player_pos;
        let input = TickInput {
            pointer: Some(Vec2::new(50.0, 50.0)),
            ..Default::default()
        };
        tick(&mut s, &input);
        assert_eq!(s.player_pos, start);
        s.resume();
        tick(&mut s, &input);
        assert_ne!(s.player_pos, start);
    }

    #[test]
    fn test_score_counts_whole_seconds() {
        let mut s = session();
        s.obstacles.clear();
        s.resume();
        for _ in 0..(TICK_HZ * 2) {
            tick(&mut s, &TickInput::default());
        }
        assert_eq!(s.score, 2);
    }

    #[test]
    fn test_spawn_cadences() {
        // Obstacles converging over ten seconds will land hits; a very long
        // window keeps the run alive without touching the cadences.
        let config = Config {
            invulnerability_ms: 600_000,
            ..Config::default()
        };
        let mut s = Session::new(config, 3);
        s.obstacles.clear();
        s.resume();
        for _ in 0..TICK_HZ {
            tick(&mut s, &TickInput::default());
        }
        assert_eq!(s.obstacles.len(), 1);
        assert!(s.pickups.is_empty());
        for _ in 0..(TICK_HZ * 9) {
            tick(&mut s, &TickInput::default());
        }
        assert_eq!(s.obstacles.len(), 10);
        // One initial obstacle, ten spawned, one pickup: twelve ids consumed
        // (the pickup may already have been collected, but it was inserted)
        let probe = s.add_obstacle(Vec2::new(-500.0, -500.0), SizeClass::Small);
        assert_eq!(probe, 13);
    }

    #[test]
    fn test_obstacles_close_in_on_the_player() {
        let mut s = session();
        s.obstacles.clear();
        s.add_obstacle(Vec2::ZERO, SizeClass::Large);
        s.resume();
        let before = s.obstacles[0].center().distance(s.player_center());
        for _ in 0..30 {
            tick(&mut s, &TickInput::default());
        }
        let after = s.obstacles[0].center().distance(s.player_center());
        assert!(after < before);
    }

    #[test]
    fn test_invulnerability_suppresses_damage_for_full_window() {
        let mut s = session();
        s.obstacles.clear();
        s.resume();
        // Several overlapping obstacles; the window must suppress them all
        for _ in 0..3 {
            pin_obstacle(&mut s);
        }
        tick(&mut s, &TickInput::default());
        assert_eq!(s.life, 2);

        // 1000 ms window = 60 ticks between hits at 60 Hz
        for _ in 0..(TICK_HZ - 1) {
            tick(&mut s, &TickInput::default());
            assert_eq!(s.life, 2);
        }
        tick(&mut s, &TickInput::default());
        assert_eq!(s.life, 1);
    }

    #[test]
    fn test_window_expiry_restores_status_only_while_running() {
        let mut s = session();
        s.obstacles.clear();
        s.resume();
        pin_obstacle(&mut s);
        tick(&mut s, &TickInput::default());
        assert_eq!(s.status, Status::Damaged { life: 2 });

        // Pause mid-window; the countdown keeps running but the paused
        // message must survive its expiry.
        s.pause();
        s.obstacles.clear();
        while s.invuln_ticks > 0 {
            tick(&mut s, &TickInput::default());
        }
        assert_eq!(s.status, Status::Paused);

        // A window expiring while running restores the default line
        s.resume();
        s.start_invulnerability();
        while s.invuln_ticks > 0 {
            tick(&mut s, &TickInput::default());
        }
        assert_eq!(s.status, Status::Playing);
    }

    #[test]
    fn test_run_ends_after_life_is_exhausted() {
        let config = Config {
            num_enemies: 0,
            ..Config::default()
        };
        let mut s = Session::new(config, 8);
        s.resume();
        for _ in 0..3 {
            pin_obstacle(&mut s);
        }

        let mut ticks = 0u32;
        while s.phase == Phase::Running {
            tick(&mut s, &TickInput::default());
            ticks += 1;
            assert!(ticks < TICK_HZ * 10, "run never ended");
        }

        // Three hits, one per expired window: ticks 1, 61 and 121
        assert_eq!(ticks, 2 * TICK_HZ + 1);
        assert_eq!(s.phase, Phase::GameOver);
        assert_eq!(s.life, 0);
        // Two whole seconds elapsed since resume
        assert_eq!(s.score, 2);
        assert_eq!(s.status, Status::GameOver { score: 2 });
    }

    #[test]
    fn test_game_over_tick_is_inert_like_pause() {
        let mut s = session();
        s.resume();
        s.game_over();
        for _ in 0..TICK_HZ {
            tick(&mut s, &TickInput::default());
        }
        assert_eq!(s.phase, Phase::GameOver);
        assert_eq!(s.score, 0);
    }

    #[test]
    fn test_same_seed_same_inputs_same_outcome() {
        let mut a = Session::new(Config::default(), 99999);
        let mut b = Session::new(Config::default(), 99999);
        tick(&mut a, &toggle());
        tick(&mut b, &toggle());
        let input = TickInput {
            pointer: Some(Vec2::new(200.0, 150.0)),
            ..Default::default()
        };
        for _ in 0..(TICK_HZ * 4) {
            tick(&mut a, &input);
            tick(&mut b, &input);
        }
        assert_eq!(a.score, b.score);
        assert_eq!(a.life, b.life);
        let pos_a: Vec<Vec2> = a.obstacles.iter().map(|o| o.pos).collect();
        let pos_b: Vec<Vec2> = b.obstacles.iter().map(|o| o.pos).collect();
        assert_eq!(pos_a, pos_b);
    }
}
