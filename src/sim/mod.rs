//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - Tick-counted timing only (one tick per display refresh)
//! - Seeded RNG only, owned by the session
//! - No rendering or platform dependencies

pub mod collision;
pub mod motion;
pub mod spawn;
pub mod state;
pub mod tick;
pub mod timer;

pub use state::{Obstacle, Phase, Pickup, PickupKind, Session, Severity, SizeClass, Status};
pub use tick::{TickInput, tick};
pub use timer::Interval;
