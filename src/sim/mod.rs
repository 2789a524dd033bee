//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - One discrete tick per rendered frame
//! - Seeded RNG only
//! - No rendering, audio, or platform dependencies

pub mod geom;
pub mod player;
pub mod session;
pub mod spawn;

pub use geom::Rect;
pub use player::{Controls, Player};
pub use session::{GameSession, Mode, ObstacleView, Snapshot, TickEvents, TickInput};
pub use spawn::{Obstacle, ObstaclePool, SpawnState, advance_obstacles, spawn_step};
