//! Flapdash - a side-scrolling dodge-the-gap arcade game
//!
//! Core modules:
//! - `sim`: Deterministic simulation (physics, spawning, collisions, session)
//! - `config`: Data-driven game tuning with validation
//!
//! The crate performs no I/O of its own. An embedding shell (windowing,
//! input polling, rendering, audio) drives [`sim::GameSession::tick`] once
//! per frame, reacts to the returned [`sim::TickEvents`], and reads back a
//! [`sim::Snapshot`] to draw from.

pub mod config;
pub mod sim;

pub use config::{Config, ConfigError};
pub use sim::{GameSession, Mode, Snapshot, TickEvents, TickInput};

/// Game configuration constants
pub mod consts {
    /// Arena dimensions in pixels
    pub const ARENA_WIDTH: i32 = 1280;
    pub const ARENA_HEIGHT: i32 = 720;

    /// Obstacle geometry
    pub const OBSTACLE_WIDTH: i32 = 100;
    /// Vertical extent of the passable gap
    pub const GAP_SIZE: i32 = 250;
    /// Minimum visible obstacle above and below the gap
    pub const GAP_MARGIN: i32 = 50;

    /// Fixed obstacle pool capacity (spawns beyond this are dropped)
    pub const POOL_CAPACITY: usize = 20;

    /// Player bounding box (horizontal position is fixed)
    pub const PLAYER_X: i32 = 250;
    pub const PLAYER_WIDTH: i32 = 106;
    pub const PLAYER_HEIGHT: i32 = 60;

    /// Vertical physics (pixels per tick)
    pub const GRAVITY: f32 = 0.25;
    pub const FLAP_IMPULSE: f32 = -8.0;

    /// Horizontal world scroll (pixels per tick)
    pub const SCROLL_SPEED: i32 = 3;
    pub const DASH_SPEED: i32 = 12;

    /// Spawn cadence
    pub const SPAWN_INTERVAL: u32 = 80;
    /// Obstacles per cluster, and the gap between them
    pub const CLUSTER_SIZE: usize = 3;
    pub const CLUSTER_SPACING: i32 = 10;
    /// 1-in-N chance of a cluster once the streak allows one
    pub const CLUSTER_CHANCE: u32 = 5;
    /// Single spawns required before a cluster may roll
    pub const CLUSTER_STREAK_MIN: u32 = 3;
    /// Forced single spawns after a cluster
    pub const CLUSTER_COOLDOWN: u32 = 3;

    /// Rotation hint: degrees per unit of velocity, clamped to the limit
    pub const TILT_PER_VELOCITY: f32 = 3.0;
    pub const TILT_LIMIT_DEG: f32 = 45.0;
}
