//! Game tuning and validation
//!
//! Everything the simulation is parameterized over lives here. The shell
//! may deserialize a `Config` from JSON; defaults reproduce the shipped
//! tuning in [`crate::consts`].

use core::fmt;

use serde::{Deserialize, Serialize};

use crate::consts::*;

/// Simulation tuning the core is parameterized over
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Arena width in pixels
    pub arena_width: i32,
    /// Arena height in pixels
    pub arena_height: i32,

    /// Obstacle width in pixels
    pub obstacle_width: i32,
    /// Vertical extent of the passable gap
    pub gap_size: i32,
    /// Minimum visible obstacle above and below the gap
    pub gap_margin: i32,

    /// Obstacle pool capacity
    pub pool_capacity: usize,

    /// Player bounding box
    pub player_x: i32,
    pub player_width: i32,
    pub player_height: i32,

    /// Vertical physics (pixels per tick)
    pub gravity: f32,
    pub flap_impulse: f32,

    /// Horizontal scroll speed, base and while dashing (pixels per tick)
    pub scroll_speed: i32,
    pub dash_speed: i32,

    /// Ticks between spawn events
    pub spawn_interval: u32,
    /// Obstacles per cluster
    pub cluster_size: usize,
    /// Horizontal gap between clustered obstacles
    pub cluster_spacing: i32,
    /// 1-in-N chance of a cluster once the streak allows one
    pub cluster_chance: u32,
    /// Single spawns required before a cluster may roll
    pub cluster_streak_min: u32,
    /// Forced single spawns after a cluster
    pub cluster_cooldown: u32,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            arena_width: ARENA_WIDTH,
            arena_height: ARENA_HEIGHT,
            obstacle_width: OBSTACLE_WIDTH,
            gap_size: GAP_SIZE,
            gap_margin: GAP_MARGIN,
            pool_capacity: POOL_CAPACITY,
            player_x: PLAYER_X,
            player_width: PLAYER_WIDTH,
            player_height: PLAYER_HEIGHT,
            gravity: GRAVITY,
            flap_impulse: FLAP_IMPULSE,
            scroll_speed: SCROLL_SPEED,
            dash_speed: DASH_SPEED,
            spawn_interval: SPAWN_INTERVAL,
            cluster_size: CLUSTER_SIZE,
            cluster_spacing: CLUSTER_SPACING,
            cluster_chance: CLUSTER_CHANCE,
            cluster_streak_min: CLUSTER_STREAK_MIN,
            cluster_cooldown: CLUSTER_COOLDOWN,
        }
    }
}

impl Config {
    /// Parse a config from JSON. Missing fields fall back to defaults.
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }

    /// Range of gap-top heights the spawner may draw from, as
    /// `gap_margin .. gap_margin + span`. Positive span is a validation
    /// requirement.
    pub fn gap_top_span(&self) -> i32 {
        self.arena_height - self.gap_size - 2 * self.gap_margin
    }

    /// Reject constant combinations the simulation cannot run under.
    ///
    /// The tick functions are total over configs that pass this check;
    /// invalid combinations must never reach a live session.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.arena_width <= 0 || self.arena_height <= 0 {
            return Err(ConfigError::ArenaTooSmall {
                width: self.arena_width,
                height: self.arena_height,
            });
        }
        if self.obstacle_width <= 0 {
            return Err(ConfigError::ObstacleWidthInvalid {
                width: self.obstacle_width,
            });
        }
        if self.gap_size <= 0 || self.gap_margin < 0 || self.gap_top_span() <= 0 {
            return Err(ConfigError::GapDoesNotFit {
                gap_size: self.gap_size,
                gap_margin: self.gap_margin,
                arena_height: self.arena_height,
            });
        }
        if self.pool_capacity == 0 {
            return Err(ConfigError::ZeroPoolCapacity);
        }
        if self.player_width <= 0
            || self.player_height <= 0
            || self.player_height >= self.arena_height
        {
            return Err(ConfigError::PlayerBoxInvalid {
                width: self.player_width,
                height: self.player_height,
            });
        }
        if self.scroll_speed <= 0 || self.dash_speed <= 0 {
            return Err(ConfigError::SpeedInvalid {
                scroll: self.scroll_speed,
                dash: self.dash_speed,
            });
        }
        if self.cluster_size == 0 {
            return Err(ConfigError::ZeroClusterSize);
        }
        if self.cluster_chance == 0 {
            return Err(ConfigError::ZeroClusterChance);
        }
        Ok(())
    }
}

/// A constant combination the simulation cannot run under
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ConfigError {
    ArenaTooSmall { width: i32, height: i32 },
    ObstacleWidthInvalid { width: i32 },
    GapDoesNotFit { gap_size: i32, gap_margin: i32, arena_height: i32 },
    ZeroPoolCapacity,
    PlayerBoxInvalid { width: i32, height: i32 },
    SpeedInvalid { scroll: i32, dash: i32 },
    ZeroClusterSize,
    ZeroClusterChance,
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::ArenaTooSmall { width, height } => {
                write!(f, "arena dimensions must be positive: {width}x{height}")
            }
            Self::ObstacleWidthInvalid { width } => {
                write!(f, "obstacle width must be positive: {width}")
            }
            Self::GapDoesNotFit {
                gap_size,
                gap_margin,
                arena_height,
            } => write!(
                f,
                "gap {gap_size} with margin {gap_margin} does not fit arena height {arena_height}"
            ),
            Self::ZeroPoolCapacity => write!(f, "obstacle pool capacity must be non-zero"),
            Self::PlayerBoxInvalid { width, height } => {
                write!(f, "player box {width}x{height} does not fit the arena")
            }
            Self::SpeedInvalid { scroll, dash } => {
                write!(f, "scroll speeds must be positive: scroll={scroll}, dash={dash}")
            }
            Self::ZeroClusterSize => write!(f, "cluster size must be non-zero"),
            Self::ZeroClusterChance => write!(f, "cluster chance must be non-zero"),
        }
    }
}

impl std::error::Error for ConfigError {}
