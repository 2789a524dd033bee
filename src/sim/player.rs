//! Player vertical physics
//!
//! The player occupies a fixed horizontal position; only its vertical
//! position and velocity evolve. Gravity accumulates every tick, a flap
//! overwrites velocity with a fixed upward impulse, and holding dash pins
//! velocity to zero while the world scrolls faster instead.

use serde::{Deserialize, Serialize};

use crate::config::Config;
use crate::consts::{TILT_LIMIT_DEG, TILT_PER_VELOCITY};
use crate::sim::geom::Rect;

/// Per-tick control state for the integrator
#[derive(Debug, Clone, Copy, Default)]
pub struct Controls {
    /// Flap impulse requested this tick (press edge)
    pub flap: bool,
    /// Dash key held (level)
    pub dash_held: bool,
}

/// Player vertical state
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Player {
    /// Top edge of the bounding box, pixels from arena top
    pub y: f32,
    /// Vertical velocity, pixels per tick (positive = falling)
    pub vy: f32,
}

impl Player {
    /// Spawn at mid-arena with no velocity
    pub fn new(config: &Config) -> Self {
        Self {
            y: (config.arena_height / 2) as f32,
            vy: 0.0,
        }
    }

    /// Advance one tick. Dash suspends gravity entirely; a flap overwrites
    /// whatever velocity gravity had accumulated.
    pub fn step(&mut self, controls: Controls, config: &Config) {
        if controls.dash_held {
            self.vy = 0.0;
        } else {
            self.vy += config.gravity;
            if controls.flap {
                self.vy = config.flap_impulse;
            }
        }
        self.y += self.vy;
    }

    /// Bounding box at the fixed horizontal position
    pub fn rect(&self, config: &Config) -> Rect {
        Rect::new(
            config.player_x as f32,
            self.y,
            config.player_width as f32,
            config.player_height as f32,
        )
    }

    /// Fatal contact with the arena top or bottom. Reported, never clamped:
    /// the session freezes the state for the last-frame display.
    pub fn hit_world_bounds(&self, config: &Config) -> bool {
        self.y <= 0.0 || self.y + config.player_height as f32 >= config.arena_height as f32
    }

    /// Rendering rotation hint in degrees, derived purely from velocity
    pub fn tilt_degrees(&self) -> f32 {
        (-self.vy * TILT_PER_VELOCITY).clamp(-TILT_LIMIT_DEG, TILT_LIMIT_DEG)
    }
}
