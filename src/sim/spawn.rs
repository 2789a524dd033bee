//! Obstacle pool and spawn cadence
//!
//! Obstacles live in a fixed-capacity pool of reusable slots (no per-spawn
//! allocation). A tick counter fires a spawn event at a fixed cadence; each
//! event places either one obstacle or a cluster of three sharing a gap
//! height. A cooldown forces the next spawn events after a cluster to be
//! singles, so clusters never appear back to back.

use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::config::Config;
use crate::sim::geom::Rect;

/// One slot in the obstacle pool
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize)]
pub struct Obstacle {
    /// Left edge in pixels; decreases as the world scrolls
    pub x: i32,
    /// Top edge of the passable gap
    pub gap_top: i32,
    /// Inactive slots are free for reuse; their fields are meaningless
    pub active: bool,
    /// Already counted by the scoring zone; meaningful only while active
    pub scored: bool,
}

impl Obstacle {
    /// Solid span from the arena top down to the gap
    pub fn top_rect(&self, config: &Config) -> Rect {
        Rect::new(
            self.x as f32,
            0.0,
            config.obstacle_width as f32,
            self.gap_top as f32,
        )
    }

    /// Solid span from below the gap down to the arena bottom
    pub fn bottom_rect(&self, config: &Config) -> Rect {
        let top = self.gap_top + config.gap_size;
        Rect::new(
            self.x as f32,
            top as f32,
            config.obstacle_width as f32,
            (config.arena_height - top) as f32,
        )
    }

    /// One-pixel-wide full-height strip at the obstacle's center line
    pub fn score_zone(&self, config: &Config) -> Rect {
        Rect::new(
            (self.x + config.obstacle_width / 2) as f32,
            0.0,
            1.0,
            config.arena_height as f32,
        )
    }
}

/// Fixed-capacity obstacle pool with linear free-slot allocation
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ObstaclePool {
    slots: Vec<Obstacle>,
}

impl ObstaclePool {
    pub fn new(capacity: usize) -> Self {
        Self {
            slots: vec![Obstacle::default(); capacity],
        }
    }

    /// Free every slot
    pub fn clear(&mut self) {
        for slot in &mut self.slots {
            slot.active = false;
        }
    }

    /// Allocate the first inactive slot. A full pool drops the spawn:
    /// transient backpressure, not a fault.
    pub fn spawn(&mut self, x: i32, gap_top: i32) -> bool {
        for slot in &mut self.slots {
            if !slot.active {
                *slot = Obstacle {
                    x,
                    gap_top,
                    active: true,
                    scored: false,
                };
                return true;
            }
        }
        false
    }

    pub fn slots(&self) -> &[Obstacle] {
        &self.slots
    }

    pub fn active(&self) -> impl Iterator<Item = &Obstacle> {
        self.slots.iter().filter(|slot| slot.active)
    }

    pub fn active_mut(&mut self) -> impl Iterator<Item = &mut Obstacle> {
        self.slots.iter_mut().filter(|slot| slot.active)
    }

    pub fn active_count(&self) -> usize {
        self.active().count()
    }
}

/// Spawn cadence bookkeeping
///
/// `cooldown` and `streak` are mutually exclusive drivers of the next
/// spawn decision: a non-zero cooldown always wins over the cluster roll.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SpawnState {
    /// Ticks since the last spawn event
    pub timer: u32,
    /// Consecutive single spawns since the last cluster
    pub streak: u32,
    /// Remaining spawn events forced to be singles
    pub cooldown: u32,
}

/// Advance the spawn cadence by one tick, placing obstacles when the timer
/// passes the interval.
pub fn spawn_step(
    pool: &mut ObstaclePool,
    state: &mut SpawnState,
    config: &Config,
    rng: &mut impl Rng,
) {
    state.timer += 1;
    if state.timer <= config.spawn_interval {
        return;
    }
    state.timer = 0;

    if state.cooldown > 0 {
        spawn_single(pool, config, rng);
        state.cooldown -= 1;
        state.streak += 1;
    } else if state.streak >= config.cluster_streak_min
        && rng.random_range(0..config.cluster_chance) == 0
    {
        let gap_top = random_gap_top(config, rng);
        for j in 0..config.cluster_size {
            let offset = j as i32 * (config.obstacle_width + config.cluster_spacing);
            pool.spawn(config.arena_width + offset, gap_top);
        }
        log::debug!("cluster spawned, gap top {gap_top}");
        state.streak = 0;
        state.cooldown = config.cluster_cooldown;
    } else {
        spawn_single(pool, config, rng);
        state.streak += 1;
    }
}

/// Scroll every active obstacle left and free slots whose right edge has
/// left the arena.
pub fn advance_obstacles(pool: &mut ObstaclePool, speed: i32, config: &Config) {
    for slot in &mut pool.slots {
        if !slot.active {
            continue;
        }
        slot.x -= speed;
        if slot.x + config.obstacle_width < 0 {
            slot.active = false;
        }
    }
}

fn spawn_single(pool: &mut ObstaclePool, config: &Config, rng: &mut impl Rng) {
    let gap_top = random_gap_top(config, rng);
    pool.spawn(config.arena_width, gap_top);
}

/// Uniform gap-top draw keeping at least `gap_margin` of obstacle visible
/// above and below the gap.
fn random_gap_top(config: &Config, rng: &mut impl Rng) -> i32 {
    config.gap_margin + rng.random_range(0..config.gap_top_span())
}
