//! Game session: mode machine and per-tick orchestration
//!
//! A `GameSession` owns every piece of simulation state and advances it one
//! discrete tick at a time. The embedding shell feeds it a `TickInput`,
//! reacts to the returned `TickEvents` (audio triggers), and reads a
//! `Snapshot` to render from. Physics and spawning run only in `Playing`;
//! `Menu` and `GameOver` just wait for their transition input.

use rand::SeedableRng;
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use crate::config::{Config, ConfigError};
use crate::sim::geom::Rect;
use crate::sim::player::{Controls, Player};
use crate::sim::spawn::{ObstaclePool, SpawnState, advance_obstacles, spawn_step};

/// Current game mode
///
/// `Menu` is the initial state only; there is no path back to it from
/// gameplay. Restarting from `GameOver` performs the same reset as leaving
/// the menu.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Mode {
    /// Waiting for the start action
    Menu,
    /// Active gameplay
    Playing,
    /// Run ended; state frozen for the last-frame display
    GameOver,
}

/// Input commands for a single tick
///
/// `start`, `flap` and `restart` are press edges raised by the shell;
/// `dash_held` is a level sampled from the held-key state.
#[derive(Debug, Clone, Copy, Default)]
pub struct TickInput {
    pub start: bool,
    pub flap: bool,
    pub dash_held: bool,
    pub restart: bool,
}

/// Discrete per-tick event flags for audio and effects
///
/// The core never touches audio itself; the shell plays sounds off these
/// edges within the same tick boundary.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TickEvents {
    pub flapped: bool,
    pub dash_started: bool,
    pub dash_stopped: bool,
    pub died: bool,
    pub scored: bool,
}

/// Per-obstacle rectangles for rendering
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ObstacleView {
    pub top: Rect,
    pub bottom: Rect,
}

/// Read-only view of one tick's end state, for the rendering collaborator
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Snapshot {
    pub mode: Mode,
    pub player: Rect,
    /// Cosmetic rotation hint in degrees
    pub tilt_degrees: f32,
    /// Active obstacles in slot order
    pub obstacles: Vec<ObstacleView>,
    pub score: u32,
    pub dash_active: bool,
    pub just_collided: bool,
    pub just_scored: bool,
}

/// All simulation state for one run of the game
pub struct GameSession {
    pub config: Config,
    pub mode: Mode,
    pub score: u32,
    /// Ticks spent in `Playing` since the last reset
    pub ticks: u64,
    pub player: Player,
    pub pool: ObstaclePool,
    pub spawn: SpawnState,
    seed: u64,
    rng: Pcg32,
    dash_active: bool,
    events: TickEvents,
}

impl GameSession {
    /// Create a session in `Menu` mode. The config is validated up front so
    /// every later tick is total.
    pub fn new(config: Config, seed: u64) -> Result<Self, ConfigError> {
        config.validate()?;
        let player = Player::new(&config);
        let pool = ObstaclePool::new(config.pool_capacity);
        Ok(Self {
            config,
            mode: Mode::Menu,
            score: 0,
            ticks: 0,
            player,
            pool,
            spawn: SpawnState::default(),
            seed,
            rng: Pcg32::seed_from_u64(seed),
            dash_active: false,
            events: TickEvents::default(),
        })
    }

    /// Run seed, for logging and replays
    pub fn seed(&self) -> u64 {
        self.seed
    }

    /// Dash level as of the last tick
    pub fn dash_active(&self) -> bool {
        self.dash_active
    }

    /// Advance one simulation tick
    pub fn tick(&mut self, input: &TickInput) -> TickEvents {
        let mut events = TickEvents::default();

        match self.mode {
            Mode::Menu => {
                if input.start {
                    self.start_round();
                }
            }
            Mode::GameOver => {
                if input.restart {
                    self.start_round();
                }
            }
            Mode::Playing => {
                self.ticks += 1;

                if input.dash_held != self.dash_active {
                    if input.dash_held {
                        events.dash_started = true;
                    } else {
                        events.dash_stopped = true;
                    }
                    self.dash_active = input.dash_held;
                }

                // Dash and flap are mutually exclusive; dash wins
                let flap = input.flap && !input.dash_held;
                if flap {
                    events.flapped = true;
                }
                self.player.step(
                    Controls {
                        flap,
                        dash_held: input.dash_held,
                    },
                    &self.config,
                );

                let mut collided = self.player.hit_world_bounds(&self.config);

                spawn_step(&mut self.pool, &mut self.spawn, &self.config, &mut self.rng);

                let speed = if input.dash_held {
                    self.config.dash_speed
                } else {
                    self.config.scroll_speed
                };
                advance_obstacles(&mut self.pool, speed, &self.config);

                let player_rect = self.player.rect(&self.config);
                let config = &self.config;
                let mut crossings = 0u32;
                for slot in self.pool.active_mut() {
                    if player_rect.overlaps(&slot.top_rect(config))
                        || player_rect.overlaps(&slot.bottom_rect(config))
                    {
                        collided = true;
                    }
                    // Scoring still counts on a fatal tick
                    if !slot.scored && player_rect.overlaps(&slot.score_zone(config)) {
                        slot.scored = true;
                        crossings += 1;
                        events.scored = true;
                    }
                }
                self.score += crossings;

                if collided {
                    events.died = true;
                    if self.dash_active {
                        // The looping dash sound must end with the run
                        events.dash_stopped = true;
                        self.dash_active = false;
                    }
                    self.mode = Mode::GameOver;
                    log::info!(
                        "run over: score {} after {} ticks (seed {})",
                        self.score,
                        self.ticks,
                        self.seed
                    );
                }
            }
        }

        self.events = events;
        events
    }

    /// Read-only state for the renderer
    pub fn snapshot(&self) -> Snapshot {
        Snapshot {
            mode: self.mode,
            player: self.player.rect(&self.config),
            tilt_degrees: self.player.tilt_degrees(),
            obstacles: self
                .pool
                .active()
                .map(|slot| ObstacleView {
                    top: slot.top_rect(&self.config),
                    bottom: slot.bottom_rect(&self.config),
                })
                .collect(),
            score: self.score,
            dash_active: self.dash_active,
            just_collided: self.events.died,
            just_scored: self.events.scored,
        }
    }

    /// Shared reset behind both `Menu -> Playing` and `GameOver -> Playing`
    fn start_round(&mut self) {
        self.player = Player::new(&self.config);
        self.pool.clear();
        self.spawn = SpawnState::default();
        self.score = 0;
        self.ticks = 0;
        self.dash_active = false;
        self.mode = Mode::Playing;
        log::info!("round started (seed {})", self.seed);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn playing_session() -> GameSession {
        let mut session = GameSession::new(Config::default(), 42).unwrap();
        session.tick(&TickInput {
            start: true,
            ..Default::default()
        });
        assert_eq!(session.mode, Mode::Playing);
        session
    }

    #[test]
    fn test_menu_waits_for_start() {
        let mut session = GameSession::new(Config::default(), 1).unwrap();
        assert_eq!(session.mode, Mode::Menu);

        session.tick(&TickInput::default());
        assert_eq!(session.mode, Mode::Menu);
        assert_eq!(session.ticks, 0);

        session.tick(&TickInput {
            start: true,
            ..Default::default()
        });
        assert_eq!(session.mode, Mode::Playing);
    }

    #[test]
    fn test_free_fall_ends_at_bottom_bound() {
        let mut session = playing_session();
        let mut died_at = None;
        for n in 1..=60 {
            let events = session.tick(&TickInput::default());
            if events.died {
                died_at = Some(n);
                break;
            }
        }
        // From mid-arena, 0.125 * k * (k + 1) >= 300 first holds at k = 49
        assert_eq!(died_at, Some(49));
        assert_eq!(session.mode, Mode::GameOver);
    }

    #[test]
    fn test_game_over_freezes_state() {
        let mut session = playing_session();
        while !session.tick(&TickInput::default()).died {}

        let frozen = session.snapshot();
        session.tick(&TickInput::default());
        let later = session.snapshot();
        assert_eq!(later.player, frozen.player);
        assert_eq!(later.score, frozen.score);
        assert_eq!(later.obstacles.len(), frozen.obstacles.len());
    }

    #[test]
    fn test_obstacle_collision_kills() {
        let mut session = playing_session();
        // Gap far below the player so the top span covers the box
        session.pool.spawn(session.config.player_x, 420);

        let events = session.tick(&TickInput::default());
        assert!(events.died);
        assert_eq!(session.mode, Mode::GameOver);
        assert!(session.snapshot().just_collided);
    }

    #[test]
    fn test_scoring_is_idempotent() {
        let mut session = playing_session();
        // Zone center lands inside the player box after one advance
        session.pool.spawn(253, 300);

        let events = session.tick(&TickInput::default());
        assert!(events.scored);
        assert_eq!(session.score, 1);

        let events = session.tick(&TickInput::default());
        assert!(!events.scored);
        assert_eq!(session.score, 1);
    }

    #[test]
    fn test_dash_pins_player_and_speeds_world() {
        let mut session = playing_session();
        session.pool.spawn(1000, 300);
        let y_before = session.player.y;

        let dash = TickInput {
            dash_held: true,
            ..Default::default()
        };
        let events = session.tick(&dash);
        assert!(events.dash_started);
        assert!(session.dash_active());
        assert_eq!(session.player.y, y_before);
        assert_eq!(
            session.pool.slots()[0].x,
            1000 - session.config.dash_speed
        );

        let events = session.tick(&dash);
        assert!(!events.dash_started);
        assert_eq!(session.player.y, y_before);

        let events = session.tick(&TickInput::default());
        assert!(events.dash_stopped);
        assert!(!session.dash_active());
    }

    #[test]
    fn test_death_while_dashing_stops_dash() {
        let mut session = playing_session();
        session.pool.spawn(session.config.player_x, 420);

        let events = session.tick(&TickInput {
            dash_held: true,
            ..Default::default()
        });
        assert!(events.died);
        assert!(events.dash_stopped);
        assert!(!session.dash_active());
    }

    #[test]
    fn test_flap_raises_event_and_impulse() {
        let mut session = playing_session();
        let events = session.tick(&TickInput {
            flap: true,
            ..Default::default()
        });
        assert!(events.flapped);
        assert_eq!(session.player.vy, session.config.flap_impulse);
    }

    #[test]
    fn test_restart_resets_round() {
        let mut session = playing_session();
        session.tick(&TickInput {
            flap: true,
            ..Default::default()
        });
        while !session.tick(&TickInput::default()).died {}
        assert_eq!(session.mode, Mode::GameOver);

        session.tick(&TickInput {
            restart: true,
            ..Default::default()
        });
        assert_eq!(session.mode, Mode::Playing);
        assert_eq!(session.score, 0);
        assert_eq!(session.ticks, 0);
        assert_eq!(session.pool.active_count(), 0);
        assert_eq!(
            session.player.y,
            (session.config.arena_height / 2) as f32
        );
        assert_eq!(session.player.vy, 0.0);
    }

    #[test]
    fn test_invalid_config_rejected_at_construction() {
        let config = Config {
            gap_size: 10_000,
            ..Default::default()
        };
        assert!(GameSession::new(config, 0).is_err());
    }

    #[test]
    fn test_snapshot_exposes_obstacle_pair() {
        let mut session = playing_session();
        session.pool.spawn(800, 300);
        session.tick(&TickInput::default());

        let snapshot = session.snapshot();
        assert_eq!(snapshot.obstacles.len(), 1);
        let view = &snapshot.obstacles[0];
        assert_eq!(view.top.pos.y, 0.0);
        assert_eq!(view.top.bottom(), 300.0);
        assert_eq!(view.bottom.pos.y, (300 + session.config.gap_size) as f32);
        assert_eq!(
            view.bottom.bottom(),
            session.config.arena_height as f32
        );
    }
}
