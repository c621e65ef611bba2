//! Game state and core simulation types
//!
//! One `GameState` owns everything a session mutates. The tick and the session
//! controller are the only writers; the renderer and HUD only read it.

use glam::Vec2;
use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;

use super::aabb::Aabb;
use crate::tuning::Tuning;

/// Current phase of the session
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GamePhase {
    /// Waiting for the player to press start
    Idle,
    /// Short delay before play begins
    Countdown,
    /// Active gameplay
    Running,
    /// Game is paused (see `GameState::resume_phase`)
    Paused,
    /// Session ended; only restart is accepted
    GameOver,
}

/// Notifications for presentation and audio collaborators
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameEvent {
    /// Session started from Idle
    Started,
    /// Countdown reached a new whole second
    CountdownTick { remaining: u32 },
    /// Play began (countdown elapsed or skipped)
    Running,
    Paused,
    Resumed,
    /// Player started moving
    Moved,
    /// Player fired a bullet
    Shot,
    /// A bullet destroyed an enemy
    EnemyDestroyed { enemy_id: u32, bullet_id: u32 },
    /// An enemy breached the bottom line
    GameOver { score: u32 },
    /// Session reset after game over or from the pause menu
    Restarted,
}

/// The player's ship
#[derive(Debug, Clone, PartialEq)]
pub struct Player {
    pub pos: Vec2,
    pub size: Vec2,
    /// Horizontal pixels per tick
    pub speed: f32,
}

impl Player {
    pub fn new(tuning: &Tuning) -> Self {
        Self {
            pos: Vec2::new(
                (tuning.play_width - tuning.player_width) / 2.0,
                tuning.play_height - tuning.player_bottom_offset,
            ),
            size: Vec2::new(tuning.player_width, tuning.player_height),
            speed: tuning.player_speed,
        }
    }

    pub fn bounds(&self) -> Aabb {
        Aabb {
            pos: self.pos,
            size: self.size,
        }
    }

    /// Move horizontally by `dx`, clamped to `[0, max_x]`
    pub fn shift(&mut self, dx: f32, max_x: f32) {
        self.pos.x = (self.pos.x + dx).clamp(0.0, max_x);
    }
}

/// A player projectile
#[derive(Debug, Clone, PartialEq)]
pub struct Bullet {
    pub id: u32,
    pub pos: Vec2,
    pub size: Vec2,
    /// Upward pixels per tick
    pub speed: f32,
}

impl Bullet {
    pub fn bounds(&self) -> Aabb {
        Aabb {
            pos: self.pos,
            size: self.size,
        }
    }
}

/// A descending enemy
#[derive(Debug, Clone, PartialEq)]
pub struct Enemy {
    pub id: u32,
    pub pos: Vec2,
    pub size: Vec2,
}

impl Enemy {
    pub fn bounds(&self) -> Aabb {
        Aabb {
            pos: self.pos,
            size: self.size,
        }
    }
}

/// Complete session state (deterministic for a given seed and input stream)
#[derive(Debug, Clone)]
pub struct GameState {
    /// Run seed for reproducibility
    pub seed: u64,
    /// Balance values the session was created with
    pub tuning: Tuning,
    /// Current phase
    pub phase: GamePhase,
    /// Phase to return to when leaving `Paused`
    pub resume_phase: GamePhase,
    /// Countdown ticks remaining (only meaningful in `Countdown`)
    pub countdown_ticks: u32,
    /// Score
    pub score: u32,
    /// Running ticks in the current session
    pub time_ticks: u64,
    /// Player ship
    pub player: Player,
    /// Live bullets, in firing order
    pub bullets: Vec<Bullet>,
    /// Live enemies; the count is constant within a session
    pub enemies: Vec<Enemy>,
    /// Events not yet consumed by the shell
    events: Vec<GameEvent>,
    rng: Pcg32,
    /// Next entity ID
    next_id: u32,
}

impl GameState {
    /// Create an idle session with default tuning
    pub fn new(seed: u64) -> Self {
        Self::with_tuning(seed, Tuning::default())
    }

    /// Create an idle session with the given tuning
    pub fn with_tuning(seed: u64, tuning: Tuning) -> Self {
        let mut state = Self {
            seed,
            player: Player::new(&tuning),
            tuning,
            phase: GamePhase::Idle,
            resume_phase: GamePhase::Running,
            countdown_ticks: 0,
            score: 0,
            time_ticks: 0,
            bullets: Vec::new(),
            enemies: Vec::new(),
            events: Vec::new(),
            rng: Pcg32::seed_from_u64(seed),
            next_id: 1,
        };

        state.spawn_initial_enemies();

        state
    }

    /// Allocate a new entity ID
    pub fn next_entity_id(&mut self) -> u32 {
        let id = self.next_id;
        self.next_id += 1;
        id
    }

    pub(crate) fn push_event(&mut self, event: GameEvent) {
        self.events.push(event);
    }

    /// Pending events, oldest first
    pub fn events(&self) -> &[GameEvent] {
        &self.events
    }

    /// Drain pending events for the audio/HUD collaborators
    pub fn take_events(&mut self) -> Vec<GameEvent> {
        std::mem::take(&mut self.events)
    }

    /// Restore the per-session entities: player, bullets, enemies and score
    pub fn reset_session(&mut self) {
        self.player = Player::new(&self.tuning);
        self.bullets.clear();
        self.score = 0;
        self.time_ticks = 0;
        self.spawn_initial_enemies();
    }

    /// Replace all enemies with a fresh, scattered set above the play area
    pub fn spawn_initial_enemies(&mut self) {
        self.enemies.clear();
        let h = self.tuning.enemy_height;
        let lowest = -self.tuning.play_height.max(h);
        for _ in 0..self.tuning.enemy_count {
            let y = if lowest < -h {
                self.rng.random_range(lowest..=-h)
            } else {
                -h
            };
            let enemy = self.make_enemy(y);
            self.enemies.push(enemy);
        }
    }

    /// Build a replacement enemy just above the visible area
    pub fn spawn_enemy_above(&mut self) -> Enemy {
        let y = -self.tuning.enemy_height;
        self.make_enemy(y)
    }

    /// Fire a bullet from the centre of the player's top edge
    pub fn spawn_bullet(&mut self) -> u32 {
        let id = self.next_entity_id();
        let t = &self.tuning;
        let size = Vec2::new(t.bullet_width, t.bullet_height);
        let pos = Vec2::new(
            self.player.pos.x + self.player.size.x / 2.0 - size.x / 2.0,
            self.player.pos.y,
        );
        self.bullets.push(Bullet {
            id,
            pos,
            size,
            speed: t.bullet_speed,
        });
        id
    }

    fn make_enemy(&mut self, y: f32) -> Enemy {
        let id = self.next_entity_id();
        let size = Vec2::new(self.tuning.enemy_width, self.tuning.enemy_height);
        let max_x = self.tuning.play_width - size.x;
        let x = if max_x > 0.0 {
            self.rng.random_range(0.0..max_x)
        } else {
            0.0
        };
        Enemy {
            id,
            pos: Vec2::new(x, y),
            size,
        }
    }
}
