//! Session state
//!
//! Everything that changes during a play session lives in `Session`. It is
//! created once per page and reset with `init()` before each new session.

use glam::Vec2;
use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;

use super::entity::{Color, Entity, Motion, Playfield};
use crate::aim;
use crate::consts::*;
use crate::platform::FrameHandle;

/// Current phase of the session
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionPhase {
    /// No session active, no frame scheduled
    Idle,
    /// Frame loop scheduled every display refresh
    Running,
    /// Loop cancelled, summary shown
    GameOver,
}

/// Things that happened during a tick
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum GameEvent {
    EnemyShrunk { id: u32, radius: f32 },
    EnemyDestroyed { id: u32 },
    PlayerHit { enemy_id: u32 },
}

/// Mutable game state shared by the frame loop and the spawn timer
#[derive(Debug, Clone)]
pub struct Session {
    pub playfield: Playfield,
    /// Stationary avatar at the centre of the playfield
    pub player: Entity,
    pub enemies: Vec<Entity>,
    pub projectiles: Vec<Entity>,
    pub particles: Vec<Entity>,
    pub score: u64,
    pub phase: SessionPhase,
    /// Pending frame request, cancelled at game over
    pub frame_handle: Option<FrameHandle>,
    /// Ticks simulated this session
    pub time_ticks: u64,
    /// Live particle cap (0 disables hit bursts)
    pub max_particles: usize,
    pub(crate) rng: Pcg32,
    next_id: u32,
}

impl Session {
    pub fn new(playfield: Playfield, seed: u64) -> Self {
        let player = Entity::new(0, playfield.center(), PLAYER_RADIUS, Color::RED, Motion::Static);
        Self {
            playfield,
            player,
            enemies: Vec::new(),
            projectiles: Vec::new(),
            particles: Vec::new(),
            score: 0,
            phase: SessionPhase::Idle,
            frame_handle: None,
            time_ticks: 0,
            max_particles: usize::MAX,
            rng: Pcg32::seed_from_u64(seed),
            next_id: 1,
        }
    }

    /// Reset for a fresh session. Never called while `Running`.
    pub fn init(&mut self) {
        debug_assert!(self.phase != SessionPhase::Running);
        self.score = 0;
        self.enemies.clear();
        self.projectiles.clear();
        self.particles.clear();
        self.phase = SessionPhase::Idle;
        self.frame_handle = None;
        self.time_ticks = 0;
    }

    /// Whether input and timers should affect the session
    pub fn can_play(&self) -> bool {
        self.phase == SessionPhase::Running
    }

    /// Allocate a new entity ID
    pub fn next_entity_id(&mut self) -> u32 {
        let id = self.next_id;
        self.next_id = self.next_id.wrapping_add(1).max(1);
        id
    }

    /// Fire a projectile from the player toward `target`
    pub fn fire_at(&mut self, target: Vec2) -> u32 {
        let id = self.next_entity_id();
        let vel = aim(self.player.pos, target, PROJECTILE_SPEED);
        self.projectiles.push(Entity::new(
            id,
            self.player.pos,
            PROJECTILE_RADIUS,
            Color::WHITE,
            Motion::Moving { vel },
        ));
        id
    }

    /// Emit a burst of fading particles at `pos`, respecting the cap
    pub fn burst(&mut self, pos: Vec2, color: Color) {
        let room = self.max_particles.saturating_sub(self.particles.len());
        for _ in 0..PARTICLES_PER_HIT.min(room) {
            let vel = Vec2::new(
                self.rng.random_range(-PARTICLE_SPREAD..=PARTICLE_SPREAD),
                self.rng.random_range(-PARTICLE_SPREAD..=PARTICLE_SPREAD),
            );
            let radius = self.rng.random_range(PARTICLE_RADIUS_MIN..PARTICLE_RADIUS_MAX);
            let id = self.next_entity_id();
            self.particles.push(Entity::new(
                id,
                pos,
                radius,
                color,
                Motion::Fading { vel, alpha: 1.0 },
            ));
        }
    }

    /// Live entity count across all collections
    pub fn entity_count(&self) -> usize {
        self.enemies.len() + self.projectiles.len() + self.particles.len()
    }
}
