//! Ping Game - pop the bubbles before they reach you
//!
//! Core modules:
//! - `sim`: Frame-stepped simulation (entities, spawning, collisions, scoring)
//! - `game`: Loop driver owning the session, spawner and player record
//! - `renderer`: Drawing surface abstraction (2D canvas on web)
//! - `platform`: Frame/interval scheduling abstraction
//! - `persistence`: Player record load/save
//! - `settings`: User preferences

pub mod game;
pub mod persistence;
pub mod platform;
pub mod renderer;
pub mod settings;
pub mod sim;
#[cfg(target_arch = "wasm32")]
pub mod ui;

pub use game::{Game, Modal, Summary};
pub use settings::{QualityPreset, Settings};

use glam::Vec2;

/// Game configuration constants
pub mod consts {
    /// Milliseconds between enemy spawns
    pub const SPAWN_INTERVAL_MS: u32 = 1000;

    /// Player avatar (stationary, centre of the playfield)
    pub const PLAYER_RADIUS: f32 = 10.0;

    /// Projectile defaults (units per frame)
    pub const PROJECTILE_RADIUS: f32 = 5.0;
    pub const PROJECTILE_SPEED: f32 = 5.0;

    /// Enemy defaults - radius drawn from [MIN, MAX)
    pub const ENEMY_SPEED: f32 = 1.0;
    pub const ENEMY_RADIUS_MIN: f32 = 4.0;
    pub const ENEMY_RADIUS_MAX: f32 = 30.0;

    /// A hit shrinks an enemy by this much...
    pub const SHRINK_STEP: f32 = 10.0;
    /// ...as long as the result stays above this floor
    pub const SHRINK_FLOOR: f32 = 5.0;

    /// Score awards
    pub const SCORE_SHRINK: u64 = 100;
    pub const SCORE_DESTROY: u64 = 250;

    /// Hit burst
    pub const PARTICLES_PER_HIT: usize = 8;
    /// Particle velocity components are uniform in [-SPREAD, SPREAD]
    pub const PARTICLE_SPREAD: f32 = 1.5;
    pub const PARTICLE_RADIUS_MIN: f32 = 1.0;
    pub const PARTICLE_RADIUS_MAX: f32 = 3.0;
    /// Alpha lost per frame
    pub const PARTICLE_FADE: f32 = 0.01;

    /// LocalStorage keys
    pub const RECORD_KEY: &str = "ping_game_player";
    pub const SETTINGS_KEY: &str = "ping_game_settings";
}

/// Velocity of magnitude `speed` pointing from `from` toward `to`.
///
/// Coincident points aim along +x, matching `atan2(0, 0) == 0`.
#[inline]
pub fn aim(from: Vec2, to: Vec2, speed: f32) -> Vec2 {
    let delta = to - from;
    let angle = delta.y.atan2(delta.x);
    Vec2::new(angle.cos(), angle.sin()) * speed
}
