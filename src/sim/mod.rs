//! Frame-stepped simulation module
//!
//! All gameplay logic lives here. This module must stay free of platform
//! and rendering dependencies:
//! - One tick per display frame, velocities in units per frame
//! - Seeded RNG only
//! - Removals deferred to the end of each pass

pub mod collision;
pub mod entity;
pub mod spawner;
pub mod state;
pub mod tick;

pub use collision::{HitOutcome, circles_overlap, hit_outcome, player_contact, resolve_projectile_hits};
pub use entity::{Color, Entity, Motion, Playfield};
pub use spawner::{Edge, Spawner, spawn_enemy};
pub use state::{GameEvent, Session, SessionPhase};
pub use tick::tick;
