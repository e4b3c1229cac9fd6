//! Collision detection and scoring
//!
//! Everything is a circle, so every test is "distance between centres is at
//! most the sum of the radii". Hits are resolved in one pass and removals are
//! applied after the pass, so nothing is spliced out of a collection while it
//! is being walked.

use glam::Vec2;

use super::entity::Color;
use super::state::{GameEvent, Session};
use crate::consts::*;

/// Whether two circles touch or overlap
#[inline]
pub fn circles_overlap(a: Vec2, ra: f32, b: Vec2, rb: f32) -> bool {
    a.distance(b) <= ra + rb
}

/// What a projectile hit does to an enemy of a given radius
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum HitOutcome {
    /// Enemy survives with the new radius
    Shrink(f32),
    /// Enemy is removed
    Destroy,
}

impl HitOutcome {
    pub fn points(self) -> u64 {
        match self {
            HitOutcome::Shrink(_) => SCORE_SHRINK,
            HitOutcome::Destroy => SCORE_DESTROY,
        }
    }
}

/// Shrink while the result stays above the floor, otherwise destroy.
///
/// Radius 16 shrinks to 6; radius 15 is destroyed.
pub fn hit_outcome(radius: f32) -> HitOutcome {
    let shrunk = radius - SHRINK_STEP;
    if shrunk > SHRINK_FLOOR {
        HitOutcome::Shrink(shrunk)
    } else {
        HitOutcome::Destroy
    }
}

/// Resolve every projectile-enemy hit for this tick.
///
/// Hits on one enemy are applied in order: each sees the radius left by the
/// previous one, and a destroyed enemy takes no further hits. A projectile
/// is spent by its first hit.
pub fn resolve_projectile_hits(session: &mut Session) -> Vec<GameEvent> {
    let mut events = Vec::new();
    let mut spent: Vec<u32> = Vec::new();
    let mut destroyed: Vec<u32> = Vec::new();
    // Deferred to avoid borrowing the rng mid-iteration
    let mut bursts: Vec<(Vec2, Color)> = Vec::new();
    let mut points = 0u64;

    for enemy in session.enemies.iter_mut() {
        for projectile in &session.projectiles {
            if spent.contains(&projectile.id) {
                continue;
            }
            if !circles_overlap(enemy.pos, enemy.radius, projectile.pos, projectile.radius) {
                continue;
            }

            spent.push(projectile.id);
            bursts.push((projectile.pos, enemy.color));

            let outcome = hit_outcome(enemy.radius);
            points += outcome.points();
            match outcome {
                HitOutcome::Shrink(radius) => {
                    enemy.radius = radius;
                    log::debug!("Enemy {} shrunk to {:.1}", enemy.id, radius);
                    events.push(GameEvent::EnemyShrunk {
                        id: enemy.id,
                        radius,
                    });
                }
                HitOutcome::Destroy => {
                    log::debug!("Enemy {} destroyed", enemy.id);
                    destroyed.push(enemy.id);
                    events.push(GameEvent::EnemyDestroyed { id: enemy.id });
                    break;
                }
            }
        }
    }

    for (pos, color) in bursts {
        session.burst(pos, color);
    }

    session.score += points;
    if !spent.is_empty() {
        session.projectiles.retain(|p| !spent.contains(&p.id));
    }
    if !destroyed.is_empty() {
        session.enemies.retain(|e| !destroyed.contains(&e.id));
    }

    events
}

/// First enemy touching the player, if any
pub fn player_contact(session: &Session) -> Option<u32> {
    let player = &session.player;
    session
        .enemies
        .iter()
        .find(|e| circles_overlap(player.pos, player.radius, e.pos, e.radius))
        .map(|e| e.id)
}
