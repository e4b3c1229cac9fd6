//! Enemy spawning
//!
//! Once per interval an enemy appears just outside a random playfield edge
//! and heads straight for the player.

use glam::Vec2;
use rand::Rng;

use super::entity::{Color, Entity, Motion, Playfield};
use super::state::Session;
use crate::aim;
use crate::consts::*;
use crate::platform::{IntervalHandle, Scheduler};

/// Playfield edge an enemy enters from
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Edge {
    Left,
    Right,
    Top,
    Bottom,
}

impl Edge {
    pub const ALL: [Edge; 4] = [Edge::Left, Edge::Right, Edge::Top, Edge::Bottom];

    /// Uniform pick, 25% each
    pub fn random<R: Rng>(rng: &mut R) -> Self {
        Self::ALL[rng.random_range(0..Self::ALL.len())]
    }

    /// Spawn point for a circle of `radius` entering across this edge.
    ///
    /// `along` in [0,1) picks the coordinate along the edge; the other
    /// coordinate sits one radius outside so the circle starts off-screen.
    pub fn spawn_point(self, field: &Playfield, radius: f32, along: f32) -> Vec2 {
        match self {
            Edge::Left => Vec2::new(-radius, along * field.height),
            Edge::Right => Vec2::new(field.width + radius, along * field.height),
            Edge::Top => Vec2::new(along * field.width, -radius),
            Edge::Bottom => Vec2::new(along * field.width, field.height + radius),
        }
    }
}

/// Create one enemy aimed at the player and add it to the session
pub fn spawn_enemy(session: &mut Session) -> u32 {
    let radius = session.rng.random_range(ENEMY_RADIUS_MIN..ENEMY_RADIUS_MAX);
    let edge = Edge::random(&mut session.rng);
    let along: f32 = session.rng.random();
    let pos = edge.spawn_point(&session.playfield, radius, along);
    let color = Color::random(&mut session.rng);
    let vel = aim(pos, session.player.pos, ENEMY_SPEED);

    let id = session.next_entity_id();
    session
        .enemies
        .push(Entity::new(id, pos, radius, color, Motion::Moving { vel }));
    log::debug!(
        "Spawned enemy {} from {:?} at ({:.0}, {:.0}), r={:.1}",
        id,
        edge,
        pos.x,
        pos.y,
        radius
    );
    id
}

/// Owner of the spawn interval for the current session
#[derive(Debug)]
pub struct Spawner {
    period_ms: u32,
    handle: Option<IntervalHandle>,
}

impl Spawner {
    pub fn new(period_ms: u32) -> Self {
        Self {
            period_ms,
            handle: None,
        }
    }

    pub fn period_ms(&self) -> u32 {
        self.period_ms
    }

    /// Start ticking. Any previous interval is stopped first, so a restart
    /// never leaves two spawners running.
    pub fn start(&mut self, scheduler: &mut dyn Scheduler) {
        self.stop(scheduler);
        self.handle = Some(scheduler.start_interval(self.period_ms));
    }

    pub fn stop(&mut self, scheduler: &mut dyn Scheduler) {
        if let Some(handle) = self.handle.take() {
            scheduler.stop_interval(handle);
        }
    }

    pub fn is_running(&self) -> bool {
        self.handle.is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::platform::ManualScheduler;
    use rand::SeedableRng;
    use rand_pcg::Pcg32;

    fn session(seed: u64) -> Session {
        Session::new(Playfield::new(800.0, 600.0), seed)
    }

    #[test]
    fn test_spawn_points_start_off_screen() {
        let field = Playfield::new(800.0, 600.0);
        for edge in Edge::ALL {
            for along in [0.0, 0.5, 0.99] {
                let p = edge.spawn_point(&field, 12.0, along);
                let outside = p.x <= -12.0
                    || p.x >= field.width + 12.0
                    || p.y <= -12.0
                    || p.y >= field.height + 12.0;
                assert!(outside, "{edge:?} spawn {p:?} overlaps the playfield");
            }
        }
        assert_eq!(
            Edge::Bottom.spawn_point(&field, 4.0, 0.5),
            Vec2::new(400.0, 604.0)
        );
    }

    #[test]
    fn test_edges_are_roughly_uniform() {
        let mut rng = Pcg32::seed_from_u64(7);
        let mut counts = [0usize; 4];
        for _ in 0..4000 {
            let edge = Edge::random(&mut rng);
            counts[Edge::ALL.iter().position(|e| *e == edge).unwrap()] += 1;
        }
        for c in counts {
            assert!((800..1200).contains(&c), "edge counts {counts:?}");
        }
    }

    #[test]
    fn test_spawned_enemy_heads_for_player() {
        let mut s = session(3);
        for _ in 0..50 {
            spawn_enemy(&mut s);
        }
        assert_eq!(s.enemies.len(), 50);
        for e in &s.enemies {
            assert!(e.radius >= ENEMY_RADIUS_MIN && e.radius < ENEMY_RADIUS_MAX);
            let vel = e.velocity();
            assert!((vel.length() - ENEMY_SPEED).abs() < 1e-4);
            let to_player = (s.player.pos - e.pos).normalize();
            assert!(vel.normalize().dot(to_player) > 0.999);
        }
    }

    #[test]
    fn test_restart_does_not_duplicate_spawner() {
        let mut sched = ManualScheduler::new();
        let mut spawner = Spawner::new(SPAWN_INTERVAL_MS);
        spawner.start(&mut sched);
        spawner.start(&mut sched);
        assert_eq!(sched.active_intervals().len(), 1);
        assert_eq!(sched.active_intervals()[0].1, SPAWN_INTERVAL_MS);
        assert!(spawner.is_running());

        spawner.stop(&mut sched);
        spawner.stop(&mut sched);
        assert!(sched.active_intervals().is_empty());
        assert_eq!(sched.stopped_intervals.len(), 2);
        assert!(!spawner.is_running());
    }
}
