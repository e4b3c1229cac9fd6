//! Loop driver
//!
//! `Game` owns the session, the spawner and the player record, and is the
//! only thing the platform calls into: frame callbacks, spawn-timer
//! callbacks, clicks and the modal button.

use glam::Vec2;

use crate::persistence::{PlayerRecord, RecordStore};
use crate::platform::Scheduler;
use crate::renderer::{DrawSurface, render};
use crate::settings::Settings;
use crate::sim::{GameEvent, Playfield, Session, SessionPhase, Spawner, spawn_enemy, tick};

/// End-of-session numbers for the summary modal
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Summary {
    pub score: u64,
    pub best_score: u64,
    /// Beat the previous best
    pub new_best: bool,
}

/// What the page should show over the playfield
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Modal {
    /// Before the first session; `best` is `None` for a new player
    Welcome { best: Option<u64> },
    GameOver(Summary),
}

impl Modal {
    pub fn title(&self) -> &'static str {
        match self {
            Modal::Welcome { .. } => "Welcome to Ping Game!",
            Modal::GameOver(_) => "Game over!",
        }
    }

    pub fn lines(&self) -> Vec<String> {
        match self {
            Modal::Welcome { best: None } => {
                vec!["Pop as many bubbles as you can before they reach you".to_string()]
            }
            Modal::Welcome { best: Some(best) } => {
                vec![format!("Try to beat your best score: {} points", best)]
            }
            Modal::GameOver(summary) => {
                let mut lines = vec![format!("Your score: {} points", summary.score)];
                if summary.new_best {
                    lines.push("New best score!".to_string());
                }
                lines.push(format!("Best score: {} points", summary.best_score));
                lines
            }
        }
    }

    pub fn button_label(&self) -> &'static str {
        match self {
            Modal::Welcome { .. } => "Play",
            Modal::GameOver(_) => "Play again?",
        }
    }
}

/// The game: one session at a time, any number of sessions per page
pub struct Game {
    pub session: Session,
    spawner: Spawner,
    record: PlayerRecord,
    store: Box<dyn RecordStore>,
    welcome: Modal,
}

impl Game {
    /// Read the player record and prepare an idle session
    pub fn new(
        playfield: Playfield,
        settings: &Settings,
        mut store: Box<dyn RecordStore>,
        seed: u64,
    ) -> Self {
        let loaded = PlayerRecord::load_or_init(store.as_mut());
        let welcome = Modal::Welcome {
            best: loaded.returning.then_some(loaded.record.best_score),
        };

        let mut session = Session::new(playfield, seed);
        session.max_particles = settings.max_particles();

        log::info!(
            "Game ready: {}x{} playfield, seed {}",
            playfield.width,
            playfield.height,
            seed
        );

        Self {
            session,
            spawner: Spawner::new(settings.spawn_interval_ms),
            record: loaded.record,
            store,
            welcome,
        }
    }

    /// Modal to show before the first session
    pub fn welcome(&self) -> Modal {
        self.welcome
    }

    pub fn record(&self) -> PlayerRecord {
        self.record
    }

    pub fn phase(&self) -> SessionPhase {
        self.session.phase
    }

    pub fn spawner(&self) -> &Spawner {
        &self.spawner
    }

    /// Begin a session from Idle. Returns false if one is already running.
    pub fn start(&mut self, scheduler: &mut dyn Scheduler) -> bool {
        if self.session.phase != SessionPhase::Idle {
            log::warn!("start ignored in phase {:?}", self.session.phase);
            return false;
        }

        if let Some(stale) = self.session.frame_handle.take() {
            scheduler.cancel_frame(stale);
        }
        self.session.phase = SessionPhase::Running;
        self.session.frame_handle = Some(scheduler.request_frame());
        self.spawner.start(scheduler);

        log::info!(
            "Session started, spawning every {} ms",
            self.spawner.period_ms()
        );
        true
    }

    /// Reset after a game over and begin a new session
    pub fn restart(&mut self, scheduler: &mut dyn Scheduler) -> bool {
        if self.session.phase == SessionPhase::Running {
            log::warn!("restart ignored while running");
            return false;
        }
        self.session.init();
        self.start(scheduler)
    }

    /// The modal button: start from Idle, restart after a game over
    pub fn play(&mut self, scheduler: &mut dyn Scheduler) -> bool {
        match self.session.phase {
            SessionPhase::Idle => self.start(scheduler),
            SessionPhase::GameOver => self.restart(scheduler),
            SessionPhase::Running => false,
        }
    }

    /// Click on the playfield: fire toward the click
    pub fn fire(&mut self, target: Vec2) -> Option<u32> {
        if !self.session.can_play() {
            return None;
        }
        Some(self.session.fire_at(target))
    }

    /// Spawn timer callback
    pub fn on_spawn_timer(&mut self) -> Option<u32> {
        if !self.session.can_play() {
            log::debug!("Spawn tick outside a session ignored");
            return None;
        }
        Some(spawn_enemy(&mut self.session))
    }

    /// Frame callback: reschedule, simulate one tick, draw.
    ///
    /// Returns the summary when this frame ended the session.
    pub fn on_frame(
        &mut self,
        scheduler: &mut dyn Scheduler,
        surface: &mut dyn DrawSurface,
    ) -> Option<Summary> {
        if self.session.phase != SessionPhase::Running {
            return None;
        }
        // The request that fired is spent; this one is what game over cancels
        self.session.frame_handle = Some(scheduler.request_frame());

        let events = tick(&mut self.session);
        let player_hit = events
            .iter()
            .any(|e| matches!(e, GameEvent::PlayerHit { .. }));

        let summary = if player_hit {
            self.game_over(scheduler)
        } else {
            None
        };

        render(&self.session, surface);
        summary
    }

    /// End the running session: cancel the frame loop and the spawner,
    /// persist the record, and return the summary to show.
    pub fn game_over(&mut self, scheduler: &mut dyn Scheduler) -> Option<Summary> {
        if self.session.phase != SessionPhase::Running {
            return None;
        }

        if let Some(handle) = self.session.frame_handle.take() {
            scheduler.cancel_frame(handle);
        }
        self.spawner.stop(scheduler);
        self.session.phase = SessionPhase::GameOver;

        let score = self.session.score;
        let previous_best = self.record.best_score;
        self.record = self.record.after_session(score);
        if let Err(e) = self.record.save(self.store.as_mut()) {
            log::error!("Failed to save player record: {}", e);
        }

        log::info!(
            "Game over: score {} (best {}) after {} ticks",
            score,
            self.record.best_score,
            self.session.time_ticks
        );

        Some(Summary {
            score,
            best_score: self.record.best_score,
            new_best: score > previous_best,
        })
    }
}
