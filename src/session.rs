use rand::rngs::StdRng;
use rand::SeedableRng;
use tracing::{debug, info, warn};

use crate::difficulty::{Difficulty, DifficultyError};
use crate::scheduler::{Millis, Scheduler, Task, TaskHandle};
use crate::target::{
    resolve_interaction, spawn_target, Bounds, Interaction, Point, TargetId, TargetInstance,
};

/// Points awarded per hit, independent of difficulty
pub const HIT_REWARD: u32 = 10;

const COUNTDOWN_MS: Millis = 1000;

#[derive(Debug, Clone, PartialEq)]
pub struct SessionState {
    pub running: bool,
    pub score: u32,
    pub time_remaining: u32,
    pub difficulty: Difficulty,
    pub active_target: Option<TargetInstance>,
}

impl SessionState {
    fn idle(difficulty: Difficulty) -> Self {
        Self {
            running: false,
            score: 0,
            time_remaining: difficulty.profile().round_duration_secs,
            difficulty,
            active_target: None,
        }
    }
}

/// Final numbers of a round that ran out of time
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RoundSummary {
    pub score: u32,
    pub difficulty: Difficulty,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ClickOutcome {
    Ignored,
    Miss,
    Hit { score: u32 },
}

/// Owns one game: countdown, score, the active target and every pending timer
#[derive(Debug)]
pub struct SessionController {
    state: SessionState,
    last_round: Option<RoundSummary>,
    bounds: Bounds,
    scheduler: Scheduler,
    despawn_timer: Option<TaskHandle>,
    next_target_id: u64,
    rng: StdRng,
}

impl SessionController {
    pub fn new(difficulty: Difficulty, seed: Option<u64>) -> Self {
        Self {
            state: SessionState::idle(difficulty),
            last_round: None,
            bounds: Bounds::new(800.0, 480.0),
            scheduler: Scheduler::new(),
            despawn_timer: None,
            next_target_id: 0,
            rng: seed.map_or_else(StdRng::from_entropy, StdRng::seed_from_u64),
        }
    }

    pub fn state(&self) -> &SessionState {
        &self.state
    }

    pub fn is_running(&self) -> bool {
        self.state.running
    }

    pub fn score(&self) -> u32 {
        self.state.score
    }

    pub fn time_remaining(&self) -> u32 {
        self.state.time_remaining
    }

    pub fn difficulty(&self) -> Difficulty {
        self.state.difficulty
    }

    pub fn active_target(&self) -> Option<&TargetInstance> {
        self.state.active_target.as_ref()
    }

    pub fn last_round(&self) -> Option<RoundSummary> {
        self.last_round
    }

    pub fn bounds(&self) -> Bounds {
        self.bounds
    }

    pub fn set_bounds(&mut self, bounds: Bounds) {
        self.bounds = bounds;
    }

    pub fn pending_tasks(&self) -> usize {
        self.scheduler.pending()
    }

    pub fn start(&mut self, difficulty: Difficulty, now: Millis) {
        if self.state.running {
            debug!("start ignored: hunt already running");
            return;
        }

        self.scheduler.cancel_all();
        self.despawn_timer = None;

        let profile = difficulty.profile();
        self.state = SessionState {
            running: true,
            score: 0,
            time_remaining: profile.round_duration_secs,
            difficulty,
            active_target: None,
        };
        self.last_round = None;

        self.scheduler.every(Task::Countdown, COUNTDOWN_MS, now);
        self.spawn(now);
        self.scheduler
            .every(Task::Spawn, profile.spawn_interval.as_millis() as Millis, now);

        info!(%difficulty, "hunt started");
    }

    pub fn tick(&mut self) {
        if !self.state.running {
            return;
        }

        self.state.time_remaining = self.state.time_remaining.saturating_sub(1);
        if self.state.time_remaining == 0 {
            self.end_round();
        }
    }

    fn end_round(&mut self) {
        self.scheduler.cancel_all();
        self.despawn_timer = None;
        self.state.running = false;
        self.state.time_remaining = 0;
        self.state.active_target = None;
        self.last_round = Some(RoundSummary {
            score: self.state.score,
            difficulty: self.state.difficulty,
        });

        info!(score = self.state.score, "hunt ended");
    }

    pub fn reset(&mut self) {
        self.scheduler.cancel_all();
        self.despawn_timer = None;
        self.state = SessionState::idle(self.state.difficulty);
        self.last_round = None;

        debug!("session reset");
    }

    /// Switches difficulty by preset name; rejected while a hunt is running.
    pub fn set_difficulty(&mut self, name: &str) -> Result<Difficulty, DifficultyError> {
        let difficulty = Difficulty::from_name(name).inspect_err(|e| warn!("{e}"))?;
        self.select_difficulty(difficulty)?;
        Ok(difficulty)
    }

    pub fn select_difficulty(&mut self, difficulty: Difficulty) -> Result<(), DifficultyError> {
        if self.state.running {
            warn!(
                requested = %difficulty,
                current = %self.state.difficulty,
                "difficulty change ignored while running"
            );
            return Err(DifficultyError::SessionRunning);
        }

        self.state.difficulty = difficulty;
        self.state.time_remaining = difficulty.profile().round_duration_secs;
        info!(%difficulty, "difficulty selected");
        Ok(())
    }

    pub fn register_hit(&mut self) {
        if !self.state.running {
            return;
        }
        self.state.score += HIT_REWARD;
    }

    /// Places a fresh target, replacing any current one
    pub fn spawn(&mut self, now: Millis) {
        if !self.state.running {
            return;
        }

        if let Some(handle) = self.despawn_timer.take() {
            self.scheduler.cancel(handle);
        }

        let id = TargetId(self.next_target_id);
        self.next_target_id += 1;

        let target = spawn_target(&mut self.rng, self.bounds, id, now);
        let lifetime = self.state.difficulty.profile().target_lifetime;
        self.despawn_timer = Some(self.scheduler.once(
            Task::Despawn(id),
            lifetime.as_millis() as Millis,
            now,
        ));

        debug!(
            id = id.0,
            kind = %target.kind,
            x = target.position.x,
            y = target.position.y,
            "target spawned"
        );
        self.state.active_target = Some(target);
    }

    fn despawn(&mut self, id: TargetId) {
        let expired = matches!(
            &self.state.active_target,
            Some(target) if target.id == id && !target.hit
        );
        if expired {
            debug!(id = id.0, "target escaped");
            self.state.active_target = None;
            self.despawn_timer = None;
        }
    }

    /// Resolves a click at `point` against the active target.
    ///
    /// A hit consumes the target, scores, and chains straight into the next spawn.
    pub fn interact(&mut self, point: Point, now: Millis) -> ClickOutcome {
        if !self.state.running {
            return ClickOutcome::Ignored;
        }

        let Some(target) = self.state.active_target.as_mut() else {
            return ClickOutcome::Ignored;
        };
        if target.hit {
            return ClickOutcome::Ignored;
        }

        match resolve_interaction(point, target) {
            Interaction::Miss => ClickOutcome::Miss,
            Interaction::Hit => {
                if !target.consume() {
                    return ClickOutcome::Ignored;
                }
                if let Some(handle) = self.despawn_timer.take() {
                    self.scheduler.cancel(handle);
                }
                self.register_hit();
                info!(score = self.state.score, "hit");
                self.spawn(now);
                ClickOutcome::Hit {
                    score: self.state.score,
                }
            }
        }
    }

    /// Runs every timer due at or before `now`, earliest first
    pub fn advance_to(&mut self, now: Millis) {
        while let Some((task, at)) = self.scheduler.pop_due(now) {
            match task {
                Task::Countdown => self.tick(),
                Task::Spawn => self.spawn(at),
                Task::Despawn(id) => self.despawn(id),
            }
        }
    }
}
