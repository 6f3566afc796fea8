mod backend;
mod record;

pub use backend::{FileStore, KeyValueStore, MemoryStore};
pub use record::GameRecord;

use chrono::{DateTime, Utc};
use log::{info, warn};
use serde_json::Value;

use crate::error::{PersistenceWarning, QuizError, StoreError};

const CORRECT: &str = "correct";
const TOTAL: &str = "total";
const GAMES_COUNT: &str = "gamesCount";
const BEST_GAME: &str = "bestGame";

#[derive(Default, Debug, Clone, Copy, PartialEq, Eq)]
struct StatisticsState {
    cumulative_correct: u64,
    cumulative_total: u64,
    games_count: u64,
    best_game: GameRecord,
}

impl StatisticsState {
    fn accuracy(&self) -> Option<f64> {
        if self.cumulative_total == 0 {
            None
        } else {
            Some(self.cumulative_correct as f64 / self.cumulative_total as f64)
        }
    }

    fn snapshot(&self) -> StatisticsSnapshot {
        StatisticsSnapshot {
            total_accuracy: self.accuracy(),
            games_count: self.games_count,
            best_game: self.best_game,
            cumulative_correct: self.cumulative_correct,
            cumulative_total: self.cumulative_total,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct StatisticsSnapshot {
    /// `None` until at least one answer has been stored.
    pub total_accuracy: Option<f64>,
    pub games_count: u64,
    pub best_game: GameRecord,
    pub cumulative_correct: u64,
    pub cumulative_total: u64,
}

type WarningHook = Box<dyn FnMut(&PersistenceWarning)>;

/// Lifetime statistics over a durable key-value backend.
pub struct StatisticsStore<B: KeyValueStore> {
    backend: B,
    state: Option<StatisticsState>,
    clock: fn() -> DateTime<Utc>,
    on_warning: Option<WarningHook>,
}

impl<B: KeyValueStore> StatisticsStore<B> {
    pub fn new(backend: B) -> Self {
        Self {
            backend,
            state: None,
            clock: Utc::now,
            on_warning: None,
        }
    }

    pub fn with_clock(mut self, clock: fn() -> DateTime<Utc>) -> Self {
        self.clock = clock;
        self
    }

    /// Called for every write that could not be persisted.
    pub fn with_warning_hook(mut self, hook: impl FnMut(&PersistenceWarning) + 'static) -> Self {
        self.on_warning = Some(Box::new(hook));
        self
    }

    pub fn backend(&self) -> &B {
        &self.backend
    }

    pub fn store(&mut self, correct: usize, total: usize) -> Result<StatisticsSnapshot, QuizError> {
        if correct > total {
            return Err(QuizError::InvalidInput(format!(
                "correct answers ({correct}) exceed total ({total})"
            )));
        }
        let (Ok(correct), Ok(total)) = (u32::try_from(correct), u32::try_from(total)) else {
            return Err(QuizError::InvalidInput(format!(
                "round of {total} questions is too large to record"
            )));
        };

        let candidate = GameRecord {
            correct,
            total,
            played_at: (self.clock)(),
        };

        let mut state = self.load_state();
        state.cumulative_correct = state.cumulative_correct.saturating_add(u64::from(correct));
        state.cumulative_total = state.cumulative_total.saturating_add(u64::from(total));
        state.games_count = state.games_count.saturating_add(1);
        let new_best = state.best_game.is_beaten_by(&candidate);
        if new_best {
            state.best_game = candidate;
        }
        self.state = Some(state);

        self.write(CORRECT, Value::from(state.cumulative_correct));
        self.write(TOTAL, Value::from(state.cumulative_total));
        self.write(GAMES_COUNT, Value::from(state.games_count));
        if new_best {
            match serde_json::to_value(candidate) {
                Ok(value) => self.write(BEST_GAME, value),
                Err(e) => self.report(BEST_GAME, e.into()),
            }
        }

        info!(
            "stored round {correct}/{total}, games played: {}{}",
            state.games_count,
            if new_best { ", new record" } else { "" }
        );
        Ok(state.snapshot())
    }

    pub fn snapshot(&self) -> StatisticsSnapshot {
        match self.state {
            Some(state) => state.snapshot(),
            None => self.read_state().snapshot(),
        }
    }

    pub fn total_accuracy(&self) -> Option<f64> {
        self.snapshot().total_accuracy
    }

    pub fn games_count(&self) -> u64 {
        self.snapshot().games_count
    }

    pub fn best_game(&self) -> GameRecord {
        self.snapshot().best_game
    }

    pub fn reset(&mut self) {
        self.state = Some(StatisticsState::default());
        for key in [CORRECT, TOTAL, GAMES_COUNT, BEST_GAME] {
            if let Err(e) = self.backend.remove(key) {
                self.report(key, e);
            }
        }
        info!("statistics reset");
    }

    fn load_state(&mut self) -> StatisticsState {
        match self.state {
            Some(state) => state,
            None => {
                let state = self.read_state();
                self.state = Some(state);
                state
            }
        }
    }

    fn read_state(&self) -> StatisticsState {
        let state = StatisticsState {
            cumulative_correct: self.read_count(CORRECT),
            cumulative_total: self.read_count(TOTAL),
            games_count: self.read_count(GAMES_COUNT),
            best_game: self
                .backend
                .get(BEST_GAME)
                .and_then(|value| serde_json::from_value::<GameRecord>(value).ok())
                .filter(|record| record.correct <= record.total)
                .unwrap_or_default(),
        };

        if state.cumulative_correct > state.cumulative_total {
            warn!(
                "stored statistics are inconsistent ({} correct of {} total), starting over",
                state.cumulative_correct, state.cumulative_total
            );
            return StatisticsState::default();
        }
        state
    }

    fn read_count(&self, key: &str) -> u64 {
        self.backend
            .get(key)
            .and_then(|value| value.as_u64())
            .unwrap_or(0)
    }

    fn write(&mut self, key: &'static str, value: Value) {
        if let Err(e) = self.backend.set(key, value) {
            self.report(key, e);
        }
    }

    fn report(&mut self, key: &'static str, error: StoreError) {
        let warning = PersistenceWarning { key, error };
        warn!("{warning}");
        if let Some(hook) = self.on_warning.as_mut() {
            hook(&warning);
        }
    }
}
