//! The caller-side timer collection.
//!
//! The engine is a pure function returning a delta; the board is the
//! authoritative collection the caller owns, applying each delta in one
//! pass. The caller must serialize writes -- the board assumes
//! single-writer semantics and performs no locking. The generation counter
//! increases monotonically with every applied delta; an async caller
//! discards a reconciliation result when a newer generation has since been
//! applied (cancellation by supersession).

use chrono::{DateTime, Local};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::reconcile::ReconcileDelta;
use crate::timer::Timer;

/// The persisted timer collection plus its write generation.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TimerBoard {
    pub timers: Vec<Timer>,
    /// Bumped once per applied delta; never decreases.
    pub generation: u64,
}

impl TimerBoard {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.timers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.timers.is_empty()
    }

    pub fn get(&self, id: Uuid) -> Option<&Timer> {
        self.timers.iter().find(|t| t.id == id)
    }

    /// Remove a timer directly (user action, outside reconciliation).
    pub fn remove(&mut self, id: Uuid) -> Option<Timer> {
        let index = self.timers.iter().position(|t| t.id == id)?;
        Some(self.timers.remove(index))
    }

    /// Apply a reconciliation delta in one pass: zombies are deleted,
    /// migrated timers are relocated in place (identity, target and
    /// user-facing state preserved), new timers appended. A non-empty delta
    /// bumps the generation.
    pub fn apply(&mut self, delta: ReconcileDelta) {
        if delta.is_empty() {
            return;
        }
        self.timers.retain(|t| !delta.zombie_ids.contains(&t.id));
        for migration in &delta.migrated {
            if let Some(timer) = self.timers.iter_mut().find(|t| t.id == migration.id) {
                timer.relocate(migration.text_rect);
            }
        }
        self.timers.extend(delta.new_timers);
        self.generation += 1;
    }

    /// Flip `is_expired` on timers whose target has passed, returning the
    /// ids that newly expired this sweep. Idempotent.
    pub fn sweep_expired(&mut self, now: DateTime<Local>) -> Vec<Uuid> {
        let mut newly_expired = Vec::new();
        for timer in &mut self.timers {
            if !timer.is_expired && timer.is_past_target(now) {
                timer.is_expired = true;
                newly_expired.push(timer.id);
            }
        }
        newly_expired
    }
}
