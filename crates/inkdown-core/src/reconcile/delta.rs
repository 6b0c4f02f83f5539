//! The reconciliation delta applied by the caller.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::geometry::{Point, Rect};
use crate::timer::Timer;

/// In-place relocation of an existing timer's geometry.
///
/// Only `anchor` and `text_rect` change; identity, target and user-facing
/// state stay with the timer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TimerMigration {
    pub id: Uuid,
    pub anchor: Point,
    pub text_rect: Rect,
}

/// Result of one reconciliation pass.
///
/// Consumed by the persistence, calendar and notification collaborators;
/// the engine calls none of them directly.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ReconcileDelta {
    /// Complete new entities to insert.
    pub new_timers: Vec<Timer>,
    /// Geometry updates for surviving timers.
    pub migrated: Vec<TimerMigration>,
    /// Identifiers of timers whose ink is gone.
    pub zombie_ids: Vec<Uuid>,
}

impl ReconcileDelta {
    /// True when the pass changed nothing.
    pub fn is_empty(&self) -> bool {
        self.new_timers.is_empty() && self.migrated.is_empty() && self.zombie_ids.is_empty()
    }

    /// Human-readable one-liner for diagnostics.
    pub fn summary(&self) -> String {
        if self.is_empty() {
            "No changes.".to_string()
        } else {
            format!(
                "{} new, {} migrated, {} removed.",
                self.new_timers.len(),
                self.migrated.len(),
                self.zombie_ids.len()
            )
        }
    }
}
