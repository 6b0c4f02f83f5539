//! Reconciliation of OCR passes against the materialized timer collection.

mod delta;
mod engine;
mod observation;

pub use delta::{ReconcileDelta, TimerMigration};
pub use engine::{
    EngineConfig, ReconcileEngine, DEFAULT_MATCH_DISTANCE, MAX_MATCH_DISTANCE, MIN_MATCH_DISTANCE,
};
pub use observation::OcrObservation;
