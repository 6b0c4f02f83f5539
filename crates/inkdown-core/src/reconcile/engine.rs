//! The reconciliation engine.
//!
//! Consumes one OCR pass -- a scan region plus observations -- together with
//! the current timer collection and produces a delta: timers to create,
//! timers to relocate in place, and identifiers to delete. Pure given its
//! inputs; no I/O, no hidden state, no locking. The caller serializes writes
//! to its collection and applies the delta transactionally.
//!
//! Three ordered phases:
//!
//! 1. **Migration**: a timer whose phrase disappeared from its old position
//!    but reappeared elsewhere in the region is relocated, keeping its
//!    identity and countdown state.
//! 2. **Zombie detection**: a timer inside the scanned region with no
//!    matching observation lost its ink and is reported for deletion.
//!    Timers outside the region are never evaluated -- a partial rescan
//!    must not delete what it did not look at.
//! 3. **Creation**: parseable observations not represented by any existing
//!    timer become new timers.

use std::collections::HashSet;

use chrono::{DateTime, Local};
use serde::{Deserialize, Serialize};

use crate::geometry::{Point, Rect};
use crate::parse::parse;
use crate::reconcile::delta::{ReconcileDelta, TimerMigration};
use crate::reconcile::observation::{OcrObservation, Sighting};
use crate::text::{canonical_token, normalize};
use crate::timer::{InkSampler, Timer};

/// Default spatial match threshold in content units.
///
/// Empirically tuned, not derived; within this radius an observation and a
/// timer anchor count as the same spot on the canvas.
pub const DEFAULT_MATCH_DISTANCE: f64 = 50.0;

/// Lower clamp for the match threshold.
pub const MIN_MATCH_DISTANCE: f64 = 1.0;

/// Upper clamp for the match threshold.
pub const MAX_MATCH_DISTANCE: f64 = 10_000.0;

/// Tuning constants for the reconciliation engine.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EngineConfig {
    /// Spatial match threshold in content units.
    pub match_distance: f64,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            match_distance: DEFAULT_MATCH_DISTANCE,
        }
    }
}

impl EngineConfig {
    /// Create a new config with default values.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the spatial match threshold, clamped to a sane range.
    pub fn with_match_distance(mut self, distance: f64) -> Self {
        self.match_distance = distance.clamp(MIN_MATCH_DISTANCE, MAX_MATCH_DISTANCE);
        self
    }

    /// Squared threshold; all proximity checks compare squared distances.
    pub fn match_distance_sq(&self) -> f64 {
        self.match_distance * self.match_distance
    }
}

/// Textual identity of a stored timer, precomputed once per pass.
struct TimerIdentity {
    /// Trimmed, lowercased original text.
    normalized: String,
    /// Canonical token of the matched span within the original text, falling
    /// back to the whole text when it no longer parses.
    token: Option<String>,
}

impl TimerIdentity {
    fn of(timer: &Timer, now: DateTime<Local>) -> Self {
        let token = match parse(&timer.original_text, now) {
            Some(parsed) => canonical_token(parsed.matched_text(&timer.original_text)),
            None => canonical_token(&timer.original_text),
        };
        Self {
            normalized: normalize(&timer.original_text),
            token: Some(token).filter(|t| !t.is_empty()),
        }
    }
}

/// Stateless-per-invocation engine reconciling OCR passes against timers.
#[derive(Debug, Clone, Default)]
pub struct ReconcileEngine {
    config: EngineConfig,
}

impl ReconcileEngine {
    /// Create an engine with default tuning.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create an engine with custom tuning.
    pub fn with_config(config: EngineConfig) -> Self {
        Self { config }
    }

    /// Get the current configuration.
    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    /// Reconcile one OCR pass against the existing timer collection.
    ///
    /// `scan_region` is the content-space rectangle the OCR actually looked
    /// at; `observations` carry boxes normalized to it. Never fails: an
    /// empty observation list or a degenerate region yields an empty delta.
    pub fn reconcile(
        &self,
        scan_region: Rect,
        observations: &[OcrObservation],
        timers: &[Timer],
        sampler: &dyn InkSampler,
        now: DateTime<Local>,
    ) -> ReconcileDelta {
        if scan_region.is_degenerate() {
            return ReconcileDelta::default();
        }
        let mut sightings: Vec<Sighting> = observations
            .iter()
            .filter(|o| !o.candidates.is_empty())
            .map(|o| Sighting::resolve(o, scan_region, now))
            .collect();
        // An empty pass is suspect (OCR found nothing at all); treat it as
        // no information rather than as evidence of erased ink.
        if sightings.is_empty() {
            return ReconcileDelta::default();
        }

        let threshold_sq = self.config.match_distance_sq();
        let identities: Vec<TimerIdentity> =
            timers.iter().map(|t| TimerIdentity::of(t, now)).collect();

        // Phase 1: migration. Runs first so migrated timers are excluded
        // from zombie detection and their claimed sightings from creation.
        let mut migrated = Vec::new();
        let mut migrated_ids: HashSet<uuid::Uuid> = HashSet::new();
        let mut migrated_centers: Vec<Point> = Vec::new();
        for (timer, identity) in timers.iter().zip(&identities) {
            if !in_scope(timer, scan_region) {
                continue;
            }
            if sightings
                .iter()
                .any(|s| is_match(timer, identity, s, threshold_sq))
            {
                // Still present where it was.
                continue;
            }
            let relocated = sightings
                .iter()
                .enumerate()
                .filter(|(_, s)| !s.claimed)
                .filter(|(_, s)| is_equivalent(identity, s))
                .filter(|(_, s)| timer.anchor.distance_sq(&s.center) >= threshold_sq)
                .min_by(|(_, a), (_, b)| {
                    let da = timer.anchor.distance_sq(&a.center);
                    let db = timer.anchor.distance_sq(&b.center);
                    da.partial_cmp(&db).unwrap_or(std::cmp::Ordering::Equal)
                })
                .map(|(index, _)| index);
            if let Some(index) = relocated {
                sightings[index].claimed = true;
                migrated_ids.insert(timer.id);
                migrated_centers.push(sightings[index].center);
                migrated.push(TimerMigration {
                    id: timer.id,
                    anchor: sightings[index].center,
                    text_rect: sightings[index].rect,
                });
            }
        }

        // Phase 2: zombie detection, bounded to the scanned region.
        let mut zombie_ids = Vec::new();
        for (timer, identity) in timers.iter().zip(&identities) {
            if migrated_ids.contains(&timer.id) || !in_scope(timer, scan_region) {
                continue;
            }
            if !sightings
                .iter()
                .any(|s| is_match(timer, identity, s, threshold_sq))
            {
                zombie_ids.push(timer.id);
            }
        }

        // Phase 3: creation.
        let mut new_timers = Vec::new();
        for sighting in sightings.iter().filter(|s| !s.claimed) {
            let Some((text, parsed)) = &sighting.parsed else {
                continue;
            };
            let represented = timers
                .iter()
                .zip(&identities)
                .any(|(timer, identity)| is_match(timer, identity, sighting, threshold_sq));
            if represented {
                continue;
            }
            // A phrase landing on a just-migrated timer's new spot is that
            // timer, not a second one.
            if migrated_centers
                .iter()
                .any(|center| center.distance_sq(&sighting.center) < threshold_sq)
            {
                continue;
            }
            new_timers.push(Timer::from_parsed(
                parsed,
                text.clone(),
                sighting.rect,
                sampler.sample_color(&sighting.rect),
            ));
        }

        ReconcileDelta {
            new_timers,
            migrated,
            zombie_ids,
        }
    }
}

/// Whether a timer is evaluated by this pass at all: anchor inside the
/// region, or stored rect intersecting it.
fn in_scope(timer: &Timer, scan_region: Rect) -> bool {
    scan_region.contains(timer.anchor) || scan_region.intersects(&timer.text_rect)
}

/// The matching predicate: spatially close and textually equivalent.
fn is_match(timer: &Timer, identity: &TimerIdentity, sighting: &Sighting, threshold_sq: f64) -> bool {
    timer.anchor.distance_sq(&sighting.center) < threshold_sq
        && (contains_text(identity, sighting) || token_equal(identity, sighting))
}

/// Migration equivalence: exact normalized-text match or equal token; the
/// spatial condition is inverted (far) and checked by the caller.
fn is_equivalent(identity: &TimerIdentity, sighting: &Sighting) -> bool {
    sighting
        .normalized
        .iter()
        .any(|candidate| candidate == &identity.normalized)
        || token_equal(identity, sighting)
}

fn contains_text(identity: &TimerIdentity, sighting: &Sighting) -> bool {
    !identity.normalized.is_empty()
        && sighting
            .normalized
            .iter()
            .any(|candidate| candidate.contains(&identity.normalized))
}

fn token_equal(identity: &TimerIdentity, sighting: &Sighting) -> bool {
    match (&identity.token, &sighting.token) {
        (Some(a), Some(b)) => a == b,
        _ => false,
    }
}
