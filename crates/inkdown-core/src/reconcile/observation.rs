//! OCR observations and their per-pass resolution.

use chrono::{DateTime, Local};
use serde::{Deserialize, Serialize};

use crate::geometry::{Point, Rect};
use crate::parse::{parse, ParsedTime};
use crate::text::{canonical_token, normalize};

/// One OCR-recognized text line, as delivered by the OCR boundary.
///
/// Candidates are ranked best-first and there is at least one. The bounding
/// box is normalized to [0,1]x[0,1] within the scanned rectangle, y axis
/// increasing upward; conversion to content space happens in this crate.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OcrObservation {
    pub candidates: Vec<String>,
    pub bounding_box: Rect,
}

impl OcrObservation {
    pub fn new(candidates: Vec<String>, bounding_box: Rect) -> Self {
        Self {
            candidates,
            bounding_box,
        }
    }

    /// The top-ranked candidate, if any.
    pub fn primary(&self) -> Option<&str> {
        self.candidates.first().map(String::as_str)
    }
}

/// An observation resolved against a scan region and a parse attempt.
///
/// Retained for every observation regardless of parseability: unparseable
/// lines still participate in the matching predicate through their
/// normalized candidate texts.
#[derive(Debug, Clone)]
pub(crate) struct Sighting {
    /// First candidate (in rank order) that parses, with its parse.
    pub parsed: Option<(String, ParsedTime)>,
    /// Content-space bounding box.
    pub rect: Rect,
    /// Content-space center.
    pub center: Point,
    /// Canonical token of the matched substring, when one parsed.
    pub token: Option<String>,
    /// Trimmed, lowercased form of every candidate.
    pub normalized: Vec<String>,
    /// Set once claimed by a migration; a claimed sighting is never reused.
    pub claimed: bool,
}

impl Sighting {
    pub fn resolve(
        observation: &OcrObservation,
        scan_region: Rect,
        now: DateTime<Local>,
    ) -> Self {
        let rect = Rect::from_normalized(observation.bounding_box, scan_region);
        let parsed = observation
            .candidates
            .iter()
            .find_map(|candidate| parse(candidate, now).map(|p| (candidate.clone(), p)));
        let token = parsed
            .as_ref()
            .map(|(text, p)| canonical_token(p.matched_text(text)))
            .filter(|t| !t.is_empty());
        Self {
            parsed,
            rect,
            center: rect.center(),
            token,
            normalized: observation.candidates.iter().map(|c| normalize(c)).collect(),
            claimed: false,
        }
    }
}
