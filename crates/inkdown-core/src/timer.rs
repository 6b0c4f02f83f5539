//! The timer entity and its external collaborator seams.

use chrono::{DateTime, Duration, Local};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::geometry::{Point, Rect};
use crate::parse::ParsedTime;

/// Ink color sampled near a timer's handwriting, as normalized RGBA.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PenColor {
    pub red: f32,
    pub green: f32,
    pub blue: f32,
    pub alpha: f32,
}

impl PenColor {
    pub fn new(red: f32, green: f32, blue: f32, alpha: f32) -> Self {
        Self {
            red,
            green,
            blue,
            alpha,
        }
    }
}

impl Default for PenColor {
    /// Opaque black, the fallback when no ink sample is available.
    fn default() -> Self {
        Self::new(0.0, 0.0, 0.0, 1.0)
    }
}

/// Resolves a timer's pen color by sampling ink near its text rectangle.
///
/// Ink sampling belongs to the canvas layer; the reconciliation engine only
/// sees this interface, injected by the caller.
pub trait InkSampler {
    fn sample_color(&self, text_rect: &Rect) -> PenColor;
}

/// Sampler used when no canvas is attached; every timer gets the default pen.
#[derive(Debug, Clone, Copy, Default)]
pub struct DefaultInkSampler;

impl InkSampler for DefaultInkSampler {
    fn sample_color(&self, _text_rect: &Rect) -> PenColor {
        PenColor::default()
    }
}

/// A live countdown anchored to recognized handwriting.
///
/// Owned by the caller's persisted collection. The reconciliation engine
/// creates timers, relocates their geometry in place on migration (never
/// touching identity, target or user-facing state), and reports zombies for
/// the caller to delete.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Timer {
    /// Stable opaque identity; survives migration.
    pub id: Uuid,
    /// The OCR text the timer was created from.
    pub original_text: String,
    pub target_time: DateTime<Local>,
    /// Content-space center of the recognized text.
    pub anchor: Point,
    /// Content-space bounding box of the recognized text. `anchor` is its
    /// center whenever it is non-degenerate.
    pub text_rect: Rect,
    pub is_duration: bool,
    pub is_explicit_date: bool,
    pub label: Option<String>,
    pub pen_color: PenColor,
    pub is_expired: bool,
    pub is_dismissed: bool,
    /// Set by the calendar collaborator after creation; never set here.
    pub calendar_event_id: Option<String>,
}

impl Timer {
    /// Materialize a timer from a parsed observation.
    pub fn from_parsed(
        parsed: &ParsedTime,
        original_text: impl Into<String>,
        text_rect: Rect,
        pen_color: PenColor,
    ) -> Self {
        Self {
            id: Uuid::new_v4(),
            original_text: original_text.into(),
            target_time: parsed.target_time,
            anchor: text_rect.center(),
            text_rect,
            is_duration: parsed.is_duration,
            is_explicit_date: parsed.is_explicit_date,
            label: parsed.label.clone(),
            pen_color,
            is_expired: false,
            is_dismissed: false,
            calendar_event_id: None,
        }
    }

    /// Relocate the timer's geometry in place, preserving everything else.
    pub fn relocate(&mut self, text_rect: Rect) {
        self.text_rect = text_rect;
        self.anchor = text_rect.center();
    }

    /// Remaining time until the target; negative once passed.
    pub fn remaining(&self, now: DateTime<Local>) -> Duration {
        self.target_time - now
    }

    /// Whether the target has passed at `now`.
    pub fn is_past_target(&self, now: DateTime<Local>) -> bool {
        self.target_time <= now
    }
}
