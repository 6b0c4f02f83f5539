//! Time-expression parsing.
//!
//! Turns a free-written phrase into a precise target time, with exact
//! knowledge of which substring matched and what surrounding text forms a
//! human-readable label. Seven stateless rules run in strict priority order
//! (see [`matchers`]); the first hit wins. Recognizes English, German,
//! Spanish, French and Italian unit and connector words.
//!
//! Parsing is a pure function of (text, now): no match is an expected
//! outcome signalled by `None`, never an error.

mod label;
mod matchers;

use std::ops::Range;

use chrono::{DateTime, Local};
use serde::{Deserialize, Serialize};

pub use matchers::{MAX_COMPOUND_HOURS, MAX_SIMPLE_VALUE};

/// A successfully parsed time expression.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ParsedTime {
    /// Absolute target, always strictly after the `now` it was parsed with.
    pub target_time: DateTime<Local>,
    /// Half-open byte range of the matched expression within the source text.
    pub match_span: Range<usize>,
    /// True for relative countdowns (rules 1-2), false for clock/date targets.
    pub is_duration: bool,
    /// True only for day/month expressions.
    pub is_explicit_date: bool,
    /// Human-readable label derived from the text around the match.
    pub label: Option<String>,
}

impl ParsedTime {
    /// The matched substring within its source text.
    pub fn matched_text<'t>(&self, text: &'t str) -> &'t str {
        &text[self.match_span.clone()]
    }
}

/// Parse the first time expression in `text` relative to `now`.
///
/// Deterministic and infallible; returns `None` when no rule matches, which
/// callers must treat as plain, timer-less ink.
///
/// # Example
/// ```
/// use chrono::{Duration, Local};
/// use inkdown_core::parse;
///
/// let now = Local::now();
/// let parsed = parse("Call Mom in 15 min", now).unwrap();
/// assert_eq!(parsed.target_time, now + Duration::seconds(900));
/// assert_eq!(parsed.label.as_deref(), Some("Call Mom"));
/// ```
pub fn parse(text: &str, now: DateTime<Local>) -> Option<ParsedTime> {
    if text.trim().is_empty() {
        return None;
    }
    for rule in matchers::RULES {
        if let Some(m) = rule(text, now) {
            debug_assert!(!m.span.is_empty() && m.span.end <= text.len());
            let label = label::extract_label(text, &m.span);
            return Some(ParsedTime {
                target_time: m.target_time,
                match_span: m.span,
                is_duration: m.is_duration,
                is_explicit_date: m.is_explicit_date,
                label,
            });
        }
    }
    None
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, TimeZone};

    fn at(y: i32, mo: u32, d: u32, h: u32, mi: u32) -> DateTime<Local> {
        Local.with_ymd_and_hms(y, mo, d, h, mi, 0).unwrap()
    }

    #[test]
    fn bare_duration_has_no_label() {
        let now = at(2026, 3, 10, 14, 0);
        let parsed = parse("15 min", now).unwrap();
        assert_eq!(parsed.target_time, now + Duration::seconds(900));
        assert!(parsed.is_duration);
        assert!(!parsed.is_explicit_date);
        assert_eq!(parsed.label, None);
        assert_eq!(parsed.matched_text("15 min"), "15 min");
    }

    #[test]
    fn duration_with_surrounding_text_gets_label() {
        let now = at(2026, 3, 10, 14, 0);
        let parsed = parse("Call Mom in 15 min", now).unwrap();
        assert_eq!(parsed.target_time, now + Duration::seconds(900));
        assert_eq!(parsed.label.as_deref(), Some("Call Mom"));
    }

    #[test]
    fn compound_wins_over_simple() {
        let now = at(2026, 3, 10, 14, 0);
        let parsed = parse("1h 30m", now).unwrap();
        assert_eq!(parsed.target_time, now + Duration::seconds(5400));
        assert_eq!(parsed.matched_text("1h 30m"), "1h 30m");
    }

    #[test]
    fn clock_time_ahead_stays_today() {
        let now = at(2026, 3, 10, 14, 0);
        let parsed = parse("2:30 PM", now).unwrap();
        assert_eq!(parsed.target_time, at(2026, 3, 10, 14, 30));
        assert!(!parsed.is_duration);
    }

    #[test]
    fn clock_time_past_rolls_to_tomorrow() {
        let now = at(2026, 3, 10, 15, 0);
        let parsed = parse("2:30 PM", now).unwrap();
        assert_eq!(parsed.target_time, at(2026, 3, 11, 14, 30));
    }

    #[test]
    fn explicit_date_defaults_to_nine() {
        let now = at(2026, 3, 10, 14, 0);
        let parsed = parse("03.02", now).unwrap();
        assert_eq!(parsed.target_time, at(2027, 2, 3, 9, 0));
        assert!(parsed.is_explicit_date);
        assert_eq!(parsed.label, None);
    }

    #[test]
    fn unparseable_text_is_none() {
        let now = at(2026, 3, 10, 14, 0);
        assert_eq!(parse("buy milk", now), None);
        assert_eq!(parse("", now), None);
        assert_eq!(parse("   ", now), None);
    }

    #[test]
    fn label_never_reparses_to_a_match() {
        // No double-counting: the stripped remainder must not itself parse.
        let now = at(2026, 3, 10, 14, 0);
        for text in [
            "Call Mom in 15 min",
            "Standup at 5",
            "Pizza 1h 30m",
            "Meeting 2:30 pm",
            "Flug 24.12 18:30",
            "dentist 9pm",
        ] {
            let parsed = parse(text, now).unwrap();
            if let Some(label) = parsed.label {
                assert_eq!(parse(&label, now), None, "label {label:?} re-parsed");
            }
        }
    }

    #[test]
    fn priority_prevents_duration_reading_as_clock_times() {
        let now = at(2026, 3, 10, 14, 0);
        let parsed = parse("2h 30m", now).unwrap();
        assert!(parsed.is_duration);
        assert_eq!(parsed.target_time, now + Duration::seconds(9000));
    }

    #[test]
    fn target_is_always_strictly_future() {
        let now = at(2026, 3, 10, 14, 0);
        for text in [
            "15 min",
            "2:30 pm",
            "14:00",
            "at 5",
            "9am",
            "03.02",
            "10.03 14:00",
        ] {
            let parsed = parse(text, now).unwrap();
            assert!(parsed.target_time > now, "{text} produced a past target");
        }
    }

    #[test]
    fn match_span_lies_within_text() {
        let now = at(2026, 3, 10, 14, 0);
        let text = "Kuchen aus dem Ofen in 25 Minuten";
        let parsed = parse(text, now).unwrap();
        assert!(parsed.match_span.end <= text.len());
        assert!(!parsed.match_span.is_empty());
        assert_eq!(parsed.matched_text(text), "25 Minuten");
    }
}
