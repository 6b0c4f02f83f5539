//! The seven ordered pattern-matching rules.
//!
//! Each rule is a pure function of (text, now). The cascade in
//! [`super::parse`] tries them in priority order and takes the first hit;
//! earlier rules win over later ones so a compound duration like "2h 30m" is
//! never read as two independent clock times.
//!
//! Patterns compile once into `static LazyLock<Regex>` cells. A rule whose
//! regex matches but whose numeric fields are out of range rejects that
//! match silently and moves to the next occurrence in the text; no partial
//! time is ever produced from an out-of-range field.

use std::ops::Range;
use std::sync::LazyLock;

use chrono::{DateTime, Datelike, Duration, Local, NaiveDate, NaiveDateTime, NaiveTime, TimeZone};
use regex::{Captures, Regex};

use crate::lexicon::{alternation, AT_CONNECTORS, HOUR_UNITS, MINUTE_UNITS, SECOND_UNITS};

/// Maximum whole hours accepted by the compound-duration rule.
pub const MAX_COMPOUND_HOURS: i64 = 48;

/// Maximum value accepted by the simple-duration rule, regardless of unit.
pub const MAX_SIMPLE_VALUE: f64 = 2880.0;

/// Successful output of a single rule, before label extraction.
#[derive(Debug, Clone)]
pub(crate) struct RuleMatch {
    pub target_time: DateTime<Local>,
    pub span: Range<usize>,
    pub is_duration: bool,
    pub is_explicit_date: bool,
}

type Rule = fn(&str, DateTime<Local>) -> Option<RuleMatch>;

/// The cascade, in strict priority order.
pub(crate) const RULES: &[Rule] = &[
    compound_duration,
    simple_duration,
    twelve_hour,
    twenty_four_hour,
    at_prefixed,
    bare_hour_meridiem,
    date_with_time,
];

// Meridiem suffix covering "am", "AM", "a.m.", "p m", "pm." variants.
const MERIDIEM: &str = r"(?P<mer>[ap])\.?\s?m\b\.?";

static COMPOUND_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(&format!(
        r"(?i)\b(\d{{1,2}})\s*(?:{hours})\s*(\d{{1,2}})\s*(?:{minutes})\b",
        hours = alternation(HOUR_UNITS),
        minutes = alternation(MINUTE_UNITS),
    ))
    .expect("Invalid compound duration regex")
});

static SIMPLE_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(&format!(
        r"(?i)\b(\d+(?:[.,]\d+)?)\s*(?:(?P<sec>{secs})|(?P<min>{mins})|(?P<hour>{hours}))\b",
        secs = alternation(SECOND_UNITS),
        mins = alternation(MINUTE_UNITS),
        hours = alternation(HOUR_UNITS),
    ))
    .expect("Invalid simple duration regex")
});

static TWELVE_HOUR_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(&format!(r"(?i)\b(\d{{1,2}})[:.](\d{{2}})\s*{MERIDIEM}"))
        .expect("Invalid 12-hour regex")
});

static TWENTY_FOUR_HOUR_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\b(\d{1,2})([:.])(\d{2})\b").expect("Invalid 24-hour regex"));

/// Date token directly before a clock time, e.g. the "3.2 " in "3.2 15:30".
static DATE_PREFIX_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(\d{1,2})[./](\d{1,2})\s*$").expect("Invalid date prefix regex")
});

static AT_PREFIXED_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(&format!(
        r"(?i)(?:\b(?:{connectors})\b|@)\s*(\d{{1,2}})(?:[:.](\d{{2}}))?(?:\s*{MERIDIEM})?",
        connectors = alternation(AT_CONNECTORS),
    ))
    .expect("Invalid at-prefixed regex")
});

static BARE_HOUR_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(&format!(r"(?i)\b(\d{{1,2}})\s*{MERIDIEM}")).expect("Invalid bare hour regex")
});

static DATE_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"\b(\d{1,2})[./](\d{1,2})(?:\s+(\d{1,2})[:.](\d{2}))?\b")
        .expect("Invalid date regex")
});

/// Rule 1: `<hours><unit> <minutes><unit>`, e.g. "1h 30m", "2 Std 15 Min".
fn compound_duration(text: &str, now: DateTime<Local>) -> Option<RuleMatch> {
    for caps in COMPOUND_RE.captures_iter(text) {
        let hours: i64 = caps[1].parse().ok()?;
        let minutes: i64 = caps[2].parse().ok()?;
        if hours > MAX_COMPOUND_HOURS || minutes > 59 {
            continue;
        }
        let seconds = hours * 3600 + minutes * 60;
        if seconds <= 0 {
            continue;
        }
        return Some(duration_match(now, seconds, span_of(&caps)));
    }
    None
}

/// Rule 2: `<value><unit>` with decimal values honored ("1.5h" = 5400 s).
fn simple_duration(text: &str, now: DateTime<Local>) -> Option<RuleMatch> {
    for caps in SIMPLE_RE.captures_iter(text) {
        let value: f64 = caps[1].replace(',', ".").parse().ok()?;
        if value <= 0.0 || value > MAX_SIMPLE_VALUE {
            continue;
        }
        let factor = if caps.name("sec").is_some() {
            1.0
        } else if caps.name("min").is_some() {
            60.0
        } else {
            3600.0
        };
        let seconds = (value * factor).round() as i64;
        if seconds <= 0 {
            continue;
        }
        return Some(duration_match(now, seconds, span_of(&caps)));
    }
    None
}

/// Rule 3: `H:MM am|pm`, dotted separator and meridiem variants included.
fn twelve_hour(text: &str, now: DateTime<Local>) -> Option<RuleMatch> {
    for caps in TWELVE_HOUR_RE.captures_iter(text) {
        let hour: u32 = caps[1].parse().ok()?;
        let minute: u32 = caps[2].parse().ok()?;
        if !(1..=12).contains(&hour) || minute > 59 {
            continue;
        }
        let hour24 = to_24_hour(hour, is_pm(&caps));
        if let Some(target) = upcoming_time(now, hour24, minute) {
            return Some(clock_match(target, span_of(&caps)));
        }
    }
    None
}

/// Rule 4: `H:MM` or `H.MM` on a 24-hour clock.
///
/// Two dotted forms are released to the date rule instead (see DESIGN.md):
/// a match whose components also read as a valid day.month ("03.02"), and a
/// match directly preceded by a date token ("3.2 15:30").
fn twenty_four_hour(text: &str, now: DateTime<Local>) -> Option<RuleMatch> {
    for caps in TWENTY_FOUR_HOUR_RE.captures_iter(text) {
        let hour: u32 = caps[1].parse().ok()?;
        let minute: u32 = caps[3].parse().ok()?;
        if hour > 23 || minute > 59 {
            continue;
        }
        if &caps[2] == "." && is_valid_day_month(hour, minute) {
            continue;
        }
        let span = span_of(&caps);
        if let Some(prefix) = DATE_PREFIX_RE.captures(&text[..span.start]) {
            let day: u32 = prefix[1].parse().ok()?;
            let month: u32 = prefix[2].parse().ok()?;
            if is_valid_day_month(day, month) {
                continue;
            }
        }
        if let Some(target) = upcoming_time(now, hour, minute) {
            return Some(clock_match(target, span));
        }
    }
    None
}

/// Rule 5: connector-prefixed hour -- "at 5", "um 17:00", "à 18", "@ 9 pm".
fn at_prefixed(text: &str, now: DateTime<Local>) -> Option<RuleMatch> {
    for caps in AT_PREFIXED_RE.captures_iter(text) {
        let hour: u32 = caps[1].parse().ok()?;
        let minute: u32 = caps.get(2).map_or(Some(0), |m| m.as_str().parse().ok())?;
        if minute > 59 {
            continue;
        }
        let hour24 = if caps.name("mer").is_some() {
            if !(1..=12).contains(&hour) {
                continue;
            }
            to_24_hour(hour, is_pm(&caps))
        } else {
            if hour > 23 {
                continue;
            }
            hour
        };
        if let Some(target) = upcoming_time(now, hour24, minute) {
            return Some(clock_match(target, span_of(&caps)));
        }
    }
    None
}

/// Rule 6: bare hour with meridiem, no colon -- "9pm", "7 a.m.".
fn bare_hour_meridiem(text: &str, now: DateTime<Local>) -> Option<RuleMatch> {
    for caps in BARE_HOUR_RE.captures_iter(text) {
        let hour: u32 = caps[1].parse().ok()?;
        if !(1..=12).contains(&hour) {
            continue;
        }
        let hour24 = to_24_hour(hour, is_pm(&caps));
        if let Some(target) = upcoming_time(now, hour24, 0) {
            return Some(clock_match(target, span_of(&caps)));
        }
    }
    None
}

/// Rule 7: `D.M` or `D/M` with optional trailing time, defaulting to 09:00.
/// The only rule that sets `is_explicit_date`.
fn date_with_time(text: &str, now: DateTime<Local>) -> Option<RuleMatch> {
    for caps in DATE_RE.captures_iter(text) {
        let day: u32 = caps[1].parse().ok()?;
        let month: u32 = caps[2].parse().ok()?;
        if !is_valid_day_month(day, month) {
            continue;
        }
        let hour: u32 = caps.get(3).map_or(Some(9), |m| m.as_str().parse().ok())?;
        let minute: u32 = caps.get(4).map_or(Some(0), |m| m.as_str().parse().ok())?;
        if hour > 23 || minute > 59 {
            continue;
        }
        let Some(time) = NaiveTime::from_hms_opt(hour, minute, 0) else {
            continue;
        };
        // Calendar-invalid combinations (31.2) reject here.
        let Some(date) = NaiveDate::from_ymd_opt(now.year(), month, day) else {
            continue;
        };
        let mut naive = date.and_time(time);
        if naive <= now.naive_local() {
            let Some(next_year) = NaiveDate::from_ymd_opt(now.year() + 1, month, day) else {
                continue;
            };
            naive = next_year.and_time(time);
        }
        if let Some(target) = resolve_local(naive) {
            return Some(RuleMatch {
                target_time: target,
                span: span_of(&caps),
                is_duration: false,
                is_explicit_date: true,
            });
        }
    }
    None
}

// ── Shared helpers ───────────────────────────────────────────────────

fn duration_match(now: DateTime<Local>, seconds: i64, span: Range<usize>) -> RuleMatch {
    RuleMatch {
        target_time: now + Duration::seconds(seconds),
        span,
        is_duration: true,
        is_explicit_date: false,
    }
}

fn clock_match(target: DateTime<Local>, span: Range<usize>) -> RuleMatch {
    RuleMatch {
        target_time: target,
        span,
        is_duration: false,
        is_explicit_date: false,
    }
}

fn span_of(caps: &Captures) -> Range<usize> {
    let m = caps.get(0).expect("capture 0 always present");
    m.start()..m.end()
}

fn is_pm(caps: &Captures) -> bool {
    caps.name("mer")
        .map(|m| m.as_str().eq_ignore_ascii_case("p"))
        .unwrap_or(false)
}

/// 12-hour to 24-hour conversion: 12am -> 0, 12pm -> 12, otherwise pm adds 12.
fn to_24_hour(hour: u32, pm: bool) -> u32 {
    match (hour, pm) {
        (12, false) => 0,
        (12, true) => 12,
        (h, true) => h + 12,
        (h, false) => h,
    }
}

fn is_valid_day_month(day: u32, month: u32) -> bool {
    (1..=31).contains(&day) && (1..=12).contains(&month)
}

/// Next occurrence of a wall-clock time: today if still ahead of `now`,
/// otherwise rolled forward exactly one day.
fn upcoming_time(now: DateTime<Local>, hour: u32, minute: u32) -> Option<DateTime<Local>> {
    let time = NaiveTime::from_hms_opt(hour, minute, 0)?;
    let mut naive = now.date_naive().and_time(time);
    if naive <= now.naive_local() {
        naive = naive + Duration::days(1);
    }
    resolve_local(naive)
}

/// Resolve a wall-clock value against the host timezone. A time skipped by a
/// DST transition resolves to nothing and the rule rejects.
fn resolve_local(naive: NaiveDateTime) -> Option<DateTime<Local>> {
    Local.from_local_datetime(&naive).earliest()
}
