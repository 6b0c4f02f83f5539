//! Integration tests for the time-expression parser.
//!
//! Exercises the full cascade through the public API, including the
//! multi-language unit tables and the label extractor.

use chrono::{DateTime, Duration, Local, TimeZone};
use inkdown_core::parse;

fn at(y: i32, mo: u32, d: u32, h: u32, mi: u32) -> DateTime<Local> {
    Local.with_ymd_and_hms(y, mo, d, h, mi, 0).unwrap()
}

fn now() -> DateTime<Local> {
    at(2026, 3, 10, 14, 0)
}

#[test]
fn test_duration_shapes_across_languages() {
    let cases = [
        ("15 min", 900),
        ("90s", 90),
        ("1.5h", 5400),
        ("1h 30m", 5400),
        ("2 Std 15 Min", 8100),
        ("10 Minuten", 600),
        ("2 horas", 7200),
        ("3 ore", 10800),
        ("20 secondes", 20),
    ];
    for (text, seconds) in cases {
        let parsed = parse(text, now()).unwrap_or_else(|| panic!("{text} failed to parse"));
        assert!(parsed.is_duration, "{text} not a duration");
        assert_eq!(
            parsed.target_time,
            now() + Duration::seconds(seconds),
            "{text} wrong target"
        );
    }
}

#[test]
fn test_absolute_shapes() {
    let cases = [
        ("2:30 PM", at(2026, 3, 10, 14, 30)),
        ("2:30 pm", at(2026, 3, 10, 14, 30)),
        ("16:45", at(2026, 3, 10, 16, 45)),
        ("9:00", at(2026, 3, 11, 9, 0)),
        ("um 17:00", at(2026, 3, 10, 17, 0)),
        ("à 18", at(2026, 3, 10, 18, 0)),
        ("9pm", at(2026, 3, 10, 21, 0)),
        ("7 a.m.", at(2026, 3, 11, 7, 0)),
    ];
    for (text, expected) in cases {
        let parsed = parse(text, now()).unwrap_or_else(|| panic!("{text} failed to parse"));
        assert!(!parsed.is_duration, "{text} misread as duration");
        assert!(!parsed.is_explicit_date, "{text} misread as date");
        assert_eq!(parsed.target_time, expected, "{text} wrong target");
    }
}

#[test]
fn test_date_shapes() {
    let cases = [
        ("03.02", at(2027, 2, 3, 9, 0)),
        ("24/12", at(2026, 12, 24, 9, 0)),
        ("24.12 18:30", at(2026, 12, 24, 18, 30)),
    ];
    for (text, expected) in cases {
        let parsed = parse(text, now()).unwrap_or_else(|| panic!("{text} failed to parse"));
        assert!(parsed.is_explicit_date, "{text} not flagged as date");
        assert_eq!(parsed.target_time, expected, "{text} wrong target");
    }
}

#[test]
fn test_labels_around_expressions() {
    let cases = [
        ("Call Mom in 15 min", Some("Call Mom")),
        ("15 min", None),
        ("Standup at 5", Some("Standup")),
        ("Pizza aus dem Ofen in 12 Minuten", Some("Pizza aus dem Ofen")),
        ("dentist 2:30 pm", Some("dentist")),
    ];
    for (text, label) in cases {
        let parsed = parse(text, now()).unwrap_or_else(|| panic!("{text} failed to parse"));
        assert_eq!(parsed.label.as_deref(), label, "{text} wrong label");
    }
}

#[test]
fn test_plain_ink_stays_plain() {
    for text in ["buy milk", "hello world", "????", "h m", "minutes"] {
        assert!(parse(text, now()).is_none(), "{text} should not parse");
    }
}

#[test]
fn test_labels_never_reparse() {
    for text in [
        "Call Mom in 15 min",
        "Standup at 5",
        "Flug 24.12 18:30",
        "Kuchen für 45 Minuten",
        "dentist 9pm",
    ] {
        let parsed = parse(text, now()).unwrap_or_else(|| panic!("{text} failed to parse"));
        if let Some(label) = parsed.label {
            assert!(
                parse(&label, now()).is_none(),
                "label {label:?} of {text:?} re-parsed"
            );
        }
    }
}

mod properties {
    use super::*;
    use proptest::prelude::*;

    proptest! {
        #[test]
        fn minute_durations_are_exact(minutes in 1u32..=2880) {
            let text = format!("{minutes} min");
            let parsed = parse(&text, now()).unwrap();
            prop_assert!(parsed.is_duration);
            prop_assert_eq!(parsed.target_time, now() + Duration::seconds(i64::from(minutes) * 60));
        }

        #[test]
        fn clock_times_are_strictly_future(hour in 0u32..=23, minute in 0u32..=59) {
            let text = format!("{hour}:{minute:02}");
            let parsed = parse(&text, now()).unwrap();
            prop_assert!(parsed.target_time > now());
            // Within the next 24 hours by the rollover rule.
            prop_assert!(parsed.target_time <= now() + Duration::days(1));
        }

        #[test]
        fn alphabetic_prefixes_become_labels_not_matches(
            words in proptest::collection::vec("[A-Za-z]{2,10}", 1..3),
            minutes in 1u32..=120,
        ) {
            let text = format!("{} in {minutes} min", words.join(" "));
            let parsed = parse(&text, now()).unwrap();
            prop_assert_eq!(parsed.target_time, now() + Duration::seconds(i64::from(minutes) * 60));
            if let Some(label) = parsed.label {
                prop_assert!(parse(&label, now()).is_none());
            }
        }
    }
}
