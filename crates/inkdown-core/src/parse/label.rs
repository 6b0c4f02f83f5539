//! Label extraction from the text surrounding a matched time expression.
//!
//! "Call Mom in 15 min" matches on "15 min"; the remainder "Call Mom in"
//! loses its trailing connector and becomes the label "Call Mom".

use std::ops::Range;

use crate::lexicon::is_label_connector;

/// Derive a human-readable label from `text` with the matched span removed.
///
/// The text before and after the span is concatenated, connector words are
/// stripped from both ends until none remain, and stray punctuation is
/// trimmed. An empty remainder yields `None`.
pub(crate) fn extract_label(text: &str, span: &Range<usize>) -> Option<String> {
    let remainder = format!("{} {}", &text[..span.start], &text[span.end..]);
    let mut words: Vec<&str> = remainder.split_whitespace().collect();

    loop {
        let before = words.len();
        if words.first().is_some_and(|w| is_connector_word(w)) {
            words.remove(0);
        }
        if words.last().is_some_and(|w| is_connector_word(w)) {
            words.pop();
        }
        if words.len() == before {
            break;
        }
    }

    let joined = words.join(" ");
    let label = joined.trim_matches(|c: char| !c.is_alphanumeric());
    if label.is_empty() {
        None
    } else {
        Some(label.to_string())
    }
}

/// Connector check tolerant of attached punctuation ("in," still strips).
fn is_connector_word(word: &str) -> bool {
    let bare = word.trim_matches(|c: char| !c.is_alphanumeric());
    !bare.is_empty() && is_label_connector(bare)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn strips_trailing_connector() {
        assert_eq!(
            extract_label("Call Mom in 15 min", &(12..18)),
            Some("Call Mom".to_string())
        );
    }

    #[test]
    fn strips_leading_connector() {
        // "at 5" matched with span over the whole expression leaves nothing;
        // a leading connector before other words is stripped too.
        assert_eq!(
            extract_label("in Pizza holen", &(3..8)),
            Some("holen".to_string())
        );
    }

    #[test]
    fn strips_connectors_repeatedly() {
        let text = "before in Standup at 15 min";
        let span = text.find("15 min").unwrap();
        assert_eq!(
            extract_label(text, &(span..span + 6)),
            Some("Standup".to_string())
        );
    }

    #[test]
    fn empty_remainder_is_none() {
        assert_eq!(extract_label("15 min", &(0..6)), None);
        assert_eq!(extract_label("in 15 min", &(3..9)), None);
    }

    #[test]
    fn trims_stray_punctuation() {
        let text = "Standup! 15 min";
        let span = text.find("15 min").unwrap();
        assert_eq!(
            extract_label(text, &(span..span + 6)),
            Some("Standup".to_string())
        );
    }

    #[test]
    fn connector_with_punctuation_still_strips() {
        let text = "Tee kochen, in 5 min";
        let span = text.find("5 min").unwrap();
        assert_eq!(
            extract_label(text, &(span..span + 5)),
            Some("Tee kochen".to_string())
        );
    }

    #[test]
    fn multilingual_connectors_strip() {
        let text = "Anrufen für 10 min";
        let span = text.find("10 min").unwrap();
        assert_eq!(
            extract_label(text, &(span..span + 6)),
            Some("Anrufen".to_string())
        );
    }
}
