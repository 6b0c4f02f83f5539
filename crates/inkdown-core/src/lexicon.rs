//! Multi-language word tables for the time-expression parser.
//!
//! The parser recognizes English, German, Spanish, French and Italian unit
//! and connector words. The tables are a fixed constant of the parser; there
//! is no external configuration surface (which locales the OCR provider is
//! hinted with is a concern of the OCR boundary, not this crate).

/// Second-unit synonyms.
pub const SECOND_UNITS: &[&str] = &[
    // English
    "seconds", "second", "secs", "sec", "s",
    // German
    "sekunden", "sekunde", "sek",
    // Spanish
    "segundos", "segundo",
    // French
    "secondes", "seconde",
    // Italian
    "secondi", "secondo",
];

/// Minute-unit synonyms. "min"/"minute" are shared by several languages.
pub const MINUTE_UNITS: &[&str] = &[
    // English
    "minutes", "minute", "mins", "min", "m",
    // German
    "minuten",
    // Spanish
    "minutos", "minuto",
    // French (minute/minutes shared with English)
    // Italian
    "minuti",
];

/// Hour-unit synonyms. "h" is shared by English, German and French.
pub const HOUR_UNITS: &[&str] = &[
    // English
    "hours", "hour", "hrs", "hr", "h",
    // German
    "stunden", "stunde", "std",
    // Spanish
    "horas", "hora",
    // French
    "heures", "heure",
    // Italian
    "ore", "ora",
];

/// Connector words that prefix an absolute clock time ("at 5", "um 17:00",
/// "à 18"). The "@" sign is handled separately by the matcher since it is
/// not a word.
pub const AT_CONNECTORS: &[&str] = &["at", "um", "à"];

/// Prepositions stripped from the ends of a label ("Call Mom in 15 min" ->
/// "Call Mom"). English plus the German/Spanish/French/Italian equivalents.
pub const LABEL_CONNECTORS: &[&str] = &[
    // English
    "in", "at", "for", "by", "after", "before", "within",
    // German
    "um", "für", "nach", "vor", "bis", "innerhalb", "am",
    // Spanish
    "en", "a", "para", "por", "después", "antes", "dentro", "de",
    // French
    "dans", "à", "pour", "par", "après", "avant",
    // Italian
    "per", "dopo", "prima", "entro", "tra", "fra",
];

/// Regex alternation over a word table, longest word first so a longer
/// synonym is never shadowed by one of its prefixes.
pub fn alternation(words: &[&str]) -> String {
    let mut sorted: Vec<&str> = words.to_vec();
    sorted.sort_by(|a, b| b.len().cmp(&a.len()).then(a.cmp(b)));
    sorted.join("|")
}

/// Whether a word is a strippable label connector (case-insensitive).
pub fn is_label_connector(word: &str) -> bool {
    let lowered = word.to_lowercase();
    LABEL_CONNECTORS.iter().any(|c| *c == lowered)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn alternation_orders_longest_first() {
        let alt = alternation(&["m", "min", "minutes"]);
        assert_eq!(alt, "minutes|min|m");
    }

    #[test]
    fn connector_lookup_is_case_insensitive() {
        assert!(is_label_connector("In"));
        assert!(is_label_connector("FÜR"));
        assert!(!is_label_connector("mom"));
    }

    #[test]
    fn unit_tables_cover_all_five_languages() {
        for unit in ["hours", "stunden", "horas", "heures", "ore"] {
            assert!(HOUR_UNITS.contains(&unit), "missing hour unit {unit}");
        }
        for unit in ["minutes", "minuten", "minutos", "minuti"] {
            assert!(MINUTE_UNITS.contains(&unit), "missing minute unit {unit}");
        }
        for unit in ["seconds", "sekunden", "segundos", "secondes", "secondi"] {
            assert!(SECOND_UNITS.contains(&unit), "missing second unit {unit}");
        }
    }
}
