use std::collections::BTreeMap;

use crate::form::mentions_form_title;
use crate::patterns::{RE_KEY_START, RE_KEY_VALUE, RE_NUMBERED_START, RE_WIDE_GAP};

/// Header key under which the questionnaire title line is stored.
pub const FORM_TITLE_KEY: &str = "formTitle";

/// Keys longer than this are sentences that happen to end in a colon.
pub const MAX_HEADER_KEY_CHARS: usize = 30;

/// Collect header fields from the lines above the first numbered question.
///
/// A line mentioning QUESTIONNAIRE or SURVEY becomes the form title verbatim;
/// other lines are split into `key: value` segments. Later duplicates of a
/// key overwrite earlier ones.
pub fn extract_header(text: &str) -> BTreeMap<String, String> {
    let mut header = BTreeMap::new();
    for line in text.lines() {
        let line = line.trim();
        if line.is_empty() {
            continue;
        }
        if RE_NUMBERED_START.is_match(line) {
            break;
        }
        if mentions_form_title(line) {
            header.insert(FORM_TITLE_KEY.to_string(), line.to_string());
            continue;
        }
        for (key, value) in key_value_segments(line) {
            header.insert(key.to_string(), value.to_string());
        }
    }
    header
}

/// `key: value` pairs of one header line.
///
/// A segment ends where a run of 2+ spaces is followed by another `key:`, or
/// at end of line. Within a segment the key is the word run directly before
/// the last colon, so `Reg. No: 123` yields `No`.
pub fn key_value_segments(line: &str) -> Vec<(&str, &str)> {
    split_segments(line)
        .into_iter()
        .filter_map(|segment| {
            let caps = RE_KEY_VALUE.captures(segment)?;
            let key = caps.get(1)?.as_str().trim();
            let value = caps.get(2)?.as_str().trim();
            let plausible =
                !key.is_empty() && !value.is_empty() && key.chars().count() <= MAX_HEADER_KEY_CHARS;
            plausible.then_some((key, value))
        })
        .collect()
}

fn split_segments(line: &str) -> Vec<&str> {
    let mut segments = Vec::new();
    let mut start = 0;
    for gap in RE_WIDE_GAP.find_iter(line) {
        if RE_KEY_START.is_match(&line[gap.end()..]) {
            segments.push(&line[start..gap.start()]);
            start = gap.end();
        }
    }
    segments.push(&line[start..]);
    segments
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn splits_fields_on_wide_gaps() {
        let pairs = key_value_segments("Patient Name: John Doe    Age: 45   ID: P-1001");
        assert_eq!(
            pairs,
            vec![("Patient Name", "John Doe"), ("Age", "45"), ("ID", "P-1001")]
        );
    }

    #[test]
    fn single_space_does_not_split_values() {
        let pairs = key_value_segments("Doctor: Dr. A. Rao Clinic");
        assert_eq!(pairs, vec![("Doctor", "Dr. A. Rao Clinic")]);
    }

    #[test]
    fn key_is_the_word_run_before_the_colon() {
        assert_eq!(key_value_segments("Reg. No: 12345"), vec![("No", "12345")]);
        assert_eq!(key_value_segments("Dr. Name: A Rao"), vec![("Name", "A Rao")]);
    }

    #[test]
    fn key_length_limit_is_inclusive() {
        let at_limit = "Emergency contact phone number: 555 0100";
        assert_eq!(
            key_value_segments(at_limit),
            vec![("Emergency contact phone number", "555 0100")]
        );
        let over_limit = "Emergency contact phone numbers: 555 0100";
        assert!(key_value_segments(over_limit).is_empty());
    }

    #[test]
    fn long_keys_are_rejected() {
        let line = "Please answer every question below honestly and fully: thanks";
        assert!(key_value_segments(line).is_empty());
    }

    #[test]
    fn header_stops_at_first_numbered_line() {
        let text = "\
HEALTH SCREENING QUESTIONNAIRE
Name: Jane Roe    Date: 2024-03-01

1. Do you have a fever? YES NO
Ward: should not be read
";
        let header = extract_header(text);
        assert_eq!(
            header.get(FORM_TITLE_KEY).map(String::as_str),
            Some("HEALTH SCREENING QUESTIONNAIRE")
        );
        assert_eq!(header.get("Name").map(String::as_str), Some("Jane Roe"));
        assert_eq!(header.get("Date").map(String::as_str), Some("2024-03-01"));
        assert!(!header.contains_key("Ward"));
        assert_eq!(header.len(), 3);
    }

    #[test]
    fn survey_title_is_case_insensitive() {
        let header = extract_header("Patient Survey 2024\n");
        assert_eq!(
            header.get(FORM_TITLE_KEY).map(String::as_str),
            Some("Patient Survey 2024")
        );
    }
}
