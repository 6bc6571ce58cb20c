use std::sync::LazyLock;

use regex::Regex;

/// `<digits><'.'|')'><whitespace>` at the start of a trimmed line.
pub(crate) static RE_NUMBERED_START: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\d+[.)]\s").expect("valid numbered-start regex"));

/// Numbered question line; group 1 is the question body.
pub(crate) static RE_NUMBERED_ITEM: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\d+[.)]\s+(.+)$").expect("valid numbered-item regex"));

/// One or two trailing YES/NO tokens, each optionally wrapped in the glyphs
/// OCR produces for empty bubbles. A glyph other than `O` may sit directly
/// against the question text.
pub(crate) static RE_MARK_SUFFIX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"(?:\s+[@©®O]?|\s*[@©®])\s*(?:YES|NO|yes|no)(?:\s*[@©®O]?\s*(?:YES|NO|yes|no))?\s*[@©®O]?\s*$",
    )
    .expect("valid mark-suffix regex")
});

pub(crate) static RE_BARE_YES_NO_SUFFIX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)\s+(?:YES|NO)\s*$").expect("valid yes/no-suffix regex"));

/// Run of 2+ whitespace characters separating header segments.
pub(crate) static RE_WIDE_GAP: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\s{2,}").expect("valid gap regex"));

/// A header key followed by its colon, anchored at segment start.
pub(crate) static RE_KEY_START: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[\w\s]+?:").expect("valid key-start regex"));

/// A `key: value` pair ending its segment. The value may not contain a colon;
/// the key is the word run right before the colon, wherever it starts.
pub(crate) static RE_KEY_VALUE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"([\w\s]+?)\s*:\s*([^\s:][^:]*)$").expect("valid key-value regex")
});

/// Labelled field line in free text.
pub(crate) static RE_FIELD_LINE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^([A-Za-z][A-Za-z\s]{1,40}):\s*(.+)$").expect("valid field-line regex")
});
