use crate::patterns::{RE_BARE_YES_NO_SUFFIX, RE_MARK_SUFFIX, RE_NUMBERED_ITEM};

/// Cleaned question texts shorter than this are OCR noise.
pub const MIN_QUESTION_CHARS: usize = 6;

/// Strip the answer-bubble residue OCR leaves at the end of a question line.
///
/// Empty bubbles are often read as `@`, `©`, `®` or `O` next to the printed
/// YES/NO labels. The glyph-aware suffix goes first, then any single bare
/// YES/NO that is still trailing.
pub fn clean_question_text(body: &str) -> String {
    let body = body.trim();
    let without_marks = RE_MARK_SUFFIX.replace(body, "");
    let without_label = RE_BARE_YES_NO_SUFFIX.replace(without_marks.trim(), "");
    without_label.trim().to_string()
}

/// Question text of a numbered line, or `None` for anything else.
pub fn parse_question_line(line: &str) -> Option<String> {
    let caps = RE_NUMBERED_ITEM.captures(line.trim())?;
    let text = clean_question_text(caps.get(1)?.as_str());
    (text.chars().count() >= MIN_QUESTION_CHARS).then_some(text)
}

/// Numbered questions in reading order.
pub fn extract_questions(text: &str) -> Vec<String> {
    text.lines().filter_map(parse_question_line).collect()
}
