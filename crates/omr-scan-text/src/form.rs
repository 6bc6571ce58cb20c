use serde::{Deserialize, Serialize};

use crate::patterns::RE_NUMBERED_START;

/// Text cues used to decide whether a page is a YES/NO bubble form.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct FormSignals {
    pub has_yes_and_no: bool,
    pub has_numbered_item: bool,
    pub has_form_title: bool,
}

impl FormSignals {
    pub fn from_text(text: &str) -> Self {
        let upper = text.to_uppercase();
        Self {
            has_yes_and_no: upper.contains("YES") && upper.contains("NO"),
            has_numbered_item: text
                .lines()
                .any(|line| RE_NUMBERED_START.is_match(line.trim_start())),
            has_form_title: mentions_form_title(text),
        }
    }

    /// YES and NO both present, plus either a numbered item or a form title.
    pub fn is_omr_form(&self) -> bool {
        self.has_yes_and_no && (self.has_numbered_item || self.has_form_title)
    }
}

/// Whether recognized text looks like a YES/NO questionnaire page.
pub fn is_omr_form(text: &str) -> bool {
    FormSignals::from_text(text).is_omr_form()
}

pub(crate) fn mentions_form_title(text: &str) -> bool {
    let upper = text.to_uppercase();
    upper.contains("QUESTIONNAIRE") || upper.contains("SURVEY")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn numbered_yes_no_page_is_a_form() {
        assert!(is_omr_form("1. Fever YES NO\n2. Cough YES NO"));
    }

    #[test]
    fn titled_yes_no_page_is_a_form() {
        assert!(is_omr_form("Patient questionnaire\nFever  yes  no"));
    }

    #[test]
    fn page_without_yes_no_is_free_text() {
        let signals = FormSignals::from_text("DAILY NOTES\n1. Slept well\n2. Walked 2 km");
        assert!(!signals.has_yes_and_no);
        assert!(signals.has_numbered_item);
        assert!(!signals.is_omr_form());
    }

    #[test]
    fn yes_no_alone_is_not_enough() {
        assert!(!is_omr_form("Yes, I said no to dessert."));
    }
}
