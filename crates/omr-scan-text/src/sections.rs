//! Fallback reading of a page as headed sections of fields and prose.

use serde::{Deserialize, Serialize};

use crate::patterns::RE_FIELD_LINE;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Field {
    pub label: String,
    pub value: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Section {
    pub heading: Option<String>,
    pub content: String,
    pub fields: Vec<Field>,
}

impl Section {
    fn headed(heading: &str) -> Self {
        Self {
            heading: Some(heading.to_string()),
            ..Self::default()
        }
    }

    fn has_body(&self) -> bool {
        !self.content.is_empty() || !self.fields.is_empty()
    }

    fn append_content(&mut self, line: &str) {
        if !self.content.is_empty() {
            self.content.push(' ');
        }
        self.content.push_str(line);
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SectionedText {
    pub sections: Vec<Section>,
}

/// Split recognized text into sections.
///
/// A blank line closes the current section. `Label: value` lines become
/// fields; an all-caps line or a short line ending in `:` opens a new headed
/// section; everything else is joined into the section's content. Sections
/// with neither content nor fields are dropped, headed or not.
pub fn section_text(text: &str) -> SectionedText {
    let mut sections = Vec::new();
    let mut current = Section::default();

    for line in text.lines() {
        let line = line.trim();
        if line.is_empty() {
            if current.has_body() {
                sections.push(std::mem::take(&mut current));
            }
            continue;
        }

        if let Some(caps) = RE_FIELD_LINE.captures(line) {
            current.fields.push(Field {
                label: caps[1].trim().to_string(),
                value: caps[2].trim().to_string(),
            });
            continue;
        }

        let heading = if is_all_caps(line) && line.chars().count() > 2 {
            Some(line)
        } else if line.ends_with(':') && line.chars().count() < 50 {
            Some(line.trim_end_matches(':'))
        } else {
            None
        };
        if let Some(heading) = heading {
            let previous = std::mem::replace(&mut current, Section::headed(heading));
            if previous.has_body() {
                sections.push(previous);
            }
            continue;
        }

        current.append_content(line);
    }

    if current.has_body() {
        sections.push(current);
    }
    SectionedText { sections }
}

/// At least one cased character and no lowercase ones.
fn is_all_caps(line: &str) -> bool {
    line.chars().any(char::is_uppercase) && !line.chars().any(char::is_lowercase)
}
