use crate::analysis::models::AdditionalInfo;
use crate::analysis::sections::{char_len, mentions_any};

/// Headings of the main resume sections; one of these ends a list.
const MAJOR_SECTIONS: &[&str] = &["experience", "education", "skills", "projects", "summary"];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum List {
    Certifications,
    Languages,
    Awards,
}

fn heading_of(lower: &str) -> Option<List> {
    if lower.starts_with("certificat") {
        Some(List::Certifications)
    } else if lower.starts_with("language") {
        Some(List::Languages)
    } else if lower.starts_with("award") || lower.contains("honor") {
        Some(List::Awards)
    } else {
        None
    }
}

/// Collects certifications, languages and awards listed under their headings.
///
/// `Languages: English, French` keeps the inline part as one item.
pub fn extract_additional_info(text: &str) -> AdditionalInfo {
    let mut info = AdditionalInfo::default();
    let mut current: Option<List> = None;

    for line in text.split('\n') {
        let line = line.trim();
        if line.is_empty() {
            continue;
        }

        if let Some(list) = heading_of(&line.to_lowercase()) {
            current = Some(list);
            if let Some((_, inline)) = line.split_once(':') {
                push(&mut info, list, inline.trim());
            }
            continue;
        }

        if char_len(line) <= 30 && mentions_any(line, MAJOR_SECTIONS) {
            current = None;
            continue;
        }

        if let Some(list) = current {
            push(&mut info, list, line);
        }
    }

    info
}

fn push(info: &mut AdditionalInfo, list: List, item: &str) {
    if char_len(item) <= 2 {
        return;
    }
    let target = match list {
        List::Certifications => &mut info.certifications,
        List::Languages => &mut info.languages,
        List::Awards => &mut info.awards,
    };
    target.push(item.to_string());
}
