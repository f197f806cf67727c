use crate::analysis::sections::{char_len, mentions_any};

const SUMMARY_HEADINGS: &[&str] = &["summary", "objective", "profile", "about"];
const NEXT_SECTIONS: &[&str] = &["experience", "education", "skills", "projects"];

/// Collects the professional summary / objective paragraph.
///
/// Lines after a summary heading are joined with single spaces. Collection
/// stops at the next section heading, or at the first blank or short line
/// once some text has been gathered.
pub fn extract_summary(text: &str) -> String {
    let mut summary = String::new();
    let mut in_summary = false;

    for line in text.split('\n') {
        let line = line.trim();
        if mentions_any(line, SUMMARY_HEADINGS) {
            in_summary = true;
            continue;
        }
        if !in_summary {
            continue;
        }
        if char_len(line) > 10 {
            if mentions_any(line, NEXT_SECTIONS) {
                break;
            }
            summary.push_str(line);
            summary.push(' ');
        } else if !summary.is_empty() {
            break;
        }
    }

    summary.trim().to_string()
}
