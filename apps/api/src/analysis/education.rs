use once_cell::sync::Lazy;
use regex::Regex;

use crate::analysis::experience::{parse_range, DATE_RANGE};
use crate::analysis::models::Education;
use crate::analysis::sections::{char_len, mentions_any, year_to_month, YEAR};

const SECTION_HEADINGS: &[&str] = &["education", "academic", "qualifications"];
const SECTION_END: &[&str] = &["experience", "skills", "projects", "certifications"];
const ENTRY_END: &[&str] = &["experience", "skills", "projects"];
const DEGREES: &[&str] = &[
    "bachelor", "master", "phd", "associate", "diploma", "degree", "b.sc", "m.sc", "b.tech",
    "m.tech", "mba",
];
const SCHOOLS: &[&str] = &["university", "college"];

static GPA: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?i)GPA\s*:?\s*(\d\.\d{1,2})").expect("gpa regex"));
static MAJOR: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?i)\bin\s+([A-Za-z][A-Za-z &]*)").expect("major regex"));
static PHRASE_BREAK: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"[,|(]|(?:19|20)\d{2}").expect("phrase regex"));

pub fn extract_education(text: &str) -> Vec<Education> {
    let lines: Vec<&str> = text.split('\n').collect();
    let mut entries = Vec::new();
    let mut current: Option<Education> = None;
    let mut in_section = false;

    for (i, raw) in lines.iter().enumerate() {
        let line = raw.trim();
        if line.is_empty() {
            continue;
        }
        if mentions_any(line, SECTION_HEADINGS) {
            in_section = true;
            continue;
        }
        if !in_section {
            continue;
        }
        if mentions_any(line, SECTION_END) {
            break;
        }

        if current.is_none() {
            if char_len(line) > 5 && mentions_any(line, DEGREES) {
                current = Some(parse_degree_line(line));
            }
            continue;
        }
        if let Some(entry) = current.as_mut() {
            if entry.school_name.is_empty() && mentions_any(line, SCHOOLS) {
                entry.school_name = leading_phrase(line);
                if entry.end_date.is_empty() {
                    apply_dates(entry, line);
                }
            }
        }
        if lines.get(i + 1).is_some_and(|next| mentions_any(next, ENTRY_END)) {
            entries.extend(current.take());
        }
    }

    entries.extend(current);
    entries
}

fn parse_degree_line(line: &str) -> Education {
    let mut entry = Education::default();

    if mentions_any(line, SCHOOLS) {
        // `Degree, University` on one line: keep both halves apart.
        let pieces: Vec<&str> = line.split([',', '|']).map(str::trim).collect();
        if let Some(school) = pieces.iter().find(|p| mentions_any(p, SCHOOLS)) {
            entry.school_name = leading_phrase(school);
        }
        if let Some(degree) = pieces
            .iter()
            .find(|p| mentions_any(p, DEGREES) && !mentions_any(p, SCHOOLS))
        {
            entry.degree = leading_phrase(degree);
        }
    } else {
        entry.degree = leading_phrase(line);
    }
    if let Some(caps) = MAJOR.captures(&entry.degree) {
        entry.major = caps[1].trim().to_string();
    }

    apply_dates(&mut entry, line);

    if let Some(caps) = GPA.captures(line) {
        entry.gpa = caps[1].to_string();
    }
    entry
}

/// A `YYYY - YYYY` range fills both dates; a lone year is the graduation date.
fn apply_dates(entry: &mut Education, line: &str) {
    if let Some(range) = DATE_RANGE.find(line) {
        let (start, end) = parse_range(range.as_str());
        if !start.is_empty() && !end.is_empty() {
            entry.start_date = start;
            entry.end_date = end;
            return;
        }
    }
    if let Some(year) = YEAR.find(line) {
        entry.end_date = year_to_month(year.as_str());
    }
}

/// The text before the first comma, pipe, parenthesis, or year.
fn leading_phrase(line: &str) -> String {
    let head = match PHRASE_BREAK.find(line) {
        Some(m) => line[..m.start()].trim(),
        None => line.trim(),
    };
    if head.is_empty() {
        line.trim().to_string()
    } else {
        head.to_string()
    }
}
