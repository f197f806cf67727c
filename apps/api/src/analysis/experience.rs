//! Work history extraction.
//!
//! A job starts on a header line such as `Engineer at Acme (2019 - Present)` or
//! `Acme | Engineer | 2016 - 2020`. Bullet lines and long undated lines that
//! follow become responsibilities.

use once_cell::sync::Lazy;
use regex::Regex;

use crate::analysis::models::{WorkExperience, PRESENT};
use crate::analysis::sections::{char_len, mentions_any, YEAR};

const SECTION_HEADINGS: &[&str] = &["experience", "employment", "work history"];
const SECTION_END: &[&str] = &["education", "skills", "projects", "certifications"];
const JOB_END: &[&str] = &["education", "skills"];

const MONTHS: &[&str] = &[
    "january",
    "february",
    "march",
    "april",
    "may",
    "june",
    "july",
    "august",
    "september",
    "october",
    "november",
    "december",
];

static AT_WORD: Lazy<Regex> = Lazy::new(|| Regex::new(r"(?i)\bat\b").expect("at regex"));
static SEPARATORS: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"[|\-•,\u{2013}\u{2014}]").expect("separator regex"));

/// Month-year ranges, year ranges, open-ended ranges, or a bare ongoing marker.
pub(crate) static DATE_RANGE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(concat!(
        r"\w+\s*\d{4}\s*[-–]\s*\w+\s*\d{4}",
        r"|\d{4}\s*[-–]\s*\d{4}",
        r"|(?:(?i:jan|feb|mar|apr|may|jun|jul|aug|sep|oct|nov|dec)[a-zA-Z]*\.?\s+)?\d{4}\s*[-–]\s*(?:Present|Current)\b",
        r"|\b(?:Present|Current)\b",
    ))
    .expect("date range regex")
});

/// Individual date tokens inside a range: optional month name, year, or ongoing marker.
static DATE_TOKEN: Lazy<Regex> = Lazy::new(|| {
    Regex::new(
        r"(?:\b(?i:(jan|feb|mar|apr|may|jun|jul|aug|sep|oct|nov|dec)[a-z]*)\.?\s*)?((?:19|20)\d{2})|(Present|Current)",
    )
    .expect("date token regex")
});

static BULLET_PREFIX: Lazy<Regex> = Lazy::new(|| Regex::new(r"^[•\-]\s*").expect("bullet regex"));

pub fn extract_work_experience(text: &str) -> Vec<WorkExperience> {
    let lines: Vec<&str> = text.split('\n').collect();
    let mut jobs = Vec::new();
    let mut current: Option<WorkExperience> = None;
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
            if char_len(line) > 5 {
                current = parse_job_header(line);
            }
            continue;
        }
        let Some(job) = current.as_mut() else {
            continue;
        };

        // A header with a year range while a job is open starts the next job.
        if !is_bullet(line) && YEAR.is_match(line) && DATE_RANGE.is_match(line) {
            if let Some(next) = parse_job_header(line) {
                jobs.push(std::mem::replace(job, next));
                continue;
            }
        }

        if is_bullet(line) || (char_len(line) > 20 && !YEAR.is_match(line)) {
            let responsibility = BULLET_PREFIX.replace(line, "");
            if char_len(&responsibility) > 10 {
                job.responsibilities.push(responsibility.into_owned());
            }
        }

        if lines.get(i + 1).is_some_and(|next| mentions_any(next, JOB_END)) {
            jobs.extend(current.take());
        }
    }

    jobs.extend(current);
    jobs
}

fn is_bullet(line: &str) -> bool {
    line.starts_with('•') || line.starts_with('-')
}

/// Parses `title at company` or `company <sep> title`, plus any date range.
fn parse_job_header(line: &str) -> Option<WorkExperience> {
    let (title, company) = if AT_WORD.is_match(line) {
        let mut parts = AT_WORD.split(line);
        let title = parts.next()?;
        let company = parts.next()?;
        (title, company)
    } else {
        let parts: Vec<&str> = SEPARATORS.split(line).collect();
        if parts.len() < 2 {
            return None;
        }
        (parts[1], parts[0])
    };

    let mut job = WorkExperience {
        company_name: strip_trailing_dates(company),
        job_title: strip_trailing_dates(title),
        ..WorkExperience::default()
    };

    if let Some(range) = DATE_RANGE.find(line) {
        let (start, end) = parse_range(range.as_str());
        job.start_date = start;
        job.end_date = end;
        job.duration = range.as_str().to_string();
    }

    Some(job)
}

/// Splits a matched range into `(start, end)`, each `YYYY-MM`, `Present`, or empty.
pub(crate) fn parse_range(range: &str) -> (String, String) {
    let tokens: Vec<Option<String>> = DATE_TOKEN
        .captures_iter(range)
        .map(|caps| {
            caps.get(2).map(|year| {
                let month = caps
                    .get(1)
                    .and_then(|m| month_number(m.as_str()))
                    .unwrap_or(1);
                format!("{}-{month:02}", year.as_str())
            })
        })
        .collect();

    let start = match tokens.first() {
        Some(Some(date)) => date.clone(),
        _ => String::new(),
    };
    let end = match tokens.get(1) {
        Some(Some(date)) => date.clone(),
        Some(None) => PRESENT.to_string(),
        None => String::new(),
    };
    (start, end)
}

/// Accepts full month names and abbreviations of at least three letters.
fn month_number(name: &str) -> Option<u32> {
    let name = name.trim_end_matches('.').to_ascii_lowercase();
    if name.len() < 3 {
        return None;
    }
    MONTHS
        .iter()
        .position(|m| m.starts_with(name.as_str()))
        .map(|i| i as u32 + 1)
}

/// Drops a trailing date range from a header fragment: `Acme (Jun 2020 -` → `Acme`.
fn strip_trailing_dates(fragment: &str) -> String {
    const TRIM: &[char] = &['|', '-', '•', ',', '–', '—', '(', '[', ' ', '\t'];

    let fragment = fragment.trim();
    let Some(year) = YEAR.find(fragment) else {
        return fragment.to_string();
    };
    let mut head = fragment[..year.start()].trim_end_matches(TRIM);
    if let Some((rest, last)) = head.rsplit_once(char::is_whitespace) {
        if month_number(last.trim_start_matches(TRIM)).is_some() {
            head = rest.trim_end_matches(TRIM);
        }
    } else if month_number(head.trim_start_matches(TRIM)).is_some() {
        head = "";
    }

    if head.is_empty() {
        fragment.to_string()
    } else {
        head.to_string()
    }
}
