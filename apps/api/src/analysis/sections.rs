//! Line-level helpers shared by the section extractors.

use once_cell::sync::Lazy;
use regex::Regex;

/// A four-digit year in the 1900s or 2000s.
pub static YEAR: Lazy<Regex> = Lazy::new(|| Regex::new(r"(?:19|20)\d{2}").expect("year regex"));

/// Case-insensitive substring test against any keyword. Keywords are lower-case.
pub fn mentions_any(line: &str, keywords: &[&str]) -> bool {
    let lower = line.to_lowercase();
    keywords.iter().any(|k| lower.contains(k))
}

pub fn char_len(s: &str) -> usize {
    s.chars().count()
}

/// Turns a year into the `YYYY-01` month form used for all dates.
pub fn year_to_month(year: &str) -> String {
    format!("{year}-01")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mentions_any_is_case_insensitive() {
        assert!(mentions_any("WORK EXPERIENCE", &["experience"]));
        assert!(!mentions_any("Education", &["experience", "skills"]));
    }

    #[test]
    fn test_char_len_counts_unicode_scalars() {
        assert_eq!(char_len("• ok"), 4);
    }

    #[test]
    fn test_year_matches_only_plausible_years() {
        assert_eq!(YEAR.find("since 2019").map(|m| m.as_str()), Some("2019"));
        assert!(YEAR.find("room 1800").is_none());
    }
}
