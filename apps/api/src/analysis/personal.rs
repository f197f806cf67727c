use once_cell::sync::Lazy;
use regex::Regex;

use crate::analysis::models::PersonalInfo;
use crate::analysis::sections::{char_len, mentions_any};

static NAME_CHARS: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[A-Za-z\s.\-]+$").expect("name regex"));
static EMAIL: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"\b[A-Za-z0-9._%+-]+@[A-Za-z0-9.-]+\.[A-Za-z]{2,}\b").expect("email regex")
});
/// Tried in order: with optional country code and separators, then bare 10 digits.
static PHONES: Lazy<[Regex; 2]> = Lazy::new(|| {
    [
        Regex::new(r"(\+?\d{1,3}[-.\s]?)?\(?\d{3}\)?[-.\s]?\d{3}[-.\s]?\d{4}")
            .expect("phone regex"),
        Regex::new(r"\b\d{3}[-.\s]?\d{3}[-.\s]?\d{4}\b").expect("bare phone regex"),
    ]
});
static LINKEDIN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"linkedin\.com/in/\S+").expect("linkedin regex"));
static GITHUB: Lazy<Regex> = Lazy::new(|| Regex::new(r"github\.com/\S+").expect("github regex"));
static URL: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r#"(?:https?://|www\.)[\w\-.~:/?#@!$&'"()*+,;=%]+"#).expect("url regex")
});

const NOT_A_NAME: &[&str] = &[
    "resume",
    "cv",
    "curriculum",
    "vitae",
    "phone",
    "email",
    "linkedin",
];

const ADDRESS_TOKENS: &[&str] = &[
    "address", "location", "city", "province", "district", "street", "road",
];

/// Extracts contact details from the header area of a resume.
pub fn extract_personal_info(text: &str) -> PersonalInfo {
    let lines: Vec<&str> = text.split('\n').collect();
    let mut info = PersonalInfo::default();

    if let Some(name) = lines.iter().take(10).map(|l| l.trim()).find(|l| looks_like_name(l)) {
        info.full_name = name.to_string();
        let parts: Vec<&str> = name.split_whitespace().collect();
        if let Some(first) = parts.first() {
            info.first_name = first.to_string();
        }
        if parts.len() > 1 {
            info.last_name = parts[parts.len() - 1].to_string();
        }
    }

    info.email = first_match(&EMAIL, text);
    info.phone = PHONES
        .iter()
        .map(|re| first_match(re, text))
        .find(|m| !m.is_empty())
        .unwrap_or_default();
    info.linkedin = first_match(&LINKEDIN, text);
    info.github = first_match(&GITHUB, text);
    info.portfolio = URL
        .find_iter(text)
        .map(|m| m.as_str().trim())
        .find(|url| !url.contains('@') && !url.contains("linkedin") && !url.contains("github"))
        .unwrap_or_default()
        .to_string();

    let location = lines
        .iter()
        .take(12)
        .map(|l| l.trim())
        .find(|l| mentions_any(l, ADDRESS_TOKENS) && char_len(l) > 5)
        .or_else(|| {
            lines
                .iter()
                .take(8)
                .map(|l| l.trim())
                .find(|l| l.contains(',') && char_len(l) > 8 && !l.contains('@'))
        });
    if let Some(location) = location {
        info.location = location.to_string();
        info.address = location.to_string();
    }

    info
}

fn looks_like_name(line: &str) -> bool {
    let len = char_len(line);
    len > 2 && len < 50 && !mentions_any(line, NOT_A_NAME) && NAME_CHARS.is_match(line)
}

fn first_match(re: &Regex, text: &str) -> String {
    re.find(text)
        .map(|m| m.as_str().to_string())
        .unwrap_or_default()
}
