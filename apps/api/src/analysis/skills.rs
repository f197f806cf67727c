use once_cell::sync::Lazy;
use regex::Regex;

use crate::analysis::models::SkillSet;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Category {
    Programming,
    Web,
    Data,
    Devops,
    Tools,
    SoftSkills,
}

const SKILL_TABLE: &[(Category, &[&str])] = &[
    (
        Category::Programming,
        &["python", "java", "javascript", "typescript", "c++", "c#", "php", "ruby"],
    ),
    (
        Category::Web,
        &[
            "html", "css", "react", "angular", "vue", "node.js", "express", "django", "flask",
            "spring", "laravel",
        ],
    ),
    (
        Category::Data,
        &[
            "sql",
            "mysql",
            "postgresql",
            "mongodb",
            "redis",
            "pandas",
            "numpy",
            "data analysis",
            "machine learning",
        ],
    ),
    (
        Category::Devops,
        &[
            "aws", "azure", "gcp", "docker", "kubernetes", "jenkins", "gitlab", "terraform",
            "linux",
        ],
    ),
    (
        Category::Tools,
        &["git", "github", "gitlab", "jira", "docker", "postman"],
    ),
    (
        Category::SoftSkills,
        &[
            "leadership",
            "communication",
            "teamwork",
            "problem solving",
            "critical thinking",
            "project management",
            "agile",
            "scrum",
        ],
    ),
];

/// One compiled matcher per keyword. A keyword must not touch a letter, digit
/// or underscore on either side, so `java` skips `javascript` and `c++` still
/// matches before punctuation.
static MATCHERS: Lazy<Vec<(Category, &'static str, Regex)>> = Lazy::new(|| {
    SKILL_TABLE
        .iter()
        .flat_map(|(category, keywords)| {
            keywords.iter().map(move |kw| {
                let pattern = format!(r"(?:^|[^\w]){}(?:[^\w]|$)", regex::escape(kw));
                (*category, *kw, Regex::new(&pattern).expect("skill regex"))
            })
        })
        .collect()
});

/// Categorizes known skills mentioned anywhere in the resume.
pub fn extract_skills(text: &str) -> SkillSet {
    let lower = text.to_lowercase();
    let mut skills = SkillSet::default();

    for (category, keyword, re) in MATCHERS.iter() {
        if !re.is_match(&lower) {
            continue;
        }
        let bucket = match category {
            Category::Programming => &mut skills.programming,
            Category::Web => &mut skills.web,
            Category::Data => &mut skills.data,
            Category::Devops => &mut skills.devops,
            Category::Tools => &mut skills.tools,
            Category::SoftSkills => &mut skills.soft_skills,
        };
        let name = title_case(keyword);
        if !bucket.contains(&name) {
            bucket.push(name);
        }
    }

    skills
}

/// Upper-cases the first letter of every alphabetic run: `node.js` → `Node.Js`.
fn title_case(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    let mut prev_alpha = false;
    for c in s.chars() {
        if c.is_alphabetic() {
            if prev_alpha {
                out.extend(c.to_lowercase());
            } else {
                out.extend(c.to_uppercase());
            }
            prev_alpha = true;
        } else {
            out.push(c);
            prev_alpha = false;
        }
    }
    out
}
