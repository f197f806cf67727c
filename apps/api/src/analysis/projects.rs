use crate::analysis::models::Project;
use crate::analysis::sections::{char_len, mentions_any};

const SECTION_HEADINGS: &[&str] = &["projects", "personal projects", "portfolio"];
const SECTION_END: &[&str] = &["experience", "education", "skills", "certifications"];
const PROJECT_END: &[&str] = &["experience", "education"];
const TECH_KEYWORDS: &[&str] = &["python", "java", "react", "node", "sql", "mongodb", "aws"];

/// Extracts project entries: a title line, then a description and detail lines.
/// A blank line closes the current project.
pub fn extract_projects(text: &str) -> Vec<Project> {
    let lines: Vec<&str> = text.split('\n').collect();
    let mut projects = Vec::new();
    let mut current: Option<Project> = None;
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

        let len = char_len(line);
        if current.is_none() {
            if len > 5 && len < 100 {
                let mut project = Project {
                    title: line.to_string(),
                    ..Project::default()
                };
                add_technologies(&mut project, line);
                current = Some(project);
            }
            continue;
        }

        if let Some(project) = current.as_mut() {
            if len > 20 {
                if project.description.is_empty() {
                    project.description = line.to_string();
                }
                add_technologies(project, line);
            }
        }

        let closes = lines
            .get(i + 1)
            .is_some_and(|next| next.trim().is_empty() || mentions_any(next, PROJECT_END));
        if closes {
            projects.extend(current.take());
        }
    }

    projects.extend(current);
    projects
}

fn add_technologies(project: &mut Project, line: &str) {
    let lower = line.to_lowercase();
    for tech in TECH_KEYWORDS {
        if lower.contains(tech) && !project.technologies.iter().any(|t| t == tech) {
            project.technologies.push(tech.to_string());
        }
    }
}
