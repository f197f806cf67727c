// Resume analysis engine.
// The extractors are pure, deterministic heuristics over extracted text: no I/O,
// no clock reads. Callers pass `today` so date-relative metrics stay testable.
// `handlers` is the HTTP surface.

pub mod additional;
pub mod education;
pub mod experience;
pub mod handlers;
pub mod metrics;
pub mod models;
pub mod personal;
pub mod projects;
pub mod sections;
pub mod skills;
pub mod summary;

use chrono::NaiveDate;

use crate::analysis::additional::extract_additional_info;
use crate::analysis::education::extract_education;
use crate::analysis::experience::extract_work_experience;
use crate::analysis::metrics::{experience_level, total_experience};
use crate::analysis::models::ResumeAnalysis;
use crate::analysis::personal::extract_personal_info;
use crate::analysis::projects::extract_projects;
use crate::analysis::sections::char_len;
use crate::analysis::skills::extract_skills;
use crate::analysis::summary::extract_summary;

/// Runs every extractor over `text` and assembles the structured result.
pub fn analyze(text: &str, today: NaiveDate) -> ResumeAnalysis {
    let work_experience = extract_work_experience(text);
    let additional = extract_additional_info(text);

    ResumeAnalysis {
        personal_info: extract_personal_info(text),
        summary: extract_summary(text),
        education: extract_education(text),
        skills: extract_skills(text),
        projects: extract_projects(text),
        certifications: additional.certifications,
        languages: additional.languages,
        awards: additional.awards,
        total_experience: total_experience(&work_experience, today),
        experience_level: experience_level(&work_experience, text, today),
        additional_info: format!(
            "Analyzed on {}. Text length: {} characters.",
            today.format("%Y-%m-%d"),
            char_len(text)
        ),
        work_experience,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analysis::models::{ExperienceLevel, PRESENT};

    const RESUME: &str = "Jane Doe\n\
        Colombo, Sri Lanka\n\
        jane.doe@example.com | +94 77 123 4567\n\
        github.com/janedoe\n\
        \n\
        Summary\n\
        Backend engineer building dependable payment platforms.\n\
        \n\
        Work Experience\n\
        Senior Engineer at Globex (Jan 2021 - Present)\n\
        • Owned the settlement service handling 2M transactions a day\n\
        Initech | Backend Engineer | 2017 - 2020\n\
        - Migrated reporting jobs from cron to Kubernetes\n\
        Education\n\
        Bachelor of Science in Computer Science, University of Moratuwa, 2016\n\
        Skills\n\
        Python, Java, PostgreSQL, Docker, Git, Leadership\n\
        Certifications\n\
        AWS Certified Developer\n";

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2026, 10, 19).unwrap()
    }

    #[test]
    fn test_full_resume() {
        let result = analyze(RESUME, today());

        assert_eq!(result.personal_info.full_name, "Jane Doe");
        assert_eq!(result.personal_info.email, "jane.doe@example.com");
        assert_eq!(result.personal_info.github, "github.com/janedoe");
        assert_eq!(result.personal_info.location, "Colombo, Sri Lanka");
        assert_eq!(
            result.summary,
            "Backend engineer building dependable payment platforms."
        );

        assert_eq!(result.work_experience.len(), 2);
        assert_eq!(result.work_experience[0].company_name, "Globex");
        assert_eq!(result.work_experience[0].start_date, "2021-01");
        assert_eq!(result.work_experience[0].end_date, PRESENT);
        assert_eq!(result.work_experience[1].company_name, "Initech");
        assert_eq!(result.work_experience[1].job_title, "Backend Engineer");

        assert_eq!(result.education.len(), 1);
        assert_eq!(result.education[0].school_name, "University of Moratuwa");
        assert_eq!(result.education[0].major, "Computer Science");
        assert_eq!(result.education[0].end_date, "2016-01");

        assert_eq!(result.skills.programming, vec!["Python", "Java"]);
        assert_eq!(result.skills.data, vec!["Postgresql"]);
        assert_eq!(result.skills.tools, vec!["Git", "Github", "Docker"]);
        assert_eq!(result.skills.soft_skills, vec!["Leadership"]);

        assert_eq!(result.certifications, vec!["AWS Certified Developer"]);
        assert!(result.projects.is_empty());

        // Globex 2021-01..2026-10 (69 months) + Initech 2017-01..2020-01 (36 months)
        assert_eq!(result.total_experience, "8 years 9 months");
        assert_eq!(result.experience_level, ExperienceLevel::Experienced);
        assert_eq!(
            result.additional_info,
            format!(
                "Analyzed on 2026-10-19. Text length: {} characters.",
                RESUME.chars().count()
            )
        );
    }

    #[test]
    fn test_blank_text_is_well_formed() {
        let result = analyze("", today());
        assert!(result.work_experience.is_empty());
        assert_eq!(result.total_experience, "0 months");
        assert_eq!(result.experience_level, ExperienceLevel::Fresher);
    }
}
