use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PersonalInfo {
    pub full_name: String,
    pub location: String,
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub phone: String,
    pub address: String,
    pub linkedin: String,
    pub github: String,
    pub portfolio: String,
}

/// Job end date for a role that is still held.
pub const PRESENT: &str = "Present";

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct WorkExperience {
    pub company_name: String,
    pub job_title: String,
    /// `YYYY-MM`, or empty when unknown.
    pub start_date: String,
    /// `YYYY-MM`, `Present`, or empty when unknown.
    pub end_date: String,
    /// The date range exactly as written.
    pub duration: String,
    pub responsibilities: Vec<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Education {
    pub degree: String,
    pub major: String,
    pub school_name: String,
    pub start_date: String,
    pub end_date: String,
    pub gpa: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SkillSet {
    pub programming: Vec<String>,
    pub web: Vec<String>,
    pub data: Vec<String>,
    pub devops: Vec<String>,
    pub tools: Vec<String>,
    pub soft_skills: Vec<String>,
}

impl SkillSet {
    pub fn total(&self) -> usize {
        self.programming.len()
            + self.web.len()
            + self.data.len()
            + self.devops.len()
            + self.tools.len()
            + self.soft_skills.len()
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Project {
    pub title: String,
    pub description: String,
    pub technologies: Vec<String>,
    pub role: String,
    pub duration: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AdditionalInfo {
    pub certifications: Vec<String>,
    pub languages: Vec<String>,
    pub awards: Vec<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ExperienceLevel {
    Fresher,
    Intermediate,
    Experienced,
}

/// Full structured output of resume analysis.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ResumeAnalysis {
    pub personal_info: PersonalInfo,
    pub summary: String,
    pub work_experience: Vec<WorkExperience>,
    pub education: Vec<Education>,
    pub skills: SkillSet,
    pub projects: Vec<Project>,
    pub certifications: Vec<String>,
    pub languages: Vec<String>,
    pub awards: Vec<String>,
    pub total_experience: String,
    pub experience_level: ExperienceLevel,
    pub additional_info: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_experience_level_serializes_as_plain_label() {
        assert_eq!(
            serde_json::to_string(&ExperienceLevel::Experienced).unwrap(),
            r#""Experienced""#
        );
    }

    #[test]
    fn test_skill_set_total_counts_every_category() {
        let skills = SkillSet {
            programming: vec!["Rust".into()],
            tools: vec!["Git".into(), "Jira".into()],
            ..SkillSet::default()
        };
        assert_eq!(skills.total(), 3);
    }
}
