//! Experience metrics derived from the extracted work history.

use chrono::{Datelike, NaiveDate};

use crate::analysis::models::{ExperienceLevel, WorkExperience, PRESENT};
use crate::analysis::sections::char_len;

/// Classifies seniority from summed job years.
///
/// When no job carries both dates, resume length stands in: longer than 3000
/// characters counts as 3 years, longer than 1500 as 1.
pub fn experience_level(jobs: &[WorkExperience], text: &str, today: NaiveDate) -> ExperienceLevel {
    let mut years: i32 = jobs
        .iter()
        .filter_map(|job| {
            let (start, end) = job_span(job, today)?;
            Some((end.0 - start.0).max(0))
        })
        .sum();

    if years == 0 {
        let len = char_len(text);
        years = if len > 3000 {
            3
        } else if len > 1500 {
            1
        } else {
            0
        };
    }

    match years {
        y if y >= 5 => ExperienceLevel::Experienced,
        y if y >= 2 => ExperienceLevel::Intermediate,
        _ => ExperienceLevel::Fresher,
    }
}

/// Sums job durations into `N years M months`, `N years`, or `M months`.
pub fn total_experience(jobs: &[WorkExperience], today: NaiveDate) -> String {
    let months: i32 = jobs
        .iter()
        .filter_map(|job| job_span(job, today))
        .map(|(start, end)| ((end.0 - start.0) * 12 + (end.1 - start.1)).max(0))
        .sum();

    let (years, months) = (months / 12, months % 12);
    match (years, months) {
        (0, m) => format!("{m} months"),
        (y, 0) => format!("{y} years"),
        (y, m) => format!("{y} years {m} months"),
    }
}

/// `(year, month)` bounds of a job; `None` unless both dates are present and parse.
fn job_span(job: &WorkExperience, today: NaiveDate) -> Option<((i32, i32), (i32, i32))> {
    if job.start_date.is_empty() || job.end_date.is_empty() {
        return None;
    }
    let start = parse_year_month(&job.start_date)?;
    let end = if job.end_date == PRESENT {
        (today.year(), today.month() as i32)
    } else {
        parse_year_month(&job.end_date)?
    };
    Some((start, end))
}

fn parse_year_month(date: &str) -> Option<(i32, i32)> {
    let (year, month) = date.split_once('-')?;
    Some((year.parse().ok()?, month.parse().ok()?))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn job(start: &str, end: &str) -> WorkExperience {
        WorkExperience {
            start_date: start.to_string(),
            end_date: end.to_string(),
            ..WorkExperience::default()
        }
    }

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2026, 10, 19).unwrap()
    }

    #[test]
    fn test_total_experience_formats() {
        assert_eq!(total_experience(&[], today()), "0 months");
        assert_eq!(
            total_experience(&[job("2016-01", "2020-01")], today()),
            "4 years"
        );
        assert_eq!(
            total_experience(&[job("2016-01", "2020-01"), job("2020-06", "2021-01")], today()),
            "4 years 7 months"
        );
        assert_eq!(total_experience(&[job("2021-02", "2021-07")], today()), "5 months");
    }

    #[test]
    fn test_present_runs_until_today() {
        assert_eq!(
            total_experience(&[job("2025-10", PRESENT)], today()),
            "1 years"
        );
    }

    #[test]
    fn test_incomplete_or_reversed_jobs_are_ignored() {
        let jobs = [job("", PRESENT), job("2019-01", ""), job("2022-01", "2020-01")];
        assert_eq!(total_experience(&jobs, today()), "0 months");
    }

    #[test]
    fn test_level_from_job_years() {
        let senior = [job("2015-01", "2021-01")];
        assert_eq!(
            experience_level(&senior, "", today()),
            ExperienceLevel::Experienced
        );
        let mid = [job("2023-01", PRESENT)];
        assert_eq!(
            experience_level(&mid, "", today()),
            ExperienceLevel::Intermediate
        );
    }

    #[test]
    fn test_level_falls_back_on_text_length() {
        assert_eq!(
            experience_level(&[], &"x".repeat(3001), today()),
            ExperienceLevel::Intermediate
        );
        assert_eq!(
            experience_level(&[], &"x".repeat(1600), today()),
            ExperienceLevel::Fresher
        );
        assert_eq!(experience_level(&[], "short", today()), ExperienceLevel::Fresher);
    }
}
