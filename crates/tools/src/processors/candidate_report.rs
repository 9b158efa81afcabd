//! Candidate assessment report from an interview transcript.

use chrono::NaiveDate;
use tata_core::document::{
    CandidateReport, Recommendation, RequirementProfile, ScreeningTemplate, SkillAssessment,
};
use tata_core::error::ProcessorError;
use tata_core::input::CandidateReportArgs;

use super::require_non_empty;

const MAX_EVIDENCE: usize = 3;

pub fn generate(
    args: &CandidateReportArgs,
    profile: &RequirementProfile,
    screening: &ScreeningTemplate,
) -> Result<CandidateReport, ProcessorError> {
    require_non_empty(&args.transcript, "transcript")?;
    require_non_empty(&args.candidate_name, "candidate_name")?;
    let interview_date = NaiveDate::parse_from_str(args.interview_date.trim(), "%Y-%m-%d")
        .map_err(|_| {
            ProcessorError::InvalidInput(format!(
                "interview_date must be YYYY-MM-DD, got '{}'",
                args.interview_date
            ))
        })?;

    // Skills covered in the screening beyond the profile are assessed too
    let mut skills: Vec<&str> = profile.must_have_skills.iter().map(String::as_str).collect();
    for question in &screening.skill_questions {
        if !skills.contains(&question.skill.as_str()) {
            skills.push(&question.skill);
        }
    }

    let lines: Vec<&str> = args
        .transcript
        .lines()
        .map(str::trim)
        .filter(|l| !l.is_empty())
        .collect();

    let skill_assessments: Vec<SkillAssessment> = skills
        .iter()
        .map(|skill| assess(skill, &lines))
        .collect();

    let recommendation = recommend(&skill_assessments);
    let name = args.candidate_name.trim();
    let strong = skill_assessments.iter().filter(|a| a.rating >= 4).count();

    Ok(CandidateReport {
        candidate_initials: initials(name),
        candidate_full_name: name.to_string(),
        position_name: profile.position_title.clone(),
        interview_date,
        conclusion: format!(
            "{} showed strong evidence in {strong} of {} assessed skills for the {} role.",
            initials(name),
            skill_assessments.len(),
            profile.position_title
        ),
        skill_assessments,
        recommendation,
    })
}

fn assess(skill: &str, transcript: &[&str]) -> SkillAssessment {
    let needle = skill.to_lowercase();
    let evidence: Vec<String> = transcript
        .iter()
        .filter(|line| line.to_lowercase().contains(&needle))
        .map(|line| line.to_string())
        .collect();
    let rating = match evidence.len() {
        0 => 1,
        1 => 3,
        2 => 4,
        _ => 5,
    };
    SkillAssessment {
        skill: skill.to_string(),
        evidence: evidence.into_iter().take(MAX_EVIDENCE).collect(),
        rating,
    }
}

fn recommend(assessments: &[SkillAssessment]) -> Recommendation {
    if assessments.is_empty() {
        return Recommendation::Consider;
    }
    let total: u32 = assessments.iter().map(|a| u32::from(a.rating)).sum();
    let average = total as f64 / assessments.len() as f64;
    if average >= 3.5 {
        Recommendation::Proceed
    } else if average >= 2.5 {
        Recommendation::Consider
    } else {
        Recommendation::Reject
    }
}

/// Reports refer to candidates by initials, e.g. "Ada Lovelace" -> "A.L.".
fn initials(name: &str) -> String {
    name.split_whitespace()
        .filter_map(|part| part.chars().next())
        .flat_map(char::to_uppercase)
        .map(|c| format!("{c}."))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use tata_core::document::{ScreeningAudience, SkillQuestion};

    fn profile() -> RequirementProfile {
        RequirementProfile {
            position_title: "Backend Engineer".into(),
            must_have_skills: vec!["Rust".into(), "PostgreSQL".into()],
            responsibilities: vec![],
            good_to_haves: vec![],
            soft_skills: vec![],
            hiring_manager_notes: None,
        }
    }

    fn screening() -> ScreeningTemplate {
        ScreeningTemplate {
            position_title: "Backend Engineer".into(),
            audience: ScreeningAudience::TalentAcquisition,
            role_intro: None,
            motivation_questions: vec![],
            skill_questions: vec![SkillQuestion {
                skill: "Kafka".into(),
                question: "?".into(),
                follow_ups: vec![],
            }],
            practical_questions: vec![],
            notes_space: false,
        }
    }

    fn args(date: &str) -> CandidateReportArgs {
        CandidateReportArgs {
            transcript: "I wrote Rust daily.\nOur Rust services used PostgreSQL.\nRust async is fun."
                .into(),
            candidate_name: "ada lovelace".into(),
            interview_date: date.into(),
            candidate_cv: None,
        }
    }

    #[test]
    fn rates_skills_from_transcript_evidence() {
        let report = generate(&args("2026-03-02"), &profile(), &screening()).unwrap();
        assert_eq!(report.candidate_initials, "A.L.");
        assert_eq!(report.skill_assessments.len(), 3);
        assert_eq!(report.skill_assessments[0].rating, 5);
        assert_eq!(report.skill_assessments[1].rating, 3);
        assert_eq!(report.skill_assessments[2].skill, "Kafka");
        assert_eq!(report.skill_assessments[2].rating, 1);
        assert_eq!(report.recommendation, Recommendation::Consider);
    }

    #[test]
    fn rejects_non_iso_dates() {
        let err = generate(&args("02/03/2026"), &profile(), &screening()).unwrap_err();
        assert!(matches!(err, ProcessorError::InvalidInput(msg) if msg.contains("YYYY-MM-DD")));
    }
}
