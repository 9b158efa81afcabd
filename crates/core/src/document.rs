//! Typed documents produced by the processors.
//!
//! [`TaskOutput`] is the tagged union over every document type; its variant
//! fixes the [`ArtifactKind`], so a processor cannot return a document of
//! the wrong kind without the mismatch being visible in the type.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::task::ArtifactKind;

/// The foundational document every dependent task builds on.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RequirementProfile {
    pub position_title: String,
    pub must_have_skills: Vec<String>,
    pub responsibilities: Vec<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub good_to_haves: Vec<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub soft_skills: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub hiring_manager_notes: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct JobAd {
    pub headline: String,
    pub intro: String,
    pub responsibilities: Vec<String>,
    pub requirements: Vec<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub good_to_haves: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub company_context: Option<String>,
    pub ending: String,
}

/// Who conducts the screening interview.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ScreeningAudience {
    TalentAcquisition,
    HiringManager,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SkillQuestion {
    pub skill: String,
    pub question: String,
    pub follow_ups: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScreeningTemplate {
    pub position_title: String,
    pub audience: ScreeningAudience,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub role_intro: Option<String>,
    pub motivation_questions: Vec<String>,
    pub skill_questions: Vec<SkillQuestion>,
    pub practical_questions: Vec<String>,
    /// Hiring-manager templates leave room for notes after every question.
    pub notes_space: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HeadhuntingMessages {
    pub short_direct: String,
    pub value_proposition: String,
    pub call_to_action: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub personalization_detail: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Recommendation {
    Proceed,
    Consider,
    Reject,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SkillAssessment {
    pub skill: String,
    pub evidence: Vec<String>,
    /// 1 (no evidence) to 5 (strong evidence).
    pub rating: u8,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CandidateReport {
    pub candidate_initials: String,
    pub candidate_full_name: String,
    pub position_name: String,
    pub interview_date: NaiveDate,
    pub skill_assessments: Vec<SkillAssessment>,
    pub recommendation: Recommendation,
    pub conclusion: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FunnelStage {
    pub name: String,
    pub count: u64,
    /// Percentage of the previous stage that reached this one.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub conversion_from_previous: Option<f64>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FunnelReport {
    pub job_title: String,
    pub number_of_positions: u32,
    pub hiring_manager_name: String,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub locations: Vec<String>,
    pub stages: Vec<FunnelStage>,
    pub bottlenecks: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct JobAdReview {
    pub overall_score: u8,
    pub word_count: usize,
    pub sections_found: Vec<String>,
    pub sections_missing: Vec<String>,
    pub recommendations: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FlaggedTerm {
    pub term: String,
    pub category: String,
    pub alternatives: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DiReview {
    pub overall_score: u8,
    pub flagged_terms: Vec<FlaggedTerm>,
    pub compliance_notes: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CalendarInvite {
    pub subject: String,
    pub body: String,
}

/// The result of a successful processor run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", content = "document", rename_all = "snake_case")]
pub enum TaskOutput {
    RequirementProfile(RequirementProfile),
    JobAd(JobAd),
    TaScreeningTemplate(ScreeningTemplate),
    HmScreeningTemplate(ScreeningTemplate),
    HeadhuntingMessages(HeadhuntingMessages),
    CandidateReport(CandidateReport),
    FunnelReport(FunnelReport),
    JobAdReview(JobAdReview),
    DiReview(DiReview),
    CalendarInvite(CalendarInvite),
}

impl TaskOutput {
    pub fn kind(&self) -> ArtifactKind {
        match self {
            TaskOutput::RequirementProfile(_) => ArtifactKind::RequirementProfile,
            TaskOutput::JobAd(_) => ArtifactKind::JobAd,
            TaskOutput::TaScreeningTemplate(_) => ArtifactKind::TaScreeningTemplate,
            TaskOutput::HmScreeningTemplate(_) => ArtifactKind::HmScreeningTemplate,
            TaskOutput::HeadhuntingMessages(_) => ArtifactKind::HeadhuntingMessages,
            TaskOutput::CandidateReport(_) => ArtifactKind::CandidateReport,
            TaskOutput::FunnelReport(_) => ArtifactKind::FunnelReport,
            TaskOutput::JobAdReview(_) => ArtifactKind::JobAdReview,
            TaskOutput::DiReview(_) => ArtifactKind::DiReview,
            TaskOutput::CalendarInvite(_) => ArtifactKind::CalendarInvite,
        }
    }
}
