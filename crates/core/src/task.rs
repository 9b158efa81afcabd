//! Task and artifact kinds: the fixed catalog of generation operations.
//!
//! Every [`TaskKind`] produces exactly one [`ArtifactKind`], and no two task
//! kinds share an artifact kind. The tables here are the single source of
//! truth for tool names, human-readable names and artifact inputs.

use serde::{Deserialize, Serialize};
use std::fmt;

/// One of the ten supported generation tasks.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TaskKind {
    RequirementProfile,
    JobAd,
    TaScreening,
    HmScreening,
    Headhunting,
    CandidateReport,
    FunnelReport,
    JobAdReview,
    DiReview,
    CalendarInvite,
}

impl TaskKind {
    /// All task kinds, in catalog order.
    pub const ALL: [TaskKind; 10] = [
        TaskKind::RequirementProfile,
        TaskKind::JobAd,
        TaskKind::TaScreening,
        TaskKind::HmScreening,
        TaskKind::Headhunting,
        TaskKind::CandidateReport,
        TaskKind::FunnelReport,
        TaskKind::JobAdReview,
        TaskKind::DiReview,
        TaskKind::CalendarInvite,
    ];

    /// The function name published to the LLM.
    pub fn tool_name(self) -> &'static str {
        match self {
            TaskKind::RequirementProfile => "create_requirement_profile",
            TaskKind::JobAd => "create_job_ad",
            TaskKind::TaScreening => "create_ta_screening_template",
            TaskKind::HmScreening => "create_hm_screening_template",
            TaskKind::Headhunting => "create_headhunting_messages",
            TaskKind::CandidateReport => "create_candidate_report",
            TaskKind::FunnelReport => "create_funnel_report",
            TaskKind::JobAdReview => "review_job_ad",
            TaskKind::DiReview => "review_di_compliance",
            TaskKind::CalendarInvite => "create_calendar_invite",
        }
    }

    /// Resolve a tool name back to its task kind.
    pub fn from_tool_name(name: &str) -> Option<TaskKind> {
        Self::ALL.into_iter().find(|k| k.tool_name() == name)
    }

    /// Human-readable name, used in every user- or model-facing message.
    pub fn human_name(self) -> &'static str {
        self.artifact().human_name()
    }

    /// The artifact kind this task produces.
    pub fn artifact(self) -> ArtifactKind {
        match self {
            TaskKind::RequirementProfile => ArtifactKind::RequirementProfile,
            TaskKind::JobAd => ArtifactKind::JobAd,
            TaskKind::TaScreening => ArtifactKind::TaScreeningTemplate,
            TaskKind::HmScreening => ArtifactKind::HmScreeningTemplate,
            TaskKind::Headhunting => ArtifactKind::HeadhuntingMessages,
            TaskKind::CandidateReport => ArtifactKind::CandidateReport,
            TaskKind::FunnelReport => ArtifactKind::FunnelReport,
            TaskKind::JobAdReview => ArtifactKind::JobAdReview,
            TaskKind::DiReview => ArtifactKind::DiReview,
            TaskKind::CalendarInvite => ArtifactKind::CalendarInvite,
        }
    }

    /// Artifacts the processor for this task cannot run without.
    pub fn input_artifacts(self) -> &'static [ArtifactKind] {
        match self {
            TaskKind::JobAd
            | TaskKind::TaScreening
            | TaskKind::HmScreening
            | TaskKind::Headhunting => &[ArtifactKind::RequirementProfile],
            TaskKind::CandidateReport => &[
                ArtifactKind::RequirementProfile,
                ArtifactKind::TaScreeningTemplate,
            ],
            _ => &[],
        }
    }

    /// Artifacts passed to the processor when present, never required.
    pub fn optional_input_artifacts(self) -> &'static [ArtifactKind] {
        match self {
            TaskKind::Headhunting => &[ArtifactKind::JobAd],
            _ => &[],
        }
    }
}

impl fmt::Display for TaskKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.human_name())
    }
}

/// The output category a task produces.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ArtifactKind {
    RequirementProfile,
    JobAd,
    TaScreeningTemplate,
    HmScreeningTemplate,
    HeadhuntingMessages,
    CandidateReport,
    FunnelReport,
    JobAdReview,
    DiReview,
    CalendarInvite,
}

impl ArtifactKind {
    pub const ALL: [ArtifactKind; 10] = [
        ArtifactKind::RequirementProfile,
        ArtifactKind::JobAd,
        ArtifactKind::TaScreeningTemplate,
        ArtifactKind::HmScreeningTemplate,
        ArtifactKind::HeadhuntingMessages,
        ArtifactKind::CandidateReport,
        ArtifactKind::FunnelReport,
        ArtifactKind::JobAdReview,
        ArtifactKind::DiReview,
        ArtifactKind::CalendarInvite,
    ];

    /// Stable identifier, matching the serde representation.
    pub fn as_str(self) -> &'static str {
        match self {
            ArtifactKind::RequirementProfile => "requirement_profile",
            ArtifactKind::JobAd => "job_ad",
            ArtifactKind::TaScreeningTemplate => "ta_screening_template",
            ArtifactKind::HmScreeningTemplate => "hm_screening_template",
            ArtifactKind::HeadhuntingMessages => "headhunting_messages",
            ArtifactKind::CandidateReport => "candidate_report",
            ArtifactKind::FunnelReport => "funnel_report",
            ArtifactKind::JobAdReview => "job_ad_review",
            ArtifactKind::DiReview => "di_review",
            ArtifactKind::CalendarInvite => "calendar_invite",
        }
    }

    pub fn human_name(self) -> &'static str {
        match self {
            ArtifactKind::RequirementProfile => "Requirement Profile",
            ArtifactKind::JobAd => "Job Ad",
            ArtifactKind::TaScreeningTemplate => "TA Screening Template",
            ArtifactKind::HmScreeningTemplate => "HM Screening Template",
            ArtifactKind::HeadhuntingMessages => "Headhunting Messages",
            ArtifactKind::CandidateReport => "Candidate Report",
            ArtifactKind::FunnelReport => "Funnel Report",
            ArtifactKind::JobAdReview => "Job Ad Review",
            ArtifactKind::DiReview => "D&I Review",
            ArtifactKind::CalendarInvite => "Calendar Invite",
        }
    }

    /// The single task kind that produces this artifact.
    pub fn producer(self) -> TaskKind {
        match self {
            ArtifactKind::RequirementProfile => TaskKind::RequirementProfile,
            ArtifactKind::JobAd => TaskKind::JobAd,
            ArtifactKind::TaScreeningTemplate => TaskKind::TaScreening,
            ArtifactKind::HmScreeningTemplate => TaskKind::HmScreening,
            ArtifactKind::HeadhuntingMessages => TaskKind::Headhunting,
            ArtifactKind::CandidateReport => TaskKind::CandidateReport,
            ArtifactKind::FunnelReport => TaskKind::FunnelReport,
            ArtifactKind::JobAdReview => TaskKind::JobAdReview,
            ArtifactKind::DiReview => TaskKind::DiReview,
            ArtifactKind::CalendarInvite => TaskKind::CalendarInvite,
        }
    }
}

impl fmt::Display for ArtifactKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn every_task_produces_a_distinct_artifact() {
        let produced: HashSet<ArtifactKind> = TaskKind::ALL.iter().map(|t| t.artifact()).collect();
        assert_eq!(produced.len(), TaskKind::ALL.len());
    }

    #[test]
    fn producer_inverts_artifact() {
        for task in TaskKind::ALL {
            assert_eq!(task.artifact().producer(), task);
        }
    }

    #[test]
    fn tool_names_round_trip() {
        for task in TaskKind::ALL {
            assert_eq!(TaskKind::from_tool_name(task.tool_name()), Some(task));
        }
        assert_eq!(TaskKind::from_tool_name("make_coffee"), None);
    }

    #[test]
    fn serde_uses_snake_case_identifiers() {
        let json = serde_json::to_string(&ArtifactKind::TaScreeningTemplate).unwrap();
        assert_eq!(json, "\"ta_screening_template\"");
        for kind in ArtifactKind::ALL {
            let json = serde_json::to_string(&kind).unwrap();
            assert_eq!(json.trim_matches('"'), kind.as_str());
        }
    }

    #[test]
    fn human_names_never_expose_codes() {
        assert_eq!(TaskKind::TaScreening.human_name(), "TA Screening Template");
        assert_eq!(TaskKind::DiReview.to_string(), "D&I Review");
    }
}
