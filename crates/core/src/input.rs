//! Typed task arguments and processor inputs.
//!
//! Arguments arrive from the model as a JSON object. [`TaskArgs::decode`]
//! turns that object into the argument struct of one task kind, and
//! [`TaskInput::assemble`] pairs the arguments with the artifacts the task
//! consumes.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

use crate::artifact::Artifact;
use crate::document::{JobAd, RequirementProfile, ScreeningTemplate, TaskOutput};
use crate::error::ProcessorError;
use crate::task::{ArtifactKind, TaskKind};

/// Languages a document can be written or reviewed in.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SupportedLanguage {
    #[default]
    #[serde(rename = "en")]
    English,
    #[serde(rename = "sv")]
    Swedish,
    #[serde(rename = "da")]
    Danish,
    #[serde(rename = "no")]
    Norwegian,
    #[serde(rename = "de")]
    German,
}

impl SupportedLanguage {
    pub const CODES: [&'static str; 5] = ["en", "sv", "da", "no", "de"];
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RequirementProfileArgs {
    pub startup_notes: String,
    pub position_title: String,
    #[serde(default)]
    pub old_job_ad: Option<String>,
    #[serde(default)]
    pub hiring_manager_input: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct JobAdArgs {
    #[serde(default)]
    pub startup_notes: Option<String>,
    #[serde(default)]
    pub old_job_ad: Option<String>,
    #[serde(default)]
    pub company_context: Option<String>,
}

/// Shared by the TA and HM screening tasks.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ScreeningArgs {
    #[serde(default)]
    pub include_good_to_haves: bool,
    #[serde(default)]
    pub include_role_intro: bool,
    #[serde(default)]
    pub additional_areas: Vec<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct HeadhuntingArgs {
    #[serde(default)]
    pub candidate_profile: Option<String>,
    #[serde(default)]
    pub company_context: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CandidateReportArgs {
    pub transcript: String,
    pub candidate_name: String,
    /// ISO date, `YYYY-MM-DD`.
    pub interview_date: String,
    #[serde(default)]
    pub candidate_cv: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct FunnelReportArgs {
    pub job_title: String,
    pub number_of_positions: u32,
    pub hiring_manager_name: String,
    #[serde(default)]
    pub locations: Vec<String>,
    #[serde(default)]
    pub job_ad_views: Option<u64>,
    #[serde(default)]
    pub apply_clicks: Option<u64>,
    #[serde(default)]
    pub applications_received: Option<u64>,
    #[serde(default)]
    pub qualified_applications: Option<u64>,
    #[serde(default)]
    pub candidates_sourced: Option<u64>,
    #[serde(default)]
    pub candidates_contacted: Option<u64>,
    #[serde(default)]
    pub candidates_replied: Option<u64>,
    #[serde(default)]
    pub ta_screenings: Option<u64>,
    #[serde(default)]
    pub hm_interviews: Option<u64>,
    #[serde(default)]
    pub offers_made: Option<u64>,
    #[serde(default)]
    pub offers_accepted: Option<u64>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct JobAdReviewArgs {
    pub job_ad_text: String,
    #[serde(default)]
    pub language: SupportedLanguage,
    #[serde(default)]
    pub position_title: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DiReviewArgs {
    pub job_ad_text: String,
    #[serde(default)]
    pub language: SupportedLanguage,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LocationType {
    Teams,
    Onsite,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum InterviewType {
    HiringManager,
    Case,
    Team,
    TaScreening,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BookingMethod {
    Jobylon,
    Manual,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum City {
    Stockholm,
    Copenhagen,
    Oslo,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CalendarInviteArgs {
    pub position_name: String,
    pub hiring_manager_name: String,
    pub hiring_manager_title: String,
    pub recruiter_name: String,
    pub location_type: LocationType,
    pub interview_type: InterviewType,
    pub duration: u32,
    pub booking_method: BookingMethod,
    #[serde(default)]
    pub city: Option<City>,
    #[serde(default)]
    pub interview_date: Option<String>,
    #[serde(default)]
    pub interview_time: Option<String>,
    #[serde(default)]
    pub job_ad_link: Option<String>,
}

/// Decoded arguments, one variant per task kind.
#[derive(Debug, Clone, PartialEq)]
pub enum TaskArgs {
    RequirementProfile(RequirementProfileArgs),
    JobAd(JobAdArgs),
    TaScreening(ScreeningArgs),
    HmScreening(ScreeningArgs),
    Headhunting(HeadhuntingArgs),
    CandidateReport(CandidateReportArgs),
    FunnelReport(FunnelReportArgs),
    JobAdReview(JobAdReviewArgs),
    DiReview(DiReviewArgs),
    CalendarInvite(CalendarInviteArgs),
}

impl TaskArgs {
    /// Decode a JSON object into the argument struct for `kind`.
    pub fn decode(kind: TaskKind, value: serde_json::Value) -> Result<Self, serde_json::Error> {
        use serde_json::from_value;

        Ok(match kind {
            TaskKind::RequirementProfile => TaskArgs::RequirementProfile(from_value(value)?),
            TaskKind::JobAd => TaskArgs::JobAd(from_value(value)?),
            TaskKind::TaScreening => TaskArgs::TaScreening(from_value(value)?),
            TaskKind::HmScreening => TaskArgs::HmScreening(from_value(value)?),
            TaskKind::Headhunting => TaskArgs::Headhunting(from_value(value)?),
            TaskKind::CandidateReport => TaskArgs::CandidateReport(from_value(value)?),
            TaskKind::FunnelReport => TaskArgs::FunnelReport(from_value(value)?),
            TaskKind::JobAdReview => TaskArgs::JobAdReview(from_value(value)?),
            TaskKind::DiReview => TaskArgs::DiReview(from_value(value)?),
            TaskKind::CalendarInvite => TaskArgs::CalendarInvite(from_value(value)?),
        })
    }

    /// The working language the recruiter asked for, when the task takes one.
    pub fn language(&self) -> Option<SupportedLanguage> {
        match self {
            TaskArgs::JobAdReview(args) => Some(args.language),
            TaskArgs::DiReview(args) => Some(args.language),
            _ => None,
        }
    }
}

/// Everything a processor needs: decoded arguments plus consumed artifacts.
#[derive(Debug, Clone, PartialEq)]
pub enum TaskInput {
    RequirementProfile(RequirementProfileArgs),
    JobAd {
        args: JobAdArgs,
        profile: RequirementProfile,
    },
    TaScreening {
        args: ScreeningArgs,
        profile: RequirementProfile,
    },
    HmScreening {
        args: ScreeningArgs,
        profile: RequirementProfile,
    },
    Headhunting {
        args: HeadhuntingArgs,
        profile: RequirementProfile,
        job_ad: Option<JobAd>,
    },
    CandidateReport {
        args: CandidateReportArgs,
        profile: RequirementProfile,
        screening: ScreeningTemplate,
    },
    FunnelReport(FunnelReportArgs),
    JobAdReview(JobAdReviewArgs),
    DiReview(DiReviewArgs),
    CalendarInvite(CalendarInviteArgs),
}

impl TaskInput {
    /// Pair decoded arguments with the artifacts the task consumes.
    ///
    /// `artifacts` holds whatever the session has stored for the task's
    /// declared inputs; a missing required input is reported as
    /// [`ProcessorError::MissingArtifact`].
    pub fn assemble(
        args: TaskArgs,
        artifacts: &HashMap<ArtifactKind, Artifact>,
    ) -> Result<Self, ProcessorError> {
        Ok(match args {
            TaskArgs::RequirementProfile(args) => TaskInput::RequirementProfile(args),
            TaskArgs::JobAd(args) => TaskInput::JobAd {
                args,
                profile: profile(artifacts)?,
            },
            TaskArgs::TaScreening(args) => TaskInput::TaScreening {
                args,
                profile: profile(artifacts)?,
            },
            TaskArgs::HmScreening(args) => TaskInput::HmScreening {
                args,
                profile: profile(artifacts)?,
            },
            TaskArgs::Headhunting(args) => TaskInput::Headhunting {
                args,
                profile: profile(artifacts)?,
                job_ad: match artifacts.get(&ArtifactKind::JobAd).map(|a| &a.output) {
                    Some(TaskOutput::JobAd(ad)) => Some(ad.clone()),
                    _ => None,
                },
            },
            TaskArgs::CandidateReport(args) => TaskInput::CandidateReport {
                args,
                profile: profile(artifacts)?,
                screening: ta_screening(artifacts)?,
            },
            TaskArgs::FunnelReport(args) => TaskInput::FunnelReport(args),
            TaskArgs::JobAdReview(args) => TaskInput::JobAdReview(args),
            TaskArgs::DiReview(args) => TaskInput::DiReview(args),
            TaskArgs::CalendarInvite(args) => TaskInput::CalendarInvite(args),
        })
    }
}

type Inputs = HashMap<ArtifactKind, Artifact>;

fn profile(artifacts: &Inputs) -> Result<RequirementProfile, ProcessorError> {
    match artifacts.get(&ArtifactKind::RequirementProfile).map(|a| &a.output) {
        Some(TaskOutput::RequirementProfile(p)) => Ok(p.clone()),
        _ => Err(ProcessorError::MissingArtifact(ArtifactKind::RequirementProfile)),
    }
}

fn ta_screening(artifacts: &Inputs) -> Result<ScreeningTemplate, ProcessorError> {
    match artifacts.get(&ArtifactKind::TaScreeningTemplate).map(|a| &a.output) {
        Some(TaskOutput::TaScreeningTemplate(t)) => Ok(t.clone()),
        _ => Err(ProcessorError::MissingArtifact(ArtifactKind::TaScreeningTemplate)),
    }
}
