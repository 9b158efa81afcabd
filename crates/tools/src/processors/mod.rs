//! Reference document processors.
//!
//! Each generator is deterministic: it shapes the decoded arguments and
//! consumed artifacts into a typed document without calling an LLM. Input
//! validation failures surface as [`ProcessorError::InvalidInput`].

pub mod calendar;
pub mod candidate_report;
pub mod funnel;
pub mod headhunting;
pub mod hype;
pub mod job_ad;
pub mod profile;
pub mod review;
pub mod screening;

use async_trait::async_trait;
use tata_core::document::{ScreeningAudience, TaskOutput};
use tata_core::error::ProcessorError;
use tata_core::input::TaskInput;
use tata_core::processor::Processor;

/// Dispatches every task input to its generator.
#[derive(Debug, Default, Clone, Copy)]
pub struct DocumentProcessor;

#[async_trait]
impl Processor for DocumentProcessor {
    fn name(&self) -> &str {
        "document"
    }

    async fn process(&self, input: TaskInput) -> Result<TaskOutput, ProcessorError> {
        Ok(match input {
            TaskInput::RequirementProfile(args) => {
                TaskOutput::RequirementProfile(profile::generate(&args)?)
            }
            TaskInput::JobAd { args, profile } => {
                TaskOutput::JobAd(job_ad::generate(&args, &profile))
            }
            TaskInput::TaScreening { args, profile } => TaskOutput::TaScreeningTemplate(
                screening::generate(&args, &profile, ScreeningAudience::TalentAcquisition),
            ),
            TaskInput::HmScreening { args, profile } => TaskOutput::HmScreeningTemplate(
                screening::generate(&args, &profile, ScreeningAudience::HiringManager),
            ),
            TaskInput::Headhunting { args, profile, job_ad } => TaskOutput::HeadhuntingMessages(
                headhunting::generate(&args, &profile, job_ad.as_ref()),
            ),
            TaskInput::CandidateReport {
                args,
                profile,
                screening,
            } => TaskOutput::CandidateReport(candidate_report::generate(
                &args, &profile, &screening,
            )?),
            TaskInput::FunnelReport(args) => TaskOutput::FunnelReport(funnel::generate(&args)?),
            TaskInput::JobAdReview(args) => TaskOutput::JobAdReview(review::review_job_ad(&args)?),
            TaskInput::DiReview(args) => TaskOutput::DiReview(review::review_di(&args)?),
            TaskInput::CalendarInvite(args) => {
                TaskOutput::CalendarInvite(calendar::generate(&args)?)
            }
        })
    }
}

/// Split free text into trimmed, non-empty items.
///
/// Bullets, numbered lines and semicolons all act as separators.
pub(crate) fn split_items(text: &str) -> Vec<String> {
    text.split(['\n', ';'])
        .map(strip_marker)
        .filter(|item| !item.is_empty())
        .map(str::to_string)
        .collect()
}

fn strip_marker(line: &str) -> &str {
    let line = line.trim().trim_start_matches(['-', '*', '•']).trim_start();
    let digits = line.chars().take_while(char::is_ascii_digit).count();
    if digits > 0 {
        if let Some(rest) = line[digits..].strip_prefix(['.', ')']) {
            return rest.trim();
        }
    }
    line.trim()
}

pub(crate) fn require_non_empty(value: &str, field: &str) -> Result<(), ProcessorError> {
    if value.trim().is_empty() {
        return Err(ProcessorError::InvalidInput(format!("{field} is required")));
    }
    Ok(())
}
