//! Recruitment funnel analysis.
//!
//! Stages with a zero or missing count are skipped. Attraction and selection
//! form one chain; sourcing runs in parallel and restarts its own chain.

use tata_core::document::{FunnelReport, FunnelStage};
use tata_core::error::ProcessorError;
use tata_core::input::FunnelReportArgs;

use super::require_non_empty;

const HIGH_SEVERITY_BELOW: f64 = 20.0;
const MEDIUM_SEVERITY_BELOW: f64 = 30.0;

pub fn generate(args: &FunnelReportArgs) -> Result<FunnelReport, ProcessorError> {
    require_non_empty(&args.job_title, "job_title")?;
    require_non_empty(&args.hiring_manager_name, "hiring_manager_name")?;
    if args.number_of_positions < 1 {
        return Err(ProcessorError::InvalidInput(
            "number_of_positions must be at least 1".into(),
        ));
    }

    let main_chain = [
        ("Job ad views", args.job_ad_views),
        ("Apply clicks", args.apply_clicks),
        ("Applications received", args.applications_received),
        ("Qualified applications", args.qualified_applications),
        ("TA screenings", args.ta_screenings),
        ("HM interviews", args.hm_interviews),
        ("Offers made", args.offers_made),
        ("Offers accepted", args.offers_accepted),
    ];
    let sourcing_chain = [
        ("Candidates sourced", args.candidates_sourced),
        ("Candidates contacted", args.candidates_contacted),
        ("Candidates replied", args.candidates_replied),
    ];

    let mut stages = build_chain(&main_chain);
    stages.extend(build_chain(&sourcing_chain));

    let mut flagged: Vec<(bool, String)> = stages
        .iter()
        .filter_map(|stage| {
            let rate = stage.conversion_from_previous?;
            let high = rate < HIGH_SEVERITY_BELOW;
            (rate < MEDIUM_SEVERITY_BELOW).then(|| {
                let severity = if high { "high" } else { "medium" };
                (
                    high,
                    format!(
                        "{}: {rate:.1}% conversion ({severity} severity). Suggested fix: {}",
                        stage.name,
                        suggested_fix(&stage.name)
                    ),
                )
            })
        })
        .collect();
    // High severity first, stable within a severity
    flagged.sort_by_key(|(high, _)| !high);

    Ok(FunnelReport {
        job_title: args.job_title.trim().to_string(),
        number_of_positions: args.number_of_positions,
        hiring_manager_name: args.hiring_manager_name.trim().to_string(),
        locations: args.locations.clone(),
        stages,
        bottlenecks: flagged.into_iter().map(|(_, text)| text).collect(),
    })
}

fn build_chain(chain: &[(&str, Option<u64>)]) -> Vec<FunnelStage> {
    let mut previous: Option<u64> = None;
    chain
        .iter()
        .filter_map(|(name, count)| {
            let count = count.filter(|c| *c > 0)?;
            let stage = FunnelStage {
                name: (*name).to_string(),
                count,
                conversion_from_previous: previous.map(|prev| conversion_rate(prev, count)),
            };
            previous = Some(count);
            Some(stage)
        })
        .collect()
}

/// Percentage of `from` that reached `to`, rounded to one decimal.
pub fn conversion_rate(from: u64, to: u64) -> f64 {
    if from == 0 {
        return 0.0;
    }
    (to as f64 / from as f64 * 1000.0).round() / 10.0
}

fn suggested_fix(stage: &str) -> &'static str {
    match stage {
        "Apply clicks" => "improve job ad content to increase apply intent (owner: recruiter)",
        "Applications received" => "simplify the application process (owner: TA operations)",
        "Qualified applications" => {
            "review the requirement profile for realistic qualifications (owner: hiring manager)"
        }
        "Candidates contacted" | "Candidates replied" => {
            "personalize outreach messages with candidate-specific details (owner: recruiter)"
        }
        "TA screenings" => "review screening criteria and candidate communication (owner: recruiter)",
        "HM interviews" => "align hiring manager availability and scheduling (owner: hiring manager)",
        "Offers made" | "Offers accepted" => {
            "review offer competitiveness and timing (owner: hiring manager)"
        }
        _ => "review job ad title and posting channels (owner: recruiter)",
    }
}
