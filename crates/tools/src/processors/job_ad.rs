//! Job ad generator, built on the requirement profile.
//!
//! Every field is passed through [`hype::scrub`] so recruiter notes never
//! carry superlatives into the published ad.

use tata_core::document::{JobAd, RequirementProfile};
use tata_core::input::JobAdArgs;

use super::hype::{self, scrub_all};
use super::split_items;

pub fn generate(args: &JobAdArgs, profile: &RequirementProfile) -> JobAd {
    let title = &profile.position_title;

    let mut responsibilities = profile.responsibilities.clone();
    if let Some(notes) = args.startup_notes.as_deref() {
        for item in split_items(notes) {
            if !responsibilities.contains(&item) {
                responsibilities.push(item);
            }
        }
    }

    let mut requirements = profile.must_have_skills.clone();
    requirements.extend(profile.soft_skills.iter().cloned());

    JobAd {
        headline: hype::scrub(&format!("{title} at GlobalConnect")),
        intro: hype::scrub(&format!(
            "We are looking for a {title} who wants to help build the infrastructure that keeps \
             the Nordics connected."
        )),
        responsibilities: scrub_all(&responsibilities),
        requirements: scrub_all(&requirements),
        good_to_haves: scrub_all(&profile.good_to_haves),
        company_context: args
            .company_context
            .as_deref()
            .map(str::trim)
            .filter(|c| !c.is_empty())
            .map(hype::scrub),
        ending: hype::scrub(&format!(
            "Does this sound like you? Apply for the {title} role today. We review applications \
             continuously."
        )),
    }
}
