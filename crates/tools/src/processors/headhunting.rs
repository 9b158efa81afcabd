//! LinkedIn outreach messages.
//!
//! Text taken from the profile and company context is scrubbed of hype
//! phrases. The quoted personalization detail is the candidate's own words
//! and stays as written.

use tata_core::document::{HeadhuntingMessages, JobAd, RequirementProfile};
use tata_core::input::HeadhuntingArgs;

use super::hype;

/// LinkedIn connection notes are capped at 300 characters.
const SHORT_MESSAGE_LIMIT: usize = 300;

pub fn generate(
    args: &HeadhuntingArgs,
    profile: &RequirementProfile,
    job_ad: Option<&JobAd>,
) -> HeadhuntingMessages {
    let title = hype::scrub(&profile.position_title);
    let top_skills = hype::scrub(
        &profile
            .must_have_skills
            .iter()
            .take(2)
            .cloned()
            .collect::<Vec<_>>()
            .join(" and "),
    );

    let personalization_detail = args
        .candidate_profile
        .as_deref()
        .and_then(|p| p.lines().map(str::trim).find(|l| !l.is_empty()))
        .map(str::to_string);

    let opener = match &personalization_detail {
        Some(detail) => format!("Hi! I noticed \"{detail}\" on your profile."),
        None => "Hi!".to_string(),
    };

    let mut short_direct = format!(
        "{opener} We're hiring a {title} at GlobalConnect and your background in {top_skills} \
         stood out. Open to a quick chat?"
    );
    truncate_chars(&mut short_direct, SHORT_MESSAGE_LIMIT);

    let context = hype::scrub(
        args.company_context
            .as_deref()
            .or(job_ad.and_then(|ad| ad.company_context.as_deref()))
            .unwrap_or("GlobalConnect builds and runs the fibre networks the Nordics depend on."),
    );
    let value_proposition = format!(
        "{opener} {context} We're now looking for a {title} to {}. I think your experience would \
         make a real difference here.",
        profile
            .responsibilities
            .first()
            .map(|r| hype::scrub(&r.to_lowercase()))
            .unwrap_or_else(|| "grow with us".into())
    );

    let call_to_action = match job_ad {
        Some(ad) => format!(
            "{opener} We just opened \"{}\". Would you have 15 minutes this week to hear more?",
            hype::scrub(&ad.headline)
        ),
        None => format!(
            "{opener} Would you have 15 minutes this week to hear more about our {title} opening?"
        ),
    };

    HeadhuntingMessages {
        short_direct,
        value_proposition,
        call_to_action,
        personalization_detail,
    }
}

fn truncate_chars(text: &mut String, limit: usize) {
    if let Some((idx, _)) = text.char_indices().nth(limit) {
        text.truncate(idx);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn profile() -> RequirementProfile {
        RequirementProfile {
            position_title: "Platform Engineer".into(),
            must_have_skills: vec!["Terraform".into(), "AWS".into(), "Go".into()],
            responsibilities: vec!["Run the internal developer platform".into()],
            good_to_haves: vec![],
            soft_skills: vec![],
            hiring_manager_notes: None,
        }
    }

    #[test]
    fn short_message_respects_limit() {
        let args = HeadhuntingArgs {
            candidate_profile: Some("x".repeat(400)),
            company_context: None,
        };
        let messages = generate(&args, &profile(), None);
        assert!(messages.short_direct.chars().count() <= SHORT_MESSAGE_LIMIT);
    }

    #[test]
    fn uses_job_ad_headline_when_present() {
        let ad = JobAd {
            headline: "Platform Engineer at GlobalConnect".into(),
            intro: String::new(),
            responsibilities: vec![],
            requirements: vec![],
            good_to_haves: vec![],
            company_context: None,
            ending: String::new(),
        };
        let messages = generate(&HeadhuntingArgs::default(), &profile(), Some(&ad));
        assert!(messages.call_to_action.contains("Platform Engineer at GlobalConnect"));
        assert!(messages.short_direct.contains("Terraform and AWS"));
        assert!(messages.personalization_detail.is_none());
    }

    #[test]
    fn hype_is_scrubbed_but_candidate_quote_is_kept() {
        let mut profile = profile();
        profile.position_title = "Ninja Platform Engineer".into();
        profile.responsibilities = vec!["Leverage Terraform across teams".into()];
        let args = HeadhuntingArgs {
            candidate_profile: Some("Kubernetes ninja at Acme".into()),
            company_context: Some("A unique opportunity to join a world-class team.".into()),
        };

        let messages = generate(&args, &profile, None);
        assert!(messages.short_direct.contains("hiring a Expert Platform Engineer"));
        assert!(messages.short_direct.contains("\"Kubernetes ninja at Acme\""));
        assert!(messages.value_proposition.contains("A opportunity to join a excellent team."));
        assert!(messages.value_proposition.contains("to use terraform across teams"));
        assert_eq!(
            messages.personalization_detail.as_deref(),
            Some("Kubernetes ninja at Acme")
        );
    }
}
