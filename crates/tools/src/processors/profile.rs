//! Requirement profile generator.

use tata_core::document::RequirementProfile;
use tata_core::error::ProcessorError;
use tata_core::input::RequirementProfileArgs;

use super::{require_non_empty, split_items};

const GOOD_TO_HAVE_MARKERS: &[&str] = &[
    "nice to have",
    "good to have",
    "bonus",
    "plus",
    "preferred",
    "meriterande",
];
const RESPONSIBILITY_MARKERS: &[&str] = &[
    "responsib",
    "will ",
    "own ",
    "lead ",
    "build",
    "drive",
    "deliver",
    "maintain",
];
const SOFT_SKILL_MARKERS: &[&str] = &[
    "communicat",
    "collaborat",
    "team player",
    "curious",
    "proactive",
    "empath",
    "structured",
];

/// Most profiles fit this many must-haves before they stop being "must".
const MAX_MUST_HAVES: usize = 8;

pub fn generate(args: &RequirementProfileArgs) -> Result<RequirementProfile, ProcessorError> {
    require_non_empty(&args.startup_notes, "startup_notes")?;
    require_non_empty(&args.position_title, "position_title")?;

    let mut must_have_skills = Vec::new();
    let mut responsibilities = Vec::new();
    let mut good_to_haves = Vec::new();
    let mut soft_skills = Vec::new();

    for item in split_items(&args.startup_notes) {
        let lower = item.to_lowercase();
        let has = |markers: &[&str]| markers.iter().any(|m| lower.contains(m));
        if has(GOOD_TO_HAVE_MARKERS) {
            good_to_haves.push(item);
        } else if has(SOFT_SKILL_MARKERS) {
            soft_skills.push(item);
        } else if has(RESPONSIBILITY_MARKERS) {
            responsibilities.push(item);
        } else {
            must_have_skills.push(item);
        }
    }

    // Overflow must-haves are demoted rather than dropped
    if must_have_skills.len() > MAX_MUST_HAVES {
        good_to_haves.extend(must_have_skills.split_off(MAX_MUST_HAVES));
    }
    if responsibilities.is_empty() {
        responsibilities.push(format!(
            "Deliver the core outcomes expected of the {} role",
            args.position_title.trim()
        ));
    }

    Ok(RequirementProfile {
        position_title: args.position_title.trim().to_string(),
        must_have_skills,
        responsibilities,
        good_to_haves,
        soft_skills,
        hiring_manager_notes: args
            .hiring_manager_input
            .as_deref()
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .map(str::to_string),
    })
}
