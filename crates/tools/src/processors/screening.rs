//! Screening interview templates for TA and hiring managers.

use tata_core::document::{RequirementProfile, ScreeningAudience, ScreeningTemplate, SkillQuestion};
use tata_core::input::ScreeningArgs;

pub fn generate(
    args: &ScreeningArgs,
    profile: &RequirementProfile,
    audience: ScreeningAudience,
) -> ScreeningTemplate {
    let title = &profile.position_title;

    let mut skills: Vec<&String> = profile.must_have_skills.iter().collect();
    if args.include_good_to_haves {
        skills.extend(profile.good_to_haves.iter());
    }
    skills.extend(args.additional_areas.iter());

    let skill_questions = skills
        .into_iter()
        .map(|skill| SkillQuestion {
            skill: skill.clone(),
            question: format!("Tell me about a time you relied on {skill} in your work."),
            follow_ups: vec![
                "What was your specific contribution?".into(),
                "What would you do differently today?".into(),
            ],
        })
        .collect();

    ScreeningTemplate {
        position_title: title.clone(),
        audience,
        role_intro: args.include_role_intro.then(|| {
            format!(
                "Before we start, a short introduction to the {title} role: {}.",
                profile.responsibilities.join("; ")
            )
        }),
        motivation_questions: vec![
            format!("What made you interested in the {title} position?"),
            "What are you looking for in your next role?".into(),
        ],
        skill_questions,
        practical_questions: vec![
            "What is your notice period?".into(),
            "What are your salary expectations?".into(),
            "Do you have any questions for us?".into(),
        ],
        notes_space: audience == ScreeningAudience::HiringManager,
    }
}
