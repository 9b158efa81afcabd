//! Job ad quality review and D&I compliance review.

use tata_core::document::{DiReview, FlaggedTerm, JobAdReview};
use tata_core::error::ProcessorError;
use tata_core::input::{DiReviewArgs, JobAdReviewArgs, SupportedLanguage};

use super::{hype, require_non_empty};

struct Section {
    name: &'static str,
    required: bool,
    keywords: &'static [&'static str],
}

const fn section(
    name: &'static str,
    required: bool,
    keywords: &'static [&'static str],
) -> Section {
    Section {
        name,
        required,
        keywords,
    }
}

const EN_SECTIONS: &[Section] = &[
    section("Role description", true, &["about the role", "the role", "what you'll do"]),
    section(
        "Responsibilities",
        true,
        &["responsibilities", "duties", "what you will", "key tasks"],
    ),
    section("Requirements", true, &["requirements", "qualifications", "must have", "you bring"]),
    section("Good to haves", false, &["nice to have", "good to have", "bonus"]),
    section("Team", false, &["team", "department", "about us"]),
    section("Benefits", false, &["benefits", "what we offer", "we offer", "perks"]),
    section("Call to action", false, &["apply", "join us", "ready to"]),
];

const SV_SECTIONS: &[Section] = &[
    section("Role description", true, &["om rollen", "rollen", "tjänsten"]),
    section("Responsibilities", true, &["ansvar", "arbetsuppgifter", "du kommer att"]),
    section("Requirements", true, &["krav", "kvalifikationer", "du har"]),
    section("Good to haves", false, &["meriterande", "önskvärt"]),
    section("Team", false, &["teamet", "avdelningen", "om oss"]),
    section("Benefits", false, &["förmåner", "vi erbjuder"]),
    section("Call to action", false, &["ansök", "sök tjänsten"]),
];

const DE_SECTIONS: &[Section] = &[
    section("Role description", true, &["die rolle", "position", "ihre aufgaben"]),
    section("Responsibilities", true, &["aufgaben", "tätigkeiten"]),
    section("Requirements", true, &["anforderungen", "ihr profil", "qualifikationen"]),
    section("Good to haves", false, &["wünschenswert", "von vorteil"]),
    section("Team", false, &["team", "abteilung", "über uns"]),
    section("Benefits", false, &["wir bieten", "vorteile", "benefits"]),
    section("Call to action", false, &["bewerben", "bewerbung"]),
];

fn sections_for(language: SupportedLanguage) -> &'static [Section] {
    match language {
        SupportedLanguage::Swedish => SV_SECTIONS,
        SupportedLanguage::German => DE_SECTIONS,
        // Danish and Norwegian ads are mostly written with English headings
        _ => EN_SECTIONS,
    }
}

const MIN_WORDS: usize = 150;
const MAX_WORDS: usize = 700;
const HYPE_PENALTY: i32 = 5;

pub fn review_job_ad(args: &JobAdReviewArgs) -> Result<JobAdReview, ProcessorError> {
    require_non_empty(&args.job_ad_text, "job_ad_text")?;
    let lower = args.job_ad_text.to_lowercase();
    let word_count = args.job_ad_text.split_whitespace().count();

    let mut score: i32 = 100;
    let mut sections_found = Vec::new();
    let mut sections_missing = Vec::new();
    let mut recommendations = Vec::new();

    for section in sections_for(args.language) {
        if section.keywords.iter().any(|k| lower.contains(k)) {
            sections_found.push(section.name.to_string());
        } else {
            sections_missing.push(section.name.to_string());
            if section.required {
                score -= 20;
                recommendations.push(format!("Add a {} section.", section.name.to_lowercase()));
            } else {
                score -= 5;
                recommendations.push(format!(
                    "Consider adding a {} section.",
                    section.name.to_lowercase()
                ));
            }
        }
    }

    if word_count < MIN_WORDS {
        score -= 10;
        recommendations.push(format!(
            "The ad is short ({word_count} words); aim for at least {MIN_WORDS}."
        ));
    } else if word_count > MAX_WORDS {
        score -= 10;
        recommendations.push(format!(
            "The ad is long ({word_count} words); consider trimming below {MAX_WORDS}."
        ));
    }

    let title = args
        .position_title
        .as_deref()
        .map(str::trim)
        .filter(|t| !t.is_empty());
    if let Some(title) = title {
        if !lower.contains(&title.to_lowercase()) {
            score -= 5;
            recommendations.push(format!("Mention the position title \"{title}\" in the ad."));
        }
    }

    for phrase in hype::find(&args.job_ad_text, args.language) {
        score -= HYPE_PENALTY;
        recommendations.push(format!(
            "Replace \"{phrase}\" with a concrete description of the role."
        ));
    }

    Ok(JobAdReview {
        overall_score: score.clamp(0, 100) as u8,
        word_count,
        sections_found,
        sections_missing,
        recommendations,
    })
}

struct BiasTerm {
    term: &'static str,
    category: &'static str,
    alternatives: &'static [&'static str],
}

const fn bias(
    term: &'static str,
    category: &'static str,
    alternatives: &'static [&'static str],
) -> BiasTerm {
    BiasTerm {
        term,
        category,
        alternatives,
    }
}

const EN_TERMS: &[BiasTerm] = &[
    bias("aggressive", "gender", &["driven", "ambitious", "proactive"]),
    bias("dominant", "gender", &["confident", "influential"]),
    bias("competitive", "gender", &["motivated", "goal-oriented"]),
    bias("ninja", "gender", &["expert", "specialist"]),
    bias("rockstar", "gender", &["high performer", "skilled professional"]),
    bias("guru", "gender", &["expert", "authority"]),
    bias("manpower", "gender", &["workforce", "staff"]),
    bias("salesman", "gender", &["salesperson", "sales representative"]),
    bias("young", "age", &["energetic", "motivated"]),
    bias("digital native", "age", &["digitally proficient", "tech-savvy"]),
    bias("recent graduate", "age", &["early career professional"]),
    bias("native speaker", "nationality", &["fluent in", "professional proficiency in"]),
    bias("able-bodied", "disability", &["able to perform the essential duties"]),
    bias("no family commitments", "family", &["flexible schedule"]),
];

const SV_TERMS: &[BiasTerm] = &[
    bias("aggressiv", "gender", &["driven", "ambitiös", "proaktiv"]),
    bias("dominant", "gender", &["självsäker", "ledande"]),
    bias("ninja", "gender", &["expert", "specialist"]),
    bias("rockstjärna", "gender", &["topptalang"]),
    bias("ung", "age", &["energisk", "motiverad"]),
];

const DA_NO_TERMS: &[BiasTerm] = &[
    bias("aggressiv", "gender", &["drevet", "proaktiv"]),
    bias("dominant", "gender", &["selvsikker", "ledende"]),
    bias("ninja", "gender", &["ekspert", "specialist"]),
    bias("ung", "age", &["energisk", "motiveret"]),
];

const DE_TERMS: &[BiasTerm] = &[
    bias("aggressiv", "gender", &["engagiert", "proaktiv"]),
    bias("dominant", "gender", &["selbstbewusst", "führend"]),
    bias("rockstar", "gender", &["Top-Talent", "Fachkraft"]),
    bias("jung", "age", &["engagiert", "motiviert"]),
];

fn terms_for(language: SupportedLanguage) -> &'static [BiasTerm] {
    match language {
        SupportedLanguage::English => EN_TERMS,
        SupportedLanguage::Swedish => SV_TERMS,
        SupportedLanguage::Danish | SupportedLanguage::Norwegian => DA_NO_TERMS,
        SupportedLanguage::German => DE_TERMS,
    }
}

/// High-severity categories cost more than the rest.
fn penalty(category: &str) -> i32 {
    match category {
        "gender" | "age" | "disability" => 15,
        _ => 10,
    }
}

pub fn review_di(args: &DiReviewArgs) -> Result<DiReview, ProcessorError> {
    require_non_empty(&args.job_ad_text, "job_ad_text")?;
    let words: Vec<String> = args
        .job_ad_text
        .split(|c: char| !c.is_alphanumeric() && c != '-')
        .filter(|w| !w.is_empty())
        .map(str::to_lowercase)
        .collect();
    let normalized = words.join(" ");

    let mut score: i32 = 100;
    let mut flagged_terms = Vec::new();
    for entry in terms_for(args.language) {
        // Whole words only, so "young" does not match "youngest"
        let hit = if entry.term.contains(' ') {
            format!(" {normalized} ").contains(&format!(" {} ", entry.term))
        } else {
            words.iter().any(|w| w == entry.term)
        };
        if hit {
            score -= penalty(entry.category);
            flagged_terms.push(FlaggedTerm {
                term: entry.term.to_string(),
                category: entry.category.to_string(),
                alternatives: entry.alternatives.iter().map(|a| a.to_string()).collect(),
            });
        }
    }

    let mut compliance_notes = Vec::new();
    if args.language == SupportedLanguage::German && !normalized.contains("m w d") {
        score -= 10;
        compliance_notes.push("German job titles should carry the (m/w/d) suffix.".to_string());
    }
    if flagged_terms.is_empty() && compliance_notes.is_empty() {
        compliance_notes.push("No exclusionary language found.".to_string());
    }

    Ok(DiReview {
        overall_score: score.clamp(0, 100) as u8,
        flagged_terms,
        compliance_notes,
    })
}
