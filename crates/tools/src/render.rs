//! Human-readable rendering of generated documents.
//!
//! Every [`TaskOutput`] is first laid out as a flat list of blocks, then
//! written as Markdown (for pasting into Word or Confluence) or as plain
//! text (for the terminal and e-mail). Bullets are never dashes.

use std::fmt;
use std::str::FromStr;

use tata_core::document::{
    CandidateReport, DiReview, FunnelReport, JobAd, JobAdReview, Recommendation,
    RequirementProfile, ScreeningAudience, ScreeningTemplate, TaskOutput,
};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum OutputFormat {
    #[default]
    Markdown,
    PlainText,
}

impl FromStr for OutputFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "markdown" | "md" => Ok(OutputFormat::Markdown),
            "text" | "plain" | "txt" => Ok(OutputFormat::PlainText),
            other => Err(format!("unknown format '{other}' (expected markdown or text)")),
        }
    }
}

impl fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            OutputFormat::Markdown => "markdown",
            OutputFormat::PlainText => "text",
        })
    }
}

/// Render a generated document in the requested format.
pub fn render(output: &TaskOutput, format: OutputFormat) -> String {
    let blocks = layout(output);
    match format {
        OutputFormat::Markdown => to_markdown(&blocks),
        OutputFormat::PlainText => to_plain_text(&blocks),
    }
}

#[derive(Debug)]
enum Block {
    Title(String),
    Heading(String),
    Text(String),
    Items(Vec<String>),
    Field(&'static str, String),
    Table {
        headers: &'static [&'static str],
        rows: Vec<Vec<String>>,
    },
}

fn heading(text: &str) -> Block {
    Block::Heading(text.to_string())
}

/// Heading plus bullet list, skipped when there is nothing to list.
fn section(blocks: &mut Vec<Block>, title: &str, items: &[String]) {
    if !items.is_empty() {
        blocks.push(heading(title));
        blocks.push(Block::Items(items.to_vec()));
    }
}

fn layout(output: &TaskOutput) -> Vec<Block> {
    match output {
        TaskOutput::RequirementProfile(profile) => profile_blocks(profile),
        TaskOutput::JobAd(ad) => job_ad_blocks(ad),
        TaskOutput::TaScreeningTemplate(template) | TaskOutput::HmScreeningTemplate(template) => {
            screening_blocks(template)
        }
        TaskOutput::HeadhuntingMessages(messages) => {
            let mut blocks = vec![
                Block::Title("Headhunting Messages".into()),
                heading("Short direct message"),
                Block::Text(messages.short_direct.clone()),
                heading("Value proposition"),
                Block::Text(messages.value_proposition.clone()),
                heading("Call to action"),
                Block::Text(messages.call_to_action.clone()),
            ];
            if let Some(detail) = &messages.personalization_detail {
                blocks.push(Block::Field("Personalized on", detail.clone()));
            }
            blocks
        }
        TaskOutput::CandidateReport(report) => candidate_report_blocks(report),
        TaskOutput::FunnelReport(report) => funnel_blocks(report),
        TaskOutput::JobAdReview(review) => job_ad_review_blocks(review),
        TaskOutput::DiReview(review) => di_review_blocks(review),
        TaskOutput::CalendarInvite(invite) => vec![
            Block::Title(invite.subject.clone()),
            Block::Text(invite.body.clone()),
        ],
    }
}

fn profile_blocks(profile: &RequirementProfile) -> Vec<Block> {
    let mut blocks = vec![Block::Title(format!(
        "Requirement Profile: {}",
        profile.position_title
    ))];
    section(&mut blocks, "Must-have skills", &profile.must_have_skills);
    section(&mut blocks, "Responsibilities", &profile.responsibilities);
    section(&mut blocks, "Good to haves", &profile.good_to_haves);
    section(&mut blocks, "Soft skills", &profile.soft_skills);
    if let Some(notes) = &profile.hiring_manager_notes {
        blocks.push(heading("Hiring manager notes"));
        blocks.push(Block::Text(notes.clone()));
    }
    blocks
}

fn job_ad_blocks(ad: &JobAd) -> Vec<Block> {
    let mut blocks = vec![Block::Title(ad.headline.clone()), Block::Text(ad.intro.clone())];
    section(&mut blocks, "What you will do", &ad.responsibilities);
    section(&mut blocks, "What you bring", &ad.requirements);
    section(&mut blocks, "Good to have", &ad.good_to_haves);
    if let Some(context) = &ad.company_context {
        blocks.push(heading("About us"));
        blocks.push(Block::Text(context.clone()));
    }
    blocks.push(Block::Text(ad.ending.clone()));
    blocks
}

fn screening_blocks(template: &ScreeningTemplate) -> Vec<Block> {
    let audience = match template.audience {
        ScreeningAudience::TalentAcquisition => "TA",
        ScreeningAudience::HiringManager => "HM",
    };
    let mut blocks = vec![Block::Title(format!(
        "{audience} Screening: {}",
        template.position_title
    ))];
    if let Some(intro) = &template.role_intro {
        blocks.push(Block::Text(intro.clone()));
    }
    section(&mut blocks, "Motivation", &template.motivation_questions);
    for question in &template.skill_questions {
        blocks.push(Block::Heading(question.skill.clone()));
        blocks.push(Block::Text(question.question.clone()));
        if !question.follow_ups.is_empty() {
            blocks.push(Block::Items(question.follow_ups.clone()));
        }
    }
    section(&mut blocks, "Practical", &template.practical_questions);
    if template.notes_space {
        blocks.push(heading("Notes"));
    }
    blocks
}

fn candidate_report_blocks(report: &CandidateReport) -> Vec<Block> {
    let recommendation = match report.recommendation {
        Recommendation::Proceed => "Proceed",
        Recommendation::Consider => "Consider",
        Recommendation::Reject => "Reject",
    };
    let rows = report
        .skill_assessments
        .iter()
        .map(|a| {
            vec![
                a.skill.clone(),
                format!("{}/5", a.rating),
                a.evidence.join("; "),
            ]
        })
        .collect();

    vec![
        // Initials only, the full name stays in the stored document
        Block::Title(format!("Candidate Report: {}", report.candidate_initials)),
        Block::Field("Position", report.position_name.clone()),
        Block::Field("Interview date", report.interview_date.to_string()),
        Block::Field("Recommendation", recommendation.to_string()),
        heading("Skill assessment"),
        Block::Table {
            headers: &["Skill", "Rating", "Evidence"],
            rows,
        },
        heading("Conclusion"),
        Block::Text(report.conclusion.clone()),
    ]
}

fn funnel_blocks(report: &FunnelReport) -> Vec<Block> {
    let rows = report
        .stages
        .iter()
        .map(|stage| {
            vec![
                stage.name.clone(),
                stage.count.to_string(),
                stage
                    .conversion_from_previous
                    .map_or_else(|| "-".to_string(), |rate| format!("{rate:.1}%")),
            ]
        })
        .collect();

    let mut blocks = vec![
        Block::Title(format!("Funnel Report: {}", report.job_title)),
        Block::Field("Positions", report.number_of_positions.to_string()),
        Block::Field("Hiring manager", report.hiring_manager_name.clone()),
    ];
    if !report.locations.is_empty() {
        blocks.push(Block::Field("Locations", report.locations.join(", ")));
    }
    blocks.push(heading("Stages"));
    blocks.push(Block::Table {
        headers: &["Stage", "Candidates", "Conversion"],
        rows,
    });
    blocks.push(heading("Bottlenecks"));
    if report.bottlenecks.is_empty() {
        blocks.push(Block::Text("None identified.".into()));
    } else {
        blocks.push(Block::Items(report.bottlenecks.clone()));
    }
    blocks
}

fn job_ad_review_blocks(review: &JobAdReview) -> Vec<Block> {
    let mut blocks = vec![
        Block::Title("Job Ad Review".into()),
        Block::Field("Score", format!("{}/100", review.overall_score)),
        Block::Field("Word count", review.word_count.to_string()),
    ];
    section(&mut blocks, "Sections found", &review.sections_found);
    section(&mut blocks, "Sections missing", &review.sections_missing);
    section(&mut blocks, "Recommendations", &review.recommendations);
    blocks
}

fn di_review_blocks(review: &DiReview) -> Vec<Block> {
    let mut blocks = vec![
        Block::Title("D&I Review".into()),
        Block::Field("Score", format!("{}/100", review.overall_score)),
    ];
    if !review.flagged_terms.is_empty() {
        blocks.push(heading("Flagged terms"));
        blocks.push(Block::Table {
            headers: &["Term", "Category", "Alternatives"],
            rows: review
                .flagged_terms
                .iter()
                .map(|t| vec![t.term.clone(), t.category.clone(), t.alternatives.join(", ")])
                .collect(),
        });
    }
    section(&mut blocks, "Compliance notes", &review.compliance_notes);
    blocks
}

fn to_markdown(blocks: &[Block]) -> String {
    let mut chunks = Vec::with_capacity(blocks.len());
    for block in blocks {
        let chunk = match block {
            Block::Title(text) => format!("# {text}"),
            Block::Heading(text) => format!("## {text}"),
            Block::Text(text) if text.trim().is_empty() => continue,
            Block::Text(text) => text.clone(),
            Block::Items(items) => bullets(items, "*"),
            Block::Field(label, value) => format!("**{label}:** {value}"),
            Block::Table { headers, rows } => {
                let mut lines = vec![
                    markdown_row(headers.iter().map(|h| h.to_string())),
                    markdown_row(headers.iter().map(|_| "---".to_string())),
                ];
                lines.extend(rows.iter().map(|row| markdown_row(row.iter().cloned())));
                lines.join("\n")
            }
        };
        chunks.push(chunk);
    }
    let mut out = chunks.join("\n\n");
    out.push('\n');
    out
}

fn markdown_row(cells: impl Iterator<Item = String>) -> String {
    let cells: Vec<String> = cells
        .map(|c| c.replace('|', "\\|").replace('\n', " "))
        .collect();
    format!("| {} |", cells.join(" | "))
}

fn to_plain_text(blocks: &[Block]) -> String {
    let mut out = String::new();
    let mut previous_was_field = false;
    for block in blocks {
        let chunk = match block {
            Block::Title(text) => underline(text, '='),
            Block::Heading(text) => underline(text, '-'),
            Block::Text(text) if text.trim().is_empty() => continue,
            Block::Text(text) => text.clone(),
            Block::Items(items) => bullets(items, "•"),
            Block::Field(label, value) => format!("{label}: {value}"),
            Block::Table { headers, rows } => plain_table(headers, rows),
        };
        let is_field = matches!(block, Block::Field(..));
        if !out.is_empty() {
            // Consecutive fields read as one block
            out.push_str(if is_field && previous_was_field { "\n" } else { "\n\n" });
        }
        out.push_str(&chunk);
        previous_was_field = is_field;
    }
    out.push('\n');
    out
}

fn underline(text: &str, ch: char) -> String {
    let rule: String = std::iter::repeat_n(ch, text.chars().count()).collect();
    format!("{text}\n{rule}")
}

fn bullets(items: &[String], marker: &str) -> String {
    items
        .iter()
        .map(|item| format!("{marker} {item}"))
        .collect::<Vec<_>>()
        .join("\n")
}

fn plain_table(headers: &[&str], rows: &[Vec<String>]) -> String {
    let widths: Vec<usize> = headers
        .iter()
        .enumerate()
        .map(|(i, header)| {
            rows.iter()
                .filter_map(|row| row.get(i))
                .map(|cell| cell.chars().count())
                .chain(std::iter::once(header.chars().count()))
                .max()
                .unwrap_or(0)
        })
        .collect();

    let line = |cells: Vec<&str>| {
        cells
            .iter()
            .zip(&widths)
            .map(|(cell, &width)| format!("{cell:<width$}"))
            .collect::<Vec<_>>()
            .join("  ")
            .trim_end()
            .to_string()
    };

    let mut lines = vec![line(headers.to_vec())];
    lines.push(
        widths
            .iter()
            .map(|&width| "=".repeat(width))
            .collect::<Vec<_>>()
            .join("  "),
    );
    for row in rows {
        lines.push(line(row.iter().map(String::as_str).collect()));
    }
    lines.join("\n")
}
