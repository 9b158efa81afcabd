//! Tool registry: the capability catalog published to the LLM.
//!
//! The registry is built once from the fixed task catalog and is read-only
//! afterwards. Each capability's description gets a dependency clause
//! appended at registration time, and each parameter schema is derived
//! from its [`ParameterSpec`] list and validated before it is accepted.

use serde_json::{Map, Value, json};
use tata_core::input::SupportedLanguage;
use tata_core::provider::ToolDefinition;
use tata_core::task::TaskKind;
use tata_workflow::DependencyGraph;
use tracing::debug;

use crate::schema::{SchemaError, validate_parameter_schema};

/// JSON type of a parameter.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ParamType {
    String,
    Integer,
    Number,
    Boolean,
    Array,
    Object,
}

impl ParamType {
    pub fn as_str(self) -> &'static str {
        match self {
            ParamType::String => "string",
            ParamType::Integer => "integer",
            ParamType::Number => "number",
            ParamType::Boolean => "boolean",
            ParamType::Array => "array",
            ParamType::Object => "object",
        }
    }
}

/// One declared parameter of a capability.
#[derive(Debug, Clone, PartialEq)]
pub struct ParameterSpec {
    pub name: &'static str,
    pub param_type: ParamType,
    pub description: &'static str,
    pub required: bool,
    pub enum_values: &'static [&'static str],
    /// Element type, for arrays
    pub items: Option<ParamType>,
}

impl ParameterSpec {
    fn new(name: &'static str, param_type: ParamType, description: &'static str) -> Self {
        Self {
            name,
            param_type,
            description,
            required: false,
            enum_values: &[],
            items: None,
        }
    }

    pub fn string(name: &'static str, description: &'static str) -> Self {
        Self::new(name, ParamType::String, description)
    }

    pub fn integer(name: &'static str, description: &'static str) -> Self {
        Self::new(name, ParamType::Integer, description)
    }

    pub fn boolean(name: &'static str, description: &'static str) -> Self {
        Self::new(name, ParamType::Boolean, description)
    }

    pub fn string_list(name: &'static str, description: &'static str) -> Self {
        Self {
            items: Some(ParamType::String),
            ..Self::new(name, ParamType::Array, description)
        }
    }

    pub fn required(mut self) -> Self {
        self.required = true;
        self
    }

    pub fn one_of(mut self, values: &'static [&'static str]) -> Self {
        self.enum_values = values;
        self
    }

    fn to_schema(&self) -> Value {
        let mut spec = Map::new();
        spec.insert("type".into(), json!(self.param_type.as_str()));
        spec.insert("description".into(), json!(self.description));
        if !self.enum_values.is_empty() {
            spec.insert("enum".into(), json!(self.enum_values));
        }
        if let Some(items) = self.items {
            spec.insert("items".into(), json!({ "type": items.as_str() }));
        }
        Value::Object(spec)
    }
}

/// A registered capability: one task kind as the model sees it.
#[derive(Debug, Clone, PartialEq)]
pub struct CapabilityDescriptor {
    pub task: TaskKind,
    pub name: &'static str,
    /// Base description plus the dependency clause
    pub description: String,
    pub parameters: Vec<ParameterSpec>,
}

impl CapabilityDescriptor {
    /// JSON Schema object derived from the parameter list.
    pub fn parameters_schema(&self) -> Value {
        let properties: Map<String, Value> = self
            .parameters
            .iter()
            .map(|p| (p.name.to_string(), p.to_schema()))
            .collect();
        let required: Vec<&str> = self
            .parameters
            .iter()
            .filter(|p| p.required)
            .map(|p| p.name)
            .collect();
        json!({
            "type": "object",
            "properties": properties,
            "required": required,
        })
    }

    pub fn to_definition(&self) -> ToolDefinition {
        ToolDefinition {
            name: self.name.to_string(),
            description: self.description.clone(),
            parameters: self.parameters_schema(),
        }
    }
}

/// Read-only catalog of every capability, in task catalog order.
#[derive(Debug, Clone)]
pub struct ToolRegistry {
    capabilities: Vec<CapabilityDescriptor>,
}

impl ToolRegistry {
    /// Register all ten capabilities, rejecting any malformed schema.
    pub fn new(graph: &DependencyGraph) -> Result<Self, SchemaError> {
        let mut capabilities = Vec::with_capacity(TaskKind::ALL.len());
        for task in TaskKind::ALL {
            let descriptor = CapabilityDescriptor {
                task,
                name: task.tool_name(),
                description: format!(
                    "{}{}",
                    base_description(task),
                    graph.requirement_clause(task)
                ),
                parameters: parameters(task),
            };
            validate_parameter_schema(&descriptor.parameters_schema())?;
            capabilities.push(descriptor);
        }
        debug!(count = capabilities.len(), "Tool registry built");
        Ok(Self { capabilities })
    }

    pub fn describe(&self, name: &str) -> Option<&CapabilityDescriptor> {
        self.capabilities.iter().find(|c| c.name == name)
    }

    /// Resolve a tool name to its task kind.
    pub fn resolve(&self, name: &str) -> Option<TaskKind> {
        self.describe(name).map(|c| c.task)
    }

    pub fn all(&self) -> &[CapabilityDescriptor] {
        &self.capabilities
    }

    /// Tool definitions for the LLM endpoint.
    pub fn schema(&self) -> Vec<ToolDefinition> {
        self.capabilities.iter().map(CapabilityDescriptor::to_definition).collect()
    }

    pub fn len(&self) -> usize {
        self.capabilities.len()
    }

    pub fn is_empty(&self) -> bool {
        self.capabilities.is_empty()
    }
}

fn base_description(task: TaskKind) -> &'static str {
    match task {
        TaskKind::RequirementProfile => {
            "Create a requirement profile for a job position. The requirement profile is the \
             foundational document containing must-have skills, responsibilities, and role \
             details. It serves as the backbone for all other outputs."
        }
        TaskKind::JobAd => {
            "Create a job advertisement based on the requirement profile. Generates a structured \
             job ad with headline, intro, responsibilities, requirements, and a closing call to \
             action."
        }
        TaskKind::TaScreening => {
            "Create a Talent Acquisition screening interview template with motivation, skill \
             assessment, and practical questions based on the requirement profile."
        }
        TaskKind::HmScreening => {
            "Create a Hiring Manager screening interview template. Similar to TA screening but \
             leaves space for notes after every question."
        }
        TaskKind::Headhunting => {
            "Create LinkedIn outreach messages for passive candidates in three versions: short and \
             direct, value proposition, and call to action."
        }
        TaskKind::CandidateReport => {
            "Create a candidate assessment report from an interview transcript, with skill ratings \
             (1-5) and a recommendation."
        }
        TaskKind::FunnelReport => {
            "Create a recruitment funnel analysis report. Calculates conversion rates between \
             stages and flags bottlenecks with suggested fixes."
        }
        TaskKind::JobAdReview => {
            "Review an existing job ad for structure and completeness. Provides a score, the \
             sections found and missing, and improvement recommendations."
        }
        TaskKind::DiReview => {
            "Review a job ad for Diversity & Inclusion compliance. Flags biased or exclusionary \
             wording and suggests inclusive alternatives."
        }
        TaskKind::CalendarInvite => {
            "Create interview invitation text for candidates, with the correct office address, \
             booking instructions, and participant details."
        }
    }
}

const INTERVIEW_TYPES: &[&str] = &["hiring_manager", "case", "team", "ta_screening"];

fn screening_parameters() -> Vec<ParameterSpec> {
    vec![
        ParameterSpec::boolean(
            "include_good_to_haves",
            "Whether to include good-to-have skill questions (default: false)",
        ),
        ParameterSpec::boolean(
            "include_role_intro",
            "Whether to include a role introduction section (default: false)",
        ),
        ParameterSpec::string_list(
            "additional_areas",
            "Additional areas to cover beyond the profile (optional)",
        ),
    ]
}

fn parameters(task: TaskKind) -> Vec<ParameterSpec> {
    match task {
        TaskKind::RequirementProfile => vec![
            ParameterSpec::string(
                "startup_notes",
                "Notes from the recruitment start-up meeting containing role requirements, skills needed, and context",
            )
            .required(),
            ParameterSpec::string(
                "position_title",
                "The job position title (e.g., 'Senior Python Developer')",
            )
            .required(),
            ParameterSpec::string(
                "old_job_ad",
                "Previous job advertisement for the role (optional, for reference)",
            ),
            ParameterSpec::string(
                "hiring_manager_input",
                "Direct input or notes from the hiring manager (optional)",
            ),
        ],
        TaskKind::JobAd => vec![
            ParameterSpec::string(
                "startup_notes",
                "Additional notes from recruitment start-up meeting (optional)",
            ),
            ParameterSpec::string(
                "old_job_ad",
                "Previous job advertisement for reference (optional)",
            ),
            ParameterSpec::string(
                "company_context",
                "Additional company or team context (optional)",
            ),
        ],
        TaskKind::TaScreening | TaskKind::HmScreening => screening_parameters(),
        TaskKind::Headhunting => vec![
            ParameterSpec::string(
                "candidate_profile",
                "LinkedIn profile text for personalization (optional)",
            ),
            ParameterSpec::string(
                "company_context",
                "Additional company or team context (optional)",
            ),
        ],
        TaskKind::CandidateReport => vec![
            ParameterSpec::string("transcript", "Microsoft Teams interview transcript text")
                .required(),
            ParameterSpec::string("candidate_name", "Full name of the candidate").required(),
            ParameterSpec::string(
                "interview_date",
                "Date of the interview (ISO format: YYYY-MM-DD)",
            )
            .required(),
            ParameterSpec::string("candidate_cv", "Candidate's CV text for enrichment (optional)"),
        ],
        TaskKind::FunnelReport => vec![
            ParameterSpec::string("job_title", "Title of the position").required(),
            ParameterSpec::integer("number_of_positions", "Number of positions to fill").required(),
            ParameterSpec::string("hiring_manager_name", "Name of the hiring manager").required(),
            ParameterSpec::string_list("locations", "List of job locations (optional)"),
            ParameterSpec::integer("job_ad_views", "Number of job ad views (optional)"),
            ParameterSpec::integer("apply_clicks", "Number of apply button clicks (optional)"),
            ParameterSpec::integer(
                "applications_received",
                "Total applications received (optional)",
            ),
            ParameterSpec::integer(
                "qualified_applications",
                "Applications meeting minimum criteria (optional)",
            ),
            ParameterSpec::integer(
                "candidates_sourced",
                "Candidates found through sourcing (optional)",
            ),
            ParameterSpec::integer(
                "candidates_contacted",
                "Candidates contacted via outreach (optional)",
            ),
            ParameterSpec::integer(
                "candidates_replied",
                "Candidates who replied to outreach (optional)",
            ),
            ParameterSpec::integer("ta_screenings", "Number of TA screening interviews (optional)"),
            ParameterSpec::integer(
                "hm_interviews",
                "Number of hiring manager interviews (optional)",
            ),
            ParameterSpec::integer("offers_made", "Number of offers extended (optional)"),
            ParameterSpec::integer("offers_accepted", "Number of offers accepted (optional)"),
        ],
        TaskKind::JobAdReview => vec![
            ParameterSpec::string("job_ad_text", "The job ad text to review").required(),
            ParameterSpec::string("language", "Language of the job ad (default: en)")
                .one_of(&SupportedLanguage::CODES),
            ParameterSpec::string("position_title", "Position title for context (optional)"),
        ],
        TaskKind::DiReview => vec![
            ParameterSpec::string("job_ad_text", "The job ad text to review for D&I compliance")
                .required(),
            ParameterSpec::string("language", "Language of the job ad (default: en)")
                .one_of(&SupportedLanguage::CODES),
        ],
        TaskKind::CalendarInvite => vec![
            ParameterSpec::string("position_name", "Name of the position being interviewed for")
                .required(),
            ParameterSpec::string("hiring_manager_name", "Name of the hiring manager").required(),
            ParameterSpec::string("hiring_manager_title", "Job title of the hiring manager")
                .required(),
            ParameterSpec::string("recruiter_name", "Name of the recruiter sending the invite")
                .required(),
            ParameterSpec::string("location_type", "Whether interview is on Teams or on-site")
                .one_of(&["teams", "onsite"])
                .required(),
            ParameterSpec::string("interview_type", "Type of interview")
                .one_of(INTERVIEW_TYPES)
                .required(),
            ParameterSpec::integer("duration", "Duration in minutes (typically 60 or 90)")
                .required(),
            ParameterSpec::string("booking_method", "Jobylon booking link or manual date/time")
                .one_of(&["jobylon", "manual"])
                .required(),
            ParameterSpec::string("city", "Office city (required for on-site interviews)")
                .one_of(&["stockholm", "copenhagen", "oslo"]),
            ParameterSpec::string(
                "interview_date",
                "Human-readable date for manual booking (e.g., 'Monday, 15 January')",
            ),
            ParameterSpec::string(
                "interview_time",
                "Time in 24h format for manual booking (e.g., '14:00')",
            ),
            ParameterSpec::string("job_ad_link", "Link to the job advertisement (optional)"),
        ],
    }
}
