//! Task execution, from a model-proposed invocation to a stored artifact.
//!
//! Every step short-circuits on failure and every failure is recovered into
//! an [`ExecutionResult`]; nothing here aborts the orchestration loop.

use std::collections::HashMap;
use std::sync::Arc;
use tata_core::artifact::Artifact;
use tata_core::document::TaskOutput;
use tata_core::error::TaskError;
use tata_core::input::{TaskArgs, TaskInput};
use tata_core::message::TaskInvocation;
use tata_core::processor::Processor;
use tata_core::task::{ArtifactKind, TaskKind};
use tata_tools::ToolRegistry;
use tata_workflow::DependencyGraph;
use tracing::debug;

use crate::session::SessionContext;

/// Text that marks a failed task result in the conversation.
pub const ERROR_PREFIX: &str = "Error: ";

/// Outcome of one invocation.
#[derive(Debug, Clone, PartialEq)]
pub struct ExecutionResult {
    pub success: bool,
    /// Serialized artifact on success
    pub payload: Option<String>,
    pub error: Option<TaskError>,
}

impl ExecutionResult {
    fn completed(payload: String) -> Self {
        Self {
            success: true,
            payload: Some(payload),
            error: None,
        }
    }

    fn failed(error: TaskError) -> Self {
        Self {
            success: false,
            payload: None,
            error: Some(error),
        }
    }

    /// Content of the task-result turn: the payload, or the error behind [`ERROR_PREFIX`].
    pub fn turn_content(&self) -> String {
        match (&self.payload, &self.error) {
            (_, Some(err)) => format!("{ERROR_PREFIX}{err}"),
            (Some(payload), None) => payload.clone(),
            (None, None) => "{}".to_string(),
        }
    }
}

/// Resolves, gates, decodes, runs and persists task invocations.
pub struct TaskExecutor {
    registry: Arc<ToolRegistry>,
    graph: Arc<DependencyGraph>,
    processor: Arc<dyn Processor>,
}

impl TaskExecutor {
    pub fn new(
        registry: Arc<ToolRegistry>,
        graph: Arc<DependencyGraph>,
        processor: Arc<dyn Processor>,
    ) -> Self {
        Self {
            registry,
            graph,
            processor,
        }
    }

    pub fn registry(&self) -> &ToolRegistry {
        &self.registry
    }

    pub fn graph(&self) -> &DependencyGraph {
        &self.graph
    }

    /// Execute one invocation on behalf of `session`.
    ///
    /// A stored Requirement Profile names the session's position, and a
    /// review run in a given language becomes the session's language.
    pub async fn execute(
        &self,
        session: &SessionContext,
        invocation: &TaskInvocation,
    ) -> ExecutionResult {
        match self.run(session, invocation).await {
            Ok(payload) => ExecutionResult::completed(payload),
            Err(err) => ExecutionResult::failed(err),
        }
    }

    async fn run(
        &self,
        session: &SessionContext,
        invocation: &TaskInvocation,
    ) -> Result<String, TaskError> {
        let name = invocation.name.as_str();

        let task = self
            .registry
            .resolve(name)
            .ok_or_else(|| TaskError::UnknownTask(name.to_string()))?;

        let check = self.graph.check(session.store(), session.id(), task).await?;
        if !check.proceed {
            return Err(TaskError::UnsatisfiedDependency(check.message));
        }

        let invalid = |reason: String| TaskError::InvalidArguments {
            task: name.to_string(),
            reason,
        };
        let value = invocation.parse_arguments().map_err(|e| invalid(e.0))?;
        let args = TaskArgs::decode(task, value).map_err(|e| invalid(e.to_string()))?;
        let language = args.language();

        let failed = |reason: String| TaskError::ProcessorFailed {
            task: name.to_string(),
            reason,
        };
        let inputs = self.load_inputs(session, task).await;
        let input = TaskInput::assemble(args, &inputs).map_err(|e| failed(e.to_string()))?;

        debug!(
            session = %session.id(),
            task = name,
            processor = self.processor.name(),
            "Running processor"
        );
        let output = self
            .processor
            .process(input)
            .await
            .map_err(|e| failed(e.to_string()))?;

        if output.kind() != task.artifact() {
            return Err(failed(format!(
                "produced {} instead of {}",
                output.kind(),
                task.artifact()
            )));
        }

        let position = match &output {
            TaskOutput::RequirementProfile(profile) => Some(profile.position_title.clone()),
            _ => None,
        };
        let artifact = Artifact::new(output);
        let payload = artifact.to_json().map_err(|e| failed(e.to_string()))?;
        session.store().store(session.id(), artifact).await?;
        session.record_task(task).await;
        if let Some(position) = position {
            session.set_position_name(position).await;
        }
        if let Some(language) = language {
            session.set_language(language).await;
        }

        Ok(payload)
    }

    /// Fetch every artifact the task consumes that the session has stored.
    async fn load_inputs(
        &self,
        session: &SessionContext,
        task: TaskKind,
    ) -> HashMap<ArtifactKind, Artifact> {
        let mut inputs = HashMap::new();
        for kind in task
            .input_artifacts()
            .iter()
            .chain(task.optional_input_artifacts())
        {
            if let Some(artifact) = session.store().retrieve(session.id(), *kind).await {
                inputs.insert(*kind, artifact);
            }
        }
        inputs
    }
}
