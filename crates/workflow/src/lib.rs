//! Task dependency graph: which tasks must run before which.
//!
//! The prerequisite table is an explicit finite mapping from task kind to the
//! task kinds it requires. It is validated once at construction: the table
//! must be acyclic, and every artifact a task consumes must be produced by
//! one of its prerequisites. After that the graph is read-only and answers
//! per-session questions by probing an [`ArtifactStore`].

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use tata_core::artifact::ArtifactStore;
use tata_core::error::{GraphError, StoreError};
use tata_core::session::SessionId;
use tata_core::task::TaskKind;
use tracing::debug;

/// Outcome of a dependency check for one task in one session.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DependencyCheck {
    /// Whether the task may run now
    pub proceed: bool,

    /// Required tasks whose artifacts are absent, in table order
    pub missing: Vec<TaskKind>,

    /// Deterministic, human-readable explanation
    pub message: String,
}

/// The static prerequisite table.
#[derive(Debug, Clone)]
pub struct DependencyGraph {
    edges: BTreeMap<TaskKind, Vec<TaskKind>>,
}

impl DependencyGraph {
    /// The production table.
    pub fn standard() -> Result<Self, GraphError> {
        use TaskKind::*;
        Self::from_table([
            (RequirementProfile, vec![]),
            (JobAd, vec![RequirementProfile]),
            (TaScreening, vec![RequirementProfile]),
            (HmScreening, vec![RequirementProfile]),
            (Headhunting, vec![RequirementProfile]),
            (CandidateReport, vec![RequirementProfile, TaScreening]),
            (FunnelReport, vec![]),
            (JobAdReview, vec![]),
            (DiReview, vec![]),
            (CalendarInvite, vec![]),
        ])
    }

    /// Build a graph from an explicit table, validating it.
    ///
    /// Task kinds absent from the table are treated as standalone.
    pub fn from_table(
        table: impl IntoIterator<Item = (TaskKind, Vec<TaskKind>)>,
    ) -> Result<Self, GraphError> {
        let graph = Self {
            edges: table.into_iter().collect(),
        };
        graph.validate_acyclic()?;
        graph.validate_inputs()?;
        debug!(edges = graph.edge_count(), "Dependency graph validated");
        Ok(graph)
    }

    /// Prerequisites of `task`, in declaration order.
    pub fn required(&self, task: TaskKind) -> &[TaskKind] {
        self.edges.get(&task).map(Vec::as_slice).unwrap_or(&[])
    }

    pub fn is_standalone(&self, task: TaskKind) -> bool {
        self.required(task).is_empty()
    }

    pub fn edge_count(&self) -> usize {
        self.edges.values().map(Vec::len).sum()
    }

    /// Decide whether `task` may run in `session`.
    ///
    /// Fails only on an empty session id; absent artifacts are reported in
    /// the returned check, never as errors.
    pub async fn check(
        &self,
        store: &dyn ArtifactStore,
        session: &SessionId,
        task: TaskKind,
    ) -> Result<DependencyCheck, StoreError> {
        if session.is_empty() {
            return Err(StoreError::InvalidSession);
        }

        let required = self.required(task);
        if required.is_empty() {
            return Ok(DependencyCheck {
                proceed: true,
                missing: Vec::new(),
                message: format!("{task} has no dependencies and can proceed."),
            });
        }

        let mut missing = Vec::new();
        for prerequisite in required {
            if !store.has(session, prerequisite.artifact()).await? {
                missing.push(*prerequisite);
            }
        }

        if missing.is_empty() {
            return Ok(DependencyCheck {
                proceed: true,
                missing,
                message: format!("All dependencies for {task} are satisfied."),
            });
        }

        let message = format!(
            "Cannot execute {task}: requires {} to be created first.",
            join_names(&missing)
        );
        debug!(session = %session, task = %task, missing = missing.len(), "Dependencies missing");
        Ok(DependencyCheck {
            proceed: false,
            missing,
            message,
        })
    }

    /// Sentence appended to a capability description, naming prerequisites.
    pub fn requirement_clause(&self, task: TaskKind) -> String {
        let required = self.required(task);
        if required.is_empty() {
            " This is a standalone task with no dependencies.".to_string()
        } else {
            format!(" Requires {} to be created first.", join_names(required))
        }
    }

    fn validate_acyclic(&self) -> Result<(), GraphError> {
        #[derive(Clone, Copy, PartialEq)]
        enum Mark {
            Unvisited,
            InProgress,
            Done,
        }

        fn visit(
            graph: &DependencyGraph,
            task: TaskKind,
            marks: &mut BTreeMap<TaskKind, Mark>,
            path: &mut Vec<TaskKind>,
        ) -> Result<(), GraphError> {
            match marks.get(&task).copied().unwrap_or(Mark::Unvisited) {
                Mark::Done => return Ok(()),
                Mark::InProgress => {
                    // Report only the looping part of the path
                    let start = path.iter().position(|t| *t == task).unwrap_or(0);
                    let mut cycle = path[start..].to_vec();
                    cycle.push(task);
                    return Err(GraphError::Cycle(cycle));
                }
                Mark::Unvisited => {}
            }

            marks.insert(task, Mark::InProgress);
            path.push(task);
            for next in graph.required(task) {
                visit(graph, *next, marks, path)?;
            }
            path.pop();
            marks.insert(task, Mark::Done);
            Ok(())
        }

        let mut marks = BTreeMap::new();
        let mut path = Vec::new();
        for task in self.edges.keys() {
            visit(self, *task, &mut marks, &mut path)?;
        }
        Ok(())
    }

    fn validate_inputs(&self) -> Result<(), GraphError> {
        for task in TaskKind::ALL {
            for artifact in task.input_artifacts() {
                if !self.required(task).contains(&artifact.producer()) {
                    return Err(GraphError::UndeclaredInput {
                        task,
                        artifact: *artifact,
                    });
                }
            }
        }
        Ok(())
    }
}

/// "A", "A and B", "A, B and C".
fn join_names(tasks: &[TaskKind]) -> String {
    let names: Vec<&str> = tasks.iter().map(|t| t.human_name()).collect();
    match names.split_last() {
        None => String::new(),
        Some((last, [])) => (*last).to_string(),
        Some((last, rest)) => format!("{} and {last}", rest.join(", ")),
    }
}
