//! `tata deps`: show the dependency table.

use tata_core::task::TaskKind;
use tata_workflow::DependencyGraph;

pub fn run() -> Result<(), Box<dyn std::error::Error>> {
    let (graph, _) = super::catalog()?;
    print!("{}", render(&graph));
    Ok(())
}

fn render(graph: &DependencyGraph) -> String {
    let width = TaskKind::ALL
        .iter()
        .map(|t| t.human_name().len())
        .max()
        .unwrap_or(0);

    let mut out = String::new();
    for task in TaskKind::ALL {
        let required = graph.required(task);
        let requires = if required.is_empty() {
            "(standalone)".to_string()
        } else {
            required
                .iter()
                .map(|t| t.human_name())
                .collect::<Vec<_>>()
                .join(", ")
        };
        out.push_str(&format!(
            "  {:<width$}  <- {requires}\n",
            task.human_name()
        ));
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn renders_one_line_per_task() {
        let graph = DependencyGraph::standard().unwrap();
        let out = render(&graph);
        assert_eq!(out.lines().count(), 10);
        let report = out.lines().find(|l| l.contains("Candidate Report")).unwrap();
        assert!(report.ends_with("<- Requirement Profile, TA Screening Template"));
        let invite = out.lines().find(|l| l.contains("Calendar Invite")).unwrap();
        assert!(invite.ends_with("(standalone)"));
    }
}
