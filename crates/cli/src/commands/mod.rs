pub mod chat;
pub mod config_cmd;
pub mod deps;
pub mod init;
pub mod tools;

use std::sync::Arc;
use tata_tools::ToolRegistry;
use tata_workflow::DependencyGraph;

/// The validated dependency graph and the registry built on it.
pub fn catalog() -> Result<(Arc<DependencyGraph>, Arc<ToolRegistry>), Box<dyn std::error::Error>> {
    let graph = Arc::new(DependencyGraph::standard()?);
    let registry = Arc::new(ToolRegistry::new(&graph)?);
    Ok((graph, registry))
}
