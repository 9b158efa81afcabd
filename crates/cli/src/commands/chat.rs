//! `tata chat`: interactive or single-message chat mode.

use std::io::Write;
use std::sync::Arc;
use tata_agent::{AgentLoop, SessionContext, SessionManager, TaskExecutor};
use tata_config::AppConfig;
use tata_core::artifact::ArtifactStore;
use tata_core::event::{DomainEvent, EventBus};
use tata_core::provider::Provider;
use tata_core::task::{ArtifactKind, TaskKind};
use tata_memory::InMemoryArtifactStore;
use tata_providers::OpenAiCompatProvider;
use tata_tools::{DocumentProcessor, OutputFormat};
use tata_workflow::DependencyGraph;
use tokio::io::{AsyncBufReadExt, BufReader};
use tokio::sync::broadcast;
use tracing::{debug, info};

const SHOW_USAGE: &str = "Usage: /show <document> [markdown|text], e.g. /show job_ad text";

pub async fn run(message: Option<String>) -> Result<(), Box<dyn std::error::Error>> {
    let config = AppConfig::load().map_err(|e| format!("Failed to load config: {e}"))?;

    // Fail early with setup instructions
    if !config.has_api_key() {
        eprintln!();
        eprintln!("  ERROR: No API key configured!");
        eprintln!();
        eprintln!("  Set one of these environment variables:");
        eprintln!("    TATA_API_KEY   = 'sk-...'");
        eprintln!("    OPENAI_API_KEY = 'sk-...'");
        eprintln!();
        eprintln!("  Or add it to your config file:");
        eprintln!("    {}", AppConfig::config_dir().join("config.toml").display());
        eprintln!();
        return Err("No API key found. See above for setup instructions.".into());
    }

    let provider: Arc<dyn Provider> = Arc::new(OpenAiCompatProvider::from_config(&config)?);
    let (graph, registry) = super::catalog()?;
    let menu = service_menu(&graph);
    let executor = Arc::new(TaskExecutor::new(registry, graph, Arc::new(DocumentProcessor)));
    let event_bus = Arc::new(EventBus::default());
    let store: Arc<dyn ArtifactStore> = Arc::new(InMemoryArtifactStore::new());
    let sessions = SessionManager::from_config(store, &config.conversation);
    let agent = AgentLoop::from_config(&config, provider, executor, Arc::clone(&event_bus));
    let session = sessions.create().await;
    info!(session = %session.id(), model = %config.model, "Chat started");

    if let Some(msg) = message {
        // Single message mode
        eprint!("  Thinking...");
        let response = agent.chat(&session, &msg).await;
        eprint!("\r              \r");
        println!("{response}");
        return Ok(());
    }

    // Interactive mode
    println!();
    println!("  Tata: Talent Acquisition Team Assistant");
    println!();
    println!("  Model:     {}", config.model);
    println!("  Session:   {}", session.id());
    println!();
    println!("  /artifacts lists what has been created, /show <document> prints one.");
    println!("  /reset clears the conversation. Type 'exit' or Ctrl+D to quit.");
    println!();
    print!("{menu}");
    println!();
    println!("  Hi! I'm Tata. What position are you recruiting for today?");
    println!();

    let mut events = event_bus.subscribe();
    tokio::spawn(async move {
        while let Some(line) = next_task_line(&mut events).await {
            eprintln!("{line}");
        }
    });

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    prompt()?;

    while let Some(line) = lines.next_line().await? {
        let input = line.trim();
        match input {
            "" => {}
            "exit" | "quit" => break,
            "/reset" => {
                agent.reset(&session).await;
                println!("  Conversation cleared. Created documents are kept.");
            }
            "/artifacts" => print_artifacts(&session).await,
            _ if input == "/show" || input.starts_with("/show ") => {
                match parse_show(&input["/show".len()..]) {
                    Ok((kind, format)) => show_artifact(&session, kind, format).await,
                    Err(message) => println!("  {message}"),
                }
            }
            _ => {
                eprint!("  ...");
                let response = agent.chat(&session, input).await;
                eprint!("\r     \r");
                println!();
                for line in response.lines() {
                    println!("  Tata > {line}");
                }
                println!();
            }
        }
        prompt()?;
    }

    println!();
    println!("  Goodbye!");
    println!();
    Ok(())
}

fn prompt() -> std::io::Result<()> {
    print!("  You > ");
    std::io::stdout().flush()
}

async fn print_artifacts(session: &SessionContext) {
    let mut kinds: Vec<_> = session.store().all(session.id()).await.into_keys().collect();
    if kinds.is_empty() {
        println!("  No documents created yet.");
        return;
    }
    kinds.sort();
    for kind in kinds {
        println!("  - {} ({kind})", kind.human_name());
    }
}

async fn show_artifact(session: &SessionContext, kind: ArtifactKind, format: OutputFormat) {
    match session.store().retrieve(session.id(), kind).await {
        Some(artifact) => {
            println!();
            print!("{}", tata_tools::render(&artifact.output, format));
            println!();
        }
        None => println!("  No {} has been created in this session yet.", kind.human_name()),
    }
}

/// Parse the arguments of `/show`: a document identifier and an optional format.
fn parse_show(args: &str) -> Result<(ArtifactKind, OutputFormat), String> {
    let mut parts = args.split_whitespace();
    let name = parts.next().ok_or(SHOW_USAGE)?;
    let kind = ArtifactKind::ALL
        .into_iter()
        .find(|k| k.as_str() == name)
        .ok_or_else(|| format!("Unknown document '{name}'. /artifacts lists the identifiers."))?;
    let format = parts
        .next()
        .map(str::parse::<OutputFormat>)
        .transpose()?
        .unwrap_or_default();
    if parts.next().is_some() {
        return Err(SHOW_USAGE.to_string());
    }
    Ok((kind, format))
}

/// The services Tata offers, with what each one needs first.
fn service_menu(graph: &DependencyGraph) -> String {
    let mut out = String::from("  I can help you with:\n");
    for task in TaskKind::ALL {
        let required = graph.required(task);
        if required.is_empty() {
            out.push_str(&format!("    • {}\n", task.human_name()));
        } else {
            let names: Vec<_> = required.iter().map(|t| t.human_name()).collect();
            out.push_str(&format!(
                "    • {} (after {})\n",
                task.human_name(),
                names.join(", ")
            ));
        }
    }
    out
}

/// Wait for the next task outcome worth printing.
///
/// A slow terminal can fall behind the bus; skipped events are dropped and
/// listening continues. Returns `None` once the bus is gone.
async fn next_task_line(events: &mut broadcast::Receiver<Arc<DomainEvent>>) -> Option<String> {
    loop {
        match events.recv().await {
            Ok(event) => {
                if let DomainEvent::TaskExecuted {
                    task_name, success, ..
                } = event.as_ref()
                {
                    let mark = if *success { "done" } else { "failed" };
                    return Some(format!("  [{task_name}: {mark}]"));
                }
            }
            Err(broadcast::error::RecvError::Lagged(skipped)) => {
                debug!(skipped, "Event listener fell behind");
            }
            Err(broadcast::error::RecvError::Closed) => return None,
        }
    }
}
