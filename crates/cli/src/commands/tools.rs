//! `tata tools`: list the task catalog.

use tata_tools::ToolRegistry;

pub fn run(json: bool) -> Result<(), Box<dyn std::error::Error>> {
    let (_, registry) = super::catalog()?;
    if json {
        println!("{}", serde_json::to_string_pretty(&registry.schema())?);
    } else {
        print!("{}", render(&registry));
    }
    Ok(())
}

fn render(registry: &ToolRegistry) -> String {
    let mut out = format!("{} tasks available:\n\n", registry.len());
    for capability in registry.all() {
        out.push_str(&format!("  {}\n", capability.name));
        out.push_str(&format!("    {}\n", capability.description));
        let required: Vec<&str> = capability
            .parameters
            .iter()
            .filter(|p| p.required)
            .map(|p| p.name)
            .collect();
        if !required.is_empty() {
            out.push_str(&format!("    required: {}\n", required.join(", ")));
        }
        out.push('\n');
    }
    out
}
