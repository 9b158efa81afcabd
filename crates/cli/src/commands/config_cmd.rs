//! `tata config`: configuration management commands.

use tata_config::AppConfig;

pub fn validate() -> Result<(), Box<dyn std::error::Error>> {
    println!("Validating configuration...");

    let config = match AppConfig::load() {
        Ok(config) => config,
        Err(e) => {
            println!("   Config error: {e}");
            return Err(e.into());
        }
    };
    println!("   Config parsed successfully");

    if config.has_api_key() {
        println!("   API key configured");
    } else {
        println!("   Warning: no API key set (set TATA_API_KEY or OPENAI_API_KEY)");
    }

    println!();
    println!("   Endpoint:  {}", config.api_url);
    println!("   Model:     {}", config.model);
    println!("   Max turns: {}", config.conversation.max_turns);
    Ok(())
}

pub fn show() -> Result<(), Box<dyn std::error::Error>> {
    let config = AppConfig::load().map_err(|e| format!("Failed to load config: {e}"))?;
    println!("{}", render(config)?);
    Ok(())
}

pub fn path() {
    println!("{}", AppConfig::config_dir().join("config.toml").display());
}

/// TOML of the effective config with the API key masked.
fn render(mut config: AppConfig) -> Result<String, toml::ser::Error> {
    if config.api_key.is_some() {
        config.api_key = Some("[REDACTED]".into());
    }
    toml::to_string_pretty(&config)
}
