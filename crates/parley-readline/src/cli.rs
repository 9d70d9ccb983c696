use std::path::PathBuf;

use clap::Parser;

#[derive(Parser, Debug)]
#[command(name = "parley")]
#[command(about = "Persona-driven chat client for LLM completion services", long_about = None)]
pub struct Cli {
    /// OpenAI API key (overrides the key stored in secret.json)
    #[arg(long, env = "OPENAI_API_KEY", hide_env_values = true)]
    pub api_key: Option<String>,

    /// Store the resolved API key in secret.json
    #[arg(long)]
    pub save_key: bool,

    /// Directory holding config.toml, secret.json and logs/
    #[arg(long)]
    pub config_dir: Option<PathBuf>,

    /// Directory holding persona files (overrides config.toml)
    #[arg(long)]
    pub personas_dir: Option<PathBuf>,

    /// Initial model
    #[arg(long)]
    pub model: Option<String>,

    /// Initial temperature (0.0 to 1.0)
    #[arg(long)]
    pub temperature: Option<f32>,

    /// Initial maximum output tokens (32 to 2048)
    #[arg(long)]
    pub max_tokens: Option<u32>,

    /// Persona to activate at startup
    #[arg(long)]
    pub persona: Option<String>,

    /// Skip fetching the remote catalogs
    #[arg(long)]
    pub no_catalogs: bool,

    /// Log level for the log file when RUST_LOG is unset
    #[arg(long, default_value = "info")]
    pub log_level: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let cli = Cli::try_parse_from(["parley"]).unwrap();
        assert!(!cli.save_key);
        assert!(!cli.no_catalogs);
        assert_eq!(cli.log_level, "info");
        assert!(cli.model.is_none());
    }

    #[test]
    fn test_overrides() {
        let cli = Cli::try_parse_from([
            "parley",
            "--model",
            "gpt-4o",
            "--temperature",
            "0.2",
            "--max-tokens",
            "1024",
            "--persona",
            "pirate",
            "--no-catalogs",
        ])
        .unwrap();
        assert_eq!(cli.model.as_deref(), Some("gpt-4o"));
        assert_eq!(cli.temperature, Some(0.2));
        assert_eq!(cli.max_tokens, Some(1024));
        assert_eq!(cli.persona.as_deref(), Some("pirate"));
        assert!(cli.no_catalogs);
    }
}
