mod cli;
mod commands;
mod credentials;
mod display;
mod helper;
mod logging;
mod repl;

use std::path::PathBuf;
use std::sync::Arc;

use anyhow::{Context, Result};
use clap::Parser;
use colored::Colorize;
use rustyline::Editor;
use rustyline::history::DefaultHistory;

use parley_application::{ChatUseCase, PersonaService};
use parley_core::catalog::{Catalog, CatalogKind, fetch_catalog};
use parley_core::config::{AppConfig, SecretConfig};
use parley_core::session::{ConversationSession, SessionParameters};
use parley_infrastructure::storage::{ConfigStorage, SecretStorage, SecretStorageError};
use parley_infrastructure::{DirPersonaRepository, HttpCatalogFetcher, ParleyPaths};
use parley_interaction::OpenAIGateway;

use crate::cli::Cli;
use crate::credentials::{KeySource, resolve_api_key};
use crate::helper::CliHelper;
use crate::repl::Repl;

/// Session parameters at startup: config.toml defaults, then the model from
/// secret.json when it is supported, then command-line overrides.
fn initial_parameters(
    config: &AppConfig,
    secret: Option<&SecretConfig>,
    cli: &Cli,
) -> parley_core::Result<SessionParameters> {
    let mut parameters = config.defaults.to_parameters()?;

    if let Some(model) = secret
        .and_then(|s| s.openai.as_ref())
        .and_then(|openai| openai.model_name.as_deref())
        && let Err(e) = parameters.set_model(model)
    {
        tracing::warn!("[Startup] Ignoring model from secret.json: {}", e);
    }

    if let Some(model) = &cli.model {
        parameters.set_model(model)?;
    }
    if let Some(temperature) = cli.temperature {
        parameters.set_temperature(temperature)?;
    }
    if let Some(max_tokens) = cli.max_tokens {
        parameters.set_max_output_tokens(max_tokens)?;
    }
    Ok(parameters)
}

async fn load_catalogs(config: &AppConfig, skip: bool) -> Vec<Catalog> {
    if skip {
        return CatalogKind::ALL.iter().map(|&kind| Catalog::placeholder(kind)).collect();
    }

    let fetcher = HttpCatalogFetcher::new();
    let general = config.catalogs.source(CatalogKind::General);
    let jailbreak = config.catalogs.source(CatalogKind::Jailbreak);
    let (general, jailbreak) = tokio::join!(
        fetch_catalog(&fetcher, &general),
        fetch_catalog(&fetcher, &jailbreak)
    );

    for catalog in [&general, &jailbreak] {
        if catalog.is_degraded() {
            println!(
                "{}",
                format!("The {} catalog could not be loaded.", catalog.kind()).yellow()
            );
        }
    }
    vec![general, jailbreak]
}

/// Entry point for the parley chat REPL.
///
/// Startup order: paths and logging, config.toml, API key, session
/// parameters, persona store, catalogs, then the loop.
#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // ===== Paths & Logging =====
    let paths = ParleyPaths::new(cli.config_dir.as_deref());
    let _log_guard = logging::init(paths.logs_dir().ok().as_deref(), &cli.log_level);
    tracing::info!("[Startup] parley {}", env!("CARGO_PKG_VERSION"));

    // ===== Configuration =====
    let config_storage = ConfigStorage::new(&paths).context("Failed to locate config.toml")?;
    let config = config_storage
        .load()
        .with_context(|| format!("Failed to load {}", config_storage.path().display()))?;

    let secret_storage = SecretStorage::new(&paths).ok();
    let secret = match secret_storage.as_ref().map(SecretStorage::load) {
        Some(Ok(secret)) => Some(secret),
        Some(Err(SecretStorageError::NotFound(_))) | None => None,
        Some(Err(e)) => {
            tracing::warn!("[Startup] Could not read secret.json: {}", e);
            eprintln!("{}", format!("Warning: {}", e).yellow());
            None
        }
    };

    // ===== Credential =====
    let mut editor: Editor<CliHelper, DefaultHistory> = Editor::new()?;
    let resolved = resolve_api_key(cli.api_key.as_deref(), secret.as_ref(), || {
        editor.readline("OpenAI API key: ").ok()
    });
    let (api_key, key_source) = match resolved {
        Ok(resolved) => resolved,
        Err(e) => {
            tracing::error!("[Startup] {}", e);
            return Err(e.into());
        }
    };
    tracing::info!("[Startup] API key resolved from {:?}", key_source);

    if cli.save_key && key_source != KeySource::SecretFile {
        match &secret_storage {
            Some(storage) => match storage.save_openai_key(&api_key) {
                Ok(()) => println!(
                    "{}",
                    format!("API key saved to {}", storage.path().display()).bright_black()
                ),
                Err(e) => eprintln!("{}", format!("Could not save API key: {}", e).red()),
            },
            None => eprintln!("{}", "Could not determine config directory".red()),
        }
    }

    // ===== Session =====
    let parameters = initial_parameters(&config, secret.as_ref(), &cli)?;
    let session = ConversationSession::new(config.base_instruction.clone(), parameters);
    let gateway = Arc::new(OpenAIGateway::new(api_key));
    let mut chat = ChatUseCase::new(session, gateway);

    let personas_dir = cli
        .personas_dir
        .clone()
        .unwrap_or_else(|| PathBuf::from(&config.personas_dir));
    let persona_repository = DirPersonaRepository::new(personas_dir);
    tracing::info!(
        "[Startup] Personas directory: {}",
        persona_repository.dir().display()
    );
    let personas = PersonaService::new(Arc::new(persona_repository));

    if let Some(name) = &cli.persona {
        match personas.get(name).await {
            Ok(persona) => chat.set_active_persona(Some(persona)),
            Err(e) => eprintln!("{}", format!("Error: {}", e).red()),
        }
    }

    let catalogs = load_catalogs(&config, cli.no_catalogs).await;

    // ===== REPL =====
    editor.set_helper(Some(CliHelper::new()));

    println!("{}", "=== Parley ===".bright_magenta().bold());
    println!(
        "{}",
        format!(
            "Model: {} | Persona: {}",
            chat.session().parameters().model(),
            chat.session().persona_label()
        )
        .bright_black()
    );
    println!(
        "{}",
        "Type a message, '/help' for commands, or 'quit' to exit.".bright_black()
    );
    println!();

    let mut repl = Repl::new(editor, chat, personas, catalogs);
    repl.run().await;

    tracing::info!(
        "[Startup] Session ended after {} exchanges",
        repl.chat().session().transcript().exchanges().len()
    );
    Ok(())
}
