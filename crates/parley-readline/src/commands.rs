//! REPL command parsing.

use std::path::PathBuf;

use parley_core::catalog::CatalogKind;
use parley_core::persona::NO_PERSONA_LABEL;

/// Slash commands with their argument synopsis, for completion and hints.
pub const COMMANDS: &[(&str, &str)] = &[
    ("/personas", ""),
    ("/use", "<name> | none"),
    ("/show", ""),
    ("/new", "<name>"),
    ("/edit", "[new-name]"),
    ("/delete", ""),
    ("/catalog", "<general|jailbreak> [filter]"),
    ("/import", "<general|jailbreak> <key>"),
    ("/model", "<id>"),
    ("/temperature", "<0.0-1.0>"),
    ("/max-tokens", "<32-2048>"),
    ("/history", ""),
    ("/export", "[path]"),
    ("/help", ""),
];

pub const HELP: &str = "\
Commands:
  <message>                         send a message
  //<message>                       send a message that starts with '/'
  /personas                         list stored personas
  /use <name> | /use none           activate a persona (or none)
  /show                             show the active persona and settings
  /new <name>                       add a new persona (name must be unused)
  /edit [new-name]                  edit the active persona, optionally renaming it
  /delete                           delete the active persona
  /catalog <general|jailbreak> [filter]
                                    browse a remote catalog
  /import <general|jailbreak> <key> save a catalog row as a persona
  /model <id>                       switch model
  /temperature <0.0-1.0>            set temperature
  /max-tokens <32-2048>             set maximum output tokens
  /history                          show the conversation, newest first
  /export [path]                    write the transcript (default chat_history.txt)
  /help                             show this help
  quit | exit                       leave";

#[derive(Debug, Clone, PartialEq)]
pub enum Command {
    Chat(String),
    Personas,
    Use(Option<String>),
    Show,
    New(String),
    Edit(Option<String>),
    Delete,
    Catalog { kind: CatalogKind, filter: String },
    Import { kind: CatalogKind, key: String },
    Model(String),
    Temperature(f32),
    MaxTokens(u32),
    History,
    Export(Option<PathBuf>),
    Help,
    Quit,
}

impl Command {
    /// Parses one input line. Errors are usage messages for the user.
    pub fn parse(line: &str) -> Result<Self, String> {
        let trimmed = line.trim();

        if trimmed == "quit" || trimmed == "exit" {
            return Ok(Command::Quit);
        }

        // "//" sends the rest as a message starting with a single "/".
        if trimmed.starts_with("//") {
            return Ok(Command::Chat(line.replacen('/', "", 1)));
        }

        let Some(rest) = trimmed.strip_prefix('/') else {
            return Ok(Command::Chat(line.to_string()));
        };

        let (name, args) = match rest.split_once(char::is_whitespace) {
            Some((name, args)) => (name, args.trim()),
            None => (rest, ""),
        };

        match name {
            "personas" => Ok(Command::Personas),
            "use" => match args {
                "" => Err("Usage: /use <name> | /use none".into()),
                none if none.eq_ignore_ascii_case(NO_PERSONA_LABEL) => Ok(Command::Use(None)),
                persona => Ok(Command::Use(Some(persona.to_string()))),
            },
            "show" => Ok(Command::Show),
            "new" => {
                if args.is_empty() {
                    Err("Usage: /new <name>".into())
                } else {
                    Ok(Command::New(args.to_string()))
                }
            }
            "edit" => Ok(Command::Edit((!args.is_empty()).then(|| args.to_string()))),
            "delete" => Ok(Command::Delete),
            "catalog" => {
                let (kind, filter) = split_first(args);
                let kind = parse_kind(kind, "Usage: /catalog <general|jailbreak> [filter]")?;
                Ok(Command::Catalog {
                    kind,
                    filter: filter.to_string(),
                })
            }
            "import" => {
                let (kind, key) = split_first(args);
                let usage = "Usage: /import <general|jailbreak> <key>";
                let kind = parse_kind(kind, usage)?;
                if key.is_empty() {
                    return Err(usage.into());
                }
                Ok(Command::Import {
                    kind,
                    key: key.to_string(),
                })
            }
            "model" => {
                if args.is_empty() {
                    Err("Usage: /model <id>".into())
                } else {
                    Ok(Command::Model(args.to_string()))
                }
            }
            "temperature" => args
                .parse::<f32>()
                .map(Command::Temperature)
                .map_err(|_| "Usage: /temperature <0.0-1.0>".to_string()),
            "max-tokens" => args
                .parse::<u32>()
                .map(Command::MaxTokens)
                .map_err(|_| "Usage: /max-tokens <32-2048>".to_string()),
            "history" => Ok(Command::History),
            "export" => Ok(Command::Export(
                (!args.is_empty()).then(|| PathBuf::from(args)),
            )),
            "help" => Ok(Command::Help),
            other => Err(format!("Unknown command '/{other}'. Type /help for a list.")),
        }
    }
}

fn split_first(args: &str) -> (&str, &str) {
    match args.split_once(char::is_whitespace) {
        Some((first, rest)) => (first, rest.trim()),
        None => (args, ""),
    }
}

fn parse_kind(value: &str, usage: &str) -> Result<CatalogKind, String> {
    if value.is_empty() {
        return Err(usage.to_string());
    }
    value.parse::<CatalogKind>().map_err(|e| e.to_string())
}
