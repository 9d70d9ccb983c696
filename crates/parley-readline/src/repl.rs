//! The interactive control loop.
//!
//! One input line is read, parsed and handled to completion before the next
//! one is read. Errors are printed inline; only reading input can end the loop.

use std::collections::HashMap;
use std::path::PathBuf;

use colored::Colorize;
use rustyline::error::ReadlineError;
use rustyline::history::History;
use rustyline::{Editor, Helper};

use parley_application::{ChatUseCase, PersonaService};
use parley_core::catalog::{Catalog, CatalogKind};
use parley_core::error::{ParleyError, Result};
use parley_core::persona::{CreatePersonaRequest, UpdatePersonaRequest};
use parley_core::transcript::EXPORT_FILE_NAME;

use crate::commands::{Command, HELP};
use crate::display;

/// Line that ends a multi-line persona body.
pub const BODY_TERMINATOR: &str = ".";

/// Longest catalog text shown in a listing.
const PREVIEW_CHARS: usize = 60;

/// One read from the terminal.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Input {
    Line(String),
    Interrupted,
    Eof,
}

/// Where input lines come from.
pub trait LineSource {
    fn read_line(&mut self, prompt: &str) -> Input;

    /// Called for every line the main loop accepts.
    fn remember(&mut self, _line: &str) {}
}

impl<H: Helper, I: History> LineSource for Editor<H, I> {
    fn read_line(&mut self, prompt: &str) -> Input {
        match self.readline(prompt) {
            Ok(line) => Input::Line(line),
            Err(ReadlineError::Interrupted) => Input::Interrupted,
            Err(ReadlineError::Eof) => Input::Eof,
            Err(e) => {
                tracing::error!("[Repl] Readline failed: {}", e);
                Input::Eof
            }
        }
    }

    fn remember(&mut self, line: &str) {
        let _ = self.add_history_entry(line);
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Flow {
    Continue,
    Quit,
}

pub struct Repl<S: LineSource> {
    input: S,
    chat: ChatUseCase,
    personas: PersonaService,
    catalogs: HashMap<CatalogKind, Catalog>,
}

impl<S: LineSource> Repl<S> {
    pub fn new(
        input: S,
        chat: ChatUseCase,
        personas: PersonaService,
        catalogs: impl IntoIterator<Item = Catalog>,
    ) -> Self {
        Self {
            input,
            chat,
            personas,
            catalogs: catalogs.into_iter().map(|c| (c.kind(), c)).collect(),
        }
    }

    pub fn chat(&self) -> &ChatUseCase {
        &self.chat
    }

    /// Reads and handles lines until `quit`, `exit` or end of input.
    pub async fn run(&mut self) {
        loop {
            let line = match self.input.read_line(">> ") {
                Input::Line(line) => line,
                Input::Interrupted => {
                    println!("{}", "CTRL-C detected. Type 'quit' to exit.".yellow());
                    continue;
                }
                Input::Eof => {
                    println!("{}", "CTRL-D detected. Exiting...".bright_green());
                    break;
                }
            };

            if line.trim().is_empty() {
                continue;
            }
            self.input.remember(&line);

            let command = match Command::parse(&line) {
                Ok(command) => command,
                Err(usage) => {
                    println!("{}", usage.yellow());
                    continue;
                }
            };

            if self.dispatch(command).await == Flow::Quit {
                println!("{}", "Goodbye!".bright_green());
                break;
            }
        }
    }

    /// Handles one command, printing any error inline.
    pub async fn dispatch(&mut self, command: Command) -> Flow {
        if command == Command::Quit {
            return Flow::Quit;
        }

        match self.handle(command).await {
            Ok(()) => {}
            Err(e) if e.is_empty_input() => {}
            Err(e) => {
                tracing::debug!("[Repl] Command failed: {}", e);
                eprintln!("{}", format!("Error: {}", e).red());
            }
        }
        Flow::Continue
    }

    async fn handle(&mut self, command: Command) -> Result<()> {
        match command {
            Command::Chat(text) => self.send(&text).await,
            Command::Personas => {
                self.list_personas().await;
                Ok(())
            }
            Command::Use(Some(name)) => {
                let persona = self.personas.get(&name).await?;
                self.chat.set_active_persona(Some(persona));
                println!("{}", format!("Active persona: {}", name).bright_green());
                Ok(())
            }
            Command::Use(None) => {
                self.chat.set_active_persona(None);
                println!("{}", "No persona active.".bright_green());
                Ok(())
            }
            Command::Show => {
                self.show();
                Ok(())
            }
            Command::New(name) => self.create_persona(name).await,
            Command::Edit(new_name) => self.edit_persona(new_name).await,
            Command::Delete => self.delete_persona().await,
            Command::Catalog { kind, filter } => {
                self.browse_catalog(kind, &filter);
                Ok(())
            }
            Command::Import { kind, key } => self.import(kind, &key).await,
            Command::Model(model) => {
                self.chat.session_mut().set_model(&model)?;
                println!("{}", format!("Model: {}", model).bright_green());
                Ok(())
            }
            Command::Temperature(temperature) => {
                self.chat.session_mut().set_temperature(temperature)?;
                println!("{}", format!("Temperature: {}", temperature).bright_green());
                Ok(())
            }
            Command::MaxTokens(max_tokens) => {
                self.chat.session_mut().set_max_output_tokens(max_tokens)?;
                println!("{}", format!("Max tokens: {}", max_tokens).bright_green());
                Ok(())
            }
            Command::History => {
                display::print_rows(&self.chat.render());
                Ok(())
            }
            Command::Export(path) => {
                let path = path.unwrap_or_else(|| PathBuf::from(EXPORT_FILE_NAME));
                self.chat.export_to(&path).await?;
                println!(
                    "{}",
                    format!("Transcript written to {}", path.display()).bright_green()
                );
                Ok(())
            }
            Command::Help => {
                println!("{}", HELP.bright_black());
                Ok(())
            }
            Command::Quit => Ok(()),
        }
    }

    async fn send(&mut self, text: &str) -> Result<()> {
        let exchange = self.chat.send(text).await?;
        println!(
            "{}",
            format!("[{} | {}]", exchange.model_label, exchange.persona_label).bright_magenta()
        );
        for line in exchange.reply.lines() {
            println!("{}", line.bright_blue());
        }
        println!();
        Ok(())
    }

    async fn list_personas(&self) {
        let names = self.personas.list().await;
        if names.is_empty() {
            println!("{}", "No personas stored. Use /new or /import.".bright_black());
            return;
        }

        let active = self.chat.session().active_persona().map(|p| p.name.as_str());
        for name in names {
            if Some(name.as_str()) == active {
                println!("{}", format!("* {}", name).bright_green());
            } else {
                println!("  {}", name);
            }
        }
    }

    fn show(&self) {
        let session = self.chat.session();
        let parameters = session.parameters();
        println!("Persona:     {}", session.persona_label());
        println!("Model:       {}", parameters.model());
        println!("Temperature: {}", parameters.temperature());
        println!("Max tokens:  {}", parameters.max_output_tokens());
        if let Some(persona) = session.active_persona() {
            println!("{}", "---".bright_black());
            println!("{}", persona.body);
        }
    }

    /// Reads a persona body, one line at a time, until a line holding only
    /// `.`. Interrupt or end of input cancels.
    fn read_body(&mut self) -> Option<String> {
        println!(
            "{}",
            format!("Enter the persona text. End with a line containing only '{BODY_TERMINATOR}'.")
                .bright_black()
        );

        let mut lines = Vec::new();
        loop {
            match self.input.read_line(".. ") {
                Input::Line(line) if line.trim_end() == BODY_TERMINATOR => break,
                Input::Line(line) => lines.push(line),
                Input::Interrupted | Input::Eof => {
                    println!("{}", "Cancelled.".yellow());
                    return None;
                }
            }
        }
        Some(lines.join("\n"))
    }

    async fn create_persona(&mut self, name: String) -> Result<()> {
        let mut request = CreatePersonaRequest::new(name, "");
        request.validate()?;
        // Fail before asking for the body if the name is taken.
        if self.personas.exists(&request.name).await {
            return Err(ParleyError::already_exists("persona", request.name));
        }

        let Some(body) = self.read_body() else {
            return Ok(());
        };
        request.body = body;

        let persona = self.personas.create_new(request).await?;
        println!("{}", format!("Saved persona: {}", persona.name).bright_green());
        self.chat.set_active_persona(Some(persona));
        Ok(())
    }

    async fn edit_persona(&mut self, new_name: Option<String>) -> Result<()> {
        let Some(current) = self.chat.session().active_persona().map(|p| p.name.clone()) else {
            println!("{}", "No persona active. Use /use <name> first.".yellow());
            return Ok(());
        };

        let Some(body) = self.read_body() else {
            return Ok(());
        };

        let request = match new_name {
            Some(new_name) => UpdatePersonaRequest::rename(current, new_name, body),
            None => UpdatePersonaRequest::in_place(current, body),
        };
        let persona = self.personas.update_existing(request).await?;
        println!("{}", format!("Saved persona: {}", persona.name).bright_green());
        self.chat.set_active_persona(Some(persona));
        Ok(())
    }

    async fn delete_persona(&mut self) -> Result<()> {
        let Some(name) = self.chat.session().active_persona().map(|p| p.name.clone()) else {
            println!("{}", "No persona active. Use /use <name> first.".yellow());
            return Ok(());
        };

        self.personas.delete(&name).await?;
        self.chat.set_active_persona(None);
        println!("{}", format!("Deleted persona: {}", name).bright_green());
        Ok(())
    }

    fn browse_catalog(&self, kind: CatalogKind, filter: &str) {
        let Some(catalog) = self.catalogs.get(&kind) else {
            println!("{}", format!("The {} catalog is not loaded.", kind).yellow());
            return;
        };

        if catalog.is_degraded() {
            println!(
                "{}",
                format!("The {} catalog is unavailable.", kind).yellow()
            );
            return;
        }

        let rows = catalog.filter(filter);
        if rows.is_empty() {
            println!("{}", "No matching rows.".bright_black());
            return;
        }

        for row in rows {
            println!("{}  {}", row.key.bright_cyan(), preview(&row.text).bright_black());
        }
    }

    async fn import(&mut self, kind: CatalogKind, key: &str) -> Result<()> {
        let row = self
            .catalogs
            .get(&kind)
            .and_then(|catalog| catalog.find(key))
            .cloned()
            .ok_or_else(|| ParleyError::not_found("catalog row", key))?;

        let persona = self.personas.import_from_catalog(&row, kind).await?;
        println!("{}", format!("Imported persona: {}", persona.name).bright_green());
        self.chat.set_active_persona(Some(persona));
        Ok(())
    }
}

fn preview(text: &str) -> String {
    let flat = text.split_whitespace().collect::<Vec<_>>().join(" ");
    if flat.chars().count() > PREVIEW_CHARS {
        let cut: String = flat.chars().take(PREVIEW_CHARS).collect();
        format!("{cut}...")
    } else {
        flat
    }
}
