use std::borrow::Cow::{self, Borrowed, Owned};

use colored::Colorize;
use parley_core::catalog::CatalogKind;
use rustyline::completion::{Completer, Pair};
use rustyline::highlight::Highlighter;
use rustyline::hint::Hinter;
use rustyline::validate::Validator;
use rustyline::{Context, Helper};

use crate::commands::COMMANDS;

/// Commands whose first argument is a catalog kind.
const KIND_COMMANDS: &[&str] = &["/catalog", "/import"];

/// CLI helper for rustyline: command and catalog-kind completion, command
/// highlighting, and argument hints.
#[derive(Clone, Default)]
pub struct CliHelper;

impl CliHelper {
    pub fn new() -> Self {
        Self
    }

    fn complete_line(line: &str) -> (usize, Vec<String>) {
        if !line.starts_with('/') {
            return (0, vec![]);
        }

        match line.split_once(' ') {
            None => (
                0,
                COMMANDS
                    .iter()
                    .map(|(name, _)| *name)
                    .filter(|name| name.starts_with(line))
                    .map(str::to_string)
                    .collect(),
            ),
            Some((command, rest)) if KIND_COMMANDS.contains(&command) && !rest.contains(' ') => (
                command.len() + 1,
                CatalogKind::ALL
                    .iter()
                    .map(|kind| kind.as_str())
                    .filter(|kind| kind.starts_with(rest))
                    .map(str::to_string)
                    .collect(),
            ),
            Some(_) => (0, vec![]),
        }
    }

    fn hint_line(line: &str) -> Option<String> {
        if !line.starts_with('/') {
            return None;
        }

        match line.split_once(' ') {
            // Finish the command name, then show its arguments.
            None => COMMANDS
                .iter()
                .find(|(name, _)| name.starts_with(line))
                .map(|(name, args)| {
                    let rest = &name[line.len()..];
                    if args.is_empty() {
                        rest.to_string()
                    } else {
                        format!("{rest} {args}")
                    }
                }),
            Some((command, "")) => COMMANDS
                .iter()
                .find(|(name, args)| *name == command && !args.is_empty())
                .map(|(_, args)| args.to_string()),
            Some(_) => None,
        }
    }
}

impl Helper for CliHelper {}

impl Completer for CliHelper {
    type Candidate = Pair;

    fn complete(
        &self,
        line: &str,
        pos: usize,
        _ctx: &Context<'_>,
    ) -> rustyline::Result<(usize, Vec<Pair>)> {
        let (start, words) = Self::complete_line(&line[..pos]);
        let candidates = words
            .into_iter()
            .map(|word| Pair {
                display: word.clone(),
                replacement: word,
            })
            .collect();
        Ok((start, candidates))
    }
}

impl Highlighter for CliHelper {
    fn highlight<'l>(&self, line: &'l str, _pos: usize) -> Cow<'l, str> {
        if !line.starts_with('/') {
            return Borrowed(line);
        }

        match line.split_once(' ') {
            Some((command, rest)) => Owned(format!("{} {}", command.bright_cyan(), rest)),
            None => Owned(line.bright_cyan().to_string()),
        }
    }

    fn highlight_hint<'h>(&self, hint: &'h str) -> Cow<'h, str> {
        Owned(hint.bright_black().to_string())
    }

    fn highlight_char(&self, _line: &str, _pos: usize, _forced: bool) -> bool {
        true
    }
}

impl Hinter for CliHelper {
    type Hint = String;

    fn hint(&self, line: &str, pos: usize, _ctx: &Context<'_>) -> Option<String> {
        // Only hint at the end of the line.
        if pos < line.len() {
            return None;
        }
        Self::hint_line(line)
    }
}

impl Validator for CliHelper {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_completes_command_names() {
        let (start, words) = CliHelper::complete_line("/ex");
        assert_eq!(start, 0);
        assert_eq!(words, vec!["/export"]);
    }

    #[test]
    fn test_completes_catalog_kind() {
        let (start, words) = CliHelper::complete_line("/import ja");
        assert_eq!(start, "/import ".len());
        assert_eq!(words, vec!["jailbreak"]);
    }

    #[test]
    fn test_plain_text_gets_nothing() {
        assert!(CliHelper::complete_line("hello").1.is_empty());
        assert!(CliHelper::hint_line("hello").is_none());
    }

    #[test]
    fn test_hints() {
        assert_eq!(CliHelper::hint_line("/hist").as_deref(), Some("ory"));
        assert_eq!(CliHelper::hint_line("/mod").as_deref(), Some("el <id>"));
        assert_eq!(CliHelper::hint_line("/new ").as_deref(), Some("<name>"));
        assert_eq!(CliHelper::hint_line("/new pirate"), None);
    }
}
