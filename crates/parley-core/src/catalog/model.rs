//! Catalog domain model.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::{ParleyError, Result};
use crate::persona::Persona;

const GENERAL_CATALOG_URL: &str =
    "https://raw.githubusercontent.com/f/awesome-chatgpt-prompts/main/prompts.csv";
const JAILBREAK_CATALOG_URL: &str =
    "https://raw.githubusercontent.com/NoDataFound/hackGPT/main/jailbreaks.csv";

/// The two supported catalog feeds.
#[derive(Deserialize, Serialize, Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum CatalogKind {
    /// General "act as" prompt catalog
    General,
    /// Jailbreak prompt catalog
    Jailbreak,
}

impl CatalogKind {
    pub const ALL: [CatalogKind; 2] = [CatalogKind::General, CatalogKind::Jailbreak];

    /// Suffix appended to a row key when it is promoted into a persona.
    pub fn suffix(self) -> &'static str {
        match self {
            CatalogKind::General => "_remote",
            CatalogKind::Jailbreak => "_jailbreak",
        }
    }

    /// Column holding the row label in the feed.
    pub fn key_column(self) -> &'static str {
        match self {
            CatalogKind::General => "act",
            CatalogKind::Jailbreak => "hacker",
        }
    }

    /// Column holding the prompt body in the feed.
    pub fn text_column(self) -> &'static str {
        match self {
            CatalogKind::General => "prompt",
            CatalogKind::Jailbreak => "text",
        }
    }

    pub fn default_url(self) -> &'static str {
        match self {
            CatalogKind::General => GENERAL_CATALOG_URL,
            CatalogKind::Jailbreak => JAILBREAK_CATALOG_URL,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            CatalogKind::General => "general",
            CatalogKind::Jailbreak => "jailbreak",
        }
    }
}

impl fmt::Display for CatalogKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for CatalogKind {
    type Err = ParleyError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "general" | "remote" | "act" => Ok(CatalogKind::General),
            "jailbreak" | "jailbreaks" => Ok(CatalogKind::Jailbreak),
            other => Err(ParleyError::invalid_parameter(
                "catalog",
                format!("unknown catalog '{other}' (expected general or jailbreak)"),
            )),
        }
    }
}

/// Where a catalog is fetched from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CatalogSource {
    pub kind: CatalogKind,
    pub url: String,
}

impl CatalogSource {
    pub fn new(kind: CatalogKind, url: impl Into<String>) -> Self {
        Self {
            kind,
            url: url.into(),
        }
    }

    pub fn default_for(kind: CatalogKind) -> Self {
        Self::new(kind, kind.default_url())
    }
}

/// One row of a remote catalog.
#[derive(Deserialize, Serialize, Debug, Clone, PartialEq, Eq, Default)]
pub struct CatalogRow {
    /// Display label ("act" or "hacker" name)
    pub key: String,
    /// Associated prompt body
    pub text: String,
}

impl CatalogRow {
    pub fn new(key: impl Into<String>, text: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            text: text.into(),
        }
    }

    /// The row shown when a catalog could not be loaded.
    pub fn placeholder() -> Self {
        Self::default()
    }

    /// A row whose key is blank cannot be selected or promoted.
    pub fn is_blank(&self) -> bool {
        self.key.trim().is_empty()
    }

    /// Builds the persona this row becomes when imported from `kind`.
    ///
    /// `name = key + suffix`, `body = text`.
    pub fn to_persona(&self, kind: CatalogKind) -> Result<Persona> {
        if self.is_blank() {
            return Err(ParleyError::invalid_name(
                "Catalog row has no label to import",
            ));
        }
        Persona::new(format!("{}{}", self.key, kind.suffix()), self.text.clone())
    }
}

/// A fetched catalog. Always holds at least one row.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Catalog {
    kind: CatalogKind,
    rows: Vec<CatalogRow>,
    degraded: bool,
}

impl Catalog {
    /// Collapses a fetch result into a catalog.
    ///
    /// Any error, or a feed without rows, degrades to a single placeholder row.
    pub fn from_fetch(kind: CatalogKind, fetched: Result<Vec<CatalogRow>>) -> Self {
        match fetched {
            Ok(rows) if !rows.is_empty() => Self {
                kind,
                rows,
                degraded: false,
            },
            _ => Self::placeholder(kind),
        }
    }

    pub fn placeholder(kind: CatalogKind) -> Self {
        Self {
            kind,
            rows: vec![CatalogRow::placeholder()],
            degraded: true,
        }
    }

    pub fn kind(&self) -> CatalogKind {
        self.kind
    }

    pub fn rows(&self) -> &[CatalogRow] {
        &self.rows
    }

    /// True when the catalog is the fallback placeholder.
    pub fn is_degraded(&self) -> bool {
        self.degraded
    }

    /// Finds a row by exact key.
    pub fn find(&self, key: &str) -> Option<&CatalogRow> {
        self.rows.iter().find(|row| row.key == key)
    }

    /// Rows whose key contains `needle`, case-insensitively. Blank rows are skipped.
    pub fn filter<'a>(&'a self, needle: &str) -> Vec<&'a CatalogRow> {
        let needle = needle.to_lowercase();
        self.rows
            .iter()
            .filter(|row| !row.is_blank())
            .filter(|row| needle.is_empty() || row.key.to_lowercase().contains(&needle))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_suffixes_differ_per_kind() {
        assert_eq!(CatalogKind::General.suffix(), "_remote");
        assert_eq!(CatalogKind::Jailbreak.suffix(), "_jailbreak");
    }

    #[test]
    fn test_kind_from_str() {
        assert_eq!("general".parse::<CatalogKind>().unwrap(), CatalogKind::General);
        assert_eq!("Jailbreak".parse::<CatalogKind>().unwrap(), CatalogKind::Jailbreak);
        assert!("other".parse::<CatalogKind>().is_err());
    }

    #[test]
    fn test_row_to_persona_appends_suffix() {
        let row = CatalogRow::new("Linux Terminal", "I want you to act as a linux terminal.");
        let persona = row.to_persona(CatalogKind::General).unwrap();
        assert_eq!(persona.name, "Linux Terminal_remote");
        assert_eq!(persona.body, "I want you to act as a linux terminal.");

        let persona = row.to_persona(CatalogKind::Jailbreak).unwrap();
        assert_eq!(persona.name, "Linux Terminal_jailbreak");
    }

    #[test]
    fn test_blank_row_cannot_be_promoted() {
        let err = CatalogRow::placeholder()
            .to_persona(CatalogKind::General)
            .unwrap_err();
        assert!(matches!(err, ParleyError::InvalidName(_)));
    }

    #[test]
    fn test_failed_fetch_collapses_to_single_placeholder() {
        let catalog = Catalog::from_fetch(
            CatalogKind::General,
            Err(ParleyError::catalog_fetch("http://unreachable", "refused")),
        );
        assert!(catalog.is_degraded());
        assert_eq!(catalog.rows().len(), 1);
        assert_eq!(catalog.rows()[0].key, "");
        assert_eq!(catalog.rows()[0].text, "");
    }

    #[test]
    fn test_empty_fetch_collapses_to_placeholder() {
        let catalog = Catalog::from_fetch(CatalogKind::Jailbreak, Ok(Vec::new()));
        assert!(catalog.is_degraded());
        assert_eq!(catalog.rows(), &[CatalogRow::placeholder()]);
    }

    #[test]
    fn test_find_and_filter() {
        let catalog = Catalog::from_fetch(
            CatalogKind::General,
            Ok(vec![
                CatalogRow::new("Linux Terminal", "a"),
                CatalogRow::new("English Translator", "b"),
                CatalogRow::new(" ", ""),
            ]),
        );
        assert!(!catalog.is_degraded());
        assert_eq!(catalog.find("English Translator").unwrap().text, "b");
        assert!(catalog.find("english translator").is_none());

        let hits = catalog.filter("TERM");
        assert_eq!(hits.len(), 1);
        assert_eq!(hits[0].key, "Linux Terminal");

        assert_eq!(catalog.filter("").len(), 2);
    }
}
