//! Infrastructure layer for Parley.
//!
//! File-system persona storage, platform paths, secret and config files, and
//! the HTTP catalog fetcher.

pub mod dir_persona_repository;
pub mod http_catalog_fetcher;
pub mod paths;
pub mod storage;

pub use crate::dir_persona_repository::DirPersonaRepository;
pub use crate::http_catalog_fetcher::{HttpCatalogFetcher, parse_catalog_csv};
pub use crate::paths::ParleyPaths;
