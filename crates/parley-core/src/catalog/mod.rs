//! Remote prompt catalogs.
//!
//! Catalogs are read-only tabular feeds of reusable prompt rows. A row can be
//! promoted into a persona; the catalog kind decides the name suffix so that
//! imports from different feeds never collide.

mod fetcher;
mod model;

pub use fetcher::{CatalogFetcher, fetch_catalog};
pub use model::{Catalog, CatalogKind, CatalogRow, CatalogSource};
