//! Catalog fetcher trait and the soft-fail boundary.

use super::model::{Catalog, CatalogRow, CatalogSource};
use crate::error::Result;

/// Retrieves catalog rows from a remote source.
///
/// Implementations report every transport and parse problem as an error;
/// degrading to a placeholder is done once, in [`fetch_catalog`].
#[async_trait::async_trait]
pub trait CatalogFetcher: Send + Sync {
    async fn fetch(&self, source: &CatalogSource) -> Result<Vec<CatalogRow>>;
}

/// Fetches a catalog, substituting the placeholder on any failure.
pub async fn fetch_catalog(fetcher: &dyn CatalogFetcher, source: &CatalogSource) -> Catalog {
    Catalog::from_fetch(source.kind, fetcher.fetch(source).await)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::CatalogKind;
    use crate::error::ParleyError;

    struct FailingFetcher;

    #[async_trait::async_trait]
    impl CatalogFetcher for FailingFetcher {
        async fn fetch(&self, source: &CatalogSource) -> Result<Vec<CatalogRow>> {
            Err(ParleyError::catalog_fetch(&source.url, "connection refused"))
        }
    }

    struct StaticFetcher(Vec<CatalogRow>);

    #[async_trait::async_trait]
    impl CatalogFetcher for StaticFetcher {
        async fn fetch(&self, _source: &CatalogSource) -> Result<Vec<CatalogRow>> {
            Ok(self.0.clone())
        }
    }

    #[tokio::test]
    async fn test_failure_degrades_to_placeholder() {
        let source = CatalogSource::new(CatalogKind::Jailbreak, "http://127.0.0.1:9/x.csv");
        let catalog = fetch_catalog(&FailingFetcher, &source).await;

        assert_eq!(catalog.kind(), CatalogKind::Jailbreak);
        assert_eq!(catalog.rows(), &[CatalogRow::placeholder()]);
    }

    #[tokio::test]
    async fn test_success_keeps_rows_in_order() {
        let rows = vec![CatalogRow::new("b", "2"), CatalogRow::new("a", "1")];
        let source = CatalogSource::default_for(CatalogKind::General);
        let catalog = fetch_catalog(&StaticFetcher(rows.clone()), &source).await;

        assert!(!catalog.is_degraded());
        assert_eq!(catalog.rows(), rows.as_slice());
    }
}
