use async_trait::async_trait;

use crate::error::SessionError;
use crate::parsers::find_environmental_row;

mod snapshot;

pub use snapshot::SnapshotFactory;

/// A browser looking at the parts catalog.
///
/// Implementations own waiting for pages to settle; markup they hand out is
/// expected to be fully rendered.
#[async_trait]
pub trait CatalogSession: Send {
    /// Type the part number into the site search and submit it.
    async fn search(&mut self, part_number: &str) -> Result<(), SessionError>;

    /// Markup of the page currently shown.
    async fn page_source(&mut self) -> Result<String, SessionError>;

    /// Click the first entry of a search results list. Returns `false` when
    /// there is nothing to click.
    async fn open_first_result(&mut self) -> Result<bool, SessionError>;

    /// Outer HTML of the environmental table row on the current page.
    async fn environmental_row(&mut self) -> Result<Option<String>, SessionError> {
        let page = self.page_source().await?;
        Ok(find_environmental_row(&page))
    }

    async fn close(&mut self) -> Result<(), SessionError> {
        Ok(())
    }
}

/// Opens one fresh session per part number.
#[async_trait]
pub trait SessionFactory: Send + Sync {
    async fn open(&self) -> Result<Box<dyn CatalogSession>, SessionError>;
}
