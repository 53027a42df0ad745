//! Listing source port.

use async_trait::async_trait;

use crate::domain::RawListing;
use crate::error::SourceError;

/// Produces the raw candidate records of one listing page.
///
/// A call returns a finite batch; transport and parse problems come back as
/// [`SourceError`] and end the cycle early.
#[async_trait]
pub trait ListingSource: Send + Sync {
    /// Fetch and extract the current candidates.
    async fn fetch(&self) -> Result<Vec<RawListing>, SourceError>;

    /// Source name for logging.
    fn name(&self) -> &'static str;
}
