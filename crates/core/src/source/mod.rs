pub mod fixture;
pub mod http;
pub mod types;

use crate::domain::draw::DrawRecord;
use anyhow::Result;
use chrono::NaiveDate;

/// Upstream supplier of draw results.
///
/// An unpublished window is `Ok(vec![])`, never an error. Implementations may return
/// records outside `start..=end`; callers filter by date anyway.
#[async_trait::async_trait]
pub trait DrawSource: Send + Sync {
    fn source_name(&self) -> &'static str;

    async fn fetch_draws(&self, start: NaiveDate, end: NaiveDate) -> Result<Vec<DrawRecord>>;
}
