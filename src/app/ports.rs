use async_trait::async_trait;

use crate::domain::Investigation;
use crate::error::Result;

/// Destination for transformed investigations.
///
/// One call per batch. Any error fails the whole batch; callers do not retry.
#[async_trait]
pub trait InvestigationSinkPort: Send + Sync {
    async fn insert(&self, table: &str, rows: &[Investigation]) -> Result<()>;
}
