use crate::RequestProcessor;
use anyhow::{anyhow, Result};
use async_trait::async_trait;

/// Default processing collaborator. Accepts the request and leaves the
/// values untouched; callers display and persist the submitted pair as-is.
pub struct PassthroughProcessor;

#[async_trait]
impl RequestProcessor for PassthroughProcessor {
    fn name(&self) -> &str {
        "passthrough"
    }

    async fn handle(&self, data: &str, key: &str) -> Result<()> {
        if data.is_empty() || key.is_empty() {
            return Err(anyhow!("Processing request needs both data and key"));
        }

        tracing::debug!(
            processor = self.name(),
            data_len = data.chars().count(),
            key_len = key.chars().count(),
            "Processing request accepted"
        );
        Ok(())
    }
}
