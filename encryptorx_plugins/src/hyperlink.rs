use crate::{LinkOpener, RequestType};
use anyhow::{anyhow, Result};
use async_trait::async_trait;
use std::collections::HashMap;
use std::process::Stdio;
use tokio::process::Command;

/// Opens request links with the platform's default handler.
pub struct SystemLinkOpener {
    links: HashMap<RequestType, String>,
}

impl SystemLinkOpener {
    pub fn new(links: HashMap<RequestType, String>) -> Self {
        Self { links }
    }

    pub fn url_for(&self, request: RequestType) -> Result<&str> {
        self.links
            .get(&request)
            .map(|url| url.trim())
            .filter(|url| !url.is_empty())
            .ok_or_else(|| anyhow!("No link configured for '{}'", request.display_name()))
    }
}

#[async_trait]
impl LinkOpener for SystemLinkOpener {
    async fn open(&self, request: RequestType) -> Result<()> {
        let url = self.url_for(request)?;
        let mut cmd = opener_command(url);
        // The terminal is owned by the UI.
        cmd.stdout(Stdio::null()).stderr(Stdio::null());
        let status = cmd.status().await?;

        if status.success() {
            tracing::info!(request = ?request, url, "Link opened");
            Ok(())
        } else {
            Err(anyhow!("Link opener exited with {}", status))
        }
    }
}

fn opener_command(url: &str) -> Command {
    if cfg!(target_os = "windows") {
        let mut c = Command::new("cmd");
        c.args(["/C", "start", "", url]);
        c
    } else if cfg!(target_os = "macos") {
        let mut c = Command::new("open");
        c.arg(url);
        c
    } else {
        let mut c = Command::new("xdg-open");
        c.arg(url);
        c
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn url_lookup_uses_configured_link() {
        let opener = SystemLinkOpener::new(HashMap::from([(
            RequestType::BugReport,
            " https://example.com/issues ".to_string(),
        )]));
        assert_eq!(
            opener.url_for(RequestType::BugReport).unwrap(),
            "https://example.com/issues"
        );
    }

    #[tokio::test]
    async fn open_fails_without_configured_link() {
        let opener = SystemLinkOpener::new(HashMap::new());
        assert!(opener.open(RequestType::BugReport).await.is_err());
    }
}
