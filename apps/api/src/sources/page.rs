//! Page fetching — downloads a job listing and reduces it to its visible text.

use async_trait::async_trait;
use reqwest::Client;
use scraper::{Html, Node};
use tracing::info;

use crate::errors::AppError;

const USER_AGENT: &str = "Mozilla/5.0 (X11; Linux x86_64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/120.0.0.0 Safari/537.36";
const FETCH_TIMEOUT_SECS: u64 = 30;

/// Elements whose text never reaches the reader.
const HIDDEN_ELEMENTS: &[&str] = &["script", "style", "noscript", "template", "svg", "head"];

/// Fetches a URL and returns its readable text (not yet cleaned).
///
/// Carried in `AppState` as `Arc<dyn PageFetcher>`.
#[async_trait]
pub trait PageFetcher: Send + Sync {
    async fn fetch_text(&self, url: &str) -> Result<String, AppError>;
}

pub struct HttpPageFetcher {
    client: Client,
}

impl HttpPageFetcher {
    pub fn new() -> Result<Self, AppError> {
        let client = Client::builder()
            .user_agent(USER_AGENT)
            .timeout(std::time::Duration::from_secs(FETCH_TIMEOUT_SECS))
            .build()
            .map_err(|e| AppError::Internal(anyhow::anyhow!("Failed to build HTTP client: {e}")))?;
        Ok(Self { client })
    }
}

#[async_trait]
impl PageFetcher for HttpPageFetcher {
    async fn fetch_text(&self, url: &str) -> Result<String, AppError> {
        info!("Fetching job page: {url}");

        let response = self
            .client
            .get(url)
            .send()
            .await
            .map_err(|e| AppError::Service(format!("Failed to fetch page: {e}")))?;

        let status = response.status();
        if !status.is_success() {
            return Err(AppError::Service(format!("Page fetch returned HTTP {status}")));
        }

        let html = response
            .text()
            .await
            .map_err(|e| AppError::Service(format!("Failed to read page body: {e}")))?;

        let text = visible_text(&html);
        if text.trim().is_empty() {
            return Err(AppError::Service("Page returned no readable text".to_string()));
        }

        info!("Fetched {} chars of page text", text.len());
        Ok(text)
    }
}

/// Collects every text node outside of `HIDDEN_ELEMENTS`, separated by spaces.
pub fn visible_text(html: &str) -> String {
    let document = Html::parse_document(html);
    let mut out = String::new();

    for node in document.root_element().descendants() {
        let Node::Text(text) = node.value() else {
            continue;
        };
        let hidden = node.ancestors().any(|ancestor| {
            ancestor
                .value()
                .as_element()
                .is_some_and(|el| HIDDEN_ELEMENTS.contains(&el.name()))
        });
        if hidden || text.trim().is_empty() {
            continue;
        }
        if !out.is_empty() {
            out.push(' ');
        }
        out.push_str(text.trim());
    }

    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_visible_text_skips_scripts_and_styles() {
        let html = r#"<html>
            <head><title>Careers</title><style>body { color: red; }</style></head>
            <body>
              <h1>Backend Engineer</h1>
              <script>window.tracking = true;</script>
              <p>Email <a href="mailto:jobs@acme.com">jobs@acme.com</a></p>
              <noscript>Enable JavaScript</noscript>
            </body></html>"#;
        let text = visible_text(html);
        assert!(text.contains("Backend Engineer"));
        assert!(text.contains("jobs@acme.com"));
        assert!(!text.contains("tracking"));
        assert!(!text.contains("color: red"));
        assert!(!text.contains("Enable JavaScript"));
    }

    #[test]
    fn test_visible_text_separates_blocks() {
        let text = visible_text("<body><p>Role</p><p>Remote</p></body>");
        assert_eq!(text, "Role Remote");
    }

    #[test]
    fn test_visible_text_empty_document() {
        assert_eq!(visible_text(""), "");
        assert_eq!(visible_text("<script>only()</script>"), "");
    }
}
