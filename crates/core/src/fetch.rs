//! Page acquisition from URLs, files, and stdin.
//!
//! A saved page (or one piped in by a browser capture tool) is the common
//! input; fetching over HTTP needs the `fetch` feature and only works for
//! pages that render their text server-side.

use std::fs;
use std::path::{Path, PathBuf};

#[cfg(feature = "fetch")]
use std::time::Duration;

#[cfg(feature = "fetch")]
use reqwest::Client;
#[cfg(feature = "fetch")]
use tracing::debug;
#[cfg(feature = "fetch")]
use url::Url;

use crate::{NovexError, Result};

/// HTTP client configuration for fetching novel pages.
#[derive(Debug, Clone)]
pub struct FetchConfig {
    /// Request timeout in seconds.
    pub timeout: u64,
    /// Custom User-Agent string.
    pub user_agent: String,
    /// Value of the Accept-Language header.
    pub accept_language: String,
}

impl Default for FetchConfig {
    fn default() -> Self {
        Self {
            timeout: 30,
            user_agent: format!("Mozilla/5.0 (compatible; Novex/{})", env!("CARGO_PKG_VERSION")),
            accept_language: "ja,en-US;q=0.9,en;q=0.8".to_string(),
        }
    }
}

/// Fetches a page over HTTP(S) and returns the body as text.
///
/// Redirects are followed and the configured timeout applies to the whole request.
#[cfg(feature = "fetch")]
pub async fn fetch_url(url: &str, config: &FetchConfig) -> Result<String> {
    let parsed_url = Url::parse(url).map_err(|e| NovexError::InvalidUrl(e.to_string()))?;

    if !matches!(parsed_url.scheme(), "http" | "https") {
        return Err(NovexError::InvalidUrl(format!(
            "unsupported scheme '{}', expected http or https",
            parsed_url.scheme()
        )));
    }

    let client = Client::builder()
        .timeout(Duration::from_secs(config.timeout))
        .build()
        .map_err(NovexError::HttpError)?;

    debug!(url, timeout = config.timeout, "fetching page");

    let response = client
        .get(parsed_url)
        .header("User-Agent", &config.user_agent)
        .header("Accept", "text/html,application/xhtml+xml,application/xml;q=0.9,*/*;q=0.8")
        .header("Accept-Language", &config.accept_language)
        .send()
        .await
        .map_err(|e| {
            if e.is_timeout() { NovexError::Timeout { timeout: config.timeout } } else { NovexError::HttpError(e) }
        })?
        .error_for_status()?;

    let content = response.text().await?;
    debug!(url, bytes = content.len(), "fetched page");

    Ok(content)
}

/// Reads a saved page from a local file.
pub fn fetch_file<P: AsRef<Path>>(path: P) -> Result<String> {
    let path_buf = PathBuf::from(path.as_ref());

    if !path_buf.exists() {
        Err(NovexError::FileNotFound(path_buf))
    } else {
        fs::read_to_string(&path_buf).map_err(NovexError::from)
    }
}

/// Reads a page from standard input until EOF.
pub fn fetch_stdin() -> Result<String> {
    use std::io::{self, Read};

    let mut buffer = String::new();
    io::stdin().read_to_string(&mut buffer).map_err(NovexError::from)?;

    Ok(buffer)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn test_fetch_config_default() {
        let config = FetchConfig::default();
        assert_eq!(config.timeout, 30);
        assert!(config.user_agent.contains("Novex"));
        assert!(config.user_agent.contains(env!("CARGO_PKG_VERSION")));
        assert!(!config.user_agent.contains("http"));
    }

    #[cfg(feature = "fetch")]
    #[test]
    fn test_fetch_url_invalid() {
        let config = FetchConfig::default();
        let result = std::thread::spawn(move || {
            tokio::runtime::Runtime::new()
                .unwrap()
                .block_on(fetch_url("not-a-url", &config))
        })
        .join()
        .unwrap();

        assert!(matches!(result, Err(NovexError::InvalidUrl(_))));
    }

    #[cfg(feature = "fetch")]
    #[test]
    fn test_fetch_url_rejects_non_http_scheme() {
        let config = FetchConfig::default();
        let result = std::thread::spawn(move || {
            tokio::runtime::Runtime::new()
                .unwrap()
                .block_on(fetch_url("file:///etc/hosts", &config))
        })
        .join()
        .unwrap();

        assert!(matches!(result, Err(NovexError::InvalidUrl(msg)) if msg.contains("file")));
    }

    #[test]
    fn test_fetch_file() {
        let mut file = NamedTempFile::new().unwrap();
        write!(file, "<main><p>saved page</p></main>").unwrap();

        let html = fetch_file(file.path()).unwrap();
        assert!(html.contains("saved page"));
    }

    #[test]
    fn test_fetch_file_not_found() {
        let result = fetch_file("/nonexistent/path/novel.html");
        assert!(matches!(result, Err(NovexError::FileNotFound(_))));
    }
}
