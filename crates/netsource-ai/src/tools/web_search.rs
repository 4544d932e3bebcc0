//! DuckDuckGo web search with per-page summaries.

use std::sync::LazyLock;
use std::time::Duration;

use async_trait::async_trait;
use regex::Regex;
use tracing::{debug, warn};

use netsource_config::{SafeSearch, SearchConfig};

use super::text::{first_sentences, paragraph_text, strip_tags};
use super::{required_str, Tool, ToolArgs, ToolError, USER_AGENT, WEB_SEARCH_TOOL};

const DEFAULT_ENDPOINT: &str = "https://html.duckduckgo.com/html/";

static ANCHOR_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r#"(?is)<a\b([^>]*)>(.*?)</a>"#).unwrap());
static HREF_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r#"(?i)\bhref\s*=\s*"([^"]*)""#).unwrap());

/// A search hit before its page is fetched.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchHit {
    pub title: String,
    pub url: String,
}

/// Searches the web and summarizes the leading paragraphs of each hit.
pub struct WebSearchTool {
    http: reqwest::Client,
    endpoint: String,
    max_results: usize,
    num_sentences: usize,
    safesearch: SafeSearch,
}

impl WebSearchTool {
    pub fn new(config: &SearchConfig) -> Result<Self, ToolError> {
        let http = reqwest::Client::builder()
            .user_agent(USER_AGENT)
            .timeout(Duration::from_secs(u64::from(config.fetch_timeout_secs)))
            .build()?;
        Ok(Self {
            http,
            endpoint: DEFAULT_ENDPOINT.to_string(),
            max_results: config.max_results as usize,
            num_sentences: config.num_sentences as usize,
            safesearch: config.safesearch,
        })
    }

    /// Point the search at a different results page, e.g. a local mock.
    pub fn with_endpoint(mut self, endpoint: impl Into<String>) -> Self {
        self.endpoint = endpoint.into();
        self
    }

    /// Run the search and return up to `max_results` hits.
    pub async fn search(&self, query: &str) -> Result<Vec<SearchHit>, ToolError> {
        let html = self
            .http
            .get(&self.endpoint)
            .query(&[("q", query), ("kp", safesearch_param(self.safesearch))])
            .send()
            .await?
            .error_for_status()?
            .text()
            .await?;

        let hits = parse_results(&html, self.max_results);
        debug!(query = %query, hits = hits.len(), "web search finished");
        Ok(hits)
    }

    /// First sentences of the page's paragraph text.
    async fn summarize(&self, url: &str) -> Result<String, ToolError> {
        let html = self
            .http
            .get(url)
            .send()
            .await?
            .error_for_status()?
            .text()
            .await?;

        let summary = first_sentences(&paragraph_text(&html), self.num_sentences);
        if summary.is_empty() {
            return Ok("No content found.".to_string());
        }
        Ok(summary)
    }
}

#[async_trait]
impl Tool for WebSearchTool {
    fn name(&self) -> &str {
        WEB_SEARCH_TOOL
    }

    async fn call(&self, args: &ToolArgs) -> Result<String, ToolError> {
        let query = required_str(args, "query")?;
        let hits = self
            .search(&query)
            .await
            .map_err(|e| ToolError::Provider(format!("Search error: {e}")))?;

        let mut out = String::new();
        for hit in hits {
            let summary = match self.summarize(&hit.url).await {
                Ok(summary) => summary,
                Err(e) => {
                    warn!(url = %hit.url, "page fetch failed: {e}");
                    format!("Error processing {}: {e}", hit.url)
                }
            };
            out.push_str(&format!(
                "Title: {}\nURL: {}\n - Summary: {summary}\n\n",
                hit.title, hit.url
            ));
        }
        Ok(out)
    }
}

fn safesearch_param(level: SafeSearch) -> &'static str {
    match level {
        SafeSearch::On => "1",
        SafeSearch::Moderate => "-1",
        SafeSearch::Off => "-2",
    }
}

/// Pull `result__a` anchors out of a DuckDuckGo HTML results page.
pub fn parse_results(html: &str, limit: usize) -> Vec<SearchHit> {
    ANCHOR_RE
        .captures_iter(html)
        .filter(|cap| cap[1].contains("result__a"))
        .filter_map(|cap| {
            let href = HREF_RE.captures(&cap[1])?.get(1)?.as_str();
            let url = resolve_href(href)?;
            let title = strip_tags(&cap[2]);
            Some(SearchHit {
                title: if title.is_empty() {
                    "Title not available".to_string()
                } else {
                    title
                },
                url,
            })
        })
        .take(limit)
        .collect()
}

/// Turn a result link into the target URL, unwrapping DuckDuckGo's
/// `/l/?uddg=` redirect. Ad links yield `None`.
fn resolve_href(href: &str) -> Option<String> {
    let href = html_escape::decode_html_entities(href);
    let href = if let Some(rest) = href.strip_prefix("//") {
        format!("https://{rest}")
    } else {
        href.into_owned()
    };

    if href.contains("duckduckgo.com/y.js") {
        return None;
    }

    if let Some(idx) = href.find("uddg=") {
        let encoded = href[idx + "uddg=".len()..].split('&').next()?;
        return urlencoding::decode(encoded).ok().map(|s| s.into_owned());
    }

    if href.starts_with("http://") || href.starts_with("https://") {
        Some(href)
    } else {
        None
    }
}
