//! Wikipedia lookups through the MediaWiki action API.

use std::time::Duration;

use async_trait::async_trait;
use serde_json::Value;
use tracing::{debug, warn};

use netsource_config::SearchConfig;

use super::{required_str, Tool, ToolArgs, ToolError, USER_AGENT, WIKIPEDIA_TOOL};

/// An article's intro, as returned by `prop=extracts`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WikiPage {
    pub title: String,
    pub url: String,
    pub summary: String,
}

/// Searches Wikipedia and returns the intro of the leading articles.
pub struct WikipediaTool {
    http: reqwest::Client,
    api_url: String,
    pages: usize,
}

impl WikipediaTool {
    pub fn new(config: &SearchConfig) -> Result<Self, ToolError> {
        let http = reqwest::Client::builder()
            .user_agent(USER_AGENT)
            .timeout(Duration::from_secs(u64::from(config.fetch_timeout_secs)))
            .build()?;
        Ok(Self {
            http,
            api_url: format!("https://{}.wikipedia.org/w/api.php", config.wikipedia_lang),
            pages: config.wikipedia_pages as usize,
        })
    }

    pub fn with_api_url(mut self, api_url: impl Into<String>) -> Self {
        self.api_url = api_url.into();
        self
    }

    /// Titles of the best matching articles.
    pub async fn search(&self, query: &str) -> Result<Vec<String>, ToolError> {
        let limit = self.pages.to_string();
        let body = self
            .get_json(&[
                ("action", "query"),
                ("list", "search"),
                ("srsearch", query),
                ("srlimit", limit.as_str()),
                ("format", "json"),
            ])
            .await?;

        let titles: Vec<String> = body["query"]["search"]
            .as_array()
            .map(|hits| {
                hits.iter()
                    .filter_map(|hit| hit["title"].as_str().map(str::to_string))
                    .take(self.pages)
                    .collect()
            })
            .unwrap_or_default();
        debug!(query = %query, hits = titles.len(), "wikipedia search finished");
        Ok(titles)
    }

    /// Intro extract and canonical URL of one article, following redirects.
    pub async fn page(&self, title: &str) -> Result<WikiPage, ToolError> {
        let body = self
            .get_json(&[
                ("action", "query"),
                ("prop", "extracts|info"),
                ("exintro", "1"),
                ("explaintext", "1"),
                ("inprop", "url"),
                ("redirects", "1"),
                ("format", "json"),
                ("titles", title),
            ])
            .await?;

        let page = body["query"]["pages"]
            .as_object()
            .and_then(|pages| pages.values().next())
            .ok_or_else(|| ToolError::Provider("response has no pages".into()))?;
        if page.get("missing").is_some() || page.get("invalid").is_some() {
            return Err(ToolError::Provider(format!("page \"{title}\" does not exist")));
        }

        Ok(WikiPage {
            title: page["title"].as_str().unwrap_or(title).to_string(),
            url: page["fullurl"].as_str().unwrap_or_default().to_string(),
            summary: page["extract"].as_str().unwrap_or_default().trim().to_string(),
        })
    }

    async fn get_json(&self, params: &[(&str, &str)]) -> Result<Value, ToolError> {
        let body: Value = self
            .http
            .get(&self.api_url)
            .query(params)
            .send()
            .await?
            .error_for_status()?
            .json()
            .await?;

        if let Some(info) = body["error"]["info"].as_str() {
            return Err(ToolError::Provider(info.to_string()));
        }
        Ok(body)
    }
}

#[async_trait]
impl Tool for WikipediaTool {
    fn name(&self) -> &str {
        WIKIPEDIA_TOOL
    }

    async fn call(&self, args: &ToolArgs) -> Result<String, ToolError> {
        let query = required_str(args, "wikipedia_query")?;
        let titles = self.search(&query).await.map_err(|e| {
            ToolError::Provider(format!("Error during Wikipedia search for {query}: {e}"))
        })?;

        let mut out = String::new();
        for (i, title) in titles.iter().enumerate() {
            match self.page(title).await {
                Ok(page) => out.push_str(&format!(
                    "Page {} - Title: {}\nURL: {}\n - Summary: {}\n\n",
                    i + 1,
                    page.title,
                    page.url,
                    page.summary
                )),
                Err(e) => {
                    warn!(page = %title, "wikipedia page failed: {e}");
                    out.push_str(&format!("Error processing page {title}: {e}\n\n"));
                }
            }
        }

        if out.is_empty() {
            return Ok("No Wikipedia results found.".to_string());
        }
        Ok(out)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use wiremock::matchers::{method, query_param};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn args(query: &str) -> ToolArgs {
        let mut args = ToolArgs::new();
        args.insert("wikipedia_query".into(), json!(query));
        args
    }

    fn tool(server: &MockServer, pages: u32) -> WikipediaTool {
        let config = SearchConfig {
            wikipedia_pages: pages,
            ..SearchConfig::default()
        };
        WikipediaTool::new(&config)
            .unwrap()
            .with_api_url(format!("{}/w/api.php", server.uri()))
    }

    async fn mount_search(server: &MockServer, titles: &[&str]) {
        let hits: Vec<Value> = titles.iter().map(|t| json!({ "title": t })).collect();
        Mock::given(method("GET"))
            .and(query_param("list", "search"))
            .respond_with(
                ResponseTemplate::new(200).set_body_json(json!({ "query": { "search": hits } })),
            )
            .mount(server)
            .await;
    }

    async fn mount_page(server: &MockServer, title: &str, page: Value) {
        Mock::given(method("GET"))
            .and(query_param("prop", "extracts|info"))
            .and(query_param("titles", title))
            .respond_with(
                ResponseTemplate::new(200)
                    .set_body_json(json!({ "query": { "pages": { "1": page } } })),
            )
            .mount(server)
            .await;
    }

    #[test]
    fn api_url_follows_language() {
        let config = SearchConfig {
            wikipedia_lang: "fr".into(),
            ..SearchConfig::default()
        };
        let tool = WikipediaTool::new(&config).unwrap();
        assert_eq!(tool.api_url, "https://fr.wikipedia.org/w/api.php");
    }

    #[tokio::test]
    async fn formats_numbered_pages() {
        let server = MockServer::start().await;
        mount_search(&server, &["Rust (programming language)", "Rust"]).await;
        mount_page(
            &server,
            "Rust (programming language)",
            json!({
                "title": "Rust (programming language)",
                "fullurl": "https://en.wikipedia.org/wiki/Rust_(programming_language)",
                "extract": "Rust is a general-purpose programming language.\n"
            }),
        )
        .await;
        mount_page(
            &server,
            "Rust",
            json!({
                "title": "Rust",
                "fullurl": "https://en.wikipedia.org/wiki/Rust",
                "extract": "Rust is an iron oxide."
            }),
        )
        .await;

        let out = tool(&server, 3).call(&args("rust")).await.unwrap();
        assert_eq!(
            out,
            "Page 1 - Title: Rust (programming language)\n\
             URL: https://en.wikipedia.org/wiki/Rust_(programming_language)\n \
             - Summary: Rust is a general-purpose programming language.\n\n\
             Page 2 - Title: Rust\n\
             URL: https://en.wikipedia.org/wiki/Rust\n \
             - Summary: Rust is an iron oxide.\n\n"
        );
    }

    #[tokio::test]
    async fn page_count_is_capped() {
        let server = MockServer::start().await;
        mount_search(&server, &["A", "B", "C"]).await;
        for title in ["A", "B", "C"] {
            mount_page(
                &server,
                title,
                json!({ "title": title, "fullurl": "u", "extract": "x" }),
            )
            .await;
        }

        let out = tool(&server, 2).call(&args("letters")).await.unwrap();
        assert!(out.contains("Page 2 - Title: B"));
        assert!(!out.contains("Title: C"));
    }

    #[tokio::test]
    async fn missing_page_is_reported_inline() {
        let server = MockServer::start().await;
        mount_search(&server, &["Ghost", "Real"]).await;
        mount_page(&server, "Ghost", json!({ "title": "Ghost", "missing": "" })).await;
        mount_page(
            &server,
            "Real",
            json!({ "title": "Real", "fullurl": "u", "extract": "Exists." }),
        )
        .await;

        let out = tool(&server, 3).call(&args("ghost")).await.unwrap();
        assert!(out.starts_with("Error processing page Ghost: "));
        assert!(out.contains("Page 2 - Title: Real"));
    }

    #[tokio::test]
    async fn no_hits() {
        let server = MockServer::start().await;
        mount_search(&server, &[]).await;
        let out = tool(&server, 3).call(&args("qwxzv")).await.unwrap();
        assert_eq!(out, "No Wikipedia results found.");
    }

    #[tokio::test]
    async fn search_failure_names_the_query() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(
                ResponseTemplate::new(200)
                    .set_body_json(json!({ "error": { "code": "maxlag", "info": "Waiting for a database" } })),
            )
            .mount(&server)
            .await;

        let err = tool(&server, 3).call(&args("rust")).await.unwrap_err();
        assert_eq!(
            err.to_string(),
            "Error during Wikipedia search for rust: Waiting for a database"
        );
    }
}
