//! Web search tool backed by SerpAPI.

use async_trait::async_trait;
use serde_json::{json, Value};

use super::Tool;

/// Search the web via the SerpAPI Google engine.
pub struct WebSearch {
    api_key: String,
}

impl WebSearch {
    pub fn new(api_key: String) -> Self {
        Self { api_key }
    }
}

#[async_trait]
impl Tool for WebSearch {
    fn name(&self) -> &str {
        "web_search"
    }

    fn description(&self) -> &str {
        "Search the web for information. Returns search results with titles and snippets. Use for finding company websites, contact pages, or current business information."
    }

    fn parameters_schema(&self) -> Value {
        json!({
            "type": "object",
            "properties": {
                "query": {
                    "type": "string",
                    "description": "The search query"
                },
                "num_results": {
                    "type": "integer",
                    "description": "Maximum number of results to return (default: 5)"
                }
            },
            "required": ["query"]
        })
    }

    async fn execute(&self, args: Value) -> anyhow::Result<String> {
        let query = args["query"]
            .as_str()
            .ok_or_else(|| anyhow::anyhow!("Missing 'query' argument"))?;
        let num_results = args["num_results"].as_u64().unwrap_or(5);

        let url = format!(
            "https://serpapi.com/search.json?engine=google&q={}&num={}&api_key={}",
            urlencoding::encode(query),
            num_results,
            self.api_key
        );

        let client = reqwest::Client::builder()
            .user_agent("Mozilla/5.0 (compatible; CompanyScout/1.0)")
            .timeout(std::time::Duration::from_secs(30))
            .build()?;

        let response = client.get(&url).send().await?;
        let status = response.status();

        if !status.is_success() {
            return Err(anyhow::anyhow!("Search API error: {}", status));
        }

        let body: Value = response.json().await?;
        let results = format_organic_results(&body, num_results as usize);

        if results.is_empty() {
            Ok(format!("No results found for: {}", query))
        } else {
            Ok(results.join("\n\n"))
        }
    }
}

/// Render SerpAPI `organic_results` entries as title/snippet/URL blocks.
fn format_organic_results(body: &Value, limit: usize) -> Vec<String> {
    let Some(entries) = body["organic_results"].as_array() else {
        return Vec::new();
    };

    entries
        .iter()
        .take(limit)
        .filter_map(|entry| {
            let title = entry["title"].as_str()?;
            let snippet = entry["snippet"].as_str().unwrap_or("No snippet");
            let link = entry["link"].as_str().unwrap_or("");
            Some(format!("**{}**\n{}\nURL: {}", title, snippet, link))
        })
        .collect()
}
