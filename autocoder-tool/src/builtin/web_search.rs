use super::parse_args;
use autocoder_core::{AutocoderError, Result, Tool};
use async_trait::async_trait;
use serde::Deserialize;
use serde_json::{Value, json};

/// Serper Google-search endpoint.
pub const SERPER_API_URL: &str = "https://google.serper.dev/search";

/// Web search through the Serper API.
pub struct WebSearchTool {
    client: reqwest::Client,
    api_key: Option<String>,
    endpoint: String,
}

impl WebSearchTool {
    pub fn new(api_key: Option<String>) -> Self {
        Self {
            client: reqwest::Client::new(),
            api_key: api_key.filter(|key| !key.is_empty()),
            endpoint: SERPER_API_URL.to_string(),
        }
    }

    /// Read the key from `SERPER_API_KEY`.
    pub fn from_env() -> Self {
        Self::new(std::env::var("SERPER_API_KEY").ok())
    }

    pub fn with_endpoint(mut self, endpoint: impl Into<String>) -> Self {
        self.endpoint = endpoint.into();
        self
    }
}

fn default_num_results() -> usize {
    5
}

#[derive(Deserialize)]
struct Args {
    query: String,
    #[serde(default = "default_num_results")]
    num_results: usize,
}

#[derive(Deserialize)]
struct SerperResponse {
    #[serde(default)]
    organic: Vec<SerperResult>,
}

#[derive(Deserialize)]
struct SerperResult {
    #[serde(default)]
    title: String,
    #[serde(default)]
    link: String,
    #[serde(default)]
    snippet: String,
}

#[async_trait]
impl Tool for WebSearchTool {
    fn name(&self) -> &str {
        "web_search"
    }

    fn description(&self) -> &str {
        "Search the web and return the top results with title, link and snippet."
    }

    fn parameters_schema(&self) -> Value {
        json!({
            "type": "object",
            "properties": {
                "query": {"type": "string", "description": "Search query"},
                "num_results": {"type": "integer", "description": "Number of results (default: 5)"}
            },
            "required": ["query"]
        })
    }

    async fn execute(&self, args: Value) -> Result<Value> {
        let args: Args = parse_args(self.name(), args)?;
        let api_key = self
            .api_key
            .as_deref()
            .ok_or_else(|| AutocoderError::Tool("SERPER_API_KEY is not set".to_string()))?;

        let response = self
            .client
            .post(&self.endpoint)
            .header("X-API-KEY", api_key)
            .json(&json!({ "q": args.query, "num": args.num_results }))
            .send()
            .await
            .map_err(|e| AutocoderError::Tool(format!("Search request failed: {e}")))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(AutocoderError::Tool(format!("Search API error ({status}): {body}")));
        }

        let parsed: SerperResponse = response
            .json()
            .await
            .map_err(|e| AutocoderError::Tool(format!("Invalid search response: {e}")))?;

        let results: Vec<Value> = parsed
            .organic
            .into_iter()
            .take(args.num_results)
            .map(|r| json!({ "title": r.title, "link": r.link, "snippet": r.snippet }))
            .collect();

        tracing::debug!(query = %args.query, results = results.len(), "Web search completed");
        Ok(json!({ "results": results }))
    }
}
