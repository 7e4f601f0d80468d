//! Plan, search, reflect, write.

use async_trait::async_trait;
use cua_core::{
    CuaError, DEFAULT_MAX_TOKENS, Part, Result, Sampler, SamplingRequest, Tool, ToolContext,
};
use cua_telemetry::sampling_span;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::{Value, json};
use std::sync::Arc;
use tracing::Instrument;

/// Search/reflection rounds allowed per planned search.
pub const DEFAULT_MAX_LOOPS: usize = 5;

const PLANNER: &str = "planner";
const SEARCH_AGENT: &str = "searchAgent";
const REFLECTION: &str = "reflection";
const WRITER: &str = "writer";

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ResearchConfig {
    pub max_loops: usize,
    pub max_tokens: u32,
}

impl Default for ResearchConfig {
    fn default() -> Self {
        Self { max_loops: DEFAULT_MAX_LOOPS, max_tokens: DEFAULT_MAX_TOKENS }
    }
}

impl ResearchConfig {
    pub fn max_loops(mut self, max_loops: usize) -> Self {
        self.max_loops = max_loops;
        self
    }

    pub fn max_tokens(mut self, max_tokens: u32) -> Self {
        self.max_tokens = max_tokens;
        self
    }
}

/// One search proposed by the planner.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct PlannedSearch {
    #[serde(default)]
    pub reason: String,
    pub query: String,
}

#[derive(Debug, Deserialize)]
struct Plan {
    searches: Vec<PlannedSearch>,
}

#[derive(Debug, Deserialize)]
struct Reflection {
    is_sufficient: bool,
    #[serde(default)]
    knowledge_gap: String,
    #[serde(default)]
    follow_up_query: String,
}

/// Remove a surrounding Markdown code fence (with optional language tag).
pub fn strip_code_fences(text: &str) -> &str {
    let trimmed = text.trim();
    let Some(rest) = trimmed.strip_prefix("```") else {
        return trimmed;
    };
    let body = rest.split_once('\n').map_or(rest, |(_, body)| body);
    body.trim_end().strip_suffix("```").unwrap_or(body).trim()
}

fn parse_model_json<T: DeserializeOwned>(stage: &str, text: &str) -> Result<T> {
    serde_json::from_str(strip_code_fences(text))
        .map_err(|e| CuaError::Sampling(format!("{stage} returned invalid JSON: {e}")))
}

struct Research<'a> {
    sampler: &'a dyn Sampler,
    config: &'a ResearchConfig,
}

impl Research<'_> {
    async fn ask(&self, hint: &str, prompt: String) -> Result<String> {
        let request =
            SamplingRequest::new(prompt).model_hint(hint).max_tokens(self.config.max_tokens);
        self.sampler.sample(request).instrument(sampling_span(Some(hint))).await
    }

    /// Search, then reflect, until the reflection is satisfied or the loop
    /// budget runs out. Returns every search result in order.
    async fn investigate(&self, prompt: &str, search: &PlannedSearch) -> Result<Vec<String>> {
        let mut results = Vec::new();
        let mut query = search.query.clone();

        for round in 0..self.config.max_loops {
            let found = self
                .ask(
                    SEARCH_AGENT,
                    format!("Search term: {query}\nReason for searching: {}", search.reason),
                )
                .await?;
            results.push(found);

            let reflection = self
                .ask(
                    REFLECTION,
                    format!(
                        "Original user query: {prompt}\nSearch results: {}\n",
                        serde_json::to_string(&results)?
                    ),
                )
                .await?;
            let reflection: Reflection = parse_model_json(REFLECTION, &reflection)?;

            if reflection.is_sufficient {
                tracing::debug!(round, query = %query, "search sufficient");
                break;
            }
            tracing::debug!(round, gap = %reflection.knowledge_gap, "search insufficient");
            if !reflection.follow_up_query.trim().is_empty() {
                query = reflection.follow_up_query;
            }
        }
        Ok(results)
    }
}

/// Drive the full research loop against `sampler` and return the report.
pub async fn run_research(
    sampler: &dyn Sampler,
    prompt: &str,
    config: &ResearchConfig,
) -> Result<String> {
    let research = Research { sampler, config };

    let plan = research.ask(PLANNER, format!("Query: {prompt}")).await?;
    let plan: Plan = parse_model_json(PLANNER, &plan)?;
    tracing::info!(searches = plan.searches.len(), "research planned");

    let mut collected = Vec::new();
    for search in &plan.searches {
        collected.extend(research.investigate(prompt, search).await?);
    }

    let now = chrono::Utc::now().to_rfc3339_opts(chrono::SecondsFormat::Millis, true);
    research
        .ask(
            WRITER,
            format!(
                "Current date and time: {now}\nOriginal query: {prompt}\nSummarized search results: {}\n\n",
                serde_json::to_string(&collected)?
            ),
        )
        .await
}

/// Multi-step web research answered by the caller's own models.
pub struct ResearchTool {
    config: ResearchConfig,
}

impl ResearchTool {
    pub fn new(config: ResearchConfig) -> Self {
        Self { config }
    }
}

impl Default for ResearchTool {
    fn default() -> Self {
        Self::new(ResearchConfig::default())
    }
}

#[async_trait]
impl Tool for ResearchTool {
    fn name(&self) -> &str {
        "research"
    }

    fn description(&self) -> &str {
        "Research a topic: plan searches, refine them until the results are sufficient, and write a report."
    }

    fn parameters_schema(&self) -> Option<Value> {
        Some(json!({
            "type": "object",
            "properties": {
                "prompt": {
                    "type": "string",
                    "description": "The research question"
                }
            },
            "required": ["prompt"]
        }))
    }

    async fn execute(&self, ctx: Arc<dyn ToolContext>, args: Value) -> Result<Vec<Part>> {
        let prompt = args
            .get("prompt")
            .and_then(|v| v.as_str())
            .ok_or_else(|| CuaError::InvalidArgument("Missing 'prompt' parameter".to_string()))?;
        let sampler = ctx.sampler().ok_or_else(|| {
            CuaError::Sampling("The client does not support sampling".to_string())
        })?;

        let cancel = ctx.cancellation_token();
        let report = tokio::select! {
            biased;
            _ = cancel.cancelled() => return Err(CuaError::Cancelled),
            report = run_research(sampler.as_ref(), prompt, &self.config) => report?,
        };
        Ok(vec![Part::text(report)])
    }
}
