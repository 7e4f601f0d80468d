use async_trait::async_trait;
use cua_core::{
    BasicToolContext, CancellationToken, CuaError, Result, Sampler, SamplingRequest, Tool,
    ToolContext,
};
use cua_research::{DateTimeTool, ResearchConfig, ResearchTool, research_tools, run_research};
use serde_json::json;
use std::collections::{HashMap, VecDeque};
use std::sync::{Arc, Mutex};

/// Answers each model hint from its own queue and records every request.
#[derive(Default)]
struct ScriptedSampler {
    replies: Mutex<HashMap<String, VecDeque<String>>>,
    requests: Mutex<Vec<SamplingRequest>>,
}

impl ScriptedSampler {
    fn reply(self, hint: &str, text: &str) -> Self {
        self.replies
            .lock()
            .unwrap()
            .entry(hint.to_string())
            .or_default()
            .push_back(text.to_string());
        self
    }

    fn requests_for(&self, hint: &str) -> Vec<SamplingRequest> {
        self.requests
            .lock()
            .unwrap()
            .iter()
            .filter(|r| r.model_hint.as_deref() == Some(hint))
            .cloned()
            .collect()
    }

    fn hints(&self) -> Vec<String> {
        self.requests.lock().unwrap().iter().filter_map(|r| r.model_hint.clone()).collect()
    }
}

#[async_trait]
impl Sampler for ScriptedSampler {
    async fn sample(&self, request: SamplingRequest) -> Result<String> {
        let hint = request.model_hint.clone().unwrap_or_default();
        self.requests.lock().unwrap().push(request);
        self.replies
            .lock()
            .unwrap()
            .get_mut(&hint)
            .and_then(|queue| queue.pop_front())
            .ok_or_else(|| CuaError::Sampling(format!("no scripted reply for {hint}")))
    }
}

const INSUFFICIENT: &str =
    r#"{"is_sufficient": false, "knowledge_gap": "dates", "follow_up_query": "rust 2024 release date"}"#;
const SUFFICIENT: &str = r#"{"is_sufficient": true, "knowledge_gap": "", "follow_up_query": ""}"#;

#[tokio::test]
async fn test_stops_when_reflection_is_sufficient() {
    let sampler = ScriptedSampler::default()
        .reply("planner", r#"```json
{"searches": [{"reason": "background", "query": "rust editions"}]}
```"#)
        .reply("searchAgent", "editions happen every three years")
        .reply("searchAgent", "2024 edition shipped with 1.85")
        .reply("reflection", INSUFFICIENT)
        .reply("reflection", SUFFICIENT)
        .reply("writer", "# Report");

    let report =
        run_research(&sampler, "When was the 2024 edition?", &ResearchConfig::default())
            .await
            .unwrap();
    assert_eq!(report, "# Report");

    assert_eq!(
        sampler.hints(),
        vec!["planner", "searchAgent", "reflection", "searchAgent", "reflection", "writer"]
    );

    let searches = sampler.requests_for("searchAgent");
    assert_eq!(searches[0].prompt, "Search term: rust editions\nReason for searching: background");
    assert_eq!(
        searches[1].prompt,
        "Search term: rust 2024 release date\nReason for searching: background"
    );

    let reflections = sampler.requests_for("reflection");
    assert_eq!(
        reflections[1].prompt,
        "Original user query: When was the 2024 edition?\nSearch results: [\"editions happen every three years\",\"2024 edition shipped with 1.85\"]\n"
    );

    let writer = &sampler.requests_for("writer")[0];
    assert!(writer.prompt.starts_with("Current date and time: "));
    assert!(writer.prompt.contains("Original query: When was the 2024 edition?\n"));
    assert!(writer.prompt.ends_with(
        "Summarized search results: [\"editions happen every three years\",\"2024 edition shipped with 1.85\"]\n\n"
    ));
    assert_eq!(writer.max_tokens, 1_000_000);
}

#[tokio::test]
async fn test_loop_is_bounded() {
    let mut sampler = ScriptedSampler::default()
        .reply("planner", r#"{"searches": [{"reason": "r", "query": "q"}]}"#)
        .reply("writer", "done");
    for _ in 0..3 {
        sampler = sampler.reply("searchAgent", "more").reply("reflection", INSUFFICIENT);
    }

    let config = ResearchConfig::default().max_loops(3);
    let report = run_research(&sampler, "q", &config).await.unwrap();
    assert_eq!(report, "done");
    assert_eq!(sampler.requests_for("searchAgent").len(), 3);
    assert_eq!(sampler.requests_for("reflection").len(), 3);
}

#[tokio::test]
async fn test_each_planned_search_runs_in_order() {
    let sampler = ScriptedSampler::default()
        .reply(
            "planner",
            r#"{"searches": [{"reason": "a", "query": "first"}, {"reason": "b", "query": "second"}]}"#,
        )
        .reply("searchAgent", "one")
        .reply("searchAgent", "two")
        .reply("reflection", SUFFICIENT)
        .reply("reflection", SUFFICIENT)
        .reply("writer", "report");

    run_research(&sampler, "topic", &ResearchConfig::default()).await.unwrap();

    let searches = sampler.requests_for("searchAgent");
    assert!(searches[0].prompt.starts_with("Search term: first\n"));
    assert!(searches[1].prompt.starts_with("Search term: second\n"));
    // Reflection only sees the results of its own search.
    assert!(sampler.requests_for("reflection")[1].prompt.ends_with("Search results: [\"two\"]\n"));
}

#[tokio::test]
async fn test_invalid_plan_is_sampling_error() {
    let sampler = ScriptedSampler::default().reply("planner", "I would search for things");
    let err = run_research(&sampler, "q", &ResearchConfig::default()).await.unwrap_err();
    assert!(matches!(err, CuaError::Sampling(_)));
}

#[tokio::test]
async fn test_research_tool_needs_prompt_and_sampler() {
    let tool = ResearchTool::default();
    let ctx: Arc<dyn ToolContext> = Arc::new(BasicToolContext::new("call-1"));

    let err = tool.execute(ctx.clone(), json!({})).await.unwrap_err();
    assert!(err.is_invalid_argument());

    let err = tool.execute(ctx, json!({"prompt": "q"})).await.unwrap_err();
    assert!(matches!(err, CuaError::Sampling(_)));
}

#[tokio::test]
async fn test_research_tool_returns_report() {
    let sampler = Arc::new(
        ScriptedSampler::default()
            .reply("planner", r#"{"searches": []}"#)
            .reply("writer", "nothing to add"),
    );
    let ctx: Arc<dyn ToolContext> =
        Arc::new(BasicToolContext::new("call-1").with_sampler(sampler.clone()));

    let parts = ResearchTool::default().execute(ctx, json!({"prompt": "q"})).await.unwrap();
    assert_eq!(parts.len(), 1);
    assert_eq!(parts[0].as_text(), Some("nothing to add"));
}

#[tokio::test]
async fn test_research_tool_cancelled() {
    let sampler = Arc::new(ScriptedSampler::default());
    let cancel = CancellationToken::new();
    cancel.cancel();
    let ctx: Arc<dyn ToolContext> = Arc::new(
        BasicToolContext::new("call-1").with_sampler(sampler).with_cancellation(cancel),
    );

    let err = ResearchTool::default().execute(ctx, json!({"prompt": "q"})).await.unwrap_err();
    assert!(matches!(err, CuaError::Cancelled));
}

#[tokio::test]
async fn test_date_time_tool() {
    let ctx: Arc<dyn ToolContext> = Arc::new(BasicToolContext::new("call-1"));
    let parts = DateTimeTool::new().execute(ctx, json!({})).await.unwrap();
    let text = parts[0].as_text().unwrap();
    assert!(text.starts_with("The current date and time is "));
    assert_eq!(text.len(), "The current date and time is ".len() + 19);
}

#[test]
fn test_research_tools() {
    let names: Vec<_> = research_tools().iter().map(|t| t.name().to_string()).collect();
    assert_eq!(names, vec!["research", "get_date_time"]);
}
