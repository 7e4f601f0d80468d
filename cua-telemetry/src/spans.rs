//! Span helpers for tool, dispatch and sampling operations.

use tracing::Span;

/// Create a span for tool execution
///
/// # Example
/// ```
/// use cua_telemetry::tool_execute_span;
/// let span = tool_execute_span("browser", "call-1");
/// let _enter = span.enter();
/// ```
pub fn tool_execute_span(tool_name: &str, call_id: &str) -> Span {
    tracing::info_span!("tool.execute", tool.name = tool_name, call.id = call_id)
}

/// Create a span for one dispatched browser action
pub fn dispatch_span(action_kind: &str) -> Span {
    tracing::info_span!("browser.dispatch", action.kind = action_kind)
}

/// Create a span for a sampling round-trip to the caller's model
pub fn sampling_span(model_hint: Option<&str>) -> Span {
    tracing::debug_span!("sampling", model.hint = model_hint.unwrap_or("default"))
}
