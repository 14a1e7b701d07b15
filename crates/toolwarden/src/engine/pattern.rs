//! Canonical action patterns and human-readable descriptions for tool calls.
//!
//! Every proposed tool invocation is reduced to a single pattern string: the
//! essence of what the call is trying to do. The pattern doubles as the value
//! stored inside a permission rule and as the text shown to the user in an
//! approval prompt. Extraction is total: absent or mistyped fields degrade to
//! the wildcard sentinel or the empty string, never to an error.

use serde_json::Value;

/// Sentinel pattern matching any invocation of a tool.
pub const WILDCARD_PATTERN: &str = "*";

/// Derive the canonical pattern for a tool invocation.
///
/// Field conventions per tool (case-sensitive names):
///
/// | Tool | Pattern source |
/// |------|----------------|
/// | `Bash` | `command`, trimmed; empty string if not a string |
/// | `Read` / `Write` / `Edit` | `file_path`, or `"*"` if absent/empty |
/// | `NotebookEdit` | `notebook_path`, then `file_path`, then `"*"` |
/// | `Glob` / `Grep` | `pattern`, or `"*"` if absent/empty |
/// | anything else | compact JSON of the whole input, keys sorted |
///
/// # Example
///
/// ```
/// use serde_json::json;
/// use toolwarden::engine::action_pattern;
///
/// let pattern = action_pattern("Bash", &json!({ "command": "  git status " }));
/// assert_eq!(pattern, "git status");
///
/// let pattern = action_pattern("Read", &json!({}));
/// assert_eq!(pattern, "*");
/// ```
pub fn action_pattern(tool_name: &str, input: &Value) -> String {
    match tool_name {
        "Bash" => input
            .get("command")
            .and_then(Value::as_str)
            .map(str::trim)
            .unwrap_or_default()
            .to_string(),
        "Read" | "Write" | "Edit" => string_field(input, "file_path")
            .unwrap_or(WILDCARD_PATTERN)
            .to_string(),
        "NotebookEdit" => string_field(input, "notebook_path")
            .or_else(|| string_field(input, "file_path"))
            .unwrap_or(WILDCARD_PATTERN)
            .to_string(),
        "Glob" | "Grep" => string_field(input, "pattern")
            .unwrap_or(WILDCARD_PATTERN)
            .to_string(),
        // serde_json maps are sorted, so this serialization is stable
        _ => serde_json::to_string(input).unwrap_or_default(),
    }
}

/// Describe a tool invocation for an approval prompt.
///
/// The description always reflects the same value [`action_pattern`] returns
/// for the invocation.
///
/// # Example
///
/// ```
/// use serde_json::json;
/// use toolwarden::engine::describe;
///
/// let text = describe("Bash", &json!({ "command": "git status" }));
/// assert_eq!(text, "Run command: git status");
/// ```
pub fn describe(tool_name: &str, input: &Value) -> String {
    let pattern = action_pattern(tool_name, input);
    match tool_name {
        "Bash" => format!("Run command: {pattern}"),
        "Read" => format!("Read file: {pattern}"),
        "Write" => format!("Write to file: {pattern}"),
        "Edit" => format!("Edit file: {pattern}"),
        "NotebookEdit" => format!("Edit notebook: {pattern}"),
        "Glob" => format!("Search files matching: {pattern}"),
        "Grep" => format!("Search content matching: {pattern}"),
        _ => format!("{tool_name}: {pattern}"),
    }
}

/// Non-empty string field, or None.
fn string_field<'a>(input: &'a Value, field: &str) -> Option<&'a str> {
    input
        .get(field)
        .and_then(Value::as_str)
        .filter(|s| !s.is_empty())
}
