//! Matching action patterns against stored rule patterns.
//!
//! Bash and the path-bearing file tools need boundary-aware matching so that
//! `git:*` cannot match `github` and `/a/notes` cannot match `/a/notes2`.
//! Search-pattern tools are already wildcard expressions, so a plain prefix
//! suffices for them.

use super::pattern::WILDCARD_PATTERN;

/// Decide whether a stored rule pattern matches a canonical action pattern.
///
/// `rule_pattern` of `None` is an unrestricted rule and matches everything,
/// as does the `"*"` sentinel. Exact equality matches for every tool before
/// any tool-specific logic runs.
///
/// # Example
///
/// ```
/// use toolwarden::engine::rule_matches;
///
/// assert!(rule_matches("Bash", "git status", Some("git *")));
/// assert!(rule_matches("Bash", "npm install", Some("npm:*")));
/// assert!(!rule_matches("Bash", "npmish install", Some("npm:*")));
/// assert!(rule_matches("Read", "/v/notes/f.md", Some("/v/notes")));
/// assert!(rule_matches("Grep", "anything", None));
/// ```
pub fn rule_matches(tool_name: &str, action_pattern: &str, rule_pattern: Option<&str>) -> bool {
    let rule = match rule_pattern {
        None => return true,
        Some(rule) => rule,
    };
    if rule == WILDCARD_PATTERN || rule == action_pattern {
        return true;
    }

    match tool_name {
        "Bash" => bash_matches(action_pattern, rule),
        "Read" | "Write" | "Edit" | "NotebookEdit" => path_matches(action_pattern, rule),
        _ => action_pattern.starts_with(rule),
    }
}

/// Bash rules support two wildcard forms.
///
/// `"git *"` is a space-wildcard: the command must start with `"git "`.
/// `"npm:*"` is a colon-wildcard with a word/segment boundary: it matches
/// `"npm"` and `"npm install"` and `"npm:ci"`, but not `"npmish install"`.
fn bash_matches(command: &str, rule: &str) -> bool {
    if rule.ends_with(" *") {
        // Keep the trailing space in the prefix
        let prefix = &rule[..rule.len() - 1];
        return command.starts_with(prefix);
    }
    if let Some(base) = rule.strip_suffix(":*") {
        return match command.strip_prefix(base) {
            Some(rest) => rest.is_empty() || rest.starts_with(' ') || rest.starts_with(':'),
            None => false,
        };
    }
    false
}

/// Path rules match the exact path or any path inside it.
///
/// Backslash separators normalize to forward slashes on both sides, and the
/// prefix must end at a `/` boundary: `/a/notes` covers `/a/notes/f.md` but
/// not `/a/notes2/f.md`.
fn path_matches(action: &str, rule: &str) -> bool {
    let action = action.replace('\\', "/");
    let rule = rule.replace('\\', "/");
    action == rule
        || action
            .strip_prefix(rule.as_str())
            .is_some_and(|rest| rest.starts_with('/'))
}
