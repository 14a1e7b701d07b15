//! Turning an approval decision into an ordered list of policy mutations.

use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::debug;

use super::types::{PermissionRule, PermissionUpdate, RuleBehavior, UpdateDestination};
use crate::engine::action_pattern;

/// How a human answered an approval prompt.
///
/// The `-always` variants persist beyond the current session; the plain
/// variants last for the rest of it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ApprovalDecision {
    /// Allow for the rest of this session
    Allow,
    /// Allow and persist to project settings
    AllowAlways,
    /// Deny for the rest of this session
    Deny,
    /// Deny and persist to project settings
    DenyAlways,
}

/// How long a decision remains in force.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DecisionScope {
    /// For the rest of the current session
    Once,
    /// Persisted beyond the current session
    Always,
}

impl ApprovalDecision {
    /// The rule list this decision adds to.
    pub fn behavior(self) -> RuleBehavior {
        match self {
            ApprovalDecision::Allow | ApprovalDecision::AllowAlways => RuleBehavior::Allow,
            ApprovalDecision::Deny | ApprovalDecision::DenyAlways => RuleBehavior::Deny,
        }
    }

    /// Whether the decision is session-scoped or persistent.
    pub fn scope(self) -> DecisionScope {
        match self {
            ApprovalDecision::Allow | ApprovalDecision::Deny => DecisionScope::Once,
            ApprovalDecision::AllowAlways | ApprovalDecision::DenyAlways => DecisionScope::Always,
        }
    }

    /// The destination every mutation produced for this decision carries.
    pub fn destination(self) -> UpdateDestination {
        match self.scope() {
            DecisionScope::Once => UpdateDestination::Session,
            DecisionScope::Always => UpdateDestination::ProjectSettings,
        }
    }

    /// Whether the tool call may proceed.
    pub fn is_allowed(self) -> bool {
        self.behavior() == RuleBehavior::Allow
    }
}

/// Synthesize the policy mutations an approval decision should produce.
///
/// With no suggestions, the result is a single `AddRules` operation carrying
/// a rule built from the invocation's action pattern (wildcard pattern →
/// wildcard rule). With suggestions, each one has its destination overridden
/// to the decision's scope while every other field is preserved verbatim; a
/// fallback `AddRules` is prepended only when no suggestion already supplies
/// an `AddRules`/`ReplaceRules` operation, so a rule-adding operation is
/// always present exactly once and ahead of any directory or mode mutation.
///
/// Never fails and always returns at least one operation.
///
/// # Example
///
/// ```
/// use serde_json::json;
/// use toolwarden::updates::{
///     ApprovalDecision, PermissionUpdate, RuleBehavior, UpdateDestination, synthesize_updates,
/// };
///
/// let updates = synthesize_updates(
///     "Bash",
///     &json!({ "command": "git status" }),
///     ApprovalDecision::Allow,
///     &[],
/// );
///
/// match &updates[..] {
///     [PermissionUpdate::AddRules { behavior, rules, destination }] => {
///         assert_eq!(*behavior, RuleBehavior::Allow);
///         assert_eq!(*destination, UpdateDestination::Session);
///         assert_eq!(rules[0].rule_content.as_deref(), Some("git status"));
///     }
///     other => panic!("unexpected updates: {other:?}"),
/// }
/// ```
pub fn synthesize_updates(
    tool_name: &str,
    input: &Value,
    decision: ApprovalDecision,
    suggestions: &[PermissionUpdate],
) -> Vec<PermissionUpdate> {
    let destination = decision.destination();
    let fallback = PermissionUpdate::AddRules {
        behavior: decision.behavior(),
        rules: vec![PermissionRule::from_pattern(
            tool_name,
            action_pattern(tool_name, input),
        )],
        destination,
    };

    if suggestions.is_empty() {
        return vec![fallback];
    }

    let mut updates: Vec<PermissionUpdate> = suggestions
        .iter()
        .map(|suggestion| suggestion.with_destination(destination))
        .collect();

    if !updates.iter().any(PermissionUpdate::adds_rules) {
        updates.insert(0, fallback);
    }

    debug!(
        tool = tool_name,
        ?decision,
        count = updates.len(),
        "synthesized permission updates"
    );
    updates
}
