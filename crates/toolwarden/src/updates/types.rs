//! Rule, destination, and update-operation types.
//!
//! These types form the wire contract with the agent runtime's own
//! permission-suggestion feature: field names are camelCase and the update
//! union is internally tagged on `type`, so suggestion JSON deserializes
//! directly into [`PermissionUpdate`].
//!
//! # Wire format
//!
//! ```text
//! {
//!   "type": "addRules",
//!   "behavior": "allow",
//!   "rules": [{ "toolName": "Bash", "ruleContent": "git *" }],
//!   "destination": "projectSettings"
//! }
//! ```

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::engine::WILDCARD_PATTERN;

/// A stored permission rule: a tool name plus an optional content pattern.
///
/// `rule_content` of `None` is a wildcard rule matching any invocation of
/// the tool.
///
/// # Example
///
/// ```
/// use toolwarden::updates::PermissionRule;
///
/// let rule = PermissionRule::scoped("Bash", "git *");
/// assert!(rule.matches("Bash", "git status"));
/// assert!(!rule.matches("Bash", "npm install"));
/// assert!(!rule.matches("Read", "git status"));
///
/// let any_read = PermissionRule::wildcard("Read");
/// assert!(any_read.matches("Read", "/any/file"));
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PermissionRule {
    /// Tool the rule applies to
    pub tool_name: String,

    /// Content pattern; `None` matches any invocation of the tool
    #[serde(skip_serializing_if = "Option::is_none")]
    pub rule_content: Option<String>,
}

impl PermissionRule {
    /// Rule matching any invocation of `tool_name`.
    pub fn wildcard(tool_name: impl Into<String>) -> Self {
        Self {
            tool_name: tool_name.into(),
            rule_content: None,
        }
    }

    /// Rule matching invocations whose action pattern matches `content`.
    pub fn scoped(tool_name: impl Into<String>, content: impl Into<String>) -> Self {
        Self {
            tool_name: tool_name.into(),
            rule_content: Some(content.into()),
        }
    }

    /// Rule from a computed action pattern.
    ///
    /// The wildcard sentinel becomes a wildcard rule; any other pattern is
    /// stored verbatim.
    pub fn from_pattern(tool_name: impl Into<String>, pattern: impl Into<String>) -> Self {
        let pattern = pattern.into();
        if pattern == WILDCARD_PATTERN {
            Self::wildcard(tool_name)
        } else {
            Self::scoped(tool_name, pattern)
        }
    }

    /// Whether this rule covers the given invocation.
    pub fn matches(&self, tool_name: &str, action_pattern: &str) -> bool {
        self.tool_name == tool_name
            && crate::engine::rule_matches(tool_name, action_pattern, self.rule_content.as_deref())
    }
}

impl fmt::Display for PermissionRule {
    /// Scoped string form: `Tool` or `Tool(content)`.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.rule_content {
            Some(content) => write!(f, "{}({})", self.tool_name, content),
            None => f.write_str(&self.tool_name),
        }
    }
}

/// Which rule list an operation concerns.
///
/// On removal and replacement operations this names the list being edited,
/// independent of the decision that triggered the operation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RuleBehavior {
    /// The allow-list
    Allow,
    /// The deny-list
    Deny,
}

/// Scope of a policy mutation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum UpdateDestination {
    /// Lives only for the current run; discarded on restart
    Session,
    /// Persisted to durable project configuration
    ProjectSettings,
}

/// Default behavior when no standing rule matches an invocation.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum PermissionMode {
    /// Prompt for anything not covered by a rule
    #[default]
    Default,
    /// File edits proceed without prompting
    AcceptEdits,
    /// Everything proceeds without prompting
    BypassPermissions,
    /// Only read-only tools proceed without prompting
    Plan,
}

/// A single, self-contained policy mutation.
///
/// Emitted by the synthesizer and applied by the policy store. The union is
/// exhaustive: consumers match over every variant at compile time, so no
/// suggestion shape can silently fall through.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "camelCase")]
pub enum PermissionUpdate {
    /// Append rules to a destination's allow- or deny-list
    #[serde(rename_all = "camelCase")]
    AddRules {
        /// List the rules are added to
        behavior: RuleBehavior,
        /// Rules to add, in order
        rules: Vec<PermissionRule>,
        /// Where the rules live
        destination: UpdateDestination,
    },

    /// Replace a destination's allow- or deny-list wholesale
    #[serde(rename_all = "camelCase")]
    ReplaceRules {
        /// List being replaced
        behavior: RuleBehavior,
        /// The new list contents, in order
        rules: Vec<PermissionRule>,
        /// Where the rules live
        destination: UpdateDestination,
    },

    /// Remove rules from a destination's allow- or deny-list
    #[serde(rename_all = "camelCase")]
    RemoveRules {
        /// List the rules are removed from
        behavior: RuleBehavior,
        /// Rules to remove
        rules: Vec<PermissionRule>,
        /// Where the rules live
        destination: UpdateDestination,
    },

    /// Trust additional directories
    #[serde(rename_all = "camelCase")]
    AddDirectories {
        /// Directory paths to add, in order
        directories: Vec<String>,
        /// Where the directories are recorded
        destination: UpdateDestination,
    },

    /// Stop trusting directories
    #[serde(rename_all = "camelCase")]
    RemoveDirectories {
        /// Directory paths to remove
        directories: Vec<String>,
        /// Where the directories are recorded
        destination: UpdateDestination,
    },

    /// Change the permission mode
    #[serde(rename_all = "camelCase")]
    SetMode {
        /// The new mode
        mode: PermissionMode,
        /// Where the mode is recorded
        destination: UpdateDestination,
    },
}

impl PermissionUpdate {
    /// The destination this operation targets.
    pub fn destination(&self) -> UpdateDestination {
        match self {
            PermissionUpdate::AddRules { destination, .. }
            | PermissionUpdate::ReplaceRules { destination, .. }
            | PermissionUpdate::RemoveRules { destination, .. }
            | PermissionUpdate::AddDirectories { destination, .. }
            | PermissionUpdate::RemoveDirectories { destination, .. }
            | PermissionUpdate::SetMode { destination, .. } => *destination,
        }
    }

    /// Copy of this operation with its destination overridden.
    ///
    /// Every other field is preserved verbatim, including `behavior` on
    /// removal operations.
    pub fn with_destination(&self, destination: UpdateDestination) -> Self {
        let mut update = self.clone();
        match &mut update {
            PermissionUpdate::AddRules { destination: d, .. }
            | PermissionUpdate::ReplaceRules { destination: d, .. }
            | PermissionUpdate::RemoveRules { destination: d, .. }
            | PermissionUpdate::AddDirectories { destination: d, .. }
            | PermissionUpdate::RemoveDirectories { destination: d, .. }
            | PermissionUpdate::SetMode { destination: d, .. } => *d = destination,
        }
        update
    }

    /// Whether this operation supplies a new-rule list (`AddRules` or
    /// `ReplaceRules`).
    pub fn adds_rules(&self) -> bool {
        matches!(
            self,
            PermissionUpdate::AddRules { .. } | PermissionUpdate::ReplaceRules { .. }
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_rule_display_scoped_form() {
        assert_eq!(PermissionRule::wildcard("Read").to_string(), "Read");
        assert_eq!(
            PermissionRule::scoped("Bash", "git *").to_string(),
            "Bash(git *)"
        );
    }

    #[test]
    fn test_rule_from_pattern_wildcard_sentinel() {
        let rule = PermissionRule::from_pattern("Read", "*");
        assert_eq!(rule.rule_content, None);

        let rule = PermissionRule::from_pattern("Bash", "git status");
        assert_eq!(rule.rule_content, Some("git status".to_string()));
    }

    #[test]
    fn test_rule_serialization_omits_absent_content() {
        let json = serde_json::to_value(PermissionRule::wildcard("Read")).unwrap();
        assert_eq!(json, json!({ "toolName": "Read" }));

        let json = serde_json::to_value(PermissionRule::scoped("Bash", "git *")).unwrap();
        assert_eq!(json, json!({ "toolName": "Bash", "ruleContent": "git *" }));
    }

    #[test]
    fn test_rule_matches_requires_tool_name() {
        let rule = PermissionRule::scoped("Bash", "git *");
        assert!(rule.matches("Bash", "git status"));
        assert!(!rule.matches("Read", "git status"));
    }

    #[test]
    fn test_destination_wire_names() {
        assert_eq!(
            serde_json::to_string(&UpdateDestination::Session).unwrap(),
            r#""session""#
        );
        assert_eq!(
            serde_json::to_string(&UpdateDestination::ProjectSettings).unwrap(),
            r#""projectSettings""#
        );
    }

    #[test]
    fn test_mode_wire_names() {
        assert_eq!(
            serde_json::to_string(&PermissionMode::AcceptEdits).unwrap(),
            r#""acceptEdits""#
        );
        assert_eq!(
            serde_json::to_string(&PermissionMode::BypassPermissions).unwrap(),
            r#""bypassPermissions""#
        );
    }

    #[test]
    fn test_update_add_rules_wire_shape() {
        let update = PermissionUpdate::AddRules {
            behavior: RuleBehavior::Allow,
            rules: vec![PermissionRule::scoped("Bash", "git *")],
            destination: UpdateDestination::ProjectSettings,
        };

        let json = serde_json::to_value(&update).unwrap();
        assert_eq!(json["type"], "addRules");
        assert_eq!(json["behavior"], "allow");
        assert_eq!(json["destination"], "projectSettings");
        assert_eq!(json["rules"][0]["toolName"], "Bash");
        assert_eq!(json["rules"][0]["ruleContent"], "git *");
    }

    #[test]
    fn test_update_set_mode_roundtrip() {
        let update = PermissionUpdate::SetMode {
            mode: PermissionMode::Plan,
            destination: UpdateDestination::Session,
        };

        let text = serde_json::to_string(&update).unwrap();
        let parsed: PermissionUpdate = serde_json::from_str(&text).unwrap();
        assert_eq!(parsed, update);
    }

    #[test]
    fn test_update_deserializes_sdk_suggestion_json() {
        let suggestion = json!({
            "type": "removeRules",
            "behavior": "deny",
            "rules": [{ "toolName": "Bash", "ruleContent": "git push:*" }],
            "destination": "session"
        });

        let parsed: PermissionUpdate = serde_json::from_value(suggestion).unwrap();
        match &parsed {
            PermissionUpdate::RemoveRules {
                behavior, rules, ..
            } => {
                assert_eq!(*behavior, RuleBehavior::Deny);
                assert_eq!(rules[0].rule_content.as_deref(), Some("git push:*"));
            }
            other => panic!("wrong variant: {other:?}"),
        }
    }

    #[test]
    fn test_with_destination_preserves_other_fields() {
        let update = PermissionUpdate::RemoveRules {
            behavior: RuleBehavior::Deny,
            rules: vec![PermissionRule::wildcard("Bash")],
            destination: UpdateDestination::Session,
        };

        let moved = update.with_destination(UpdateDestination::ProjectSettings);
        match &moved {
            PermissionUpdate::RemoveRules {
                behavior,
                rules,
                destination,
            } => {
                assert_eq!(*behavior, RuleBehavior::Deny);
                assert_eq!(rules.len(), 1);
                assert_eq!(*destination, UpdateDestination::ProjectSettings);
            }
            other => panic!("wrong variant: {other:?}"),
        }
    }

    #[test]
    fn test_adds_rules_predicate() {
        let destination = UpdateDestination::Session;
        assert!(
            PermissionUpdate::AddRules {
                behavior: RuleBehavior::Allow,
                rules: vec![],
                destination,
            }
            .adds_rules()
        );
        assert!(
            PermissionUpdate::ReplaceRules {
                behavior: RuleBehavior::Allow,
                rules: vec![],
                destination,
            }
            .adds_rules()
        );
        assert!(
            !PermissionUpdate::RemoveRules {
                behavior: RuleBehavior::Deny,
                rules: vec![],
                destination,
            }
            .adds_rules()
        );
        assert!(
            !PermissionUpdate::SetMode {
                mode: PermissionMode::Default,
                destination,
            }
            .adds_rules()
        );
    }
}
