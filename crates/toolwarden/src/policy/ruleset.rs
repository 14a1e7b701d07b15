//! In-memory standing rules and auto-allow/auto-deny evaluation.
//!
//! The rule set is the live policy state for one run: session-scoped and
//! project-scoped allow/deny lists, trusted directories, and the current
//! permission mode. Incoming tool calls are checked here first; only calls
//! no standing rule covers escalate to a human decision.

use serde_json::Value;
use tracing::debug;

use crate::engine::{action_pattern, is_file_edit_tool, is_read_only_tool};
use crate::updates::{
    PermissionMode, PermissionRule, PermissionUpdate, RuleBehavior, UpdateDestination,
};

/// Rules and trusted directories for one destination.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DestinationRules {
    /// Rules that auto-allow matching invocations
    pub allow: Vec<PermissionRule>,
    /// Rules that auto-deny matching invocations
    pub deny: Vec<PermissionRule>,
    /// Directories the user has chosen to trust
    pub directories: Vec<String>,
}

/// Outcome of checking an invocation against standing rules.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Evaluation {
    /// A standing rule or the mode allows the call
    Allow {
        /// Which rule or mode allowed it
        reason: String,
    },
    /// A standing rule denies the call
    Deny {
        /// Which rule denied it
        reason: String,
    },
    /// No standing rule covers the call; a human decision is needed
    Ask,
}

impl Evaluation {
    /// Whether the call may proceed without prompting.
    pub fn is_allowed(&self) -> bool {
        matches!(self, Evaluation::Allow { .. })
    }

    /// Whether the call is blocked without prompting.
    pub fn is_denied(&self) -> bool {
        matches!(self, Evaluation::Deny { .. })
    }

    /// Whether a human decision is needed.
    pub fn needs_decision(&self) -> bool {
        matches!(self, Evaluation::Ask)
    }
}

/// Live policy state: mode plus per-destination rules.
///
/// # Example
///
/// ```
/// use serde_json::json;
/// use toolwarden::policy::RuleSet;
/// use toolwarden::updates::{
///     PermissionRule, PermissionUpdate, RuleBehavior, UpdateDestination,
/// };
///
/// let mut rules = RuleSet::new();
/// rules.apply(&PermissionUpdate::AddRules {
///     behavior: RuleBehavior::Allow,
///     rules: vec![PermissionRule::scoped("Bash", "git *")],
///     destination: UpdateDestination::Session,
/// });
///
/// let evaluation = rules.evaluate("Bash", &json!({ "command": "git status" }));
/// assert!(evaluation.is_allowed());
/// ```
#[derive(Debug, Clone, Default)]
pub struct RuleSet {
    /// Default behavior when no rule matches
    pub mode: PermissionMode,
    /// Session-scoped rules, discarded on restart
    pub session: DestinationRules,
    /// Project-scoped rules, persisted across restarts
    pub project: DestinationRules,
}

impl RuleSet {
    /// Empty rule set in the default mode.
    pub fn new() -> Self {
        Self::default()
    }

    /// Empty rule set in the given mode.
    pub fn with_mode(mode: PermissionMode) -> Self {
        Self {
            mode,
            ..Self::default()
        }
    }

    fn rules_for(&mut self, destination: UpdateDestination) -> &mut DestinationRules {
        match destination {
            UpdateDestination::Session => &mut self.session,
            UpdateDestination::ProjectSettings => &mut self.project,
        }
    }

    /// Apply one policy mutation.
    ///
    /// The match is exhaustive over the update union, so every operation
    /// shape is handled by construction.
    pub fn apply(&mut self, update: &PermissionUpdate) {
        match update {
            PermissionUpdate::AddRules {
                behavior,
                rules,
                destination,
            } => {
                let list = self.rules_for(*destination).list_mut(*behavior);
                list.extend(rules.iter().cloned());
            }
            PermissionUpdate::ReplaceRules {
                behavior,
                rules,
                destination,
            } => {
                *self.rules_for(*destination).list_mut(*behavior) = rules.clone();
            }
            PermissionUpdate::RemoveRules {
                behavior,
                rules,
                destination,
            } => {
                self.rules_for(*destination)
                    .list_mut(*behavior)
                    .retain(|rule| !rules.contains(rule));
            }
            PermissionUpdate::AddDirectories {
                directories,
                destination,
            } => {
                let list = &mut self.rules_for(*destination).directories;
                for directory in directories {
                    if !list.contains(directory) {
                        list.push(directory.clone());
                    }
                }
            }
            PermissionUpdate::RemoveDirectories {
                directories,
                destination,
            } => {
                self.rules_for(*destination)
                    .directories
                    .retain(|directory| !directories.contains(directory));
            }
            PermissionUpdate::SetMode { mode, .. } => {
                self.mode = *mode;
            }
        }
    }

    /// Apply a sequence of mutations in order.
    pub fn apply_all(&mut self, updates: &[PermissionUpdate]) {
        for update in updates {
            self.apply(update);
        }
    }

    /// Check an incoming tool call against the standing rules.
    ///
    /// Deny rules match first across both destinations, then allow rules,
    /// then the mode default. Matching runs over the call's canonical
    /// action pattern.
    pub fn evaluate(&self, tool_name: &str, input: &Value) -> Evaluation {
        let pattern = action_pattern(tool_name, input);

        for rule in self.deny_rules() {
            if rule.matches(tool_name, &pattern) {
                debug!(tool = tool_name, rule = %rule, "denied by standing rule");
                return Evaluation::Deny {
                    reason: format!("denied by rule {rule}"),
                };
            }
        }

        for rule in self.allow_rules() {
            if rule.matches(tool_name, &pattern) {
                debug!(tool = tool_name, rule = %rule, "allowed by standing rule");
                return Evaluation::Allow {
                    reason: format!("allowed by rule {rule}"),
                };
            }
        }

        match self.mode {
            PermissionMode::BypassPermissions => Evaluation::Allow {
                reason: "bypassPermissions mode".to_string(),
            },
            PermissionMode::Plan if is_read_only_tool(tool_name) => Evaluation::Allow {
                reason: "plan mode: read-only tool".to_string(),
            },
            PermissionMode::AcceptEdits
                if is_read_only_tool(tool_name) || is_file_edit_tool(tool_name) =>
            {
                Evaluation::Allow {
                    reason: "acceptEdits mode: file tool".to_string(),
                }
            }
            _ => Evaluation::Ask,
        }
    }

    fn deny_rules(&self) -> impl Iterator<Item = &PermissionRule> {
        self.session.deny.iter().chain(self.project.deny.iter())
    }

    fn allow_rules(&self) -> impl Iterator<Item = &PermissionRule> {
        self.session.allow.iter().chain(self.project.allow.iter())
    }

    /// All trusted directories, session first.
    pub fn directories(&self) -> impl Iterator<Item = &str> {
        self.session
            .directories
            .iter()
            .chain(self.project.directories.iter())
            .map(String::as_str)
    }
}

impl DestinationRules {
    fn list_mut(&mut self, behavior: RuleBehavior) -> &mut Vec<PermissionRule> {
        match behavior {
            RuleBehavior::Allow => &mut self.allow,
            RuleBehavior::Deny => &mut self.deny,
        }
    }
}
