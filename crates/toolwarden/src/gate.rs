//! The approval gate: the seam between the engine and whatever collects a
//! human decision.
//!
//! The gate owns the live [`RuleSet`]. Incoming tool calls are checked
//! against standing rules; only uncovered calls escalate to the registered
//! [`ApprovalHandler`], whose decision is synthesized into policy mutations
//! and applied before the verdict is returned. The handler is the contract
//! boundary: how a decision is actually collected (dialog, TUI prompt,
//! scripted policy) is the host's business.

use std::sync::Arc;

use async_trait::async_trait;
use serde_json::Value;
use tokio::sync::RwLock;
use tracing::debug;
use uuid::Uuid;

use crate::engine::{action_pattern, describe};
use crate::error::WardenError;
use crate::policy::{Evaluation, RuleSet};
use crate::updates::{ApprovalDecision, PermissionUpdate, synthesize_updates};

/// One pending request for a human decision.
///
/// Built fresh per escalated call and not retained afterwards.
#[derive(Debug, Clone)]
pub struct ApprovalRequest {
    /// Unique id for correlating UI state with this request
    pub id: Uuid,

    /// Tool being invoked
    pub tool_name: String,

    /// The tool's structured input
    pub input: Value,

    /// Canonical action pattern, for display and auditing
    pub pattern: String,

    /// Human-readable summary of the call
    pub description: String,

    /// Externally suggested policy mutations, if any
    pub suggestions: Vec<PermissionUpdate>,
}

/// Collects a decision for an escalated tool call.
///
/// # Example
///
/// ```
/// use async_trait::async_trait;
/// use toolwarden::error::WardenError;
/// use toolwarden::gate::{ApprovalHandler, ApprovalRequest};
/// use toolwarden::updates::ApprovalDecision;
///
/// struct DenyShell;
///
/// #[async_trait]
/// impl ApprovalHandler for DenyShell {
///     async fn decide(
///         &self,
///         request: &ApprovalRequest,
///     ) -> Result<ApprovalDecision, WardenError> {
///         Ok(if request.tool_name == "Bash" {
///             ApprovalDecision::Deny
///         } else {
///             ApprovalDecision::Allow
///         })
///     }
/// }
/// ```
#[async_trait]
pub trait ApprovalHandler: Send + Sync {
    /// Produce a decision for the request.
    ///
    /// An `Err` means the handler itself failed (not that the user said
    /// no); the gate propagates it without mutating any state.
    async fn decide(&self, request: &ApprovalRequest) -> Result<ApprovalDecision, WardenError>;
}

/// Verdict for one tool invocation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ToolVerdict {
    /// Execution may proceed
    Allowed {
        /// Mutations applied to the rule set on the way (empty when a
        /// standing rule already covered the call)
        updates: Vec<PermissionUpdate>,
    },
    /// Execution is blocked
    Denied {
        /// Why the call was blocked
        reason: String,
        /// Mutations applied to the rule set on the way
        updates: Vec<PermissionUpdate>,
    },
}

impl ToolVerdict {
    /// Whether the tool call may proceed.
    pub fn is_allowed(&self) -> bool {
        matches!(self, ToolVerdict::Allowed { .. })
    }
}

/// Permission gate guarding tool execution.
///
/// Concurrent approval flows share the gate; only the rule set is behind a
/// lock, the matching itself is pure.
pub struct PermissionGate {
    rules: RwLock<RuleSet>,
    handler: Arc<dyn ApprovalHandler>,
}

impl PermissionGate {
    /// Gate over an initial rule set and a decision handler.
    pub fn new(rules: RuleSet, handler: Arc<dyn ApprovalHandler>) -> Self {
        Self {
            rules: RwLock::new(rules),
            handler,
        }
    }

    /// Snapshot of the current rule set.
    pub async fn snapshot(&self) -> RuleSet {
        self.rules.read().await.clone()
    }

    /// Check one proposed tool call, prompting if necessary.
    ///
    /// Standing rules resolve the call without prompting. Otherwise the
    /// handler is asked, its decision is synthesized into mutations
    /// (merging any `suggestions`), the mutations are applied to the rule
    /// set, and the verdict reports them so the host can persist the
    /// project-destined ones.
    pub async fn check_tool_use(
        &self,
        tool_name: &str,
        input: &Value,
        suggestions: &[PermissionUpdate],
    ) -> Result<ToolVerdict, WardenError> {
        let evaluation = self.rules.read().await.evaluate(tool_name, input);
        match evaluation {
            Evaluation::Allow { reason } => {
                debug!(tool = tool_name, reason = %reason, "auto-allowed");
                Ok(ToolVerdict::Allowed { updates: vec![] })
            }
            Evaluation::Deny { reason } => {
                debug!(tool = tool_name, reason = %reason, "auto-denied");
                Ok(ToolVerdict::Denied {
                    reason,
                    updates: vec![],
                })
            }
            Evaluation::Ask => {
                let request = ApprovalRequest {
                    id: Uuid::new_v4(),
                    tool_name: tool_name.to_string(),
                    input: input.clone(),
                    pattern: action_pattern(tool_name, input),
                    description: describe(tool_name, input),
                    suggestions: suggestions.to_vec(),
                };

                let decision = self.handler.decide(&request).await?;
                let updates = synthesize_updates(tool_name, input, decision, suggestions);

                self.rules.write().await.apply_all(&updates);
                debug!(tool = tool_name, ?decision, "decision applied");

                if decision.is_allowed() {
                    Ok(ToolVerdict::Allowed { updates })
                } else {
                    Ok(ToolVerdict::Denied {
                        reason: format!("denied by user: {}", request.description),
                        updates,
                    })
                }
            }
        }
    }
}
