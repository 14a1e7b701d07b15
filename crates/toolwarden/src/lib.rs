//! Toolwarden - tool-invocation permission engine for Claude-style coding agents
//!
//! An agent that can run shell commands, edit files, and search content needs
//! a policy layer in front of every sensitive tool call. Toolwarden is that
//! layer: it reduces each proposed call to a canonical action pattern, checks
//! the pattern against standing allow/deny rules, and turns a human
//! approve/deny decision into the ordered list of policy mutations the host
//! should apply and persist.
//!
//! # Overview
//!
//! The crate is organized around a small pure core and the state it drives:
//!
//! - `engine`: pattern extraction, rule matching, and path classification.
//!   Stateless functions, total over their inputs.
//! - `updates`: the policy-mutation data model ([`updates::PermissionUpdate`]
//!   is an exhaustive tagged union matching the agent SDK's suggestion wire
//!   shape) and the synthesizer that merges suggestions with a locally built
//!   fallback rule.
//! - `policy`: the live [`policy::RuleSet`] with auto-allow/auto-deny
//!   evaluation, and the persisted project settings document.
//! - `gate`: the async seam where uncovered calls escalate to an
//!   [`gate::ApprovalHandler`] for a decision.
//!
//! # Example
//!
//! ```rust
//! use std::sync::Arc;
//!
//! use async_trait::async_trait;
//! use serde_json::json;
//! use toolwarden::prelude::*;
//!
//! struct ApproveGitForever;
//!
//! #[async_trait]
//! impl ApprovalHandler for ApproveGitForever {
//!     async fn decide(
//!         &self,
//!         request: &ApprovalRequest,
//!     ) -> Result<ApprovalDecision, WardenError> {
//!         Ok(if request.pattern.starts_with("git ") {
//!             ApprovalDecision::AllowAlways
//!         } else {
//!             ApprovalDecision::Deny
//!         })
//!     }
//! }
//!
//! # #[tokio::main(flavor = "current_thread")]
//! # async fn main() -> Result<(), WardenError> {
//! let gate = PermissionGate::new(RuleSet::new(), Arc::new(ApproveGitForever));
//!
//! let verdict = gate
//!     .check_tool_use("Bash", &json!({ "command": "git status" }), &[])
//!     .await?;
//! assert!(verdict.is_allowed());
//!
//! // The decision became a project-scoped standing rule
//! let rules = gate.snapshot().await;
//! assert_eq!(rules.project.allow[0].to_string(), "Bash(git status)");
//! # Ok(())
//! # }
//! ```
//!
//! # License
//!
//! Licensed under MIT. See LICENSE file for details.

#![warn(missing_docs)]
#![warn(clippy::all)]

/// The pure matching core
///
/// Canonical action patterns and descriptions for tool calls
/// ([`engine::action_pattern`], [`engine::describe`]), rule matching with
/// boundary-aware Bash and path semantics ([`engine::rule_matches`]), and
/// platform-aware path-token classification ([`engine::is_path_like`]).
pub mod engine;

/// Policy mutations and the decision synthesizer
///
/// [`updates::PermissionUpdate`] is the exhaustive union of mutation shapes
/// exchanged with the agent runtime; [`updates::synthesize_updates`] turns an
/// [`updates::ApprovalDecision`] plus optional suggestions into the ordered
/// mutation list the store applies.
pub mod updates;

/// Standing-rule storage
///
/// The live [`policy::RuleSet`] (session + project rules, trusted
/// directories, mode) with deny-first evaluation, and the persisted
/// [`policy::PermissionSettings`] document.
pub mod policy;

/// The async approval seam
///
/// [`gate::PermissionGate`] checks calls against standing rules and
/// escalates uncovered ones to an [`gate::ApprovalHandler`].
pub mod gate;

/// Error types and utilities
///
/// This module defines [`error::WardenError`], covering the crate's ambient
/// failure surfaces; the matching core itself is total and never fails.
pub mod error;

// Prelude module for common imports
pub mod prelude {
    //! Common imports for toolwarden users
    //!
    //! Use `use toolwarden::prelude::*;` to import commonly used types.

    pub use crate::engine::{
        Platform, action_pattern, describe, is_path_like, rule_matches, WILDCARD_PATTERN,
    };
    pub use crate::error::WardenError;
    pub use crate::gate::{ApprovalHandler, ApprovalRequest, PermissionGate, ToolVerdict};
    pub use crate::policy::{
        DestinationRules, Evaluation, PermissionSettings, RuleSet, parse_scoped,
    };
    pub use crate::updates::{
        ApprovalDecision, DecisionScope, PermissionMode, PermissionRule, PermissionUpdate,
        RuleBehavior, UpdateDestination, synthesize_updates,
    };
}
