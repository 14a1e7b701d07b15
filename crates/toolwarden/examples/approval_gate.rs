//! Full approval flow: escalate uncovered calls, persist "always" decisions.
//!
//! Run with: cargo run --example approval_gate

use std::sync::Arc;

use async_trait::async_trait;
use serde_json::json;
use toolwarden::error::WardenError;
use toolwarden::gate::{ApprovalHandler, ApprovalRequest, PermissionGate};
use toolwarden::policy::{PermissionSettings, RuleSet};
use toolwarden::updates::ApprovalDecision;

/// Stands in for a real approval dialog: trusts git permanently, denies
/// everything else once.
struct GitTrustingUser;

#[async_trait]
impl ApprovalHandler for GitTrustingUser {
    async fn decide(&self, request: &ApprovalRequest) -> Result<ApprovalDecision, WardenError> {
        println!("  prompt [{}]: {}", request.id, request.description);
        Ok(if request.pattern.starts_with("git ") {
            ApprovalDecision::AllowAlways
        } else {
            ApprovalDecision::Deny
        })
    }
}

#[tokio::main]
async fn main() -> Result<(), WardenError> {
    let gate = PermissionGate::new(RuleSet::new(), Arc::new(GitTrustingUser));

    let calls = [
        json!({ "command": "git status" }),
        // Covered by the rule the first decision created - no prompt
        json!({ "command": "git status" }),
        json!({ "command": "curl https://example.com" }),
    ];

    for input in &calls {
        let verdict = gate.check_tool_use("Bash", input, &[]).await?;
        println!("Bash {input} -> allowed: {}", verdict.is_allowed());
    }

    // The "always" decision is ready to be persisted
    let rules = gate.snapshot().await;
    let settings = PermissionSettings::from_rules(&rules.project, None);
    println!(
        "project settings:\n{}",
        serde_json::to_string_pretty(&settings)?
    );

    Ok(())
}
