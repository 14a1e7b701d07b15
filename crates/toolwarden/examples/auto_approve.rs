//! Evaluate tool calls against rules loaded from a settings document.
//!
//! Run with: cargo run --example auto_approve

use serde_json::json;
use toolwarden::policy::{PermissionSettings, RuleSet};

fn main() -> Result<(), toolwarden::error::WardenError> {
    // A project settings document as it would sit on disk
    let settings: PermissionSettings = serde_json::from_value(json!({
        "allow": ["Bash(git *)", "Read(/a/vault/notes)", "Grep"],
        "deny": ["Bash(rm *)"],
        "additionalDirectories": ["/a/vault"],
    }))?;

    let mut rules = RuleSet::new();
    rules.project = settings.to_rules()?;

    let calls = [
        ("Bash", json!({ "command": "git status" })),
        ("Bash", json!({ "command": "rm -rf /tmp/x" })),
        ("Bash", json!({ "command": "cargo build" })),
        ("Read", json!({ "file_path": "/a/vault/notes/todo.md" })),
        ("Read", json!({ "file_path": "/etc/passwd" })),
        ("Grep", json!({ "pattern": "TODO" })),
    ];

    for (tool, input) in &calls {
        let evaluation = rules.evaluate(tool, input);
        println!("{tool:>4} {input} -> {evaluation:?}");
    }

    Ok(())
}
