//! Policy mutations: the update-operation data model and the synthesizer
//! that turns a human decision into an ordered mutation list.

mod synthesize;
mod types;

pub use synthesize::{ApprovalDecision, DecisionScope, synthesize_updates};
pub use types::{
    PermissionMode, PermissionRule, PermissionUpdate, RuleBehavior, UpdateDestination,
};
