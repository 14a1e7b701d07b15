//! Standing-rule storage: the live in-memory rule set and the persisted
//! project settings document it syncs with.

mod ruleset;
mod settings;

pub use ruleset::{DestinationRules, Evaluation, RuleSet};
pub use settings::{PermissionSettings, parse_scoped};
