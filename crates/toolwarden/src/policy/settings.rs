//! The durable project settings document.
//!
//! `projectSettings`-destined mutations survive restarts by being merged
//! into this JSON document. Rules are stored in their scoped string form
//! (`Tool` or `Tool(content)`), the same shape users write by hand in
//! project configuration.
//!
//! ```json
//! {
//!   "allow": ["Bash(git *)", "Read(/a/vault/notes)"],
//!   "deny": ["Bash(rm *)"],
//!   "additionalDirectories": ["/a/vault"],
//!   "defaultMode": "acceptEdits"
//! }
//! ```

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};
use tracing::debug;

use super::ruleset::DestinationRules;
use crate::error::WardenError;
use crate::updates::{PermissionMode, PermissionRule};

/// Persisted project-level permission settings.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct PermissionSettings {
    /// Allow rules in scoped string form
    pub allow: Vec<String>,

    /// Deny rules in scoped string form
    pub deny: Vec<String>,

    /// Trusted directories
    pub additional_directories: Vec<String>,

    /// Mode restored at startup
    #[serde(skip_serializing_if = "Option::is_none")]
    pub default_mode: Option<PermissionMode>,
}

impl PermissionSettings {
    /// Read and parse a settings document.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, WardenError> {
        let text = fs::read_to_string(path.as_ref())?;
        let settings = serde_json::from_str(&text)?;
        debug!(path = %path.as_ref().display(), "loaded permission settings");
        Ok(settings)
    }

    /// Serialize and write a settings document.
    pub fn save(&self, path: impl AsRef<Path>) -> Result<(), WardenError> {
        let text = serde_json::to_string_pretty(self)?;
        fs::write(path.as_ref(), text)?;
        debug!(path = %path.as_ref().display(), "saved permission settings");
        Ok(())
    }

    /// Build the document from typed project rules.
    pub fn from_rules(rules: &DestinationRules, default_mode: Option<PermissionMode>) -> Self {
        Self {
            allow: rules.allow.iter().map(ToString::to_string).collect(),
            deny: rules.deny.iter().map(ToString::to_string).collect(),
            additional_directories: rules.directories.clone(),
            default_mode,
        }
    }

    /// Parse the document into typed project rules.
    ///
    /// Fails on the first malformed rule string.
    pub fn to_rules(&self) -> Result<DestinationRules, WardenError> {
        Ok(DestinationRules {
            allow: self
                .allow
                .iter()
                .map(|text| parse_scoped(text))
                .collect::<Result<_, _>>()?,
            deny: self
                .deny
                .iter()
                .map(|text| parse_scoped(text))
                .collect::<Result<_, _>>()?,
            directories: self.additional_directories.clone(),
        })
    }
}

/// Parse a scoped rule string: `Tool` or `Tool(content)`.
///
/// `Tool` alone is a wildcard rule. An empty tool name, an unbalanced
/// parenthesis, or trailing text after the closing parenthesis is an error.
///
/// # Example
///
/// ```
/// use toolwarden::policy::parse_scoped;
/// use toolwarden::updates::PermissionRule;
///
/// assert_eq!(parse_scoped("Read").unwrap(), PermissionRule::wildcard("Read"));
/// assert_eq!(
///     parse_scoped("Bash(git *)").unwrap(),
///     PermissionRule::scoped("Bash", "git *")
/// );
/// assert!(parse_scoped("Bash(").is_err());
/// ```
pub fn parse_scoped(text: &str) -> Result<PermissionRule, WardenError> {
    let text = text.trim();
    let malformed = || WardenError::RuleParse {
        rule: text.to_string(),
    };

    if text.is_empty() {
        return Err(malformed());
    }

    let Some(open) = text.find('(') else {
        if text.contains(')') {
            return Err(malformed());
        }
        return Ok(PermissionRule::wildcard(text));
    };

    if open == 0 || !text.ends_with(')') {
        return Err(malformed());
    }

    let tool = &text[..open];
    let content = &text[open + 1..text.len() - 1];
    if content.is_empty() {
        // "Tool()" is the wildcard written explicitly
        return Ok(PermissionRule::wildcard(tool));
    }
    Ok(PermissionRule::scoped(tool, content))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_parse_bare_tool_is_wildcard() {
        assert_eq!(parse_scoped("Read").unwrap(), PermissionRule::wildcard("Read"));
        assert_eq!(parse_scoped("  Bash  ").unwrap(), PermissionRule::wildcard("Bash"));
    }

    #[test]
    fn test_parse_scoped_content() {
        assert_eq!(
            parse_scoped("Bash(git *)").unwrap(),
            PermissionRule::scoped("Bash", "git *")
        );
        assert_eq!(
            parse_scoped("Read(/a/vault/notes)").unwrap(),
            PermissionRule::scoped("Read", "/a/vault/notes")
        );
        // Inner parentheses belong to the content
        assert_eq!(
            parse_scoped("Bash(echo (x))").unwrap(),
            PermissionRule::scoped("Bash", "echo (x)")
        );
    }

    #[test]
    fn test_parse_empty_parens_is_wildcard() {
        assert_eq!(parse_scoped("Bash()").unwrap(), PermissionRule::wildcard("Bash"));
    }

    #[test]
    fn test_parse_rejects_malformed() {
        assert!(parse_scoped("").is_err());
        assert!(parse_scoped("Bash(").is_err());
        assert!(parse_scoped("(git *)").is_err());
        assert!(parse_scoped("Bash)").is_err());
        assert!(parse_scoped("Bash(git *) extra").is_err());
    }

    #[test]
    fn test_format_parse_roundtrip() {
        for rule in [
            PermissionRule::wildcard("Read"),
            PermissionRule::scoped("Bash", "git *"),
            PermissionRule::scoped("Read", "/a/vault/notes"),
        ] {
            assert_eq!(parse_scoped(&rule.to_string()).unwrap(), rule);
        }
    }

    #[test]
    fn test_settings_serialization_shape() {
        let settings = PermissionSettings {
            allow: vec!["Bash(git *)".to_string()],
            deny: vec!["Bash(rm *)".to_string()],
            additional_directories: vec!["/a/vault".to_string()],
            default_mode: Some(PermissionMode::AcceptEdits),
        };

        let value = serde_json::to_value(&settings).unwrap();
        assert_eq!(
            value,
            json!({
                "allow": ["Bash(git *)"],
                "deny": ["Bash(rm *)"],
                "additionalDirectories": ["/a/vault"],
                "defaultMode": "acceptEdits"
            })
        );
    }

    #[test]
    fn test_settings_deserialize_with_missing_fields() {
        let settings: PermissionSettings =
            serde_json::from_str(r#"{ "allow": ["Read"] }"#).unwrap();
        assert_eq!(settings.allow, vec!["Read"]);
        assert!(settings.deny.is_empty());
        assert!(settings.default_mode.is_none());
    }

    #[test]
    fn test_settings_to_rules_and_back() {
        let settings = PermissionSettings {
            allow: vec!["Bash(git *)".to_string(), "Read".to_string()],
            deny: vec!["Bash(rm *)".to_string()],
            additional_directories: vec!["/a/vault".to_string()],
            default_mode: None,
        };

        let rules = settings.to_rules().unwrap();
        assert_eq!(rules.allow.len(), 2);
        assert_eq!(rules.allow[1], PermissionRule::wildcard("Read"));
        assert_eq!(rules.deny[0], PermissionRule::scoped("Bash", "rm *"));

        let rebuilt = PermissionSettings::from_rules(&rules, None);
        assert_eq!(rebuilt, settings);
    }

    #[test]
    fn test_settings_to_rules_fails_on_malformed_entry() {
        let settings = PermissionSettings {
            allow: vec!["Bash(".to_string()],
            ..Default::default()
        };
        assert!(matches!(
            settings.to_rules(),
            Err(WardenError::RuleParse { .. })
        ));
    }

    #[test]
    fn test_load_save_roundtrip() {
        let path = std::env::temp_dir().join(format!(
            "toolwarden-settings-{}.json",
            uuid::Uuid::new_v4()
        ));

        let settings = PermissionSettings {
            allow: vec!["Bash(git *)".to_string()],
            deny: vec![],
            additional_directories: vec![],
            default_mode: Some(PermissionMode::Plan),
        };

        settings.save(&path).unwrap();
        let loaded = PermissionSettings::load(&path).unwrap();
        std::fs::remove_file(&path).unwrap();

        assert_eq!(loaded, settings);
    }

    #[test]
    fn test_load_missing_file_is_io_error() {
        let err = PermissionSettings::load("/nonexistent/settings.json").unwrap_err();
        assert!(matches!(err, WardenError::Io(_)));
    }

    #[test]
    fn test_load_invalid_json_is_decode_error() {
        let path = std::env::temp_dir().join(format!(
            "toolwarden-settings-{}.json",
            uuid::Uuid::new_v4()
        ));
        std::fs::write(&path, "{ not json").unwrap();

        let err = PermissionSettings::load(&path).unwrap_err();
        std::fs::remove_file(&path).unwrap();
        assert!(matches!(err, WardenError::JsonDecode(_)));
    }
}
