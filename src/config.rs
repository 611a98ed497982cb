//! Rewrite configuration
//!
//! Every structural name the rewrite looks for or emits lives here rather
//! than in the matcher or rewriter. Defaults describe the zlint migration
//! from `RegisterLint(&Lint{...})` to
//! `RegisterCertificateLint(&CertificateLint{...})`.

use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};

/// Structural names used by the matcher and rewriter
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RewriteConfig {
    /// Member name of the call to rewrite (`x.<target_selector>(...)`)
    #[serde(default = "default_target_selector")]
    pub target_selector: String,

    /// Field whose value becomes the payload
    #[serde(default = "default_payload_key")]
    pub payload_key: String,

    /// Package qualifier used for every emitted name
    #[serde(default = "default_namespace")]
    pub namespace: String,

    /// Member name of the emitted call
    #[serde(default = "default_register_function")]
    pub register_function: String,

    /// Type of the emitted top-level composite
    #[serde(default = "default_result_type")]
    pub result_type: String,

    /// Type of the emitted metadata composite
    #[serde(default = "default_metadata_type")]
    pub metadata_type: String,

    /// Field name holding the metadata composite
    #[serde(default = "default_metadata_key")]
    pub metadata_key: String,

    /// What to do when the payload key never appears
    #[serde(default)]
    pub missing_payload: MissingPayload,
}

/// Policy for a matched call that never assigns the payload key
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MissingPayload {
    /// Abort the file
    #[default]
    Error,
    /// Emit the payload field with a `nil` value
    EmitNil,
}

fn default_target_selector() -> String {
    "RegisterLint".to_string()
}

fn default_payload_key() -> String {
    "Lint".to_string()
}

fn default_namespace() -> String {
    "lint".to_string()
}

fn default_register_function() -> String {
    "RegisterCertificateLint".to_string()
}

fn default_result_type() -> String {
    "CertificateLint".to_string()
}

fn default_metadata_type() -> String {
    "LintMetadata".to_string()
}

fn default_metadata_key() -> String {
    "LintMetadata".to_string()
}

impl Default for RewriteConfig {
    fn default() -> Self {
        Self {
            target_selector: default_target_selector(),
            payload_key: default_payload_key(),
            namespace: default_namespace(),
            register_function: default_register_function(),
            result_type: default_result_type(),
            metadata_type: default_metadata_type(),
            metadata_key: default_metadata_key(),
            missing_payload: MissingPayload::default(),
        }
    }
}

/// Optional per-invocation overrides (from command-line flags)
#[derive(Debug, Clone, Default)]
pub struct ConfigOverrides {
    pub target_selector: Option<String>,
    pub payload_key: Option<String>,
    pub namespace: Option<String>,
    pub register_function: Option<String>,
    pub result_type: Option<String>,
    pub metadata_type: Option<String>,
    pub metadata_key: Option<String>,
    pub missing_payload: Option<MissingPayload>,
}

impl RewriteConfig {
    /// Merge overrides to produce the final config
    pub fn merge(&self, overrides: &ConfigOverrides) -> RewriteConfig {
        let pick = |o: &Option<String>, base: &String| o.clone().unwrap_or_else(|| base.clone());
        RewriteConfig {
            target_selector: pick(&overrides.target_selector, &self.target_selector),
            payload_key: pick(&overrides.payload_key, &self.payload_key),
            namespace: pick(&overrides.namespace, &self.namespace),
            register_function: pick(&overrides.register_function, &self.register_function),
            result_type: pick(&overrides.result_type, &self.result_type),
            metadata_type: pick(&overrides.metadata_type, &self.metadata_type),
            metadata_key: pick(&overrides.metadata_key, &self.metadata_key),
            missing_payload: overrides.missing_payload.unwrap_or(self.missing_payload),
        }
    }

    /// Check that every name is a usable Go identifier
    pub fn validate(&self) -> Result<()> {
        let names = [
            ("target_selector", &self.target_selector),
            ("payload_key", &self.payload_key),
            ("namespace", &self.namespace),
            ("register_function", &self.register_function),
            ("result_type", &self.result_type),
            ("metadata_type", &self.metadata_type),
            ("metadata_key", &self.metadata_key),
        ];
        for (field, value) in names {
            if !crate::util::is_go_identifier(value) {
                return Err(Error::Config(format!(
                    "{} must be a Go identifier, got {:?}",
                    field, value
                )));
            }
        }

        if self.metadata_key == self.payload_key {
            return Err(Error::Config(format!(
                "metadata_key and payload_key must differ (both {:?})",
                self.payload_key
            )));
        }

        Ok(())
    }

    /// Render as YAML
    pub fn to_yaml(&self) -> Result<String> {
        Ok(serde_norway::to_string(self)?)
    }
}

/// Batch run options
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RunOptions {
    /// Report what would change without writing anything
    pub dry_run: bool,

    /// Record per-file errors and continue instead of stopping at the first
    pub keep_going: bool,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_validate() {
        let config = RewriteConfig::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.target_selector, "RegisterLint");
        assert_eq!(config.missing_payload, MissingPayload::Error);
    }

    #[test]
    fn test_merge_config() {
        let base = RewriteConfig::default();
        let overrides = ConfigOverrides {
            target_selector: Some("RegisterRevocationListLint".into()),
            missing_payload: Some(MissingPayload::EmitNil),
            ..Default::default()
        };

        let merged = base.merge(&overrides);
        assert_eq!(merged.target_selector, "RegisterRevocationListLint");
        assert_eq!(merged.payload_key, "Lint"); // Inherited from base
        assert_eq!(merged.missing_payload, MissingPayload::EmitNil);
    }

    #[test]
    fn test_validate_rejects_bad_names() {
        let config = RewriteConfig {
            namespace: "lint.v2".into(),
            ..Default::default()
        };
        assert!(matches!(config.validate(), Err(Error::Config(_))));

        let config = RewriteConfig {
            metadata_key: "Lint".into(),
            ..Default::default()
        };
        assert!(matches!(config.validate(), Err(Error::Config(_))));
    }

    #[test]
    fn test_yaml_round_trip_fills_defaults() {
        let config: RewriteConfig =
            serde_norway::from_str("payload_key: Check\nmissing_payload: emit_nil\n").unwrap();
        assert_eq!(config.payload_key, "Check");
        assert_eq!(config.namespace, "lint");
        assert_eq!(config.missing_payload, MissingPayload::EmitNil);

        let yaml = config.to_yaml().unwrap();
        assert!(yaml.contains("payload_key: Check"));
    }
}
