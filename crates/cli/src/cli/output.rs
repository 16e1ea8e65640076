//! Output formatting for resolution reports
//!
//! JSON and YAML carry placeholder values verbatim because they feed manifest
//! generation. Human output masks them unless secrets are explicitly shown.

use anyhow::{Context, Result};
use buildgate_core::BuildgateConfig;
use buildgate_resolver::{ActivationDecision, AppliedPlugins, Resolution};
use serde::Serialize;
use std::path::PathBuf;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    Json,
    Yaml,
    Human,
}

/// `resolve` command output
#[derive(Debug, Clone, Serialize)]
pub struct ResolveReport {
    #[serde(flatten)]
    pub resolution: Resolution,
    pub applied_plugins: AppliedPlugins,
}

/// `classify` command output
#[derive(Debug, Clone, Serialize)]
pub struct ClassifyReport {
    pub credential_file: PathBuf,
    pub decision: ActivationDecision,
    pub activates: bool,
}

pub struct OutputFormatter {
    format: OutputFormat,
    show_secrets: bool,
}

impl OutputFormatter {
    pub fn new(format: OutputFormat) -> Self {
        Self {
            format,
            show_secrets: false,
        }
    }

    pub fn with_secrets(mut self, show_secrets: bool) -> Self {
        self.show_secrets = show_secrets;
        self
    }

    pub fn format_resolution(&self, report: &ResolveReport) -> Result<String> {
        match self.format {
            OutputFormat::Json => to_json(report, "resolution report"),
            OutputFormat::Yaml => to_yaml(report, "resolution report"),
            OutputFormat::Human => Ok(self.format_resolution_human(report)),
        }
    }

    pub fn format_classification(&self, report: &ClassifyReport) -> Result<String> {
        match self.format {
            OutputFormat::Json => to_json(report, "classification"),
            OutputFormat::Yaml => to_yaml(report, "classification"),
            OutputFormat::Human => Ok(format!(
                "Credential file: {}\nDecision:        {}\nActivates:       {}\n",
                report.credential_file.display(),
                report.decision,
                if report.activates { "yes" } else { "no" }
            )),
        }
    }

    pub fn format_config(&self, config: &BuildgateConfig) -> Result<String> {
        match self.format {
            OutputFormat::Json => to_json(config, "configuration"),
            OutputFormat::Yaml => to_yaml(config, "configuration"),
            OutputFormat::Human => Ok(config.to_string()),
        }
    }

    fn format_resolution_human(&self, report: &ResolveReport) -> String {
        let r = &report.resolution;
        let mut output = String::new();

        output.push_str(&format!(
            "Credential file: {}\n",
            r.credential_file.display()
        ));
        output.push_str(&format!("Decision:        {}\n", r.decision));
        output.push_str(&format!(
            "Integration:     {} ({})\n",
            r.plugin_id,
            if r.integration_activated {
                "activated"
            } else {
                "inactive"
            }
        ));
        output.push_str(&format!(
            "Properties file: {} ({})\n",
            r.properties_file.display(),
            if r.properties_found { "found" } else { "missing" }
        ));
        output.push_str(&format!(
            "Secret key:      {} ({})\n",
            r.secret_key,
            if r.secret_key_found { "set" } else { "not set" }
        ));

        output.push_str("\nPlaceholders:\n");
        let count = r.placeholders.len();
        for (i, (name, value)) in r.placeholders.iter().enumerate() {
            let connector = if i + 1 == count { "\u{2514}" } else { "\u{251C}" };
            output.push_str(&format!(
                "{}\u{2500} {} = {}\n",
                connector,
                name,
                self.display_value(value)
            ));
        }

        if !report.applied_plugins.is_empty() {
            output.push_str("\nApplied plugins:\n");
            for id in report.applied_plugins.ids() {
                output.push_str(&format!("  {}\n", id));
            }
        }

        output
    }

    fn display_value(&self, value: &str) -> String {
        if value.is_empty() {
            "(empty)".to_string()
        } else if self.show_secrets {
            value.to_string()
        } else {
            format!("(redacted, {} chars)", value.chars().count())
        }
    }
}

fn to_json<T: Serialize>(value: &T, what: &str) -> Result<String> {
    serde_json::to_string_pretty(value).with_context(|| format!("Failed to serialize {} to JSON", what))
}

fn to_yaml<T: Serialize>(value: &T, what: &str) -> Result<String> {
    serde_yaml::to_string(value).with_context(|| format!("Failed to serialize {} to YAML", what))
}

#[cfg(test)]
mod tests {
    use super::*;
    use buildgate_resolver::{IntegrationActivator, ManifestPlaceholders};

    fn create_test_report(value: &str) -> ResolveReport {
        let mut placeholders = ManifestPlaceholders::new();
        placeholders.insert("MAPS_API_KEY", value);
        let mut applied = AppliedPlugins::new();
        applied.activate("com.google.gms.google-services");

        ResolveReport {
            resolution: Resolution {
                credential_file: PathBuf::from("/work/android/app/google-services.json"),
                decision: ActivationDecision::Real,
                plugin_id: "com.google.gms.google-services".to_string(),
                integration_activated: true,
                properties_file: PathBuf::from("/work/android/local.properties"),
                properties_found: true,
                secret_key: "MAPS_API_KEY".to_string(),
                secret_key_found: !value.is_empty(),
                placeholders,
            },
            applied_plugins: applied,
        }
    }

    #[test]
    fn test_json_format() {
        let formatter = OutputFormatter::new(OutputFormat::Json);
        let output = formatter
            .format_resolution(&create_test_report("AIzaReal123"))
            .unwrap();

        let parsed: serde_json::Value = serde_json::from_str(&output).unwrap();
        assert_eq!(parsed["decision"], "real");
        assert_eq!(parsed["integration_activated"], true);
        assert_eq!(parsed["placeholders"]["MAPS_API_KEY"], "AIzaReal123");
        assert_eq!(
            parsed["applied_plugins"][0],
            "com.google.gms.google-services"
        );
    }

    #[test]
    fn test_yaml_format() {
        let formatter = OutputFormatter::new(OutputFormat::Yaml);
        let output = formatter
            .format_resolution(&create_test_report("AIzaReal123"))
            .unwrap();

        assert!(output.contains("decision: real"));
        assert!(output.contains("MAPS_API_KEY: AIzaReal123"));
    }

    #[test]
    fn test_human_format_masks_secret() {
        let formatter = OutputFormatter::new(OutputFormat::Human);
        let output = formatter
            .format_resolution(&create_test_report("AIzaReal123"))
            .unwrap();

        assert!(output.contains("Decision:        real"));
        assert!(output.contains("(activated)"));
        assert!(output.contains("MAPS_API_KEY = (redacted, 11 chars)"));
        assert!(!output.contains("AIzaReal123"));
        assert!(output.contains("Applied plugins:"));
    }

    #[test]
    fn test_human_format_show_secrets() {
        let formatter = OutputFormatter::new(OutputFormat::Human).with_secrets(true);
        let output = formatter
            .format_resolution(&create_test_report("AIzaReal123"))
            .unwrap();

        assert!(output.contains("MAPS_API_KEY = AIzaReal123"));
    }

    #[test]
    fn test_human_format_empty_value() {
        let formatter = OutputFormatter::new(OutputFormat::Human);
        let output = formatter
            .format_resolution(&create_test_report(""))
            .unwrap();

        assert!(output.contains("MAPS_API_KEY = (empty)"));
        assert!(output.contains("(not set)"));
    }

    #[test]
    fn test_classification_formats() {
        let report = ClassifyReport {
            credential_file: PathBuf::from("app/google-services.json"),
            decision: ActivationDecision::Placeholder,
            activates: false,
        };

        let human = OutputFormatter::new(OutputFormat::Human)
            .format_classification(&report)
            .unwrap();
        assert!(human.contains("Decision:        placeholder"));
        assert!(human.contains("Activates:       no"));

        let json = OutputFormatter::new(OutputFormat::Json)
            .format_classification(&report)
            .unwrap();
        let parsed: serde_json::Value = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed["decision"], "placeholder");
        assert_eq!(parsed["activates"], false);
    }

    #[test]
    fn test_config_format() {
        let config = BuildgateConfig {
            project_dir: PathBuf::from("/work/android"),
            ..Default::default()
        };

        let json = OutputFormatter::new(OutputFormat::Json)
            .format_config(&config)
            .unwrap();
        let parsed: serde_json::Value = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed["project_dir"], "/work/android");

        let human = OutputFormatter::new(OutputFormat::Human)
            .format_config(&config)
            .unwrap();
        assert!(human.contains("Buildgate Configuration:"));
    }
}
