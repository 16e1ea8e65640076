use crate::activation::{AppliedPlugins, IntegrationActivator};
use crate::credentials::{self, ActivationDecision};
use crate::placeholders::{self, ManifestPlaceholders};
use buildgate_core::{BuildgateConfig, FileSystem, ResolveError};
use serde::Serialize;
use std::path::PathBuf;
use tracing::{debug, info};

/// Everything one resolution run decided
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Resolution {
    pub credential_file: PathBuf,
    pub decision: ActivationDecision,
    pub plugin_id: String,
    pub integration_activated: bool,
    pub properties_file: PathBuf,
    pub properties_found: bool,
    pub secret_key: String,
    pub secret_key_found: bool,
    pub placeholders: ManifestPlaceholders,
}

/// Runs the credential classifier and the secret injector for one build.
///
/// The two steps share no state: the decision never looks at the properties
/// file and the injected value never depends on the decision.
pub struct BuildResolver<F: FileSystem> {
    fs: F,
    config: BuildgateConfig,
}

impl<F: FileSystem> BuildResolver<F> {
    pub fn new(fs: F, config: BuildgateConfig) -> Self {
        Self { fs, config }
    }

    pub fn config(&self) -> &BuildgateConfig {
        &self.config
    }

    pub fn classify(&self) -> Result<ActivationDecision, ResolveError> {
        credentials::classify(&self.fs, &self.config.credential_path())
    }

    /// Applies the integration plugin when `decision` is real.
    ///
    /// Returns whether the activator was invoked.
    pub fn activate(
        &self,
        decision: ActivationDecision,
        activator: &mut dyn IntegrationActivator,
    ) -> bool {
        let plugin = &self.config.plugin_id;
        let file = self.config.credential_file.display();

        match decision {
            ActivationDecision::Real => {
                info!("Applying {} plugin (real {} detected)", plugin, file);
                activator.activate(plugin);
                true
            }
            ActivationDecision::Placeholder => {
                info!("Skipping {} plugin: placeholder {} detected", plugin, file);
                false
            }
            ActivationDecision::NotFound => {
                info!("Skipping {} plugin: no {} file found", plugin, file);
                false
            }
        }
    }

    pub fn inject(
        &self,
        placeholders: &mut ManifestPlaceholders,
    ) -> Result<placeholders::SecretLookup, ResolveError> {
        placeholders::inject_secret(
            &self.fs,
            &self.config.properties_path(),
            &self.config.secret_key,
            &self.config.placeholder_name,
            placeholders,
        )
    }

    /// Classifies, activates, then injects into the caller's placeholder table
    pub fn resolve(
        &self,
        activator: &mut dyn IntegrationActivator,
        placeholders: &mut ManifestPlaceholders,
    ) -> Result<Resolution, ResolveError> {
        let credential_file = self.config.credential_path();
        let properties_file = self.config.properties_path();
        debug!(
            credential = %credential_file.display(),
            properties = %properties_file.display(),
            "Resolving build configuration"
        );

        let decision = self.classify()?;
        let integration_activated = self.activate(decision, activator);
        let lookup = self.inject(placeholders)?;

        Ok(Resolution {
            credential_file,
            decision,
            plugin_id: self.config.plugin_id.clone(),
            integration_activated,
            properties_file,
            properties_found: lookup.properties_found,
            secret_key: self.config.secret_key.clone(),
            secret_key_found: lookup.key_found,
            placeholders: placeholders.clone(),
        })
    }

    /// Resolves against a fresh plugin registry and placeholder table
    pub fn run(&self) -> Result<(Resolution, AppliedPlugins), ResolveError> {
        let mut applied = AppliedPlugins::new();
        let mut placeholders = ManifestPlaceholders::new();
        let resolution = self.resolve(&mut applied, &mut placeholders)?;
        Ok((resolution, applied))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::activation::MockIntegrationActivator;
    use buildgate_core::MockFileSystem;
    use std::io;

    const PLUGIN: &str = "com.google.gms.google-services";

    fn config() -> BuildgateConfig {
        BuildgateConfig {
            project_dir: PathBuf::from("/mock"),
            module_dir: PathBuf::from("app"),
            credential_file: PathBuf::from("google-services.json"),
            properties_file: PathBuf::from("local.properties"),
            secret_key: "MAPS_API_KEY".to_string(),
            placeholder_name: "MAPS_API_KEY".to_string(),
            plugin_id: PLUGIN.to_string(),
            log_level: "info".to_string(),
        }
    }

    fn resolver(fs: MockFileSystem) -> BuildResolver<MockFileSystem> {
        BuildResolver::new(fs, config())
    }

    #[test]
    fn test_nothing_present() {
        let (resolution, applied) = resolver(MockFileSystem::new()).run().unwrap();

        assert_eq!(resolution.decision, ActivationDecision::NotFound);
        assert!(!resolution.integration_activated);
        assert!(applied.is_empty());
        assert!(!resolution.properties_found);
        assert_eq!(resolution.placeholders.get("MAPS_API_KEY"), Some(""));
    }

    #[test]
    fn test_placeholder_credential() {
        let fs = MockFileSystem::new();
        fs.add_file("app/google-services.json", r#"{"project":"placeholder-project"}"#);

        let (resolution, applied) = resolver(fs).run().unwrap();

        assert_eq!(resolution.decision, ActivationDecision::Placeholder);
        assert!(!resolution.integration_activated);
        assert!(applied.is_empty());
    }

    #[test]
    fn test_real_credential_activates_once() {
        let fs = MockFileSystem::new();
        fs.add_file("app/google-services.json", r#"{"project":"artfolio-prod-42"}"#);

        let mut activator = MockIntegrationActivator::new();
        activator
            .expect_activate()
            .withf(|plugin_id: &str| plugin_id == PLUGIN)
            .times(1)
            .return_const(());
        let mut placeholders = ManifestPlaceholders::new();

        let resolution = resolver(fs)
            .resolve(&mut activator, &mut placeholders)
            .unwrap();

        assert_eq!(resolution.decision, ActivationDecision::Real);
        assert!(resolution.integration_activated);
    }

    #[test]
    fn test_inactive_decisions_never_call_activator() {
        for content in [None, Some("AIplaceholderKEY1234567890")] {
            let fs = MockFileSystem::new();
            if let Some(content) = content {
                fs.add_file("app/google-services.json", content);
            }

            let mut activator = MockIntegrationActivator::new();
            activator.expect_activate().times(0);
            let mut placeholders = ManifestPlaceholders::new();

            let resolution = resolver(fs)
                .resolve(&mut activator, &mut placeholders)
                .unwrap();
            assert!(!resolution.integration_activated);
        }
    }

    #[test]
    fn test_secret_injected_regardless_of_decision() {
        let fs = MockFileSystem::new();
        fs.add_file("app/google-services.json", "placeholder-project");
        fs.add_file("local.properties", "MAPS_API_KEY=AIzaReal123");

        let (resolution, _) = resolver(fs).run().unwrap();

        assert_eq!(resolution.decision, ActivationDecision::Placeholder);
        assert!(resolution.secret_key_found);
        assert_eq!(resolution.placeholders.get("MAPS_API_KEY"), Some("AIzaReal123"));
    }

    #[test]
    fn test_properties_do_not_affect_decision() {
        let fs = MockFileSystem::new();
        fs.add_file("app/google-services.json", r#"{"project":"artfolio-prod-42"}"#);
        fs.add_file("local.properties", "MAPS_API_KEY=placeholder-project");

        let (resolution, applied) = resolver(fs).run().unwrap();

        assert_eq!(resolution.decision, ActivationDecision::Real);
        assert!(applied.contains(PLUGIN));
        assert_eq!(
            resolution.placeholders.get("MAPS_API_KEY"),
            Some("placeholder-project")
        );
    }

    #[test]
    fn test_idempotent() {
        let fs = MockFileSystem::new();
        fs.add_file("app/google-services.json", r#"{"project":"artfolio-prod-42"}"#);
        fs.add_file("local.properties", "MAPS_API_KEY=AIzaReal123");
        let resolver = resolver(fs);

        let (first, first_applied) = resolver.run().unwrap();
        let (second, second_applied) = resolver.run().unwrap();

        assert_eq!(first, second);
        assert_eq!(first_applied, second_applied);
        assert_eq!(first_applied.ids().len(), 1);
    }

    #[test]
    fn test_shared_registry_applies_plugin_once() {
        let fs = MockFileSystem::new();
        fs.add_file("app/google-services.json", "{}");
        let resolver = resolver(fs);
        let mut applied = AppliedPlugins::new();
        let mut placeholders = ManifestPlaceholders::new();

        resolver.resolve(&mut applied, &mut placeholders).unwrap();
        resolver.resolve(&mut applied, &mut placeholders).unwrap();

        assert_eq!(applied.ids(), &[PLUGIN.to_string()]);
        assert_eq!(placeholders.len(), 1);
    }

    #[test]
    fn test_credential_io_fault_is_fatal() {
        let fs = MockFileSystem::new();
        fs.add_unreadable("app/google-services.json", io::ErrorKind::PermissionDenied);
        fs.add_file("local.properties", "MAPS_API_KEY=AIzaReal123");

        let err = resolver(fs).run().unwrap_err();
        assert_eq!(
            err.path(),
            &PathBuf::from("/mock/app/google-services.json")
        );
    }

    #[test]
    fn test_malformed_properties_is_fatal() {
        let fs = MockFileSystem::new();
        fs.add_file("local.properties", "MAPS_API_KEY=\\uZZZZ");

        let err = resolver(fs).run().unwrap_err();
        assert!(matches!(err, ResolveError::MalformedProperties { .. }));
    }

    #[test]
    fn test_custom_layout() {
        let fs = MockFileSystem::new();
        fs.add_file("mobile/firebase.json", "{}");
        fs.add_file("secrets.properties", "GEO=1");
        let config = BuildgateConfig {
            module_dir: PathBuf::from("mobile"),
            credential_file: PathBuf::from("firebase.json"),
            properties_file: PathBuf::from("secrets.properties"),
            secret_key: "GEO".to_string(),
            placeholder_name: "geoKey".to_string(),
            ..config()
        };

        let (resolution, _) = BuildResolver::new(fs, config).run().unwrap();

        assert_eq!(resolution.credential_file, PathBuf::from("/mock/mobile/firebase.json"));
        assert_eq!(resolution.decision, ActivationDecision::Real);
        assert_eq!(resolution.placeholders.get("geoKey"), Some("1"));
    }
}
