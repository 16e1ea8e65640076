//! Build-time resolution of credential-gated integrations and local secrets
//!
//! Two independent steps run once per build:
//!
//! - [`credentials`] classifies the integration's credential file as missing,
//!   a checked-in placeholder, or real, and only a real file activates the
//!   integration plugin through an [`IntegrationActivator`].
//! - [`placeholders`] reads a developer-local `.properties` file and injects
//!   one secret into the manifest placeholder table, defaulting to `""`.
//!
//! [`BuildResolver`] runs both against a [`buildgate_core::FileSystem`].

pub mod activation;
pub mod credentials;
pub mod placeholders;
pub mod properties;
mod resolver;

pub use activation::{AppliedPlugins, IntegrationActivator};
pub use credentials::{
    classify, classify_content, ActivationDecision, CredentialFile, PLACEHOLDER_MARKERS,
};
pub use placeholders::{inject_secret, lookup_secret, ManifestPlaceholders, SecretLookup};
pub use properties::{LocalProperties, PropertiesError};
pub use resolver::{BuildResolver, Resolution};
