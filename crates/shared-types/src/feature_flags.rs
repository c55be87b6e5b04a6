use serde::{Deserialize, Serialize};

/// Feature flags controlling which optional integrations are active.
///
/// Loaded from `config.toml` at server startup. A missing or incomplete
/// config file leaves telemetry off and the API docs on.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct FeatureFlags {
    /// Export request spans over OTLP.
    #[serde(default)]
    pub telemetry: bool,
    /// Serve the Scalar API reference at `/docs`.
    #[serde(default = "default_true")]
    pub docs: bool,
}

fn default_true() -> bool {
    true
}

impl Default for FeatureFlags {
    fn default() -> Self {
        Self {
            telemetry: false,
            docs: true,
        }
    }
}

/// Top-level config file structure matching `config.toml`.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct AppConfig {
    #[serde(default)]
    pub features: FeatureFlags,
}
