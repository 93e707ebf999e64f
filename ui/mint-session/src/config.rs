//! Page configuration, embedded as JSON at build time.

use serde::Deserialize;
use thiserror::Error;

use crate::transaction::{TransactionRequest, CLAIM_FUNCTION, CLAIM_MODULE};

const PROD_MODULE_ADDRESS: &str =
    "0xf15c374bcaf95b011c53b65bd5efdd35d12ba5bdee58dab2c8831e9f0bcb4c27";
const TEST_MODULE_ADDRESS: &str =
    "0x5795f1a0ebfabdbe1860c3588e88b70ce3a687a7a831b0f1cc35185e9f154209";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Invalid config JSON: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("Invalid module address {0:?}: expected 0x-prefixed hex")]
    ModuleAddress(String),
    #[error("Invalid log level {0:?}")]
    LogLevel(String),
}

/// Which published minter module the page targets.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Deployment {
    #[default]
    Prod,
    Test,
}

impl Deployment {
    pub fn module_address(self) -> &'static str {
        match self {
            Self::Prod => PROD_MODULE_ADDRESS,
            Self::Test => TEST_MODULE_ADDRESS,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct MintConfig {
    pub title: String,
    pub deployment: Deployment,
    /// Overrides the deployment's built-in address.
    pub module_address: Option<String>,
    pub module: String,
    pub function: String,
    pub log_level: String,
}

impl Default for MintConfig {
    fn default() -> Self {
        Self {
            title: "Max's IIT Selfie Mint".to_string(),
            deployment: Deployment::Prod,
            module_address: None,
            module: CLAIM_MODULE.to_string(),
            function: CLAIM_FUNCTION.to_string(),
            log_level: "info".to_string(),
        }
    }
}

impl MintConfig {
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    fn validate(&self) -> Result<(), ConfigError> {
        if let Some(address) = &self.module_address {
            let valid = address
                .strip_prefix("0x")
                .is_some_and(|hex| !hex.is_empty() && hex.chars().all(|c| c.is_ascii_hexdigit()));
            if !valid {
                return Err(ConfigError::ModuleAddress(address.clone()));
            }
        }
        match self.log_level.to_ascii_lowercase().as_str() {
            "trace" | "debug" | "info" | "warn" | "error" => Ok(()),
            _ => Err(ConfigError::LogLevel(self.log_level.clone())),
        }
    }

    pub fn module_address(&self) -> &str {
        self.module_address
            .as_deref()
            .unwrap_or_else(|| self.deployment.module_address())
    }

    /// The one transaction this page ever submits.
    pub fn claim_request(&self) -> TransactionRequest {
        TransactionRequest::entry_function(self.module_address(), &self.module, &self.function)
    }
}
