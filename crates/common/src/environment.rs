//! Courier provider environment configuration.
//!
//! Supports the production endpoint and the provider's sandbox with
//! appropriate base URLs.

use std::fmt;
use std::str::FromStr;

/// Provider environment (production or sandbox).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ProviderEnvironment {
    /// Production environment (real shipments, real charges).
    #[default]
    Production,
    /// Sandbox environment for integration testing.
    Sandbox,
}

impl ProviderEnvironment {
    /// REST API base URL.
    pub fn rest_base_url(&self) -> &'static str {
        match self {
            Self::Production => "https://open-api.flashexpress.com",
            Self::Sandbox => "https://open-api-tra.flashexpress.com",
        }
    }

    /// Returns true if this is the production environment.
    pub fn is_production(&self) -> bool {
        matches!(self, Self::Production)
    }

    /// Returns true if this is the sandbox environment.
    pub fn is_sandbox(&self) -> bool {
        matches!(self, Self::Sandbox)
    }

    /// Load environment from the `FLASH_ENVIRONMENT` env var.
    ///
    /// Returns `Production` if not set or invalid.
    pub fn from_env() -> Self {
        std::env::var("FLASH_ENVIRONMENT")
            .ok()
            .and_then(|s| s.parse().ok())
            .unwrap_or_default()
    }
}

impl fmt::Display for ProviderEnvironment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Production => write!(f, "production"),
            Self::Sandbox => write!(f, "sandbox"),
        }
    }
}

impl FromStr for ProviderEnvironment {
    type Err = ParseEnvironmentError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "production" | "prod" | "live" => Ok(Self::Production),
            "sandbox" | "test" | "tra" => Ok(Self::Sandbox),
            _ => Err(ParseEnvironmentError(s.to_string())),
        }
    }
}

/// Error parsing environment string.
#[derive(Debug, Clone)]
pub struct ParseEnvironmentError(String);

impl fmt::Display for ParseEnvironmentError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "invalid environment '{}', expected 'production' or 'sandbox'",
            self.0
        )
    }
}

impl std::error::Error for ParseEnvironmentError {}
