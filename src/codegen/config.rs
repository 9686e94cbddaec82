//! Configuration for the static constraint generator

use std::path::Path;

use serde::Deserialize;
use thiserror::Error;

/// Errors that can occur when loading generator configuration
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Failed to read generator config file: {0}")]
    IoError(#[from] std::io::Error),
    #[error("Failed to parse generator config TOML: {0}")]
    ParseError(#[from] toml::de::Error),
    #[error("{0}")]
    Invalid(String),
}

/// Platform the generated source targets.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RuntimePlatform {
    Ios,
    TvOs,
}

impl RuntimePlatform {
    pub fn parse(name: &str) -> Option<RuntimePlatform> {
        match name {
            "iOS" | "ios" => Some(RuntimePlatform::Ios),
            "tvOS" | "tvos" => Some(RuntimePlatform::TvOs),
            _ => None,
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            RuntimePlatform::Ios => "iOS",
            RuntimePlatform::TvOs => "tvOS",
        }
    }

    /// First OS version shipping a native safe-area layout guide.
    pub fn safe_area_version(&self) -> (u32, u32) {
        (11, 0)
    }
}

/// Options steering generated constraint source
#[derive(Debug, Clone, PartialEq)]
pub struct GeneratorConfig {
    /// Platform the generated source compiles for
    pub platform: RuntimePlatform,

    /// Minimum OS version the generated source must run on
    pub deployment_target: (u32, u32),
}

impl Default for GeneratorConfig {
    fn default() -> Self {
        Self {
            platform: RuntimePlatform::Ios,
            deployment_target: (11, 0),
        }
    }
}

/// TOML structure for deserializing generator configs
#[derive(Deserialize)]
struct TomlGeneratorConfig {
    platform: Option<String>,
    deployment_target: Option<String>,
}

impl GeneratorConfig {
    /// Create a new configuration with default values
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the target platform
    pub fn with_platform(mut self, platform: RuntimePlatform) -> Self {
        self.platform = platform;
        self
    }

    /// Set the deployment target version
    pub fn with_deployment_target(mut self, major: u32, minor: u32) -> Self {
        self.deployment_target = (major, minor);
        self
    }

    /// Load configuration from a TOML file
    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path)?;
        Self::from_toml(&content)
    }

    /// Load configuration from a TOML string
    pub fn from_toml(content: &str) -> Result<Self, ConfigError> {
        let parsed: TomlGeneratorConfig = toml::from_str(content)?;
        let mut config = GeneratorConfig::default();
        if let Some(platform) = parsed.platform {
            config.platform = RuntimePlatform::parse(&platform)
                .ok_or_else(|| ConfigError::Invalid(format!("unknown platform '{}'", platform)))?;
        }
        if let Some(version) = parsed.deployment_target {
            config.deployment_target = parse_version(&version)?;
        }
        Ok(config)
    }

    /// Whether the native safe-area guide exists on every supported OS
    /// version, making the availability-guarded fallback unnecessary.
    pub fn has_native_safe_area(&self) -> bool {
        self.deployment_target >= self.platform.safe_area_version()
    }
}

fn parse_version(version: &str) -> Result<(u32, u32), ConfigError> {
    let invalid = || {
        ConfigError::Invalid(format!(
            "deployment target '{}' is not in major.minor form",
            version
        ))
    };
    let (major, minor) = version.split_once('.').ok_or_else(invalid)?;
    Ok((
        major.parse().map_err(|_| invalid())?,
        minor.parse().map_err(|_| invalid())?,
    ))
}
