//! # Bridge Configuration
//!
//! Configuration parsed from managed-side JSON.

use serde::{Deserialize, Serialize};

use super::contract::HandleEncoding;
use crate::error::ConfigError;

/// Bridge configuration
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(default)]
pub struct BridgeConfig {
    /// Width of the texture handle passed to the register method
    #[serde(rename = "handleEncoding")]
    pub handle_encoding: HandleEncoding,

    /// Name of the zero-argument context method
    #[serde(rename = "initContextMethod")]
    pub init_context_method: String,

    /// Name of the texture registration method
    #[serde(rename = "registerTextureMethod")]
    pub register_texture_method: String,

    /// Maximum log level (`off`, `error`, `warn`, `info`, `debug`, `trace`)
    #[serde(rename = "logLevel")]
    pub log_level: String,
}

impl Default for BridgeConfig {
    fn default() -> Self {
        Self {
            handle_encoding: HandleEncoding::Long,
            init_context_method: "initContext".to_string(),
            register_texture_method: "registerTexture".to_string(),
            log_level: "info".to_string(),
        }
    }
}

impl BridgeConfig {
    /// Parse config from bytes (JSON)
    pub fn from_bytes(data: &[u8]) -> Result<Self, ConfigError> {
        if data.is_empty() {
            log::warn!("Empty config data, using defaults");
            return Ok(Self::default());
        }

        let config: Self = serde_json::from_slice(data)?;
        config.level_filter()?;
        Ok(config)
    }

    /// Serialize to bytes
    pub fn to_bytes(&self) -> Vec<u8> {
        serde_json::to_vec(self).unwrap_or_default()
    }

    /// Parsed `log_level`
    pub fn level_filter(&self) -> Result<log::LevelFilter, ConfigError> {
        self.log_level
            .parse()
            .map_err(|_| ConfigError::InvalidValue {
                field: "logLevel",
                value: self.log_level.clone(),
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_is_default() {
        assert_eq!(BridgeConfig::from_bytes(b"").unwrap(), BridgeConfig::default());
    }

    #[test]
    fn test_partial_json() {
        let config = BridgeConfig::from_bytes(br#"{"handleEncoding":"INT"}"#).unwrap();
        assert_eq!(config.handle_encoding, HandleEncoding::Int);
        assert_eq!(config.init_context_method, "initContext");
        assert_eq!(config.log_level, "info");
    }

    #[test]
    fn test_bad_log_level() {
        let err = BridgeConfig::from_bytes(br#"{"logLevel":"loud"}"#).unwrap_err();
        assert!(matches!(err, ConfigError::InvalidValue { field: "logLevel", .. }));
    }

    #[test]
    fn test_roundtrip_keys() {
        let json = String::from_utf8(BridgeConfig::default().to_bytes()).unwrap();
        assert!(json.contains("\"handleEncoding\":\"LONG\""));
        assert!(json.contains("\"registerTextureMethod\""));
    }
}
