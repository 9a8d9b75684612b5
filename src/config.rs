//! Configuration loading and validation for the function.
//!
//! All values are read from environment variables once at startup and carried
//! in an explicit [`Config`] struct from then on; business logic never reads
//! the environment directly. The process exits with a clear error message if
//! any required variable is missing or invalid.

use anyhow::{Context, Result};
use serde::Deserialize;

/// Validated function configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    /// Raw bytes of the AES-CBC initialisation vector. **Required.**
    ///
    /// The length is deliberately not validated here: a wrong-length IV must
    /// surface as a local decrypt failure (null password), not as a startup
    /// failure.
    pub init_vector_string: String,

    /// Whether to authenticate with the platform's ambient resource-principal
    /// identity. When `false`, a local profile file is used instead.
    #[serde(default = "default_use_resource_principal")]
    pub use_resource_principal: bool,

    /// Base64 AES-CBC ciphertext of the stored password. **Required.**
    pub encrypted_password: String,

    /// Base64 KMS-wrapped data-encryption key. **Required.**
    pub dek_ciphertext: String,

    /// KMS crypto endpoint URL. **Required.**
    pub endpoint: String,

    /// Identifier of the KMS master key that wraps the DEK. **Required.**
    pub key_ocid: String,

    /// Operation timeout (seconds) applied to the remote KMS decrypt call.
    #[serde(default = "default_kms_timeout")]
    pub kms_timeout_secs: u64,

    /// When `true`, a local decrypt failure aborts the invocation instead of
    /// producing a null password.
    #[serde(default)]
    pub strict_decrypt: bool,

    /// Port the HTTP trigger surface listens on.
    #[serde(default = "default_listen_port")]
    pub listen_port: u16,

    /// Tracing log level (e.g. `"info"`, `"debug"`).
    #[serde(default = "default_log_level")]
    pub log_level: String,
}

fn default_use_resource_principal() -> bool {
    true
}
fn default_kms_timeout() -> u64 {
    30
}
fn default_listen_port() -> u16 {
    8080
}
fn default_log_level() -> String {
    "info".into()
}

impl Config {
    /// Load and validate configuration from environment variables.
    ///
    /// # Errors
    ///
    /// Returns an error if any required variable is absent or cannot be parsed.
    pub fn from_env() -> Result<Self> {
        let cfg = config::Config::builder()
            .add_source(config::Environment::default())
            .build()
            .context("failed to build configuration from environment")?;

        let c: Config = cfg
            .try_deserialize()
            .context("failed to deserialise configuration")?;

        c.validate()?;
        Ok(c)
    }

    /// Validate all fields, returning a descriptive error on the first failure.
    fn validate(&self) -> Result<()> {
        ensure_non_empty(&self.init_vector_string, "INIT_VECTOR_STRING")?;
        ensure_non_empty(&self.encrypted_password, "ENCRYPTED_PASSWORD")?;
        ensure_non_empty(&self.dek_ciphertext, "DEK_CIPHERTEXT")?;
        ensure_non_empty(&self.endpoint, "ENDPOINT")?;
        ensure_non_empty(&self.key_ocid, "KEY_OCID")?;

        if self.kms_timeout_secs == 0 {
            anyhow::bail!("KMS_TIMEOUT_SECS must be > 0");
        }
        Ok(())
    }
}

fn ensure_non_empty(value: &str, name: &str) -> Result<()> {
    if value.trim().is_empty() {
        anyhow::bail!("{name} is required and must not be empty");
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn valid_config() -> Config {
        Config {
            init_vector_string: "0102030405060708".into(),
            use_resource_principal: default_use_resource_principal(),
            encrypted_password: "c29tZS1jaXBoZXJ0ZXh0".into(),
            dek_ciphertext: "d3JhcHBlZC1rZXk=".into(),
            endpoint: "https://kms.example.test".into(),
            key_ocid: "ocid1.key.oc1..example".into(),
            kms_timeout_secs: default_kms_timeout(),
            strict_decrypt: false,
            listen_port: default_listen_port(),
            log_level: default_log_level(),
        }
    }

    #[test]
    fn defaults_are_correct() {
        assert!(default_use_resource_principal());
        assert_eq!(default_kms_timeout(), 30);
        assert_eq!(default_listen_port(), 8080);
        assert_eq!(default_log_level(), "info");
    }

    #[test]
    fn validate_accepts_complete_config() {
        assert!(valid_config().validate().is_ok());
    }

    #[test]
    fn validate_rejects_empty_endpoint() {
        let mut cfg = valid_config();
        cfg.endpoint = "".into();
        assert!(cfg.validate().is_err());
    }

    #[test]
    fn validate_rejects_empty_key_ocid() {
        let mut cfg = valid_config();
        cfg.key_ocid = "  ".into();
        assert!(cfg.validate().is_err());
    }

    #[test]
    fn validate_rejects_zero_timeout() {
        let mut cfg = valid_config();
        cfg.kms_timeout_secs = 0;
        assert!(cfg.validate().is_err());
    }

    #[test]
    fn validate_does_not_check_iv_length() {
        // A wrong-length IV is a local decrypt failure, not a config error.
        let mut cfg = valid_config();
        cfg.init_vector_string = "short".into();
        assert!(cfg.validate().is_ok());
    }
}
