//! Credentials mode selection for the KMS client.
//!
//! Two modes exist. When deployed, the function authenticates with the
//! platform's ambient resource-principal identity (no locally stored secret).
//! Locally, it reads a named profile from a fixed config file path instead.

use std::path::PathBuf;

/// Fixed path of the local credentials profile file.
pub const CONFIG_FILE_PATH: &str = "/.oci/config";

/// Profile name read from the local credentials file.
pub const CONFIG_FILE_PROFILE: &str = "DEFAULT";

/// How the KMS client obtains request-signing credentials.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CredentialsMode {
    /// Ambient identity supplied by the hosting platform.
    ResourcePrincipal,
    /// Named profile read from a local key-value config file.
    ConfigFile { path: PathBuf, profile: String },
}

impl CredentialsMode {
    /// Select the credentials mode from the `USE_RESOURCE_PRINCIPAL` flag.
    ///
    /// The file-based variant is pinned to [`CONFIG_FILE_PATH`] and
    /// [`CONFIG_FILE_PROFILE`]; neither is configurable.
    pub fn from_flag(use_resource_principal: bool) -> Self {
        if use_resource_principal {
            CredentialsMode::ResourcePrincipal
        } else {
            CredentialsMode::ConfigFile {
                path: PathBuf::from(CONFIG_FILE_PATH),
                profile: CONFIG_FILE_PROFILE.to_owned(),
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn true_selects_resource_principal() {
        assert_eq!(
            CredentialsMode::from_flag(true),
            CredentialsMode::ResourcePrincipal
        );
    }

    #[test]
    fn false_selects_fixed_profile_file() {
        let mode = CredentialsMode::from_flag(false);
        assert_eq!(
            mode,
            CredentialsMode::ConfigFile {
                path: PathBuf::from("/.oci/config"),
                profile: "DEFAULT".into(),
            }
        );
    }
}
