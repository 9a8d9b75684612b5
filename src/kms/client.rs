//! AWS SDK KMS client configured for the function's endpoint and credentials.

use std::time::Duration;

use async_trait::async_trait;
use aws_config::profile::profile_file::{ProfileFileKind, ProfileFiles};
use aws_config::profile::ProfileFileCredentialsProvider;
use aws_config::timeout::TimeoutConfig;
use aws_config::BehaviorVersion;
use aws_sdk_kms::error::DisplayErrorContext;
use aws_sdk_kms::primitives::Blob;
use base64::{engine::general_purpose::STANDARD, Engine as _};
use tracing::debug;

use super::{CredentialsMode, KeyUnwrap, UnwrapError};

/// KMS client used to unwrap the envelope-encrypted DEK.
///
/// Built once at startup and immutable afterwards; the underlying SDK client
/// is safe for concurrent use across simultaneously served invocations.
pub struct KmsKeyClient {
    inner: aws_sdk_kms::Client,
}

impl KmsKeyClient {
    /// Initialise the KMS client.
    ///
    /// The service endpoint is overridden with the configured crypto endpoint
    /// (KMS crypto endpoints are key-vault specific, not regional defaults).
    /// Resource-principal mode resolves credentials via the platform's
    /// ambient provider chain; config-file mode reads the pinned profile from
    /// the pinned path. `timeout` bounds the whole decrypt operation.
    pub async fn init(endpoint: &str, mode: &CredentialsMode, timeout: Duration) -> Self {
        let mut loader = aws_config::defaults(BehaviorVersion::latest());

        if let CredentialsMode::ConfigFile { path, profile } = mode {
            let files = ProfileFiles::builder()
                .with_file(ProfileFileKind::Credentials, path)
                .build();
            let provider = ProfileFileCredentialsProvider::builder()
                .profile_files(files)
                .profile_name(profile)
                .build();
            loader = loader.credentials_provider(provider);
        }

        let shared = loader.load().await;

        let conf = aws_sdk_kms::config::Builder::from(&shared)
            .endpoint_url(endpoint)
            .timeout_config(
                TimeoutConfig::builder()
                    .operation_timeout(timeout)
                    .build(),
            )
            .build();

        Self {
            inner: aws_sdk_kms::Client::from_conf(conf),
        }
    }
}

#[async_trait]
impl KeyUnwrap for KmsKeyClient {
    async fn unwrap_key(
        &self,
        key_id: &str,
        wrapped_key_b64: &str,
    ) -> Result<Vec<u8>, UnwrapError> {
        let ciphertext = STANDARD.decode(wrapped_key_b64)?;

        let resp = self
            .inner
            .decrypt()
            .key_id(key_id)
            .ciphertext_blob(Blob::new(ciphertext))
            .send()
            .await
            .map_err(|e| UnwrapError::Remote(DisplayErrorContext(&e).to_string()))?;

        let plaintext = resp.plaintext().ok_or(UnwrapError::MissingPlaintext)?;

        debug!(unwrapped_len = plaintext.as_ref().len(), "DEK unwrapped via KMS");
        Ok(plaintext.as_ref().to_vec())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn invalid_wrapped_key_base64_is_a_remote_tier_error() {
        // A malformed wrapped key never reaches the network; it fails in the
        // same tier as a KMS-side malformed-request rejection.
        let client = KmsKeyClient::init(
            "https://kms.example.test",
            &CredentialsMode::ResourcePrincipal,
            Duration::from_secs(1),
        )
        .await;

        let err = client.unwrap_key("ocid1.key.test", "!!not-base64!!").await;
        assert!(matches!(err, Err(UnwrapError::InvalidCiphertext(_))));
    }
}
