//! Middleware layers applied to the router.
//!
//! Includes request tracing and timeout enforcement.

use std::time::Duration;

/// Default per-request timeout applied to all routes.
///
/// Must exceed the KMS operation timeout so the remote tier fails first and
/// surfaces its own error instead of a blunt request timeout.
pub const REQUEST_TIMEOUT: Duration = Duration::from_secs(60);
