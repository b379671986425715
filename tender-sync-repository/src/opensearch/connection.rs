//! Connection settings for the OpenSearch client.

use std::fmt;
use std::time::Duration;

/// Default request timeout for calls to the search index.
pub const DEFAULT_REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

/// AWS service name used when signing requests to a managed domain.
pub const AWS_SERVICE_NAME: &str = "es";

/// How requests to the search index are authenticated.
#[derive(Clone, PartialEq, Eq, Default)]
pub enum OpenSearchAuth {
    /// Unauthenticated requests (local clusters).
    #[default]
    None,
    /// HTTP basic authentication.
    Basic { username: String, password: String },
    /// AWS SigV4 request signing with credentials from the default AWS
    /// provider chain (environment, profile, instance or task role).
    SigV4 {
        /// Region override; the AWS chain's region is used when unset.
        region: Option<String>,
    },
}

impl fmt::Debug for OpenSearchAuth {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::None => f.write_str("None"),
            Self::Basic { username, .. } => f
                .debug_struct("Basic")
                .field("username", username)
                .field("password", &"<redacted>")
                .finish(),
            Self::SigV4 { region } => f.debug_struct("SigV4").field("region", region).finish(),
        }
    }
}

/// Where and how to reach the search index.
#[derive(Debug, Clone)]
pub struct OpenSearchConnection {
    /// The OpenSearch server URL (e.g., "http://localhost:9200").
    pub url: String,
    pub auth: OpenSearchAuth,
    /// Upper bound on any single request, bulk requests included.
    pub request_timeout: Duration,
}

impl OpenSearchConnection {
    /// Unauthenticated connection with the default timeout.
    pub fn new(url: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            auth: OpenSearchAuth::None,
            request_timeout: DEFAULT_REQUEST_TIMEOUT,
        }
    }

    pub fn with_auth(mut self, auth: OpenSearchAuth) -> Self {
        self.auth = auth;
        self
    }

    pub fn with_request_timeout(mut self, timeout: Duration) -> Self {
        self.request_timeout = timeout;
        self
    }
}
