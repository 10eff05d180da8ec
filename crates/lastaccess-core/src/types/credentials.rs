//! Upstream API credentials.

use std::fmt;

/// Account credentials for the upstream Admin API.
///
/// Requests are signed with HTTP basic authentication using the API key and
/// secret; the cloud name selects the account in the request path. None of
/// the fields are checked for presence here: missing values surface as an
/// authentication rejection from the upstream API.
///
/// # Security
///
/// The secret is never exposed in Debug output to prevent accidental logging.
///
/// # Example
///
/// ```
/// use lastaccess_core::Credentials;
///
/// let creds = Credentials::new("demo", "1234", "s3cret");
/// assert_eq!(creds.cloud_name(), "demo");
/// assert!(!format!("{:?}", creds).contains("s3cret"));
/// ```
#[derive(Clone)]
pub struct Credentials {
    cloud_name: String,
    api_key: String,
    api_secret: String,
}

impl Credentials {
    /// Create new credentials.
    pub fn new(
        cloud_name: impl Into<String>,
        api_key: impl Into<String>,
        api_secret: impl Into<String>,
    ) -> Self {
        Self {
            cloud_name: cloud_name.into(),
            api_key: api_key.into(),
            api_secret: api_secret.into(),
        }
    }

    /// Returns the cloud (account) name.
    pub fn cloud_name(&self) -> &str {
        &self.cloud_name
    }

    /// Returns the API key, used as the basic-auth username.
    pub fn api_key(&self) -> &str {
        &self.api_key
    }

    /// Returns the API secret.
    ///
    /// Use this only when signing requests. Never log or display it.
    pub fn api_secret(&self) -> &str {
        &self.api_secret
    }
}

impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credentials")
            .field("cloud_name", &self.cloud_name)
            .field("api_key", &self.api_key)
            .field("api_secret", &"[REDACTED]")
            .finish()
    }
}
