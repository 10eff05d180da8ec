//! HTTP client for the upstream Admin API.

use reqwest::{RequestBuilder, Url};
use serde::{Serialize, de::DeserializeOwned};
use tracing::{debug, instrument, trace, warn};

use lastaccess_core::error::UpstreamError;
use lastaccess_core::{ApiBaseUrl, Credentials, Result};

/// HTTP client that signs every request with the account credentials.
#[derive(Debug, Clone)]
pub struct ApiClient {
    client: reqwest::Client,
    base: ApiBaseUrl,
    credentials: Credentials,
}

impl ApiClient {
    /// Create a new client for the given API base and account.
    pub fn new(base: ApiBaseUrl, credentials: Credentials) -> Self {
        let client = reqwest::Client::builder()
            .user_agent(concat!("lastaccess/", env!("CARGO_PKG_VERSION")))
            .build()
            .expect("failed to build HTTP client");

        Self {
            client,
            base,
            credentials,
        }
    }

    /// Returns the API base this client is configured for.
    pub fn base(&self) -> &ApiBaseUrl {
        &self.base
    }

    /// Endpoint URL under the account, e.g. `<base>/<cloud>/<segments..>`.
    pub fn url(&self, segments: &[&str]) -> Url {
        let account = std::iter::once(self.credentials.cloud_name());
        self.base.endpoint(account.chain(segments.iter().copied()))
    }

    /// Make a GET request.
    #[instrument(skip(self), fields(base = %self.base))]
    pub async fn get<R>(&self, segments: &[&str]) -> Result<R>
    where
        R: DeserializeOwned,
    {
        let url = self.url(segments);
        debug!(%url, "GET");

        let response = self.authed(self.client.get(url)).send().await?;

        self.handle_response(response).await
    }

    /// Make a GET request with a query string.
    #[instrument(skip(self), fields(base = %self.base))]
    pub async fn get_with_query<Q, R>(&self, segments: &[&str], params: &Q) -> Result<R>
    where
        Q: Serialize + std::fmt::Debug + ?Sized,
        R: DeserializeOwned,
    {
        let url = self.url(segments);
        debug!(%url, "GET");
        trace!(?params, "query parameters");

        let response = self
            .authed(self.client.get(url).query(params))
            .send()
            .await?;

        self.handle_response(response).await
    }

    /// Make a POST request with a JSON body.
    #[instrument(skip(self, body), fields(base = %self.base))]
    pub async fn post<B, R>(&self, segments: &[&str], body: &B) -> Result<R>
    where
        B: Serialize + std::fmt::Debug + ?Sized,
        R: DeserializeOwned,
    {
        let url = self.url(segments);
        debug!(%url, "POST");
        trace!(?body, "request body");

        let response = self
            .authed(self.client.post(url).json(body))
            .send()
            .await?;

        self.handle_response(response).await
    }

    /// Attach basic authentication.
    fn authed(&self, request: RequestBuilder) -> RequestBuilder {
        request.basic_auth(
            self.credentials.api_key(),
            Some(self.credentials.api_secret()),
        )
    }

    /// Decode a success body or turn the response into an upstream error.
    async fn handle_response<R: DeserializeOwned>(&self, response: reqwest::Response) -> Result<R> {
        let status = response.status();
        trace!(status = %status, "response");

        if status.is_success() {
            let body = response.json::<R>().await?;
            Ok(body)
        } else {
            let body = response.text().await.unwrap_or_default();
            let error = UpstreamError::from_body(status.as_u16(), &body);
            warn!(status = status.as_u16(), error = %error.summary(), "upstream rejected request");
            Err(error.into())
        }
    }
}
