//! Stats request construction

use crate::adapters::transport::FetchRequest;
use crate::config::{secret_string, ApiKind, Credentials};
use crate::core::paginate::PageWindow;
use crate::domain::TransportError;
use secrecy::ExposeSecret;
use url::Url;

/// Builds page requests against one endpoint
#[derive(Debug, Clone)]
pub struct StatsRequestBuilder {
    endpoint: Url,
}

impl StatsRequestBuilder {
    /// Resolve the endpoint for `api_kind` under `base_url`
    ///
    /// `https://api.sendgrid.com/v3` with [`ApiKind::Stats`] resolves to
    /// `https://api.sendgrid.com/v3/stats`.
    ///
    /// # Errors
    ///
    /// Returns [`TransportError::InvalidRequest`] if `base_url` is not a valid
    /// absolute URL.
    pub fn new(base_url: &str, api_kind: ApiKind) -> Result<Self, TransportError> {
        let joined = format!("{}/{}", base_url.trim_end_matches('/'), api_kind.path());
        let endpoint = Url::parse(&joined)
            .map_err(|e| TransportError::InvalidRequest(format!("{joined}: {e}")))?;
        Ok(Self { endpoint })
    }

    /// Endpoint URL without query string
    pub fn endpoint(&self) -> &Url {
        &self.endpoint
    }

    /// URL for one page window
    pub fn url_for(&self, window: &PageWindow) -> Url {
        let mut url = self.endpoint.clone();
        url.query_pairs_mut()
            .append_pair("start_date", &window.start.format("%Y-%m-%d").to_string())
            .append_pair("end_date", &window.end.format("%Y-%m-%d").to_string());
        url
    }

    /// Full request for one page window, authorized with a bearer token
    pub fn build(&self, window: &PageWindow, credentials: &Credentials) -> FetchRequest {
        let bearer = format!("Bearer {}", credentials.api_key.expose_secret().as_ref());
        FetchRequest::new(self.url_for(window)).with_header("Authorization", secret_string(bearer))
    }
}
