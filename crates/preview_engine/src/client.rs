use preview_core::{ExtractionError, PreviewRecord};
use serde::Deserialize;
use url::Url;

use crate::{FetchSettings, PreviewSource};

#[derive(Debug, thiserror::Error)]
pub enum ClientSetupError {
    #[error("invalid preview endpoint {endpoint}: {source}")]
    Endpoint {
        endpoint: String,
        source: url::ParseError,
    },
    #[error("failed to build http client: {0}")]
    Client(#[from] reqwest::Error),
}

#[derive(Debug, Deserialize)]
struct ErrorBody {
    error: String,
}

/// Asks a remote `/api/preview-url` endpoint for previews instead of fetching pages locally.
#[derive(Debug, Clone)]
pub struct HttpPreviewClient {
    endpoint: Url,
    client: reqwest::Client,
}

impl HttpPreviewClient {
    pub fn new(endpoint: &str, settings: &FetchSettings) -> Result<Self, ClientSetupError> {
        let endpoint = Url::parse(endpoint).map_err(|source| ClientSetupError::Endpoint {
            endpoint: endpoint.to_string(),
            source,
        })?;
        let client = reqwest::Client::builder()
            .connect_timeout(settings.connect_timeout)
            .timeout(settings.request_timeout)
            .user_agent(settings.user_agent.as_str())
            .build()?;
        Ok(Self { endpoint, client })
    }

    pub fn endpoint(&self) -> &Url {
        &self.endpoint
    }

    fn request_url(&self, url: &str) -> Url {
        let mut request = self.endpoint.clone();
        request.query_pairs_mut().append_pair("url", url);
        request
    }
}

#[async_trait::async_trait]
impl PreviewSource for HttpPreviewClient {
    async fn preview(&self, url: &str) -> Result<PreviewRecord, ExtractionError> {
        let response = self
            .client
            .get(self.request_url(url))
            .send()
            .await
            .map_err(|err| ExtractionError::Unreachable(err.to_string()))?;
        let status = response.status();
        let body = response
            .bytes()
            .await
            .map_err(|err| ExtractionError::Unreachable(err.to_string()))?;

        if status.is_success() {
            return serde_json::from_slice::<PreviewRecord>(&body)
                .map_err(|err| ExtractionError::ParseFailure(err.to_string()));
        }

        let message = serde_json::from_slice::<ErrorBody>(&body)
            .map(|body| body.error)
            .unwrap_or_else(|_| status.to_string());
        if status == reqwest::StatusCode::BAD_REQUEST {
            Err(ExtractionError::InvalidInput(message))
        } else {
            Err(ExtractionError::Unreachable(message))
        }
    }
}
