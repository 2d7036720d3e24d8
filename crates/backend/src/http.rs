use std::env;

use reqwest::Client;
use url::Url;

use crate::client::{BackendError, WorkoutBackend};
use crate::records::{CompletionAck, CompletionRecord, SessionBootstrap, SetRecord};
use async_trait::async_trait;

const DEFAULT_BASE_URL: &str = "https://api.fitflow.app/";

/// Connection settings for the hosted backend.
#[derive(Clone, Debug)]
pub struct BackendConfig {
    pub base_url: Url,
    pub api_token: String,
}

impl BackendConfig {
    /// Reads configuration from the environment.
    ///
    /// Returns `None` when `FITFLOW_API_TOKEN` is unset or empty, or when
    /// `FITFLOW_API_BASE_URL` does not parse; callers then run guest-only.
    #[must_use]
    pub fn from_env() -> Option<Self> {
        let api_token = env::var("FITFLOW_API_TOKEN").ok()?;
        if api_token.trim().is_empty() {
            return None;
        }
        let raw_base =
            env::var("FITFLOW_API_BASE_URL").unwrap_or_else(|_| DEFAULT_BASE_URL.into());
        let base_url = match Url::parse(&raw_base) {
            Ok(url) => url,
            Err(error) => {
                tracing::warn!(%raw_base, %error, "invalid backend base url, running guest-only");
                return None;
            }
        };
        Some(Self {
            base_url,
            api_token,
        })
    }
}

/// HTTP implementation of the backend contract.
#[derive(Clone)]
pub struct HttpBackend {
    client: Client,
    config: BackendConfig,
}

impl HttpBackend {
    #[must_use]
    pub fn new(config: BackendConfig) -> Self {
        Self {
            client: Client::new(),
            config,
        }
    }

    fn endpoint(&self, path: &str) -> Result<Url, BackendError> {
        self.config
            .base_url
            .join(path)
            .map_err(|e| BackendError::Payload(e.to_string()))
    }

    async fn fetch_bootstrap(&self, path: &str) -> Result<SessionBootstrap, BackendError> {
        let response = self
            .client
            .get(self.endpoint(path)?)
            .bearer_auth(&self.config.api_token)
            .send()
            .await
            .map_err(|e| BackendError::Unavailable(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            return Err(BackendError::Rejected {
                status: status.as_u16(),
            });
        }

        response
            .json::<SessionBootstrap>()
            .await
            .map_err(|e| BackendError::Payload(e.to_string()))
    }
}

#[async_trait]
impl WorkoutBackend for HttpBackend {
    async fn start_session(&self) -> Result<SessionBootstrap, BackendError> {
        let response = self
            .client
            .post(self.endpoint("v1/sessions/start")?)
            .bearer_auth(&self.config.api_token)
            .send()
            .await
            .map_err(|e| BackendError::Unavailable(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            return Err(BackendError::Rejected {
                status: status.as_u16(),
            });
        }

        response
            .json::<SessionBootstrap>()
            .await
            .map_err(|e| BackendError::Payload(e.to_string()))
    }

    async fn daily_plan(&self) -> Result<SessionBootstrap, BackendError> {
        self.fetch_bootstrap("v1/corrective/daily-plan").await
    }

    async fn log_set(&self, set: &SetRecord) -> Result<(), BackendError> {
        let response = self
            .client
            .post(self.endpoint("v1/sessions/sets")?)
            .bearer_auth(&self.config.api_token)
            .json(set)
            .send()
            .await
            .map_err(|e| BackendError::Unavailable(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            return Err(BackendError::Rejected {
                status: status.as_u16(),
            });
        }
        Ok(())
    }

    async fn complete_session(
        &self,
        completion: &CompletionRecord,
    ) -> Result<CompletionAck, BackendError> {
        let response = self
            .client
            .post(self.endpoint("v1/sessions/complete")?)
            .bearer_auth(&self.config.api_token)
            .json(completion)
            .send()
            .await
            .map_err(|e| BackendError::Unavailable(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            return Err(BackendError::Rejected {
                status: status.as_u16(),
            });
        }

        response
            .json::<CompletionAck>()
            .await
            .map_err(|e| BackendError::Payload(e.to_string()))
    }
}
