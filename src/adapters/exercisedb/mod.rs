//! ExerciseDB adapter: Implementation of ExerciseCatalog over RapidAPI.
//!
//! One GET per call, two static credential headers, no retry and no caching.

use reqwest::blocking::Client;
use zeroize::Zeroizing;

use super::http::{build_client, parse_endpoint, FetchError};
use crate::config::AppConfig;
use crate::domain::ExerciseFetch;
use crate::ports::ExerciseCatalog;

const HOST_HEADER: &str = "x-rapidapi-host";
const KEY_HEADER: &str = "x-rapidapi-key";

/// RapidAPI ExerciseDB client.
pub struct ExerciseDbClient {
    client: Client,
    endpoint: reqwest::Url,
    host: String,
    api_key: Zeroizing<String>,
}

impl ExerciseDbClient {
    /// Create a client from explicit settings.
    ///
    /// # Errors
    /// Returns error if the endpoint is not a valid http(s) URL or the HTTP
    /// client cannot be built.
    pub fn new(
        endpoint: &str,
        host: impl Into<String>,
        api_key: Zeroizing<String>,
        timeout: Option<std::time::Duration>,
    ) -> Result<Self, FetchError> {
        Ok(Self {
            client: build_client(timeout)?,
            endpoint: parse_endpoint(endpoint)?,
            host: host.into(),
            api_key,
        })
    }

    /// Create a client from the application configuration.
    ///
    /// # Errors
    /// See [`ExerciseDbClient::new`].
    pub fn from_config(config: &AppConfig) -> Result<Self, FetchError> {
        Self::new(
            &config.exercise_endpoint,
            config.exercise_api_host.clone(),
            config.exercise_api_key.clone(),
            config.http_timeout,
        )
    }
}

impl ExerciseCatalog for ExerciseDbClient {
    fn fetch_exercises(&self) -> Result<ExerciseFetch, FetchError> {
        tracing::debug!("GET {}", self.endpoint);

        let response = self
            .client
            .get(self.endpoint.clone())
            .header(HOST_HEADER, &self.host)
            .header(KEY_HEADER, self.api_key.as_str())
            .send()?;

        let status = response.status().as_u16();
        let body = response.text()?;
        let outcome = ExerciseFetch::from_response(status, &body)?;

        match &outcome {
            ExerciseFetch::Exercises(list) => {
                tracing::info!("Fetched {} exercises", list.len())
            }
            ExerciseFetch::Empty => tracing::info!("Exercise catalog returned no entries"),
            ExerciseFetch::Failed { status } => {
                tracing::warn!("Exercise catalog request failed with status {}", status)
            }
        }

        Ok(outcome)
    }
}
