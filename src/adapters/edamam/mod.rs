//! Edamam adapter: Implementation of NutritionAnalyzer.
//!
//! Credentials travel as `app_id` / `app_key` query parameters; the body is
//! `{"ingr": [...]}`. Transport errors are stripped of the request URL before
//! they are returned, and only the bare endpoint is logged.

use reqwest::blocking::Client;
use zeroize::Zeroizing;

use super::http::{build_client, parse_endpoint, FetchError};
use crate::config::AppConfig;
use crate::domain::{NutritionFetch, RecipeRequest};
use crate::ports::NutritionAnalyzer;

/// Edamam nutrition-details client.
pub struct EdamamClient {
    client: Client,
    endpoint: reqwest::Url,
    app_id: Zeroizing<String>,
    app_key: Zeroizing<String>,
}

impl EdamamClient {
    /// Create a client from explicit settings.
    ///
    /// # Errors
    /// Returns error if the endpoint is not a valid http(s) URL or the HTTP
    /// client cannot be built.
    pub fn new(
        endpoint: &str,
        app_id: Zeroizing<String>,
        app_key: Zeroizing<String>,
        timeout: Option<std::time::Duration>,
    ) -> Result<Self, FetchError> {
        Ok(Self {
            client: build_client(timeout)?,
            endpoint: parse_endpoint(endpoint)?,
            app_id,
            app_key,
        })
    }

    /// Create a client from the application configuration.
    ///
    /// # Errors
    /// See [`EdamamClient::new`].
    pub fn from_config(config: &AppConfig) -> Result<Self, FetchError> {
        Self::new(
            &config.nutrition_endpoint,
            config.nutrition_app_id.clone(),
            config.nutrition_app_key.clone(),
            config.http_timeout,
        )
    }
}

// The request URL carries the credentials; keep it out of displayed errors.
fn strip_url(err: reqwest::Error) -> FetchError {
    FetchError::Transport(err.without_url())
}

impl NutritionAnalyzer for EdamamClient {
    fn analyze(&self, recipe: &RecipeRequest) -> Result<NutritionFetch, FetchError> {
        tracing::debug!(
            "POST {} ({} ingredients)",
            self.endpoint,
            recipe.ingredients.len()
        );

        let response = self
            .client
            .post(self.endpoint.clone())
            .query(&[
                ("app_id", self.app_id.as_str()),
                ("app_key", self.app_key.as_str()),
            ])
            .json(&recipe.body())
            .send()
            .map_err(strip_url)?;

        let status = response.status().as_u16();
        let body = response.text().map_err(strip_url)?;
        let outcome = NutritionFetch::from_response(status, &body, &recipe.title)?;

        match &outcome {
            NutritionFetch::Report(report) => {
                tracing::info!("Received {} nutrient totals", report.nutrients.len())
            }
            NutritionFetch::NoData => tracing::info!("Nutrition response had no totals"),
            NutritionFetch::Failed { status, .. } => {
                tracing::warn!("Nutrition request failed with status {}", status)
            }
        }

        Ok(outcome)
    }
}
