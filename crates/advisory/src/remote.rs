use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use shared::domain::SoilMetrics;
use tracing::warn;

use crate::{AdvisoryProvider, LocalAdvisory};

/// Placeholder returned when the analysis service answers with empty text.
pub const ANALYSIS_UNAVAILABLE: &str = "analysis unavailable";

/// Endpoint, bearer credential, and model name for the external analysis
/// service.
#[derive(Debug, Clone)]
pub struct RemoteCredentials {
    pub api_url: String,
    pub api_key: String,
    pub model: String,
}

/// External analysis strategy: one fixed prompt template parameterized by
/// the five metric fields. A failed call degrades to the local rule engine
/// and an empty response to [`ANALYSIS_UNAVAILABLE`], so `analyze` never
/// fails outward.
pub struct RemoteAdvisory {
    http: Client,
    credentials: RemoteCredentials,
    fallback: LocalAdvisory,
}

#[derive(Serialize)]
struct AnalysisRequest<'a> {
    model: &'a str,
    prompt: String,
}

#[derive(Deserialize)]
struct AnalysisResponse {
    #[serde(default)]
    text: String,
}

fn build_prompt(metrics: &SoilMetrics) -> String {
    format!(
        "You are a botanist embedded in a gardening robot tending a mixed bed \
         of shade-loving plants (ferns, mosses) and sun-loving plants \
         (succulents, petunias). Analyze this soil sensor reading:\n\
         - moisture: {moisture}%\n\
         - pH: {ph}\n\
         - nitrogen: {nitrogen} ppm\n\
         - temperature: {temperature} C\n\
         - light level: {light} lux\n\
         Reply with a status summary of at most two sentences and one concrete \
         action for the robot's actuators (watering, shutter, or platform \
         rotation). Keep the tone professional and helpful.",
        moisture = metrics.moisture,
        ph = metrics.ph,
        nitrogen = metrics.nitrogen,
        temperature = metrics.temperature,
        light = metrics.light_level,
    )
}

impl RemoteAdvisory {
    pub fn new(credentials: RemoteCredentials) -> Self {
        Self {
            http: Client::new(),
            credentials,
            fallback: LocalAdvisory,
        }
    }

    async fn request_analysis(&self, metrics: &SoilMetrics) -> Result<String, reqwest::Error> {
        let response: AnalysisResponse = self
            .http
            .post(&self.credentials.api_url)
            .bearer_auth(&self.credentials.api_key)
            .json(&AnalysisRequest {
                model: &self.credentials.model,
                prompt: build_prompt(metrics),
            })
            .send()
            .await?
            .error_for_status()?
            .json()
            .await?;
        Ok(response.text)
    }
}

#[async_trait]
impl AdvisoryProvider for RemoteAdvisory {
    async fn analyze(&self, metrics: &SoilMetrics) -> String {
        match self.request_analysis(metrics).await {
            Ok(text) if !text.trim().is_empty() => text,
            Ok(_) => ANALYSIS_UNAVAILABLE.to_string(),
            Err(err) => {
                warn!("advisory: remote analysis failed, degrading to local rules: {err}");
                self.fallback.summarize(metrics)
            }
        }
    }
}
