use async_trait::async_trait;
use shared::domain::SoilMetrics;

use crate::AdvisoryProvider;

/// Deterministic rule-based analysis, used when no remote credential is
/// configured and as the degradation path when the remote call fails.
pub struct LocalAdvisory;

impl LocalAdvisory {
    /// Summary clauses are evaluated independently, in the order moisture,
    /// pH, temperature, light; the recommended action is the first matching
    /// priority rule.
    pub fn summarize(&self, metrics: &SoilMetrics) -> String {
        let mut findings: Vec<&str> = Vec::new();
        if metrics.moisture < 35.0 {
            findings.push("moisture low");
        } else if metrics.moisture > 70.0 {
            findings.push("moisture high");
        }
        if metrics.ph < 6.0 {
            findings.push("pH acidic");
        } else if metrics.ph > 7.5 {
            findings.push("pH alkaline");
        }
        if metrics.temperature < 18.0 {
            findings.push("temperature low");
        } else if metrics.temperature > 30.0 {
            findings.push("temperature high");
        }
        if metrics.light_level < 500.0 {
            findings.push("light weak");
        } else if metrics.light_level > 5000.0 {
            findings.push("light strong");
        }

        let summary = if findings.is_empty() {
            "within normal range".to_string()
        } else {
            findings.join(", ")
        };

        let action = if metrics.moisture < 35.0 {
            "briefly irrigate"
        } else if metrics.moisture > 70.0 {
            "pause irrigation"
        } else if metrics.light_level > 5000.0 {
            "increase shading or rotate away from light"
        } else if metrics.light_level < 500.0 {
            "reorient toward light"
        } else {
            "maintain current settings"
        };

        format!("Soil status: {summary}. Suggested action: {action}.")
    }
}

#[async_trait]
impl AdvisoryProvider for LocalAdvisory {
    async fn analyze(&self, metrics: &SoilMetrics) -> String {
        self.summarize(metrics)
    }
}
