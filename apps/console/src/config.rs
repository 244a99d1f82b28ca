use std::fs;

use advisory::RemoteCredentials;
use serde::Deserialize;

#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub robot_url: String,
    pub advisory_url: String,
    pub advisory_model: String,
    pub advisory_api_key: Option<String>,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            robot_url: "http://127.0.0.1:8787".into(),
            advisory_url: "https://advisor.example.com/v1/analyze".into(),
            advisory_model: "field-botanist-1".into(),
            advisory_api_key: None,
        }
    }
}

pub fn load_settings() -> Settings {
    let mut settings = fs::read_to_string("console.toml")
        .ok()
        .and_then(|raw| toml::from_str::<Settings>(&raw).ok())
        .unwrap_or_default();

    if let Ok(v) = std::env::var("ROBOT_URL") {
        settings.robot_url = v;
    }
    if let Ok(v) = std::env::var("ADVISORY_URL") {
        settings.advisory_url = v;
    }
    if let Ok(v) = std::env::var("ADVISORY_MODEL") {
        settings.advisory_model = v;
    }
    if let Ok(v) = std::env::var("ADVISORY_API_KEY") {
        settings.advisory_api_key = Some(v);
    }

    settings
}

impl Settings {
    /// Remote analysis is selected only when a credential is configured;
    /// without one the console downgrades to the local rule engine instead
    /// of failing.
    pub fn remote_credentials(&self) -> Option<RemoteCredentials> {
        self.advisory_api_key.as_ref().map(|key| RemoteCredentials {
            api_url: self.advisory_url.clone(),
            api_key: key.clone(),
            model: self.advisory_model.clone(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_have_no_remote_credential() {
        let settings = Settings::default();
        assert!(settings.advisory_api_key.is_none());
        assert!(settings.remote_credentials().is_none());
    }

    #[test]
    fn partial_toml_keeps_remaining_defaults() {
        let settings: Settings =
            toml::from_str(r#"robot_url = "http://10.0.0.7:9000""#).expect("parse");
        assert_eq!(settings.robot_url, "http://10.0.0.7:9000");
        assert_eq!(settings.advisory_model, "field-botanist-1");
    }

    #[test]
    fn credential_presence_enables_the_remote_strategy() {
        let settings: Settings = toml::from_str(
            r#"
            advisory_api_key = "secret"
            advisory_url = "https://analysis.local/run"
            "#,
        )
        .expect("parse");
        let credentials = settings.remote_credentials().expect("credentials");
        assert_eq!(credentials.api_key, "secret");
        assert_eq!(credentials.api_url, "https://analysis.local/run");
        assert_eq!(credentials.model, "field-botanist-1");
    }

    #[test]
    fn environment_overrides_file_and_defaults() {
        std::env::set_var("ROBOT_URL", "http://robot.lan:8080");
        std::env::set_var("ADVISORY_API_KEY", "env-key");

        let settings = load_settings();
        assert_eq!(settings.robot_url, "http://robot.lan:8080");
        assert_eq!(settings.advisory_api_key.as_deref(), Some("env-key"));

        std::env::remove_var("ROBOT_URL");
        std::env::remove_var("ADVISORY_API_KEY");
    }
}
