use async_trait::async_trait;
use reqwest::Client;
use serde::Serialize;
use shared::{
    domain::{Angle, PlantType, ShutterAction, SoilMetrics},
    error::GatewayError,
    protocol::{
        CommandAck, InfraredCommand, PlatformHeightCommand, RotationCommand, ScanResponse,
        ShutterCommand, SunPositionResponse, WateringCommand,
    },
};
use tracing::debug;

use crate::ActuatorGateway;

/// JSON-over-HTTP transport against the robot controller. One POST per
/// command; the controller answers with a [`CommandAck`].
pub struct HttpActuatorGateway {
    http: Client,
    base_url: String,
}

impl HttpActuatorGateway {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            http: Client::new(),
            base_url: base_url.into(),
        }
    }

    async fn post_command<B: Serialize + Sync>(
        &self,
        path: &str,
        body: &B,
    ) -> Result<(), GatewayError> {
        debug!(path, "actuator: posting command");
        let ack: CommandAck = self
            .http
            .post(format!("{}{path}", self.base_url))
            .json(body)
            .send()
            .await
            .map_err(transport)?
            .error_for_status()
            .map_err(transport)?
            .json()
            .await
            .map_err(transport)?;

        if ack.accepted {
            Ok(())
        } else {
            Err(GatewayError::Rejected(
                ack.message.unwrap_or_else(|| "command refused".to_string()),
            ))
        }
    }
}

fn transport(err: reqwest::Error) -> GatewayError {
    GatewayError::Transport(err.to_string())
}

#[async_trait]
impl ActuatorGateway for HttpActuatorGateway {
    async fn set_platform_height(&self, height: u8) -> Result<(), GatewayError> {
        self.post_command("/actuators/platform_height", &PlatformHeightCommand { height })
            .await
    }

    async fn set_rotation_angle(&self, angle: Angle) -> Result<(), GatewayError> {
        self.post_command(
            "/actuators/rotation",
            &RotationCommand {
                angle: angle.degrees(),
            },
        )
        .await
    }

    async fn control_shutter(&self, action: ShutterAction) -> Result<(), GatewayError> {
        self.post_command("/actuators/shutter", &ShutterCommand { action })
            .await
    }

    async fn set_infrared_enabled(&self, enabled: bool) -> Result<(), GatewayError> {
        self.post_command("/actuators/infrared", &InfraredCommand { enabled })
            .await
    }

    async fn send_trim_request(&self) -> Result<(), GatewayError> {
        self.post_command("/actuators/trim", &serde_json::json!({}))
            .await
    }

    async fn trigger_watering(&self, plant: PlantType) -> Result<(), GatewayError> {
        self.post_command("/actuators/watering", &WateringCommand { plant })
            .await
    }

    async fn sun_position(&self) -> Result<Angle, GatewayError> {
        let response: SunPositionResponse = self
            .http
            .get(format!("{}/sensors/sun_position", self.base_url))
            .send()
            .await
            .map_err(transport)?
            .error_for_status()
            .map_err(transport)?
            .json()
            .await
            .map_err(transport)?;
        Ok(Angle::new(response.azimuth))
    }

    async fn perform_probe_scan(&self) -> Result<SoilMetrics, GatewayError> {
        let response: ScanResponse = self
            .http
            .post(format!("{}/probe/scan", self.base_url))
            .json(&serde_json::json!({}))
            .send()
            .await
            .map_err(transport)?
            .error_for_status()
            .map_err(transport)?
            .json()
            .await
            .map_err(transport)?;
        Ok(response.metrics)
    }
}
