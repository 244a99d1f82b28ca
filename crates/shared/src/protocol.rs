//! Wire types for the JSON-over-HTTP actuator gateway. These belong to that
//! concrete transport, not to the gateway contract itself; other transports
//! are free to define their own encoding.

use serde::{Deserialize, Serialize};

use crate::domain::{PlantType, ShutterAction, SoilMetrics};

/// Robot controller response to a command post. `accepted: false` means the
/// controller understood the request but refused to act on it.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CommandAck {
    pub accepted: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PlatformHeightCommand {
    pub height: u8,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RotationCommand {
    pub angle: u16,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ShutterCommand {
    pub action: ShutterAction,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct InfraredCommand {
    pub enabled: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WateringCommand {
    pub plant: PlantType,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SunPositionResponse {
    pub azimuth: u16,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScanResponse {
    pub metrics: SoilMetrics,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn command_enums_use_snake_case_on_the_wire() {
        let shutter = serde_json::to_string(&ShutterCommand {
            action: ShutterAction::Up,
        })
        .expect("serialize");
        assert_eq!(shutter, r#"{"action":"up"}"#);

        let watering = serde_json::to_string(&WateringCommand {
            plant: PlantType::ShadeLoving,
        })
        .expect("serialize");
        assert_eq!(watering, r#"{"plant":"shade_loving"}"#);
    }

    #[test]
    fn ack_message_is_optional() {
        let ack: CommandAck = serde_json::from_str(r#"{"accepted":true}"#).expect("deserialize");
        assert!(ack.accepted);
        assert!(ack.message.is_none());
    }
}
