use async_trait::async_trait;
use shared::{
    domain::{Angle, PlantType, ShutterAction, SoilMetrics},
    error::GatewayError,
};

mod http;
mod sim;

pub use http::HttpActuatorGateway;
pub use sim::SimulatedActuatorGateway;

/// Boundary contract for the physical robot's actuators and soil probe.
///
/// One operation per actuator concern. Every operation is independently
/// fallible and is never retried here; a single failed attempt surfaces
/// immediately to the caller. Commands to the same actuator must be applied
/// in submission order; serialization of in-flight commands to *different*
/// actuators is not guaranteed.
#[async_trait]
pub trait ActuatorGateway: Send + Sync {
    /// Target height of the shade-plant platform, 0..=100.
    async fn set_platform_height(&self, height: u8) -> Result<(), GatewayError>;

    /// Eccentric rotation of the platform.
    async fn set_rotation_angle(&self, angle: Angle) -> Result<(), GatewayError>;

    /// One shutter step in the given direction. The resulting coverage is
    /// estimated by the caller; hardware does not report a position.
    async fn control_shutter(&self, action: ShutterAction) -> Result<(), GatewayError>;

    async fn set_infrared_enabled(&self, enabled: bool) -> Result<(), GatewayError>;

    /// Asks the companion device to trim growth obstructing the infrared
    /// beam.
    async fn send_trim_request(&self) -> Result<(), GatewayError>;

    async fn trigger_watering(&self, plant: PlantType) -> Result<(), GatewayError>;

    /// Azimuth of the strongest reading on the light sensor array.
    async fn sun_position(&self) -> Result<Angle, GatewayError>;

    /// Runs the full probe sequence (deploy, sample, retract) and returns a
    /// completed snapshot.
    async fn perform_probe_scan(&self) -> Result<SoilMetrics, GatewayError>;
}

/// Fallback wiring for a console with no robot attached: every operation
/// reports the gateway as unavailable.
pub struct MissingActuatorGateway;

#[async_trait]
impl ActuatorGateway for MissingActuatorGateway {
    async fn set_platform_height(&self, _height: u8) -> Result<(), GatewayError> {
        Err(GatewayError::Unavailable)
    }

    async fn set_rotation_angle(&self, _angle: Angle) -> Result<(), GatewayError> {
        Err(GatewayError::Unavailable)
    }

    async fn control_shutter(&self, _action: ShutterAction) -> Result<(), GatewayError> {
        Err(GatewayError::Unavailable)
    }

    async fn set_infrared_enabled(&self, _enabled: bool) -> Result<(), GatewayError> {
        Err(GatewayError::Unavailable)
    }

    async fn send_trim_request(&self) -> Result<(), GatewayError> {
        Err(GatewayError::Unavailable)
    }

    async fn trigger_watering(&self, _plant: PlantType) -> Result<(), GatewayError> {
        Err(GatewayError::Unavailable)
    }

    async fn sun_position(&self) -> Result<Angle, GatewayError> {
        Err(GatewayError::Unavailable)
    }

    async fn perform_probe_scan(&self) -> Result<SoilMetrics, GatewayError> {
        Err(GatewayError::Unavailable)
    }
}

#[cfg(test)]
#[path = "tests/lib_tests.rs"]
mod tests;
