use async_trait::async_trait;
use rand::Rng;
use shared::{
    domain::{Angle, PlantType, ShutterAction, SoilMetrics},
    error::GatewayError,
};
use tokio::time::{sleep, Duration};
use tracing::info;

use crate::ActuatorGateway;

/// Stand-in for the robot controller: latency-faithful acknowledgments and
/// randomized in-range probe readings, so the console runs end to end with
/// no hardware attached.
pub struct SimulatedActuatorGateway {
    command_latency: Duration,
    scan_duration: Duration,
}

impl SimulatedActuatorGateway {
    pub fn new() -> Self {
        Self {
            command_latency: Duration::from_millis(100),
            scan_duration: Duration::from_millis(2500),
        }
    }

    /// Simulator with no artificial latency, for scripted sessions.
    pub fn instant() -> Self {
        Self {
            command_latency: Duration::ZERO,
            scan_duration: Duration::ZERO,
        }
    }

    fn sample_metrics() -> SoilMetrics {
        let mut rng = rand::rng();
        SoilMetrics {
            moisture: rng.random_range(30.0..70.0_f32).round(),
            ph: (rng.random_range(5.5..7.5_f32) * 10.0).round() / 10.0,
            nitrogen: rng.random_range(80.0..180.0_f32).round(),
            temperature: rng.random_range(18.0..28.0_f32).round(),
            light_level: rng.random_range(200.0..5200.0_f32).round(),
        }
    }
}

impl Default for SimulatedActuatorGateway {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl ActuatorGateway for SimulatedActuatorGateway {
    async fn set_platform_height(&self, height: u8) -> Result<(), GatewayError> {
        sleep(self.command_latency).await;
        info!(height, "sim: platform height commanded");
        Ok(())
    }

    async fn set_rotation_angle(&self, angle: Angle) -> Result<(), GatewayError> {
        sleep(self.command_latency / 2).await;
        info!(angle = angle.degrees(), "sim: rotation commanded");
        Ok(())
    }

    async fn control_shutter(&self, action: ShutterAction) -> Result<(), GatewayError> {
        sleep(self.command_latency).await;
        info!(?action, "sim: shutter step commanded");
        Ok(())
    }

    async fn set_infrared_enabled(&self, enabled: bool) -> Result<(), GatewayError> {
        sleep(self.command_latency).await;
        info!(enabled, "sim: infrared detection toggled");
        Ok(())
    }

    async fn send_trim_request(&self) -> Result<(), GatewayError> {
        sleep(self.command_latency).await;
        info!("sim: trim request forwarded to companion device");
        Ok(())
    }

    async fn trigger_watering(&self, plant: PlantType) -> Result<(), GatewayError> {
        sleep(self.command_latency * 10).await;
        info!(?plant, "sim: watering cycle run");
        Ok(())
    }

    async fn sun_position(&self) -> Result<Angle, GatewayError> {
        sleep(self.command_latency * 2).await;
        // Fixed south-east sun, matching the session-start placeholder.
        Ok(Angle::new(135))
    }

    async fn perform_probe_scan(&self) -> Result<SoilMetrics, GatewayError> {
        info!("sim: probe sequence started");
        sleep(self.scan_duration).await;
        Ok(Self::sample_metrics())
    }
}
