use std::sync::Arc;

use advisory::{AdvisoryProvider, LocalAdvisory};
use gateway::{ActuatorGateway, MissingActuatorGateway};
use shared::{
    domain::{Angle, PlantType, RobotState, ScanState, ShutterAction},
    error::GatewayError,
};
use thiserror::Error;
use tokio::{
    sync::{broadcast, watch, Mutex},
    task::JoinHandle,
};
use tracing::{info, warn};

mod dial;
mod scan;

pub use dial::{DragSession, RotationDial};

/// Fixed change in estimated shutter coverage per step command.
const SHUTTER_STEP: u8 = 10;

/// Events published to the control surface. The surface only renders; all
/// state mutation stays in the core.
#[derive(Debug, Clone)]
pub enum ConsoleEvent {
    StateChanged(RobotState),
    ScanStateChanged(ScanState),
    SunPositionUpdated(Angle),
    AdvisoryReady(String),
    CommandFailed { command: CommandKind, reason: String },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CommandKind {
    PlatformHeight,
    Rotation,
    Shutter,
    Infrared,
    Trim,
    Watering,
    SunPosition,
    ProbeScan,
}

#[derive(Debug, Error)]
pub enum TrimError {
    #[error("infrared detection is disabled; cannot request a trim")]
    InfraredDisabled,
    #[error(transparent)]
    Gateway(#[from] GatewayError),
}

#[derive(Debug, Error)]
pub enum ScanError {
    #[error("probe scan failed: {0}")]
    Probe(#[source] GatewayError),
}

/// Owner of the session's [`RobotState`]. Commands apply their optimistic
/// state update, then go to the gateway; a failed acknowledgment surfaces to
/// the caller and over the event stream but never rolls the displayed value
/// back. Scan orchestration lives in [`scan`].
pub struct ConsoleCore {
    gateway: Arc<dyn ActuatorGateway>,
    advisory: Arc<dyn AdvisoryProvider>,
    state: Mutex<RobotState>,
    rotation_tx: watch::Sender<Option<Angle>>,
    rotation_task: JoinHandle<()>,
    events: broadcast::Sender<ConsoleEvent>,
}

impl ConsoleCore {
    pub fn new(
        gateway: Arc<dyn ActuatorGateway>,
        advisory: Arc<dyn AdvisoryProvider>,
    ) -> Arc<Self> {
        let (events, _) = broadcast::channel(256);
        let (rotation_tx, rotation_rx) = watch::channel(None);
        let rotation_task = spawn_rotation_task(Arc::clone(&gateway), rotation_rx, events.clone());
        Arc::new(Self {
            gateway,
            advisory,
            state: Mutex::new(RobotState::initial()),
            rotation_tx,
            rotation_task,
            events,
        })
    }

    /// Core with no robot attached: every command reports the gateway as
    /// unavailable and analysis falls back to the local rules.
    pub fn detached() -> Arc<Self> {
        Self::new(Arc::new(MissingActuatorGateway), Arc::new(LocalAdvisory))
    }

    pub fn subscribe(&self) -> broadcast::Receiver<ConsoleEvent> {
        self.events.subscribe()
    }

    /// Cloned snapshot for the surface to render.
    pub async fn state(&self) -> RobotState {
        self.state.lock().await.clone()
    }

    async fn mutate_state<F: FnOnce(&mut RobotState)>(&self, apply: F) -> RobotState {
        let snapshot = {
            let mut state = self.state.lock().await;
            apply(&mut state);
            state.clone()
        };
        let _ = self
            .events
            .send(ConsoleEvent::StateChanged(snapshot.clone()));
        snapshot
    }

    fn report_failure(&self, command: CommandKind, err: &GatewayError) {
        warn!(?command, "actuator: command failed: {err}");
        let _ = self.events.send(ConsoleEvent::CommandFailed {
            command,
            reason: err.to_string(),
        });
    }

    /// Commands the shade-plant platform to `height`, clamped to 0..=100.
    /// The displayed value updates before the acknowledgment arrives.
    pub async fn set_platform_height(&self, height: u8) -> Result<(), GatewayError> {
        let height = height.min(100);
        self.mutate_state(|state| state.platform_height = height)
            .await;
        self.gateway
            .set_platform_height(height)
            .await
            .map_err(|err| {
                self.report_failure(CommandKind::PlatformHeight, &err);
                err
            })
    }

    /// Shows `angle` immediately and enqueues the rotation command; never
    /// blocks on the acknowledgment. A dedicated worker drains the queue
    /// sequentially, coalescing rapid updates to the most recent angle, so
    /// the last value submitted is the last one applied.
    pub async fn rotate_to(&self, angle: Angle) {
        self.mutate_state(|state| state.rotation_angle = angle)
            .await;
        self.rotation_tx.send_replace(Some(angle));
    }

    /// One shutter step: `Up` retracts coverage by a fixed step clamped to
    /// 0, `Down` extends it clamped to 100. The stored level is a
    /// client-side estimate of the resulting position; hardware never
    /// confirms it.
    pub async fn control_shutter(&self, action: ShutterAction) -> Result<(), GatewayError> {
        self.mutate_state(|state| {
            state.shutter_level = match action {
                ShutterAction::Up => state.shutter_level.saturating_sub(SHUTTER_STEP),
                ShutterAction::Down => (state.shutter_level + SHUTTER_STEP).min(100),
            };
        })
        .await;
        self.gateway.control_shutter(action).await.map_err(|err| {
            self.report_failure(CommandKind::Shutter, &err);
            err
        })
    }

    pub async fn set_infrared_enabled(&self, enabled: bool) -> Result<(), GatewayError> {
        self.mutate_state(|state| state.infrared_enabled = enabled)
            .await;
        self.gateway
            .set_infrared_enabled(enabled)
            .await
            .map_err(|err| {
                self.report_failure(CommandKind::Infrared, &err);
                err
            })
    }

    /// Asks the companion device to trim growth obstructing the infrared
    /// beam. Refused while infrared detection is off.
    pub async fn request_trim(&self) -> Result<(), TrimError> {
        if !self.state.lock().await.infrared_enabled {
            return Err(TrimError::InfraredDisabled);
        }
        info!("actuator: trim requested");
        self.gateway.send_trim_request().await.map_err(|err| {
            self.report_failure(CommandKind::Trim, &err);
            TrimError::Gateway(err)
        })
    }

    pub async fn trigger_watering(&self, plant: PlantType) -> Result<(), GatewayError> {
        info!(?plant, "actuator: watering requested");
        self.gateway.trigger_watering(plant).await.map_err(|err| {
            self.report_failure(CommandKind::Watering, &err);
            err
        })
    }

    /// Reads the light-sensor azimuth. The stored value changes only on a
    /// successful read.
    pub async fn refresh_sun_position(&self) -> Result<Angle, GatewayError> {
        let azimuth = self.gateway.sun_position().await.map_err(|err| {
            self.report_failure(CommandKind::SunPosition, &err);
            err
        })?;
        self.mutate_state(|state| state.sun_azimuth = azimuth).await;
        let _ = self.events.send(ConsoleEvent::SunPositionUpdated(azimuth));
        Ok(azimuth)
    }

    /// Runs one probe-scan cycle. `Ok(true)` is a completed cycle,
    /// `Ok(false)` a trigger ignored because a scan was already in flight.
    pub async fn trigger_scan(&self) -> Result<bool, ScanError> {
        self.run_scan_cycle().await
    }
}

impl Drop for ConsoleCore {
    fn drop(&mut self) {
        // A rotation command resolving after teardown only held clones of
        // the gateway handle and event sender; aborting here discards it
        // without side effects.
        self.rotation_task.abort();
    }
}

fn spawn_rotation_task(
    gateway: Arc<dyn ActuatorGateway>,
    mut requests: watch::Receiver<Option<Angle>>,
    events: broadcast::Sender<ConsoleEvent>,
) -> JoinHandle<()> {
    tokio::spawn(async move {
        while requests.changed().await.is_ok() {
            let Some(angle) = *requests.borrow_and_update() else {
                continue;
            };
            if let Err(err) = gateway.set_rotation_angle(angle).await {
                warn!(
                    angle = angle.degrees(),
                    "actuator: rotation command failed: {err}"
                );
                let _ = events.send(ConsoleEvent::CommandFailed {
                    command: CommandKind::Rotation,
                    reason: err.to_string(),
                });
            }
        }
    })
}

#[cfg(test)]
#[path = "tests/lib_tests.rs"]
mod tests;
