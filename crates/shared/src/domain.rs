use std::fmt;

use serde::{Deserialize, Serialize};

/// Whole-degree bearing normalized into `[0, 360)`, measured clockwise from
/// the control's "up" axis (0 = up, 90 = right, matching screen space).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Angle(u16);

impl Angle {
    pub fn new(degrees: u16) -> Self {
        Self(degrees % 360)
    }

    /// Normalizes an arbitrary floating-point degree value, rounding to the
    /// nearest whole degree.
    pub fn from_degrees_f64(degrees: f64) -> Self {
        let mut wrapped = degrees % 360.0;
        if wrapped < 0.0 {
            wrapped += 360.0;
        }
        Self(wrapped.round() as u16 % 360)
    }

    pub fn degrees(self) -> u16 {
        self.0
    }

    /// Shortest angular distance to `other`. Consumers doing delta math see
    /// the 0/360 seam as continuous: 359 -> 0 is a step of 1, not 359.
    pub fn shortest_distance(self, other: Angle) -> u16 {
        let diff = i32::from(self.0).abs_diff(i32::from(other.0)) as u16;
        diff.min(360 - diff)
    }
}

impl fmt::Display for Angle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}°", self.0)
    }
}

/// Snapshot of one completed probe reading. Only a finished scan produces
/// one; it is never partially populated.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SoilMetrics {
    /// Volumetric soil moisture, percent.
    pub moisture: f32,
    pub ph: f32,
    /// Parts per million.
    pub nitrogen: f32,
    /// Degrees Celsius.
    pub temperature: f32,
    /// Lux.
    pub light_level: f32,
}

/// Phase of the probe-scan cycle. Mutated only by the scan coordinator;
/// everything else reads it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ScanState {
    Idle,
    Scanning,
    Retracting,
    Done,
}

/// Irrigation zone discriminator.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PlantType {
    ShadeLoving,
    SunLoving,
}

/// Shutter step direction: `Up` retracts coverage, `Down` extends it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ShutterAction {
    Up,
    Down,
}

/// Aggregate of commanded actuator positions and scan results for one
/// console session. Mutated only by the console core's command handlers and
/// the scan coordinator, never by the input device.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RobotState {
    /// Shade-plant platform height, 0..=100.
    pub platform_height: u8,
    /// Commanded eccentric rotation of the platform.
    pub rotation_angle: Angle,
    /// Estimated shutter coverage, 0..=100. Client-side estimate only;
    /// hardware never confirms the resulting position.
    pub shutter_level: u8,
    /// Azimuth of the strongest light reading.
    pub sun_azimuth: Angle,
    pub infrared_enabled: bool,
    pub scan_state: ScanState,
    /// Reading from the most recent successful scan, if any.
    pub last_metrics: Option<SoilMetrics>,
    /// Advisory text for `last_metrics`; cleared when a new scan starts.
    pub advisory: Option<String>,
}

impl RobotState {
    /// Session-start placeholders shown before the first acknowledgment or
    /// scan arrives.
    pub fn initial() -> Self {
        Self {
            platform_height: 50,
            rotation_angle: Angle::new(0),
            shutter_level: 20,
            sun_azimuth: Angle::new(135),
            infrared_enabled: false,
            scan_state: ScanState::Idle,
            last_metrics: None,
            advisory: None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn angles_normalize_into_range() {
        assert_eq!(Angle::new(360).degrees(), 0);
        assert_eq!(Angle::new(725).degrees(), 5);
        assert_eq!(Angle::from_degrees_f64(-90.0).degrees(), 270);
        assert_eq!(Angle::from_degrees_f64(-0.4).degrees(), 0);
        assert_eq!(Angle::from_degrees_f64(359.6).degrees(), 0);
        assert_eq!(Angle::from_degrees_f64(719.0).degrees(), 359);
    }

    #[test]
    fn seam_is_continuous_for_delta_math() {
        assert_eq!(Angle::new(359).shortest_distance(Angle::new(0)), 1);
        assert_eq!(Angle::new(0).shortest_distance(Angle::new(359)), 1);
        assert_eq!(Angle::new(90).shortest_distance(Angle::new(270)), 180);
        assert_eq!(Angle::new(45).shortest_distance(Angle::new(45)), 0);
    }

    #[test]
    fn initial_state_uses_session_placeholders() {
        let state = RobotState::initial();
        assert_eq!(state.platform_height, 50);
        assert_eq!(state.shutter_level, 20);
        assert_eq!(state.sun_azimuth, Angle::new(135));
        assert_eq!(state.scan_state, ScanState::Idle);
        assert!(state.last_metrics.is_none());
        assert!(state.advisory.is_none());
        assert!(!state.infrared_enabled);
    }

    #[test]
    fn angle_serializes_as_bare_number() {
        let json = serde_json::to_string(&Angle::new(135)).expect("serialize");
        assert_eq!(json, "135");
        let back: Angle = serde_json::from_str(&json).expect("deserialize");
        assert_eq!(back, Angle::new(135));
    }
}
