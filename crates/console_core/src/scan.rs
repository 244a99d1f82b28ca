//! Probe-scan coordination.
//!
//! One cycle walks `Idle -> Scanning -> Retracting -> Done`; a probe
//! failure drops straight back to `Idle`. At most one scan is ever in
//! flight: the trigger guard checks and commits the `Scanning` transition
//! under a single lock acquisition, so a concurrent trigger sees the new
//! state and becomes a no-op. `last_metrics` is only overwritten on a
//! successful probe, and advisory text is cleared the moment a cycle starts.

use shared::domain::ScanState;
use tracing::{info, warn};

use crate::{CommandKind, ConsoleCore, ConsoleEvent, ScanError};

impl ConsoleCore {
    pub(crate) async fn run_scan_cycle(&self) -> Result<bool, ScanError> {
        let started = {
            let mut state = self.state.lock().await;
            match state.scan_state {
                ScanState::Scanning | ScanState::Retracting => false,
                ScanState::Idle | ScanState::Done => {
                    state.scan_state = ScanState::Scanning;
                    state.advisory = None;
                    true
                }
            }
        };
        if !started {
            info!("scan: trigger ignored, scan already in flight");
            return Ok(false);
        }
        self.publish_scan_state(ScanState::Scanning).await;

        let metrics = match self.gateway.perform_probe_scan().await {
            Ok(metrics) => metrics,
            Err(err) => {
                // Discard the attempt: previous readings stay untouched and
                // the console is immediately scannable again.
                {
                    let mut state = self.state.lock().await;
                    state.scan_state = ScanState::Idle;
                }
                self.publish_scan_state(ScanState::Idle).await;
                warn!("scan: probe scan failed: {err}");
                let _ = self.events.send(ConsoleEvent::CommandFailed {
                    command: CommandKind::ProbeScan,
                    reason: err.to_string(),
                });
                return Err(ScanError::Probe(err));
            }
        };

        {
            let mut state = self.state.lock().await;
            state.last_metrics = Some(metrics);
            state.scan_state = ScanState::Retracting;
        }
        self.publish_scan_state(ScanState::Retracting).await;

        // The provider degrades internally, so this always resolves with
        // text and the Retracting -> Done transition is unconditional.
        let advisory = self.advisory.analyze(&metrics).await;
        {
            let mut state = self.state.lock().await;
            state.advisory = Some(advisory.clone());
            state.scan_state = ScanState::Done;
        }
        self.publish_scan_state(ScanState::Done).await;
        let _ = self.events.send(ConsoleEvent::AdvisoryReady(advisory));
        info!("scan: cycle complete");
        Ok(true)
    }

    async fn publish_scan_state(&self, scan_state: ScanState) {
        let snapshot = self.state.lock().await.clone();
        let _ = self.events.send(ConsoleEvent::StateChanged(snapshot));
        let _ = self
            .events
            .send(ConsoleEvent::ScanStateChanged(scan_state));
    }
}
