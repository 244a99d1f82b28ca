//! Angular input device for the rotation widget.
//!
//! Maps pointer/touch coordinates on the circular control to a whole-degree
//! rotation value. The dial knows nothing about what the angle drives and
//! never talks to the gateway; the surface forwards emitted values to
//! [`crate::ConsoleCore::rotate_to`].

use std::sync::Mutex;

use shared::domain::Angle;

#[derive(Default)]
struct DialInner {
    sessions: u32,
    last_emitted: Option<Angle>,
}

#[derive(Default)]
pub struct RotationDial {
    inner: Mutex<DialInner>,
}

impl RotationDial {
    pub fn new() -> Self {
        Self::default()
    }

    /// Opens a drag session. Position updates are only possible through the
    /// returned guard, so updates outside a session cannot happen; the
    /// session ends on every exit path when the guard drops. Opening and
    /// closing a session emits nothing by itself.
    pub fn begin(&self) -> DragSession<'_> {
        self.inner.lock().unwrap().sessions += 1;
        DragSession { dial: self }
    }

    pub fn is_active(&self) -> bool {
        self.inner.lock().unwrap().sessions > 0
    }

    /// Most recent angle emitted by any session.
    pub fn last_angle(&self) -> Option<Angle> {
        self.inner.lock().unwrap().last_emitted
    }
}

/// Live drag session over a [`RotationDial`].
pub struct DragSession<'a> {
    dial: &'a RotationDial,
}

impl DragSession<'_> {
    /// Feeds one observed pointer position in screen coordinates together
    /// with the widget center, and emits the resulting angle. Emissions
    /// happen in the order positions are observed; there is no debouncing.
    ///
    /// With the pointer exactly on the center the bearing is undefined
    /// under `atan2`, so the dial holds the last emitted angle and emits
    /// nothing for that update (returns `None`); the display stays put
    /// instead of jittering.
    pub fn update(
        &self,
        pointer_x: f64,
        pointer_y: f64,
        center_x: f64,
        center_y: f64,
    ) -> Option<Angle> {
        let dx = pointer_x - center_x;
        let dy = pointer_y - center_y;
        if dx == 0.0 && dy == 0.0 {
            return None;
        }
        // Screen-space bearing: 0 degrees is up, 90 is right, y grows down.
        let angle = Angle::from_degrees_f64(dy.atan2(dx).to_degrees() + 90.0);
        self.dial.inner.lock().unwrap().last_emitted = Some(angle);
        Some(angle)
    }
}

impl Drop for DragSession<'_> {
    fn drop(&mut self) {
        let mut inner = self.dial.inner.lock().unwrap();
        inner.sessions = inner.sessions.saturating_sub(1);
    }
}
