//! Thumb drag state machine.
//!
//! `Idle -> Dragging -> Idle`. This module holds only the state and the
//! math; the container attaches document listeners and selection
//! suppression around it.

use crate::axis::Axis;
use crate::event::{PointerButton, PointerEvent};
use crate::geometry::AxisGeometry;
use crate::mapping::drag_delta_to_scroll;

/// An in-progress thumb drag.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DragSession {
    pub axis: Axis,
    /// Native scroll position implied by the thumb when the drag began.
    pub start_scroll_distance: f32,
    /// Pointer coordinate along the axis at the press.
    pub origin: f32,
    ratio: f32,
    content_length: f32,
}

impl DragSession {
    /// Scroll position for the pointer now at `coordinate`, or `None` when
    /// it is out of range.
    pub fn scroll_for(&self, coordinate: f32) -> Option<f32> {
        drag_delta_to_scroll(
            self.start_scroll_distance,
            coordinate - self.origin,
            self.ratio,
            self.content_length,
        )
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub enum DragState {
    #[default]
    Idle,
    Dragging(DragSession),
}

impl DragState {
    pub fn is_dragging(&self) -> bool {
        matches!(self, DragState::Dragging(_))
    }

    pub fn session(&self) -> Option<&DragSession> {
        match self {
            DragState::Dragging(session) => Some(session),
            DragState::Idle => None,
        }
    }

    /// Whether a press may start a drag: primary button, no modifiers.
    pub fn accepts(event: &PointerEvent) -> bool {
        event.button == PointerButton::Primary && event.modifiers.none()
    }

    /// Start dragging the thumb of `axis`, which currently sits at
    /// `translation`. Returns `false` and stays put when the press does not
    /// qualify, the axis is inactive, or a drag is already running.
    pub fn begin(
        &mut self,
        axis: Axis,
        event: &PointerEvent,
        translation: f32,
        geometry: &AxisGeometry,
    ) -> bool {
        if self.is_dragging() || !Self::accepts(event) || !geometry.active || !(geometry.ratio > 0.0) {
            return false;
        }

        let session = DragSession {
            axis,
            start_scroll_distance: translation / geometry.ratio,
            origin: event.coordinate(axis),
            ratio: geometry.ratio,
            content_length: geometry.content_length,
        };
        log::debug!(
            "[drag] start axis={} origin={} start_scroll={}",
            axis,
            session.origin,
            session.start_scroll_distance
        );
        *self = DragState::Dragging(session);
        true
    }

    /// Feed a pointer move. Returns the scroll position to apply, if any.
    pub fn drag_to(&self, event: &PointerEvent) -> Option<f32> {
        let session = self.session()?;
        let target = session.scroll_for(event.coordinate(session.axis));
        if target.is_none() {
            log::trace!(
                "[drag] ignoring out-of-range move to {}",
                event.coordinate(session.axis)
            );
        }
        target
    }

    /// Finish the drag, returning the session that ended.
    pub fn end(&mut self) -> Option<DragSession> {
        match std::mem::take(self) {
            DragState::Dragging(session) => {
                log::debug!("[drag] end axis={}", session.axis);
                Some(session)
            }
            DragState::Idle => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::event::Modifiers;

    fn tall() -> AxisGeometry {
        // viewport 100, content 400
        AxisGeometry::compute(100.0, 400.0, 2.0)
    }

    #[test]
    fn test_begin_records_start_distance() {
        let mut state = DragState::default();
        assert!(state.begin(Axis::Vertical, &PointerEvent::down(95.0, 50.0), 25.0, &tall()));

        let session = state.session().unwrap();
        assert_eq!(session.start_scroll_distance, 100.0);
        assert_eq!(session.origin, 50.0);
    }

    #[test]
    fn test_begin_ignores_other_buttons_and_modifiers() {
        let mut state = DragState::default();
        let right = PointerEvent::down(0.0, 0.0).with_button(PointerButton::Secondary);
        let middle = PointerEvent::down(0.0, 0.0).with_button(PointerButton::Middle);
        let ctrl = PointerEvent::down(0.0, 0.0).with_modifiers(Modifiers::ctrl());

        assert!(!state.begin(Axis::Vertical, &right, 0.0, &tall()));
        assert!(!state.begin(Axis::Vertical, &middle, 0.0, &tall()));
        assert!(!state.begin(Axis::Vertical, &ctrl, 0.0, &tall()));
        assert_eq!(state, DragState::Idle);
    }

    #[test]
    fn test_begin_requires_active_axis() {
        let mut state = DragState::default();
        let fits = AxisGeometry::compute(100.0, 100.0, 2.0);
        assert!(!state.begin(Axis::Horizontal, &PointerEvent::down(0.0, 0.0), 0.0, &fits));
        let unmeasured = AxisGeometry::compute(100.0, 0.0, 2.0);
        assert!(!state.begin(Axis::Horizontal, &PointerEvent::down(0.0, 0.0), 0.0, &unmeasured));
    }

    #[test]
    fn test_drag_round_trip() {
        let mut state = DragState::default();
        state.begin(Axis::Vertical, &PointerEvent::down(95.0, 40.0), 10.0, &tall());

        assert_eq!(state.drag_to(&PointerEvent::moved(95.0, 52.0)), Some(88.0));
        assert_eq!(state.drag_to(&PointerEvent::moved(95.0, 40.0)), Some(40.0));
    }

    #[test]
    fn test_end_returns_to_idle() {
        let mut state = DragState::default();
        state.begin(Axis::Vertical, &PointerEvent::down(95.0, 40.0), 10.0, &tall());
        assert!(state.end().is_some());
        assert!(!state.is_dragging());
        assert_eq!(state.drag_to(&PointerEvent::moved(95.0, 60.0)), None);
        assert!(state.end().is_none());
    }
}
