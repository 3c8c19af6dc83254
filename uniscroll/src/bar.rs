//! Per-axis bar presentation and hit testing.

use crate::axis::Axis;
use crate::layout::Rect;
use crate::style::{BAR_CLASS, BAR_HIDDEN_CLASS, THUMB_CLASS, join_classes};

/// Part of a bar under the pointer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BarPart {
    Track,
    Thumb,
}

/// What a host needs to draw one bar.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BarView {
    pub axis: Axis,
    pub hidden: bool,
    pub thumb_length: f32,
    /// Thumb offset from the track start.
    pub translation: f32,
}

impl BarView {
    pub fn class_names(&self) -> String {
        join_classes([
            Some(BAR_CLASS),
            Some(self.axis.config().class),
            self.hidden.then_some(BAR_HIDDEN_CLASS),
        ])
    }

    pub fn thumb_class_names(&self) -> &'static str {
        THUMB_CLASS
    }

    /// CSS transform positioning the thumb, e.g. `translateY(37.5px)`.
    pub fn thumb_transform(&self) -> String {
        format!("{}({}px)", self.axis.config().translate, self.translation)
    }

    /// Size property and value the thumb length is applied to.
    pub fn thumb_size(&self) -> (&'static str, f32) {
        (self.axis.config().size, self.thumb_length)
    }

    /// Thumb rectangle within `track`.
    pub fn thumb_rect(&self, track: Rect) -> Rect {
        track.slice(self.axis, self.translation, self.thumb_length)
    }

    /// Which part of the bar laid out at `track` contains the point.
    pub fn hit_test(&self, track: Rect, x: f32, y: f32) -> Option<BarPart> {
        if !track.contains(x, y) {
            return None;
        }
        if self.thumb_rect(track).contains(x, y) {
            Some(BarPart::Thumb)
        } else {
            Some(BarPart::Track)
        }
    }
}
