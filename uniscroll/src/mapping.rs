//! Conversions between native scroll positions and thumb/pointer space.
//!
//! All functions are total: inactive axes, zero lengths and non-finite
//! inputs collapse to "no translation" or "no scroll change" instead of
//! dividing by zero.

/// Pixel inset reserved at each end of the track.
pub const DEFAULT_GAP: f32 = 2.0;

/// Slack subtracted from the content length when bounding drag targets.
pub const DRAG_INSET: f32 = 4.0;

/// Thumb translation for a native scroll position.
///
/// `clamp(ratio * scroll_position, 0, (viewport_length - 2 * gap) * (1 - ratio))`
pub fn to_translation(scroll_position: f32, ratio: f32, viewport_length: f32, gap: f32) -> f32 {
    if !(ratio > 0.0) || !scroll_position.is_finite() {
        return 0.0;
    }
    let ratio = ratio.min(1.0);
    // f32::max discards NaN, so max_offset is always a finite upper bound >= 0
    let max_offset = ((viewport_length - 2.0 * gap) * (1.0 - ratio)).max(0.0);
    (ratio * scroll_position).clamp(0.0, max_offset)
}

/// Scroll position for a press on the track `click_offset` pixels from its
/// start.
///
/// Returns `None` when the press lands within half a thumb of the track start,
/// where it is treated as a press on the thumb rather than a jump.
pub fn track_click_to_scroll(
    click_offset: f32,
    thumb_length: f32,
    viewport_length: f32,
    content_length: f32,
) -> Option<f32> {
    if !(viewport_length > 0.0) || !(content_length > 0.0) || !click_offset.is_finite() {
        return None;
    }
    let half_thumb = thumb_length.max(0.0) / 2.0;
    let offset = click_offset.abs();
    if offset <= half_thumb {
        return None;
    }
    let scroll = ((offset - half_thumb) / viewport_length) * content_length;
    let max_scroll = (content_length - viewport_length).max(0.0);
    Some(scroll.clamp(0.0, max_scroll))
}

/// Scroll position while dragging, from the position at drag start and the
/// pointer's cumulative movement since the press.
///
/// Out-of-range results are rejected rather than clamped, so the content
/// keeps tracking the pointer exactly once it moves back into range.
pub fn drag_delta_to_scroll(
    start_scroll_distance: f32,
    cumulative_delta: f32,
    ratio: f32,
    content_length: f32,
) -> Option<f32> {
    if !(ratio > 0.0) || !(content_length > 0.0) {
        return None;
    }
    let position = start_scroll_distance + cumulative_delta / ratio;
    let max_position = (content_length - DRAG_INSET) * (1.0 - ratio.min(1.0));
    if !position.is_finite() || position < 0.0 || position > max_position {
        return None;
    }
    Some(position)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_translation_scales_by_ratio() {
        assert_eq!(to_translation(40.0, 0.25, 100.0, DEFAULT_GAP), 10.0);
        assert_eq!(to_translation(150.0, 0.25, 100.0, DEFAULT_GAP), 37.5);
    }

    #[test]
    fn test_translation_clamps_to_track_end() {
        // (100 - 4) * 0.75 = 72
        assert_eq!(to_translation(1000.0, 0.25, 100.0, DEFAULT_GAP), 72.0);
        assert_eq!(to_translation(-50.0, 0.25, 100.0, DEFAULT_GAP), 0.0);
    }

    #[test]
    fn test_translation_bounds_hold_for_any_ratio() {
        for step in 1..=20 {
            let ratio = step as f32 / 20.0;
            let max = (200.0 - 2.0 * DEFAULT_GAP) * (1.0 - ratio);
            for scroll in [-100.0, 0.0, 10.0, 333.0, 5000.0] {
                let offset = to_translation(scroll, ratio, 200.0, DEFAULT_GAP);
                assert!(offset >= 0.0, "ratio {ratio} scroll {scroll}");
                assert!(offset <= max + f32::EPSILON, "ratio {ratio} scroll {scroll}");
            }
        }
    }

    #[test]
    fn test_translation_degenerate_inputs() {
        assert_eq!(to_translation(50.0, 0.0, 100.0, DEFAULT_GAP), 0.0);
        assert_eq!(to_translation(50.0, f32::NAN, 100.0, DEFAULT_GAP), 0.0);
        assert_eq!(to_translation(f32::NAN, 0.5, 100.0, DEFAULT_GAP), 0.0);
        assert_eq!(to_translation(50.0, 0.5, f32::NAN, DEFAULT_GAP), 0.0);
        // Viewport smaller than both gaps
        assert_eq!(to_translation(50.0, 0.5, 3.0, DEFAULT_GAP), 0.0);
    }

    #[test]
    fn test_track_click_within_half_thumb_is_ignored() {
        assert_eq!(track_click_to_scroll(10.0, 24.0, 100.0, 400.0), None);
        assert_eq!(track_click_to_scroll(12.0, 24.0, 100.0, 400.0), None);
    }

    #[test]
    fn test_track_click_is_proportional_past_threshold() {
        // (42 - 12) / 100 * 400 = 120
        assert_eq!(track_click_to_scroll(42.0, 24.0, 100.0, 400.0), Some(120.0));
        // Twice the distance past the threshold, twice the scroll
        assert_eq!(track_click_to_scroll(72.0, 24.0, 100.0, 400.0), Some(240.0));
    }

    #[test]
    fn test_track_click_clamps_to_max_scroll() {
        assert_eq!(track_click_to_scroll(99.0, 24.0, 100.0, 400.0), Some(300.0));
    }

    #[test]
    fn test_track_click_unmeasured() {
        assert_eq!(track_click_to_scroll(50.0, 0.0, 0.0, 400.0), None);
        assert_eq!(track_click_to_scroll(50.0, 0.0, 100.0, 0.0), None);
    }

    #[test]
    fn test_drag_delta_scales_inverse_ratio() {
        assert_eq!(drag_delta_to_scroll(100.0, 10.0, 0.25, 400.0), Some(140.0));
        assert_eq!(drag_delta_to_scroll(100.0, -10.0, 0.25, 400.0), Some(60.0));
    }

    #[test]
    fn test_drag_delta_rejects_out_of_range() {
        assert_eq!(drag_delta_to_scroll(10.0, -5.0, 0.25, 400.0), None);
        // (400 - 4) * 0.75 = 297
        assert_eq!(drag_delta_to_scroll(290.0, 2.0, 0.25, 400.0), None);
        assert_eq!(drag_delta_to_scroll(290.0, 1.75, 0.25, 400.0), Some(297.0));
    }

    #[test]
    fn test_drag_delta_inactive_axis() {
        assert_eq!(drag_delta_to_scroll(0.0, 10.0, 0.0, 400.0), None);
        assert_eq!(drag_delta_to_scroll(0.0, 10.0, 0.5, 0.0), None);
    }
}
