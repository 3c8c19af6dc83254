//! Presentation hooks derived from [`ScrollbarOptions`].
//!
//! Nothing here affects scrolling; it is what a host needs to render the
//! wrapper, the content box and the bars with the configured look.

use crate::color::{self, Rgba};
use crate::options::{ScrollbarOptions, StyleMap};

pub const WRAPPER_CLASS: &str = "uni-scrollbar-wrapper";
pub const CONTENT_CLASS: &str = "uni-scrollbar-content";
pub const BAR_CLASS: &str = "uni-scrollbar-bar";
pub const BAR_HIDDEN_CLASS: &str = "uni-scrollbar-bar__hidden";
pub const THUMB_CLASS: &str = "uni-scrollbar-bar-thumb";

const DEFAULT_WIDTH: &str = "6px";
const DEFAULT_RADIUS: &str = "4px";
const TRACK_BACKGROUND: Rgba = Rgba::new(0, 0, 0, 0.1);
const TRACK_HOVER_BACKGROUND: Rgba = Rgba::new(0, 0, 0, 0.15);
const THUMB_BACKGROUND: Rgba = Rgba::new(0, 0, 0, 0.25);
const THUMB_HOVER_BACKGROUND: Rgba = Rgba::new(0, 0, 0, 0.45);

/// Custom properties consumed by the bar stylesheet, in a stable order.
///
/// Colors are normalized to `rgba(...)`; unparsable colors fall back to the
/// defaults. The thumb's corner radius follows the track's unless set.
pub fn style_variables(options: &ScrollbarOptions) -> Vec<(&'static str, String)> {
    let track = &options.track;
    let thumb = &options.thumb;
    let track_radius = track.border_radius.as_deref().unwrap_or(DEFAULT_RADIUS);

    vec![
        ("--uniscrollbar-gap", format!("{}px", options.gap)),
        (
            "--uniscrollbar-track-width",
            track.width.as_deref().unwrap_or(DEFAULT_WIDTH).to_string(),
        ),
        ("--uniscrollbar-track-border-radius", track_radius.to_string()),
        (
            "--uniscrollbar-track-background-color",
            color::parse_or(track.background_color.as_deref(), TRACK_BACKGROUND).to_css(),
        ),
        (
            "--uniscrollbar-track-hover-background-color",
            color::parse_or(
                track.hover_background_color.as_deref(),
                TRACK_HOVER_BACKGROUND,
            )
            .to_css(),
        ),
        (
            "--uniscrollbar-thumb-width",
            thumb.width.as_deref().unwrap_or(DEFAULT_WIDTH).to_string(),
        ),
        (
            "--uniscrollbar-thumb-border-radius",
            thumb
                .border_radius
                .as_deref()
                .unwrap_or(track_radius)
                .to_string(),
        ),
        (
            "--uniscrollbar-thumb-background-color",
            color::parse_or(thumb.background_color.as_deref(), THUMB_BACKGROUND).to_css(),
        ),
        (
            "--uniscrollbar-thumb-hover-background-color",
            color::parse_or(
                thumb.hover_background_color.as_deref(),
                THUMB_HOVER_BACKGROUND,
            )
            .to_css(),
        ),
    ]
}

/// Style of the outermost element: the passthrough style plus the variables.
pub fn root_style(options: &ScrollbarOptions) -> StyleMap {
    let mut style = options.style.clone();
    for (name, value) in style_variables(options) {
        style.insert(name.to_string(), value);
    }
    style
}

/// Style of the viewport: the wrapper style with the height constraints.
pub fn viewport_style(options: &ScrollbarOptions) -> StyleMap {
    let mut style = options.wrapper_style.clone();
    if let Some(height) = options.height {
        style.insert("height".to_string(), format!("{height}px"));
    }
    if let Some(max_height) = options.max_height {
        style.insert("max-height".to_string(), format!("{max_height}px"));
    }
    style
}

pub fn wrapper_class_names(options: &ScrollbarOptions) -> String {
    join_classes([Some(WRAPPER_CLASS), options.wrapper_class.as_deref()])
}

pub fn content_class_names(options: &ScrollbarOptions) -> String {
    join_classes([Some(CONTENT_CLASS), options.content_class.as_deref()])
}

/// Join the present, non-empty class names with spaces.
pub fn join_classes<'a>(classes: impl IntoIterator<Item = Option<&'a str>>) -> String {
    classes
        .into_iter()
        .flatten()
        .filter(|class| !class.is_empty())
        .collect::<Vec<_>>()
        .join(" ")
}
