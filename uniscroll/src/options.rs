use std::collections::BTreeMap;
use std::time::Duration;

use serde::Deserialize;

use crate::error::Result;
use crate::mapping::DEFAULT_GAP;
use crate::visibility::DEFAULT_HIDDEN_DELAY;

/// Passthrough style declarations (`property -> value`).
pub type StyleMap = BTreeMap<String, String>;

/// Styling of a track or thumb. Unset fields fall back to defaults when
/// style variables are produced.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct BarProps {
    pub width: Option<String>,
    pub border_radius: Option<String>,
    pub background_color: Option<String>,
    pub hover_background_color: Option<String>,
}

impl BarProps {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn width(mut self, width: impl Into<String>) -> Self {
        self.width = Some(width.into());
        self
    }

    pub fn border_radius(mut self, radius: impl Into<String>) -> Self {
        self.border_radius = Some(radius.into());
        self
    }

    pub fn background_color(mut self, color: impl Into<String>) -> Self {
        self.background_color = Some(color.into());
        self
    }

    pub fn hover_background_color(mut self, color: impl Into<String>) -> Self {
        self.hover_background_color = Some(color.into());
        self
    }
}

/// Construction options of a scroll container.
///
/// Deserializes from the camelCase props shape (`alwaysShow`, `hiddenDelay`,
/// `trackProps`, ...). The misspelled `wraperStyle`/`wraperClass` keys are
/// accepted as aliases.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ScrollbarOptions {
    /// Fixed viewport height in pixels.
    pub height: Option<f32>,
    /// Maximum viewport height in pixels.
    pub max_height: Option<f32>,
    /// Style of the outermost element.
    pub style: StyleMap,
    #[serde(alias = "wraperStyle")]
    pub wrapper_style: StyleMap,
    #[serde(alias = "wraperClass")]
    pub wrapper_class: Option<String>,
    pub content_style: StyleMap,
    pub content_class: Option<String>,
    /// Keep thumbs visible whenever content overflows.
    pub always_show: bool,
    /// Milliseconds of inactivity before thumbs hide.
    #[serde(rename = "hiddenDelay")]
    pub hidden_delay_ms: f64,
    /// Pixel inset at both ends of each track.
    pub gap: f32,
    #[serde(rename = "trackProps")]
    pub track: BarProps,
    #[serde(rename = "thumbProps")]
    pub thumb: BarProps,
}

impl Default for ScrollbarOptions {
    fn default() -> Self {
        Self {
            height: None,
            max_height: None,
            style: StyleMap::new(),
            wrapper_style: StyleMap::new(),
            wrapper_class: None,
            content_style: StyleMap::new(),
            content_class: None,
            always_show: false,
            hidden_delay_ms: DEFAULT_HIDDEN_DELAY.as_millis() as f64,
            gap: DEFAULT_GAP,
            track: BarProps::default(),
            thumb: BarProps::default(),
        }
    }
}

impl ScrollbarOptions {
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse options from JSON props.
    pub fn from_json(json: &str) -> Result<Self> {
        let options: Self = serde_json::from_str(json)?;
        Ok(options.sanitized())
    }

    pub fn height(mut self, height: f32) -> Self {
        self.height = Some(height);
        self
    }

    pub fn max_height(mut self, max_height: f32) -> Self {
        self.max_height = Some(max_height);
        self
    }

    pub fn style(mut self, property: impl Into<String>, value: impl Into<String>) -> Self {
        self.style.insert(property.into(), value.into());
        self
    }

    pub fn wrapper_style(mut self, property: impl Into<String>, value: impl Into<String>) -> Self {
        self.wrapper_style.insert(property.into(), value.into());
        self
    }

    pub fn wrapper_class(mut self, class: impl Into<String>) -> Self {
        self.wrapper_class = Some(class.into());
        self
    }

    pub fn content_style(mut self, property: impl Into<String>, value: impl Into<String>) -> Self {
        self.content_style.insert(property.into(), value.into());
        self
    }

    pub fn content_class(mut self, class: impl Into<String>) -> Self {
        self.content_class = Some(class.into());
        self
    }

    pub fn always_show(mut self, always_show: bool) -> Self {
        self.always_show = always_show;
        self
    }

    pub fn hidden_delay(mut self, delay: Duration) -> Self {
        self.hidden_delay_ms = delay.as_secs_f64() * 1000.0;
        self
    }

    pub fn gap(mut self, gap: f32) -> Self {
        self.gap = gap;
        self
    }

    pub fn track(mut self, track: BarProps) -> Self {
        self.track = track;
        self
    }

    pub fn thumb(mut self, thumb: BarProps) -> Self {
        self.thumb = thumb;
        self
    }

    /// Hide delay, with negative or non-finite values treated as zero and
    /// delays too long to represent saturating at [`Duration::MAX`].
    pub fn hidden_delay_duration(&self) -> Duration {
        if self.hidden_delay_ms.is_finite() && self.hidden_delay_ms > 0.0 {
            Duration::try_from_secs_f64(self.hidden_delay_ms / 1000.0).unwrap_or(Duration::MAX)
        } else {
            Duration::ZERO
        }
    }

    /// Clamp out-of-range values instead of rejecting them.
    pub fn sanitized(mut self) -> Self {
        let valid_length = |value: Option<f32>, name: &str| match value {
            Some(v) if v.is_finite() && v >= 0.0 => Some(v),
            Some(v) => {
                log::warn!("[options] ignoring {} of {}", name, v);
                None
            }
            None => None,
        };
        self.height = valid_length(self.height, "height");
        self.max_height = valid_length(self.max_height, "maxHeight");

        if !(self.hidden_delay_ms.is_finite() && self.hidden_delay_ms >= 0.0) {
            log::warn!("[options] clamping hiddenDelay of {} to 0", self.hidden_delay_ms);
            self.hidden_delay_ms = 0.0;
        }
        if !(self.gap.is_finite() && self.gap >= 0.0) {
            log::warn!("[options] clamping gap of {} to 0", self.gap);
            self.gap = 0.0;
        }
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let options = ScrollbarOptions::default();
        assert!(!options.always_show);
        assert_eq!(options.hidden_delay_duration(), Duration::from_millis(1000));
        assert_eq!(options.gap, 2.0);
    }

    #[test]
    fn test_from_json_props() {
        let options = ScrollbarOptions::from_json(
            r#"{
                "height": 300,
                "alwaysShow": true,
                "hiddenDelay": 250,
                "wraperClass": "list",
                "wraperStyle": { "padding": "4px" },
                "trackProps": { "width": "8px", "backgroundColor": "rgba(0, 0, 0, 0.2)" },
                "thumbProps": { "hoverBackgroundColor": "red" }
            }"#,
        )
        .unwrap();

        assert_eq!(options.height, Some(300.0));
        assert!(options.always_show);
        assert_eq!(options.hidden_delay_duration(), Duration::from_millis(250));
        assert_eq!(options.wrapper_class.as_deref(), Some("list"));
        assert_eq!(options.wrapper_style.get("padding").map(String::as_str), Some("4px"));
        assert_eq!(options.track.width.as_deref(), Some("8px"));
        assert_eq!(options.thumb.hover_background_color.as_deref(), Some("red"));
        assert_eq!(options.thumb.width, None);
    }

    #[test]
    fn test_from_json_rejects_malformed() {
        assert!(ScrollbarOptions::from_json("{ \"height\": \"tall\" }").is_err());
    }

    #[test]
    fn test_sanitize_clamps() {
        let options = ScrollbarOptions::new()
            .height(-10.0)
            .max_height(f32::NAN)
            .gap(-1.0);
        let options = ScrollbarOptions {
            hidden_delay_ms: -500.0,
            ..options
        }
        .sanitized();

        assert_eq!(options.height, None);
        assert_eq!(options.max_height, None);
        assert_eq!(options.gap, 0.0);
        assert_eq!(options.hidden_delay_duration(), Duration::ZERO);
    }

    #[test]
    fn test_huge_delay_saturates() {
        let options = ScrollbarOptions::from_json(r#"{ "hiddenDelay": 1e30 }"#).unwrap();
        assert_eq!(options.hidden_delay_duration(), Duration::MAX);
    }
}
