use crate::axis::Axis;
use crate::layout::{Edges, Size};
use crate::mapping::DEFAULT_GAP;

/// Latest measurements of the viewport and content elements.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct ViewportMetrics {
    pub viewport_width: f32,
    pub viewport_height: f32,
    pub content_width: f32,
    pub content_height: f32,
    /// Outer margins of the content's first child, which the content box
    /// does not include in its own measurement.
    pub content_margin: Edges,
}

impl ViewportMetrics {
    pub fn new(viewport: Size, content: Size) -> Self {
        let mut metrics = Self::default();
        metrics.set_viewport(viewport);
        metrics.set_content(content);
        metrics
    }

    pub fn with_margin(mut self, margin: Edges) -> Self {
        self.content_margin = margin;
        self
    }

    /// Record a viewport measurement. Non-finite lengths count as 0.
    pub fn set_viewport(&mut self, size: Size) {
        self.viewport_width = finite_or_zero(size.width);
        self.viewport_height = finite_or_zero(size.height);
    }

    /// Record a content measurement. Non-finite lengths count as 0.
    pub fn set_content(&mut self, size: Size) {
        self.content_width = finite_or_zero(size.width);
        self.content_height = finite_or_zero(size.height);
    }

    pub fn viewport_length(&self, axis: Axis) -> f32 {
        axis.pick(self.viewport_width, self.viewport_height)
    }

    /// Content length along the axis, margins included.
    pub fn content_length(&self, axis: Axis) -> f32 {
        axis.pick(self.content_width, self.content_height) + self.content_margin.sum(axis)
    }

    /// Compute the geometry of both axes.
    pub fn geometry(&self, gap: f32) -> Geometry {
        Geometry {
            vertical: AxisGeometry::compute(
                self.viewport_length(Axis::Vertical),
                self.content_length(Axis::Vertical),
                gap,
            ),
            horizontal: AxisGeometry::compute(
                self.viewport_length(Axis::Horizontal),
                self.content_length(Axis::Horizontal),
                gap,
            ),
        }
    }
}

/// Derived geometry of one axis.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct AxisGeometry {
    /// Content overflows the viewport along this axis.
    pub active: bool,
    /// `viewport_length / content_length`, in `(0, 1]` once measured and 0
    /// before that.
    pub ratio: f32,
    pub viewport_length: f32,
    pub content_length: f32,
    /// Viewport length minus the gap at both ends.
    pub track_length: f32,
    pub thumb_length: f32,
}

impl AxisGeometry {
    pub fn compute(viewport_length: f32, content_length: f32, gap: f32) -> Self {
        let measured = viewport_length.is_finite()
            && content_length.is_finite()
            && viewport_length > 0.0
            && content_length > 0.0;
        if !measured {
            return Self {
                viewport_length,
                content_length,
                ..Self::default()
            };
        }

        let ratio = (viewport_length / content_length).min(1.0);
        let track_length = (viewport_length - 2.0 * gap.max(0.0)).max(0.0);
        Self {
            active: content_length > viewport_length,
            ratio,
            viewport_length,
            content_length,
            track_length,
            thumb_length: track_length * ratio,
        }
    }

    /// Largest native scroll position along this axis.
    pub fn max_scroll(&self) -> f32 {
        (self.content_length - self.viewport_length).max(0.0)
    }
}

/// Geometry of both axes.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Geometry {
    pub vertical: AxisGeometry,
    pub horizontal: AxisGeometry,
}

impl Geometry {
    pub fn axis(&self, axis: Axis) -> &AxisGeometry {
        match axis {
            Axis::Vertical => &self.vertical,
            Axis::Horizontal => &self.horizontal,
        }
    }
}

fn finite_or_zero(length: f32) -> f32 {
    if length.is_finite() { length } else { 0.0 }
}

/// Memoizes [`Geometry`] against the measured dimensions.
///
/// Callers may ask for geometry on every event or frame; it is only
/// recomputed when a measurement, margin or the gap actually changed.
#[derive(Debug)]
pub struct GeometryResolver {
    gap: f32,
    cached: Option<(ViewportMetrics, Geometry)>,
    computations: usize,
}

impl Default for GeometryResolver {
    fn default() -> Self {
        Self::new(DEFAULT_GAP)
    }
}

impl GeometryResolver {
    pub fn new(gap: f32) -> Self {
        Self {
            gap: gap.max(0.0),
            cached: None,
            computations: 0,
        }
    }

    pub fn gap(&self) -> f32 {
        self.gap
    }

    pub fn resolve(&mut self, metrics: &ViewportMetrics) -> Geometry {
        if let Some((key, geometry)) = &self.cached
            && key == metrics
        {
            return *geometry;
        }

        let geometry = metrics.geometry(self.gap);
        self.computations += 1;
        log::debug!(
            "[geometry] recomputed: vertical(active={} ratio={:.3}) horizontal(active={} ratio={:.3})",
            geometry.vertical.active,
            geometry.vertical.ratio,
            geometry.horizontal.active,
            geometry.horizontal.ratio
        );
        self.cached = Some((*metrics, geometry));
        geometry
    }

    /// Number of times geometry was actually recomputed.
    pub fn computations(&self) -> usize {
        self.computations
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tall_content_activates_vertical_only() {
        let metrics = ViewportMetrics::new(Size::new(100.0, 100.0), Size::new(100.0, 400.0));
        let geometry = metrics.geometry(DEFAULT_GAP);

        assert!(geometry.vertical.active);
        assert_eq!(geometry.vertical.ratio, 0.25);
        assert_eq!(geometry.vertical.track_length, 96.0);
        assert_eq!(geometry.vertical.thumb_length, 24.0);
        assert!(!geometry.horizontal.active);
        assert_eq!(geometry.horizontal.ratio, 1.0);
    }

    #[test]
    fn test_unmeasured_content_is_inactive() {
        let geometry = ViewportMetrics::default().geometry(DEFAULT_GAP);
        assert!(!geometry.vertical.active);
        assert_eq!(geometry.vertical.ratio, 0.0);
        assert_eq!(geometry.vertical.thumb_length, 0.0);

        let metrics = ViewportMetrics::new(Size::new(100.0, 100.0), Size::new(0.0, 0.0));
        let geometry = metrics.geometry(DEFAULT_GAP);
        assert!(!geometry.horizontal.active);
        assert!(!geometry.horizontal.ratio.is_nan());
    }

    #[test]
    fn test_margins_extend_content() {
        let metrics = ViewportMetrics::new(Size::new(100.0, 100.0), Size::new(100.0, 90.0))
            .with_margin(Edges::symmetric(10.0, 0.0));
        let geometry = metrics.geometry(DEFAULT_GAP);

        assert_eq!(metrics.content_length(Axis::Vertical), 110.0);
        assert!(geometry.vertical.active);
        assert!(!geometry.horizontal.active);
    }

    #[test]
    fn test_resolver_memoizes_on_dimensions() {
        let mut resolver = GeometryResolver::default();
        let mut metrics = ViewportMetrics::new(Size::new(100.0, 100.0), Size::new(100.0, 400.0));

        resolver.resolve(&metrics);
        resolver.resolve(&metrics);
        assert_eq!(resolver.computations(), 1);

        metrics.set_content(Size::new(100.0, 500.0));
        let geometry = resolver.resolve(&metrics);
        assert_eq!(resolver.computations(), 2);
        assert_eq!(geometry.vertical.ratio, 0.2);
    }

    #[test]
    fn test_non_finite_measurements_count_as_zero() {
        let mut resolver = GeometryResolver::default();
        let metrics =
            ViewportMetrics::new(Size::new(100.0, f32::NAN), Size::new(f32::INFINITY, 400.0));
        assert_eq!(metrics.viewport_height, 0.0);
        assert_eq!(metrics.content_width, 0.0);

        let geometry = resolver.resolve(&metrics);
        resolver.resolve(&metrics);
        assert_eq!(resolver.computations(), 1);
        assert!(!geometry.vertical.active);
        assert_eq!(geometry.vertical.ratio, 0.0);
        assert!(!geometry.horizontal.active);
    }
}
