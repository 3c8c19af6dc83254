/// A scroll axis.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Axis {
    Vertical,
    Horizontal,
}

/// Static description of how an axis maps onto host properties.
#[derive(Debug, PartialEq, Eq)]
pub struct AxisConfig {
    pub axis: Axis,
    /// Native scroll property written by the host (`scrollTop`/`scrollLeft`).
    pub scroll: &'static str,
    /// Size dimension the thumb length is applied to.
    pub size: &'static str,
    /// Pointer coordinate read along this axis.
    pub client: &'static str,
    /// Transform function used to position the thumb.
    pub translate: &'static str,
    /// Modifier class added to the bar.
    pub class: &'static str,
}

pub static VERTICAL: AxisConfig = AxisConfig {
    axis: Axis::Vertical,
    scroll: "scrollTop",
    size: "height",
    client: "clientY",
    translate: "translateY",
    class: "uni-scrollbar-vertical",
};

pub static HORIZONTAL: AxisConfig = AxisConfig {
    axis: Axis::Horizontal,
    scroll: "scrollLeft",
    size: "width",
    client: "clientX",
    translate: "translateX",
    class: "uni-scrollbar-horizontal",
};

impl Axis {
    pub const ALL: [Axis; 2] = [Axis::Vertical, Axis::Horizontal];

    pub fn config(self) -> &'static AxisConfig {
        match self {
            Axis::Vertical => &VERTICAL,
            Axis::Horizontal => &HORIZONTAL,
        }
    }

    /// Select the component of an `(x, y)` pair that runs along this axis.
    pub fn pick<T>(self, x: T, y: T) -> T {
        match self {
            Axis::Vertical => y,
            Axis::Horizontal => x,
        }
    }
}

impl std::fmt::Display for Axis {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Axis::Vertical => write!(f, "vertical"),
            Axis::Horizontal => write!(f, "horizontal"),
        }
    }
}
