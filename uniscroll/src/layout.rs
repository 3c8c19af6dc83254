use crate::axis::Axis;

/// Measured size of an element, in pixels.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Size {
    pub width: f32,
    pub height: f32,
}

impl Size {
    pub const fn new(width: f32, height: f32) -> Self {
        Self { width, height }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Rect {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
}

impl Rect {
    pub const fn new(x: f32, y: f32, width: f32, height: f32) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    pub fn right(&self) -> f32 {
        self.x + self.width
    }

    pub fn bottom(&self) -> f32 {
        self.y + self.height
    }

    pub fn contains(&self, x: f32, y: f32) -> bool {
        x >= self.x && x < self.right() && y >= self.y && y < self.bottom()
    }

    /// Leading edge along the axis (top for vertical, left for horizontal).
    pub fn start(&self, axis: Axis) -> f32 {
        axis.pick(self.x, self.y)
    }

    /// Sub-rectangle spanning `offset..offset + length` along the axis and the
    /// full thickness across it.
    pub fn slice(&self, axis: Axis, offset: f32, length: f32) -> Self {
        match axis {
            Axis::Vertical => Self::new(self.x, self.y + offset, self.width, length),
            Axis::Horizontal => Self::new(self.x + offset, self.y, length, self.height),
        }
    }
}

/// Outer margins of the content element.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Edges {
    pub top: f32,
    pub right: f32,
    pub bottom: f32,
    pub left: f32,
}

impl Edges {
    pub const fn new(top: f32, right: f32, bottom: f32, left: f32) -> Self {
        Self {
            top,
            right,
            bottom,
            left,
        }
    }

    pub const fn symmetric(vertical: f32, horizontal: f32) -> Self {
        Self::new(vertical, horizontal, vertical, horizontal)
    }

    /// Margin total along the axis (top + bottom, or left + right).
    pub fn sum(&self, axis: Axis) -> f32 {
        match axis {
            Axis::Vertical => self.top + self.bottom,
            Axis::Horizontal => self.left + self.right,
        }
    }
}
