use crate::axis::Axis;

/// Phase of a pointer event.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PointerEventKind {
    Down,
    Move,
    Up,
}

/// Pointer button
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum PointerButton {
    #[default]
    Primary,
    Secondary,
    Middle,
}

/// Modifier keys held during a pointer event
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Modifiers {
    pub shift: bool,
    pub ctrl: bool,
    pub alt: bool,
}

impl Modifiers {
    pub fn ctrl() -> Self {
        Self {
            ctrl: true,
            ..Default::default()
        }
    }

    pub fn none(&self) -> bool {
        !self.shift && !self.ctrl && !self.alt
    }
}

/// A pointer event in host coordinates (pixels, or cells for terminals).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PointerEvent {
    pub kind: PointerEventKind,
    pub x: f32,
    pub y: f32,
    pub button: PointerButton,
    pub modifiers: Modifiers,
}

impl PointerEvent {
    pub fn new(kind: PointerEventKind, x: f32, y: f32) -> Self {
        Self {
            kind,
            x,
            y,
            button: PointerButton::Primary,
            modifiers: Modifiers::default(),
        }
    }

    pub fn down(x: f32, y: f32) -> Self {
        Self::new(PointerEventKind::Down, x, y)
    }

    pub fn moved(x: f32, y: f32) -> Self {
        Self::new(PointerEventKind::Move, x, y)
    }

    pub fn up(x: f32, y: f32) -> Self {
        Self::new(PointerEventKind::Up, x, y)
    }

    pub fn with_button(mut self, button: PointerButton) -> Self {
        self.button = button;
        self
    }

    pub fn with_modifiers(mut self, modifiers: Modifiers) -> Self {
        self.modifiers = modifiers;
        self
    }

    /// Coordinate along the axis.
    pub fn coordinate(&self, axis: Axis) -> f32 {
        axis.pick(self.x, self.y)
    }

    /// Convert a terminal mouse event. Wheel events have no pointer
    /// counterpart and yield `None`.
    pub fn from_mouse(event: crossterm::event::MouseEvent) -> Option<Self> {
        use crossterm::event::MouseEventKind;
        let (kind, button) = match event.kind {
            MouseEventKind::Down(button) => (PointerEventKind::Down, button.into()),
            MouseEventKind::Up(button) => (PointerEventKind::Up, button.into()),
            MouseEventKind::Drag(button) => (PointerEventKind::Move, button.into()),
            MouseEventKind::Moved => (PointerEventKind::Move, PointerButton::Primary),
            _ => return None,
        };
        Some(Self {
            kind,
            x: event.column as f32,
            y: event.row as f32,
            button,
            modifiers: event.modifiers.into(),
        })
    }
}

/// Outcome of routing a pointer press into a container.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EventResult {
    /// Not handled; the host should keep propagating.
    Ignored,
    /// Handled; propagation stops.
    Consumed,
    /// Handled and a thumb drag began.
    StartDrag,
}

impl EventResult {
    pub fn is_handled(self) -> bool {
        !matches!(self, EventResult::Ignored)
    }
}

// Conversion from crossterm types
impl From<crossterm::event::KeyModifiers> for Modifiers {
    fn from(mods: crossterm::event::KeyModifiers) -> Self {
        use crossterm::event::KeyModifiers;
        Self {
            shift: mods.contains(KeyModifiers::SHIFT),
            ctrl: mods.contains(KeyModifiers::CONTROL),
            alt: mods.contains(KeyModifiers::ALT),
        }
    }
}

impl From<crossterm::event::MouseButton> for PointerButton {
    fn from(btn: crossterm::event::MouseButton) -> Self {
        use crossterm::event::MouseButton as CtBtn;
        match btn {
            CtBtn::Left => PointerButton::Primary,
            CtBtn::Right => PointerButton::Secondary,
            CtBtn::Middle => PointerButton::Middle,
        }
    }
}
