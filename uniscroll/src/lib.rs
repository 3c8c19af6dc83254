//! Headless custom scrollbars.
//!
//! `uniscroll` tracks a viewport over larger content and drives synthetic
//! scrollbar tracks and thumbs. The host renders, scrolls natively and
//! forwards pointer events; this crate maps pointer input to scroll
//! positions, runs the thumb drag state machine and decides when thumbs are
//! shown.

pub mod axis;
pub mod bar;
pub mod color;
pub mod container;
pub mod document;
pub mod drag;
pub mod error;
pub mod event;
pub mod geometry;
pub mod layout;
pub mod logging;
pub mod mapping;
pub mod options;
pub mod resize;
pub mod selection;
pub mod style;
pub mod timer;
pub mod visibility;

pub use axis::{Axis, AxisConfig};
pub use bar::{BarPart, BarView};
pub use color::Rgba;
pub use container::{ScrollContainer, ScrollPosition, Services, ThumbState};
pub use document::{DocumentEvents, Subscription};
pub use drag::{DragSession, DragState};
pub use error::{Error, Result};
pub use event::{EventResult, Modifiers, PointerButton, PointerEvent, PointerEventKind};
pub use geometry::{AxisGeometry, Geometry, GeometryResolver, ViewportMetrics};
pub use layout::{Edges, Rect, Size};
pub use mapping::{drag_delta_to_scroll, to_translation, track_click_to_scroll, DEFAULT_GAP};
pub use options::{BarProps, ScrollbarOptions, StyleMap};
pub use resize::{ResizeHub, ResizeObserver, ResizeSubscription};
pub use selection::{SelectionFlag, SelectionHost, SelectionSuppressor, SuppressionGuard};
pub use timer::{ManualScheduler, Scheduler, Task, TimerHandle, TokioScheduler};
pub use visibility::VisibilityTimer;
