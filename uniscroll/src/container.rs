//! The scroll container widget.

use std::cell::{Cell, RefCell};
use std::rc::{Rc, Weak};
use std::sync::atomic::{AtomicUsize, Ordering};

use crate::axis::Axis;
use crate::bar::{BarPart, BarView};
use crate::document::{DocumentEvents, Subscription};
use crate::drag::{DragSession, DragState};
use crate::event::{EventResult, PointerButton, PointerEvent, PointerEventKind};
use crate::geometry::{Geometry, GeometryResolver, ViewportMetrics};
use crate::layout::{Edges, Rect, Size};
use crate::mapping::{to_translation, track_click_to_scroll};
use crate::options::ScrollbarOptions;
use crate::resize::{ResizeObserver, ResizeSubscription};
use crate::selection::{SelectionSuppressor, SuppressionGuard};
use crate::timer::Scheduler;
use crate::visibility::VisibilityTimer;

/// Unique identifier for a container instance.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ContainerId(usize);

impl ContainerId {
    fn new() -> Self {
        static COUNTER: AtomicUsize = AtomicUsize::new(0);
        Self(COUNTER.fetch_add(1, Ordering::SeqCst))
    }
}

impl std::fmt::Display for ContainerId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "__uniscroll_{}", self.0)
    }
}

/// The host's native scroll position.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct ScrollPosition {
    pub left: f32,
    pub top: f32,
}

impl ScrollPosition {
    pub const fn new(left: f32, top: f32) -> Self {
        Self { left, top }
    }

    pub fn get(&self, axis: Axis) -> f32 {
        axis.pick(self.left, self.top)
    }
}

/// Current state of one thumb.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct ThumbState {
    pub translate_offset: f32,
    pub hidden: bool,
}

/// Host capabilities a container runs on. Containers on the same page
/// should share one `document` and one `selection`.
#[derive(Clone)]
pub struct Services {
    pub document: DocumentEvents,
    pub selection: SelectionSuppressor,
    pub scheduler: Rc<dyn Scheduler>,
    pub resize: Rc<dyn ResizeObserver>,
}

#[derive(Debug, Default, Clone, Copy)]
struct PerAxis<T> {
    vertical: T,
    horizontal: T,
}

impl<T> PerAxis<T> {
    fn get(&self, axis: Axis) -> &T {
        match axis {
            Axis::Vertical => &self.vertical,
            Axis::Horizontal => &self.horizontal,
        }
    }

    fn get_mut(&mut self, axis: Axis) -> &mut T {
        match axis {
            Axis::Vertical => &mut self.vertical,
            Axis::Horizontal => &mut self.horizontal,
        }
    }
}

/// Document listeners and selection suppression held for one drag.
struct DragCapture {
    _moves: Subscription,
    _release: Subscription,
    _selection: SuppressionGuard,
}

struct ContainerState {
    options: ScrollbarOptions,
    metrics: ViewportMetrics,
    resolver: GeometryResolver,
    scroll: ScrollPosition,
    tracks: PerAxis<Option<Rect>>,
    drag: DragState,
    capture: Option<DragCapture>,
}

impl ContainerState {
    fn new(options: ScrollbarOptions) -> Self {
        Self {
            resolver: GeometryResolver::new(options.gap),
            options,
            metrics: ViewportMetrics::default(),
            scroll: ScrollPosition::default(),
            tracks: PerAxis::default(),
            drag: DragState::Idle,
            capture: None,
        }
    }

    fn geometry(&mut self) -> Geometry {
        self.resolver.resolve(&self.metrics)
    }

    fn translation(&mut self, axis: Axis) -> f32 {
        let geometry = *self.geometry().axis(axis);
        if !geometry.active {
            return 0.0;
        }
        to_translation(
            self.scroll.get(axis),
            geometry.ratio,
            geometry.viewport_length,
            self.resolver.gap(),
        )
    }

    fn bar_view(&mut self, axis: Axis, hidden: bool) -> Option<BarView> {
        let geometry = *self.geometry().axis(axis);
        if !geometry.active {
            return None;
        }
        Some(BarView {
            axis,
            hidden,
            thumb_length: geometry.thumb_length,
            translation: self.translation(axis),
        })
    }

    fn dragging_axis(&self) -> Option<Axis> {
        self.drag.session().map(|session| session.axis)
    }

    /// End any drag. The capture is handed back so it drops after the state
    /// borrow is released.
    fn end_drag(&mut self) -> Option<DragCapture> {
        self.drag.end();
        self.capture.take()
    }
}

/// A scroll container with synthetic scrollbars.
///
/// The container never scrolls anything itself. Thumb drags and track
/// clicks produce target positions through the scroll callback; the host
/// applies them to its native viewport and reports the resulting position
/// back through [`ScrollContainer::handle_scroll`], from which thumb
/// positions are derived.
///
/// Dropping the container tears it down: document listeners detach,
/// selection suppression is released, the hide timer is cancelled and
/// resize observation stops.
///
/// # Example
///
/// ```ignore
/// let container = ScrollContainer::new(options, services, move |axis, position| {
///     viewport.set_scroll(axis, position);
/// });
///
/// resize.notify(container.viewport_element(), Size::new(300.0, 200.0));
/// resize.notify(container.content_element(), Size::new(300.0, 1200.0));
/// container.set_track_rect(Axis::Vertical, Rect::new(294.0, 2.0, 6.0, 196.0));
///
/// // In the host's event loop
/// container.pointer_down(&event);
/// services.document.dispatch(&event);
/// container.handle_scroll(viewport.scroll_position());
/// ```
pub struct ScrollContainer {
    id: ContainerId,
    viewport_element: String,
    content_element: String,
    state: Rc<RefCell<ContainerState>>,
    visibility: VisibilityTimer,
    document: DocumentEvents,
    selection: SelectionSuppressor,
    on_scroll: Rc<dyn Fn(Axis, f32)>,
    resize: RefCell<Vec<ResizeSubscription>>,
    torn_down: Cell<bool>,
}

impl std::fmt::Debug for ScrollContainer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ScrollContainer")
            .field("id", &self.id)
            .field("dragging", &self.is_dragging())
            .field("visibility", &self.visibility)
            .finish_non_exhaustive()
    }
}

impl ScrollContainer {
    /// Create a container and start observing its viewport and content
    /// elements. `on_scroll` receives target native scroll positions.
    pub fn new(
        options: ScrollbarOptions,
        services: Services,
        on_scroll: impl Fn(Axis, f32) + 'static,
    ) -> Self {
        let options = options.sanitized();
        let id = ContainerId::new();
        let viewport_element = format!("{id}_viewport");
        let content_element = format!("{id}_content");
        let visibility = VisibilityTimer::new(
            services.scheduler.clone(),
            options.always_show,
            options.hidden_delay_duration(),
        );
        let state = Rc::new(RefCell::new(ContainerState::new(options)));

        let resize = vec![
            observe(
                &*services.resize,
                &viewport_element,
                &state,
                ViewportMetrics::set_viewport,
            ),
            observe(
                &*services.resize,
                &content_element,
                &state,
                ViewportMetrics::set_content,
            ),
        ];

        log::debug!("[container] created {}", id);
        Self {
            id,
            viewport_element,
            content_element,
            state,
            visibility,
            document: services.document,
            selection: services.selection,
            on_scroll: Rc::new(on_scroll),
            resize: RefCell::new(resize),
            torn_down: Cell::new(false),
        }
    }

    pub fn id(&self) -> ContainerId {
        self.id
    }

    /// Element id the host reports viewport resizes under.
    pub fn viewport_element(&self) -> &str {
        &self.viewport_element
    }

    /// Element id the host reports content resizes under.
    pub fn content_element(&self) -> &str {
        &self.content_element
    }

    pub fn options(&self) -> ScrollbarOptions {
        self.state.borrow().options.clone()
    }

    // -------------------------------------------------------------------------
    // Geometry
    // -------------------------------------------------------------------------

    /// Set the margins of the content's first child, which its measured
    /// size does not include.
    pub fn set_content_margin(&self, margin: Edges) {
        self.state.borrow_mut().metrics.content_margin = margin;
    }

    pub fn metrics(&self) -> ViewportMetrics {
        self.state.borrow().metrics
    }

    pub fn geometry(&self) -> Geometry {
        self.state.borrow_mut().geometry()
    }

    /// Where the host laid out the track of `axis`, for hit testing.
    pub fn set_track_rect(&self, axis: Axis, rect: Rect) {
        *self.state.borrow_mut().tracks.get_mut(axis) = Some(rect);
    }

    pub fn track_rect(&self, axis: Axis) -> Option<Rect> {
        *self.state.borrow().tracks.get(axis)
    }

    // -------------------------------------------------------------------------
    // Scroll position and visibility
    // -------------------------------------------------------------------------

    pub fn scroll_position(&self) -> ScrollPosition {
        self.state.borrow().scroll
    }

    /// The viewport scrolled natively. Thumbs follow and become visible.
    pub fn handle_scroll(&self, position: ScrollPosition) {
        if self.torn_down.get() {
            return;
        }
        self.state.borrow_mut().scroll = position;
        self.visibility.activity();
    }

    /// The pointer moved over the container.
    pub fn pointer_activity(&self) {
        if self.torn_down.get() {
            return;
        }
        self.visibility.activity();
    }

    pub fn thumb(&self, axis: Axis) -> ThumbState {
        let mut state = self.state.borrow_mut();
        ThumbState {
            translate_offset: state.translation(axis),
            hidden: self.visibility.is_hidden() && state.dragging_axis() != Some(axis),
        }
    }

    /// Presentation of the bar along `axis`, or `None` when the content
    /// fits and no bar is shown.
    pub fn bar(&self, axis: Axis) -> Option<BarView> {
        let mut state = self.state.borrow_mut();
        let hidden = self.visibility.is_hidden() && state.dragging_axis() != Some(axis);
        state.bar_view(axis, hidden)
    }

    // -------------------------------------------------------------------------
    // Pointer input
    // -------------------------------------------------------------------------

    /// Route a press to whichever thumb or track contains it.
    pub fn pointer_down(&self, event: &PointerEvent) -> EventResult {
        for axis in Axis::ALL {
            let hit = {
                let mut state = self.state.borrow_mut();
                let track = *state.tracks.get(axis);
                track.zip(state.bar_view(axis, false))
                    .and_then(|(track, bar)| bar.hit_test(track, event.x, event.y))
            };
            match hit {
                Some(BarPart::Thumb) => return self.thumb_pointer_down(axis, event),
                Some(BarPart::Track) => return self.track_pointer_down(axis, event),
                None => {}
            }
        }
        EventResult::Ignored
    }

    /// A press on the thumb of `axis`. The thumb swallows every press so the
    /// track never sees it, but only a plain primary press starts a drag.
    pub fn thumb_pointer_down(&self, axis: Axis, event: &PointerEvent) -> EventResult {
        if self.torn_down.get() {
            return EventResult::Ignored;
        }
        let started = {
            let mut state = self.state.borrow_mut();
            let geometry = *state.geometry().axis(axis);
            if !geometry.active {
                return EventResult::Ignored;
            }
            let translation = state.translation(axis);
            state.drag.begin(axis, event, translation, &geometry)
        };
        if !started {
            return EventResult::Consumed;
        }

        self.selection.clear_selection();
        let capture = DragCapture {
            _moves: self.listen_moves(),
            _release: self.listen_release(),
            _selection: self.selection.acquire(),
        };
        self.state.borrow_mut().capture = Some(capture);
        EventResult::StartDrag
    }

    /// A press on the track of `axis`, outside the thumb.
    pub fn track_pointer_down(&self, axis: Axis, event: &PointerEvent) -> EventResult {
        if event.button != PointerButton::Primary {
            return EventResult::Ignored;
        }
        let Some(track) = self.track_rect(axis) else {
            return EventResult::Ignored;
        };
        let offset = event.coordinate(axis) - track.start(axis);
        self.track_click(axis, offset)
    }

    /// Jump for a track press `click_offset` pixels from the track start.
    pub fn track_click(&self, axis: Axis, click_offset: f32) -> EventResult {
        if self.torn_down.get() {
            return EventResult::Ignored;
        }
        let target = {
            let mut state = self.state.borrow_mut();
            let geometry = *state.geometry().axis(axis);
            if !geometry.active {
                return EventResult::Ignored;
            }
            track_click_to_scroll(
                click_offset,
                geometry.thumb_length,
                geometry.viewport_length,
                geometry.content_length,
            )
        };

        if let Some(position) = target {
            log::debug!("[container] track jump axis={} position={}", axis, position);
            (self.on_scroll)(axis, position);
        }
        EventResult::Consumed
    }

    pub fn is_dragging(&self) -> bool {
        self.state.borrow().drag.is_dragging()
    }

    pub fn drag_session(&self) -> Option<DragSession> {
        self.state.borrow().drag.session().copied()
    }

    fn listen_moves(&self) -> Subscription {
        let state = Rc::downgrade(&self.state);
        let on_scroll = self.on_scroll.clone();
        self.document.listen(PointerEventKind::Move, move |event| {
            let Some(state) = state.upgrade() else {
                return;
            };
            let target = {
                let state = state.borrow();
                state.dragging_axis().zip(state.drag.drag_to(event))
            };
            if let Some((axis, position)) = target {
                on_scroll(axis, position);
            }
        })
    }

    fn listen_release(&self) -> Subscription {
        let state = Rc::downgrade(&self.state);
        self.document.listen(PointerEventKind::Up, move |_| {
            if let Some(state) = state.upgrade() {
                end_drag(&state);
            }
        })
    }

    // -------------------------------------------------------------------------
    // Teardown
    // -------------------------------------------------------------------------

    /// Unmount: end any drag, cancel the hide timer and stop observing
    /// resizes. The container ignores input afterwards.
    pub fn teardown(&self) {
        if self.torn_down.replace(true) {
            return;
        }
        end_drag(&self.state);
        self.visibility.cancel();
        self.resize.borrow_mut().clear();
        log::debug!("[container] torn down {}", self.id);
    }
}

impl Drop for ScrollContainer {
    fn drop(&mut self) {
        self.teardown();
    }
}

fn end_drag(state: &Rc<RefCell<ContainerState>>) {
    let capture = state.borrow_mut().end_drag();
    // Detaching listeners and restoring selection happen outside the borrow
    drop(capture);
}

fn observe(
    resize: &dyn ResizeObserver,
    element: &str,
    state: &Rc<RefCell<ContainerState>>,
    apply: fn(&mut ViewportMetrics, Size),
) -> ResizeSubscription {
    let state: Weak<RefCell<ContainerState>> = Rc::downgrade(state);
    resize.observe(
        element,
        Box::new(move |size| {
            if let Some(state) = state.upgrade() {
                apply(&mut state.borrow_mut().metrics, size);
            }
        }),
    )
}
