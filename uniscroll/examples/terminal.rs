//! Scrolls a long list in the terminal with a synthetic vertical bar.
//!
//! Drag the thumb, click the track or use the wheel. `q` or `Esc` quits.
//! Debug logs go to `terminal.log`.

use std::cell::Cell;
use std::io::{self, Write};
use std::rc::Rc;
use std::time::{Duration, Instant};

use crossterm::event::{self, Event, KeyCode, MouseEventKind};
use crossterm::{cursor, execute, queue, style, terminal};
use log::LevelFilter;
use uniscroll::logging::init_file_logger;
use uniscroll::{
    Axis, DocumentEvents, ManualScheduler, PointerEvent, PointerEventKind, Rect, ResizeHub,
    ScrollContainer, ScrollPosition, ScrollbarOptions, SelectionFlag, SelectionSuppressor,
    Services, Size,
};

const LINES: usize = 200;
const HEADER: u16 = 1;
const WHEEL_STEP: f32 = 3.0;

fn main() -> uniscroll::Result<()> {
    init_file_logger("terminal.log", LevelFilter::Debug)?;

    let mut stdout = io::stdout();
    terminal::enable_raw_mode()?;
    execute!(
        stdout,
        terminal::EnterAlternateScreen,
        cursor::Hide,
        event::EnableMouseCapture
    )?;

    let result = run(&mut stdout);

    execute!(
        stdout,
        event::DisableMouseCapture,
        cursor::Show,
        terminal::LeaveAlternateScreen
    )?;
    terminal::disable_raw_mode()?;
    result
}

fn run(stdout: &mut io::Stdout) -> uniscroll::Result<()> {
    let document = DocumentEvents::new();
    let scheduler = ManualScheduler::new();
    let resize = ResizeHub::new();
    let services = Services {
        document: document.clone(),
        selection: SelectionSuppressor::new(Rc::new(SelectionFlag::new())),
        scheduler: Rc::new(scheduler.clone()),
        resize: Rc::new(resize.clone()),
    };

    // Scroll targets requested by the container, applied once per frame
    let requested: Rc<Cell<Option<f32>>> = Rc::new(Cell::new(None));
    let target = requested.clone();
    let options = ScrollbarOptions::new()
        .gap(0.0)
        .hidden_delay(Duration::from_millis(1500));
    let container = ScrollContainer::new(options, services, move |axis, position| {
        if axis == Axis::Vertical {
            target.set(Some(position));
        }
    });

    let mut top = 0.0f32;
    let mut last_tick = Instant::now();

    loop {
        let (width, height) = terminal::size()?;
        let viewport = Size::new(
            f32::from(width.saturating_sub(1)),
            f32::from(height.saturating_sub(HEADER)),
        );
        resize.notify(container.viewport_element(), viewport);
        resize.notify(
            container.content_element(),
            Size::new(viewport.width, LINES as f32),
        );
        container.set_track_rect(
            Axis::Vertical,
            Rect::new(viewport.width, f32::from(HEADER), 1.0, viewport.height),
        );

        draw(stdout, &container, top, width, height)?;

        if event::poll(Duration::from_millis(50))? {
            match event::read()? {
                Event::Key(key) if matches!(key.code, KeyCode::Char('q') | KeyCode::Esc) => {
                    return Ok(());
                }
                Event::Mouse(mouse) => {
                    match mouse.kind {
                        MouseEventKind::ScrollDown => requested.set(Some(top + WHEEL_STEP)),
                        MouseEventKind::ScrollUp => requested.set(Some(top - WHEEL_STEP)),
                        _ => {}
                    }
                    if let Some(pointer) = PointerEvent::from_mouse(mouse) {
                        container.pointer_activity();
                        let handled = pointer.kind == PointerEventKind::Down
                            && container.pointer_down(&pointer).is_handled();
                        if !handled {
                            document.dispatch(&pointer);
                        }
                    }
                }
                _ => {}
            }
        }

        // Play the part of the native viewport: clamp, apply, report back
        if let Some(position) = requested.take() {
            let max_top = (LINES as f32 - viewport.height).max(0.0);
            top = position.clamp(0.0, max_top).round();
            container.handle_scroll(ScrollPosition::new(0.0, top));
        }

        let now = Instant::now();
        scheduler.advance(now - last_tick);
        last_tick = now;
    }
}

fn draw(
    stdout: &mut io::Stdout,
    container: &ScrollContainer,
    top: f32,
    width: u16,
    height: u16,
) -> io::Result<()> {
    queue!(
        stdout,
        terminal::Clear(terminal::ClearType::All),
        cursor::MoveTo(0, 0),
        style::Print("uniscroll: drag the thumb, click the track, q to quit")
    )?;

    let rows = height.saturating_sub(HEADER);
    let first = top as usize;
    for row in 0..rows {
        let line = first + usize::from(row);
        if line >= LINES {
            break;
        }
        queue!(
            stdout,
            cursor::MoveTo(0, row + HEADER),
            style::Print(format!("line {:>3}", line + 1))
        )?;
    }

    if let Some(bar) = container.bar(Axis::Vertical) {
        let start = bar.translation.round() as u16;
        let end = start.saturating_add(bar.thumb_length.round().max(1.0) as u16);
        for row in 0..rows {
            let glyph = if bar.hidden {
                ' '
            } else if (start..end).contains(&row) {
                '█'
            } else {
                '│'
            };
            queue!(
                stdout,
                cursor::MoveTo(width.saturating_sub(1), row + HEADER),
                style::Print(glyph)
            )?;
        }
    }

    stdout.flush()
}
