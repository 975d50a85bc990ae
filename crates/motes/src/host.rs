//! Terminal implementation of the field's [`Host`].

use std::collections::HashMap;
use std::io::Write;
use std::time::{Duration, Instant};

use crossterm::{
    event::{
        DisableFocusChange, DisableMouseCapture, EnableFocusChange, EnableMouseCapture, Event,
        MouseEvent, MouseEventKind,
    },
    execute,
};
use motes_field::{FrameHandle, Host, InputEvent, ListenerId, Signal, SurfaceRect};
use ratatui::layout::Rect;

/// Surface units per terminal cell, horizontally.
pub const CELL_WIDTH: u32 = 8;
/// Surface units per terminal cell, vertically.
pub const CELL_HEIGHT: u32 = 16;

/// Listener registry and frame scheduler backed by a terminal.
///
/// Mouse capture is only enabled while a pointer listener is registered, and
/// focus reporting only while a pointer-leave listener is.
#[derive(Debug)]
pub struct TerminalHost<W: Write> {
    out: W,
    /// Surface area in terminal cells.
    area: Rect,
    next_id: u64,
    listeners: HashMap<ListenerId, Signal>,
    frame: Option<(FrameHandle, Instant)>,
    frame_interval: Duration,
    mouse_captured: bool,
    focus_reported: bool,
}

impl<W: Write> TerminalHost<W> {
    pub fn new(out: W, area: Rect, frame_interval: Duration) -> Self {
        Self {
            out,
            area,
            next_id: 0,
            listeners: HashMap::new(),
            frame: None,
            frame_interval,
            mouse_captured: false,
            focus_reported: false,
        }
    }

    pub fn is_listening(&self, signal: Signal) -> bool {
        self.listeners.values().any(|&s| s == signal)
    }

    pub fn listener_count(&self) -> usize {
        self.listeners.len()
    }

    pub fn has_pending_frame(&self) -> bool {
        self.frame.is_some()
    }

    /// How long the event loop may wait before the next frame is due.
    pub fn time_until_frame(&self, now: Instant) -> Option<Duration> {
        self.frame
            .map(|(_, deadline)| deadline.saturating_duration_since(now))
    }

    /// Hand out the scheduled frame once its deadline has passed.
    pub fn take_due_frame(&mut self, now: Instant) -> Option<FrameHandle> {
        match self.frame {
            Some((handle, deadline)) if deadline <= now => {
                self.frame = None;
                Some(handle)
            }
            _ => None,
        }
    }

    /// Map a terminal event onto a field input, if the field cares about it.
    pub fn translate(&mut self, event: Event) -> Option<InputEvent> {
        let input = match event {
            Event::Resize(width, height) => {
                self.area = Rect::new(0, 0, width, height);
                InputEvent::Resize
            }
            Event::FocusLost => InputEvent::PointerLeave,
            Event::Mouse(mouse) => self.translate_mouse(mouse)?,
            _ => return None,
        };
        self.is_listening(input.signal()).then_some(input)
    }

    fn translate_mouse(&self, mouse: MouseEvent) -> Option<InputEvent> {
        let (x, y) = cell_center(mouse.column, mouse.row);
        let inside = self.surface_rect().contains(x, y);
        let input = match mouse.kind {
            MouseEventKind::Moved if inside => InputEvent::PointerMove { x, y },
            MouseEventKind::Down(_) | MouseEventKind::Drag(_) if inside => {
                InputEvent::TouchMove { x, y }
            }
            MouseEventKind::Up(_) => InputEvent::TouchEnd,
            MouseEventKind::Moved | MouseEventKind::Down(_) | MouseEventKind::Drag(_) => {
                InputEvent::PointerLeave
            }
            _ => return None,
        };
        Some(input)
    }

    /// Enable or disable terminal reporting to match the listener set.
    fn sync_reporting(&mut self) {
        let want_mouse = [Signal::PointerMove, Signal::TouchMove, Signal::TouchEnd]
            .into_iter()
            .any(|s| self.is_listening(s));
        let want_focus = self.is_listening(Signal::PointerLeave);

        if want_mouse != self.mouse_captured {
            let result = if want_mouse {
                execute!(self.out, EnableMouseCapture)
            } else {
                execute!(self.out, DisableMouseCapture)
            };
            match result {
                Ok(()) => self.mouse_captured = want_mouse,
                Err(e) => tracing::warn!(error = %e, want_mouse, "failed to toggle mouse capture"),
            }
        }

        if want_focus != self.focus_reported {
            let result = if want_focus {
                execute!(self.out, EnableFocusChange)
            } else {
                execute!(self.out, DisableFocusChange)
            };
            match result {
                Ok(()) => self.focus_reported = want_focus,
                Err(e) => tracing::warn!(error = %e, want_focus, "failed to toggle focus reporting"),
            }
        }
    }

    fn next_id(&mut self) -> u64 {
        self.next_id += 1;
        self.next_id
    }

    #[cfg(test)]
    fn output(&self) -> &W {
        &self.out
    }
}

impl<W: Write> Host for TerminalHost<W> {
    fn surface_rect(&self) -> SurfaceRect {
        SurfaceRect::new(
            u32::from(self.area.x) * CELL_WIDTH,
            u32::from(self.area.y) * CELL_HEIGHT,
            u32::from(self.area.width) * CELL_WIDTH,
            u32::from(self.area.height) * CELL_HEIGHT,
        )
    }

    fn add_listener(&mut self, signal: Signal) -> ListenerId {
        let id = ListenerId(self.next_id());
        self.listeners.insert(id, signal);
        self.sync_reporting();
        id
    }

    fn remove_listener(&mut self, id: ListenerId) {
        if self.listeners.remove(&id).is_some() {
            self.sync_reporting();
        }
    }

    fn request_frame(&mut self) -> FrameHandle {
        let handle = FrameHandle(self.next_id());
        self.frame = Some((handle, Instant::now() + self.frame_interval));
        handle
    }

    fn cancel_frame(&mut self, handle: FrameHandle) {
        if self.frame.is_some_and(|(pending, _)| pending == handle) {
            self.frame = None;
        }
    }
}

/// Turn off mouse capture and focus reporting unconditionally.
pub fn release_input<W: Write>(out: &mut W) -> std::io::Result<()> {
    execute!(out, DisableMouseCapture, DisableFocusChange)
}

/// Centre of a terminal cell in surface units.
pub fn cell_center(column: u16, row: u16) -> (f64, f64) {
    (
        f64::from(u32::from(column) * CELL_WIDTH + CELL_WIDTH / 2),
        f64::from(u32::from(row) * CELL_HEIGHT + CELL_HEIGHT / 2),
    )
}
