use crossterm::{
    ExecutableCommand,
    event::{DisableMouseCapture, EnableMouseCapture, MouseButton, MouseEvent, MouseEventKind},
};
use photoscout_core::dismissal::{PointerEvent, PointerKind, Region};
use ratatui::layout::Rect;
use std::io;

/// Holds terminal mouse capture for as long as it lives.
pub struct MouseCapture(());

impl MouseCapture {
    pub fn enable() -> io::Result<Self> {
        io::stdout().execute(EnableMouseCapture)?;
        Ok(Self(()))
    }
}

impl Drop for MouseCapture {
    fn drop(&mut self) {
        if let Err(e) = io::stdout().execute(DisableMouseCapture) {
            log::warn!("Failed to release mouse capture: {e}");
        }
    }
}

/// Translate a crossterm mouse event. Only the primary button counts as a press.
pub fn pointer_event(mouse: MouseEvent) -> Option<PointerEvent> {
    let kind = match mouse.kind {
        MouseEventKind::Down(MouseButton::Left) => PointerKind::Press,
        MouseEventKind::Up(MouseButton::Left) => PointerKind::Release,
        MouseEventKind::Moved | MouseEventKind::Drag(_) => PointerKind::Move,
        MouseEventKind::ScrollUp
        | MouseEventKind::ScrollDown
        | MouseEventKind::ScrollLeft
        | MouseEventKind::ScrollRight => PointerKind::Scroll,
        MouseEventKind::Down(_) | MouseEventKind::Up(_) => return None,
    };
    Some(PointerEvent {
        kind,
        column: mouse.column,
        row: mouse.row,
    })
}

pub fn region(rect: Rect) -> Region {
    Region::new(rect.x, rect.y, rect.width, rect.height)
}
