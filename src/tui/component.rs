use ratatui::Frame;
use ratatui::layout::Rect;

use super::event::TuiEvent;

/// Something that draws itself into a region of the frame.
///
/// Props arrive as struct fields; persistent presentation state (scroll
/// offsets, cursor position, layout caches) lives in a `&mut` state struct
/// owned by `TuiState`, so a component can be rebuilt every frame.
///
/// `render` takes `&mut self` so a component can refresh those caches
/// during the draw pass, the same way ratatui's `StatefulWidget` does.
pub trait Component {
    fn render(&mut self, frame: &mut Frame, area: Rect);
}

/// A component that reacts to terminal events.
pub trait EventHandler {
    /// What the component reports back to the event loop.
    type Event;

    /// Returns None when the event was ignored or fully handled internally.
    fn handle_event(&mut self, event: &TuiEvent) -> Option<Self::Event>;
}
