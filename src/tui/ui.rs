use crate::core::state::{App, Indicator};
use crate::tui::component::Component;
use crate::tui::components::{INPUT_HEIGHT, LandingPage, MessageList, TitleBar};
use crate::tui::{InputMode, TuiState};

use ratatui::Frame;
use ratatui::layout::{Constraint, Layout, Rect};

/// Screen regions: title bar, main view, input box.
pub fn layout(area: Rect) -> [Rect; 3] {
    use Constraint::{Length, Min};
    Layout::vertical([Length(1), Min(0), Length(INPUT_HEIGHT)]).areas(area)
}

pub fn draw_ui(frame: &mut Frame, app: &App, tui: &mut TuiState, spinner_frame: usize) {
    let [title_area, main_area, input_area] = layout(frame.area());

    // Main area - welcome placeholder until the first question, then the log
    if app.conversation.has_welcome() {
        LandingPage::new(&app.quick_questions).render(frame, main_area);
    } else {
        MessageList::new(
            &mut tui.message_list,
            &app.conversation,
            app.render_markdown,
            spinner_frame,
        )
        .render(frame, main_area);
    }

    TitleBar::new(
        app.backend_url.clone(),
        app.indicator(Indicator::Storage),
        app.indicator(Indicator::Model),
        app.status_message.clone(),
        tui.message_list.has_unseen_content(),
    )
    .render(frame, title_area);

    tui.input_box.enabled = app.input_enabled;
    tui.input_box.focused = tui.input_mode == InputMode::Input;
    tui.input_box.spinner_frame = spinner_frame;
    tui.input_box.render(frame, input_area);
}
