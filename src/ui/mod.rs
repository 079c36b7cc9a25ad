pub mod widgets;

use crate::app::{App, Screen};
use ratatui::{
    layout::{Constraint, Direction, Layout},
    Frame,
};

pub fn render(frame: &mut Frame, app: &App) {
    match app.screen {
        Screen::Launcher => render_launcher_screen(frame, app),
        Screen::TopicGenerator => render_generator_screen(frame, app),
    }

    // Render help window on top if active
    if app.show_help {
        widgets::render_help_window(frame, frame.area());
    }
}

fn render_launcher_screen(frame: &mut Frame, app: &App) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3), // Header
            Constraint::Min(0),    // Feature cards
            Constraint::Length(1), // Footer
            Constraint::Length(1), // Bottom keymap bar
        ])
        .split(frame.area());

    widgets::render_header(frame, chunks[0]);
    widgets::render_feature_grid(frame, app, chunks[1]);
    widgets::render_footer(frame, chunks[2]);
    widgets::render_bottom_bar(frame, app, chunks[3]);
}

fn render_generator_screen(frame: &mut Frame, app: &App) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1), // Title with back hint
            Constraint::Length(3), // Keyword input
            Constraint::Length(1), // Topics error / status
            Constraint::Length(6), // Suggestion chips
            Constraint::Min(0),    // Generated topics
            Constraint::Length(1), // Bottom keymap bar
        ])
        .split(frame.area());

    widgets::render_generator_title(frame, app, chunks[0]);
    widgets::render_keyword_input(frame, app, chunks[1]);
    widgets::render_topics_status(frame, app, chunks[2]);
    widgets::render_suggestions(frame, app, chunks[3]);
    widgets::render_topics(frame, app, chunks[4]);
    widgets::render_bottom_bar(frame, app, chunks[5]);

    if app.is_detail_open() {
        widgets::render_detail_popup(frame, app, frame.area());
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use ratatui::{backend::TestBackend, Terminal};

    pub fn draw(app: &App) -> String {
        let mut terminal = Terminal::new(TestBackend::new(100, 40)).unwrap();
        terminal.draw(|f| render(f, app)).unwrap();

        let buffer = terminal.backend().buffer();
        let width = buffer.area.width as usize;
        buffer
            .content()
            .chunks(width)
            .map(|row| row.iter().map(ratatui::buffer::Cell::symbol).collect::<String>())
            .collect::<Vec<_>>()
            .join("\n")
    }

    #[test]
    fn test_render_launcher() {
        let app = App::new("gemini-test".to_string());
        let screen = draw(&app);
        assert!(screen.contains("ESL Teaching Assistant"));
        assert!(screen.contains("Topic Generator"));
        assert!(screen.contains("Role-Play Hub"));
        assert!(screen.contains("Coming soon"));
    }

    #[test]
    fn test_render_help_over_launcher() {
        let mut app = App::new("gemini-test".to_string());
        app.toggle_help();
        assert!(draw(&app).contains("Keyboard Shortcuts"));
    }

    #[test]
    fn test_render_generator() {
        let mut app = App::new("gemini-test".to_string());
        app.activate_feature();
        let screen = draw(&app);
        assert!(screen.contains("ESL Topic Generator"));
        assert!(screen.contains("Suggested Keywords"));
        assert!(screen.contains("Travel"));
        assert!(screen.contains("Enter a keyword"));
    }
}
