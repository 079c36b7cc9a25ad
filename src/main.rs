mod api;
mod app;
mod config;
mod error;
mod events;
mod generation;
mod logging;
mod models;
mod parser;
mod prompts;
mod session;
mod ui;

use anyhow::Result;
use crossterm::{
    event::{self, Event, KeyCode, KeyEventKind, KeyModifiers},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{backend::Backend, prelude::*};
use std::io;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::mpsc;

use api::GeminiClient;
use app::{App, Focus, Screen};
use events::AppEvent;
use generation::Dispatcher;

#[tokio::main]
async fn main() -> Result<()> {
    // Config and logging come first so startup problems end up in the log
    let config = config::load_config()?;
    logging::init(&config::get_log_path()?)?;
    tracing::info!(model = %config.model, base_url = %config.api_base_url, "starting");

    let client = GeminiClient::new(config.api_base_url.clone(), config::api_key_from_env())?;
    if !client.has_api_key() {
        tracing::warn!("no API key found; generation requests will fail until one is set");
    }

    // Create channel for async events
    let (tx, mut rx) = mpsc::unbounded_channel::<AppEvent>();
    let dispatcher = Dispatcher::new(Arc::new(client), config.model.clone(), tx);
    let mut app = App::new(config.model);

    // Setup terminal
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let res = run_app(&mut terminal, &mut app, &dispatcher, &mut rx);

    // Restore terminal
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    if let Err(err) = res {
        tracing::error!(error = ?err, "application error");
        eprintln!("Error: {err:?}");
    }
    tracing::info!("exiting");

    Ok(())
}

fn handle_app_event(app: &mut App, event: AppEvent) {
    match event {
        AppEvent::Generated { session, outcome } => match app.session.as_mut() {
            Some(current) if current.id == session => {
                outcome.apply(current);
                app.clamp_selection();
            }
            _ => {
                tracing::debug!(
                    %session,
                    region = outcome.region(),
                    "dropping outcome for a closed session"
                );
            }
        },
    }
}

const fn handle_help_keys(app: &mut App, key: KeyCode, modifiers: KeyModifiers) -> bool {
    if !app.show_help {
        return false;
    }

    match key {
        KeyCode::Char('h') if modifiers.contains(KeyModifiers::CONTROL) => {
            app.toggle_help();
        }
        KeyCode::Esc => {
            app.show_help = false;
        }
        _ => {}
    }
    true
}

/// Keys shared by every screen. Returns true when the key was consumed.
fn handle_global_keys(app: &mut App, key: KeyCode, modifiers: KeyModifiers) -> bool {
    match key {
        KeyCode::Char('c') if modifiers.contains(KeyModifiers::CONTROL) => {
            if app.exit_pending {
                app.quit();
            } else {
                app.exit_pending = true;
            }
            true
        }
        KeyCode::Esc if app.exit_pending => {
            app.exit_pending = false;
            true
        }
        KeyCode::Char('q') if modifiers.contains(KeyModifiers::CONTROL) => {
            app.quit();
            true
        }
        KeyCode::Char('h') if modifiers.contains(KeyModifiers::CONTROL) => {
            app.toggle_help();
            true
        }
        _ => {
            // Any other key cancels pending exit
            app.exit_pending = false;
            false
        }
    }
}

fn handle_launcher_keys(app: &mut App, key: KeyCode) {
    match key {
        KeyCode::Left | KeyCode::Up | KeyCode::BackTab => app.select_previous_feature(),
        KeyCode::Right | KeyCode::Down | KeyCode::Tab => app.select_next_feature(),
        KeyCode::Enter | KeyCode::Char(' ') => app.activate_feature(),
        _ => {}
    }
}

fn handle_generator_keys(
    app: &mut App,
    key: KeyCode,
    modifiers: KeyModifiers,
    dispatcher: &Dispatcher,
) {
    let Some(session) = app.session.as_mut() else {
        return;
    };

    // The detail popup is modal
    if session.is_detail_open() {
        if key == KeyCode::Esc {
            session.close_topic();
        }
        return;
    }

    match key {
        KeyCode::Esc => app.back_to_launcher(),
        KeyCode::Tab => app.cycle_focus(),
        KeyCode::Char('r') if modifiers.contains(KeyModifiers::CONTROL) => {
            if !session.suggestions.is_loading() {
                dispatcher.refresh_suggestions(session);
            }
        }
        _ => match app.focus {
            Focus::Input => match key {
                KeyCode::Enter if !session.topics.is_loading() => {
                    if dispatcher.submit_keyword(session).is_some() {
                        app.topic_index = 0;
                    }
                }
                KeyCode::Backspace => {
                    session.keyword.pop();
                }
                KeyCode::Char(c) => session.keyword.push(c),
                _ => {}
            },
            Focus::Suggestions => match key {
                KeyCode::Left | KeyCode::Up => app.move_suggestion(false),
                KeyCode::Right | KeyCode::Down => app.move_suggestion(true),
                KeyCode::Enter => app.pick_suggestion(),
                _ => {}
            },
            Focus::Topics => match key {
                KeyCode::Up => app.move_topic(false),
                KeyCode::Down => app.move_topic(true),
                KeyCode::Enter => {
                    if let Some(topic) = app.selected_topic() {
                        if let Some(session) = app.session.as_mut() {
                            dispatcher.open_topic(session, &topic);
                        }
                    }
                }
                _ => {}
            },
        },
    }
}

fn handle_key(app: &mut App, key: KeyCode, modifiers: KeyModifiers, dispatcher: &Dispatcher) {
    // Handle help window first
    if handle_help_keys(app, key, modifiers) {
        return;
    }
    if handle_global_keys(app, key, modifiers) {
        return;
    }

    match app.screen {
        Screen::Launcher => handle_launcher_keys(app, key),
        Screen::TopicGenerator => handle_generator_keys(app, key, modifiers, dispatcher),
    }
}

fn run_app<B: Backend>(
    terminal: &mut Terminal<B>,
    app: &mut App,
    dispatcher: &Dispatcher,
    event_rx: &mut mpsc::UnboundedReceiver<AppEvent>,
) -> Result<()> {
    loop {
        terminal.draw(|f| ui::render(f, app))?;

        // Apply every finished request before reading input
        while let Ok(app_event) = event_rx.try_recv() {
            handle_app_event(app, app_event);
        }

        if event::poll(Duration::from_millis(16))? {
            if let Event::Key(key) = event::read()? {
                if key.kind == KeyEventKind::Press {
                    handle_key(app, key.code, key.modifiers, dispatcher);
                }
            }
        }

        if app.should_quit {
            break;
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::MockGenerator;
    use crate::error::GenerationError;
    use crate::events::Outcome;
    use crate::session::RegionPhase;

    fn setup(generator: MockGenerator) -> (App, Dispatcher, mpsc::UnboundedReceiver<AppEvent>) {
        let (tx, rx) = mpsc::unbounded_channel();
        let dispatcher = Dispatcher::new(Arc::new(generator), "gemini-test".to_string(), tx);
        let mut app = App::new("gemini-test".to_string());
        app.activate_feature();
        (app, dispatcher, rx)
    }

    fn press(app: &mut App, dispatcher: &Dispatcher, key: KeyCode) {
        handle_key(app, key, KeyModifiers::NONE, dispatcher);
    }

    fn type_text(app: &mut App, dispatcher: &Dispatcher, text: &str) {
        for c in text.chars() {
            press(app, dispatcher, KeyCode::Char(c));
        }
    }

    #[tokio::test]
    async fn test_typing_and_submitting_generates_topics() {
        let mut generator = MockGenerator::new();
        generator
            .expect_generate()
            .times(1)
            .returning(|_, _| Ok("[\"A\",\"B\",\"C\",\"D\",\"E\",\"F\",\"G\"]".to_string()));
        let (mut app, dispatcher, mut rx) = setup(generator);

        type_text(&mut app, &dispatcher, "travel");
        press(&mut app, &dispatcher, KeyCode::Enter);
        assert!(app.session.as_ref().unwrap().topics.is_loading());

        let event = rx.recv().await.unwrap();
        handle_app_event(&mut app, event);

        let session = app.session.as_ref().unwrap();
        assert_eq!(session.keyword, "travel");
        assert_eq!(session.topics.data, vec!["A", "B", "C", "D", "E"]);
        assert_eq!(session.topics.phase, RegionPhase::Success);
    }

    #[tokio::test]
    async fn test_enter_on_blank_input_issues_no_request() {
        let mut generator = MockGenerator::new();
        generator.expect_generate().never();
        let (mut app, dispatcher, mut rx) = setup(generator);

        type_text(&mut app, &dispatcher, "  ");
        press(&mut app, &dispatcher, KeyCode::Enter);

        assert!(app.session.as_ref().unwrap().topics.error.is_some());
        assert!(rx.try_recv().is_err());
    }

    #[tokio::test]
    async fn test_ctrl_r_refreshes_suggestions() {
        let mut generator = MockGenerator::new();
        generator
            .expect_generate()
            .times(1)
            .returning(|_, _| Ok("[\"Cooking\",\"Art\"]".to_string()));
        let (mut app, dispatcher, mut rx) = setup(generator);

        handle_key(&mut app, KeyCode::Char('r'), KeyModifiers::CONTROL, &dispatcher);
        // Ignored while the first refresh is in flight
        handle_key(&mut app, KeyCode::Char('r'), KeyModifiers::CONTROL, &dispatcher);

        let event = rx.recv().await.unwrap();
        handle_app_event(&mut app, event);

        let session = app.session.as_ref().unwrap();
        assert_eq!(session.suggestions.data, vec!["Cooking", "Art"]);
        assert_eq!(session.seen_keywords.len(), 14);
    }

    #[tokio::test]
    async fn test_open_topic_and_close_with_esc() {
        let mut generator = MockGenerator::new();
        generator
            .expect_generate()
            .returning(|_, _| Err(GenerationError::transport("offline")));
        let (mut app, dispatcher, mut rx) = setup(generator);
        app.session
            .as_mut()
            .unwrap()
            .finish_submit(Ok(vec!["A".to_string()]));

        app.focus = Focus::Topics;
        press(&mut app, &dispatcher, KeyCode::Enter);
        assert!(app.is_detail_open());

        let event = rx.recv().await.unwrap();
        handle_app_event(&mut app, event);
        let session = app.session.as_ref().unwrap();
        assert!(session.detail.error.is_some());
        assert_eq!(session.topics.data, vec!["A"]);

        // Esc closes the popup before leaving the view
        press(&mut app, &dispatcher, KeyCode::Esc);
        assert!(!app.is_detail_open());
        assert_eq!(app.screen, Screen::TopicGenerator);

        press(&mut app, &dispatcher, KeyCode::Esc);
        assert_eq!(app.screen, Screen::Launcher);
    }

    #[test]
    fn test_outcome_for_closed_session_is_dropped() {
        let (tx, _rx) = mpsc::unbounded_channel();
        let dispatcher = Dispatcher::new(Arc::new(MockGenerator::new()), "m".to_string(), tx);
        let mut app = App::new("m".to_string());
        app.activate_feature();
        let stale = app.session.as_ref().unwrap().id;

        press(&mut app, &dispatcher, KeyCode::Esc);
        app.activate_feature();

        handle_app_event(
            &mut app,
            AppEvent::Generated {
                session: stale,
                outcome: Outcome::Topics(Ok(vec!["stale".to_string()])),
            },
        );
        assert!(app.session.as_ref().unwrap().topics.data.is_empty());
    }

    #[test]
    fn test_pick_suggestion_with_keys() {
        let (tx, _rx) = mpsc::unbounded_channel();
        let dispatcher = Dispatcher::new(Arc::new(MockGenerator::new()), "m".to_string(), tx);
        let mut app = App::new("m".to_string());
        app.activate_feature();

        press(&mut app, &dispatcher, KeyCode::Tab);
        press(&mut app, &dispatcher, KeyCode::Right);
        press(&mut app, &dispatcher, KeyCode::Right);
        press(&mut app, &dispatcher, KeyCode::Enter);

        assert_eq!(app.session.as_ref().unwrap().keyword, "Hobbies");
        assert_eq!(app.focus, Focus::Input);
    }

    #[test]
    fn test_double_ctrl_c_quits() {
        let (tx, _rx) = mpsc::unbounded_channel();
        let dispatcher = Dispatcher::new(Arc::new(MockGenerator::new()), "m".to_string(), tx);
        let mut app = App::new("m".to_string());

        handle_key(&mut app, KeyCode::Char('c'), KeyModifiers::CONTROL, &dispatcher);
        assert!(app.exit_pending);
        assert!(!app.should_quit);
        handle_key(&mut app, KeyCode::Char('c'), KeyModifiers::CONTROL, &dispatcher);
        assert!(app.should_quit);
    }

    #[test]
    fn test_placeholder_card_keeps_launcher() {
        let (tx, _rx) = mpsc::unbounded_channel();
        let dispatcher = Dispatcher::new(Arc::new(MockGenerator::new()), "m".to_string(), tx);
        let mut app = App::new("m".to_string());

        press(&mut app, &dispatcher, KeyCode::Right);
        press(&mut app, &dispatcher, KeyCode::Enter);
        assert_eq!(app.screen, Screen::Launcher);
    }
}
