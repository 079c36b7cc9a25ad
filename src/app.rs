use crate::models::{FeatureKind, FEATURES};
use crate::session::TopicSession;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Screen {
    Launcher,
    TopicGenerator,
}

/// Which part of the topic generator receives key presses.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Focus {
    Input,
    Suggestions,
    Topics,
}

impl Focus {
    pub const fn next(self) -> Self {
        match self {
            Self::Input => Self::Suggestions,
            Self::Suggestions => Self::Topics,
            Self::Topics => Self::Input,
        }
    }
}

#[derive(Debug)]
pub struct App {
    pub screen: Screen,
    pub should_quit: bool,
    pub show_help: bool,
    pub exit_pending: bool,
    pub model: String,
    pub launcher_index: usize,

    // Topic generator view; `None` outside of it
    pub session: Option<TopicSession>,
    pub focus: Focus,
    pub suggestion_index: usize,
    pub topic_index: usize,
}

impl App {
    pub fn new(model: String) -> Self {
        Self {
            screen: Screen::Launcher,
            should_quit: false,
            show_help: false,
            exit_pending: false,
            model,
            launcher_index: 0,
            session: None,
            focus: Focus::Input,
            suggestion_index: 0,
            topic_index: 0,
        }
    }

    pub const fn quit(&mut self) {
        self.should_quit = true;
    }

    pub const fn toggle_help(&mut self) {
        self.show_help = !self.show_help;
    }

    pub const fn select_next_feature(&mut self) {
        self.launcher_index = (self.launcher_index + 1) % FEATURES.len();
    }

    pub const fn select_previous_feature(&mut self) {
        self.launcher_index = (self.launcher_index + FEATURES.len() - 1) % FEATURES.len();
    }

    /// Activate the selected launcher card. Placeholders do nothing.
    pub fn activate_feature(&mut self) {
        match FEATURES[self.launcher_index].kind {
            FeatureKind::Active(screen) => self.enter(screen),
            FeatureKind::Placeholder => {
                tracing::debug!(
                    feature = FEATURES[self.launcher_index].title,
                    "placeholder feature activated"
                );
            }
        }
    }

    fn enter(&mut self, screen: Screen) {
        self.screen = screen;
        if screen == Screen::TopicGenerator {
            let session = TopicSession::new();
            tracing::info!(session = %session.id, "topic generator opened");
            self.session = Some(session);
            self.focus = Focus::Input;
            self.suggestion_index = 0;
            self.topic_index = 0;
        }
    }

    /// Leave the topic generator, discarding its session.
    pub fn back_to_launcher(&mut self) {
        if let Some(session) = self.session.take() {
            tracing::info!(session = %session.id, "topic generator closed");
        }
        self.screen = Screen::Launcher;
    }

    pub const fn cycle_focus(&mut self) {
        self.focus = self.focus.next();
    }

    pub fn suggestion_count(&self) -> usize {
        self.session.as_ref().map_or(0, |s| s.suggestions.data.len())
    }

    pub fn topic_count(&self) -> usize {
        self.session.as_ref().map_or(0, |s| s.topics.data.len())
    }

    pub fn move_suggestion(&mut self, forward: bool) {
        self.suggestion_index = step(self.suggestion_index, self.suggestion_count(), forward);
    }

    pub fn move_topic(&mut self, forward: bool) {
        self.topic_index = step(self.topic_index, self.topic_count(), forward);
    }

    /// Keep list cursors inside their lists after data changed.
    pub fn clamp_selection(&mut self) {
        self.suggestion_index = self
            .suggestion_index
            .min(self.suggestion_count().saturating_sub(1));
        self.topic_index = self.topic_index.min(self.topic_count().saturating_sub(1));
    }

    /// Copy the highlighted chip into the keyword field and move to the input.
    pub fn pick_suggestion(&mut self) {
        let index = self.suggestion_index;
        if let Some(session) = self.session.as_mut() {
            if let Some(keyword) = session.suggestions.data.get(index).cloned() {
                session.select_keyword(&keyword);
                self.focus = Focus::Input;
            }
        }
    }

    pub fn selected_topic(&self) -> Option<String> {
        self.session
            .as_ref()
            .and_then(|s| s.topics.data.get(self.topic_index).cloned())
    }

    pub fn is_detail_open(&self) -> bool {
        self.session.as_ref().is_some_and(TopicSession::is_detail_open)
    }
}

const fn step(index: usize, len: usize, forward: bool) -> usize {
    if len == 0 {
        0
    } else if forward {
        (index + 1) % len
    } else {
        (index + len - 1) % len
    }
}
