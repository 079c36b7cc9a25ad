// Topic generator session state and its transitions

use std::collections::HashSet;

use uuid::Uuid;

use crate::error::GenerationError;
use crate::prompts::TOPIC_COUNT;

pub const DEFAULT_SUGGESTED_KEYWORDS: [&str; 12] = [
    "Travel",
    "Food",
    "Hobbies",
    "Technology",
    "Culture",
    "Work",
    "Education",
    "Movies",
    "Music",
    "Sports",
    "Health",
    "Environment",
];

pub const EMPTY_KEYWORD_MESSAGE: &str = "Please enter a keyword to generate topics.";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum RegionPhase {
    #[default]
    Idle,
    Loading,
    Success,
    Failed,
}

/// Loading, error and data of one independently updated part of the view.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RegionState {
    pub phase: RegionPhase,
    pub error: Option<String>,
    pub data: Vec<String>,
}

impl RegionState {
    pub fn with_data(data: Vec<String>) -> Self {
        Self {
            data,
            ..Self::default()
        }
    }

    pub fn is_loading(&self) -> bool {
        self.phase == RegionPhase::Loading
    }

    fn start(&mut self, keep_data: bool) {
        self.phase = RegionPhase::Loading;
        self.error = None;
        if !keep_data {
            self.data.clear();
        }
    }

    fn succeed(&mut self, data: Vec<String>) {
        self.phase = RegionPhase::Success;
        self.error = None;
        self.data = data;
    }

    fn fail(&mut self, error: &GenerationError, keep_data: bool) {
        self.phase = RegionPhase::Failed;
        self.error = Some(error.to_string());
        if !keep_data {
            self.data.clear();
        }
    }

    fn reset(&mut self) {
        *self = Self::default();
    }
}

/// Every keyword ever offered as a suggestion, in first-seen order.
#[derive(Debug, Clone, Default)]
pub struct SeenKeywords {
    order: Vec<String>,
    index: HashSet<String>,
}

impl SeenKeywords {
    pub fn insert(&mut self, keyword: &str) -> bool {
        if self.index.contains(keyword) {
            return false;
        }
        self.index.insert(keyword.to_string());
        self.order.push(keyword.to_string());
        true
    }

    pub fn extend<'a>(&mut self, keywords: impl IntoIterator<Item = &'a String>) {
        for keyword in keywords {
            self.insert(keyword);
        }
    }

    pub fn len(&self) -> usize {
        self.order.len()
    }

    pub fn as_slice(&self) -> &[String] {
        &self.order
    }
}

/// State of one visit to the topic generator.
#[derive(Debug, Clone)]
pub struct TopicSession {
    pub id: Uuid,
    pub keyword: String,
    pub topics: RegionState,
    pub suggestions: RegionState,
    pub seen_keywords: SeenKeywords,
    /// Topic shown in the detail popup, if open
    pub detail_topic: Option<String>,
    pub detail: RegionState,
}

impl TopicSession {
    pub fn new() -> Self {
        let defaults: Vec<String> = DEFAULT_SUGGESTED_KEYWORDS
            .iter()
            .map(ToString::to_string)
            .collect();
        let mut seen_keywords = SeenKeywords::default();
        seen_keywords.extend(&defaults);

        Self {
            id: Uuid::new_v4(),
            keyword: String::new(),
            topics: RegionState::default(),
            suggestions: RegionState::with_data(defaults),
            seen_keywords,
            detail_topic: None,
            detail: RegionState::default(),
        }
    }

    /// Start a topics request for the current keyword.
    ///
    /// Returns the keyword to send, or `None` when the keyword is blank, in
    /// which case the topics region carries a validation error instead.
    pub fn begin_submit(&mut self) -> Option<String> {
        if self.keyword.trim().is_empty() {
            let err = GenerationError::Validation(EMPTY_KEYWORD_MESSAGE.to_string());
            self.topics.fail(&err, false);
            return None;
        }
        self.topics.start(false);
        Some(self.keyword.clone())
    }

    pub fn finish_submit(&mut self, result: Result<Vec<String>, GenerationError>) {
        match result {
            Ok(mut topics) => {
                topics.truncate(TOPIC_COUNT);
                self.topics.succeed(topics);
            }
            Err(err) => self.topics.fail(&err, false),
        }
    }

    /// Start a suggestions refresh; current chips stay visible until new ones arrive.
    ///
    /// Returns the keywords the generator should avoid.
    pub fn begin_refresh(&mut self) -> Vec<String> {
        self.suggestions.start(true);
        self.seen_keywords.as_slice().to_vec()
    }

    pub fn finish_refresh(&mut self, result: Result<Vec<String>, GenerationError>) {
        match result {
            Ok(batch) => {
                self.seen_keywords.extend(&batch);
                self.suggestions.succeed(batch);
            }
            Err(err) => self.suggestions.fail(&err, true),
        }
    }

    pub fn select_keyword(&mut self, keyword: &str) {
        keyword.clone_into(&mut self.keyword);
    }

    pub fn begin_open_topic(&mut self, topic: &str) {
        self.detail_topic = Some(topic.to_string());
        self.detail.start(false);
    }

    pub fn finish_open_topic(&mut self, result: Result<Vec<String>, GenerationError>) {
        match result {
            Ok(sentences) => self.detail.succeed(sentences),
            Err(err) => self.detail.fail(&err, false),
        }
    }

    pub fn close_topic(&mut self) {
        self.detail_topic = None;
        self.detail.reset();
    }

    pub const fn is_detail_open(&self) -> bool {
        self.detail_topic.is_some()
    }
}

impl Default for TopicSession {
    fn default() -> Self {
        Self::new()
    }
}
