// Event types for async communication

use uuid::Uuid;

use crate::error::GenerationError;
use crate::session::TopicSession;

/// Result of one finished generation request.
#[derive(Debug, Clone)]
pub enum Outcome {
    Topics(Result<Vec<String>, GenerationError>),
    Suggestions(Result<Vec<String>, GenerationError>),
    Sentences(Result<Vec<String>, GenerationError>),
}

#[derive(Debug, Clone)]
pub enum AppEvent {
    /// A request issued by the session `session` completed
    Generated { session: Uuid, outcome: Outcome },
}

impl Outcome {
    /// Apply to the region that issued the request. Applied unconditionally:
    /// the last completion for a region wins.
    pub fn apply(self, session: &mut TopicSession) {
        match self {
            Self::Topics(result) => session.finish_submit(result),
            Self::Suggestions(result) => session.finish_refresh(result),
            Self::Sentences(result) => session.finish_open_topic(result),
        }
    }

    pub const fn region(&self) -> &'static str {
        match self {
            Self::Topics(_) => "topics",
            Self::Suggestions(_) => "suggestions",
            Self::Sentences(_) => "detail",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_outcome_applies_to_its_region_only() {
        let mut session = TopicSession::new();
        session.select_keyword("food");
        session.begin_submit();
        session.begin_refresh();

        Outcome::Topics(Ok(vec!["A".to_string()])).apply(&mut session);

        assert_eq!(session.topics.data, vec!["A".to_string()]);
        assert!(session.suggestions.is_loading());
    }

    #[test]
    fn test_outcome_region_names() {
        assert_eq!(Outcome::Topics(Ok(Vec::new())).region(), "topics");
        assert_eq!(Outcome::Suggestions(Ok(Vec::new())).region(), "suggestions");
        assert_eq!(Outcome::Sentences(Ok(Vec::new())).region(), "detail");
    }
}
