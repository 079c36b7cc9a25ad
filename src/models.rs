use serde::{Deserialize, Serialize};

use crate::api::DEFAULT_BASE_URL;
use crate::app::Screen;

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct AppConfig {
    #[serde(default = "default_base_url")]
    pub api_base_url: String,
    #[serde(default = "default_model")]
    pub model: String,
}

fn default_base_url() -> String {
    DEFAULT_BASE_URL.to_string()
}

fn default_model() -> String {
    "gemini-2.5-flash-preview-04-17".to_string()
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            api_base_url: default_base_url(),
            model: default_model(),
        }
    }
}

/// What a launcher card does when activated.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FeatureKind {
    Active(Screen),
    /// Shown but disabled; activation does nothing
    Placeholder,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Feature {
    pub title: &'static str,
    pub description: &'static str,
    pub icon: &'static str,
    pub kind: FeatureKind,
}

impl Feature {
    pub const fn is_available(&self) -> bool {
        matches!(self.kind, FeatureKind::Active(_))
    }
}

pub const FEATURES: [Feature; 3] = [
    Feature {
        title: "Topic Generator",
        description: "Generate discussion topics for ESL lessons.",
        icon: "💡",
        kind: FeatureKind::Active(Screen::TopicGenerator),
    },
    Feature {
        title: "Role-Play Hub",
        description: "Simulate real-life conversations for practice.",
        icon: "🎭",
        kind: FeatureKind::Placeholder,
    },
    Feature {
        title: "Story Creator",
        description: "Weave stories to practice narrative skills.",
        icon: "📖",
        kind: FeatureKind::Placeholder,
    },
];

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_app_config_default() {
        let config = AppConfig::default();
        assert_eq!(config.api_base_url, "https://generativelanguage.googleapis.com");
        assert_eq!(config.model, "gemini-2.5-flash-preview-04-17");
    }

    #[test]
    fn test_app_config_fills_missing_fields() {
        let config: AppConfig = toml::from_str("model = \"gemini-test\"").unwrap();
        assert_eq!(config.model, "gemini-test");
        assert_eq!(config.api_base_url, DEFAULT_BASE_URL);
    }

    #[test]
    fn test_only_topic_generator_is_available() {
        let available: Vec<_> = FEATURES.iter().filter(|f| f.is_available()).collect();
        assert_eq!(available.len(), 1);
        assert_eq!(available[0].kind, FeatureKind::Active(Screen::TopicGenerator));
    }
}
