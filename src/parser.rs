// Decoding of model completions into string lists

use crate::error::GenerationError;

const FENCE: &str = "```";

/// Parse a completion as a JSON array of strings.
///
/// The completion may be wrapped in a fenced code block with an optional
/// language tag. `context` names the payload in the error message.
pub fn parse_string_list(raw: &str, context: &str) -> Result<Vec<String>, GenerationError> {
    let payload = unwrap_fence(raw.trim());
    tracing::debug!(context, language = ?fence_language(raw), "parsing completion");

    serde_json::from_str::<Vec<String>>(payload).map_err(|e| {
        tracing::warn!(context, error = %e, raw, "completion is not a JSON array of strings");
        GenerationError::format(context)
    })
}

/// Return the inner content of a single fenced block, or the text unchanged.
fn unwrap_fence(text: &str) -> &str {
    let Some(body) = text
        .strip_prefix(FENCE)
        .and_then(|rest| rest.strip_suffix(FENCE))
    else {
        return text;
    };

    let tag_len = body
        .find(|c: char| !(c.is_ascii_alphanumeric() || c == '_'))
        .unwrap_or(body.len());
    let inner = body[tag_len..].trim();

    if inner.is_empty() {
        text
    } else {
        inner
    }
}

/// Language tag of a fenced completion, if any
pub fn fence_language(raw: &str) -> Option<&str> {
    raw.trim()
        .strip_prefix(FENCE)
        .map(|rest| {
            let end = rest
                .find(|c: char| !(c.is_ascii_alphanumeric() || c == '_'))
                .unwrap_or(rest.len());
            &rest[..end]
        })
        .filter(|tag| !tag.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn strings(items: &[&str]) -> Vec<String> {
        items.iter().map(ToString::to_string).collect()
    }

    #[test]
    fn test_parse_plain_array() {
        let parsed = parse_string_list(r#"["Travel", "Food"]"#, "keywords").unwrap();
        assert_eq!(parsed, strings(&["Travel", "Food"]));
    }

    #[test]
    fn test_parse_fenced_with_language_tag() {
        let raw = "```json\n[\"A\",\"B\",\"C\",\"D\",\"E\",\"F\"]\n```";
        let parsed = parse_string_list(raw, "topics").unwrap();
        assert_eq!(parsed, strings(&["A", "B", "C", "D", "E", "F"]));
    }

    #[test]
    fn test_parse_fenced_without_language_tag() {
        let raw = "```\n[\"one\", \"two\"]\n```";
        assert_eq!(parse_string_list(raw, "x").unwrap(), strings(&["one", "two"]));
    }

    #[test]
    fn test_parse_fenced_on_single_line() {
        let raw = "```[\"only\"]```";
        assert_eq!(parse_string_list(raw, "x").unwrap(), strings(&["only"]));
    }

    #[test]
    fn test_parse_surrounding_whitespace() {
        let raw = "  \n ```json\n  [\"a\"]  \n```\n\n";
        assert_eq!(parse_string_list(raw, "x").unwrap(), strings(&["a"]));
    }

    #[test]
    fn test_parse_empty_array() {
        assert!(parse_string_list("[]", "x").unwrap().is_empty());
    }

    #[test]
    fn test_parse_keeps_fence_characters_inside_strings() {
        let raw = "[\"use ``` for code\"]";
        assert_eq!(
            parse_string_list(raw, "x").unwrap(),
            strings(&["use ``` for code"])
        );
    }

    #[test]
    fn test_plain_text_is_format_error() {
        let err = parse_string_list("Here are some topics: travel, food", "topics").unwrap_err();
        assert_eq!(err, GenerationError::format("topics"));
    }

    #[test]
    fn test_object_is_format_error() {
        let err = parse_string_list(r#"{"topics": ["a", "b"]}"#, "topics").unwrap_err();
        assert_eq!(err, GenerationError::format("topics"));
    }

    #[test]
    fn test_non_string_element_is_format_error() {
        let err = parse_string_list(r#"["a", 2, "c"]"#, "suggested keywords").unwrap_err();
        assert_eq!(err, GenerationError::format("suggested keywords"));
    }

    #[test]
    fn test_fenced_object_is_format_error() {
        let raw = "```json\n{\"a\": 1}\n```";
        assert!(matches!(
            parse_string_list(raw, "x"),
            Err(GenerationError::Format { .. })
        ));
    }

    #[test]
    fn test_empty_fence_is_format_error() {
        assert!(parse_string_list("```json```", "x").is_err());
        assert!(parse_string_list("", "x").is_err());
    }

    #[test]
    fn test_fence_language() {
        assert_eq!(fence_language("```json\n[]\n```"), Some("json"));
        assert_eq!(fence_language("```\n[]\n```"), None);
        assert_eq!(fence_language("[]"), None);
    }
}
