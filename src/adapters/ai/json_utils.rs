//! Cleanup of model-produced JSON before parsing.

/// Sanitize a JSON payload produced by an LLM.
///
/// Models sometimes wrap JSON in markdown code blocks or add a sentence before it,
/// even in JSON mode. Strips fences, then trims to the outermost array or object.
pub fn sanitize_json(raw_text: &str) -> String {
    let trimmed = raw_text.trim();

    // ```json ... ``` or ``` ... ```
    if let Some(rest) = trimmed.strip_prefix("```") {
        let without_prefix = rest.strip_prefix("json").unwrap_or(rest);
        let body = match without_prefix.rfind("```") {
            Some(end_idx) => &without_prefix[..end_idx],
            None => without_prefix,
        };
        return body.trim().to_string();
    }

    // Whichever of `[` / `{` opens first decides the closing bracket.
    if let Some(start) = trimmed.find(['[', '{']) {
        let close = if trimmed[start..].starts_with('[') { ']' } else { '}' };
        if let Some(end) = trimmed.rfind(close) {
            if start < end {
                return trimmed[start..=end].to_string();
            }
        }
    }

    trimmed.to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sanitize_json_clean_array() {
        let input = r#"[{"id": "1"}]"#;
        assert_eq!(sanitize_json(input), input);
    }

    #[test]
    fn test_sanitize_json_markdown() {
        let input = "```json\n[{\"id\": \"1\"}]\n```";
        assert_eq!(sanitize_json(input), r#"[{"id": "1"}]"#);
    }

    #[test]
    fn test_sanitize_json_markdown_no_lang() {
        let input = "```\n{\"title\": \"x\"}\n```";
        assert_eq!(sanitize_json(input), r#"{"title": "x"}"#);
    }

    #[test]
    fn test_sanitize_json_with_text() {
        let input = "Here are today's stories:\n[{\"id\": \"1\"}]\nStay informed.";
        assert_eq!(sanitize_json(input), r#"[{"id": "1"}]"#);
    }

    #[test]
    fn test_sanitize_json_object_containing_array() {
        let input = r#"Result: {"items": [1, 2]} done"#;
        assert_eq!(sanitize_json(input), r#"{"items": [1, 2]}"#);
    }

    #[test]
    fn test_sanitize_json_plain_text_untouched() {
        assert_eq!(sanitize_json("  no json here "), "no json here");
    }
}
