//! Detects a leading sentinel JSON object in provider output: some tools
//! parse a sentinel leading JSON block for special statuses. On a match,
//! the kernel surfaces the structured status instead of persisting an
//! assistant turn.

const SENTINEL_STATUSES: &[&str] = &["more-files-needed", "test-sample-needed"];

/// If `content` starts (after leading whitespace) with a JSON object whose
/// `status` field names one of the recognized sentinels, return that status.
pub fn detect(content: &str) -> Option<&'static str> {
    let trimmed = content.trim_start();

    if !trimmed.starts_with('{') {
        return None;
    }

    let end = matching_brace(trimmed)?;
    let value: serde_json::Value = serde_json::from_str(&trimmed[..=end]).ok()?;
    let status = value.get("status")?.as_str()?;

    SENTINEL_STATUSES.iter().copied().find(|candidate| *candidate == status)
}

/// Index of the `}` that closes the `{` at position 0, honoring string
/// literals (so a `}` inside a quoted value doesn't end the match early).
fn matching_brace(s: &str) -> Option<usize> {
    let mut depth = 0i32;
    let mut in_string = false;
    let mut escaped = false;

    for (idx, ch) in s.char_indices() {
        if in_string {
            if escaped {
                escaped = false;
            } else if ch == '\\' {
                escaped = true;
            } else if ch == '"' {
                in_string = false;
            }
            continue;
        }

        match ch {
            '"' => in_string = true,
            '{' => depth += 1,
            '}' => {
                depth -= 1;
                if depth == 0 {
                    return Some(idx);
                }
            }
            _ => {}
        }
    }

    None
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn recognizes_a_leading_sentinel_object() {
        let content = r#"{"status": "more-files-needed", "files_needed": ["a.rs"]}

some trailing prose"#;
        assert_eq!(detect(content), Some("more-files-needed"));
    }

    #[test]
    fn ordinary_prose_is_not_a_sentinel() {
        assert_eq!(detect("Here is my analysis: {not json}"), None);
    }

    #[test]
    fn unrecognized_status_value_is_not_a_sentinel() {
        assert_eq!(detect(r#"{"status": "something-else"}"#), None);
    }

    #[test]
    fn braces_inside_string_values_do_not_confuse_matching() {
        let content = r#"{"status": "test-sample-needed", "note": "looks like {this}"}"#;
        assert_eq!(detect(content), Some("test-sample-needed"));
    }
}
