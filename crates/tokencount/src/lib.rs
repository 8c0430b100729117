//! Deterministic token-count estimation.
//!
//! Every budget decision upstream (history truncation, file inclusion, the
//! response reserve) is built on top of this single heuristic. It never calls
//! out to a real tokenizer: exactness is explicitly not a goal, stability
//! across runs is.

/// Average number of characters a single token occupies, for estimation
/// purposes only. Matches the rough ratio most BPE tokenizers land on for
/// English prose; it is not a per-model exact figure.
const CHARS_PER_TOKEN: usize = 4;

/// Estimate the number of tokens in `text`.
///
/// Non-empty input always yields at least 1. Empty input yields 0. The
/// estimate rounds up, since under-counting risks silently exceeding a
/// model's context window while over-counting only wastes a little budget.
///
/// ```
/// assert_eq!(tokencount::estimate(""), 0);
/// assert_eq!(tokencount::estimate("hi"), 1);
/// assert_eq!(tokencount::estimate(&"a".repeat(9)), 3);
/// ```
pub fn estimate(text: &str) -> u32 {
    let chars = text.chars().count();

    if chars == 0 {
        return 0;
    }

    let tokens = chars.div_ceil(CHARS_PER_TOKEN);

    tokens.max(1) as u32
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_string_is_zero() {
        assert_eq!(estimate(""), 0);
    }

    #[test]
    fn short_non_empty_string_is_at_least_one() {
        assert_eq!(estimate("a"), 1);
        assert_eq!(estimate("ab"), 1);
    }

    #[test]
    fn rounds_up() {
        // 9 chars / 4 = 2.25 -> rounds up to 3
        assert_eq!(estimate(&"x".repeat(9)), 3);
        // 8 chars / 4 = 2 exactly
        assert_eq!(estimate(&"x".repeat(8)), 2);
    }

    #[test]
    fn stable_across_calls() {
        let text = "The quick brown fox jumps over the lazy dog.";
        let first = estimate(text);
        let second = estimate(text);
        assert_eq!(first, second);
    }

    #[test]
    fn counts_unicode_scalars_not_bytes() {
        // "café" is 4 chars but 5 bytes in UTF-8.
        assert_eq!(estimate("café"), 1);
    }
}
