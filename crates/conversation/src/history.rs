//! Reconstructs a bounded prior-turn transcript within a token budget,
//! consumed by tools before the provider call.

use std::collections::HashSet;

use crate::{
    model_context::TokenAllocation,
    turn::{ConversationThread, ConversationTurn, Role},
};

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct HistoryResult {
    pub history_text: String,
    pub history_tokens: u32,
}

/// Build a chronological transcript of `thread`, walking turns newest-first
/// and keeping whatever fits in `allocation.history_budget`. A turn that
/// would push the running total over budget is skipped; older turns past
/// it are still considered, so one oversized turn doesn't starve the rest
/// of the history.
pub fn build(thread: &ConversationThread, allocation: &TokenAllocation) -> HistoryResult {
    let budget = u64::from(allocation.history_budget);
    let mut included: Vec<(usize, String, u32)> = Vec::new();
    let mut used: u64 = 0;

    for (idx, turn) in thread.turns.iter().enumerate().rev() {
        let block = render_turn_block(idx, turn);
        let tokens = tokencount::estimate(&block);

        if used + u64::from(tokens) <= budget {
            used += u64::from(tokens);
            included.push((idx, block, tokens));
        }
    }

    if included.is_empty() {
        return HistoryResult::default();
    }

    included.sort_by_key(|(idx, ..)| *idx);

    let included_indices: HashSet<usize> = included.iter().map(|(idx, ..)| *idx).collect();

    let mut text = String::new();
    for (_, block, _) in &included {
        text.push_str(&block);
    }

    let files = referenced_newest_first(thread, &included_indices, false);
    let images = referenced_newest_first(thread, &included_indices, true);

    if !files.is_empty() || !images.is_empty() {
        text.push_str("--- REFERENCED FILES/IMAGES ---\n");

        for path in files.iter().chain(images.iter()) {
            text.push_str("- ");
            text.push_str(path);
            text.push('\n');
        }
    }

    HistoryResult { history_text: text, history_tokens: used as u32 }
}

fn render_turn_block(idx: usize, turn: &ConversationTurn) -> String {
    let mut block = String::new();

    block.push_str("---\n");

    let role = match turn.role {
        Role::User => "user",
        Role::Assistant => "assistant",
    };
    block.push_str(&format!("Turn {idx} ({role})"));

    let mut meta = Vec::new();
    if let Some(tool) = &turn.tool_name {
        meta.push(format!("tool={tool}"));
    }
    if let Some(model) = &turn.model_name {
        meta.push(format!("model={model}"));
    }
    if !meta.is_empty() {
        block.push_str(&format!(" [{}]", meta.join(", ")));
    }
    block.push('\n');

    if !turn.files.is_empty() || !turn.images.is_empty() {
        let mut refs = turn.files.clone();
        refs.extend(turn.images.iter().cloned());
        block.push_str("Files/Images: ");
        block.push_str(&refs.join(", "));
        block.push('\n');
    }

    block.push_str(&turn.content);
    block.push('\n');

    block
}

/// Files (or images) referenced by any of `included` turns, newest-first,
/// each path appearing once at its most recent occurrence.
fn referenced_newest_first(thread: &ConversationThread, included: &HashSet<usize>, images: bool) -> Vec<String> {
    let mut seen = HashSet::new();
    let mut out = Vec::new();

    for idx in (0..thread.turns.len()).rev() {
        if !included.contains(&idx) {
            continue;
        }

        let items = if images { &thread.turns[idx].images } else { &thread.turns[idx].files };

        for item in items {
            if seen.insert(item.clone()) {
                out.push(item.clone());
            }
        }
    }

    out
}

#[cfg(test)]
mod tests {
    use jiff::Timestamp;

    use super::*;

    fn turn(content: &str, files: &[&str]) -> ConversationTurn {
        ConversationTurn {
            role: Role::User,
            content: content.to_string(),
            timestamp: Timestamp::UNIX_EPOCH,
            model_name: None,
            tool_name: None,
            files: files.iter().map(|f| f.to_string()).collect(),
            images: Vec::new(),
            input_tokens: None,
            output_tokens: None,
        }
    }

    fn thread(turns: Vec<ConversationTurn>) -> ConversationThread {
        ConversationThread {
            id: "t1".to_string(),
            created_at: Timestamp::UNIX_EPOCH,
            last_updated_at: Timestamp::UNIX_EPOCH,
            initial_tool: "chat".to_string(),
            turns,
        }
    }

    fn generous_allocation() -> TokenAllocation {
        TokenAllocation { context_tokens: 200_000, content_budget: 120_000, response_reserve: 80_000, file_budget: 48_000, history_budget: 54_000 }
    }

    #[test]
    fn everything_fits_under_a_generous_budget() {
        let t = thread(vec![turn("first", &["/a.rs"]), turn("second", &["/b.rs"])]);
        let result = build(&t, &generous_allocation());

        assert!(result.history_text.contains("first"));
        assert!(result.history_text.contains("second"));
        assert!(result.history_tokens <= generous_allocation().history_budget);

        // Chronological presentation: "first" appears before "second".
        assert!(result.history_text.find("first").unwrap() < result.history_text.find("second").unwrap());
    }

    #[test]
    fn an_oversized_middle_turn_is_skipped_but_older_turns_still_included() {
        let huge = "x".repeat(10_000);
        let t = thread(vec![turn("small-1", &[]), turn("small-2", &[]), turn(&huge, &[]), turn("small-3", &[]), turn("small-4", &[])]);

        let tight = TokenAllocation { context_tokens: 10_000, content_budget: 6_000, response_reserve: 4_000, file_budget: 2_000, history_budget: 50 };
        let result = build(&t, &tight);

        assert!(result.history_text.contains("small-1"));
        assert!(result.history_text.contains("small-2"));
        assert!(result.history_text.contains("small-3"));
        assert!(result.history_text.contains("small-4"));
        assert!(!result.history_text.contains(&huge));
        assert!(result.history_tokens <= tight.history_budget);
    }

    #[test]
    fn no_turns_fit_yields_an_empty_result() {
        let t = thread(vec![turn(&"x".repeat(1_000), &[])]);
        let zero = TokenAllocation { context_tokens: 1_000, content_budget: 0, response_reserve: 1_000, file_budget: 0, history_budget: 0 };
        let result = build(&t, &zero);

        assert_eq!(result, HistoryResult::default());
    }

    #[test]
    fn referenced_files_index_lists_only_included_turns_newest_first() {
        let t = thread(vec![turn("first", &["/a.rs"]), turn("second", &["/b.rs"])]);
        let result = build(&t, &generous_allocation());

        let index_pos = result.history_text.find("REFERENCED FILES/IMAGES").unwrap();
        let tail = &result.history_text[index_pos..];
        assert!(tail.find("/b.rs").unwrap() < tail.find("/a.rs").unwrap());
    }
}
