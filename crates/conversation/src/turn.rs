//! A single conversation turn and the thread that owns a sequence of them.

use jiff::Timestamp;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Role {
    User,
    Assistant,
}

/// One exchange within a thread. Content is required to be non-empty; file
/// and image paths are absolute when present — enforced by callers before
/// construction, since this type has no I/O of its own.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ConversationTurn {
    pub role: Role,
    pub content: String,
    pub timestamp: Timestamp,
    pub model_name: Option<String>,
    pub tool_name: Option<String>,
    pub files: Vec<String>,
    pub images: Vec<String>,
    pub input_tokens: Option<u32>,
    pub output_tokens: Option<u32>,
}

impl ConversationTurn {
    /// Estimated token cost of this turn: content plus whatever the provider
    /// reported for input/output, whichever is known. Used by the history
    /// builder's budget walk.
    pub fn estimated_tokens(&self) -> u32 {
        let content_tokens = tokencount::estimate(&self.content);
        let accounted = self.input_tokens.unwrap_or(0) + self.output_tokens.unwrap_or(0);
        content_tokens.max(accounted)
    }
}

/// An ordered, oldest-first sequence of turns identified by an opaque id.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ConversationThread {
    pub id: String,
    pub created_at: Timestamp,
    pub last_updated_at: Timestamp,
    pub initial_tool: String,
    pub turns: Vec<ConversationTurn>,
}

impl ConversationThread {
    pub fn total_turns(&self) -> usize {
        self.turns.len()
    }

    pub fn total_tokens(&self) -> u64 {
        self.turns.iter().map(|t| u64::from(t.estimated_tokens())).sum()
    }

    /// Every file referenced across all turns, deduplicated by absolute
    /// path with the newest reference winning. Returned newest-first.
    pub fn referenced_files_newest_first(&self) -> Vec<String> {
        dedup_newest_first(self.turns.iter().rev().flat_map(|t| t.files.iter().cloned()))
    }

    /// Same rule as [`Self::referenced_files_newest_first`], for images.
    pub fn referenced_images_newest_first(&self) -> Vec<String> {
        dedup_newest_first(self.turns.iter().rev().flat_map(|t| t.images.iter().cloned()))
    }
}

fn dedup_newest_first(items: impl Iterator<Item = String>) -> Vec<String> {
    let mut seen = std::collections::HashSet::new();
    let mut out = Vec::new();

    for item in items {
        if seen.insert(item.clone()) {
            out.push(item);
        }
    }

    out
}

#[cfg(test)]
mod tests {
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

    #[test]
    fn referenced_files_dedup_keeps_newest_occurrence_order() {
        let thread = ConversationThread {
            id: "t1".to_string(),
            created_at: Timestamp::UNIX_EPOCH,
            last_updated_at: Timestamp::UNIX_EPOCH,
            initial_tool: "chat".to_string(),
            turns: vec![turn("first", &["/a.rs", "/b.rs"]), turn("second", &["/b.rs", "/c.rs"])],
        };

        // "/b.rs" was referenced in both turns; its newest (second-turn)
        // position wins, so it surfaces before "/a.rs".
        assert_eq!(thread.referenced_files_newest_first(), vec!["/b.rs", "/c.rs", "/a.rs"]);
    }

    #[test]
    fn estimated_tokens_prefers_accounted_usage_when_larger() {
        let mut t = turn("short", &[]);
        t.input_tokens = Some(500);
        t.output_tokens = Some(200);
        assert_eq!(t.estimated_tokens(), 700);
    }
}
