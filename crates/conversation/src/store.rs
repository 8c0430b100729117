//! KV-backed conversation threads: create, append-with-cap, load.

use std::{sync::Arc, time::Duration};

use jiff::Timestamp;

use crate::{
    kv::{Kv, StoreError},
    turn::{ConversationThread, ConversationTurn},
};

pub struct ConversationStore {
    kv: Arc<dyn Kv>,
    ttl: Duration,
    max_turns: usize,
}

impl ConversationStore {
    pub fn new(kv: Arc<dyn Kv>, ttl: Duration, max_turns: usize) -> Self {
        Self { kv, ttl, max_turns: max_turns.max(1) }
    }

    fn key(id: &str) -> String {
        format!("thread:{id}")
    }

    /// Create a new thread seeded with `seed_turn`, returning its opaque id.
    pub async fn create(&self, initial_tool: &str, seed_turn: ConversationTurn) -> Result<String, StoreError> {
        let id = uuid::Uuid::new_v4().to_string();
        let now = Timestamp::now();

        let thread = ConversationThread {
            id: id.clone(),
            created_at: now,
            last_updated_at: now,
            initial_tool: initial_tool.to_string(),
            turns: vec![seed_turn],
        };

        self.write(&thread).await?;
        Ok(id)
    }

    pub async fn load(&self, id: &str) -> Result<ConversationThread, StoreError> {
        let raw = self.kv.get(&Self::key(id)).await?.ok_or(StoreError::NotFound)?;
        serde_json::from_str(&raw).map_err(|err| StoreError::Backend(err.to_string()))
    }

    /// Append `turn`, trimming to `max_turns` by keeping turn 0 (the seed)
    /// and the most recent `max_turns - 1` turns otherwise. Tested property:
    /// `len(turns) <= max_turns` and the seed survives while any turns remain.
    pub async fn append(&self, id: &str, turn: ConversationTurn) -> Result<ConversationThread, StoreError> {
        let mut thread = self.load(id).await?;
        thread.turns.push(turn);

        if thread.turns.len() > self.max_turns {
            let seed = thread.turns.remove(0);
            let keep_from = thread.turns.len().saturating_sub(self.max_turns - 1);
            thread.turns.drain(0..keep_from);
            thread.turns.insert(0, seed);
        }

        thread.last_updated_at = Timestamp::now();
        self.write(&thread).await?;
        Ok(thread)
    }

    /// Turns still available before `max_turns` is hit, for
    /// `continuationOffer.remainingTurns`.
    pub fn remaining_turns(&self, thread: &ConversationThread) -> usize {
        self.max_turns.saturating_sub(thread.total_turns())
    }

    pub fn max_turns(&self) -> usize {
        self.max_turns
    }

    async fn write(&self, thread: &ConversationThread) -> Result<(), StoreError> {
        let raw = serde_json::to_string(thread).map_err(|err| StoreError::Backend(err.to_string()))?;
        self.kv.set(&Self::key(&thread.id), raw, self.ttl).await
    }
}

#[cfg(test)]
mod tests {
    use crate::{kv::MemoryStore, turn::Role};

    use super::*;

    fn turn(content: &str) -> ConversationTurn {
        ConversationTurn {
            role: Role::User,
            content: content.to_string(),
            timestamp: Timestamp::now(),
            model_name: None,
            tool_name: None,
            files: Vec::new(),
            images: Vec::new(),
            input_tokens: None,
            output_tokens: None,
        }
    }

    fn store(max_turns: usize) -> ConversationStore {
        ConversationStore::new(Arc::new(MemoryStore::new(Duration::from_secs(3600))), Duration::from_secs(3600), max_turns)
    }

    #[tokio::test]
    async fn create_then_load_returns_the_seed_turn_with_the_same_id() {
        let store = store(20);
        let id = store.create("chat", turn("seed")).await.unwrap();
        let thread = store.load(&id).await.unwrap();

        assert_eq!(thread.id, id);
        assert_eq!(thread.total_turns(), 1);
        assert_eq!(thread.turns[0].content, "seed");
        assert_eq!(thread.created_at, thread.last_updated_at);
    }

    #[tokio::test]
    async fn append_then_load_returns_a_thread_whose_last_turn_is_the_appended_one() {
        let store = store(20);
        let id = store.create("chat", turn("seed")).await.unwrap();
        store.append(&id, turn("reply")).await.unwrap();

        let thread = store.load(&id).await.unwrap();
        assert_eq!(thread.turns.last().unwrap().content, "reply");
    }

    #[tokio::test]
    async fn append_never_exceeds_the_cap_and_keeps_the_seed() {
        let store = store(3);
        let id = store.create("chat", turn("seed")).await.unwrap();

        for i in 0..10 {
            store.append(&id, turn(&format!("turn-{i}"))).await.unwrap();
        }

        let thread = store.load(&id).await.unwrap();
        assert_eq!(thread.total_turns(), 3);
        assert_eq!(thread.turns[0].content, "seed", "seed turn must survive the cap");
        assert_eq!(thread.turns.last().unwrap().content, "turn-9", "most recent turn must survive the cap");
    }

    #[tokio::test]
    async fn loading_an_expired_or_unknown_thread_is_not_found() {
        let store = store(20);
        assert!(matches!(store.load("does-not-exist").await, Err(StoreError::NotFound)));
    }

    #[tokio::test]
    async fn remaining_turns_counts_down_toward_the_cap() {
        let store = store(5);
        let id = store.create("chat", turn("seed")).await.unwrap();
        let thread = store.load(&id).await.unwrap();
        assert_eq!(store.remaining_turns(&thread), 4);
    }
}
