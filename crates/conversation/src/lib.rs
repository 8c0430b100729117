//! Conversation-memory / threading layer: multi-turn, cross-tool
//! conversations persisted in a key-value store with per-turn token
//! accounting, newest-first file/image deduplication, and token-budget-aware
//! history reconstruction.

mod history;
mod kv;
mod model_context;
mod store;
mod turn;

pub use history::{HistoryResult, build as build_history};
pub use kv::{Kv, MemoryStore, RedisStore, StoreError};
pub use model_context::{ModelContext, TokenAllocation};
pub use store::ConversationStore;
pub use turn::{ConversationThread, ConversationTurn, Role};
