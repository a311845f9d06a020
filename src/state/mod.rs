//! State management module
//!
//! This module handles dialogue state and the flow that advances it

pub mod engine;
pub mod event;
pub mod replies;
pub mod storage;
pub mod transition;

// Re-export commonly used state components
pub use engine::{DialogueEngine, SubmissionReport};
pub use event::InboundEvent;
pub use replies::{Keyboard, Reply};
pub use storage::{StateStorage, StateStorageManager, StorageStats, UserSlot};
pub use transition::{transition, Effect, StoreOp, TransitionResult};
