//! DAO selection context.
//!
//! Holds the DAO the user is working in, persists it across restarts, and
//! builds the contract write requests that act on it.

pub mod calls;
pub mod context;
pub mod storage;

pub use calls::{CallError, ProposalType, TreasuryCall};
pub use context::{ContextError, DaoContext};
pub use storage::{FileStorage, MemoryStorage, SelectionStorage, StorageError, SELECTION_KEY};
