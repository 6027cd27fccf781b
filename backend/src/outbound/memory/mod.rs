//! In-process store adapters.

mod in_memory_store;

pub use in_memory_store::InMemoryBoardStore;
