//! Repository traits for the account data access layer
//!
//! The workflows only ever talk to storage through [`AccountRepository`],
//! so any backend with atomic single-record reads and writes can sit behind
//! them. [`MemoryAccountRepository`] is the bundled in-memory backend used
//! by tests and demos.

pub mod account;
pub mod memory;

pub use account::{AccountRepository, UpdateReport};
pub use memory::MemoryAccountRepository;
