//! # fathom-tokens
//!
//! Token counting via `tiktoken-rs` (`cl100k_base`), cached per blake3
//! content hash, and the budget ledger the context builder spends against.

pub mod budget;
pub mod counter;

pub use budget::TokenBudget;
pub use counter::TokenCounter;
