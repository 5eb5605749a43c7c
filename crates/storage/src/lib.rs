//! Storage layer for Warehaus
//!
//! This crate implements the in-process document backend:
//! - MemoryStore: DashMap of RwLock-guarded tables, generated identifiers
//! - FieldIndex: secondary indexes over one top-level field
//! - Pattern matching: sub-document equality used by `filter`

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod index;
pub mod memory;
pub mod pattern;

pub use index::FieldIndex;
pub use memory::MemoryStore;
