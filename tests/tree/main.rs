//! Object Tree Tests
//!
//! End-to-end tests through the command boundary against `MemoryStore`:
//! - Labs and their private type-objects
//! - Path resolution with `~` indirection
//! - Dispatch status codes (404 vs 405)
//! - Attribute definitions and values
//! - Server heartbeats
//! - Non-cascading deletion

mod common;

mod attributes;
mod deletion;
mod labs;
mod paths;
mod servers;
