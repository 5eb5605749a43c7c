//! Command handlers organized by concern.
//!
//! | Module | Commands |
//! |--------|----------|
//! | `lab` | `ListLabs`, `CreateLab`, `ListTypeClasses` |
//! | `tree` | `Invoke` |

pub mod lab;
pub mod tree;
