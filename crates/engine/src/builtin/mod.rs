//! Built-in type classes
//!
//! - `builtin-lab`: labs and their private type-objects
//! - `builtin-generic-object`: attribute-only equipment
//! - `builtin-server`: machines reporting through heartbeats

pub mod generic_object;
pub mod lab;
pub mod server;

use warehaus_core::Result;

use crate::actions::TypeRegistry;

pub use generic_object::GenericObject;
pub use lab::{create_lab, lab_of_type_object, list_labs, Lab, LAB_TYPE_KEY};
pub use server::Server;

/// The registry of every built-in type class.
pub fn registry() -> Result<TypeRegistry> {
    TypeRegistry::builder()
        .register(Lab)
        .register(GenericObject)
        .register(Server)
        .build()
}
