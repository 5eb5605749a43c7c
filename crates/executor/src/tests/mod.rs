//! Test modules for the executor crate.

pub mod respond;

use crate::{Identity, Role, Warehaus};

pub(crate) fn admin() -> Identity {
    Identity::new("admin-1", Role::Admin)
}

pub(crate) fn user() -> Identity {
    Identity::new("user-1", Role::User)
}

/// Ephemeral instance with one lab, `lab1`.
pub(crate) fn with_lab() -> Warehaus {
    let wh = Warehaus::ephemeral().unwrap();
    wh.create_lab(&admin(), "lab1", "Lab One").unwrap();
    wh
}
