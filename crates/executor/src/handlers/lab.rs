//! Lab and type-class command handlers.

use serde_json::{json, Value};
use warehaus_core::Result;
use warehaus_engine::{create_lab, list_labs, AuthContext, Database};

use crate::Output;

/// Handle ListLabs command.
pub fn labs(db: &Database, auth: &dyn AuthContext) -> Result<Output> {
    let labs: Vec<Value> = list_labs(db, auth)?
        .iter()
        .map(|lab| lab.as_value())
        .collect();
    Ok(Output::ok(json!({ "labs": labs })))
}

/// Handle CreateLab command.
pub fn new_lab(
    db: &Database,
    auth: &dyn AuthContext,
    slug: &str,
    display_name: &str,
) -> Result<Output> {
    let lab = create_lab(db, auth, slug, display_name)?;
    Ok(Output::created(lab.as_value()))
}

/// Handle ListTypeClasses command.
pub fn type_classes(db: &Database, auth: &dyn AuthContext) -> Result<Output> {
    auth.require_user()?;
    let types = db
        .registry()
        .iter()
        .map(|class| serde_json::to_value(class.info()))
        .collect::<std::result::Result<Vec<_>, _>>()?;
    Ok(Output::ok(json!({ "types": types })))
}
