//! Object tree command handlers.

use tracing::debug;
use warehaus_core::{Result, Value};
use warehaus_engine::{invoke_path, AuthContext, Database, Verb};

use crate::Output;

/// Handle Invoke command.
///
/// One leading `/` is accepted, so `"/lab1/"` and `"lab1/"` address the
/// same object.
pub fn invoke(
    db: &Database,
    auth: &dyn AuthContext,
    verb: Verb,
    path: &str,
    body: &Value,
) -> Result<Output> {
    let path = path.strip_prefix('/').unwrap_or(path);
    debug!(target: "warehaus::executor", %verb, path, "Invoke");
    let output = invoke_path(&db.context(auth, body), verb, path)?;
    Ok(Output::from_action(output))
}
