//! Lab and type-class operations.

use serde_json::Value;
use warehaus_core::{Error, Result};
use warehaus_engine::{AuthContext, TypeClassInfo};

use super::{body_of, Warehaus};
use crate::Command;

impl Warehaus {
    /// Every lab, as stored documents.
    pub fn list_labs(&self, auth: &dyn AuthContext) -> Result<Vec<Value>> {
        let mut body = body_of(self.run(auth, Command::ListLabs)?, "ListLabs")?;
        match body.get_mut("labs").map(Value::take) {
            Some(Value::Array(labs)) => Ok(labs),
            _ => Err(Error::Internal {
                reason: "Unexpected output for ListLabs".into(),
            }),
        }
    }

    /// Create a lab (admin). Returns the stored lab.
    ///
    /// # Example
    ///
    /// ```ignore
    /// let lab = wh.create_lab(&admin, "lab1", "Lab One")?;
    /// assert_eq!(lab["slug"], "lab1");
    /// ```
    pub fn create_lab(&self, auth: &dyn AuthContext, slug: &str, display_name: &str) -> Result<Value> {
        let output = self.run(
            auth,
            Command::CreateLab {
                slug: slug.to_string(),
                display_name: display_name.to_string(),
            },
        )?;
        body_of(output, "CreateLab")
    }

    /// Every registered type class.
    pub fn list_type_classes(&self, auth: &dyn AuthContext) -> Result<Vec<TypeClassInfo>> {
        let mut body = body_of(self.run(auth, Command::ListTypeClasses)?, "ListTypeClasses")?;
        let types = body
            .get_mut("types")
            .map(Value::take)
            .ok_or_else(|| Error::Internal {
                reason: "Unexpected output for ListTypeClasses".into(),
            })?;
        Ok(serde_json::from_value(types)?)
    }
}
