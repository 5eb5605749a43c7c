//! Output and status types returned by command execution.
//!
//! Every command yields an [`Output`]: a transport-neutral status plus an
//! optional JSON body. The status codes follow HTTP so a front end can
//! pass them straight through.

use serde::{Deserialize, Serialize};
use warehaus_core::{Error, Value};
use warehaus_engine::{ActionOutput, Outcome};

/// Status of a completed command.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Status {
    /// 200
    Ok,
    /// 201
    Created,
    /// 204
    NoContent,
    /// 400
    BadRequest,
    /// 401
    Unauthorized,
    /// 403
    Forbidden,
    /// 404
    NotFound,
    /// 405
    MethodNotAllowed,
    /// 409
    Conflict,
    /// 500
    InternalError,
}

impl Status {
    /// The HTTP status code
    pub fn code(&self) -> u16 {
        match self {
            Status::Ok => 200,
            Status::Created => 201,
            Status::NoContent => 204,
            Status::BadRequest => 400,
            Status::Unauthorized => 401,
            Status::Forbidden => 403,
            Status::NotFound => 404,
            Status::MethodNotAllowed => 405,
            Status::Conflict => 409,
            Status::InternalError => 500,
        }
    }

    /// Whether this is a 2xx status
    pub fn is_success(&self) -> bool {
        matches!(self, Status::Ok | Status::Created | Status::NoContent)
    }

    /// Map an error onto the status a client sees.
    ///
    /// Schema, invariant and backend failures are all 500: they indicate a
    /// bug or corrupted data, never a bad request.
    pub fn from_error(err: &Error) -> Self {
        match err {
            Error::NotFound { .. } => Status::NotFound,
            Error::MethodNotAllowed { .. } => Status::MethodNotAllowed,
            Error::Conflict { .. } => Status::Conflict,
            Error::BadRequest { .. } => Status::BadRequest,
            Error::Unauthorized { .. } => Status::Unauthorized,
            Error::Forbidden { .. } => Status::Forbidden,
            Error::SchemaViolation { .. }
            | Error::UnknownField { .. }
            | Error::StoreConsistency { .. }
            | Error::Cardinality { .. }
            | Error::UnknownTypeKey { .. }
            | Error::Store { .. }
            | Error::Serialization { .. }
            | Error::Config { .. }
            | Error::Internal { .. } => Status::InternalError,
        }
    }
}

impl From<Outcome> for Status {
    fn from(outcome: Outcome) -> Self {
        match outcome {
            Outcome::Ok => Status::Ok,
            Outcome::Created => Status::Created,
            Outcome::NoContent => Status::NoContent,
        }
    }
}

/// Result of executing one [`Command`](crate::Command).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Output {
    /// Status of the command
    pub status: Status,
    /// Response payload, absent for `NoContent`
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub body: Option<Value>,
}

impl Output {
    /// 200 with a body
    pub fn ok(body: Value) -> Self {
        Output {
            status: Status::Ok,
            body: Some(body),
        }
    }

    /// 201 with a body
    pub fn created(body: Value) -> Self {
        Output {
            status: Status::Created,
            body: Some(body),
        }
    }

    /// Convert an action handler's result
    pub fn from_action(action: ActionOutput) -> Self {
        Output {
            status: action.outcome.into(),
            body: action.body,
        }
    }

    /// The response for a failed command: `{"message": ...}`
    pub fn from_error(err: &Error) -> Self {
        Output {
            status: Status::from_error(err),
            body: Some(serde_json::json!({ "message": err.to_string() })),
        }
    }
}
