use crate::StatementState;
use thiserror::Error;

pub type Result<T> = std::result::Result<T, Error>;

/// Every failure the engine and its drivers report.
///
/// Schema construction fails with [`Error::UnsupportedType`],
/// [`Error::InvalidIdentifier`] or [`Error::DuplicateColumn`]. Binding fails
/// with [`Error::ConstraintViolation`], hydration with
/// [`Error::MissingColumn`] (strict mode only). [`Error::Coercion`] is raised
/// in both directions, regardless of strictness.
#[derive(Error, Debug, Clone, PartialEq)]
#[non_exhaustive]
pub enum Error {
    #[error("Field `{field}` of type `{type_name}` has no column mapping")]
    UnsupportedType { field: String, type_name: String },

    #[error("Invalid identifier `{0}`")]
    InvalidIdentifier(String),

    #[error("Column `{0}` appears more than once")]
    DuplicateColumn(String),

    #[error("Field `{field}` is not nullable but its value is absent")]
    ConstraintViolation { field: String },

    #[error("Column `{field}` does not exist in the row provided")]
    MissingColumn { field: String },

    #[error("Field `{field}`: cannot convert {from} to {to}")]
    Coercion {
        field: String,
        from: &'static str,
        to: &'static str,
    },

    #[error("Entity `{entity}` has no field at index {index}")]
    FieldIndex { entity: &'static str, index: usize },

    #[error("Cannot {operation} a statement in state {state:?}")]
    StatementState {
        operation: &'static str,
        state: StatementState,
    },

    #[error("{message}\nQuery: {query}")]
    Sql { message: String, query: String },

    #[error("Connection error: {0}")]
    Connection(String),
}

/// Conversion failure between a native type and a [`crate::Value`], not yet
/// attributed to a field.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
#[error("Cannot convert {from} to {to}")]
pub struct CoercionError {
    pub from: &'static str,
    pub to: &'static str,
}

impl CoercionError {
    pub fn new(from: &'static str, to: &'static str) -> Self {
        Self { from, to }
    }

    pub fn for_field(self, field: impl Into<String>) -> Error {
        Error::Coercion {
            field: field.into(),
            from: self.from,
            to: self.to,
        }
    }
}
