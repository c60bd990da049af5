use thiserror::Error;

/// Failures of typed field access through a [`FieldSet`](crate::FieldSet).
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum AccessError {
    /// No field of the schema answers to the name.
    #[error("no field named `{name}`")]
    NotFound { name: String },
    /// The field exists in the schema but has no value in this instance,
    /// because an optional embedded record is absent.
    #[error("field `{name}` has no value in this instance")]
    Absent { name: String },
    /// The value is not of the requested type.
    #[error("field `{name}` holds `{found}`, not `{expected}`")]
    TypeMismatch {
        name: String,
        expected: &'static str,
        found: &'static str,
    },
}
