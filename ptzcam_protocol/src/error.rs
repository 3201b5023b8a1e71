use thiserror::Error;

/// Error types.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum Error {
    #[error("control {control} is missing field {field:?}")]
    MissingField {
        control: &'static str,
        field: &'static str,
    },

    #[error("control {control} has a non-numeric {field}: {value:?}")]
    InvalidNumber {
        control: &'static str,
        field: &'static str,
        value: String,
    },

    #[error("device does not report {0}")]
    MissingCapability(&'static str),
}
