use thiserror::Error;

/// Rejected table queries. These are caller bugs, never transient conditions.
#[derive(Error, Debug, Clone, Copy, PartialEq)]
pub enum PowTableError {
    #[error("index {index} is out of range for the {table} table (bound {bound})")]
    OutOfRange {
        table: &'static str,
        index: usize,
        bound: usize,
    },

    #[error("index {index} is reserved in the {table} table")]
    ReservedIndex { table: &'static str, index: usize },

    #[error("argument {0} must be strictly positive")]
    NonPositiveArgument(f64),
}

pub type PowTableResult<T> = Result<T, PowTableError>;
