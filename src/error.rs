//! Error types shared by every fallible operation in the engine.

use thiserror::Error;

/// A convenience `Result` type used throughout the engine.
pub type DbResult<T> = std::result::Result<T, DbError>;

/// An error raised while interpreting or executing a statement.
///
/// Every error aborts the current statement only: no engine state is mutated
/// before the statement's validation completes, so a failed statement leaves
/// every table exactly as it was.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DbError {
    /// The statement text is malformed: a missing keyword or bracket, a
    /// clause with too few tokens, an unsupported operator, or an
    /// unrecognized leading keyword.
    #[error("syntax error: {0}")]
    Syntax(String),

    /// The statement conflicts with the catalog or a table's schema: a
    /// duplicate or unknown table, an unknown column, a type mismatch, or a
    /// column/value count mismatch.
    #[error("schema error: {0}")]
    Schema(String),

    /// A literal could not be converted to its target type.
    #[error("invalid value: {0}")]
    Value(String),
}
