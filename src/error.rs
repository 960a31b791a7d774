use std::error::Error;

use thiserror::Error;

#[derive(Error, Debug)]
/// Row reader error
pub enum CsvError {
    /// The line ran out of tokens before the column at this index.
    #[error("There is no {0} token.")]
    MissingColumn(usize),

    /// Failure reported by a field parser, kept as-is so callers can downcast it.
    #[error(transparent)]
    Conversion(Box<dyn Error + Send + Sync + 'static>),

    /// A row was requested from a terminal cursor.
    #[error("Cursor is exhausted: no current row")]
    Exhausted,

    /// Reader options could not be loaded from JSON.
    #[error("Invalid reader options: {0}")]
    Options(#[from] serde_json::Error),
}
