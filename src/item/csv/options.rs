use serde::Deserialize;

use crate::error::CsvError;

/// Runtime options of a [`CsvTupleReader`](super::csv_reader::CsvTupleReader).
///
/// Column types and the delimiter are fixed at compile time, so the only
/// runtime knob is how many lines to drop before the first row.
///
/// Missing fields take their default value and unknown fields are rejected.
///
/// # Examples
///
/// ```
/// use tuple_csv::item::csv::options::ReaderOptions;
///
/// let options = ReaderOptions::from_json(r#"{ "skip_lines": 2 }"#).unwrap();
/// assert_eq!(options.skip_lines, 2);
///
/// let options = ReaderOptions::from_json("{}").unwrap();
/// assert_eq!(options, ReaderOptions::default());
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ReaderOptions {
    /// Number of lines discarded after the first line has been read
    pub skip_lines: usize,
}

impl ReaderOptions {
    pub fn from_json(text: &str) -> Result<Self, CsvError> {
        let options = serde_json::from_str(text)?;
        Ok(options)
    }
}
