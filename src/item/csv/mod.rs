//! Typed CSV row reading.
//!
//! This module turns a line stream into a sequence of typed rows. Each row is a
//! tuple of fixed column types followed by the raw tokens left on the line.
//!
//! # Module Architecture
//!
//! 1. **CsvTupleReader**: configuration only, a borrowed stream and the number of
//!    leading lines to skip. It hands out cursors with `begin` and `end`.
//!
//! 2. **RowCursor**: a forward-only position on the stream. `current` parses the
//!    buffered line, `advance` reads the next one. It is also an `Iterator`.
//!
//! 3. **CsvTupleItemReader**: the `ItemReader` view of a cursor.
//!
//! # Format
//!
//! - Fields are separated by `,`, without quoting or escaping
//! - `\n` and `\r\n` line endings are accepted
//! - A line needs at least one token per column type; extra tokens go to the overflow
//!
//! # Examples
//!
//! ```
//! use std::cell::RefCell;
//! use tuple_csv::core::parser::DefaultParser;
//! use tuple_csv::item::csv::csv_reader::CsvTupleReaderBuilder;
//!
//! let csv_data = "\
//! city,country,pop
//! Boston,United States,4628910,capital:no
//! Concord,United States,42695
//! ";
//!
//! let stream = RefCell::new(csv_data.as_bytes());
//! let reader = CsvTupleReaderBuilder::<DefaultParser, (String, String, u32)>::new()
//!     .skip_lines(1)
//!     .from_stream(&stream);
//!
//! let rows = reader
//!     .into_iter()
//!     .collect::<Result<Vec<_>, _>>()
//!     .unwrap();
//!
//! assert_eq!(rows.len(), 2);
//! assert_eq!(rows[0].columns.0, "Boston");
//! assert_eq!(rows[0].overflow, vec!["capital:no"]);
//! assert_eq!(rows[1].columns.2, 42695);
//! assert!(rows[1].overflow.is_empty());
//! ```

/// A module providing the reader, its cursors and builder.
pub mod csv_reader;

/// A module providing serde-loadable reader options.
pub mod options;
