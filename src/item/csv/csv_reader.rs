use std::{
    cell::RefCell,
    fmt,
    io::BufRead,
    iter::FusedIterator,
    marker::PhantomData,
    ptr,
};

use log::{debug, trace, warn};

use crate::{
    core::{
        item::{ItemReader, ItemReaderResult},
        row::{Columns, Row, RowDeserializer, RowResult},
    },
    error::CsvError,
};

use super::options::ReaderOptions;

/// A typed CSV reader over a caller-owned line stream.
///
/// The reader only holds configuration: a shared reference to the stream and
/// the number of lines to skip. Read positions live in the [`RowCursor`]s it
/// hands out with [`begin`](Self::begin); [`end`](Self::end) hands out the
/// terminal cursor used to detect the end of a traversal.
///
/// # Type Parameters
///
/// - `S`: the line source, any `BufRead`, kept in a `RefCell` owned by the caller
/// - `P`: the field parser registry (see [`FieldParser`](crate::core::parser::FieldParser))
/// - `T`: the column types, as a tuple
///
/// # Shared streams
///
/// Every cursor reads from the same stream. Two cursors advanced alternately
/// interleave their reads; traverse with one cursor at a time.
///
/// # Examples
///
/// ```
/// use std::cell::RefCell;
/// use tuple_csv::core::parser::DefaultParser;
/// use tuple_csv::item::csv::csv_reader::CsvTupleReaderBuilder;
///
/// let stream = RefCell::new("id,name\n1,Alice\n2,Bob,admin\n".as_bytes());
///
/// let reader = CsvTupleReaderBuilder::<DefaultParser, (u32, String)>::new()
///     .skip_lines(1)
///     .from_stream(&stream);
///
/// let mut cursor = reader.begin();
/// let mut names = Vec::new();
/// while cursor != reader.end() {
///     let row = cursor.current().unwrap();
///     names.push(row.columns.1);
///     cursor.advance();
/// }
///
/// assert_eq!(names, vec!["Alice", "Bob"]);
/// ```
pub struct CsvTupleReader<'s, S, P, T> {
    stream: &'s RefCell<S>,
    skip_lines: usize,
    pd: PhantomData<fn() -> (P, T)>,
}

impl<'s, S, P, T> CsvTupleReader<'s, S, P, T>
where
    S: BufRead,
    T: Columns<P>,
{
    pub fn new(stream: &'s RefCell<S>, skip_lines: usize) -> Self {
        Self {
            stream,
            skip_lines,
            pd: PhantomData,
        }
    }

    /// Returns a cursor on the first row, after the configured lines were skipped.
    ///
    /// The first line is always read; `skip_lines` further lines are then
    /// discarded. With `skip_lines = 1` the second line of a fresh stream is the
    /// first row. If the stream runs out on the way, the cursor equals [`end`](Self::end).
    pub fn begin(&self) -> RowCursor<'s, S, P, T> {
        RowCursor::new(self.stream, self.skip_lines)
    }

    /// Returns the terminal cursor.
    pub fn end(&self) -> RowCursor<'s, S, P, T> {
        RowCursor::default()
    }

    pub fn skip_lines(&self) -> usize {
        self.skip_lines
    }

    /// Number of typed columns every row must provide.
    pub fn arity(&self) -> usize {
        T::ARITY
    }

    /// Wraps a fresh cursor into an [`ItemReader`].
    pub fn item_reader(&self) -> CsvTupleItemReader<'s, S, P, T> {
        CsvTupleItemReader::from(self.begin())
    }
}

impl<'s, S, P, T> IntoIterator for &CsvTupleReader<'s, S, P, T>
where
    S: BufRead,
    T: Columns<P>,
{
    type Item = RowResult<T>;
    type IntoIter = RowCursor<'s, S, P, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.begin()
    }
}

/// Forward-only position over the lines of a stream.
///
/// A cursor is either active, holding the current line and a reference to the
/// stream, or terminal. Once terminal it stays terminal.
///
/// # Equality
///
/// Two cursors are equal when both are terminal, or when both are active on the
/// same stream object. The buffered line is not compared: equality tells whether
/// a traversal is over, not whether two cursors sit on the same line.
///
/// # Iteration
///
/// Besides the explicit `current`/`advance` protocol, a cursor is an
/// [`Iterator`] of `RowResult<T>`. A row that fails to parse is yielded as an
/// error and the iteration continues with the next line.
pub struct RowCursor<'s, S, P, T> {
    stream: Option<&'s RefCell<S>>,
    line: String,
    deserializer: RowDeserializer<P, T>,
}

impl<'s, S, P, T> RowCursor<'s, S, P, T>
where
    S: BufRead,
{
    fn new(stream: &'s RefCell<S>, skip_lines: usize) -> Self {
        let mut cursor = Self {
            stream: Some(stream),
            line: String::new(),
            deserializer: RowDeserializer::new(),
        };

        cursor.advance();
        for _ in 0..skip_lines {
            if !cursor.is_active() {
                break;
            }
            cursor.advance();
        }

        debug!(
            "Cursor positioned after skipping {} lines, active: {}",
            skip_lines,
            cursor.is_active()
        );

        cursor
    }

    /// Moves to the next line. No-op on a terminal cursor.
    ///
    /// End of stream makes the cursor terminal. So does an I/O error, including a
    /// line that is not valid UTF-8: the error is logged and the traversal ends.
    pub fn advance(&mut self) {
        let Some(stream) = self.stream else {
            return;
        };

        self.line.clear();

        match stream.borrow_mut().read_line(&mut self.line) {
            Ok(0) => {
                debug!("End of stream reached");
                self.stream = None;
            }
            Ok(_) => {
                trim_line_ending(&mut self.line);
                trace!("Line read: {}", self.line);
            }
            Err(error) => {
                warn!("Unable to read line, ending traversal: {}", error);
                self.stream = None;
            }
        }
    }
}

impl<S, P, T> RowCursor<'_, S, P, T> {
    pub fn is_active(&self) -> bool {
        self.stream.is_some()
    }

    /// Raw text of the current line, if any.
    pub fn line(&self) -> Option<&str> {
        self.stream.map(|_| self.line.as_str())
    }
}

impl<S, P, T> RowCursor<'_, S, P, T>
where
    T: Columns<P>,
{
    /// Parses the current line into a fresh [`Row`].
    ///
    /// Calling it again without advancing parses the same line again.
    ///
    /// # Errors
    /// - `CsvError::Exhausted` on a terminal cursor
    /// - `CsvError::MissingColumn` when the line has too few tokens
    /// - `CsvError::Conversion` when a field parser rejects its token
    pub fn current(&self) -> RowResult<T> {
        if !self.is_active() {
            return Err(CsvError::Exhausted);
        }
        self.deserializer.deserialize(&self.line)
    }
}

fn trim_line_ending(line: &mut String) {
    if line.ends_with('\n') {
        line.pop();
        if line.ends_with('\r') {
            line.pop();
        }
    }
}

impl<S, P, T> Default for RowCursor<'_, S, P, T> {
    fn default() -> Self {
        Self {
            stream: None,
            line: String::new(),
            deserializer: RowDeserializer::new(),
        }
    }
}

impl<S, P, T> Clone for RowCursor<'_, S, P, T> {
    fn clone(&self) -> Self {
        Self {
            stream: self.stream,
            line: self.line.clone(),
            deserializer: self.deserializer.clone(),
        }
    }
}

impl<S, P, T> PartialEq for RowCursor<'_, S, P, T> {
    fn eq(&self, other: &Self) -> bool {
        match (self.stream, other.stream) {
            (None, None) => true,
            (Some(left), Some(right)) => ptr::eq(left, right),
            _ => false,
        }
    }
}

impl<S, P, T> Eq for RowCursor<'_, S, P, T> {}

impl<S, P, T> fmt::Debug for RowCursor<'_, S, P, T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RowCursor")
            .field("active", &self.is_active())
            .field("line", &self.line)
            .finish()
    }
}

impl<S, P, T> Iterator for RowCursor<'_, S, P, T>
where
    S: BufRead,
    T: Columns<P>,
{
    type Item = RowResult<T>;

    fn next(&mut self) -> Option<Self::Item> {
        if !self.is_active() {
            return None;
        }

        let row = self.current();
        self.advance();
        Some(row)
    }
}

impl<S, P, T> FusedIterator for RowCursor<'_, S, P, T>
where
    S: BufRead,
    T: Columns<P>,
{
}

/// [`ItemReader`] over the rows of a [`RowCursor`].
///
/// Uses a `RefCell` so the cursor can move forward while `read` keeps the
/// `&self` signature of the trait.
///
/// # Examples
///
/// ```
/// use std::cell::RefCell;
/// use tuple_csv::core::item::ItemReader;
/// use tuple_csv::core::parser::DefaultParser;
/// use tuple_csv::item::csv::csv_reader::CsvTupleReaderBuilder;
///
/// let stream = RefCell::new("a,1\nb,x\n".as_bytes());
/// let reader = CsvTupleReaderBuilder::<DefaultParser, (String, i64)>::new()
///     .from_stream(&stream)
///     .item_reader();
///
/// let row = reader.read().unwrap().unwrap();
/// assert_eq!(row.columns, ("a".to_string(), 1));
/// assert!(reader.read().is_err());
/// assert!(reader.read().unwrap().is_none());
/// ```
pub struct CsvTupleItemReader<'s, S, P, T> {
    cursor: RefCell<RowCursor<'s, S, P, T>>,
}

impl<'s, S, P, T> From<RowCursor<'s, S, P, T>> for CsvTupleItemReader<'s, S, P, T> {
    fn from(cursor: RowCursor<'s, S, P, T>) -> Self {
        Self {
            cursor: RefCell::new(cursor),
        }
    }
}

impl<S, P, T> ItemReader<Row<T>> for CsvTupleItemReader<'_, S, P, T>
where
    S: BufRead,
    T: Columns<P>,
{
    /// Reads the row under the cursor and moves past it.
    ///
    /// # Returns
    /// - `Ok(Some(row))` if the line was parsed
    /// - `Ok(None)` once the stream is exhausted
    /// - `Err(error)` if the line was malformed; the next call reads the following line
    fn read(&self) -> ItemReaderResult<Row<T>> {
        self.cursor.borrow_mut().next().transpose()
    }
}

/// A builder for configuring typed CSV reading.
///
/// # Default Configuration
///
/// - Skipped lines: none, the first line is the first row
///
/// The delimiter is always `,` and cannot be changed.
///
/// # Examples
///
/// ```
/// use std::cell::RefCell;
/// use tuple_csv::core::parser::DefaultParser;
/// use tuple_csv::item::csv::csv_reader::CsvTupleReaderBuilder;
/// use tuple_csv::item::csv::options::ReaderOptions;
///
/// let options = ReaderOptions::from_json(r#"{ "skip_lines": 2 }"#).unwrap();
/// let stream = RefCell::new("title\ncolumns\n1.5\n".as_bytes());
///
/// let reader = CsvTupleReaderBuilder::<DefaultParser, (f32,)>::new()
///     .options(&options)
///     .from_stream(&stream);
///
/// assert_eq!(reader.skip_lines(), 2);
/// ```
pub struct CsvTupleReaderBuilder<P, T> {
    skip_lines: usize,
    pd: PhantomData<fn() -> (P, T)>,
}

impl<P, T> CsvTupleReaderBuilder<P, T>
where
    T: Columns<P>,
{
    pub fn new() -> Self {
        Self {
            skip_lines: 0,
            pd: PhantomData,
        }
    }

    /// Sets how many lines are discarded after the first line has been read.
    pub fn skip_lines(mut self, skip_lines: usize) -> Self {
        self.skip_lines = skip_lines;
        self
    }

    pub fn options(mut self, options: &ReaderOptions) -> Self {
        self.skip_lines = options.skip_lines;
        self
    }

    /// Creates a `CsvTupleReader` borrowing `stream`.
    ///
    /// The stream must outlive the reader and every cursor taken from it.
    pub fn from_stream<S: BufRead>(self, stream: &RefCell<S>) -> CsvTupleReader<'_, S, P, T> {
        CsvTupleReader::new(stream, self.skip_lines)
    }
}

impl<P, T> Default for CsvTupleReaderBuilder<P, T>
where
    T: Columns<P>,
{
    fn default() -> Self {
        Self::new()
    }
}
