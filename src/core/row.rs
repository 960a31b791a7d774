use std::{fmt, marker::PhantomData};

use log::trace;

use crate::error::CsvError;

use super::parser::FieldParser;

/// Field delimiter shared by every reader.
pub const DELIMITER: char = ',';

/// Type alias for the outcome of deserializing one line.
pub type RowResult<T> = Result<Row<T>, CsvError>;

/// One deserialized line: the typed columns plus the raw tokens left over.
#[derive(Debug, Clone, PartialEq)]
pub struct Row<T> {
    /// Typed values, one per column type, in declaration order
    pub columns: T,
    /// Tokens found after the typed columns, in line order
    pub overflow: Vec<String>,
}

impl<T> Row<T> {
    pub fn new(columns: T, overflow: Vec<String>) -> Self {
        Self { columns, overflow }
    }

    pub fn columns(&self) -> &T {
        &self.columns
    }

    pub fn overflow(&self) -> &[String] {
        &self.overflow
    }

    pub fn into_parts(self) -> (T, Vec<String>) {
        (self.columns, self.overflow)
    }
}

/// Iterator over the delimited tokens of a line.
///
/// Tokens are cut the way a delimiter-driven line reader cuts them:
/// - an empty line has no token at all
/// - consecutive delimiters produce empty tokens
/// - a trailing delimiter closes the last token without opening a new one
///
/// ```
/// use tuple_csv::core::row::Tokens;
///
/// let tokens: Vec<&str> = Tokens::new(",a,,b,").collect();
/// assert_eq!(tokens, vec!["", "a", "", "b"]);
/// assert_eq!(Tokens::new("").count(), 0);
/// ```
#[derive(Debug, Clone)]
pub struct Tokens<'a> {
    rest: &'a str,
}

impl<'a> Tokens<'a> {
    pub fn new(line: &'a str) -> Self {
        Self { rest: line }
    }
}

impl<'a> Iterator for Tokens<'a> {
    type Item = &'a str;

    fn next(&mut self) -> Option<Self::Item> {
        if self.rest.is_empty() {
            return None;
        }

        match self.rest.split_once(DELIMITER) {
            Some((token, rest)) => {
                self.rest = rest;
                Some(token)
            }
            None => Some(std::mem::take(&mut self.rest)),
        }
    }
}

/// A fixed list of column types that can be read from a line with the registry `P`.
///
/// Implemented for tuples of up to twelve elements, each element type needing a
/// `FieldParser` implementation on `P`, and for `()` where every token is overflow.
///
/// A column type the registry has no parser for is rejected by the compiler:
///
/// ```compile_fail
/// use std::num::ParseIntError;
/// use tuple_csv::core::{parser::FieldParser, row::RowDeserializer};
///
/// #[derive(Default)]
/// struct IntsOnly;
///
/// impl FieldParser<i32> for IntsOnly {
///     type Error = ParseIntError;
///
///     fn parse(&self, token: &str) -> Result<i32, Self::Error> {
///         token.parse()
///     }
/// }
///
/// // no `FieldParser<String>` on `IntsOnly`
/// let row = RowDeserializer::<IntsOnly, (i32, String)>::new().deserialize("1,a");
/// ```
pub trait Columns<P>: Sized {
    /// Number of typed columns.
    const ARITY: usize;

    /// Consumes exactly `ARITY` tokens, left to right.
    ///
    /// Fails with [`CsvError::MissingColumn`] on the first absent token, or with
    /// [`CsvError::Conversion`] carrying the parser's own error.
    fn from_tokens(tokens: &mut Tokens<'_>) -> Result<Self, CsvError>;
}

fn parse_column<P, T>(tokens: &mut Tokens<'_>, index: usize) -> Result<T, CsvError>
where
    P: FieldParser<T>,
{
    let token = tokens.next().ok_or(CsvError::MissingColumn(index))?;
    P::default()
        .parse(token)
        .map_err(|error| CsvError::Conversion(error.into()))
}

impl<P> Columns<P> for () {
    const ARITY: usize = 0;

    fn from_tokens(_tokens: &mut Tokens<'_>) -> Result<Self, CsvError> {
        Ok(())
    }
}

macro_rules! tuple_columns {
    ($arity:literal => $($index:literal $name:ident),+) => {
        impl<P, $($name),+> Columns<P> for ($($name,)+)
        where
            $(P: FieldParser<$name>,)+
        {
            const ARITY: usize = $arity;

            fn from_tokens(tokens: &mut Tokens<'_>) -> Result<Self, CsvError> {
                Ok(($(parse_column::<P, $name>(tokens, $index)?,)+))
            }
        }
    };
}

tuple_columns!(1 => 0 T0);
tuple_columns!(2 => 0 T0, 1 T1);
tuple_columns!(3 => 0 T0, 1 T1, 2 T2);
tuple_columns!(4 => 0 T0, 1 T1, 2 T2, 3 T3);
tuple_columns!(5 => 0 T0, 1 T1, 2 T2, 3 T3, 4 T4);
tuple_columns!(6 => 0 T0, 1 T1, 2 T2, 3 T3, 4 T4, 5 T5);
tuple_columns!(7 => 0 T0, 1 T1, 2 T2, 3 T3, 4 T4, 5 T5, 6 T6);
tuple_columns!(8 => 0 T0, 1 T1, 2 T2, 3 T3, 4 T4, 5 T5, 6 T6, 7 T7);
tuple_columns!(9 => 0 T0, 1 T1, 2 T2, 3 T3, 4 T4, 5 T5, 6 T6, 7 T7, 8 T8);
tuple_columns!(10 => 0 T0, 1 T1, 2 T2, 3 T3, 4 T4, 5 T5, 6 T6, 7 T7, 8 T8, 9 T9);
tuple_columns!(11 => 0 T0, 1 T1, 2 T2, 3 T3, 4 T4, 5 T5, 6 T6, 7 T7, 8 T8, 9 T9, 10 T10);
tuple_columns!(12 => 0 T0, 1 T1, 2 T2, 3 T3, 4 T4, 5 T5, 6 T6, 7 T7, 8 T8, 9 T9, 10 T10, 11 T11);

/// Turns one line into a [`Row`] of the column types `T`, using the registry `P`.
///
/// The deserializer holds no state between calls: every line starts from scratch,
/// so a line that failed cannot leave anything behind for the next one.
///
/// # Examples
///
/// ```
/// use tuple_csv::core::{parser::DefaultParser, row::RowDeserializer};
/// use tuple_csv::CsvError;
///
/// let deserializer = RowDeserializer::<DefaultParser, (u8, String)>::new();
///
/// let row = deserializer.deserialize("7,seven,,extra").unwrap();
/// assert_eq!(row.columns, (7, "seven".to_string()));
/// assert_eq!(row.overflow, vec!["", "extra"]);
///
/// let missing = deserializer.deserialize("7");
/// assert!(matches!(missing, Err(CsvError::MissingColumn(1))));
/// ```
pub struct RowDeserializer<P, T> {
    pd: PhantomData<fn() -> (P, T)>,
}

impl<P, T> RowDeserializer<P, T> {
    pub fn new() -> Self {
        Self { pd: PhantomData }
    }
}

impl<P, T> RowDeserializer<P, T>
where
    T: Columns<P>,
{
    /// Number of typed columns each line must provide.
    pub fn arity(&self) -> usize {
        T::ARITY
    }

    pub fn deserialize(&self, line: &str) -> RowResult<T> {
        let mut tokens = Tokens::new(line);

        let columns = T::from_tokens(&mut tokens)?;
        let overflow: Vec<String> = tokens.map(str::to_owned).collect();

        trace!(
            "Parsed row: {} columns, {} overflow tokens",
            T::ARITY,
            overflow.len()
        );

        Ok(Row { columns, overflow })
    }
}

impl<P, T> Default for RowDeserializer<P, T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<P, T> Clone for RowDeserializer<P, T> {
    fn clone(&self) -> Self {
        Self { pd: PhantomData }
    }
}

impl<P, T> fmt::Debug for RowDeserializer<P, T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RowDeserializer").finish()
    }
}
