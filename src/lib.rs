#![cfg_attr(docsrs, feature(doc_cfg))]

/*!
 # tuple-csv

 A statically-typed CSV row reader. Declare the column types as a tuple, hand over
 a line stream, and get one typed row per line: the tuple of converted values plus
 every token left over after the last declared column.

 ## Core Concepts

- **FieldParser:** converts one token to one typed value. A parser registry is a type
  implementing `FieldParser<T>` for every column type `T` it supports. The registry is
  checked at compile time: a column type without a parser does not build.
- **Row:** the result of one line, `columns` (the typed tuple) and `overflow` (the raw
  tokens after the typed columns, empty tokens included).
- **CsvTupleReader:** borrows the stream and knows how many leading lines to skip.
  `begin()` gives a cursor on the first row, `end()` the terminal cursor.
- **RowCursor:** forward-only position on the stream. `current()` parses the line under
  the cursor, `advance()` moves on. It is also an `Iterator` of row results.
- **ItemReader:** a pull-style `read()` view over a cursor.

 ## Format

 Fields are split on `,`. There is no quoting, no escaping and no header matching:
 columns are positional.

 ## Getting Started

```rust
# use std::{cell::RefCell, num::ParseIntError};
# use tuple_csv::{
#     core::parser::FieldParser,
#     error::CsvError,
#     item::csv::csv_reader::CsvTupleReaderBuilder,
# };
#[derive(Debug, PartialEq)]
struct Person {
    name: String,
    age: u32,
}

#[derive(Default)]
struct Parser;

impl FieldParser<i32> for Parser {
    type Error = ParseIntError;

    fn parse(&self, token: &str) -> Result<i32, Self::Error> {
        token.parse()
    }
}

impl FieldParser<String> for Parser {
    type Error = std::convert::Infallible;

    fn parse(&self, token: &str) -> Result<String, Self::Error> {
        Ok(token.to_string())
    }
}

impl FieldParser<Person> for Parser {
    type Error = ParseIntError;

    fn parse(&self, token: &str) -> Result<Person, Self::Error> {
        let (name, age) = token.split_once(' ').unwrap_or((token, ""));
        Ok(Person {
            name: name.to_string(),
            age: age.trim().parse()?,
        })
    }
}

fn main() -> Result<(), CsvError> {
    let stream = RefCell::new("header\n-5,Hello world!,John 30,,www\n".as_bytes());

    let reader = CsvTupleReaderBuilder::<Parser, (i32, String, Person)>::new()
        .skip_lines(1)
        .from_stream(&stream);

    for row in &reader {
        let row = row?;
        assert_eq!(row.columns.0, -5);
        assert_eq!(row.columns.1, "Hello world!");
        assert_eq!(row.columns.2, Person { name: "John".to_string(), age: 30 });
        assert_eq!(row.overflow, vec!["", "www"]);
    }

    Ok(())
}
```

 For column types implementing `FromStr`, the ready-made `DefaultParser` registry
 avoids writing any parser.

 ## License
 Licensed under either of

 -   Apache License, Version 2.0
     ([LICENSE-APACHE](LICENSE-APACHE) or <http://www.apache.org/licenses/LICENSE-2.0>)
 -   MIT license
     ([LICENSE-MIT](LICENSE-MIT) or <http://opensource.org/licenses/MIT>)

 at your option.
 */

/// Core module: parsers, row deserialization and the item reading contract
pub mod core;

/// Error types for row reading
pub mod error;

#[doc(inline)]
pub use error::*;

/// Readers over line streams
pub mod item;
