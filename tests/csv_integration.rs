pub mod common;

use std::{
    cell::RefCell,
    env::temp_dir,
    fs::{self, File},
    io::{BufReader, Cursor, Write},
};

use common::{Parser, Person, init_logger};
use rand::distr::{Alphanumeric, SampleString};
use tempfile::NamedTempFile;
use tuple_csv::{
    core::{item::ItemReader, parser::DefaultParser, row::Row},
    item::csv::{csv_reader::CsvTupleReaderBuilder, options::ReaderOptions},
};

type PersonRow = Row<(i32, String, Person, f64)>;

#[test]
fn read_typed_row_after_garbage_header() {
    init_logger();

    let content = "qwkjekwqejqwe\n-5,Hello world!,John 30,3.14,,www\n";
    let stream = RefCell::new(Cursor::new(content));

    let reader = CsvTupleReaderBuilder::<Parser, (i32, String, Person, f64)>::new()
        .skip_lines(1)
        .from_stream(&stream);

    let rows: Vec<PersonRow> = reader
        .into_iter()
        .collect::<Result<_, _>>()
        .expect("all rows should parse");

    assert_eq!(rows.len(), 1);
    let (number, text, person, float) = &rows[0].columns;
    assert_eq!(*number, -5);
    assert_eq!(text, "Hello world!");
    assert_eq!(*person, Person::new("John", 30));
    assert_eq!(*float, 3.14);
    assert_eq!(rows[0].overflow, vec!["", "www"]);
}

#[test]
fn explicit_traversal_should_stop_at_end() {
    init_logger();

    let stream = RefCell::new("1,one\n2,two\n3,three\n".as_bytes());
    let reader = CsvTupleReaderBuilder::<DefaultParser, (u8, String)>::new().from_stream(&stream);

    let mut seen = Vec::new();
    let mut cursor = reader.begin();
    while cursor != reader.end() {
        seen.push(cursor.current().expect("row should parse").columns);
        cursor.advance();
    }

    assert_eq!(
        seen,
        vec![
            (1, "one".to_string()),
            (2, "two".to_string()),
            (3, "three".to_string())
        ]
    );

    // terminal cursors stay terminal
    cursor.advance();
    assert_eq!(cursor, reader.end());
}

#[test]
fn first_row_should_follow_skipped_lines() {
    let content = "0\n1\n2\n3\n4\n";

    for skip_lines in 0..5 {
        let stream = RefCell::new(content.as_bytes());
        let reader = CsvTupleReaderBuilder::<DefaultParser, (usize,)>::new()
            .skip_lines(skip_lines)
            .from_stream(&stream);

        let first = reader.begin().current().expect("row should parse");

        assert_eq!(first.columns.0, skip_lines);
    }

    let stream = RefCell::new(content.as_bytes());
    let reader = CsvTupleReaderBuilder::<DefaultParser, (usize,)>::new()
        .skip_lines(5)
        .from_stream(&stream);
    assert_eq!(reader.begin(), reader.end());
}

#[test]
fn overflow_should_keep_random_tokens_in_order() {
    let extra: Vec<String> = (0..6)
        .map(|index| {
            if index % 3 == 0 {
                String::new()
            } else {
                Alphanumeric.sample_string(&mut rand::rng(), 12)
            }
        })
        .collect();

    let line = format!("42,true,x,{}", extra.join(","));
    let stream = RefCell::new(Cursor::new(line));
    let reader =
        CsvTupleReaderBuilder::<DefaultParser, (i64, bool, char)>::new().from_stream(&stream);

    let row = reader.begin().current().expect("row should parse");

    assert_eq!(row.columns, (42, true, 'x'));
    assert_eq!(row.overflow, extra);
}

#[test]
fn read_rows_from_file() {
    init_logger();

    let mut file = NamedTempFile::new().expect("temporary file should be created");
    writeln!(file, "name,age,city").unwrap();
    writeln!(file, "Alice 31,31,Paris").unwrap();
    writeln!(file, "Bob 25,25,Lyon,extra").unwrap();
    file.flush().unwrap();

    let stream = RefCell::new(BufReader::new(File::open(file.path()).unwrap()));
    let reader = CsvTupleReaderBuilder::<DefaultParser, (String, u32)>::new()
        .skip_lines(1)
        .from_stream(&stream);

    let rows = reader
        .into_iter()
        .collect::<Result<Vec<_>, _>>()
        .expect("all rows should parse");

    assert_eq!(rows.len(), 2);
    assert_eq!(rows[0].columns, ("Alice 31".to_string(), 31));
    assert_eq!(rows[0].overflow, vec!["Paris"]);
    assert_eq!(rows[1].overflow, vec!["Lyon", "extra"]);
}

#[test]
fn options_file_should_configure_reader() {
    let file_name = Alphanumeric.sample_string(&mut rand::rng(), 16);
    let options_path = temp_dir().join(format!("{}.json", file_name));
    fs::write(&options_path, r#"{ "skip_lines": 2 }"#).expect("Failed to write options file");

    let options = ReaderOptions::from_json(&fs::read_to_string(&options_path).unwrap())
        .expect("options should be valid");

    let stream = RefCell::new("# export\ncount\n10\n20\n".as_bytes());
    let reader = CsvTupleReaderBuilder::<DefaultParser, (u64,)>::new()
        .options(&options)
        .from_stream(&stream);

    let total: u64 = reader
        .into_iter()
        .map(|row| row.expect("row should parse").columns.0)
        .sum();

    assert_eq!(total, 30);

    fs::remove_file(&options_path).ok();
}

#[test]
fn item_reader_should_drain_rows() {
    let stream = RefCell::new("Ann 20,1.5\nBen 40,2.5\n".as_bytes());
    let reader = CsvTupleReaderBuilder::<Parser, (Person, f64)>::new()
        .from_stream(&stream)
        .item_reader();

    let mut people = Vec::new();
    while let Some(row) = reader.read().expect("row should parse") {
        people.push(row.columns.0);
    }

    assert_eq!(people, vec![Person::new("Ann", 20), Person::new("Ben", 40)]);
}

#[test]
fn person_column_should_fall_back_to_defaults() {
    let stream = RefCell::new("Jane\n\n".as_bytes());
    let reader = CsvTupleReaderBuilder::<Parser, (Person,)>::new().from_stream(&stream);

    let rows: Vec<_> = reader.into_iter().collect();

    assert_eq!(rows.len(), 2);
    assert_eq!(
        rows[0].as_ref().unwrap().columns.0,
        Person::new("Jane", 50)
    );
    // an empty line has no token at all
    assert!(rows[1].is_err());
}
