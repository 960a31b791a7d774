#![allow(dead_code)]

mod mocks;

use std::{num::ParseIntError, str::FromStr};

pub use mocks::MockStream;

use tuple_csv::core::parser::{FieldParser, ParserError};

pub fn init_logger() {
    let _ = env_logger::builder().is_test(true).try_init();
}

#[derive(Debug, Clone, PartialEq)]
pub struct Person {
    pub name: String,
    pub age: u32,
}

impl Default for Person {
    fn default() -> Self {
        Person {
            name: "John Doe".to_string(),
            age: 50,
        }
    }
}

impl Person {
    pub fn new(name: &str, age: u32) -> Self {
        Person {
            name: name.to_string(),
            age,
        }
    }
}

/// Reads `"<name> <age>"`; missing parts keep the default person's values.
impl FromStr for Person {
    type Err = ParseIntError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut person = Person::default();
        let mut words = s.split_whitespace();

        if let Some(name) = words.next() {
            person.name = name.to_string();
        }
        if let Some(age) = words.next() {
            person.age = age.parse()?;
        }

        Ok(person)
    }
}

/// Registry with one parser per supported column type.
#[derive(Default)]
pub struct Parser;

impl FieldParser<i32> for Parser {
    type Error = ParseIntError;

    fn parse(&self, token: &str) -> Result<i32, Self::Error> {
        token.parse()
    }
}

impl FieldParser<String> for Parser {
    type Error = ParserError;

    fn parse(&self, token: &str) -> Result<String, Self::Error> {
        Ok(token.to_string())
    }
}

impl FieldParser<Person> for Parser {
    type Error = ParseIntError;

    fn parse(&self, token: &str) -> Result<Person, Self::Error> {
        token.parse()
    }
}

impl FieldParser<f64> for Parser {
    type Error = ParserError;

    fn parse(&self, token: &str) -> Result<f64, Self::Error> {
        token
            .parse::<f64>()
            .map_err(|error| format!("{}: {:?}", error, token).into())
    }
}
