use std::{error::Error, str::FromStr};

/// Boxed error returned by a field parser once it leaves the registry.
pub type ParserError = Box<dyn Error + Send + Sync + 'static>;

/// A converter from one delimited token to a value of type `T`.
///
/// A registry is a single type implementing `FieldParser<T>` once for every
/// column type it supports. The row deserializer builds a fresh registry value
/// with `Default` for each column and calls [`FieldParser::parse`] on the token.
///
/// Which implementation handles a column is decided by the compiler: pairing a
/// column type with a registry that has no `FieldParser` implementation for it
/// is a build error, not a parse-time failure.
///
/// # Examples
///
/// ```
/// use tuple_csv::core::parser::FieldParser;
/// use std::num::ParseIntError;
///
/// #[derive(Default)]
/// struct Hex;
///
/// impl FieldParser<u32> for Hex {
///     type Error = ParseIntError;
///
///     fn parse(&self, token: &str) -> Result<u32, Self::Error> {
///         u32::from_str_radix(token.trim_start_matches("0x"), 16)
///     }
/// }
///
/// assert_eq!(Hex.parse("0xff").unwrap(), 255);
/// assert!(Hex.parse("zz").is_err());
/// ```
pub trait FieldParser<T>: Default {
    /// Error raised when the token is not a valid `T`.
    type Error: Into<ParserError>;

    fn parse(&self, token: &str) -> Result<T, Self::Error>;
}

/// Registry covering every type implementing [`FromStr`].
///
/// Numbers, `bool`, `char`, `String` and any user type with a `FromStr`
/// implementation can be used as columns without writing a registry.
/// Tokens are passed through untouched; `" 5"` is not a valid `i32`.
#[derive(Debug, Default, Clone, Copy)]
pub struct DefaultParser;

impl<T> FieldParser<T> for DefaultParser
where
    T: FromStr,
    T::Err: Into<ParserError>,
{
    type Error = T::Err;

    fn parse(&self, token: &str) -> Result<T, Self::Error> {
        token.parse()
    }
}
