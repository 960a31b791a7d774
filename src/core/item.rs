use crate::error::CsvError;

/// Type alias for item reading results.
///
/// - `Ok(Some(item))` an item was read
/// - `Ok(None)` the source is exhausted
/// - `Err(error)` the current item could not be read
pub type ItemReaderResult<I> = Result<Option<I>, CsvError>;

/// Pull-style source of items, one item per call.
///
/// Readers take `&self` so they can be shared by reference; implementations keep
/// their position behind interior mutability.
pub trait ItemReader<I> {
    fn read(&self) -> ItemReaderResult<I>;
}
