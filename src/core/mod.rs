/// Pull-style item reading contract
pub mod item;

/// Per-type token converters
pub mod parser;

/// Line splitting and typed tuple building
pub mod row;
