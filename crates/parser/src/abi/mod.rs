mod conversions;
pub mod index;
pub mod parser;
