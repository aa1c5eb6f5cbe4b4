//! Snabi crate.
//!
//! Cairo ABI codec for Starknet: parse a contract ABI, then encode arguments
//! to calldata and decode results or events back to values.

pub mod cairo_serde {
    pub use snabi_cairo_serde::*;
}

pub mod parser {
    pub use snabi_parser::*;
}

pub mod codec {
    pub use snabi_codec::*;
}
