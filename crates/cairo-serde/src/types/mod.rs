pub mod array;
pub mod boolean;
pub mod byte_array;
pub mod felt;
pub mod integers;
pub mod option;
pub mod short_string;
pub mod starknet;
pub mod tuple;
pub mod u256;
