//! Recursive Length Prefix codec.
//!
//! First byte dispatch:
//! - `[0x00, 0x7f]`: the byte itself
//! - `[0x80, 0xb7]`: string of `prefix - 0x80` bytes
//! - `[0xb8, 0xbf]`: `prefix - 0xb7` length bytes, then the string
//! - `[0xc0, 0xf7]`: list with a payload of `prefix - 0xc0` bytes
//! - `[0xf8, 0xff]`: `prefix - 0xf7` length bytes, then the list payload

pub mod decode;
pub mod encode;
pub mod item;
pub mod reader;
pub mod writer;

pub use {
    decode::{decode, decode_exact, decode_item},
    encode::{encode, encode_to_vec, encoded_len},
    item::RlpItem,
    reader::Reader,
    writer::Writer,
};

pub const OFFSET_SHORT_STRING: u8 = 0x80;
pub const OFFSET_LONG_STRING: u8 = 0xb7;
pub const OFFSET_SHORT_LIST: u8 = 0xc0;
pub const OFFSET_LONG_LIST: u8 = 0xf7;
