//! A forgiving N-Triples codec: one quad per line, serialized as a
//! triple (the graph position is not part of the wire form), and a parser
//! that silently skips any line that does not parse rather than failing the
//! whole document.
#![deny(future_incompatible, nonstandard_style, rust_2018_idioms)]

mod error;
mod parser;
mod serializer;

pub use crate::error::MalformedWireForm;
pub use crate::parser::{parse, parse_reader, parse_strict};
pub use crate::serializer::{serialize_to_string, Serializer};
