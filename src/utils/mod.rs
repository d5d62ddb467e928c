//! Generic utility primitives with zero domain knowledge.
//!
//! - `parser` - Text extraction via regex capture groups
//! - `process` - Subprocess execution with captured output

pub mod parser;
pub mod process;
