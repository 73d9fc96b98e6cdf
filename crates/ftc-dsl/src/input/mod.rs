//! Front end: source text into the AST.

pub mod python;

pub use python::read_unit;
