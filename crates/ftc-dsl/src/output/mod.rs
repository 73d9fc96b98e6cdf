//! Output side: Java text from the AST.

pub mod buffer;
pub mod expr;
pub mod imports;
pub mod java;

pub use buffer::EmitBuffer;
pub use expr::{Scope, translate_expr};
pub use imports::{IMPORTS, import_block};
pub use java::JavaWriter;
