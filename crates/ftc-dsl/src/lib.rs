//! Transpiler from the FTC robot DSL to Java.
//!
//! Robot programs are written as one decorated Python-syntax class: hardware
//! declared in `init_hardware`, behavior in `run` and `loop`. `ftc-dsl`
//! turns that class into a `LinearOpMode` subclass for the FTC SDK.
//!
//! # Architecture
//!
//! ```text
//! source ─> input::python ─> ast::Unit ─┬─> registry (hardware fields)
//!          (tree-sitter)                ├─> metadata (annotations)
//!                                       └─> output::java ─> imports + class
//!                                            (output::expr, mapping)
//! ```
//!
//! # Example
//!
//! ```
//! let java = ftc_dsl::transpile(
//!     "@teleop(\"Drive\")\nclass Bot:\n    def loop(self):\n        sleep(10)\n",
//! );
//! assert!(java.contains("@TeleOp(name=\"Drive\", group=\"Linear Opmode\")"));
//! assert!(java.contains("while (opModeIsActive()) {"));
//! ```
//!
//! # Faults
//!
//! Only unreadable input fails the unit: a syntax error, or not exactly one
//! class. [`transpile`] turns those into a comment block carrying the
//! original text. Everything else the translator does not understand comes
//! out as an inline `/* ... */` marker.

pub mod ast;
pub mod error;
pub mod input;
pub mod mapping;
pub mod metadata;
pub mod output;
pub mod registry;
pub mod transpile;

// Re-exports: AST
pub use ast::{BinaryOp, Expr, Literal, Routine, Stmt, UnaryOp, Unit};

// Re-exports: errors
pub use error::ReadError;

// Re-exports: pipeline stages
pub use input::read_unit;
pub use metadata::{OpModeInfo, OpModeKind, UnitMetadata};
pub use output::JavaWriter;
pub use registry::{ComponentRegistry, HardwareComponent};

// Re-exports: entry points
pub use transpile::{TranspileOptions, fallback_output, transpile, transpile_with, try_transpile};
