//! seristruct-compiler
//!
//! This crate implements:
//!  1) A line classifier and type-token tokenizer for SeriStruct IDL files,
//!  2) A parser state machine producing `RecordSchema`s,
//!  3) A schema verifier (duplicate records and fields, reserved names),
//!  4) The layout engine computing offsets and buffer sizes,
//!  5) C++ accessor generation (`generate_record` → `String`),
//!  6) The batch pipeline and its error type (`GenError`).

pub mod error;
pub mod options;
pub mod utils;
pub mod tokenizer;
pub mod parser;
pub mod verifier;
pub mod layout;
pub mod gen_cpp;
pub mod compiler;

pub use compiler::{compile_schema, generate_files, write_generated, GeneratedFile};
pub use error::GenError;
pub use gen_cpp::generate_record;
pub use layout::{compute_layout, Layout};
pub use options::{GenOptions, HeaderStyle};
pub use parser::parse_schema;
pub use seristruct_schema as schema;
