//! Schema model for SeriStruct records.
//!
//! ```
//! use seristruct_schema::*;
//!
//! let f32_ = lookup("f32").unwrap();
//! assert_eq!(f32_.assign_repr, "float");
//! assert_eq!(f32_.width, 4);
//! assert!(lookup("str").unwrap().is_string_like());
//! ```

pub mod catalog;
pub mod types;

pub use catalog::*;
pub use types::*;
