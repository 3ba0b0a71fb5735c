//! # formkit-core
//!
//! The two pure halves of formkit:
//!
//! - **rendering**: a schema document plus its type map becomes HTML form
//!   markup, one control per leaf, with dotted field paths as input names;
//! - **reconstruction**: the flat path/value pairs a browser posts back become
//!   a nested, type-coerced document again.
//!
//! Both directions are driven by the same [`TypeMap`] descriptor tree and the
//! same [`FieldPath`] scheme, so every path the renderer emits is a path the
//! reconstructor understands.
//!
//! ```
//! use formkit_core::{FlatSubmission, FormDefinition};
//!
//! let form = FormDefinition::from_json_str(
//!     r#"{"user": {"age": 30}}"#,
//!     r#"{"user": {"age": "int"}}"#,
//! )
//! .unwrap();
//!
//! let flat: FlatSubmission = [("user.age", "31")].into_iter().collect();
//! let document = form.reconstruct(&flat);
//! assert_eq!(document["user"]["age"], 31);
//! ```

pub mod descriptor;
pub mod document;
pub mod error;
pub mod path;
pub mod reconstruct;
pub mod render;
pub mod walk;

pub use descriptor::{FieldType, ScalarType, TypeMap, TypeNode};
pub use document::{to_json_pretty, Document, FormDefinition};
pub use error::CoreError;
pub use path::FieldPath;
pub use reconstruct::{flatten, reconstruct, unflatten, FlatSubmission};
pub use render::{field_paths, render, FormSummary, ListEncoding};
