//! Oracle type normalization and default classification.
//!
//! - [`canonical`]: the [`ToCanonical`]/[`FromCanonical`] traits and [`ColumnDesc`]
//! - [`typemap`]: the Oracle implementation, [`format_type`] and [`parse_type`]
//! - [`defaults`]: literal vs. raw expression classification of column defaults
//!
//! # Usage
//!
//! ```rust
//! use ora_inspect::dialect::{format_type, parse_type};
//!
//! let t = parse_type("number(10,2)").unwrap();
//! assert_eq!(format_type(&t).unwrap(), "number(10,2)");
//! ```

pub mod canonical;
pub mod defaults;
pub mod typemap;

pub use canonical::{ColumnDesc, FromCanonical, ToCanonical};
pub use defaults::classify_default;
pub use typemap::{format_type, parse_type, to_canonical, OracleTypes, TYPE_NAMES};
